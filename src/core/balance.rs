//! Pure balance computations over books and transactions.
//!
//! The viewer's time zone is an injected parameter: the same instant can
//! fall on different calendar days for different viewers, and day filtering
//! always follows the viewer's local calendar. Production callers pass
//! `chrono::Local`; tests pass a `FixedOffset`.

use chrono::{NaiveDate, TimeZone};

use crate::domain::{Book, BookKind, Transaction, TransactionKind};

/// Keeps transactions whose instant falls on the calendar day `day` in `tz`.
///
/// Order-preserving, so the newest-first invariant carries into the result.
pub fn day_filter<'a, Tz: TimeZone>(
    transactions: &'a [Transaction],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| txn.date.with_timezone(tz).date_naive() == day)
        .collect()
}

/// Computes a single book's balance, optionally restricted to one day.
///
/// A fixed book's balance is the amount of its newest (optionally filtered)
/// transaction — day-filtering yields that day's latest snapshot value, not
/// a delta. A normal book's balance is the signed sum: income adds, expense
/// subtracts. An empty set balances to 0.
pub fn book_balance<Tz: TimeZone>(book: &Book, day: Option<NaiveDate>, tz: &Tz) -> f64 {
    let filtered: Vec<&Transaction> = match day {
        Some(day) => day_filter(&book.transactions, day, tz),
        None => book.transactions.iter().collect(),
    };
    match book.kind {
        BookKind::Fixed => filtered.first().map(|txn| txn.amount).unwrap_or(0.0),
        BookKind::Normal => filtered.iter().fold(0.0, |acc, txn| match txn.kind {
            TransactionKind::Income => acc + txn.amount,
            TransactionKind::Expense => acc - txn.amount,
        }),
    }
}

/// Sums [`book_balance`] over all books. No weighting, no conversion.
pub fn portfolio_balance<Tz: TimeZone>(books: &[Book], day: Option<NaiveDate>, tz: &Tz) -> f64 {
    books.iter().map(|book| book_balance(book, day, tz)).sum()
}

/// Per-direction magnitudes over a (optionally day-filtered) book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowTotals {
    pub income: f64,
    pub expense: f64,
}

/// Aggregates income and expense totals for a normal book's summary view.
///
/// Kind is not semantically meaningful for fixed books; callers suppress
/// this view for them.
pub fn flow_totals<Tz: TimeZone>(book: &Book, day: Option<NaiveDate>, tz: &Tz) -> FlowTotals {
    let filtered: Vec<&Transaction> = match day {
        Some(day) => day_filter(&book.transactions, day, tz),
        None => book.transactions.iter().collect(),
    };
    filtered
        .iter()
        .fold(FlowTotals::default(), |mut totals, txn| {
            match txn.kind {
                TransactionKind::Income => totals.income += txn.amount,
                TransactionKind::Expense => totals.expense += txn.amount,
            }
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book_with(kind: BookKind, entries: &[(f64, TransactionKind, DateTime<Utc>)]) -> Book {
        let mut book = Book::new("Test", kind, utc(2024, 1, 1, 0));
        for (amount, txn_kind, date) in entries {
            book.insert_transaction(Transaction::new(*amount, "entry", *txn_kind, *date));
        }
        book
    }

    #[test]
    fn normal_balance_is_the_signed_sum() {
        let book = book_with(
            BookKind::Normal,
            &[
                (500.0, TransactionKind::Income, utc(2024, 1, 2, 9)),
                (120.0, TransactionKind::Expense, utc(2024, 1, 3, 9)),
                (30.0, TransactionKind::Income, utc(2024, 1, 4, 9)),
            ],
        );
        assert_eq!(book_balance(&book, None, &Utc), 410.0);
    }

    #[test]
    fn fixed_balance_is_the_newest_snapshot() {
        let book = book_with(
            BookKind::Fixed,
            &[
                (100.0, TransactionKind::Income, utc(2024, 1, 2, 9)),
                (250.0, TransactionKind::Income, utc(2024, 1, 5, 9)),
            ],
        );
        assert_eq!(book_balance(&book, None, &Utc), 250.0);
    }

    #[test]
    fn fixed_balance_ignores_the_stored_kind() {
        // Coercion happens at insert time, but loaded data may carry anything.
        let book = book_with(
            BookKind::Fixed,
            &[(75.0, TransactionKind::Expense, utc(2024, 1, 2, 9))],
        );
        assert_eq!(book_balance(&book, None, &Utc), 75.0);
    }

    #[test]
    fn empty_books_balance_to_zero() {
        for kind in [BookKind::Normal, BookKind::Fixed] {
            let book = book_with(kind, &[]);
            assert_eq!(book_balance(&book, None, &Utc), 0.0);
            assert_eq!(book_balance(&book, Some(day(2024, 1, 2)), &Utc), 0.0);
        }
    }

    #[test]
    fn day_filter_restricts_to_the_local_calendar_day() {
        let book = book_with(
            BookKind::Normal,
            &[
                (100.0, TransactionKind::Income, utc(2024, 1, 2, 9)),
                (40.0, TransactionKind::Expense, utc(2024, 1, 2, 18)),
                (999.0, TransactionKind::Income, utc(2024, 1, 3, 9)),
            ],
        );
        assert_eq!(book_balance(&book, Some(day(2024, 1, 2)), &Utc), 60.0);
        assert_eq!(book_balance(&book, Some(day(2024, 1, 3)), &Utc), 999.0);
        assert_eq!(book_balance(&book, Some(day(2024, 1, 9)), &Utc), 0.0);
    }

    #[test]
    fn day_filter_is_timezone_sensitive() {
        // 20:00 UTC is the next day in Tokyo and the same day in New York.
        let txns = vec![Transaction::new(
            10.0,
            "late",
            TransactionKind::Income,
            utc(2024, 1, 1, 20),
        )];
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();

        assert_eq!(day_filter(&txns, day(2024, 1, 2), &tokyo).len(), 1);
        assert!(day_filter(&txns, day(2024, 1, 1), &tokyo).is_empty());
        assert_eq!(day_filter(&txns, day(2024, 1, 1), &new_york).len(), 1);
        assert!(day_filter(&txns, day(2024, 1, 2), &new_york).is_empty());
    }

    #[test]
    fn day_filter_is_idempotent() {
        let book = book_with(
            BookKind::Normal,
            &[
                (10.0, TransactionKind::Income, utc(2024, 1, 2, 9)),
                (20.0, TransactionKind::Income, utc(2024, 1, 3, 9)),
            ],
        );
        let once = day_filter(&book.transactions, day(2024, 1, 2), &Utc);
        let again: Vec<Transaction> = once.iter().map(|txn| (**txn).clone()).collect();
        let twice = day_filter(&again, day(2024, 1, 2), &Utc);
        assert_eq!(once.len(), twice.len());
        assert_eq!(once[0].id, twice[0].id);
    }

    #[test]
    fn filtered_fixed_book_yields_that_days_latest_snapshot() {
        let book = book_with(
            BookKind::Fixed,
            &[
                (100.0, TransactionKind::Income, utc(2024, 1, 2, 9)),
                (150.0, TransactionKind::Income, utc(2024, 1, 2, 17)),
                (900.0, TransactionKind::Income, utc(2024, 1, 5, 9)),
            ],
        );
        assert_eq!(book_balance(&book, Some(day(2024, 1, 2)), &Utc), 150.0);
        assert_eq!(book_balance(&book, None, &Utc), 900.0);
    }

    #[test]
    fn portfolio_balance_sums_across_books() {
        let normal = book_with(
            BookKind::Normal,
            &[
                (500.0, TransactionKind::Income, utc(2024, 1, 2, 9)),
                (200.0, TransactionKind::Expense, utc(2024, 1, 3, 9)),
            ],
        );
        let fixed = book_with(
            BookKind::Fixed,
            &[(1000.0, TransactionKind::Income, utc(2024, 1, 2, 9))],
        );
        assert_eq!(portfolio_balance(&[normal, fixed], None, &Utc), 1300.0);
        assert_eq!(portfolio_balance(&[], None, &Utc), 0.0);
    }

    #[test]
    fn flow_totals_group_by_kind() {
        let book = book_with(
            BookKind::Normal,
            &[
                (500.0, TransactionKind::Income, utc(2024, 1, 2, 9)),
                (120.0, TransactionKind::Expense, utc(2024, 1, 2, 12)),
                (30.0, TransactionKind::Income, utc(2024, 1, 3, 9)),
            ],
        );
        let all = flow_totals(&book, None, &Utc);
        assert_eq!(all.income, 530.0);
        assert_eq!(all.expense, 120.0);

        let second = flow_totals(&book, Some(day(2024, 1, 2)), &Utc);
        assert_eq!(second.income, 500.0);
        assert_eq!(second.expense, 120.0);
    }
}
