//! Pure reducer operations over the book collection.
//!
//! Every operation borrows the current collection and returns a fresh one;
//! caller-held state is never mutated, and a rejected operation leaves it
//! untouched by construction. Timestamps are injected parameters so the
//! reducers stay deterministic.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Book, BookKind, Transaction, TransactionKind};
use crate::errors::{BookError, Result};

/// Provides validated collection-level CRUD for books and transactions.
pub struct Repository;

impl Repository {
    /// Creates an empty book and returns the updated collection with the new id.
    ///
    /// The book is appended; display ordering is a presentation concern.
    pub fn create_book(
        books: &[Book],
        name: &str,
        kind: BookKind,
        now: DateTime<Utc>,
    ) -> Result<(Vec<Book>, Uuid)> {
        let name = non_blank(name, "book name")?;
        let book = Book::new(name, kind, now);
        let id = book.id;
        let mut next = books.to_vec();
        next.push(book);
        Ok((next, id))
    }

    /// Renames a book. Only `name` changes.
    pub fn rename_book(books: &[Book], book_id: Uuid, new_name: &str) -> Result<Vec<Book>> {
        let name = non_blank(new_name, "book name")?;
        let mut next = books.to_vec();
        let book = find_book(&mut next, book_id)?;
        book.name = name.to_string();
        Ok(next)
    }

    /// Removes a book and, with it, all of its transactions.
    pub fn delete_book(books: &[Book], book_id: Uuid) -> Result<Vec<Book>> {
        if !books.iter().any(|book| book.id == book_id) {
            return Err(BookError::BookNotFound(book_id));
        }
        Ok(books
            .iter()
            .filter(|book| book.id != book_id)
            .cloned()
            .collect())
    }

    /// Records a transaction against a book and returns the new transaction id.
    ///
    /// Fixed books coerce the kind to `Income` regardless of what the caller
    /// requested. The book's sequence is re-sorted newest-first, with the
    /// fresh entry ordered ahead of existing entries sharing its timestamp.
    pub fn add_transaction(
        books: &[Book],
        book_id: Uuid,
        amount: f64,
        description: &str,
        requested_kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<(Vec<Book>, Uuid)> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(BookError::Validation(format!(
                "amount must be a non-negative number, got {amount}"
            )));
        }
        let description = non_blank(description, "transaction description")?;
        let mut next = books.to_vec();
        let book = find_book(&mut next, book_id)?;
        let kind = match book.kind {
            BookKind::Fixed => TransactionKind::Income,
            BookKind::Normal => requested_kind,
        };
        let id = book.insert_transaction(Transaction::new(amount, description, kind, timestamp));
        Ok((next, id))
    }

    /// Rewrites a transaction's description; no other field is mutable.
    pub fn edit_transaction_description(
        books: &[Book],
        book_id: Uuid,
        transaction_id: Uuid,
        new_description: &str,
    ) -> Result<Vec<Book>> {
        let description = non_blank(new_description, "transaction description")?;
        let mut next = books.to_vec();
        let book = find_book(&mut next, book_id)?;
        let txn = book
            .transaction_mut(transaction_id)
            .ok_or(BookError::TransactionNotFound(transaction_id))?;
        txn.description = description.to_string();
        Ok(next)
    }

    /// Removes a transaction from its parent book.
    pub fn delete_transaction(
        books: &[Book],
        book_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<Vec<Book>> {
        let mut next = books.to_vec();
        let book = find_book(&mut next, book_id)?;
        book.remove_transaction(transaction_id)
            .ok_or(BookError::TransactionNotFound(transaction_id))?;
        Ok(next)
    }
}

fn find_book(books: &mut [Book], book_id: Uuid) -> Result<&mut Book> {
    books
        .iter_mut()
        .find(|book| book.id == book_id)
        .ok_or(BookError::BookNotFound(book_id))
}

fn non_blank<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BookError::Validation(format!("{field} must not be blank")));
    }
    Ok(trimmed)
}
