//! Load-time parsing, schema migration, and serialization of the persisted
//! book collection.
//!
//! The persisted layout is a JSON array of book records (`id`, `name`,
//! `kind`, `transactions`, `createdAt`); transactions carry `id`, `amount`,
//! `description`, `type`, `date`. Unknown fields are ignored without
//! disturbing known ones.

use std::collections::HashSet;

use crate::domain::Book;
use crate::errors::Result;

/// Persisted schema revisions. v0 records predate fixed books and have no
/// `kind` discriminator; v1 added `kind` ("normal" | "fixed").
pub const SCHEMA_VERSION: u8 = 1;

/// Parses and migrates a previously persisted blob.
///
/// Absent or blank input and unreadable data both yield an empty
/// collection; the failure is logged, never raised. Successful loads come
/// out fully migrated: records missing `kind` become `normal`, and every
/// book's sequence is re-sorted newest-first so downstream logic always
/// sees the ordering invariant satisfied. Applying this to its own output
/// is a no-op.
pub fn load_and_migrate(raw: Option<&str>) -> Vec<Book> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let mut books: Vec<Book> = match serde_json::from_str(raw) {
        Ok(books) => books,
        Err(err) => {
            tracing::warn!(error = %err, "stored book data is unreadable, starting empty");
            return Vec::new();
        }
    };
    for warning in collection_warnings(&books) {
        tracing::warn!("{warning}");
    }
    for book in &mut books {
        book.sort_transactions();
    }
    books
}

/// Serializes the collection into the persisted blob form.
pub fn serialize_books(books: &[Book]) -> Result<String> {
    Ok(serde_json::to_string_pretty(books)?)
}

/// Detects anomalies in a loaded collection: duplicate ids, invalid
/// amounts, and out-of-order sequences.
pub fn collection_warnings(books: &[Book]) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut book_ids = HashSet::new();
    for book in books {
        if !book_ids.insert(book.id) {
            warnings.push(format!("duplicate book id {}", book.id));
        }
        if book
            .transactions
            .windows(2)
            .any(|pair| pair[0].date < pair[1].date)
        {
            warnings.push(format!(
                "book {} has transactions out of order",
                book.id
            ));
        }
        let mut txn_ids = HashSet::new();
        for txn in &book.transactions {
            if !txn_ids.insert(txn.id) {
                warnings.push(format!(
                    "book {} has duplicate transaction id {}",
                    book.id, txn.id
                ));
            }
            if !txn.amount.is_finite() || txn.amount < 0.0 {
                warnings.push(format!(
                    "transaction {} has invalid amount {}",
                    txn.id, txn.amount
                ));
            }
        }
    }
    warnings
}
