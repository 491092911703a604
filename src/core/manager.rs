//! Facade that coordinates the in-memory collection with the persistence
//! boundary.

use chrono::{DateTime, Local, NaiveDate, Utc};
use uuid::Uuid;

use crate::core::{balance, migration, repository::Repository};
use crate::domain::{Book, BookKind, TransactionKind};
use crate::errors::Result;
use crate::storage::BookStore;

/// Owns the canonical book collection for a single interactive session.
///
/// The collection is loaded (and migrated) once at construction; every
/// successful mutation replaces it and persists the full serialized form.
/// Saves are fire-and-forget: a failed write keeps the in-memory state and
/// is logged, not rolled back.
pub struct BookManager {
    books: Vec<Book>,
    store: Box<dyn BookStore>,
}

impl BookManager {
    /// Loads the stored collection. Read failures are absorbed into an
    /// empty collection.
    pub fn open(store: Box<dyn BookStore>) -> Self {
        let raw = match store.load() {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored books, starting empty");
                None
            }
        };
        let books = migration::load_and_migrate(raw.as_deref());
        Self { books, store }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, book_id: Uuid) -> Option<&Book> {
        self.books.iter().find(|book| book.id == book_id)
    }

    pub fn create_book(&mut self, name: &str, kind: BookKind) -> Result<Uuid> {
        let (next, id) = Repository::create_book(&self.books, name, kind, Utc::now())?;
        self.commit(next);
        Ok(id)
    }

    pub fn rename_book(&mut self, book_id: Uuid, new_name: &str) -> Result<()> {
        let next = Repository::rename_book(&self.books, book_id, new_name)?;
        self.commit(next);
        Ok(())
    }

    /// Destructive and irreversible; confirmation is the caller's concern.
    pub fn delete_book(&mut self, book_id: Uuid) -> Result<()> {
        let next = Repository::delete_book(&self.books, book_id)?;
        self.commit(next);
        Ok(())
    }

    pub fn add_transaction(
        &mut self,
        book_id: Uuid,
        amount: f64,
        description: &str,
        requested_kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<Uuid> {
        let (next, id) = Repository::add_transaction(
            &self.books,
            book_id,
            amount,
            description,
            requested_kind,
            timestamp,
        )?;
        self.commit(next);
        Ok(id)
    }

    pub fn edit_transaction_description(
        &mut self,
        book_id: Uuid,
        transaction_id: Uuid,
        new_description: &str,
    ) -> Result<()> {
        let next = Repository::edit_transaction_description(
            &self.books,
            book_id,
            transaction_id,
            new_description,
        )?;
        self.commit(next);
        Ok(())
    }

    pub fn delete_transaction(&mut self, book_id: Uuid, transaction_id: Uuid) -> Result<()> {
        let next = Repository::delete_transaction(&self.books, book_id, transaction_id)?;
        self.commit(next);
        Ok(())
    }

    /// Balance of one book in the viewer's local calendar, or `None` for an
    /// unknown id.
    pub fn book_balance(&self, book_id: Uuid, day: Option<NaiveDate>) -> Option<f64> {
        self.book(book_id)
            .map(|book| balance::book_balance(book, day, &Local))
    }

    pub fn portfolio_balance(&self, day: Option<NaiveDate>) -> f64 {
        balance::portfolio_balance(&self.books, day, &Local)
    }

    pub fn flow_totals(&self, book_id: Uuid, day: Option<NaiveDate>) -> Option<balance::FlowTotals> {
        self.book(book_id)
            .map(|book| balance::flow_totals(book, day, &Local))
    }

    fn commit(&mut self, next: Vec<Book>) {
        self.books = next;
        match migration::serialize_books(&self.books) {
            Ok(blob) => {
                if let Err(err) = self.store.save(&blob) {
                    tracing::warn!(error = %err, "failed to persist books, keeping in-memory state");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize books"),
        }
    }
}

/// Presentation ordering for the home screen: fixed books first, otherwise
/// stable. Not a repository invariant.
pub fn fixed_first(books: &[Book]) -> Vec<&Book> {
    let mut ordered: Vec<&Book> = books.iter().collect();
    ordered.sort_by_key(|book| book.kind != BookKind::Fixed);
    ordered
}
