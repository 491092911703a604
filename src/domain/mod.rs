//! Pure domain models (Book, Transaction). No I/O, no CLI, no storage.

pub mod book;
pub mod transaction;

pub use book::{Book, BookKind};
pub use transaction::{Transaction, TransactionKind};
