use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::Transaction;

/// A named ledger holding an ordered sequence of transactions.
///
/// The sequence is always materialized newest-first by `date`;
/// [`Book::insert_transaction`] restores the invariant on every insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    /// Absent in records persisted before fixed books existed.
    #[serde(default)]
    pub kind: BookKind,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
}

impl Book {
    pub fn new(name: impl Into<String>, kind: BookKind, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            transactions: Vec::new(),
            created_at,
        }
    }

    /// Inserts a transaction and restores the newest-first ordering.
    ///
    /// The fresh entry is staged at the front before the stable sort, so it
    /// stays ahead of older entries sharing the identical timestamp.
    pub fn insert_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.insert(0, transaction);
        self.sort_transactions();
        id
    }

    /// Re-sorts the sequence newest-first without reordering equal timestamps.
    pub fn sort_transactions(&mut self) {
        self.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    /// Removes and returns the transaction with `id`, if present.
    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Enumerates the two ledger flavors.
#[derive(Default)]
pub enum BookKind {
    /// Income/expense accumulation; the balance is a signed sum.
    #[default]
    Normal,
    /// Single rolling balance; the newest entry is the balance.
    Fixed,
}

impl fmt::Display for BookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookKind::Normal => "Normal",
            BookKind::Fixed => "Fixed",
        };
        f.write_str(label)
    }
}
