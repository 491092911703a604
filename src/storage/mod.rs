//! Persistence boundary for the serialized book collection.

pub mod json_backend;

use crate::errors::Result;

/// Abstraction over persistence backends holding the collection blob.
///
/// The blob is opaque at this layer: the whole collection is read and
/// replaced as a unit, and the last writer wins.
pub trait BookStore: Send + Sync {
    /// Returns the previously saved blob, or `None` when nothing has been
    /// stored yet.
    fn load(&self) -> Result<Option<String>>;

    /// Durably replaces the stored blob.
    fn save(&self, blob: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
