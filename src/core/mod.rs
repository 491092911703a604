//! Business logic: pure reducers, balance engine, schema migration, and the
//! session facade binding them to a store.

pub mod balance;
pub mod manager;
pub mod migration;
pub mod repository;

pub use balance::{book_balance, day_filter, flow_totals, portfolio_balance, FlowTotals};
pub use manager::{fixed_first, BookManager};
pub use repository::Repository;
