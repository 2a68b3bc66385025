//! SQLite side of the migration engine: DDL rendering for schema ops, a
//! PRAGMA-based inspector, the runner with its `_migrations` ledger, and
//! the school schema catalog.

pub mod catalog;
pub mod ddl;
pub mod inspect;
pub mod runner;

pub use catalog::school_catalog;
pub use inspect::SqliteInspector;
pub use runner::{MigrationRunner, MigrationStatus};
