//! Database-free model of the migration engine: schema ops and their
//! inversion, the snapshot simulator used to validate a migration sequence
//! before it ever touches a database, and the registry that rejects
//! ill-formed sequences (version collisions, asymmetric up/down diffs,
//! dangling foreign keys) at registration time.

pub mod inspect;
pub mod migration;
pub mod ops;
pub mod registry;
pub mod snapshot;

pub use inspect::{SchemaInspector, op_satisfied};
pub use migration::{ApplyReport, Direction, Migration, MigrationId, OpOutcome};
pub use ops::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, SchemaOp, TableDef, invert_all,
};
pub use registry::MigrationRegistry;
pub use snapshot::SchemaSnapshot;
