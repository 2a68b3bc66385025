use std::fmt;

use serde::Serialize;

use crate::ops::SchemaOp;

/// Identifier of a migration unit: a timestamp-like version plus a
/// snake_case name. Versions must be globally unique and strictly
/// increasing across the catalog; the registry enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MigrationId {
    pub version: u64,
    pub name: &'static str,
}

impl MigrationId {
    pub const fn new(version: u64, name: &'static str) -> Self {
        Self { version, name }
    }
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.version, self.name)
    }
}

/// One unit of schema evolution. Both directions are declared as explicit
/// op lists; the registry rejects any unit whose `backward` is not the
/// exact inversion of its `forward`, so a registered unit is always
/// reversible at the schema level.
pub trait Migration: Send + Sync {
    fn id(&self) -> MigrationId;

    fn forward(&self) -> Vec<SchemaOp>;

    fn backward(&self) -> Vec<SchemaOp>;

    /// DML executed after the forward DDL (e.g. backfilling a freshly added
    /// column). Data motion is not reversible and is deliberately outside
    /// the forward/backward symmetry contract.
    fn backfill(&self) -> Option<&'static str> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Outcome of a single op within a unit. Skips are surfaced, never
/// swallowed: a skip means the live schema already contained the op's
/// effect, which is drift worth auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OpOutcome {
    Applied,
    Skipped { reason: String },
}

/// Per-unit result of a runner pass.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub version: u64,
    pub name: String,
    pub direction: Direction,
    pub outcomes: Vec<OpOutcome>,
}

impl ApplyReport {
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, OpOutcome::Applied))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.applied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_displays_version_and_name() {
        let id = MigrationId::new(20240102093000, "create_usuarios");
        assert_eq!(id.to_string(), "20240102093000_create_usuarios");
    }

    #[test]
    fn report_counts_applied_and_skipped() {
        let report = ApplyReport {
            version: 1,
            name: "x".into(),
            direction: Direction::Up,
            outcomes: vec![
                OpOutcome::Applied,
                OpOutcome::Skipped {
                    reason: "create table usuarios already satisfied".into(),
                },
                OpOutcome::Applied,
            ],
        };
        assert_eq!(report.applied(), 2);
        assert_eq!(report.skipped(), 1);
    }
}
