use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDateTime, Utc};
use escolar_common::{Error, Result};
use escolar_schema::{
    ApplyReport, Direction, Migration, MigrationRegistry, OpOutcome, op_satisfied,
};
use rusqlite::{Connection, params};
use serde::Serialize;
use tracing::{info, warn};

use crate::ddl::render_op;
use crate::inspect::SqliteInspector;

const LEDGER_DDL: &str = "CREATE TABLE IF NOT EXISTS _migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

/// Applies a registered catalog against a SQLite database. Each unit runs
/// inside one transaction together with its `_migrations` ledger row, so a
/// unit is either fully applied and recorded or not at all. Batches are
/// sequential; there is no concurrent application.
pub struct MigrationRunner {
    conn: Mutex<Connection>,
    registry: MigrationRegistry,
}

/// Ledger-vs-catalog view of one unit. `applied` reflects the ledger row;
/// `applied_at` can still be `None` when the recorded timestamp is
/// unreadable.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationStatus {
    pub version: u64,
    pub name: String,
    pub applied: bool,
    pub applied_at: Option<DateTime<Utc>>,
}

impl MigrationRunner {
    pub fn open(db_path: &Path, registry: MigrationRegistry) -> Result<Self> {
        info!("opening migration database at {}", db_path.display());
        let conn = Connection::open(db_path)
            .map_err(|e| Error::Database(format!("failed to open database: {e}")))?;
        Self::init(conn, registry)
    }

    pub fn in_memory(registry: MigrationRegistry) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Database(format!("failed to open in-memory database: {e}")))?;
        Self::init(conn, registry)
    }

    fn init(conn: Connection, registry: MigrationRegistry) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| Error::Database(format!("failed to set pragmas: {e}")))?;
        conn.execute(LEDGER_DDL, [])
            .map_err(|e| Error::Database(format!("failed to create migration ledger: {e}")))?;
        Ok(Self {
            conn: Mutex::new(conn),
            registry,
        })
    }

    pub fn registry(&self) -> &MigrationRegistry {
        &self.registry
    }

    /// Run statements against the migrated database under the runner's
    /// lock. Callers inspect or seed the schema the catalog produced.
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.connection()?;
        f(&conn)
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Database("migration runner lock poisoned".into()))
    }

    fn ledger(conn: &Connection) -> Result<BTreeMap<u64, (String, Option<DateTime<Utc>>)>> {
        let mut stmt = conn
            .prepare("SELECT version, name, applied_at FROM _migrations ORDER BY version")
            .map_err(|e| Error::Database(format!("failed to read ledger: {e}")))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)? as u64,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| Error::Database(format!("failed to read ledger: {e}")))?;

        let mut ledger = BTreeMap::new();
        for row in rows {
            let (version, name, raw) =
                row.map_err(|e| Error::Database(format!("failed to read ledger row: {e}")))?;
            ledger.insert(version, (name, parse_datetime(&raw)));
        }
        Ok(ledger)
    }

    /// Catalog-ordered status, one entry per registered unit. Ledger rows
    /// with no catalog counterpart indicate a database ahead of this build
    /// and are logged, not returned.
    pub fn status(&self) -> Result<Vec<MigrationStatus>> {
        let conn = self.connection()?;
        let mut ledger = Self::ledger(&conn)?;

        let mut statuses = Vec::with_capacity(self.registry.len());
        for unit in self.registry.units() {
            let id = unit.id();
            let row = ledger.remove(&id.version);
            statuses.push(MigrationStatus {
                version: id.version,
                name: id.name.to_string(),
                applied: row.is_some(),
                applied_at: row.and_then(|(_, at)| at),
            });
        }
        for (version, (name, _)) in ledger {
            warn!("ledger contains {version}_{name}, which this catalog does not know");
        }
        Ok(statuses)
    }

    /// Apply every unapplied unit in ascending version order, optionally
    /// stopping after `to`.
    pub fn up(&self, to: Option<u64>) -> Result<Vec<ApplyReport>> {
        let mut conn = self.connection()?;
        let ledger = Self::ledger(&conn)?;

        let mut reports = Vec::new();
        for unit in self.registry.units() {
            let id = unit.id();
            if let Some(limit) = to
                && id.version > limit
            {
                break;
            }
            if ledger.contains_key(&id.version) {
                continue;
            }
            reports.push(Self::apply_unit(&mut conn, unit.as_ref(), Direction::Up)?);
        }
        if reports.is_empty() {
            info!("database is up to date");
        }
        Ok(reports)
    }

    /// Revert applied units in descending version order until only versions
    /// `<= to` remain. `to = 0` reverts everything.
    pub fn down(&self, to: u64) -> Result<Vec<ApplyReport>> {
        let mut conn = self.connection()?;
        let ledger = Self::ledger(&conn)?;

        let mut reports = Vec::new();
        for unit in self.registry.units().iter().rev() {
            let id = unit.id();
            if id.version <= to {
                break;
            }
            if !ledger.contains_key(&id.version) {
                continue;
            }
            reports.push(Self::apply_unit(&mut conn, unit.as_ref(), Direction::Down)?);
        }
        Ok(reports)
    }

    fn apply_unit(
        conn: &mut Connection,
        unit: &dyn Migration,
        direction: Direction,
    ) -> Result<ApplyReport> {
        let id = unit.id();
        let ops = match direction {
            Direction::Up => unit.forward(),
            Direction::Down => unit.backward(),
        };

        let tx = conn
            .transaction()
            .map_err(|e| Error::Database(format!("{id}: failed to begin transaction: {e}")))?;

        let mut outcomes = Vec::with_capacity(ops.len());
        for op in &ops {
            let satisfied = op_satisfied(&SqliteInspector::new(&tx), op)?;
            if satisfied {
                let reason = format!("{} already satisfied", op.describe());
                warn!("schema drift in {id}: {reason}, skipping");
                outcomes.push(OpOutcome::Skipped { reason });
                continue;
            }
            let sql = render_op(op);
            tx.execute_batch(&sql)
                .map_err(|e| Error::Database(format!("{id}: {} failed: {e}", op.describe())))?;
            outcomes.push(OpOutcome::Applied);
        }

        match direction {
            Direction::Up => {
                if let Some(sql) = unit.backfill() {
                    tx.execute_batch(sql)
                        .map_err(|e| Error::Database(format!("{id}: backfill failed: {e}")))?;
                }
                tx.execute(
                    "INSERT INTO _migrations (version, name) VALUES (?1, ?2)",
                    params![id.version as i64, id.name],
                )
                .map_err(|e| Error::Database(format!("{id}: failed to record in ledger: {e}")))?;
            }
            Direction::Down => {
                tx.execute(
                    "DELETE FROM _migrations WHERE version = ?1",
                    params![id.version as i64],
                )
                .map_err(|e| Error::Database(format!("{id}: failed to remove from ledger: {e}")))?;
            }
        }

        tx.commit()
            .map_err(|e| Error::Database(format!("{id}: failed to commit: {e}")))?;

        let report = ApplyReport {
            version: id.version,
            name: id.name.to_string(),
            direction,
            outcomes,
        };
        info!(
            "{} {id}: {} ops applied, {} skipped",
            direction.label(),
            report.applied(),
            report.skipped()
        );
        Ok(report)
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(dt) => Some(dt.and_utc()),
        Err(e) => {
            warn!("unreadable ledger timestamp {raw:?}: {e}");
            None
        }
    }
}
