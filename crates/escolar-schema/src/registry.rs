use escolar_common::{Error, Result};
use tracing::debug;

use crate::migration::Migration;
use crate::ops::invert_all;
use crate::snapshot::SchemaSnapshot;

/// Ordered catalog of migration units. Registration is where ill-formed
/// sequences die: version collisions and out-of-order registrations are
/// rejected, a unit's backward diff must exactly invert its forward diff,
/// and the forward ops must apply cleanly to the simulated snapshot of
/// everything registered before it.
#[derive(Default)]
pub struct MigrationRegistry {
    units: Vec<Box<dyn Migration>>,
    snapshot: SchemaSnapshot,
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, unit: Box<dyn Migration>) -> Result<()> {
        let id = unit.id();
        if let Some(last) = self.units.last() {
            let prev = last.id();
            if id.version == prev.version {
                return Err(Error::Registry(format!(
                    "version collision: {id} reuses version {} of {prev}",
                    prev.version
                )));
            }
            if id.version < prev.version {
                return Err(Error::Registry(format!(
                    "{id} registered after {prev} but has a lower version"
                )));
            }
        }

        let forward = unit.forward();
        if forward.is_empty() {
            return Err(Error::Registry(format!("{id} declares no forward ops")));
        }
        if unit.backward() != invert_all(&forward) {
            return Err(Error::Registry(format!(
                "{id}: backward diff does not invert the forward diff"
            )));
        }

        let mut next = self.snapshot.clone();
        for op in &forward {
            next.apply(op)
                .map_err(|e| Error::Registry(format!("{id}: {e}")))?;
        }

        debug!("registered migration {id}");
        self.snapshot = next;
        self.units.push(unit);
        Ok(())
    }

    pub fn units(&self) -> &[Box<dyn Migration>] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn find(&self, version: u64) -> Option<&dyn Migration> {
        self.units
            .iter()
            .find(|u| u.id().version == version)
            .map(|u| u.as_ref())
    }

    /// Snapshot after every registered unit, i.e. the schema a fresh
    /// database ends up with after `up` runs to completion.
    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }
}
