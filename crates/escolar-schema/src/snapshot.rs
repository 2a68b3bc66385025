use std::collections::BTreeMap;

use escolar_common::{Error, Result};
use serde::Serialize;

use crate::ops::{IndexDef, SchemaOp, TableDef};

/// The cumulative table/column/constraint set implied by a migration
/// sequence, simulated without a database. The registry applies every
/// forward op to a snapshot so that an invalid sequence (duplicate table,
/// dangling foreign key, column dropped while still indexed) never reaches
/// a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    tables: BTreeMap<String, TableDef>,
    indexes: BTreeMap<String, IndexDef>,
}

impl SchemaSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.tables.values()
    }

    pub fn index(&self, name: &str) -> Option<&IndexDef> {
        self.indexes.get(name)
    }

    pub fn indexes(&self) -> impl Iterator<Item = &IndexDef> {
        self.indexes.values()
    }

    pub fn apply(&mut self, op: &SchemaOp) -> Result<()> {
        match op {
            SchemaOp::CreateTable(def) => self.create_table(def),
            SchemaOp::DropTable(def) => self.drop_table(def),
            SchemaOp::AddColumn { table, column } => {
                let def = self.table_mut(table)?;
                if def.has_column(&column.name) {
                    return Err(Error::Schema(format!(
                        "column {table}.{} already exists",
                        column.name
                    )));
                }
                if !column.nullable && column.default.is_none() {
                    return Err(Error::Schema(format!(
                        "added column {table}.{} is NOT NULL but declares no default",
                        column.name
                    )));
                }
                def.columns.push(column.clone());
                Ok(())
            }
            SchemaOp::DropColumn { table, column } => self.drop_column(table, column),
            SchemaOp::RenameColumn { table, from, to } => self.rename_column(table, from, to),
            SchemaOp::RenameTable { from, to } => self.rename_table(from, to),
            SchemaOp::CreateIndex(def) => self.create_index(def),
            SchemaOp::DropIndex(def) => {
                match self.indexes.get(&def.name) {
                    None => {
                        return Err(Error::Schema(format!("no such index: {}", def.name)));
                    }
                    Some(current) if current != def => {
                        return Err(Error::Schema(format!(
                            "declared definition of index {} does not match the schema",
                            def.name
                        )));
                    }
                    Some(_) => {}
                }
                self.indexes.remove(&def.name);
                Ok(())
            }
        }
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut TableDef> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::Schema(format!("no such table: {name}")))
    }

    fn create_table(&mut self, def: &TableDef) -> Result<()> {
        if self.tables.contains_key(&def.name) {
            return Err(Error::Schema(format!("table {} already exists", def.name)));
        }
        let mut seen = std::collections::BTreeSet::new();
        for column in &def.columns {
            if !seen.insert(&column.name) {
                return Err(Error::Schema(format!(
                    "table {} declares column {} twice",
                    def.name, column.name
                )));
            }
        }
        for fk in &def.foreign_keys {
            if !def.has_column(&fk.column) {
                return Err(Error::Schema(format!(
                    "foreign key on {}.{} references a column the table does not declare",
                    def.name, fk.column
                )));
            }
            // Self-referencing tables resolve against their own definition.
            let target = if fk.ref_table == def.name {
                def
            } else {
                self.tables.get(&fk.ref_table).ok_or_else(|| {
                    Error::Schema(format!(
                        "foreign key {}.{} targets missing table {}",
                        def.name, fk.column, fk.ref_table
                    ))
                })?
            };
            if !target.has_column(&fk.ref_column) {
                return Err(Error::Schema(format!(
                    "foreign key {}.{} targets missing column {}.{}",
                    def.name, fk.column, fk.ref_table, fk.ref_column
                )));
            }
        }
        self.tables.insert(def.name.clone(), def.clone());
        Ok(())
    }

    fn drop_table(&mut self, def: &TableDef) -> Result<()> {
        match self.tables.get(&def.name) {
            None => return Err(Error::Schema(format!("no such table: {}", def.name))),
            Some(current) if current != def => {
                return Err(Error::Schema(format!(
                    "declared definition of table {} does not match the schema",
                    def.name
                )));
            }
            Some(_) => {}
        }
        for other in self.tables.values() {
            if other.name == def.name {
                continue;
            }
            if other.foreign_keys.iter().any(|fk| fk.ref_table == def.name) {
                return Err(Error::Schema(format!(
                    "cannot drop table {}: still referenced by {}",
                    def.name, other.name
                )));
            }
        }
        if let Some(index) = self.indexes.values().find(|i| i.table == def.name) {
            return Err(Error::Schema(format!(
                "cannot drop table {}: index {} still exists",
                def.name, index.name
            )));
        }
        self.tables.remove(&def.name);
        Ok(())
    }

    fn drop_column(&mut self, table: &str, column: &crate::ops::ColumnDef) -> Result<()> {
        let def = self
            .tables
            .get(table)
            .ok_or_else(|| Error::Schema(format!("no such table: {table}")))?;
        match def.column_def(&column.name) {
            None => {
                return Err(Error::Schema(format!(
                    "no such column: {table}.{}",
                    column.name
                )));
            }
            Some(current) if current != column => {
                return Err(Error::Schema(format!(
                    "declared definition of column {table}.{} does not match the schema",
                    column.name
                )));
            }
            Some(_) => {}
        }
        if def.foreign_keys.iter().any(|fk| fk.column == column.name) {
            return Err(Error::Schema(format!(
                "cannot drop column {table}.{}: a foreign key uses it",
                column.name
            )));
        }
        if let Some(index) = self
            .indexes
            .values()
            .find(|i| i.table == table && i.columns.iter().any(|c| c == &column.name))
        {
            return Err(Error::Schema(format!(
                "cannot drop column {table}.{}: index {} uses it",
                column.name, index.name
            )));
        }
        for other in self.tables.values() {
            if other
                .foreign_keys
                .iter()
                .any(|fk| fk.ref_table == table && fk.ref_column == column.name)
            {
                return Err(Error::Schema(format!(
                    "cannot drop column {table}.{}: referenced by {}",
                    column.name, other.name
                )));
            }
        }
        self.table_mut(table)?
            .columns
            .retain(|c| c.name != column.name);
        Ok(())
    }

    fn rename_column(&mut self, table: &str, from: &str, to: &str) -> Result<()> {
        let def = self.table_mut(table)?;
        if !def.has_column(from) {
            return Err(Error::Schema(format!("no such column: {table}.{from}")));
        }
        if def.has_column(to) {
            return Err(Error::Schema(format!("column {table}.{to} already exists")));
        }
        for column in &mut def.columns {
            if column.name == from {
                column.name = to.to_string();
            }
        }
        for fk in &mut def.foreign_keys {
            if fk.column == from {
                fk.column = to.to_string();
            }
        }
        // SQLite rewrites referencing objects on rename; mirror that here.
        for other in self.tables.values_mut() {
            for fk in &mut other.foreign_keys {
                if fk.ref_table == table && fk.ref_column == from {
                    fk.ref_column = to.to_string();
                }
            }
        }
        for index in self.indexes.values_mut() {
            if index.table == table {
                for column in &mut index.columns {
                    if column == from {
                        *column = to.to_string();
                    }
                }
            }
        }
        Ok(())
    }

    fn rename_table(&mut self, from: &str, to: &str) -> Result<()> {
        if self.tables.contains_key(to) {
            return Err(Error::Schema(format!("table {to} already exists")));
        }
        let mut def = self
            .tables
            .remove(from)
            .ok_or_else(|| Error::Schema(format!("no such table: {from}")))?;
        def.name = to.to_string();
        self.tables.insert(to.to_string(), def);
        for other in self.tables.values_mut() {
            for fk in &mut other.foreign_keys {
                if fk.ref_table == from {
                    fk.ref_table = to.to_string();
                }
            }
        }
        for index in self.indexes.values_mut() {
            if index.table == from {
                index.table = to.to_string();
            }
        }
        Ok(())
    }

    fn create_index(&mut self, def: &IndexDef) -> Result<()> {
        if self.indexes.contains_key(&def.name) {
            return Err(Error::Schema(format!("index {} already exists", def.name)));
        }
        let table = self
            .tables
            .get(&def.table)
            .ok_or_else(|| Error::Schema(format!("no such table: {}", def.table)))?;
        for column in &def.columns {
            if !table.has_column(column) {
                return Err(Error::Schema(format!(
                    "index {} uses missing column {}.{column}",
                    def.name, def.table
                )));
            }
        }
        self.indexes.insert(def.name.clone(), def.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{ColumnDef, ColumnType, FkAction, ForeignKeyDef};

    fn usuarios() -> TableDef {
        TableDef::new("usuarios")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::new("nome", ColumnType::Text).not_null())
    }

    fn alunos() -> TableDef {
        TableDef::new("alunos")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::new("usuario_id", ColumnType::Integer).not_null())
            .foreign_key(
                ForeignKeyDef::new("usuario_id", "usuarios", "id").on_delete(FkAction::Cascade),
            )
    }

    #[test]
    fn rejects_duplicate_table() {
        let mut snapshot = SchemaSnapshot::empty();
        snapshot.apply(&SchemaOp::CreateTable(usuarios())).unwrap();
        let err = snapshot
            .apply(&SchemaOp::CreateTable(usuarios()))
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn rejects_dangling_foreign_key() {
        let mut snapshot = SchemaSnapshot::empty();
        let err = snapshot.apply(&SchemaOp::CreateTable(alunos())).unwrap_err();
        assert!(err.to_string().contains("missing table usuarios"));
    }

    #[test]
    fn accepts_foreign_key_once_target_exists() {
        let mut snapshot = SchemaSnapshot::empty();
        snapshot.apply(&SchemaOp::CreateTable(usuarios())).unwrap();
        snapshot.apply(&SchemaOp::CreateTable(alunos())).unwrap();
        assert!(snapshot.table("alunos").is_some());
    }

    #[test]
    fn rejects_drop_of_referenced_table() {
        let mut snapshot = SchemaSnapshot::empty();
        snapshot.apply(&SchemaOp::CreateTable(usuarios())).unwrap();
        snapshot.apply(&SchemaOp::CreateTable(alunos())).unwrap();
        let err = snapshot
            .apply(&SchemaOp::DropTable(usuarios()))
            .unwrap_err();
        assert!(err.to_string().contains("still referenced by alunos"));
    }

    #[test]
    fn rejects_not_null_add_without_default() {
        let mut snapshot = SchemaSnapshot::empty();
        snapshot.apply(&SchemaOp::CreateTable(usuarios())).unwrap();
        let err = snapshot
            .apply(&SchemaOp::AddColumn {
                table: "usuarios".into(),
                column: ColumnDef::new("papel", ColumnType::Text).not_null(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("declares no default"));
    }

    #[test]
    fn rejects_mismatched_drop_table_definition() {
        let mut snapshot = SchemaSnapshot::empty();
        snapshot.apply(&SchemaOp::CreateTable(usuarios())).unwrap();
        let stale = TableDef::new("usuarios").column(ColumnDef::primary_key("id"));
        let err = snapshot.apply(&SchemaOp::DropTable(stale)).unwrap_err();
        assert!(err.to_string().contains("does not match the schema"));
    }

    #[test]
    fn rename_column_updates_referencing_foreign_keys() {
        let mut snapshot = SchemaSnapshot::empty();
        snapshot.apply(&SchemaOp::CreateTable(usuarios())).unwrap();
        snapshot.apply(&SchemaOp::CreateTable(alunos())).unwrap();
        snapshot
            .apply(&SchemaOp::RenameColumn {
                table: "usuarios".into(),
                from: "id".into(),
                to: "usuario_pk".into(),
            })
            .unwrap();
        let fk = &snapshot.table("alunos").unwrap().foreign_keys[0];
        assert_eq!(fk.ref_column, "usuario_pk");
    }

    #[test]
    fn rejects_index_on_missing_column() {
        let mut snapshot = SchemaSnapshot::empty();
        snapshot.apply(&SchemaOp::CreateTable(usuarios())).unwrap();
        let err = snapshot
            .apply(&SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_Usuario_Email",
                "usuarios",
                &["email"],
            )))
            .unwrap_err();
        assert!(err.to_string().contains("missing column"));
    }
}
