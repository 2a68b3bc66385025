use escolar_common::Result;

use crate::ops::SchemaOp;

/// Read-only view of a live database schema, injected into the runner so
/// guard logic stays testable against a fake. Implementations exist for
/// SQLite (in the db crate) and for in-memory fakes in tests.
pub trait SchemaInspector {
    fn table_exists(&self, table: &str) -> Result<bool>;

    /// Column names of `table`, empty if the table does not exist.
    fn columns(&self, table: &str) -> Result<Vec<String>>;

    /// Index names are a single global namespace in SQLite, so lookup is
    /// not scoped by table.
    fn index_exists(&self, name: &str) -> Result<bool>;
}

/// Idempotency guard: true when the live schema already contains the
/// op's effect, in which case the runner records a skip instead of
/// executing DDL that would fail or double-apply.
pub fn op_satisfied(inspector: &dyn SchemaInspector, op: &SchemaOp) -> Result<bool> {
    match op {
        SchemaOp::CreateTable(def) => inspector.table_exists(&def.name),
        SchemaOp::DropTable(def) => Ok(!inspector.table_exists(&def.name)?),
        SchemaOp::AddColumn { table, column } => {
            Ok(inspector.columns(table)?.iter().any(|c| c == &column.name))
        }
        SchemaOp::DropColumn { table, column } => {
            if !inspector.table_exists(table)? {
                return Ok(false);
            }
            Ok(!inspector.columns(table)?.iter().any(|c| c == &column.name))
        }
        SchemaOp::RenameColumn { table, from, to } => {
            let columns = inspector.columns(table)?;
            Ok(columns.iter().any(|c| c == to) && !columns.iter().any(|c| c == from))
        }
        SchemaOp::RenameTable { from, to } => {
            Ok(inspector.table_exists(to)? && !inspector.table_exists(from)?)
        }
        SchemaOp::CreateIndex(def) => inspector.index_exists(&def.name),
        SchemaOp::DropIndex(def) => Ok(!inspector.index_exists(&def.name)?),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::ops::{ColumnDef, ColumnType, IndexDef, TableDef};

    #[derive(Default)]
    struct FakeSchema {
        tables: BTreeMap<String, Vec<String>>,
        indexes: BTreeSet<String>,
    }

    impl FakeSchema {
        fn with_table(mut self, name: &str, columns: &[&str]) -> Self {
            self.tables.insert(
                name.to_string(),
                columns.iter().map(|c| c.to_string()).collect(),
            );
            self
        }

        fn with_index(mut self, name: &str) -> Self {
            self.indexes.insert(name.to_string());
            self
        }
    }

    impl SchemaInspector for FakeSchema {
        fn table_exists(&self, table: &str) -> Result<bool> {
            Ok(self.tables.contains_key(table))
        }

        fn columns(&self, table: &str) -> Result<Vec<String>> {
            Ok(self.tables.get(table).cloned().unwrap_or_default())
        }

        fn index_exists(&self, name: &str) -> Result<bool> {
            Ok(self.indexes.contains(name))
        }
    }

    fn usuarios_def() -> TableDef {
        TableDef::new("usuarios").column(ColumnDef::primary_key("id"))
    }

    #[test]
    fn create_table_satisfied_when_present() {
        let fake = FakeSchema::default().with_table("usuarios", &["id"]);
        let op = SchemaOp::CreateTable(usuarios_def());
        assert!(op_satisfied(&fake, &op).unwrap());
        assert!(!op_satisfied(&FakeSchema::default(), &op).unwrap());
    }

    #[test]
    fn add_column_satisfied_when_column_present() {
        let fake = FakeSchema::default().with_table("usuarios", &["id", "bloqueado_ate"]);
        let op = SchemaOp::AddColumn {
            table: "usuarios".into(),
            column: ColumnDef::new("bloqueado_ate", ColumnType::DateTime),
        };
        assert!(op_satisfied(&fake, &op).unwrap());

        let bare = FakeSchema::default().with_table("usuarios", &["id"]);
        assert!(!op_satisfied(&bare, &op).unwrap());
    }

    #[test]
    fn rename_column_satisfied_only_after_rename() {
        let op = SchemaOp::RenameColumn {
            table: "alunos".into(),
            from: "nascimento".into(),
            to: "data_nascimento".into(),
        };
        let before = FakeSchema::default().with_table("alunos", &["id", "nascimento"]);
        let after = FakeSchema::default().with_table("alunos", &["id", "data_nascimento"]);
        assert!(!op_satisfied(&before, &op).unwrap());
        assert!(op_satisfied(&after, &op).unwrap());
    }

    #[test]
    fn index_ops_consult_the_global_namespace() {
        let fake = FakeSchema::default()
            .with_table("alunos", &["id", "usuario_id"])
            .with_index("UQ_Aluno_Usuario");
        let create = SchemaOp::CreateIndex(IndexDef::unique(
            "UQ_Aluno_Usuario",
            "alunos",
            &["usuario_id"],
        ));
        assert!(op_satisfied(&fake, &create).unwrap());
        assert!(!op_satisfied(&fake, &create.inverted()).unwrap());
    }
}
