use serde::{Deserialize, Serialize};

/// Storage class of a column. Rendering to dialect-specific SQL happens in
/// the database crate; this model only carries intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
    Boolean,
    Date,
    DateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    /// Raw default expression, e.g. `0`, `'pendente'` or `(datetime('now'))`.
    pub default: Option<String>,
}

impl ColumnDef {
    pub fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            nullable: true,
            primary_key: false,
            unique: false,
            default: None,
        }
    }

    /// Integer rowid-backed primary key.
    pub fn primary_key(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ColumnType::Integer,
            nullable: false,
            primary_key: true,
            unique: false,
            default: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default_expr(mut self, expr: &str) -> Self {
        self.default = Some(expr.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FkAction {
    NoAction,
    Cascade,
    SetNull,
    Restrict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDef {
    pub column: String,
    pub ref_table: String,
    pub ref_column: String,
    pub on_delete: FkAction,
}

impl ForeignKeyDef {
    pub fn new(column: &str, ref_table: &str, ref_column: &str) -> Self {
        Self {
            column: column.to_string(),
            ref_table: ref_table.to_string(),
            ref_column: ref_column.to_string(),
            on_delete: FkAction::NoAction,
        }
    }

    pub fn on_delete(mut self, action: FkAction) -> Self {
        self.on_delete = action;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub foreign_keys: Vec<ForeignKeyDef>,
}

impl TableDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn foreign_key(mut self, fk: ForeignKeyDef) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column_def(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A named index. Unique constraints are expressed as unique indexes so
/// their `UQ_*` names survive introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl IndexDef {
    pub fn unique(name: &str, table: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            table: table.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique: true,
        }
    }

    pub fn plain(name: &str, table: &str, columns: &[&str]) -> Self {
        Self {
            unique: false,
            ..Self::unique(name, table, columns)
        }
    }
}

/// One schema transformation. Destructive variants carry the full definition
/// of what they remove so every op can be inverted mechanically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaOp {
    CreateTable(TableDef),
    DropTable(TableDef),
    AddColumn { table: String, column: ColumnDef },
    DropColumn { table: String, column: ColumnDef },
    RenameColumn { table: String, from: String, to: String },
    RenameTable { from: String, to: String },
    CreateIndex(IndexDef),
    DropIndex(IndexDef),
}

impl SchemaOp {
    pub fn inverted(&self) -> SchemaOp {
        match self {
            SchemaOp::CreateTable(def) => SchemaOp::DropTable(def.clone()),
            SchemaOp::DropTable(def) => SchemaOp::CreateTable(def.clone()),
            SchemaOp::AddColumn { table, column } => SchemaOp::DropColumn {
                table: table.clone(),
                column: column.clone(),
            },
            SchemaOp::DropColumn { table, column } => SchemaOp::AddColumn {
                table: table.clone(),
                column: column.clone(),
            },
            SchemaOp::RenameColumn { table, from, to } => SchemaOp::RenameColumn {
                table: table.clone(),
                from: to.clone(),
                to: from.clone(),
            },
            SchemaOp::RenameTable { from, to } => SchemaOp::RenameTable {
                from: to.clone(),
                to: from.clone(),
            },
            SchemaOp::CreateIndex(def) => SchemaOp::DropIndex(def.clone()),
            SchemaOp::DropIndex(def) => SchemaOp::CreateIndex(def.clone()),
        }
    }

    /// Short human-readable label used in logs and skip reasons.
    pub fn describe(&self) -> String {
        match self {
            SchemaOp::CreateTable(def) => format!("create table {}", def.name),
            SchemaOp::DropTable(def) => format!("drop table {}", def.name),
            SchemaOp::AddColumn { table, column } => {
                format!("add column {}.{}", table, column.name)
            }
            SchemaOp::DropColumn { table, column } => {
                format!("drop column {}.{}", table, column.name)
            }
            SchemaOp::RenameColumn { table, from, to } => {
                format!("rename column {table}.{from} to {to}")
            }
            SchemaOp::RenameTable { from, to } => format!("rename table {from} to {to}"),
            SchemaOp::CreateIndex(def) => format!("create index {}", def.name),
            SchemaOp::DropIndex(def) => format!("drop index {}", def.name),
        }
    }
}

/// The exact reverse of a forward op list: inverted ops in reverse order.
pub fn invert_all(ops: &[SchemaOp]) -> Vec<SchemaOp> {
    ops.iter().rev().map(SchemaOp::inverted).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> TableDef {
        TableDef::new("turmas")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::new("nome", ColumnType::Text).not_null())
    }

    #[test]
    fn inversion_is_an_involution() {
        let ops = vec![
            SchemaOp::CreateTable(sample_table()),
            SchemaOp::AddColumn {
                table: "turmas".into(),
                column: ColumnDef::new("turno", ColumnType::Text),
            },
            SchemaOp::RenameColumn {
                table: "turmas".into(),
                from: "nome".into(),
                to: "titulo".into(),
            },
            SchemaOp::CreateIndex(IndexDef::unique("UQ_Turma_Nome", "turmas", &["nome"])),
        ];
        for op in &ops {
            assert_eq!(&op.inverted().inverted(), op);
        }
    }

    #[test]
    fn invert_all_reverses_order() {
        let ops = vec![
            SchemaOp::CreateTable(sample_table()),
            SchemaOp::CreateIndex(IndexDef::unique("UQ_Turma_Nome", "turmas", &["nome"])),
        ];
        let back = invert_all(&ops);
        assert_eq!(back.len(), 2);
        assert!(matches!(back[0], SchemaOp::DropIndex(_)));
        assert!(matches!(back[1], SchemaOp::DropTable(_)));
    }

    #[test]
    fn describe_names_the_object() {
        let op = SchemaOp::AddColumn {
            table: "usuarios".into(),
            column: ColumnDef::new("bloqueado_ate", ColumnType::DateTime),
        };
        assert_eq!(op.describe(), "add column usuarios.bloqueado_ate");
    }
}
