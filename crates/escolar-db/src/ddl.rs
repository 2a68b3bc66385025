//! Renders schema ops to SQLite DDL. Identifiers come from the catalog and
//! are never user-supplied, so plain interpolation with quoting is enough.

use escolar_schema::{ColumnDef, ColumnType, FkAction, IndexDef, SchemaOp, TableDef};

fn sql_type(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Integer => "INTEGER",
        ColumnType::Real => "REAL",
        ColumnType::Text => "TEXT",
        ColumnType::Blob => "BLOB",
        // SQLite has no native boolean or date types; affinity does the rest.
        ColumnType::Boolean => "INTEGER",
        ColumnType::Date => "TEXT",
        ColumnType::DateTime => "TEXT",
    }
}

fn fk_action(action: FkAction) -> &'static str {
    match action {
        FkAction::NoAction => "NO ACTION",
        FkAction::Cascade => "CASCADE",
        FkAction::SetNull => "SET NULL",
        FkAction::Restrict => "RESTRICT",
    }
}

fn column_sql(column: &ColumnDef) -> String {
    let mut sql = format!("\"{}\" {}", column.name, sql_type(column.ty));
    if column.primary_key {
        sql.push_str(" PRIMARY KEY");
    }
    if !column.nullable && !column.primary_key {
        sql.push_str(" NOT NULL");
    }
    if column.unique {
        sql.push_str(" UNIQUE");
    }
    if let Some(default) = &column.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(default);
    }
    sql
}

fn create_table_sql(def: &TableDef) -> String {
    let mut parts: Vec<String> = def.columns.iter().map(column_sql).collect();
    for fk in &def.foreign_keys {
        parts.push(format!(
            "FOREIGN KEY (\"{}\") REFERENCES \"{}\" (\"{}\") ON DELETE {}",
            fk.column,
            fk.ref_table,
            fk.ref_column,
            fk_action(fk.on_delete)
        ));
    }
    format!(
        "CREATE TABLE \"{}\" (\n    {}\n)",
        def.name,
        parts.join(",\n    ")
    )
}

fn create_index_sql(def: &IndexDef) -> String {
    let columns: Vec<String> = def.columns.iter().map(|c| format!("\"{c}\"")).collect();
    format!(
        "CREATE {}INDEX \"{}\" ON \"{}\" ({})",
        if def.unique { "UNIQUE " } else { "" },
        def.name,
        def.table,
        columns.join(", ")
    )
}

pub fn render_op(op: &SchemaOp) -> String {
    match op {
        SchemaOp::CreateTable(def) => create_table_sql(def),
        SchemaOp::DropTable(def) => format!("DROP TABLE \"{}\"", def.name),
        SchemaOp::AddColumn { table, column } => {
            format!("ALTER TABLE \"{table}\" ADD COLUMN {}", column_sql(column))
        }
        SchemaOp::DropColumn { table, column } => {
            format!("ALTER TABLE \"{table}\" DROP COLUMN \"{}\"", column.name)
        }
        SchemaOp::RenameColumn { table, from, to } => {
            format!("ALTER TABLE \"{table}\" RENAME COLUMN \"{from}\" TO \"{to}\"")
        }
        SchemaOp::RenameTable { from, to } => {
            format!("ALTER TABLE \"{from}\" RENAME TO \"{to}\"")
        }
        SchemaOp::CreateIndex(def) => create_index_sql(def),
        SchemaOp::DropIndex(def) => format!("DROP INDEX \"{}\"", def.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escolar_schema::ForeignKeyDef;

    #[test]
    fn renders_create_table_with_foreign_key() {
        let def = TableDef::new("alunos")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::new("usuario_id", ColumnType::Integer).not_null())
            .foreign_key(
                ForeignKeyDef::new("usuario_id", "usuarios", "id").on_delete(FkAction::Cascade),
            );
        let sql = render_op(&SchemaOp::CreateTable(def));
        assert!(sql.starts_with("CREATE TABLE \"alunos\""));
        assert!(sql.contains("\"usuario_id\" INTEGER NOT NULL"));
        assert!(
            sql.contains("FOREIGN KEY (\"usuario_id\") REFERENCES \"usuarios\" (\"id\") ON DELETE CASCADE")
        );
    }

    #[test]
    fn renders_default_expressions_verbatim() {
        let column = ColumnDef::new("criado_em", ColumnType::DateTime)
            .not_null()
            .default_expr("(datetime('now'))");
        let sql = render_op(&SchemaOp::AddColumn {
            table: "usuarios".into(),
            column,
        });
        assert_eq!(
            sql,
            "ALTER TABLE \"usuarios\" ADD COLUMN \"criado_em\" TEXT NOT NULL DEFAULT (datetime('now'))"
        );
    }

    #[test]
    fn renders_unique_index_with_declared_name() {
        let sql = render_op(&SchemaOp::CreateIndex(IndexDef::unique(
            "UQ_Aluno_Usuario",
            "alunos",
            &["usuario_id"],
        )));
        assert_eq!(
            sql,
            "CREATE UNIQUE INDEX \"UQ_Aluno_Usuario\" ON \"alunos\" (\"usuario_id\")"
        );
    }
}
