use escolar_schema::{ColumnDef, ColumnType, Migration, MigrationId, SchemaOp, invert_all};

/// Login-throttling and password-recovery columns, added after the fact.
/// The backfill normalizes rows that predate the default.
pub struct AddUsuariosSeguranca;

fn added_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("tentativas_login", ColumnType::Integer)
            .not_null()
            .default_expr("0"),
        ColumnDef::new("bloqueado_ate", ColumnType::DateTime),
        ColumnDef::new("token_recuperacao", ColumnType::Text),
        ColumnDef::new("token_expira_em", ColumnType::DateTime),
    ]
}

impl Migration for AddUsuariosSeguranca {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240422101500, "add_usuarios_seguranca")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        added_columns()
            .into_iter()
            .map(|column| SchemaOp::AddColumn {
                table: "usuarios".into(),
                column,
            })
            .collect()
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }

    fn backfill(&self) -> Option<&'static str> {
        Some("UPDATE usuarios SET tentativas_login = 0 WHERE tentativas_login IS NULL;")
    }
}
