use escolar_schema::{
    ColumnDef, ColumnType, Migration, MigrationId, SchemaOp, TableDef, invert_all,
};

use super::{pk, stamp};

/// Users with authentication fields. Every aluno and professor hangs off a
/// row in this table.
pub struct CreateUsuarios;

fn usuarios() -> TableDef {
    TableDef::new("usuarios")
        .column(pk())
        .column(ColumnDef::new("nome", ColumnType::Text).not_null())
        .column(ColumnDef::new("email", ColumnType::Text).not_null().unique())
        .column(ColumnDef::new("senha", ColumnType::Text).not_null())
        .column(ColumnDef::new("cpf", ColumnType::Text).not_null().unique())
        .column(ColumnDef::new("telefone", ColumnType::Text))
        .column(
            ColumnDef::new("papel", ColumnType::Text)
                .not_null()
                .default_expr("'aluno'"),
        )
        .column(stamp("criado_em"))
        .column(stamp("atualizado_em"))
}

impl Migration for CreateUsuarios {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240102093000, "create_usuarios")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![SchemaOp::CreateTable(usuarios())]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
