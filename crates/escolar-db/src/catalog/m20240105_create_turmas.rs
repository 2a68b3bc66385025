use escolar_schema::{
    ColumnDef, ColumnType, Migration, MigrationId, SchemaOp, TableDef, invert_all,
};

use super::{pk, stamp};

pub struct CreateTurmas;

fn turmas() -> TableDef {
    TableDef::new("turmas")
        .column(pk())
        .column(ColumnDef::new("nome", ColumnType::Text).not_null())
        .column(ColumnDef::new("ano_letivo", ColumnType::Integer).not_null())
        .column(
            ColumnDef::new("turno", ColumnType::Text)
                .not_null()
                .default_expr("'manha'"),
        )
        .column(stamp("criado_em"))
}

impl Migration for CreateTurmas {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240105110000, "create_turmas")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![SchemaOp::CreateTable(turmas())]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
