use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::pk;

pub struct CreateHabilidades;

fn habilidades() -> TableDef {
    TableDef::new("habilidades")
        .column(pk())
        .column(ColumnDef::new("disciplina_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("codigo", ColumnType::Text).not_null())
        .column(ColumnDef::new("descricao", ColumnType::Text).not_null())
        .foreign_key(
            ForeignKeyDef::new("disciplina_id", "disciplinas", "id").on_delete(FkAction::Cascade),
        )
}

impl Migration for CreateHabilidades {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240126133000, "create_habilidades")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(habilidades()),
            SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_Habilidade_Disciplina_Codigo",
                "habilidades",
                &["disciplina_id", "codigo"],
            )),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
