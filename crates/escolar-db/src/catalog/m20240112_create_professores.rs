use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::{pk, stamp};

pub struct CreateProfessores;

fn professores() -> TableDef {
    TableDef::new("professores")
        .column(pk())
        .column(ColumnDef::new("usuario_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("formacao", ColumnType::Text))
        .column(stamp("criado_em"))
        .foreign_key(ForeignKeyDef::new("usuario_id", "usuarios", "id").on_delete(FkAction::Cascade))
}

impl Migration for CreateProfessores {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240112102000, "create_professores")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(professores()),
            SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_Professor_Usuario",
                "professores",
                &["usuario_id"],
            )),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
