use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, Migration, MigrationId, SchemaOp, TableDef,
    invert_all,
};

use super::{pk, stamp};

pub struct CreateMateriais;

fn materiais() -> TableDef {
    TableDef::new("materiais")
        .column(pk())
        .column(ColumnDef::new("titulo", ColumnType::Text).not_null())
        .column(ColumnDef::new("caminho", ColumnType::Text).not_null())
        .column(ColumnDef::new("disciplina_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("professor_id", ColumnType::Integer))
        .column(stamp("publicado_em"))
        .foreign_key(
            ForeignKeyDef::new("disciplina_id", "disciplinas", "id").on_delete(FkAction::Cascade),
        )
        .foreign_key(
            ForeignKeyDef::new("professor_id", "professores", "id").on_delete(FkAction::SetNull),
        )
}

impl Migration for CreateMateriais {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240318170000, "create_materiais")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![SchemaOp::CreateTable(materiais())]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
