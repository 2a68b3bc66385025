use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::{pk, stamp};

/// Students, 1:1 with usuarios (`UQ_Aluno_Usuario`). The birth-date column
/// ships as `nascimento` here and is renamed by a later corrective unit.
pub struct CreateAlunos;

fn alunos() -> TableDef {
    TableDef::new("alunos")
        .column(pk())
        .column(ColumnDef::new("usuario_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("turma_id", ColumnType::Integer))
        .column(
            ColumnDef::new("matricula", ColumnType::Text)
                .not_null()
                .unique(),
        )
        .column(ColumnDef::new("nascimento", ColumnType::Date))
        .column(ColumnDef::new("responsavel", ColumnType::Text))
        .column(stamp("criado_em"))
        .foreign_key(ForeignKeyDef::new("usuario_id", "usuarios", "id").on_delete(FkAction::Cascade))
        .foreign_key(ForeignKeyDef::new("turma_id", "turmas", "id").on_delete(FkAction::SetNull))
}

impl Migration for CreateAlunos {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240108154500, "create_alunos")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(alunos()),
            SchemaOp::CreateIndex(IndexDef::unique("UQ_Aluno_Usuario", "alunos", &["usuario_id"])),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
