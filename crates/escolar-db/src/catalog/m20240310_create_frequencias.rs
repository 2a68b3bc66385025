use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::pk;

/// Attendance. One record per student/subject/class/day.
pub struct CreateFrequencias;

fn frequencias() -> TableDef {
    TableDef::new("frequencias")
        .column(pk())
        .column(ColumnDef::new("aluno_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("disciplina_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("turma_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("data", ColumnType::Date).not_null())
        .column(
            ColumnDef::new("presente", ColumnType::Boolean)
                .not_null()
                .default_expr("1"),
        )
        .foreign_key(ForeignKeyDef::new("aluno_id", "alunos", "id").on_delete(FkAction::Cascade))
        .foreign_key(
            ForeignKeyDef::new("disciplina_id", "disciplinas", "id").on_delete(FkAction::Cascade),
        )
        .foreign_key(ForeignKeyDef::new("turma_id", "turmas", "id").on_delete(FkAction::Cascade))
}

impl Migration for CreateFrequencias {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240310083000, "create_frequencias")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(frequencias()),
            SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_Frequencia_Aluno_Disciplina_Turma_Data",
                "frequencias",
                &["aluno_id", "disciplina_id", "turma_id", "data"],
            )),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
