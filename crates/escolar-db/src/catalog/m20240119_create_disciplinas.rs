use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::pk;

/// Subjects plus the class/subject join table. Deleting a turma or a
/// disciplina cascades through the join.
pub struct CreateDisciplinas;

fn disciplinas() -> TableDef {
    TableDef::new("disciplinas")
        .column(pk())
        .column(ColumnDef::new("nome", ColumnType::Text).not_null())
        .column(
            ColumnDef::new("codigo", ColumnType::Text)
                .not_null()
                .unique(),
        )
        .column(
            ColumnDef::new("carga_horaria", ColumnType::Integer)
                .not_null()
                .default_expr("40"),
        )
        .column(ColumnDef::new("professor_id", ColumnType::Integer))
        .foreign_key(
            ForeignKeyDef::new("professor_id", "professores", "id").on_delete(FkAction::SetNull),
        )
}

fn turma_disciplinas() -> TableDef {
    TableDef::new("turma_disciplinas")
        .column(pk())
        .column(ColumnDef::new("turma_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("disciplina_id", ColumnType::Integer).not_null())
        .foreign_key(ForeignKeyDef::new("turma_id", "turmas", "id").on_delete(FkAction::Cascade))
        .foreign_key(
            ForeignKeyDef::new("disciplina_id", "disciplinas", "id").on_delete(FkAction::Cascade),
        )
}

impl Migration for CreateDisciplinas {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240119090000, "create_disciplinas")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(disciplinas()),
            SchemaOp::CreateTable(turma_disciplinas()),
            SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_TurmaDisciplina_Turma_Disciplina",
                "turma_disciplinas",
                &["turma_id", "disciplina_id"],
            )),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
