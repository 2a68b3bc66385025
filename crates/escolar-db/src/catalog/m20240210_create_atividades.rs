use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::{pk, stamp};

/// Assignments with their questions and choices, plus the
/// assignment/class join table.
pub struct CreateAtividades;

fn atividades() -> TableDef {
    TableDef::new("atividades")
        .column(pk())
        .column(ColumnDef::new("titulo", ColumnType::Text).not_null())
        .column(ColumnDef::new("descricao", ColumnType::Text))
        .column(ColumnDef::new("disciplina_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("professor_id", ColumnType::Integer))
        .column(ColumnDef::new("data_entrega", ColumnType::Date))
        .column(
            ColumnDef::new("valor", ColumnType::Real)
                .not_null()
                .default_expr("10.0"),
        )
        .column(stamp("criado_em"))
        .foreign_key(
            ForeignKeyDef::new("disciplina_id", "disciplinas", "id").on_delete(FkAction::Cascade),
        )
        .foreign_key(
            ForeignKeyDef::new("professor_id", "professores", "id").on_delete(FkAction::SetNull),
        )
}

fn atividades_turmas() -> TableDef {
    TableDef::new("atividades_turmas")
        .column(pk())
        .column(ColumnDef::new("atividade_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("turma_id", ColumnType::Integer).not_null())
        .foreign_key(
            ForeignKeyDef::new("atividade_id", "atividades", "id").on_delete(FkAction::Cascade),
        )
        .foreign_key(ForeignKeyDef::new("turma_id", "turmas", "id").on_delete(FkAction::Cascade))
}

fn questoes() -> TableDef {
    TableDef::new("questoes")
        .column(pk())
        .column(ColumnDef::new("atividade_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("enunciado", ColumnType::Text).not_null())
        .column(
            ColumnDef::new("tipo", ColumnType::Text)
                .not_null()
                .default_expr("'objetiva'"),
        )
        .column(ColumnDef::new("ordem", ColumnType::Integer).not_null())
        .foreign_key(
            ForeignKeyDef::new("atividade_id", "atividades", "id").on_delete(FkAction::Cascade),
        )
}

fn alternativas() -> TableDef {
    TableDef::new("alternativas")
        .column(pk())
        .column(ColumnDef::new("questao_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("texto", ColumnType::Text).not_null())
        .column(
            ColumnDef::new("correta", ColumnType::Boolean)
                .not_null()
                .default_expr("0"),
        )
        .foreign_key(ForeignKeyDef::new("questao_id", "questoes", "id").on_delete(FkAction::Cascade))
}

impl Migration for CreateAtividades {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240210112500, "create_atividades")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(atividades()),
            SchemaOp::CreateTable(atividades_turmas()),
            SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_AtividadeTurma_Atividade_Turma",
                "atividades_turmas",
                &["atividade_id", "turma_id"],
            )),
            SchemaOp::CreateTable(questoes()),
            SchemaOp::CreateTable(alternativas()),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
