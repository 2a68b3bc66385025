use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::{pk, stamp};

/// Assignment submissions and per-question answers. One submission per
/// assignment/student, one answer per submission/question.
pub struct CreateEntregas;

fn entregas_atividades() -> TableDef {
    TableDef::new("entregas_atividades")
        .column(pk())
        .column(ColumnDef::new("atividade_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("aluno_id", ColumnType::Integer).not_null())
        .column(stamp("entregue_em"))
        .column(ColumnDef::new("nota", ColumnType::Real))
        .foreign_key(
            ForeignKeyDef::new("atividade_id", "atividades", "id").on_delete(FkAction::Cascade),
        )
        .foreign_key(ForeignKeyDef::new("aluno_id", "alunos", "id").on_delete(FkAction::Cascade))
}

fn respostas_questoes() -> TableDef {
    TableDef::new("respostas_questoes")
        .column(pk())
        .column(ColumnDef::new("entrega_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("questao_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("alternativa_id", ColumnType::Integer))
        .column(ColumnDef::new("texto_resposta", ColumnType::Text))
        .foreign_key(
            ForeignKeyDef::new("entrega_id", "entregas_atividades", "id")
                .on_delete(FkAction::Cascade),
        )
        .foreign_key(ForeignKeyDef::new("questao_id", "questoes", "id").on_delete(FkAction::Cascade))
        .foreign_key(
            ForeignKeyDef::new("alternativa_id", "alternativas", "id").on_delete(FkAction::SetNull),
        )
}

impl Migration for CreateEntregas {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240218141000, "create_entregas")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(entregas_atividades()),
            SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_Entrega_Atividade_Aluno",
                "entregas_atividades",
                &["atividade_id", "aluno_id"],
            )),
            SchemaOp::CreateTable(respostas_questoes()),
            SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_Resposta_Entrega_Questao",
                "respostas_questoes",
                &["entrega_id", "questao_id"],
            )),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
