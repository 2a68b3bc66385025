use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, Migration, MigrationId, SchemaOp, TableDef,
    invert_all,
};

use super::{pk, stamp};

/// Mock exams and student attempts.
pub struct CreateSimulados;

fn simulados() -> TableDef {
    TableDef::new("simulados")
        .column(pk())
        .column(ColumnDef::new("titulo", ColumnType::Text).not_null())
        .column(ColumnDef::new("disciplina_id", ColumnType::Integer))
        .column(ColumnDef::new("data_aplicacao", ColumnType::Date))
        .column(
            ColumnDef::new("duracao_minutos", ColumnType::Integer)
                .not_null()
                .default_expr("120"),
        )
        .column(stamp("criado_em"))
        .foreign_key(
            ForeignKeyDef::new("disciplina_id", "disciplinas", "id").on_delete(FkAction::SetNull),
        )
}

fn tentativas_simulados() -> TableDef {
    TableDef::new("tentativas_simulados")
        .column(pk())
        .column(ColumnDef::new("simulado_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("aluno_id", ColumnType::Integer).not_null())
        .column(stamp("iniciado_em"))
        .column(ColumnDef::new("finalizado_em", ColumnType::DateTime))
        .column(ColumnDef::new("pontuacao", ColumnType::Real))
        .foreign_key(
            ForeignKeyDef::new("simulado_id", "simulados", "id").on_delete(FkAction::Cascade),
        )
        .foreign_key(ForeignKeyDef::new("aluno_id", "alunos", "id").on_delete(FkAction::Cascade))
}

impl Migration for CreateSimulados {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240225100000, "create_simulados")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(simulados()),
            SchemaOp::CreateTable(tentativas_simulados()),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
