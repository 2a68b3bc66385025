use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, Migration, MigrationId, SchemaOp, TableDef,
    invert_all,
};

use super::{pk, stamp};

/// Grades. Deleting a disciplina with grades on record is restricted;
/// uniqueness per aluno/disciplina/bimestre is tightened by a later unit.
pub struct CreateNotas;

fn notas() -> TableDef {
    TableDef::new("notas")
        .column(pk())
        .column(ColumnDef::new("aluno_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("disciplina_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("bimestre", ColumnType::Integer).not_null())
        .column(ColumnDef::new("valor", ColumnType::Real).not_null())
        .column(stamp("lancada_em"))
        .foreign_key(ForeignKeyDef::new("aluno_id", "alunos", "id").on_delete(FkAction::Cascade))
        .foreign_key(
            ForeignKeyDef::new("disciplina_id", "disciplinas", "id").on_delete(FkAction::Restrict),
        )
}

impl Migration for CreateNotas {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240303121500, "create_notas")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![SchemaOp::CreateTable(notas())]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
