use escolar_schema::{IndexDef, Migration, MigrationId, SchemaOp};

/// Tightens grading: at most one nota per aluno/disciplina/bimestre.
pub struct AddNotaUnica;

fn nota_unica() -> IndexDef {
    IndexDef::unique(
        "UQ_Nota_Aluno_Disciplina_Bimestre",
        "notas",
        &["aluno_id", "disciplina_id", "bimestre"],
    )
}

impl Migration for AddNotaUnica {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240512120000, "add_nota_unica")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![SchemaOp::CreateIndex(nota_unica())]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        vec![SchemaOp::DropIndex(nota_unica())]
    }
}
