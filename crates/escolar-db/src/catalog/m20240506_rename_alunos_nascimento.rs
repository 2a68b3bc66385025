use escolar_schema::{Migration, MigrationId, SchemaOp};

/// Corrective rename: `alunos.nascimento` was shipped without the prefix
/// the rest of the schema uses.
pub struct RenameAlunosNascimento;

impl Migration for RenameAlunosNascimento {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240506154000, "rename_alunos_nascimento")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![SchemaOp::RenameColumn {
            table: "alunos".into(),
            from: "nascimento".into(),
            to: "data_nascimento".into(),
        }]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        vec![SchemaOp::RenameColumn {
            table: "alunos".into(),
            from: "data_nascimento".into(),
            to: "nascimento".into(),
        }]
    }
}
