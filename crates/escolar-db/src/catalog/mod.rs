//! The school schema as an ordered catalog of migration units. Versions are
//! `YYYYMMDDhhmmss` timestamps and must stay strictly increasing; the
//! registry rejects the catalog otherwise.

use escolar_common::Result;
use escolar_schema::{ColumnDef, ColumnType, Migration, MigrationRegistry};

mod m20240102_create_usuarios;
mod m20240105_create_turmas;
mod m20240108_create_alunos;
mod m20240112_create_professores;
mod m20240119_create_disciplinas;
mod m20240126_create_habilidades;
mod m20240202_create_avisos;
mod m20240210_create_atividades;
mod m20240218_create_entregas;
mod m20240225_create_simulados;
mod m20240303_create_notas;
mod m20240310_create_frequencias;
mod m20240318_create_materiais;
mod m20240402_create_documentos;
mod m20240415_create_audit_logs;
mod m20240422_add_usuarios_seguranca;
mod m20240506_rename_alunos_nascimento;
mod m20240512_add_nota_unica;

/// Build the full validated school catalog.
pub fn school_catalog() -> Result<MigrationRegistry> {
    let mut registry = MigrationRegistry::new();
    for unit in units() {
        registry.register(unit)?;
    }
    Ok(registry)
}

fn units() -> Vec<Box<dyn Migration>> {
    vec![
        Box::new(m20240102_create_usuarios::CreateUsuarios),
        Box::new(m20240105_create_turmas::CreateTurmas),
        Box::new(m20240108_create_alunos::CreateAlunos),
        Box::new(m20240112_create_professores::CreateProfessores),
        Box::new(m20240119_create_disciplinas::CreateDisciplinas),
        Box::new(m20240126_create_habilidades::CreateHabilidades),
        Box::new(m20240202_create_avisos::CreateAvisos),
        Box::new(m20240210_create_atividades::CreateAtividades),
        Box::new(m20240218_create_entregas::CreateEntregas),
        Box::new(m20240225_create_simulados::CreateSimulados),
        Box::new(m20240303_create_notas::CreateNotas),
        Box::new(m20240310_create_frequencias::CreateFrequencias),
        Box::new(m20240318_create_materiais::CreateMateriais),
        Box::new(m20240402_create_documentos::CreateDocumentos),
        Box::new(m20240415_create_audit_logs::CreateAuditLogs),
        Box::new(m20240422_add_usuarios_seguranca::AddUsuariosSeguranca),
        Box::new(m20240506_rename_alunos_nascimento::RenameAlunosNascimento),
        Box::new(m20240512_add_nota_unica::AddNotaUnica),
    ]
}

pub(crate) fn pk() -> ColumnDef {
    ColumnDef::primary_key("id")
}

/// `NOT NULL DEFAULT (datetime('now'))` timestamp column.
pub(crate) fn stamp(name: &str) -> ColumnDef {
    ColumnDef::new(name, ColumnType::DateTime)
        .not_null()
        .default_expr("(datetime('now'))")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_registers_cleanly() {
        let registry = school_catalog().expect("catalog must validate");
        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn final_snapshot_contains_all_domain_tables() {
        let registry = school_catalog().unwrap();
        let snapshot = registry.snapshot();
        for table in [
            "usuarios",
            "alunos",
            "professores",
            "turmas",
            "disciplinas",
            "turma_disciplinas",
            "habilidades",
            "avisos",
            "avisos_confirmacoes",
            "atividades",
            "atividades_turmas",
            "questoes",
            "alternativas",
            "entregas_atividades",
            "respostas_questoes",
            "simulados",
            "tentativas_simulados",
            "notas",
            "frequencias",
            "materiais",
            "documentos",
            "solicitacoes_documentos",
            "audit_logs",
        ] {
            assert!(snapshot.table(table).is_some(), "missing table {table}");
        }
    }

    #[test]
    fn final_snapshot_has_no_dangling_foreign_keys() {
        let registry = school_catalog().unwrap();
        let snapshot = registry.snapshot();
        for table in snapshot.tables() {
            for fk in &table.foreign_keys {
                let target = snapshot
                    .table(&fk.ref_table)
                    .unwrap_or_else(|| panic!("{}.{} dangles", table.name, fk.column));
                assert!(
                    target.has_column(&fk.ref_column),
                    "{}.{} targets missing column {}.{}",
                    table.name,
                    fk.column,
                    fk.ref_table,
                    fk.ref_column
                );
            }
        }
    }

    #[test]
    fn corrective_units_landed_in_the_snapshot() {
        let registry = school_catalog().unwrap();
        let snapshot = registry.snapshot();
        let alunos = snapshot.table("alunos").unwrap();
        assert!(alunos.has_column("data_nascimento"));
        assert!(!alunos.has_column("nascimento"));

        let usuarios = snapshot.table("usuarios").unwrap();
        assert!(usuarios.has_column("tentativas_login"));
        assert!(usuarios.has_column("bloqueado_ate"));

        assert!(snapshot.index("UQ_Nota_Aluno_Disciplina_Bimestre").is_some());
        assert!(snapshot.index("UQ_Documento_Frequencia_Tipo").is_some());
    }
}
