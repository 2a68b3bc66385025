use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::{pk, stamp};

/// Announcements and their read receipts. One confirmation per
/// announcement/user pair.
pub struct CreateAvisos;

fn avisos() -> TableDef {
    TableDef::new("avisos")
        .column(pk())
        .column(ColumnDef::new("titulo", ColumnType::Text).not_null())
        .column(ColumnDef::new("conteudo", ColumnType::Text).not_null())
        .column(ColumnDef::new("autor_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("turma_id", ColumnType::Integer))
        .column(
            ColumnDef::new("fixado", ColumnType::Boolean)
                .not_null()
                .default_expr("0"),
        )
        .column(stamp("criado_em"))
        .foreign_key(ForeignKeyDef::new("autor_id", "usuarios", "id").on_delete(FkAction::Restrict))
        .foreign_key(ForeignKeyDef::new("turma_id", "turmas", "id").on_delete(FkAction::Cascade))
}

fn avisos_confirmacoes() -> TableDef {
    TableDef::new("avisos_confirmacoes")
        .column(pk())
        .column(ColumnDef::new("aviso_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("usuario_id", ColumnType::Integer).not_null())
        .column(stamp("confirmado_em"))
        .foreign_key(ForeignKeyDef::new("aviso_id", "avisos", "id").on_delete(FkAction::Cascade))
        .foreign_key(ForeignKeyDef::new("usuario_id", "usuarios", "id").on_delete(FkAction::Cascade))
}

impl Migration for CreateAvisos {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240202160000, "create_avisos")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(avisos()),
            SchemaOp::CreateTable(avisos_confirmacoes()),
            SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_Confirmacao_Aviso_Usuario",
                "avisos_confirmacoes",
                &["aviso_id", "usuario_id"],
            )),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
