use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::{pk, stamp};

/// Audit trail. `detalhes` carries a JSON payload; the author survives
/// user deletion as NULL.
pub struct CreateAuditLogs;

fn audit_logs() -> TableDef {
    TableDef::new("audit_logs")
        .column(pk())
        .column(ColumnDef::new("usuario_id", ColumnType::Integer))
        .column(ColumnDef::new("acao", ColumnType::Text).not_null())
        .column(ColumnDef::new("entidade", ColumnType::Text).not_null())
        .column(ColumnDef::new("entidade_id", ColumnType::Integer))
        .column(ColumnDef::new("detalhes", ColumnType::Text))
        .column(stamp("registrado_em"))
        .foreign_key(ForeignKeyDef::new("usuario_id", "usuarios", "id").on_delete(FkAction::SetNull))
}

impl Migration for CreateAuditLogs {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240415133000, "create_audit_logs")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(audit_logs()),
            SchemaOp::CreateIndex(IndexDef::plain(
                "IDX_AuditLog_Entidade",
                "audit_logs",
                &["entidade", "entidade_id"],
            )),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
