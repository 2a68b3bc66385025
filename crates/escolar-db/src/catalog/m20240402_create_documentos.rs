use escolar_schema::{
    ColumnDef, ColumnType, FkAction, ForeignKeyDef, IndexDef, Migration, MigrationId, SchemaOp,
    TableDef, invert_all,
};

use super::{pk, stamp};

/// Student documents and document requests. At most one document of a
/// given tipo per attendance context (`UQ_Documento_Frequencia_Tipo`).
pub struct CreateDocumentos;

fn documentos() -> TableDef {
    TableDef::new("documentos")
        .column(pk())
        .column(ColumnDef::new("aluno_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("frequencia_id", ColumnType::Integer))
        .column(ColumnDef::new("tipo", ColumnType::Text).not_null())
        .column(ColumnDef::new("caminho", ColumnType::Text).not_null())
        .column(stamp("enviado_em"))
        .foreign_key(ForeignKeyDef::new("aluno_id", "alunos", "id").on_delete(FkAction::Cascade))
        .foreign_key(
            ForeignKeyDef::new("frequencia_id", "frequencias", "id").on_delete(FkAction::Cascade),
        )
}

fn solicitacoes_documentos() -> TableDef {
    TableDef::new("solicitacoes_documentos")
        .column(pk())
        .column(ColumnDef::new("aluno_id", ColumnType::Integer).not_null())
        .column(ColumnDef::new("tipo", ColumnType::Text).not_null())
        .column(
            ColumnDef::new("status", ColumnType::Text)
                .not_null()
                .default_expr("'pendente'"),
        )
        .column(stamp("solicitado_em"))
        .column(ColumnDef::new("atendido_em", ColumnType::DateTime))
        .foreign_key(ForeignKeyDef::new("aluno_id", "alunos", "id").on_delete(FkAction::Cascade))
}

impl Migration for CreateDocumentos {
    fn id(&self) -> MigrationId {
        MigrationId::new(20240402094500, "create_documentos")
    }

    fn forward(&self) -> Vec<SchemaOp> {
        vec![
            SchemaOp::CreateTable(documentos()),
            SchemaOp::CreateIndex(IndexDef::unique(
                "UQ_Documento_Frequencia_Tipo",
                "documentos",
                &["frequencia_id", "tipo"],
            )),
            SchemaOp::CreateTable(solicitacoes_documentos()),
        ]
    }

    fn backward(&self) -> Vec<SchemaOp> {
        invert_all(&self.forward())
    }
}
