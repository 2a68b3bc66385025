use escolar_common::{Error, Result};
use escolar_schema::SchemaInspector;
use rusqlite::Connection;

/// `SchemaInspector` over a live SQLite connection, backed by
/// `sqlite_master` and the table PRAGMAs.
pub struct SqliteInspector<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteInspector<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl SchemaInspector for SqliteInspector<'_> {
    fn table_exists(&self, table: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")
            .map_err(|e| Error::Database(format!("failed to prepare table lookup: {e}")))?;
        stmt.exists([table])
            .map_err(|e| Error::Database(format!("failed to check table {table}: {e}")))
    }

    fn columns(&self, table: &str) -> Result<Vec<String>> {
        if !self.table_exists(table)? {
            return Ok(Vec::new());
        }
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info(\"{table}\")"))
            .map_err(|e| Error::Database(format!("failed to prepare table_info: {e}")))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .map_err(|e| Error::Database(format!("failed to read columns of {table}: {e}")))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Database(format!("failed to read columns of {table}: {e}")))
    }

    fn index_exists(&self, name: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = ?1")
            .map_err(|e| Error::Database(format!("failed to prepare index lookup: {e}")))?;
        stmt.exists([name])
            .map_err(|e| Error::Database(format!("failed to check index {name}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspects_tables_columns_and_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE turmas (id INTEGER PRIMARY KEY, nome TEXT NOT NULL);
             CREATE UNIQUE INDEX UQ_Turma_Nome ON turmas (nome);",
        )
        .unwrap();

        let inspector = SqliteInspector::new(&conn);
        assert!(inspector.table_exists("turmas").unwrap());
        assert!(!inspector.table_exists("alunos").unwrap());
        assert_eq!(inspector.columns("turmas").unwrap(), vec!["id", "nome"]);
        assert!(inspector.columns("alunos").unwrap().is_empty());
        assert!(inspector.index_exists("UQ_Turma_Nome").unwrap());
        assert!(!inspector.index_exists("UQ_Aluno_Usuario").unwrap());
    }
}
