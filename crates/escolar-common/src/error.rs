use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_display_includes_context() {
        let e = Error::Config("missing database path".into());
        assert_eq!(e.to_string(), "configuration error: missing database path");

        let e = Error::Registry("version collision".into());
        assert_eq!(e.to_string(), "registry error: version collision");

        let e = Error::Schema("no such table: alunos".into());
        assert_eq!(e.to_string(), "schema error: no such table: alunos");

        let e = Error::Other("misc".into());
        assert_eq!(e.to_string(), "misc");
    }
}
