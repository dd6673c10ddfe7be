use thiserror::Error;

/// Everything that can go wrong while checking the live database, from
/// connection problems down to a single column not matching its expectation.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("missing environment variable {0}")]
    Config(&'static str),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Sql(#[from] sqlx::Error),

    #[error("database `{0}` does not exist")]
    MissingDatabase(String),

    #[error("table `{0}` does not exist")]
    MissingTable(String),

    #[error("column `{column}` not found on table `{table}`")]
    MissingColumn { table: String, column: String },

    #[error("column `{table}.{column}` has type `{actual}`, expected it to contain `{expected}`")]
    TypeMismatch {
        table: String,
        column: String,
        expected: String,
        actual: String,
    },

    #[error("column `{table}.{column}` primary key: expected {expected}, found {actual}")]
    PrimaryKeyMismatch {
        table: String,
        column: String,
        expected: bool,
        actual: bool,
    },

    #[error("column `{table}.{column}` foreign key check failed: {detail}")]
    ForeignKeyMismatch {
        table: String,
        column: String,
        detail: String,
    },

    #[error("column `{table}.{column}` nullability: expected {expected}, found {actual}")]
    NullabilityMismatch {
        table: String,
        column: String,
        expected: bool,
        actual: bool,
    },

    #[error("relation for `{key}`: expected {expected:?}, found {actual:?}")]
    RelationMismatch {
        key: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

pub type VerifyResult<T> = Result<T, VerifyError>;
