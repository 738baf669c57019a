use crate::metadata::SchemaTableName;
use thiserror::Error as ThisError;

///
/// ConnectorError
///
/// Every lookup miss is an explicit error; there is no "absent" sentinel.
/// Listing calls return an empty collection only for a valid request that
/// matched nothing.
///

#[derive(Debug, ThisError)]
pub enum ConnectorError {
    #[error("schema '{schema}' does not exist")]
    SchemaNotFound { schema: String },

    #[error("table '{table}' does not exist")]
    TableNotFound { table: SchemaTableName },

    #[error("column '{column}' does not exist in table '{table}'")]
    ColumnNotFound {
        table: SchemaTableName,
        column: String,
    },

    #[error("handle belongs to connector '{found}', expected '{expected}'")]
    ForeignHandle { expected: String, found: String },

    #[error("invalid connector config: {0}")]
    Config(#[from] serde_json::Error),
}
