//! Connector metadata surface: how the planner discovers schemas, tables,
//! columns, and physical layouts before a plan is built. Plans themselves
//! never call into a connector.

mod constraint;
mod error;
mod metadata;
mod single_table;


// re-exports
pub use constraint::{Constraint, Domain, TupleDomain};
pub use error::ConnectorError;
pub use metadata::{
    ColumnHandle, ColumnMetadata, ConnectorMetadata, SchemaTableName, SchemaTablePrefix,
    TableHandle, TableLayout, TableLayoutHandle, TableLayoutResult, TableMetadata,
};
pub use single_table::{SingleTableConfig, SingleTableConnector};
