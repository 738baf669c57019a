use crate::{
    ConnectorError,
    constraint::{Constraint, TupleDomain},
};
use plancheck_core::{sanity::CompilationContext, types::DataType};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

///
/// SchemaTableName
/// Schema-qualified table name; both parts are stored lowercase.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SchemaTableName {
    schema: String,
    table: String,
}

impl SchemaTableName {
    #[must_use]
    pub fn new(schema: &str, table: &str) -> Self {
        Self {
            schema: schema.to_lowercase(),
            table: table.to_lowercase(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for SchemaTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

///
/// SchemaTablePrefix
/// Listing filter: everything, one schema, or one table.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SchemaTablePrefix {
    schema: Option<String>,
    table: Option<String>,
}

impl SchemaTablePrefix {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn schema(schema: &str) -> Self {
        Self {
            schema: Some(schema.to_lowercase()),
            table: None,
        }
    }

    #[must_use]
    pub fn table(schema: &str, table: &str) -> Self {
        Self {
            schema: Some(schema.to_lowercase()),
            table: Some(table.to_lowercase()),
        }
    }

    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    #[must_use]
    pub fn matches(&self, name: &SchemaTableName) -> bool {
        self.schema.as_deref().is_none_or(|s| s == name.schema())
            && self.table.as_deref().is_none_or(|t| t == name.table())
    }
}

///
/// TableHandle
/// Opaque reference to one table, tagged with the connector that issued it.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TableHandle {
    pub connector_id: String,
    pub table: SchemaTableName,
}

///
/// ColumnHandle
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ColumnHandle {
    pub connector_id: String,
    pub name: String,
    pub data_type: DataType,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnMetadata {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableMetadata {
    pub table: SchemaTableName,
    pub columns: Vec<ColumnMetadata>,
}

///
/// TableLayoutHandle
/// One physical way to read a table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableLayoutHandle {
    pub table: TableHandle,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableLayout {
    pub handle: TableLayoutHandle,
}

///
/// TableLayoutResult
/// A candidate layout plus the part of the constraint it does not enforce.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableLayoutResult {
    pub layout: TableLayout,
    pub unenforced: TupleDomain,
}

///
/// ConnectorMetadata
///
/// Metadata surface a data-source adapter exposes to the planner. Every
/// lookup that can miss returns a `ConnectorError` naming what was missing.
///

pub trait ConnectorMetadata: Send + Sync {
    fn list_schema_names(&self, session: &CompilationContext) -> Vec<String>;

    fn get_table_handle(
        &self,
        session: &CompilationContext,
        name: &SchemaTableName,
    ) -> Result<TableHandle, ConnectorError>;

    /// Candidate layouts for `table`; each carries the remaining predicate
    /// the engine must still apply.
    fn get_table_layouts(
        &self,
        session: &CompilationContext,
        table: &TableHandle,
        constraint: &Constraint,
        desired_columns: Option<&BTreeSet<ColumnHandle>>,
    ) -> Result<Vec<TableLayoutResult>, ConnectorError>;

    fn get_table_layout(
        &self,
        session: &CompilationContext,
        handle: &TableLayoutHandle,
    ) -> Result<TableLayout, ConnectorError>;

    fn get_table_metadata(
        &self,
        session: &CompilationContext,
        table: &TableHandle,
    ) -> Result<TableMetadata, ConnectorError>;

    /// Tables in `schema`, or in every schema when `None`.
    fn list_tables(
        &self,
        session: &CompilationContext,
        schema: Option<&str>,
    ) -> Result<Vec<SchemaTableName>, ConnectorError>;

    fn get_column_handles(
        &self,
        session: &CompilationContext,
        table: &TableHandle,
    ) -> Result<BTreeMap<String, ColumnHandle>, ConnectorError>;

    fn get_column_metadata(
        &self,
        session: &CompilationContext,
        table: &TableHandle,
        column: &ColumnHandle,
    ) -> Result<ColumnMetadata, ConnectorError>;

    fn list_table_columns(
        &self,
        session: &CompilationContext,
        prefix: &SchemaTablePrefix,
    ) -> Result<BTreeMap<SchemaTableName, Vec<ColumnMetadata>>, ConnectorError>;
}
