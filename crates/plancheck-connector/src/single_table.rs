use crate::{
    ConnectorError,
    constraint::Constraint,
    metadata::{
        ColumnHandle, ColumnMetadata, ConnectorMetadata, SchemaTableName, SchemaTablePrefix,
        TableHandle, TableLayout, TableLayoutHandle, TableLayoutResult, TableMetadata,
    },
};
use plancheck_core::{sanity::CompilationContext, types::DataType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::Level;

///
/// SingleTableConfig
///
/// Shape of the one table a `SingleTableConnector` serves. Missing fields
/// fall back to `default.numbers(value bigint)`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SingleTableConfig {
    pub connector_id: String,
    pub schema: String,
    pub table: String,
    pub column: String,
    pub column_type: DataType,
}

impl SingleTableConfig {
    pub fn from_json(json: &str) -> Result<Self, ConnectorError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for SingleTableConfig {
    fn default() -> Self {
        Self {
            connector_id: "single_table".to_string(),
            schema: "default".to_string(),
            table: "numbers".to_string(),
            column: "value".to_string(),
            column_type: DataType::BIGINT,
        }
    }
}

///
/// SingleTableConnector
///
/// Connector exposing exactly one schema holding one single-column table.
/// Its only layout consumes no predicate: the whole constraint comes back
/// as unenforced.
///

#[derive(Clone, Debug)]
pub struct SingleTableConnector {
    connector_id: String,
    name: SchemaTableName,
    column: ColumnMetadata,
}

impl SingleTableConnector {
    #[must_use]
    pub fn new(config: &SingleTableConfig) -> Self {
        Self {
            connector_id: config.connector_id.clone(),
            name: SchemaTableName::new(&config.schema, &config.table),
            column: ColumnMetadata::new(config.column.to_lowercase(), config.column_type.clone()),
        }
    }

    #[must_use]
    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    #[must_use]
    pub const fn table_name(&self) -> &SchemaTableName {
        &self.name
    }

    fn column_handle(&self) -> ColumnHandle {
        ColumnHandle {
            connector_id: self.connector_id.clone(),
            name: self.column.name.clone(),
            data_type: self.column.data_type.clone(),
        }
    }

    // Folds case the same way `SchemaTableName` does.
    fn require_schema(&self, schema: &str) -> Result<(), ConnectorError> {
        if schema.to_lowercase() == self.name.schema() {
            return Ok(());
        }
        tracing::event!(Level::DEBUG, schema, "schema not found");

        Err(ConnectorError::SchemaNotFound {
            schema: schema.to_string(),
        })
    }

    // Handles from other connectors, or for tables this one never issued,
    // are rejected rather than reinterpreted.
    fn require_handle(&self, table: &TableHandle) -> Result<(), ConnectorError> {
        if table.connector_id != self.connector_id {
            return Err(ConnectorError::ForeignHandle {
                expected: self.connector_id.clone(),
                found: table.connector_id.clone(),
            });
        }
        if table.table != self.name {
            return Err(ConnectorError::TableNotFound {
                table: table.table.clone(),
            });
        }

        Ok(())
    }

    fn table_handle(&self) -> TableHandle {
        TableHandle {
            connector_id: self.connector_id.clone(),
            table: self.name.clone(),
        }
    }
}

impl Default for SingleTableConnector {
    fn default() -> Self {
        Self::new(&SingleTableConfig::default())
    }
}

impl ConnectorMetadata for SingleTableConnector {
    fn list_schema_names(&self, _session: &CompilationContext) -> Vec<String> {
        vec![self.name.schema().to_string()]
    }

    fn get_table_handle(
        &self,
        _session: &CompilationContext,
        name: &SchemaTableName,
    ) -> Result<TableHandle, ConnectorError> {
        self.require_schema(name.schema())?;
        if name.table() != self.name.table() {
            tracing::event!(Level::DEBUG, table = %name, "table not found");
            return Err(ConnectorError::TableNotFound { table: name.clone() });
        }

        Ok(self.table_handle())
    }

    fn get_table_layouts(
        &self,
        _session: &CompilationContext,
        table: &TableHandle,
        constraint: &Constraint,
        _desired_columns: Option<&BTreeSet<ColumnHandle>>,
    ) -> Result<Vec<TableLayoutResult>, ConnectorError> {
        self.require_handle(table)?;

        Ok(vec![TableLayoutResult {
            layout: TableLayout {
                handle: TableLayoutHandle {
                    table: table.clone(),
                },
            },
            unenforced: constraint.summary().clone(),
        }])
    }

    fn get_table_layout(
        &self,
        _session: &CompilationContext,
        handle: &TableLayoutHandle,
    ) -> Result<TableLayout, ConnectorError> {
        self.require_handle(&handle.table)?;

        Ok(TableLayout {
            handle: handle.clone(),
        })
    }

    fn get_table_metadata(
        &self,
        _session: &CompilationContext,
        table: &TableHandle,
    ) -> Result<TableMetadata, ConnectorError> {
        self.require_handle(table)?;

        Ok(TableMetadata {
            table: self.name.clone(),
            columns: vec![self.column.clone()],
        })
    }

    fn list_tables(
        &self,
        _session: &CompilationContext,
        schema: Option<&str>,
    ) -> Result<Vec<SchemaTableName>, ConnectorError> {
        if let Some(schema) = schema {
            self.require_schema(schema)?;
        }

        Ok(vec![self.name.clone()])
    }

    fn get_column_handles(
        &self,
        _session: &CompilationContext,
        table: &TableHandle,
    ) -> Result<BTreeMap<String, ColumnHandle>, ConnectorError> {
        self.require_handle(table)?;

        Ok(BTreeMap::from([(self.column.name.clone(), self.column_handle())]))
    }

    fn get_column_metadata(
        &self,
        _session: &CompilationContext,
        table: &TableHandle,
        column: &ColumnHandle,
    ) -> Result<ColumnMetadata, ConnectorError> {
        self.require_handle(table)?;
        if column.connector_id != self.connector_id {
            return Err(ConnectorError::ForeignHandle {
                expected: self.connector_id.clone(),
                found: column.connector_id.clone(),
            });
        }
        if column.name != self.column.name {
            return Err(ConnectorError::ColumnNotFound {
                table: self.name.clone(),
                column: column.name.clone(),
            });
        }

        Ok(self.column.clone())
    }

    fn list_table_columns(
        &self,
        _session: &CompilationContext,
        prefix: &SchemaTablePrefix,
    ) -> Result<BTreeMap<SchemaTableName, Vec<ColumnMetadata>>, ConnectorError> {
        if let Some(schema) = prefix.schema_name() {
            self.require_schema(schema)?;
        }

        let mut columns = BTreeMap::new();
        if prefix.matches(&self.name) {
            columns.insert(self.name.clone(), vec![self.column.clone()]);
        }

        Ok(columns)
    }
}
