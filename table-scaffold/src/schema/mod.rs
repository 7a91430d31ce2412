//! Relational schema input
//!
//! Tables arrive from schema introspection as an ordered mapping of table
//! name to columns. Both orders matter: table order decides the order of
//! routers in the generated index, column order decides the order of fields in
//! every generated declaration. [`SchemaSet`] preserves both.

pub mod introspect;

use std::collections::HashMap;
use std::path::{Component, Path};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Result, ScaffoldError};
use crate::scaffold::naming::{is_identifier, to_lower_camel, NamingForms};

pub use introspect::{introspect, IntrospectedRow};

/// One column as reported by introspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    /// Raw column name
    pub name: String,
    /// Source database type name, lowercase
    pub source_type: String,
    /// Whether the column accepts NULL
    pub nullable: bool,
}

impl ColumnSchema {
    /// Create a column
    #[must_use]
    pub fn new(name: impl Into<String>, source_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            source_type: source_type.into(),
            nullable,
        }
    }
}

/// One table and its columns in ordinal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Raw table name
    pub raw_name: String,
    /// Columns in ordinal position order
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Create a table
    #[must_use]
    pub fn new(raw_name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        Self {
            raw_name: raw_name.into(),
            columns,
        }
    }

    /// Naming forms of the table name
    #[must_use]
    pub fn naming(&self) -> NamingForms {
        NamingForms::new(&self.raw_name)
    }
}

/// Ordered set of tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSet {
    tables: Vec<TableSchema>,
}

/// `is_nullable` as `information_schema.columns` spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum IsNullable {
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    column_name: String,
    data_type: String,
    is_nullable: IsNullable,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    columns: Vec<RawColumn>,
}

impl SchemaSet {
    /// Build from tables already in introspection order
    #[must_use]
    pub const fn new(tables: Vec<TableSchema>) -> Self {
        Self { tables }
    }

    /// Parse the JSON form of the introspection result
    ///
    /// ```
    /// use table_scaffold::schema::SchemaSet;
    ///
    /// let schema = SchemaSet::from_json_str(r#"{
    ///     "orders": { "columns": [
    ///         { "column_name": "id", "data_type": "uuid", "is_nullable": "NO" }
    ///     ] }
    /// }"#).unwrap();
    /// assert_eq!(schema.tables()[0].raw_name, "orders");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Schema`] if the document is not a mapping of
    /// table names to column lists, or if `is_nullable` is not `"YES"`/`"NO"`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: IndexMap<String, RawTable> =
            serde_json::from_str(json).map_err(|e| ScaffoldError::Schema(e.to_string()))?;

        let tables = raw
            .into_iter()
            .map(|(name, table)| {
                let columns = table
                    .columns
                    .into_iter()
                    .map(|c| ColumnSchema::new(c.column_name, c.data_type, c.is_nullable == IsNullable::Yes))
                    .collect();
                TableSchema::new(name, columns)
            })
            .collect();

        Ok(Self { tables })
    }

    /// Read and parse a JSON schema file
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::SchemaFile`] if the file cannot be read, or
    /// [`ScaffoldError::Schema`] if it cannot be parsed.
    pub async fn from_json_file(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ScaffoldError::SchemaFile {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json_str(&json)
    }

    /// Group flat introspection rows by table
    ///
    /// Rows must already be ordered by table name then ordinal position.
    /// A table whose only row has no column (an outer-join miss) is kept with
    /// an empty column list.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = IntrospectedRow>) -> Self {
        let mut grouped: IndexMap<String, Vec<ColumnSchema>> = IndexMap::new();

        for row in rows {
            let columns = grouped.entry(row.table_name).or_default();
            if let (Some(name), Some(data_type)) = (row.column_name, row.data_type) {
                let nullable = row.is_nullable.as_deref() == Some("YES");
                columns.push(ColumnSchema::new(name, data_type, nullable));
            }
        }

        Self {
            tables: grouped
                .into_iter()
                .map(|(name, columns)| TableSchema::new(name, columns))
                .collect(),
        }
    }

    /// Tables in introspection order
    #[must_use]
    pub const fn tables(&self) -> &[TableSchema] {
        self.tables.as_slice()
    }

    /// Number of tables
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether there are no tables
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Check that every table yields a usable, distinct route name
    ///
    /// The `lowerCamel` form of a table name is both a directory under
    /// `src/routes/` and a variable stem in generated code. It must be a
    /// JavaScript identifier, a single normal path component, and unique
    /// within the set.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Schema`] for the first table that fails.
    pub fn check_table_names(&self) -> Result<()> {
        let mut seen: HashMap<String, &str> = HashMap::new();

        for table in &self.tables {
            let stem = to_lower_camel(&table.raw_name);
            let components: Vec<_> = Path::new(&stem).components().collect();
            let single_component = matches!(components.as_slice(), [Component::Normal(_)]);

            if !single_component || !is_identifier(&stem) {
                return Err(ScaffoldError::Schema(format!(
                    "table name {:?} cannot be used as a route name",
                    table.raw_name
                )));
            }

            if let Some(previous) = seen.insert(stem.clone(), table.raw_name.as_str()) {
                return Err(ScaffoldError::Schema(format!(
                    "tables {previous:?} and {:?} both map to route name {stem:?}",
                    table.raw_name
                )));
            }
        }

        Ok(())
    }
}
