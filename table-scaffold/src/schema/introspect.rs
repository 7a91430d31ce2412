//! `PostgreSQL` schema introspection
//!
//! Reads base tables of the `public` schema from `information_schema` in a
//! single query. Everything downstream works from the resulting
//! [`SchemaSet`], so generation itself never touches the database.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use super::SchemaSet;
use crate::error::Result;

/// Catalog query: every base table in `public`, outer-joined with its
/// columns, ordered by table name then ordinal position.
pub const TABLES_AND_COLUMNS_QUERY: &str = r"
SELECT
    t.table_name::text,
    c.column_name::text,
    c.data_type::text,
    c.is_nullable::text
FROM information_schema.tables AS t
LEFT JOIN information_schema.columns AS c
    ON t.table_name = c.table_name
   AND t.table_schema = c.table_schema
WHERE t.table_schema = 'public'
  AND t.table_type = 'BASE TABLE'
ORDER BY t.table_name, c.ordinal_position
";

/// One row of [`TABLES_AND_COLUMNS_QUERY`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectedRow {
    /// Table name
    pub table_name: String,
    /// Column name, `None` for a table without columns
    pub column_name: Option<String>,
    /// Column data type
    pub data_type: Option<String>,
    /// `"YES"` or `"NO"`
    pub is_nullable: Option<String>,
}

/// Introspect the database at `database_url`
///
/// `timeout` bounds how long to wait for a connection.
///
/// # Errors
///
/// Returns [`crate::ScaffoldError::Database`] if the connection or the query
/// fails.
pub async fn introspect(database_url: &str, timeout: Duration) -> Result<SchemaSet> {
    tracing::info!("Introspecting database schema");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(timeout)
        .connect(database_url)
        .await?;

    let rows: Vec<(String, Option<String>, Option<String>, Option<String>)> =
        sqlx::query_as(TABLES_AND_COLUMNS_QUERY)
            .fetch_all(&pool)
            .await?;

    pool.close().await;

    tracing::debug!(rows = rows.len(), "Fetched catalog rows");

    Ok(SchemaSet::from_rows(rows.into_iter().map(
        |(table_name, column_name, data_type, is_nullable)| IntrospectedRow {
            table_name,
            column_name,
            data_type,
            is_nullable,
        },
    )))
}
