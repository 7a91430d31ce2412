//! Database types file (`src/types.ts`)
//!
//! One interface per table plus the aggregate `Database` interface the query
//! builder is typed with. Column keys stay raw because the query builder
//! addresses columns by their database names.

use std::fmt::Write as _;

use crate::schema::TableSchema;

use super::naming::{property_key, to_upper_camel};
use super::type_map::TypeMapper;

/// Path of the types file relative to the project root
pub const TYPES_PATH: &str = "src/types.ts";

/// Accumulates table interfaces and the interface-name registry
#[derive(Debug, Clone)]
pub struct TypesFileBuilder {
    mapper: TypeMapper,
    body: String,
    registry: Vec<(String, String)>,
}

impl TypesFileBuilder {
    /// Start an empty types file
    #[must_use]
    pub fn new(mapper: TypeMapper) -> Self {
        Self {
            mapper,
            body: String::from("// Auto-generated database types\n\n"),
            registry: Vec::new(),
        }
    }

    /// Append the interface for `table`
    pub fn push(&mut self, table: &TableSchema) {
        let interface = to_upper_camel(&table.raw_name);

        let _ = write!(self.body, "export interface {interface} {{");
        for column in &table.columns {
            let optional = if column.nullable { "?" } else { "" };
            let ts_type = self.mapper.map_type(&column.source_type);
            let _ = write!(self.body, " {}{optional}: {ts_type};", property_key(&column.name));
        }
        self.body.push_str(" }\n\n");

        self.registry.push((table.raw_name.clone(), interface));
    }

    /// Render the file with the aggregate `Database` interface
    #[must_use]
    pub fn finish(&self) -> String {
        let mut out = self.body.clone();
        out.push_str("export interface Database {\n");
        for (raw, interface) in &self.registry {
            let _ = writeln!(out, "\t{}: {interface};", property_key(raw));
        }
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::stack::Database;
    use crate::schema::ColumnSchema;

    fn builder() -> TypesFileBuilder {
        TypesFileBuilder::new(TypeMapper::for_database(Database::Postgres))
    }

    #[test]
    fn test_interface_with_optional_column() {
        let mut types = builder();
        types.push(&TableSchema::new(
            "user_accounts",
            vec![
                ColumnSchema::new("id", "uuid", false),
                ColumnSchema::new("email", "text", true),
            ],
        ));
        let file = types.finish();

        assert!(file.contains("interface UserAccounts { id: string; email?: string; }"));
        assert!(file.contains("export interface Database {\n\tuser_accounts: UserAccounts;\n}\n"));
    }

    #[test]
    fn test_registry_follows_push_order() {
        let mut types = builder();
        types.push(&TableSchema::new("orders", vec![ColumnSchema::new("total", "numeric", false)]));
        types.push(&TableSchema::new("order_items", vec![ColumnSchema::new("meta", "jsonb", true)]));
        let file = types.finish();

        assert!(file.contains("export interface Orders { total: number; }"));
        assert!(file.contains("export interface OrderItems { meta?: unknown; }"));
        let orders = file.find("\torders: Orders;").unwrap();
        let items = file.find("\torder_items: OrderItems;").unwrap();
        assert!(orders < items);
    }

    #[test]
    fn test_table_without_columns() {
        let mut types = builder();
        types.push(&TableSchema::new("marker", vec![]));
        assert!(types.finish().contains("export interface Marker { }"));
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let mut types = builder();
        types.push(&TableSchema::new(
            "logins",
            vec![
                ColumnSchema::new("2fa", "boolean", false),
                ColumnSchema::new("order-id", "uuid", true),
            ],
        ));
        let file = types.finish();

        assert!(file.contains("export interface Logins { \"2fa\": boolean; \"order-id\"?: string; }"));
        assert!(file.contains("\tlogins: Logins;"));
    }
}
