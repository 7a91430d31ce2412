//! `TypeBox` schema files (`src/schemas/`)
//!
//! Audit columns managed by the database are declared once in
//! `generated.ts`; each table's schema file declares the writable columns as
//! `<table>Create` and intersects them with the audit columns as
//! `<table>Base`.

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::schema::TableSchema;

use super::naming::{property_key, to_lower_camel};
use super::type_map::{TypeMapper, ValidatorDialect};

/// Directory of schema files relative to the project root
pub const SCHEMAS_DIR: &str = "src/schemas";

/// Columns declared in `generated.ts` instead of per-table schemas
pub const GENERATED_COLUMNS: [&str; 5] = ["id", "created_at", "created_by", "updated_at", "updated_by"];

/// Shared audit-column schema
pub const GENERATED_SCHEMA: &str = r#"import { Type as t } from "@sinclair/typebox";

export const generatedData = t.Object({
	id: t.String(),
	createdAt: t.String({ format: "date-time", default: () => new Date().toISOString() }),
	createdBy: t.String(),
	updatedAt: t.String({ format: "date-time", default: () => new Date().toISOString() }),
	updatedBy: t.String(),
});
"#;

/// Relative path of the shared schema file
#[must_use]
pub fn generated_schema_path() -> PathBuf {
    PathBuf::from(SCHEMAS_DIR).join("generated.ts")
}

/// Relative path of a table's schema file
#[must_use]
pub fn table_schema_path(table: &TableSchema) -> PathBuf {
    PathBuf::from(SCHEMAS_DIR).join(format!("{}.ts", to_lower_camel(&table.raw_name)))
}

/// Render the schema file for `table`
#[must_use]
pub fn render_table_schema(mapper: &TypeMapper, table: &TableSchema) -> String {
    let stem = to_lower_camel(&table.raw_name);
    let mut out = String::from(
        "import { Type as t } from \"@sinclair/typebox\";\nimport { generatedData } from \"./generated\";\n\n",
    );

    let _ = writeln!(out, "export const {stem}Create = t.Object({{");
    for column in &table.columns {
        if GENERATED_COLUMNS.contains(&column.name.as_str()) {
            continue;
        }
        let expr = mapper
            .map_validator_type(&column.source_type)
            .expression(ValidatorDialect::TypeBox);
        let name = property_key(&to_lower_camel(&column.name));
        if column.nullable {
            let _ = writeln!(out, "\t{name}: t.Optional({expr}),");
        } else {
            let _ = writeln!(out, "\t{name}: {expr},");
        }
    }
    out.push_str("});\n\n");

    let _ = writeln!(
        out,
        "export const {stem}Base = t.Intersect([generatedData, {stem}Create]);"
    );
    out
}
