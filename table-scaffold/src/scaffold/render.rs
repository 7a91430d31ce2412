//! Template rendering
//!
//! Template documents are plain source files containing four placeholder
//! tokens. Rendering is one left-to-right scan: at each `__` the scanner
//! tries every token, copies the replacement and continues after the token.
//! Replacement text is never rescanned, so a substituted value can neither
//! form nor break another token.
//!
//! | Token | Replacement |
//! |---|---|
//! | `__TABLE__` | `lowerCamel` table name |
//! | `__CAP_TABLE__` | `UpperCamel` table name |
//! | `__RAW_TABLE__` | table name verbatim |
//! | `__COLUMNS__` | one `name: validator` line per column |

use crate::schema::TableSchema;

use super::naming::{property_key, to_lower_camel, NamingForms};
use super::type_map::{TypeMapper, ValidatorDialect};

/// Placeholder tokens recognized in template documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `__TABLE__`
    Table,
    /// `__CAP_TABLE__`
    CapTable,
    /// `__RAW_TABLE__`
    RawTable,
    /// `__COLUMNS__`
    Columns,
}

impl Placeholder {
    /// Every token
    pub const ALL: [Self; 4] = [Self::Table, Self::CapTable, Self::RawTable, Self::Columns];

    /// Literal token text
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Table => "__TABLE__",
            Self::CapTable => "__CAP_TABLE__",
            Self::RawTable => "__RAW_TABLE__",
            Self::Columns => "__COLUMNS__",
        }
    }

    /// The token `text` starts with, if any
    fn at_start_of(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| text.starts_with(p.token()))
    }
}

/// Renders template documents for one target stack
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    mapper: TypeMapper,
    dialect: ValidatorDialect,
}

impl Renderer {
    /// Create a renderer
    #[must_use]
    pub const fn new(mapper: TypeMapper, dialect: ValidatorDialect) -> Self {
        Self { mapper, dialect }
    }

    /// Substitute every placeholder in `template` for `table`
    ///
    /// Pure: identical inputs give byte-identical output. The column block is
    /// only built when the template contains `__COLUMNS__`.
    ///
    /// ```
    /// use table_scaffold::scaffold::render::Renderer;
    /// use table_scaffold::scaffold::stack::TargetStack;
    /// use table_scaffold::schema::{ColumnSchema, TableSchema};
    ///
    /// let stack = TargetStack::default();
    /// let renderer = Renderer::new(stack.type_mapper(), stack.validator_dialect());
    /// let table = TableSchema::new("user_accounts", vec![ColumnSchema::new("id", "uuid", false)]);
    ///
    /// assert_eq!(
    ///     renderer.render(r#"get__CAP_TABLE__ById / db.selectFrom("__RAW_TABLE__")"#, &table),
    ///     r#"getUserAccountsById / db.selectFrom("user_accounts")"#,
    /// );
    /// ```
    #[must_use]
    pub fn render(&self, template: &str, table: &TableSchema) -> String {
        let names = NamingForms::new(&table.raw_name);
        let mut columns: Option<Vec<String>> = None;

        let mut out = String::with_capacity(template.len());
        let mut pos = 0;

        while let Some(offset) = template[pos..].find("__") {
            let start = pos + offset;
            out.push_str(&template[pos..start]);

            let Some(placeholder) = Placeholder::at_start_of(&template[start..]) else {
                out.push('_');
                pos = start + 1;
                continue;
            };

            match placeholder {
                Placeholder::Table => out.push_str(&names.lower_camel),
                Placeholder::CapTable => out.push_str(&names.upper_camel),
                Placeholder::RawTable => out.push_str(&names.raw),
                Placeholder::Columns => {
                    let lines = columns.get_or_insert_with(|| self.column_lines(table));
                    let separator = format!(",\n{}", line_indent(template, start));
                    out.push_str(&lines.join(&separator));
                }
            }
            pos = start + placeholder.token().len();
        }

        out.push_str(&template[pos..]);
        out
    }

    /// The `__COLUMNS__` expansion without indentation
    ///
    /// One `lowerCamelName: validator` line per column, in schema order,
    /// joined by a comma and newline. Empty for a table without columns.
    #[must_use]
    pub fn column_block(&self, table: &TableSchema) -> String {
        self.column_lines(table).join(",\n")
    }

    fn column_lines(&self, table: &TableSchema) -> Vec<String> {
        table
            .columns
            .iter()
            .map(|column| {
                let validator = self.mapper.map_validator_type(&column.source_type);
                format!(
                    "{}: {}",
                    property_key(&to_lower_camel(&column.name)),
                    validator.expression(self.dialect)
                )
            })
            .collect()
    }
}

/// Leading whitespace of the line containing byte offset `at`
fn line_indent(text: &str, at: usize) -> &str {
    let line_start = text[..at].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..at];
    let indent_len = line.len() - line.trim_start().len();
    &line[..indent_len]
}
