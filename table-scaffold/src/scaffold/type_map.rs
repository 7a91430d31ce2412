//! Source column type mapping
//!
//! Maps database column types to TypeScript types (for `types.ts`) and to
//! runtime validator expressions (for controllers and schema files).
//! Unrecognized types never abort generation: they degrade to the most
//! permissive fallback and log a warning.

use std::fmt;

use super::stack::{Database, HttpServer};

/// TypeScript type used in generated interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `unknown`, also the fallback
    Unknown,
}

impl TsType {
    /// TypeScript spelling
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime validator schema kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorType {
    /// Any string
    String,
    /// Whole number
    Integer,
    /// Any number
    Number,
    /// Boolean
    Boolean,
    /// ISO 8601 date-time string
    DateTimeString,
    /// Arbitrary JSON
    Any,
    /// Unrecognized source type
    Unknown,
}

impl ValidatorType {
    /// Render the builder expression for a validator library
    #[must_use]
    pub const fn expression(self, dialect: ValidatorDialect) -> &'static str {
        match dialect {
            ValidatorDialect::TypeBox => match self {
                Self::String => "t.String()",
                Self::Integer => "t.Integer()",
                Self::Number => "t.Number()",
                Self::Boolean => "t.Boolean()",
                Self::DateTimeString => r#"t.String({ format: "date-time" })"#,
                Self::Any => "t.Any()",
                Self::Unknown => "t.Unknown()",
            },
            ValidatorDialect::ExpressValidator => match self {
                Self::String => "{ isString: true }",
                Self::Integer => "{ isInt: true }",
                Self::Number => "{ isFloat: true }",
                Self::Boolean => "{ isBoolean: true }",
                Self::DateTimeString => "{ isISO8601: true }",
                Self::Any | Self::Unknown => "{ optional: true }",
            },
        }
    }
}

/// Validator library the generated controllers use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorDialect {
    /// `TypeBox` builders (`t.String()`), used by Elysia
    TypeBox,
    /// `express-validator` schema objects, used by Express
    ExpressValidator,
}

impl From<HttpServer> for ValidatorDialect {
    fn from(server: HttpServer) -> Self {
        match server {
            HttpServer::Elysia => Self::TypeBox,
            HttpServer::Express => Self::ExpressValidator,
        }
    }
}

/// Column type mapper for one source database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapper {
    database: Database,
}

impl TypeMapper {
    /// Select the mapping table for `database`
    #[must_use]
    pub const fn for_database(database: Database) -> Self {
        Self { database }
    }

    /// Map a source column type to a TypeScript type
    ///
    /// Unrecognized types return [`TsType::Unknown`] and log one warning.
    #[must_use]
    pub fn map_type(&self, source_type: &str) -> TsType {
        let mapped = match self.database {
            Database::Postgres => postgres_ts_type(source_type),
        };

        mapped.unwrap_or_else(|| {
            tracing::warn!(
                database = %self.database,
                source_type,
                "Unknown column type, defaulting to unknown"
            );
            TsType::Unknown
        })
    }

    /// Map a source column type to a validator schema kind
    ///
    /// Unrecognized types return [`ValidatorType::Unknown`] and log one warning.
    #[must_use]
    pub fn map_validator_type(&self, source_type: &str) -> ValidatorType {
        let mapped = match self.database {
            Database::Postgres => postgres_validator_type(source_type),
        };

        mapped.unwrap_or_else(|| {
            tracing::warn!(
                database = %self.database,
                source_type,
                "Unknown column type, defaulting to unknown validator"
            );
            ValidatorType::Unknown
        })
    }
}

fn postgres_ts_type(source_type: &str) -> Option<TsType> {
    let ts = match source_type {
        "uuid" | "character varying" | "varchar" | "text" | "char" | "character" | "name"
        | "bytea" | "date" | "timestamp without time zone" | "timestamp with time zone" => {
            TsType::String
        }
        "integer" | "smallint" | "bigint" | "numeric" | "real" | "double precision" => {
            TsType::Number
        }
        "boolean" => TsType::Boolean,
        "json" | "jsonb" => TsType::Unknown,
        _ => return None,
    };
    Some(ts)
}

fn postgres_validator_type(source_type: &str) -> Option<ValidatorType> {
    let validator = match source_type {
        "uuid" | "character varying" | "varchar" | "text" | "char" | "character" | "name"
        | "bytea" => ValidatorType::String,
        "integer" | "smallint" | "bigint" => ValidatorType::Integer,
        "numeric" | "real" | "double precision" => ValidatorType::Number,
        "boolean" => ValidatorType::Boolean,
        "date" | "timestamp without time zone" | "timestamp with time zone" => {
            ValidatorType::DateTimeString
        }
        "json" | "jsonb" => ValidatorType::Any,
        _ => return None,
    };
    Some(validator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_warnings(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&count)));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    const PG: TypeMapper = TypeMapper::for_database(Database::Postgres);

    #[test]
    fn test_postgres_ts_types() {
        let cases = [
            ("uuid", TsType::String),
            ("character varying", TsType::String),
            ("varchar", TsType::String),
            ("text", TsType::String),
            ("bytea", TsType::String),
            ("integer", TsType::Number),
            ("smallint", TsType::Number),
            ("bigint", TsType::Number),
            ("numeric", TsType::Number),
            ("real", TsType::Number),
            ("double precision", TsType::Number),
            ("boolean", TsType::Boolean),
            ("date", TsType::String),
            ("timestamp with time zone", TsType::String),
            ("timestamp without time zone", TsType::String),
            ("json", TsType::Unknown),
            ("jsonb", TsType::Unknown),
        ];

        for (source, expected) in cases {
            assert_eq!(PG.map_type(source), expected, "{source}");
        }
    }

    #[test]
    fn test_postgres_validator_types() {
        let cases = [
            ("uuid", ValidatorType::String),
            ("text", ValidatorType::String),
            ("bytea", ValidatorType::String),
            ("integer", ValidatorType::Integer),
            ("bigint", ValidatorType::Integer),
            ("numeric", ValidatorType::Number),
            ("double precision", ValidatorType::Number),
            ("boolean", ValidatorType::Boolean),
            ("timestamp with time zone", ValidatorType::DateTimeString),
            ("date", ValidatorType::DateTimeString),
            ("jsonb", ValidatorType::Any),
        ];

        for (source, expected) in cases {
            assert_eq!(PG.map_validator_type(source), expected, "{source}");
        }
    }

    #[test]
    fn test_mapping_is_case_sensitive() {
        assert_eq!(PG.map_type("UUID"), TsType::Unknown);
        assert_eq!(PG.map_validator_type("Integer"), ValidatorType::Unknown);
    }

    #[test]
    fn test_unknown_type_warns_once_per_mapping() {
        let ts_warnings = count_warnings(|| {
            assert_eq!(PG.map_type("money"), TsType::Unknown);
        });
        assert_eq!(ts_warnings, 1);

        let validator_warnings = count_warnings(|| {
            assert_eq!(PG.map_validator_type("tsvector"), ValidatorType::Unknown);
        });
        assert_eq!(validator_warnings, 1);
    }

    #[test]
    fn test_known_type_does_not_warn() {
        let warnings = count_warnings(|| {
            let _ = PG.map_type("jsonb");
            let _ = PG.map_validator_type("uuid");
        });
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_typebox_expressions() {
        let dialect = ValidatorDialect::TypeBox;
        assert_eq!(ValidatorType::String.expression(dialect), "t.String()");
        assert_eq!(ValidatorType::Integer.expression(dialect), "t.Integer()");
        assert_eq!(
            ValidatorType::DateTimeString.expression(dialect),
            r#"t.String({ format: "date-time" })"#
        );
        assert_eq!(ValidatorType::Unknown.expression(dialect), "t.Unknown()");
    }

    #[test]
    fn test_express_validator_expressions() {
        let dialect = ValidatorDialect::from(HttpServer::Express);
        assert_eq!(dialect, ValidatorDialect::ExpressValidator);
        assert_eq!(ValidatorType::Integer.expression(dialect), "{ isInt: true }");
        assert_eq!(ValidatorType::Unknown.expression(dialect), "{ optional: true }");
    }

    #[test]
    fn test_ts_type_display() {
        assert_eq!(TsType::Boolean.to_string(), "boolean");
        assert_eq!(TsType::Unknown.to_string(), "unknown");
    }
}
