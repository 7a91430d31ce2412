//! Target stack selection
//!
//! A [`TargetStack`] names the HTTP server, query builder and database of the
//! generated project. It selects the template set on disk, the validator
//! dialect and the column type mapping table.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::type_map::{TypeMapper, ValidatorDialect};

/// HTTP server framework of the generated project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HttpServer {
    /// Elysia on Bun (default)
    #[default]
    Elysia,
    /// Express
    Express,
}

/// Query builder used by generated repositories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QueryBuilder {
    /// Kysely (default)
    #[default]
    Kysely,
}

/// Source database the schema was read from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    /// `PostgreSQL` (default)
    #[default]
    Postgres,
}

impl HttpServer {
    /// Directory name of this server's templates
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Elysia => "elysia",
            Self::Express => "express",
        }
    }

    /// Human readable name for prompts
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Elysia => "Elysia",
            Self::Express => "Express",
        }
    }
}

impl QueryBuilder {
    /// Directory name of this query builder's templates
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Kysely => "kysely",
        }
    }

    /// Human readable name for prompts
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Kysely => "Kysely",
        }
    }
}

impl Database {
    /// Identifier used in logs and config
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for HttpServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Technology choices for the generated project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetStack {
    /// HTTP server framework
    pub http_server: HttpServer,
    /// Query builder
    pub query_builder: QueryBuilder,
    /// Source database
    pub database: Database,
}

impl TargetStack {
    /// Validator dialect used in controllers
    #[must_use]
    pub fn validator_dialect(&self) -> ValidatorDialect {
        ValidatorDialect::from(self.http_server)
    }

    /// Column type mapper for the source database
    #[must_use]
    pub const fn type_mapper(&self) -> TypeMapper {
        TypeMapper::for_database(self.database)
    }

    /// Resolve template paths under `root`
    #[must_use]
    pub fn template_set(&self, root: &Path) -> TemplateSet {
        let server_dir = root.join(self.http_server.slug());
        let builder_dir = root.join(self.query_builder.slug());

        TemplateSet {
            project_tree: server_dir.join("project"),
            controller: server_dir.join("controller.ts"),
            repository: builder_dir.join("repository.ts"),
            database_client: builder_dir.join("db.ts"),
        }
    }
}

impl fmt::Display for TargetStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {} + {}",
            self.http_server, self.query_builder, self.database
        )
    }
}

/// Template documents for one target stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    /// Static project tree mirrored into the destination
    pub project_tree: PathBuf,
    /// Per-table controller template
    pub controller: PathBuf,
    /// Per-table repository template
    pub repository: PathBuf,
    /// Database client copied to `src/db.ts`
    pub database_client: PathBuf,
}
