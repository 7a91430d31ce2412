//! Scaffold generator orchestrator
//!
//! This module coordinates one generation run:
//! - Destination precondition check
//! - Static project tree, database client and `package.json`
//! - Controller and repository per table
//! - Schema files per table (optional)
//! - Types file and router index
//!
//! Tables are processed one at a time in schema order. Everything after the
//! precondition check is all-or-nothing: on any error the destination root is
//! removed and the original error is returned.

use std::path::{Path, PathBuf};

use crate::config::ScaffoldConfig;
use crate::error::Result;
use crate::schema::{SchemaSet, TableSchema};

use super::index::{IndexAssembler, INDEX_PATH};
use super::manifest;
use super::naming::to_lower_camel;
use super::render::Renderer;
use super::schemas_file::{self, GENERATED_SCHEMA};
use super::stack::{TargetStack, TemplateSet};
use super::types_file::{TypesFileBuilder, TYPES_PATH};
use super::writer;

/// Database client path relative to the project root
pub const DB_CLIENT_PATH: &str = "src/db.ts";

/// Routes directory relative to the project root
pub const ROUTES_DIR: &str = "src/routes";

/// Inputs of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Destination root; must be absent or an empty directory
    pub destination: PathBuf,
    /// Technology choices
    pub stack: TargetStack,
    /// Directory containing the template sets
    pub template_root: PathBuf,
    /// Prefix every router is mounted under
    pub api_prefix: String,
    /// Also generate schema files
    pub generate_schemas: bool,
}

impl ScaffoldOptions {
    /// Options for `destination` taken from loaded configuration
    #[must_use]
    pub fn from_config(destination: impl Into<PathBuf>, config: &ScaffoldConfig) -> Self {
        Self {
            destination: destination.into(),
            stack: config.stack,
            template_root: config.template_root.clone(),
            api_prefix: config.api_prefix.clone(),
            generate_schemas: config.generate_schemas,
        }
    }
}

/// Scaffold generator
pub struct ScaffoldGenerator {
    options: ScaffoldOptions,
    templates: TemplateSet,
    renderer: Renderer,
}

/// Per-table template documents, read once per run
struct TableTemplates {
    controller: String,
    repository: String,
}

impl ScaffoldGenerator {
    /// Create a new scaffold generator
    #[must_use]
    pub fn new(options: ScaffoldOptions) -> Self {
        let templates = options.stack.template_set(&options.template_root);
        let renderer = Renderer::new(
            options.stack.type_mapper(),
            options.stack.validator_dialect(),
        );

        Self {
            options,
            templates,
            renderer,
        }
    }

    /// Destination root of this run
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.options.destination
    }

    /// Generate the whole project for `schema`
    ///
    /// # Errors
    ///
    /// Returns a precondition error, with the destination untouched, if a
    /// table name cannot be used as a route name, if two tables share one, or
    /// if the destination is not empty. Any later error removes the
    /// destination root before it is returned.
    pub async fn generate(&self, schema: &SchemaSet) -> Result<Vec<GeneratedFile>> {
        schema.check_table_names()?;

        let normalized = writer::normalize_destination(self.destination())?;
        let root = normalized.as_path();
        writer::ensure_destination_available(root).await?;

        tracing::info!(
            destination = %root.display(),
            stack = %self.options.stack,
            tables = schema.len(),
            "Generating scaffold"
        );

        match self.populate(root, schema).await {
            Ok(files) => Ok(files),
            Err(err) => {
                tracing::debug!(error = %err, "Generation failed, removing destination");
                writer::cleanup(root).await;
                Err(err)
            }
        }
    }

    async fn populate(&self, root: &Path, schema: &SchemaSet) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::new();

        for path in writer::copy_tree(&self.templates.project_tree, root).await? {
            files.push(GeneratedFile::new(path, "Static project file"));
        }

        writer::copy_file(&self.templates.database_client, &root.join(DB_CLIENT_PATH)).await?;
        files.push(GeneratedFile::new(
            DB_CLIENT_PATH,
            format!("{} database client", self.options.stack.query_builder.title()),
        ));

        if manifest::patch_manifest_file(root, &self.options.stack, self.options.generate_schemas).await? {
            tracing::debug!("Patched package manifest");
        }

        let templates = TableTemplates {
            controller: writer::read_template(&self.templates.controller).await?,
            repository: writer::read_template(&self.templates.repository).await?,
        };

        let mapper = self.options.stack.type_mapper();
        let mut index = IndexAssembler::new(self.options.stack.http_server, self.options.api_prefix.as_str());
        let mut types = TypesFileBuilder::new(mapper);

        for table in schema.tables() {
            files.extend(self.generate_table(root, table, &templates).await?);
            index.push(table);
            types.push(table);
        }

        if self.options.generate_schemas {
            let path = schemas_file::generated_schema_path();
            writer::write_generated(&root.join(&path), GENERATED_SCHEMA).await?;
            files.push(GeneratedFile::new(path, "Shared audit column schema"));
        }

        writer::write_generated(&root.join(TYPES_PATH), &types.finish()).await?;
        files.push(GeneratedFile::new(TYPES_PATH, "Database types"));

        writer::write_generated(&root.join(INDEX_PATH), &index.finish()).await?;
        files.push(GeneratedFile::new(
            INDEX_PATH,
            format!("Router index ({} routers)", index.len()),
        ));

        Ok(files)
    }

    async fn generate_table(
        &self,
        root: &Path,
        table: &TableSchema,
        templates: &TableTemplates,
    ) -> Result<Vec<GeneratedFile>> {
        let route_dir = PathBuf::from(ROUTES_DIR).join(to_lower_camel(&table.raw_name));
        writer::ensure_dir(&root.join(&route_dir)).await?;

        let controller = route_dir.join("controller.ts");
        let content = self.renderer.render(&templates.controller, table);
        writer::write_generated(&root.join(&controller), &content).await?;

        let repository = route_dir.join("repository.ts");
        let content = self.renderer.render(&templates.repository, table);
        writer::write_generated(&root.join(&repository), &content).await?;

        let mut files = vec![
            GeneratedFile::new(controller, format!("Controller for {}", table.raw_name)),
            GeneratedFile::new(repository, format!("Repository for {}", table.raw_name)),
        ];

        if self.options.generate_schemas {
            let path = schemas_file::table_schema_path(table);
            let content = schemas_file::render_table_schema(&self.options.stack.type_mapper(), table);
            writer::write_generated(&root.join(&path), &content).await?;
            files.push(GeneratedFile::new(path, format!("Schema for {}", table.raw_name)));
        }

        tracing::info!(table = %table.raw_name, files = files.len(), "Generated table");
        Ok(files)
    }
}

/// Represents a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path from project root
    pub path: PathBuf,
    /// File description for user feedback
    pub description: String,
}

impl GeneratedFile {
    fn new(path: impl Into<PathBuf>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}
