//! Project generation command
//!
//! Resolves configuration, asks for missing choices when attached to a
//! terminal, loads the schema and runs the generator.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use table_scaffold::config::DEFAULT_CONFIG_FILE;
use table_scaffold::scaffold::{writer, Database, HttpServer, QueryBuilder};
use table_scaffold::schema::introspect::introspect;
use table_scaffold::{ScaffoldConfig, ScaffoldGenerator, ScaffoldOptions, SchemaSet};

/// Generate a CRUD project from a database schema
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Destination folder; must be absent or empty
    #[arg(default_value = ".")]
    destination: PathBuf,

    /// Read the schema from a JSON file instead of a live database
    #[arg(long, value_name = "FILE")]
    schema_file: Option<PathBuf>,

    /// Database to introspect
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// HTTP server of the generated project
    #[arg(long, value_enum)]
    http_server: Option<HttpServer>,

    /// Query builder used by generated repositories
    #[arg(long, value_enum)]
    query_builder: Option<QueryBuilder>,

    /// Source database
    #[arg(long, value_enum)]
    database: Option<Database>,

    /// Also generate `TypeBox` schema files
    #[arg(long)]
    schemas: bool,

    /// Template root directory
    #[arg(long, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Prefix every router is mounted under
    #[arg(long, value_name = "PREFIX")]
    api_prefix: Option<String>,

    /// Configuration file (defaults to ./table-scaffold.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Never prompt; use flags and configuration as given
    #[arg(short = 'y', long)]
    yes: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl GenerateCommand {
    /// Execute the command
    pub async fn execute(self) -> Result<()> {
        let mut config = self.resolve_config()?;

        if self.print_config {
            print!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?
            );
            return Ok(());
        }

        let interactive = !self.yes && Term::stdout().is_term();
        if interactive {
            self.prompt(&mut config)?;
        }

        let destination = writer::normalize_destination(&self.destination)?;

        let schema = self.load_schema(&config, interactive).await?;
        if schema.is_empty() {
            tracing::warn!("Schema has no tables; only the project skeleton will be generated");
        }

        println!(
            "\n{} {} {} {}",
            style("Scaffolding").cyan().bold(),
            style(schema.len()).green().bold(),
            style("tables with").cyan().bold(),
            style(config.stack).green().bold()
        );

        let generator = ScaffoldGenerator::new(ScaffoldOptions::from_config(&destination, &config));
        let files = generator.generate(&schema).await?;

        println!(
            "\n{} {} files:",
            style("Generated").green().bold(),
            files.len()
        );
        for file in &files {
            println!(
                "  {} {} ({})",
                style("✓").green(),
                style(file.path.display()).dim(),
                style(&file.description).dim()
            );
        }

        print_next_steps(&destination);
        Ok(())
    }

    /// Loaded configuration with command-line overrides applied
    fn resolve_config(&self) -> Result<ScaffoldConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = ScaffoldConfig::load_from(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        if let Some(http_server) = self.http_server {
            config.stack.http_server = http_server;
        }
        if let Some(query_builder) = self.query_builder {
            config.stack.query_builder = query_builder;
        }
        if let Some(database) = self.database {
            config.stack.database = database;
        }
        if let Some(templates) = &self.templates {
            config.template_root.clone_from(templates);
        }
        if let Some(api_prefix) = &self.api_prefix {
            config.api_prefix.clone_from(api_prefix);
        }
        config.generate_schemas |= self.schemas;

        tracing::debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Ask for choices not given on the command line
    fn prompt(&self, config: &mut ScaffoldConfig) -> Result<()> {
        let theme = ColorfulTheme::default();

        if self.http_server.is_none() {
            let servers = HttpServer::value_variants();
            let titles: Vec<_> = servers.iter().map(|s| s.title()).collect();
            let current = servers
                .iter()
                .position(|s| *s == config.stack.http_server)
                .unwrap_or(0);
            let choice = Select::with_theme(&theme)
                .with_prompt("HTTP server")
                .items(&titles)
                .default(current)
                .interact()?;
            config.stack.http_server = servers[choice];
        }

        if self.query_builder.is_none() {
            let builders = QueryBuilder::value_variants();
            let titles: Vec<_> = builders.iter().map(|b| b.title()).collect();
            let choice = Select::with_theme(&theme)
                .with_prompt("Query builder")
                .items(&titles)
                .default(0)
                .interact()?;
            config.stack.query_builder = builders[choice];
        }

        if !self.schemas {
            config.generate_schemas = Confirm::with_theme(&theme)
                .with_prompt("Generate TypeBox schema files?")
                .default(config.generate_schemas)
                .interact()?;
        }

        Ok(())
    }

    async fn load_schema(&self, config: &ScaffoldConfig, interactive: bool) -> Result<SchemaSet> {
        if let Some(path) = &self.schema_file {
            return Ok(SchemaSet::from_json_file(path).await?);
        }

        let database_url = match &self.database_url {
            Some(url) => url.clone(),
            None if interactive => Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("Database URL")
                .interact_text()?,
            None => anyhow::bail!("No schema source: pass --schema-file or --database-url"),
        };

        Ok(introspect(&database_url, config.introspection_timeout()).await?)
    }
}

fn print_next_steps(destination: &Path) {
    println!(
        "\n{} Project created in {}",
        style("✨").green().bold(),
        style(destination.display()).green().bold()
    );

    println!("\n{}", style("Next steps:").cyan().bold());
    println!("  1. {}", style(format!("cd {}", destination.display())).yellow());
    println!("  2. {}", style("bun install").yellow());
    println!("  3. Set {} and run {}", style("DATABASE_URL").yellow(), style("bun run dev").yellow());
}
