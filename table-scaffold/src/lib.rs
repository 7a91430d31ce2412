//! table-scaffold library
//!
//! Reads a relational schema and scaffolds a CRUD web-service project:
//! controllers, repositories, types and an aggregated router index, rendered
//! from template documents chosen by a [`TargetStack`].
//!
//! ```rust,no_run
//! use table_scaffold::{ScaffoldConfig, ScaffoldGenerator, ScaffoldOptions, SchemaSet};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ScaffoldConfig::load()?;
//! let schema = SchemaSet::from_json_file("schema.json".as_ref()).await?;
//! let generator = ScaffoldGenerator::new(ScaffoldOptions::from_config("./my-api", &config));
//! let files = generator.generate(&schema).await?;
//! println!("{} files written", files.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;
pub mod schema;

pub use config::ScaffoldConfig;
pub use error::{Result, ScaffoldError};
pub use scaffold::{GeneratedFile, ScaffoldGenerator, ScaffoldOptions, TargetStack};
pub use schema::{ColumnSchema, SchemaSet, TableSchema};
