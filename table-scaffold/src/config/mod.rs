//! Configuration management for table-scaffold
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Command-line flags (applied by the binary, highest priority)
//! 2. Environment variables (`TABLE_SCAFFOLD_` prefix, `__` for nesting)
//! 3. `./table-scaffold.toml`, or the file given with `--config`
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # table-scaffold.toml
//! api_prefix = "/api"
//! generate_schemas = true
//! template_root = "./templates"
//! introspection_timeout_secs = 10
//!
//! [stack]
//! http_server = "express"
//! query_builder = "kysely"
//! database = "postgres"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::scaffold::index::DEFAULT_API_PREFIX;
use crate::scaffold::stack::TargetStack;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "table-scaffold.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TABLE_SCAFFOLD_";

/// Complete table-scaffold configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Prefix every generated router is mounted under
    pub api_prefix: String,

    /// Directory containing the template sets
    pub template_root: PathBuf,

    /// Also generate `TypeBox` schema files
    pub generate_schemas: bool,

    /// Seconds to wait for a database connection during introspection
    pub introspection_timeout_secs: u64,

    /// Technology choices for the generated project
    pub stack: TargetStack,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            template_root: bundled_template_root(),
            generate_schemas: false,
            introspection_timeout_secs: 30,
            stack: TargetStack::default(),
        }
    }
}

/// Template sets shipped with the crate
#[must_use]
pub fn bundled_template_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

impl ScaffoldConfig {
    /// Load configuration from the default locations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `./table-scaffold.toml` exists but contains invalid TOML
    /// - A value has the wrong type (e.g. an unknown `stack.http_server`)
    pub fn load() -> anyhow::Result<Self> {
        Self::figment(Path::new(DEFAULT_CONFIG_FILE))
            .extract()
            .map_err(Into::into)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is treated as empty, so defaults and environment
    /// variables still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file contains invalid TOML syntax
    /// - Configuration values fail type conversion
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::figment(path).extract().map_err(Into::into)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true))
    }

    /// Introspection connection timeout
    #[must_use]
    pub const fn introspection_timeout(&self) -> Duration {
        Duration::from_secs(self.introspection_timeout_secs)
    }
}
