//! Router aggregation file (`src/routes/index.ts`)
//!
//! One import per table followed by a single chained expression that mounts
//! every table router under the shared API prefix, in the order tables were
//! supplied.

use std::fmt::Write as _;

use crate::schema::TableSchema;

use super::naming::{js_string, to_lower_camel};
use super::stack::HttpServer;

/// Path of the aggregation file relative to the project root
pub const INDEX_PATH: &str = "src/routes/index.ts";

/// Default prefix every router is mounted under
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Accumulates routers while tables are generated
#[derive(Debug, Clone)]
pub struct IndexAssembler {
    http_server: HttpServer,
    api_prefix: String,
    routers: Vec<String>,
}

impl IndexAssembler {
    /// Start an empty index
    #[must_use]
    pub fn new(http_server: HttpServer, api_prefix: impl Into<String>) -> Self {
        Self {
            http_server,
            api_prefix: api_prefix.into(),
            routers: Vec::new(),
        }
    }

    /// Register the router generated for `table`
    pub fn push(&mut self, table: &TableSchema) {
        self.routers.push(to_lower_camel(&table.raw_name));
    }

    /// Number of registered routers
    #[must_use]
    pub const fn len(&self) -> usize {
        self.routers.len()
    }

    /// Whether no router has been registered
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Render the index file
    #[must_use]
    pub fn finish(&self) -> String {
        let prefix = js_string(&self.api_prefix);
        let mut out = String::new();

        out.push_str(match self.http_server {
            HttpServer::Elysia => "import { Elysia } from \"elysia\";\n",
            HttpServer::Express => "import express from \"express\";\n",
        });
        for stem in &self.routers {
            let _ = writeln!(out, "import {stem}Router from \"./{stem}/controller\";");
        }
        out.push('\n');

        match self.http_server {
            HttpServer::Elysia => {
                let _ = write!(out, "export const app = new Elysia({{ prefix: {prefix} }})");
                for stem in &self.routers {
                    let _ = write!(out, "\n\t.use({stem}Router)");
                }
                out.push_str(";\n");
            }
            HttpServer::Express => {
                out.push_str("export const app = express()\n\t.use(express.json())\n");
                let _ = write!(out, "\t.use(\n\t\t{prefix},\n\t\texpress.Router()");
                for stem in &self.routers {
                    let route = js_string(&format!("/{stem}"));
                    let _ = write!(out, "\n\t\t\t.use({route}, {stem}Router)");
                }
                out.push_str(",\n\t);\n");
            }
        }

        out.push_str("\nexport default app;\n");
        out
    }
}

/// Assemble the index for `tables` in one call
#[must_use]
pub fn assemble_index(http_server: HttpServer, api_prefix: &str, tables: &[TableSchema]) -> String {
    let mut assembler = IndexAssembler::new(http_server, api_prefix);
    for table in tables {
        assembler.push(table);
    }
    assembler.finish()
}
