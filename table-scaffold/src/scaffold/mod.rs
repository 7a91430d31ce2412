//! Project scaffolding from a relational schema
//!
//! Leaf-first:
//! - [`type_map`]: source column types to TypeScript and validator types
//! - [`naming`]: raw identifiers to `lowerCamel` / `UpperCamel`
//! - [`render`]: placeholder substitution into template documents
//! - [`writer`]: destination checks, tree copy, writes and cleanup
//! - [`index`], [`types_file`], [`schemas_file`], [`manifest`]: shared files
//! - [`generator`]: the sequential, all-or-nothing generation run

pub mod generator;
pub mod index;
pub mod manifest;
pub mod naming;
pub mod render;
pub mod schemas_file;
pub mod stack;
pub mod type_map;
pub mod types_file;
pub mod writer;

pub use generator::{GeneratedFile, ScaffoldGenerator, ScaffoldOptions};
pub use index::{assemble_index, IndexAssembler};
pub use naming::{to_lower_camel, to_upper_camel, NamingForms};
pub use render::{Placeholder, Renderer};
pub use stack::{Database, HttpServer, QueryBuilder, TargetStack, TemplateSet};
pub use type_map::{TsType, TypeMapper, ValidatorDialect, ValidatorType};
