//! `package.json` patching
//!
//! The static project tree ships a minimal `package.json`. After it is copied
//! the package is renamed after the destination folder and the dependencies
//! of the chosen stack are merged in.

use std::path::Path;

use convert_case::{Case, Casing};
use serde_json::{Map, Value};

use crate::error::{Result, ScaffoldError};

use super::stack::{Database, HttpServer, QueryBuilder, TargetStack};
use super::writer;

/// Manifest file name at the project root
pub const MANIFEST_FILE: &str = "package.json";

type Deps = &'static [(&'static str, &'static str)];

const fn server_dependencies(server: HttpServer) -> Deps {
    match server {
        HttpServer::Elysia => &[
            ("@elysiajs/cors", "^1.1.1"),
            ("@elysiajs/swagger", "^1.1.1"),
            ("elysia", "latest"),
        ],
        HttpServer::Express => &[
            ("cors", "^2.8.5"),
            ("express", "latest"),
            ("express-validator", "^7.2.1"),
        ],
    }
}

const fn server_dev_dependencies(server: HttpServer) -> Deps {
    match server {
        HttpServer::Elysia => &[],
        HttpServer::Express => &[("@types/cors", "^2.8.17"), ("@types/express", "^4.17.21")],
    }
}

const fn builder_dependencies(builder: QueryBuilder) -> Deps {
    match builder {
        QueryBuilder::Kysely => &[
            ("kysely", "^0.27.4"),
            ("kysely-codegen", "^0.16.6"),
            ("kysely-migration-cli", "^0.4.2"),
        ],
    }
}

const fn database_dependencies(database: Database) -> (Deps, Deps) {
    match database {
        Database::Postgres => (&[("pg", "^8.11.9")], &[("@types/pg", "^8.10.2")]),
    }
}

const TOOLING_DEV_DEPENDENCIES: Deps = &[("@biomejs/biome", "^1.9.1"), ("bun-types", "latest")];

const SCHEMA_DEPENDENCIES: Deps = &[("@sinclair/typebox", "^0.33.0")];

/// npm package name derived from the destination folder
///
/// ```
/// use std::path::Path;
/// use table_scaffold::scaffold::manifest::package_name;
///
/// assert_eq!(package_name(Path::new("/work/OrderService")), "order-service");
/// assert_eq!(package_name(Path::new("/")), "api");
/// ```
#[must_use]
pub fn package_name(root: &Path) -> String {
    root.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_case(Case::Kebab))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "api".to_string())
}

/// Rename the package and merge the stack's dependencies into `manifest`
///
/// Existing entries with the same name are replaced.
///
/// # Errors
///
/// Returns a reason string if `manifest` is not a JSON object or its
/// dependency sections are not objects.
pub fn patch_manifest(
    manifest: &str,
    name: &str,
    stack: &TargetStack,
    with_schemas: bool,
) -> std::result::Result<String, String> {
    let mut root: Value = serde_json::from_str(manifest).map_err(|e| e.to_string())?;
    let object = root
        .as_object_mut()
        .ok_or_else(|| "top level is not an object".to_string())?;

    object.insert("name".to_string(), Value::from(name));

    let (db_deps, db_dev_deps) = database_dependencies(stack.database);
    let mut deps: Vec<Deps> = vec![
        server_dependencies(stack.http_server),
        builder_dependencies(stack.query_builder),
        db_deps,
    ];
    if with_schemas {
        deps.push(SCHEMA_DEPENDENCIES);
    }
    let dev_deps = [
        server_dev_dependencies(stack.http_server),
        db_dev_deps,
        TOOLING_DEV_DEPENDENCIES,
    ];

    merge_section(object, "dependencies", &deps)?;
    merge_section(object, "devDependencies", &dev_deps)?;

    serde_json::to_string_pretty(&root)
        .map(|mut s| {
            s.push('\n');
            s
        })
        .map_err(|e| e.to_string())
}

fn merge_section(object: &mut Map<String, Value>, key: &str, groups: &[Deps]) -> std::result::Result<(), String> {
    let section = object
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| format!("\"{key}\" is not an object"))?;

    for (name, version) in groups.iter().flat_map(|group| group.iter()) {
        section.insert((*name).to_string(), Value::from(*version));
    }
    Ok(())
}

/// Patch `<root>/package.json` in place
///
/// Returns `false` when the copied tree has no manifest.
///
/// # Errors
///
/// Returns [`ScaffoldError::Manifest`] if the manifest cannot be read or
/// patched, or [`ScaffoldError::Write`] if it cannot be written back.
pub async fn patch_manifest_file(root: &Path, stack: &TargetStack, with_schemas: bool) -> Result<bool> {
    let path = root.join(MANIFEST_FILE);
    let manifest = match tokio::fs::read_to_string(&path).await {
        Ok(manifest) => manifest,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(ScaffoldError::Manifest {
                path,
                reason: e.to_string(),
            })
        }
    };

    let patched = patch_manifest(&manifest, &package_name(root), stack, with_schemas)
        .map_err(|reason| ScaffoldError::Manifest {
            path: path.clone(),
            reason,
        })?;

    writer::write_generated(&path, &patched).await?;
    Ok(true)
}
