//! Integration tests for project generation

use std::fs;
use std::path::{Path, PathBuf};

use table_scaffold::scaffold::HttpServer;
use table_scaffold::{
    ColumnSchema, ScaffoldConfig, ScaffoldError, ScaffoldGenerator, ScaffoldOptions, SchemaSet,
    TableSchema,
};
use tempfile::TempDir;

fn generator(destination: &Path) -> ScaffoldGenerator {
    ScaffoldGenerator::new(ScaffoldOptions::from_config(
        destination,
        &ScaffoldConfig::default(),
    ))
}

fn express_generator(destination: &Path) -> ScaffoldGenerator {
    let mut options = ScaffoldOptions::from_config(destination, &ScaffoldConfig::default());
    options.stack.http_server = HttpServer::Express;
    ScaffoldGenerator::new(options)
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
}

fn user_accounts() -> TableSchema {
    TableSchema::new(
        "user_accounts",
        vec![
            ColumnSchema::new("id", "uuid", false),
            ColumnSchema::new("email", "text", true),
        ],
    )
}

fn simple_table(name: &str) -> TableSchema {
    TableSchema::new(name, vec![ColumnSchema::new("id", "uuid", false)])
}

/// A valid identifier longer than any file-name limit, so its route
/// directory cannot be created
fn overlong_name() -> String {
    "t".repeat(300)
}

#[tokio::test]
async fn test_user_accounts_scaffold() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("accounts-api");

    generator(&root)
        .generate(&SchemaSet::new(vec![user_accounts()]))
        .await
        .unwrap();

    let repository = read(&root, "src/routes/userAccounts/repository.ts");
    assert!(repository.contains("userAccounts"));
    assert!(repository.contains("\"user_accounts\""));
    assert!(repository.contains("getAllUserAccounts"));
    assert!(!repository.contains("__"));

    let controller = read(&root, "src/routes/userAccounts/controller.ts");
    assert!(controller.contains(
        "export const userAccountsSchema = t.Object({\n\tid: t.String(),\n\temail: t.String()\n});"
    ));
    assert!(controller.contains("new Elysia({ prefix: \"/userAccounts\" })"));

    let types = read(&root, "src/types.ts");
    assert!(types.contains("interface UserAccounts { id: string; email?: string; }"));
    assert!(types.contains("\tuser_accounts: UserAccounts;\n"));

    let index = read(&root, "src/routes/index.ts");
    assert!(index.contains("import userAccountsRouter from \"./userAccounts/controller\";"));
}

#[tokio::test]
async fn test_static_tree_and_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("shop_api");

    generator(&root)
        .generate(&SchemaSet::new(vec![simple_table("orders")]))
        .await
        .unwrap();

    assert!(root.join("tsconfig.json").is_file());
    assert!(root.join(".gitignore").is_file());
    assert!(root.join("src/index.ts").is_file());
    assert!(read(&root, "src/db.ts").contains("new Kysely<Database>"));

    let manifest: serde_json::Value = serde_json::from_str(&read(&root, "package.json")).unwrap();
    assert_eq!(manifest["name"], "shop-api");
    assert_eq!(manifest["dependencies"]["elysia"], "latest");
    assert_eq!(manifest["dependencies"]["kysely"], "^0.27.4");
}

#[tokio::test]
async fn test_non_empty_destination_is_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    fs::write(root.join("notes.txt"), "keep me").unwrap();

    let err = generator(&root)
        .generate(&SchemaSet::new(vec![user_accounts()]))
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::DestinationNotEmpty { .. }));
    assert!(err.is_precondition());

    let entries: Vec<PathBuf> = fs::read_dir(&root)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(entries, vec![root.join("notes.txt")]);
    assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), "keep me");
}

#[tokio::test]
async fn test_failure_on_third_table_removes_destination() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("api");

    let schema = SchemaSet::new(vec![
        simple_table("customers"),
        simple_table("orders"),
        simple_table(&overlong_name()),
        simple_table("order_items"),
        simple_table("products"),
    ]);

    let err = generator(&root).generate(&schema).await.unwrap_err();

    assert!(matches!(err, ScaffoldError::CreateDir { .. }));
    assert!(!err.is_precondition());
    assert!(!root.exists());
}

#[tokio::test]
async fn test_failure_removes_dot_suffixed_destination() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("api");
    fs::create_dir(&root).unwrap();

    let schema = SchemaSet::new(vec![simple_table("orders"), simple_table(&overlong_name())]);
    let err = generator(&root.join(".")).generate(&schema).await.unwrap_err();

    assert!(!err.is_precondition());
    assert!(!root.exists());
}

#[tokio::test]
async fn test_path_like_table_name_is_rejected_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("work/api");
    let schema = SchemaSet::from_json_str(
        r#"{ "../../../escaped": { "columns": [
            { "column_name": "id", "data_type": "uuid", "is_nullable": "NO" }
        ] } }"#,
    )
    .unwrap();

    let err = generator(&root).generate(&schema).await.unwrap_err();

    assert!(matches!(err, ScaffoldError::Schema(_)));
    assert!(!root.exists());
    assert!(!temp_dir.path().join("work/escaped").exists());
    assert!(!temp_dir.path().join("escaped").exists());
}

#[tokio::test]
async fn test_index_mounts_tables_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("api");

    generator(&root)
        .generate(&SchemaSet::new(vec![
            simple_table("orders"),
            simple_table("order_items"),
        ]))
        .await
        .unwrap();

    let index = read(&root, "src/routes/index.ts");
    let import_orders = index.find("import ordersRouter").unwrap();
    let import_items = index.find("import orderItemsRouter").unwrap();
    let use_orders = index.find(".use(ordersRouter)").unwrap();
    let use_items = index.find(".use(orderItemsRouter)").unwrap();

    assert!(import_orders < import_items);
    assert!(import_items < use_orders);
    assert!(use_orders < use_items);
    assert!(root.join("src/routes/orderItems/controller.ts").is_file());
}

#[tokio::test]
async fn test_express_stack() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("api");
    let table = TableSchema::new(
        "line_items",
        vec![
            ColumnSchema::new("id", "uuid", false),
            ColumnSchema::new("quantity", "integer", false),
            ColumnSchema::new("shipped_at", "timestamp with time zone", true),
        ],
    );

    express_generator(&root)
        .generate(&SchemaSet::new(vec![table]))
        .await
        .unwrap();

    let controller = read(&root, "src/routes/lineItems/controller.ts");
    assert!(controller.contains(
        "export const lineItemsValidationRules = {\n\
         \tid: { isString: true },\n\
         \tquantity: { isInt: true },\n\
         \tshippedAt: { isISO8601: true }\n\
         };"
    ));
    assert!(controller.contains("from \"express-validator\""));

    let index = read(&root, "src/routes/index.ts");
    assert!(index.contains(".use(\"/lineItems\", lineItemsRouter)"));

    let manifest = read(&root, "package.json");
    assert!(manifest.contains("\"express-validator\""));
    assert!(!manifest.contains("\"elysia\""));
}

#[tokio::test]
async fn test_table_without_columns() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("api");

    generator(&root)
        .generate(&SchemaSet::new(vec![TableSchema::new("audit_log", vec![])]))
        .await
        .unwrap();

    let controller = read(&root, "src/routes/auditLog/controller.ts");
    assert!(controller.contains("export const auditLogSchema = t.Object({\n\t\n});"));
    assert!(read(&root, "src/types.ts").contains("export interface AuditLog { }"));
}

#[tokio::test]
async fn test_colliding_route_names_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("api");

    let err = generator(&root)
        .generate(&SchemaSet::new(vec![
            simple_table("user_accounts"),
            simple_table("userAccounts"),
        ]))
        .await
        .unwrap_err();

    assert!(matches!(err, ScaffoldError::Schema(_)));
    assert!(err.is_precondition());
    assert!(!root.exists());
}

#[tokio::test]
async fn test_non_identifier_columns_are_quoted() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("api");
    let table = TableSchema::new(
        "logins",
        vec![
            ColumnSchema::new("id", "uuid", false),
            ColumnSchema::new("2fa", "boolean", true),
        ],
    );

    generator(&root)
        .generate(&SchemaSet::new(vec![table]))
        .await
        .unwrap();

    let controller = read(&root, "src/routes/logins/controller.ts");
    assert!(controller.contains("\tid: t.String(),\n\t\"2fa\": t.Boolean()\n"));
    let types = read(&root, "src/types.ts");
    assert!(types.contains("export interface Logins { id: string; \"2fa\"?: boolean; }"));
}

#[tokio::test]
async fn test_empty_directory_destination_is_accepted() {
    let temp_dir = TempDir::new().unwrap();

    let files = generator(temp_dir.path())
        .generate(&SchemaSet::default())
        .await
        .unwrap();

    assert!(files.iter().any(|f| f.path == Path::new("src/routes/index.ts")));
    assert!(read(temp_dir.path(), "src/types.ts").contains("export interface Database {\n}\n"));
}

#[tokio::test]
async fn test_schema_file_drives_generation() {
    let temp_dir = TempDir::new().unwrap();
    let schema_path = temp_dir.path().join("schema.json");
    fs::write(
        &schema_path,
        r#"{
            "products": { "columns": [
                { "column_name": "id", "data_type": "uuid", "is_nullable": "NO" },
                { "column_name": "price", "data_type": "numeric", "is_nullable": "YES" }
            ] },
            "categories": { "columns": [] }
        }"#,
    )
    .unwrap();

    let schema = SchemaSet::from_json_file(&schema_path).await.unwrap();
    let root = temp_dir.path().join("api");
    generator(&root).generate(&schema).await.unwrap();

    let types = read(&root, "src/types.ts");
    assert!(types.contains("export interface Products { id: string; price?: number; }"));
    let products = types.find("\tproducts: Products;").unwrap();
    let categories = types.find("\tcategories: Categories;").unwrap();
    assert!(products < categories);
}
