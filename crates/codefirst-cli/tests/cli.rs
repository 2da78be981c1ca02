use clap::Parser;
use codefirst_cli::{Cli, SnapshotFile};
use pretty_assertions::assert_eq;
use std::path::Path;

fn run(args: &[&str]) -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(std::iter::once("codefirst").chain(args.iter().copied()))?;
    cli.run()
}

fn shop_db(path: &Path) {
    let conn = rusqlite::Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE CUSTOMER (ID INTEGER PRIMARY KEY, NAME VARCHAR(50) NOT NULL);
         CREATE TABLE ORDERS (
            ID INTEGER PRIMARY KEY,
            CUSTOMER_ID INTEGER NOT NULL REFERENCES CUSTOMER (ID)
         );",
    )
    .unwrap();
}

fn files(dir: &Path) -> Vec<String> {
    let mut files = vec![];
    for entry in walk(dir) {
        files.push(
            entry
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/"),
        );
    }
    files.sort();
    files
}

fn walk(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut paths = vec![];
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            paths.extend(walk(&path));
        } else {
            paths.push(path);
        }
    }
    paths
}

#[test]
fn generate_from_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("shop.db");
    let out = dir.path().join("out");
    shop_db(&db);

    run(&[
        "generate",
        "--data-source",
        db.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(
        files(&out),
        [
            "Customdbcontext.cs",
            "Customer.cs",
            "Mapping/CustomerMap.cs",
            "Mapping/OrderMap.cs",
            "Order.cs",
        ]
    );

    let order = std::fs::read_to_string(out.join("Order.cs")).unwrap();
    assert!(order.contains("public virtual Customer Customer { get; set; }"));
}

#[test]
fn relationships_survive_identifier_case() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("shop.db");
    let out = dir.path().join("out");

    let conn = rusqlite::Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE CUSTOMER (ID INTEGER PRIMARY KEY, NAME TEXT);
         CREATE TABLE ORDERS (
            ID INTEGER PRIMARY KEY,
            CUSTOMER_ID INTEGER NOT NULL REFERENCES customer (id)
         );",
    )
    .unwrap();
    drop(conn);

    run(&[
        "generate",
        "--data-source",
        db.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();

    let order = std::fs::read_to_string(out.join("Order.cs")).unwrap();
    assert!(order.contains("public virtual Customer Customer { get; set; }"));
}

#[test]
fn generate_with_filter_skips_context() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("shop.db");
    let out = dir.path().join("out");
    shop_db(&db);

    run(&[
        "generate",
        "--data-source",
        db.to_str().unwrap(),
        "--tables",
        "customer",
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(files(&out), ["Customer.cs", "Mapping/CustomerMap.cs"]);
}

#[test]
fn blank_tables_generates_everything() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("shop.db");
    let out = dir.path().join("out");
    shop_db(&db);

    run(&[
        "generate",
        "--data-source",
        db.to_str().unwrap(),
        "--tables",
        " \t",
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(
        files(&out),
        [
            "Customdbcontext.cs",
            "Customer.cs",
            "Mapping/CustomerMap.cs",
            "Mapping/OrderMap.cs",
            "Order.cs",
        ]
    );
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("shop.db");
    let out = dir.path().join("out");
    shop_db(&db);

    run(&[
        "generate",
        "--data-source",
        db.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--dry-run",
    ])
    .unwrap();

    assert!(!out.exists());
}

#[test]
fn snapshot_then_generate_from_it() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("shop.db");
    let snapshot = dir.path().join("snapshots/shop.toml");
    let out = dir.path().join("out");
    shop_db(&db);

    run(&[
        "snapshot",
        "--data-source",
        db.to_str().unwrap(),
        "--out",
        snapshot.to_str().unwrap(),
    ])
    .unwrap();

    let file = SnapshotFile::load(&snapshot).unwrap();
    let names: Vec<_> = file
        .schema
        .tables
        .iter()
        .map(|table| table.name.as_str())
        .collect();
    assert_eq!(names, ["CUSTOMER", "ORDERS"]);

    run(&[
        "generate",
        "--provider",
        "snapshot",
        "--data-source",
        snapshot.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--context-name",
        "ShopContext",
    ])
    .unwrap();

    assert!(out.join("Shopcontext.cs").is_file());
    assert!(out.join("Mapping/OrderMap.cs").is_file());
}

#[test]
fn config_file_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("shop.db");
    let out = dir.path().join("out");
    let config = dir.path().join("codefirst.toml");
    shop_db(&db);

    std::fs::write(
        &config,
        "models-namespace = \"Shop.Data\"\ncontext-name = \"FromConfig\"\ndialect = \"flat\"\n",
    )
    .unwrap();

    run(&[
        "generate",
        "--data-source",
        db.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--context-name",
        "FromFlag",
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();

    let context = std::fs::read_to_string(out.join("Fromflag.cs")).unwrap();
    assert!(context.contains("namespace Shop.Data\n"));
    assert!(!out.join("Fromconfig.cs").exists());
}

#[test]
fn missing_database_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("missing.db");

    let err = run(&["generate", "--data-source", db.to_str().unwrap()]).unwrap_err();

    assert!(format!("{err:#}").contains("opening SQLite database"), "{err:#}");
}

#[test]
fn data_source_is_required() {
    assert!(Cli::try_parse_from(["codefirst", "generate"]).is_err());
    assert!(Cli::try_parse_from(["codefirst", "snapshot", "--data-source", "x.db"]).is_err());
}

#[test]
fn unknown_provider_is_rejected() {
    let err = Cli::try_parse_from([
        "codefirst",
        "generate",
        "--data-source",
        "x",
        "--provider",
        "oracle",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}
