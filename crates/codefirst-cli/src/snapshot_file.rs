use anyhow::{bail, Context, Result};
use codefirst::{Discovery, StoreFilter, StoreProvider};
use codefirst_core::schema::db::Schema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const SNAPSHOT_FILE_VERSION: u32 = 1;

/// Snapshot file containing a discovered store schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Snapshot file format version
    version: u32,

    /// The store schema
    pub schema: Schema,
}

impl SnapshotFile {
    /// Create a new snapshot file with the given schema
    pub fn new(schema: Schema) -> Self {
        Self {
            version: SNAPSHOT_FILE_VERSION,
            schema,
        }
    }

    /// Load a snapshot file from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot `{}`", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("parsing snapshot `{}`", path.display()))
    }

    /// Save the snapshot file to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents = toml::to_string(self)?;
        std::fs::write(path.as_ref(), contents)?;
        Ok(())
    }
}

impl FromStr for SnapshotFile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let file: SnapshotFile = toml::from_str(s)?;

        // Validate version
        if file.version != SNAPSHOT_FILE_VERSION {
            bail!(
                "Unsupported snapshot file version: {}. Expected version {}",
                file.version,
                SNAPSHOT_FILE_VERSION
            );
        }

        Ok(file)
    }
}

impl fmt::Display for SnapshotFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents = toml::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&contents)
    }
}

impl StoreProvider for SnapshotFile {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn discover(&self, filter: &StoreFilter) -> codefirst::Result<Discovery> {
        let tables = self
            .schema
            .tables
            .iter()
            .filter(|table| !filter.excludes(&table.name))
            .cloned()
            .collect();

        Ok(Discovery::new(Schema { tables }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codefirst_core::schema::db::{Column, ForeignKey, Table};
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        Schema {
            tables: vec![
                Table::new("CUSTOMER")
                    .with_column(Column::new("ID", "INTEGER").auto_increment(true))
                    .with_column(Column::new("NAME", "VARCHAR2(50)").nullable(true))
                    .with_primary_key(["ID"]),
                Table::new("ORDERS")
                    .with_column(Column::new("ID", "INTEGER"))
                    .with_column(Column::new("CUSTOMER_ID", "INTEGER"))
                    .with_primary_key(["ID"])
                    .with_foreign_key(
                        ForeignKey::new(["CUSTOMER_ID"], "CUSTOMER").named("FK_ORDERS_CUSTOMER"),
                    ),
            ],
        }
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.toml");

        SnapshotFile::new(schema()).save(&path).unwrap();
        let loaded = SnapshotFile::load(&path).unwrap();

        assert_eq!(loaded.schema, schema());
    }

    #[test]
    fn hand_written_snapshot() {
        let file: SnapshotFile = r#"
            version = 1

            [[schema.tables]]
            name = "CUSTOMER"
            primary_key = ["ID"]

            [[schema.tables.columns]]
            name = "ID"
            type = "NUMBER(10)"

            [[schema.tables.columns]]
            name = "NAME"
            type = "VARCHAR2(50)"
            nullable = true
        "#
        .parse()
        .unwrap();

        assert_eq!(
            file.schema.tables,
            vec![Table::new("CUSTOMER")
                .with_column(Column::new("ID", "NUMBER(10)"))
                .with_column(Column::new("NAME", "VARCHAR2(50)").nullable(true))
                .with_primary_key(["ID"])]
        );
    }

    #[test]
    fn unsupported_version() {
        let err = "version = 2\n[schema]\n".parse::<SnapshotFile>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported snapshot file version: 2. Expected version 1"
        );
    }

    #[test]
    fn discover_leaves_out_excluded_tables() {
        let mut schema = schema();
        schema.tables.push(
            Table::new("EdmMetadata")
                .with_column(Column::new("Id", "INTEGER"))
                .with_primary_key(["Id"]),
        );

        let discovery = SnapshotFile::new(schema)
            .discover(&StoreFilter::default())
            .unwrap();

        let names: Vec<_> = discovery
            .schema
            .tables
            .iter()
            .map(|table| table.name.as_str())
            .collect();
        assert_eq!(names, ["CUSTOMER", "ORDERS"]);
        assert!(discovery.errors.is_empty());
    }
}
