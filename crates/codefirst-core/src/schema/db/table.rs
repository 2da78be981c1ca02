use super::{Column, ForeignKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A database table (a store entity set)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Name of the table
    pub name: String,

    /// Owning schema, when the store has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// The table's columns
    pub columns: Vec<Column>,

    /// Primary key column names, in key order
    #[serde(default)]
    pub primary_key: Vec<String>,

    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

/// Uniquely identifies a table within a [`Schema`](super::Schema)
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct TableId(pub usize);

impl Table {
    pub fn new(name: impl Into<String>) -> Table {
        Table {
            name: name.into(),
            owner: None,
            columns: vec![],
            primary_key: vec![],
            foreign_keys: vec![],
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key.iter().any(|name| name == column)
    }

    /// True if the column takes part in any foreign key of this table.
    pub fn is_foreign_key(&self, column: &str) -> bool {
        self.foreign_keys
            .iter()
            .any(|fk| fk.columns.iter().any(|name| name == column))
    }

    pub fn with_column(mut self, column: Column) -> Table {
        self.columns.push(column);
        self
    }

    pub fn with_primary_key<I, S>(mut self, columns: I) -> Table
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_foreign_key(mut self, fk: ForeignKey) -> Table {
        self.foreign_keys.push(fk);
        self
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
