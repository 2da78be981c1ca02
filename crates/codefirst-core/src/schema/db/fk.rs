use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name, when the store reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Columns of the owning table, in constraint order.
    pub columns: Vec<String>,

    /// Name of the referenced table.
    pub references: String,

    /// Referenced columns, in constraint order. Empty means the referenced
    /// table's primary key.
    #[serde(default)]
    pub referenced_columns: Vec<String>,
}

impl ForeignKey {
    pub fn new<I, S>(columns: I, references: impl Into<String>) -> ForeignKey
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ForeignKey {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
            references: references.into(),
            referenced_columns: vec![],
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> ForeignKey {
        self.name = Some(name.into());
        self
    }

    pub fn referencing<I, S>(mut self, columns: I) -> ForeignKey
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referenced_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}
