use super::Type;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The store data type, as reported by the database.
    #[serde(rename = "type")]
    pub ty: Type,

    /// Whether or not the column is nullable
    #[serde(default)]
    pub nullable: bool,

    /// Maximum length for character and binary columns, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// True if the database assigns the value on insert.
    #[serde(default)]
    pub auto_increment: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: impl Into<Type>) -> Column {
        Column {
            name: name.into(),
            ty: ty.into(),
            nullable: false,
            max_length: None,
            auto_increment: false,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Column {
        self.nullable = nullable;
        self
    }

    pub fn max_length(mut self, max_length: u32) -> Column {
        self.max_length = Some(max_length);
        self
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Column {
        self.auto_increment = auto_increment;
        self
    }

    /// The declared max length, falling back to the length embedded in the
    /// store type (`VARCHAR2(50)`).
    pub fn effective_max_length(&self) -> Option<u32> {
        self.max_length.or_else(|| self.ty.length())
    }
}
