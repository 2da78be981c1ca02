use super::{ColumnBinding, TableBinding};
use crate::schema::app::QualifiedName;
use indexmap::IndexMap;

/// Binds a many-to-many association to its join table.
#[derive(Debug, Clone, PartialEq)]
pub struct ManyToManyMapping {
    pub association: QualifiedName,

    /// Association set the mapping was resolved through
    pub association_set: String,

    /// The join table
    pub table: TableBinding,

    /// One entry per association end, keyed by role, in association-set end
    /// order.
    pub ends: IndexMap<String, EndMapping>,
}

/// Join-table columns referencing one end's entity key.
#[derive(Debug, Clone, PartialEq)]
pub struct EndMapping {
    pub role: String,

    pub entity_type: QualifiedName,

    /// Key property of the end's entity type → join-table column
    pub properties: IndexMap<String, ColumnBinding>,
}

impl ManyToManyMapping {
    pub fn end(&self, role: &str) -> Option<&EndMapping> {
        self.ends.get(role)
    }
}
