use crate::schema::{app::QualifiedName, db};
use indexmap::IndexMap;

/// Binds one entity type to its table, property by property.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMapping {
    pub entity_type: QualifiedName,

    /// Entity set the mapping was resolved through
    pub entity_set: String,

    pub table: TableBinding,

    /// Property name → column. Keys are exactly the entity type's scalar
    /// properties, in declaration order.
    pub properties: IndexMap<String, ColumnBinding>,
}

/// A resolved reference to a store table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBinding {
    pub id: db::TableId,
    pub name: String,
    pub owner: Option<String>,
}

/// A resolved reference to a store column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBinding {
    pub name: String,
    pub ty: db::Type,
}

impl EntityMapping {
    pub fn column(&self, property: &str) -> Option<&ColumnBinding> {
        self.properties.get(property)
    }
}

impl TableBinding {
    pub(crate) fn new(id: db::TableId, table: &db::Table) -> TableBinding {
        TableBinding {
            id,
            name: table.name.clone(),
            owner: table.owner.clone(),
        }
    }
}

impl From<&db::Column> for ColumnBinding {
    fn from(column: &db::Column) -> ColumnBinding {
        ColumnBinding {
            name: column.name.clone(),
            ty: column.ty.clone(),
        }
    }
}
