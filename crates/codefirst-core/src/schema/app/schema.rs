use super::{AssociationType, EntityContainer, EntityType, QualifiedName};
use indexmap::IndexMap;

/// The conceptual model derived from the store schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Namespace qualifying every type name
    pub namespace: String,

    pub container: EntityContainer,

    pub entity_types: IndexMap<QualifiedName, EntityType>,

    pub associations: IndexMap<QualifiedName, AssociationType>,
}

impl Schema {
    /// Get an entity type by name
    ///
    /// # Panics
    ///
    /// Panics if the entity type is not part of the schema.
    pub fn entity_type(&self, name: &QualifiedName) -> &EntityType {
        self.entity_types
            .get(name)
            .unwrap_or_else(|| panic!("invalid entity type `{name}`"))
    }

    pub fn get_entity_type(&self, name: &QualifiedName) -> Option<&EntityType> {
        self.entity_types.get(name)
    }

    pub fn entity_types(&self) -> impl ExactSizeIterator<Item = &EntityType> + '_ {
        self.entity_types.values()
    }

    /// Get an association type by name
    ///
    /// # Panics
    ///
    /// Panics if the association is not part of the schema.
    pub fn association(&self, name: &QualifiedName) -> &AssociationType {
        self.associations
            .get(name)
            .unwrap_or_else(|| panic!("invalid association `{name}`"))
    }

    pub fn get_association(&self, name: &QualifiedName) -> Option<&AssociationType> {
        self.associations.get(name)
    }

    pub fn associations(&self) -> impl ExactSizeIterator<Item = &AssociationType> + '_ {
        self.associations.values()
    }

    /// Qualifies a bare type name with this schema's namespace.
    pub fn qualify(&self, name: &str) -> QualifiedName {
        QualifiedName::new(&self.namespace, name)
    }
}
