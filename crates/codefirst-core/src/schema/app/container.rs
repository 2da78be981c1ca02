use super::QualifiedName;

/// The entity container: every set the data context exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityContainer {
    pub name: String,
    pub entity_sets: Vec<EntitySet>,
    pub association_sets: Vec<AssociationSet>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySet {
    pub name: String,
    pub entity_type: QualifiedName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationSet {
    pub name: String,
    pub association: QualifiedName,
    pub ends: [AssociationSetEnd; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationSetEnd {
    /// Role of the association end this set end binds
    pub role: String,

    /// Name of the entity set playing the role
    pub entity_set: String,
}

impl EntityContainer {
    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|set| set.name == name)
    }

    /// The entity set holding instances of the given entity type.
    pub fn entity_set_for(&self, entity_type: &QualifiedName) -> Option<&EntitySet> {
        self.entity_sets
            .iter()
            .find(|set| &set.entity_type == entity_type)
    }

    pub fn association_set(&self, name: &str) -> Option<&AssociationSet> {
        self.association_sets.iter().find(|set| set.name == name)
    }
}
