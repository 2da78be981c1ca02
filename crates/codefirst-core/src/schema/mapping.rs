mod document;
pub use document::{
    AssociationSetMapping, Dialect, EndProperty, EntitySetMapping, EntityTypeMapping,
    MappingDocument, MappingFragment, ScalarProperty,
};

mod entity;
pub use entity::{ColumnBinding, EntityMapping, TableBinding};

mod many_to_many;
pub use many_to_many::{EndMapping, ManyToManyMapping};

mod resolve;

use super::app::QualifiedName;
use indexmap::IndexMap;

/// Defines the correspondence between conceptual entity types and store
/// tables.
///
/// The mapping is resolved once per run from the mapping document and stays
/// immutable afterwards; rendering only ever borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    /// Per-entity-type mappings, keyed by qualified entity type name. Total
    /// over the conceptual model's entity types.
    pub entities: IndexMap<QualifiedName, EntityMapping>,

    /// Join-table mappings, keyed by qualified association name. Only
    /// associations with both ends `Many` appear here.
    pub many_to_many: IndexMap<QualifiedName, ManyToManyMapping>,
}

impl Mapping {
    /// Returns the mapping for the specified entity type.
    ///
    /// # Panics
    ///
    /// Panics if the entity type is not part of the conceptual model the
    /// mapping was resolved against.
    pub fn entity(&self, entity_type: &QualifiedName) -> &EntityMapping {
        self.entities
            .get(entity_type)
            .unwrap_or_else(|| panic!("no entity mapping for `{entity_type}`"))
    }

    pub fn get_entity(&self, entity_type: &QualifiedName) -> Option<&EntityMapping> {
        self.entities.get(entity_type)
    }

    pub fn get_many_to_many(&self, association: &QualifiedName) -> Option<&ManyToManyMapping> {
        self.many_to_many.get(association)
    }
}
