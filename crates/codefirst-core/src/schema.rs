pub mod app;

pub mod builder;
pub use builder::Builder;

pub mod db;

pub mod mapping;
use mapping::Mapping;

mod name;
pub use name::{pascal_case, Name};

use crate::Result;
use app::QualifiedName;
use db::Table;
use mapping::MappingDocument;

/// A fully reconciled schema: the store model, the conceptual model derived
/// from it, and the resolved mapping between the two.
#[derive(Debug)]
pub struct Schema {
    /// Conceptual (object model) schema
    pub app: app::Schema,

    /// Store (database) schema
    pub db: db::Schema,

    /// Maps the conceptual schema onto the store schema
    pub mapping: Mapping,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Reconciles the two models through `document` and bundles the result.
    pub fn resolve(db: db::Schema, app: app::Schema, document: &MappingDocument) -> Result<Schema> {
        let mapping = Mapping::resolve(document, &app, &db)?;
        Ok(Schema { app, db, mapping })
    }

    /// Returns the resolved mapping for the given entity type.
    ///
    /// # Panics
    ///
    /// Panics if the entity type is not part of the conceptual model.
    pub fn mapping_for(&self, entity_type: &QualifiedName) -> &mapping::EntityMapping {
        self.mapping.entity(entity_type)
    }

    /// Returns the table backing the given entity type.
    pub fn table_for(&self, entity_type: &QualifiedName) -> &Table {
        self.db.table(self.mapping.entity(entity_type).table.id)
    }
}
