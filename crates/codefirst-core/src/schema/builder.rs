mod association;
mod entity;

mod pluralize;
pub use pluralize::{EnglishPluralizer, PluralizationService};

use super::app::{self, EntityContainer, QualifiedName};
use super::db::{self, SchemaError, TableId};
use super::mapping::{Dialect, MappingDocument};
use crate::Result;
use indexmap::{IndexMap, IndexSet};

/// Derives the conceptual model and its mapping document from a store
/// schema.
#[derive(Debug)]
pub struct Builder {
    /// Namespace qualifying entity and association type names
    namespace: String,

    /// Name of the entity container (the data context)
    container_name: String,

    /// Dialect the mapping document is written in
    dialect: Dialect,

    pluralizer: Box<dyn PluralizationService>,
}

/// Output of [`Builder::build`].
#[derive(Debug)]
pub struct Generated {
    pub app: app::Schema,

    pub document: MappingDocument,

    /// Store objects left out of the model, and why
    pub warnings: Vec<SchemaError>,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    builder: &'a Builder,

    db: &'a db::Schema,

    /// Tables that become entity types, with their naming decisions
    entities: IndexMap<TableId, EntityTable>,

    /// Tables that become many-to-many associations
    join_tables: Vec<TableId>,

    entity_types: IndexMap<QualifiedName, app::EntityType>,

    associations: IndexMap<QualifiedName, app::AssociationType>,

    container: EntityContainer,

    document: MappingDocument,

    /// Entity, set and association names handed out so far
    type_names: IndexSet<String>,
    set_names: IndexSet<String>,

    warnings: Vec<SchemaError>,
}

/// Naming decisions for a table mapped to an entity type.
#[derive(Debug)]
struct EntityTable {
    entity_type: QualifiedName,

    entity_set: String,

    /// Column name → property, for every mapped column
    columns: IndexMap<String, app::Property>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            namespace: "DefaultNamespace".to_string(),
            container_name: "CustomDbContext".to_string(),
            dialect: Dialect::Nested,
            pluralizer: Box::new(EnglishPluralizer),
        }
    }

    pub fn namespace(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.namespace = namespace.into();
        self
    }

    pub fn container_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.container_name = name.into();
        self
    }

    pub fn dialect(&mut self, dialect: Dialect) -> &mut Self {
        self.dialect = dialect;
        self
    }

    pub fn pluralizer(&mut self, pluralizer: impl PluralizationService + 'static) -> &mut Self {
        self.pluralizer = Box::new(pluralizer);
        self
    }

    pub fn build(&self, db: &db::Schema) -> Result<Generated> {
        let mut document = MappingDocument::new(self.dialect);
        document.storage_container = Some(format!("{}StoreContainer", self.container_name));
        document.cdm_container = Some(self.container_name.clone());

        let mut builder = BuildSchema {
            builder: self,
            db,
            entities: IndexMap::new(),
            join_tables: vec![],
            entity_types: IndexMap::new(),
            associations: IndexMap::new(),
            container: EntityContainer {
                name: self.container_name.clone(),
                entity_sets: vec![],
                association_sets: vec![],
            },
            document,
            type_names: IndexSet::new(),
            set_names: IndexSet::new(),
            warnings: vec![],
        };

        // Decide which tables take part in the model at all, then split them
        // into entity tables and join tables. Entity types are named before
        // any association is built so foreign keys can refer to tables
        // declared later.
        let candidates = builder.candidate_tables();
        builder.build_entity_types(&candidates);

        let entity_tables: Vec<_> = builder.entities.keys().copied().collect();
        for id in entity_tables {
            builder.build_foreign_key_associations(id);
        }

        for id in builder.join_tables.clone() {
            builder.build_many_to_many(id);
        }

        tracing::debug!(
            entity_types = builder.entity_types.len(),
            associations = builder.associations.len(),
            warnings = builder.warnings.len(),
            "built conceptual model"
        );

        Ok(Generated {
            app: app::Schema {
                namespace: self.namespace.clone(),
                container: builder.container,
                entity_types: builder.entity_types,
                associations: builder.associations,
            },
            document: builder.document,
            warnings: builder.warnings,
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildSchema<'_> {
    fn qualify(&self, name: &str) -> QualifiedName {
        QualifiedName::new(&self.builder.namespace, name)
    }

    fn warn(&mut self, table: &db::Table, message: String) {
        self.warnings.push(SchemaError::warning(&table.name, message));
    }
}

/// Hands out `base`, or `base` with the smallest numeric suffix that is not
/// taken yet, and marks it taken.
fn claim(taken: &mut IndexSet<String>, base: &str) -> String {
    let name = unique_name(base, |candidate| taken.contains(candidate));
    taken.insert(name.clone());
    name
}

/// `base` if `is_taken` rejects it, otherwise `base1`, `base2`, ...
pub(crate) fn unique_name(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }

    (1..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
