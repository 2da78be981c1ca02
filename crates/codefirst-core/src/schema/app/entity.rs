use super::{PrimitiveType, QualifiedName};

/// An entity type of the conceptual model.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityType {
    /// Uniquely identifies the entity type within the schema
    pub name: QualifiedName,

    /// Scalar properties, in store column order
    pub properties: Vec<Property>,

    /// Names of the key properties, in key order
    pub key: Vec<String>,

    /// Navigation properties, one per association end this type takes part in
    pub navigations: Vec<NavigationProperty>,
}

/// A scalar property, backed by exactly one store column.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,

    pub ty: PrimitiveType,

    pub nullable: bool,

    /// Maximum length for string and binary properties
    pub max_length: Option<u32>,

    /// True if the store generates the value on insert
    pub store_generated: bool,
}

/// Navigates from one end of an association to the other.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationProperty {
    pub name: String,

    pub association: QualifiedName,

    /// Role of the end the declaring entity type plays
    pub from_role: String,

    /// Role of the end the navigation leads to
    pub to_role: String,
}

impl EntityType {
    pub fn name(&self) -> &str {
        self.name.name()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn is_key(&self, property: &str) -> bool {
        self.key.iter().any(|name| name == property)
    }

    pub fn key_properties(&self) -> impl Iterator<Item = &Property> + '_ {
        self.key.iter().filter_map(|name| self.property(name))
    }

    pub fn navigation(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigations.iter().find(|nav| nav.name == name)
    }
}

impl Property {
    pub fn new(name: impl Into<String>, ty: PrimitiveType) -> Property {
        Property {
            name: name.into(),
            ty,
            nullable: false,
            max_length: None,
            store_generated: false,
        }
    }
}
