mod parse;
mod write;

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The conceptual-to-store mapping document, parsed into a dialect-neutral
/// tree.
///
/// Both dialects normalize to the same shape: in the flat dialect the entity
/// set mapping itself carries the store entity set and scalar properties, and
/// the parser lifts those into a single type mapping with a single fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingDocument {
    /// Dialect the document was read from, or will be written in
    pub dialect: Dialect,

    pub storage_container: Option<String>,

    pub cdm_container: Option<String>,

    pub entity_sets: Vec<EntitySetMapping>,

    pub association_sets: Vec<AssociationSetMapping>,
}

/// Mapping document dialect, detected from the root element's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `EntitySetMapping` carries `StoreEntitySet` and `ScalarProperty`
    /// children directly.
    Flat,

    /// Scalar properties live under
    /// `EntitySetMapping/EntityTypeMapping/MappingFragment`.
    Nested,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySetMapping {
    pub name: Option<String>,
    pub type_mappings: Vec<EntityTypeMapping>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityTypeMapping {
    /// `TypeName` attribute, e.g. `IsTypeOf(Ns.Customer)`
    pub type_name: Option<String>,
    pub fragments: Vec<MappingFragment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappingFragment {
    pub store_entity_set: Option<String>,
    pub scalar_properties: Vec<ScalarProperty>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationSetMapping {
    pub name: Option<String>,
    pub type_name: Option<String>,
    pub store_entity_set: Option<String>,
    pub end_properties: Vec<EndProperty>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndProperty {
    /// Role of the association end
    pub name: Option<String>,
    pub scalar_properties: Vec<ScalarProperty>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarProperty {
    pub name: Option<String>,
    pub column_name: Option<String>,
}

impl MappingDocument {
    pub fn new(dialect: Dialect) -> MappingDocument {
        MappingDocument {
            dialect,
            storage_container: None,
            cdm_container: None,
            entity_sets: vec![],
            association_sets: vec![],
        }
    }

    /// Nodes without a `Name` attribute never match.
    pub fn entity_set(&self, name: &str) -> Option<&EntitySetMapping> {
        self.entity_sets
            .iter()
            .find(|set| set.name.as_deref() == Some(name))
    }

    pub fn association_set(&self, name: &str) -> Option<&AssociationSetMapping> {
        self.association_sets
            .iter()
            .find(|set| set.name.as_deref() == Some(name))
    }
}

impl Dialect {
    const FLAT: &'static [&'static str] = &[
        "urn:schemas-microsoft-com:windows:storage:mapping:CS",
        "http://schemas.microsoft.com/ado/2008/09/mapping/cs",
    ];

    const NESTED: &'static str = "http://schemas.microsoft.com/ado/2009/11/mapping/cs";

    /// Detects the dialect from a root element namespace.
    pub fn from_namespace(namespace: &str) -> Option<Dialect> {
        if Dialect::FLAT.contains(&namespace) {
            Some(Dialect::Flat)
        } else if namespace == Dialect::NESTED {
            Some(Dialect::Nested)
        } else {
            None
        }
    }

    /// Namespace written for documents in this dialect.
    pub fn namespace(self) -> &'static str {
        match self {
            Dialect::Flat => Dialect::FLAT[1],
            Dialect::Nested => Dialect::NESTED,
        }
    }
}

impl Default for Dialect {
    fn default() -> Dialect {
        Dialect::Nested
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Flat => "flat",
            Dialect::Nested => "nested",
        })
    }
}

impl FromStr for Dialect {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Dialect> {
        match s {
            "flat" => Ok(Dialect::Flat),
            "nested" => Ok(Dialect::Nested),
            _ => Err(crate::err!("unknown mapping dialect `{s}`")),
        }
    }
}

impl EntitySetMapping {
    /// The reconciliation node: the first fragment of the first type mapping.
    pub fn fragment(&self) -> Option<&MappingFragment> {
        self.type_mappings
            .first()
            .and_then(|type_mapping| type_mapping.fragments.first())
    }
}

impl MappingFragment {
    pub fn scalar_property(&self, name: &str) -> Option<&ScalarProperty> {
        self.scalar_properties
            .iter()
            .find(|prop| prop.name.as_deref() == Some(name))
    }
}

impl AssociationSetMapping {
    pub fn end_property(&self, role: &str) -> Option<&EndProperty> {
        self.end_properties
            .iter()
            .find(|end| end.name.as_deref() == Some(role))
    }
}

impl ScalarProperty {
    pub fn new(name: impl Into<String>, column_name: impl Into<String>) -> ScalarProperty {
        ScalarProperty {
            name: Some(name.into()),
            column_name: Some(column_name.into()),
        }
    }
}
