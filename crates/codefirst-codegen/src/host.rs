use codefirst_core::schema::app::{self, QualifiedName};
use codefirst_core::schema::mapping::{ColumnBinding, Mapping, ManyToManyMapping, TableBinding};
use codefirst_core::{err, Error};
use indexmap::IndexMap;
use std::{fmt, str::FromStr};

/// What a render call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// One entity class per entity type
    Entity,

    /// One property-to-column configuration class per entity type
    Mapping,

    /// The data context, once per full run
    Context,
}

/// Everything a template may look at.
///
/// A host is built fresh for every render call and is never mutated; the
/// dictionaries it points to belong to the resolved mapping.
#[derive(Debug, Clone, Copy)]
pub struct Host<'a> {
    pub kind: Kind,

    /// Set for [`Kind::Entity`] and [`Kind::Mapping`]
    pub entity_type: Option<&'a app::EntityType>,

    /// The conceptual model, including its entity container
    pub model: &'a app::Schema,

    /// Namespace the generated type is declared in
    pub namespace: &'a str,

    pub models_namespace: &'a str,

    pub mapping_namespace: &'a str,

    pub framework_version: &'a FrameworkVersion,

    /// Table backing `entity_type`
    pub table: Option<&'a TableBinding>,

    /// Property name → column, for `entity_type`
    pub property_columns: Option<&'a IndexMap<String, ColumnBinding>>,

    pub many_to_many: &'a IndexMap<QualifiedName, ManyToManyMapping>,
}

/// Shared inputs of one generation run, from which per-target hosts are cut.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub model: &'a app::Schema,
    pub mapping: &'a Mapping,
    pub models_namespace: &'a str,
    pub mapping_namespace: &'a str,
    pub framework_version: &'a FrameworkVersion,
}

/// Dotted version tag of the targeted ORM, e.g. `6.0.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameworkVersion {
    parts: Vec<u32>,
}

impl<'a> Scope<'a> {
    pub fn entity(&self, entity_type: &'a app::EntityType) -> Host<'a> {
        self.entity_host(Kind::Entity, entity_type, self.models_namespace)
    }

    pub fn mapping(&self, entity_type: &'a app::EntityType) -> Host<'a> {
        self.entity_host(Kind::Mapping, entity_type, self.mapping_namespace)
    }

    pub fn context(&self) -> Host<'a> {
        Host {
            kind: Kind::Context,
            entity_type: None,
            model: self.model,
            namespace: self.models_namespace,
            models_namespace: self.models_namespace,
            mapping_namespace: self.mapping_namespace,
            framework_version: self.framework_version,
            table: None,
            property_columns: None,
            many_to_many: &self.mapping.many_to_many,
        }
    }

    fn entity_host(
        &self,
        kind: Kind,
        entity_type: &'a app::EntityType,
        namespace: &'a str,
    ) -> Host<'a> {
        let mapping = self.mapping.get_entity(&entity_type.name);

        Host {
            kind,
            entity_type: Some(entity_type),
            model: self.model,
            namespace,
            models_namespace: self.models_namespace,
            mapping_namespace: self.mapping_namespace,
            framework_version: self.framework_version,
            table: mapping.map(|mapping| &mapping.table),
            property_columns: mapping.map(|mapping| &mapping.properties),
            many_to_many: &self.mapping.many_to_many,
        }
    }
}

impl<'a> Host<'a> {
    /// The entity type, for kinds that require one.
    pub fn require_entity_type(&self) -> codefirst_core::Result<&'a app::EntityType> {
        self.entity_type
            .ok_or_else(|| Error::template(self.kind.to_string(), "entity type is required"))
    }
}

impl Kind {
    pub fn requires_entity_type(self) -> bool {
        matches!(self, Kind::Entity | Kind::Mapping)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Entity => "entity",
            Kind::Mapping => "mapping",
            Kind::Context => "context",
        })
    }
}

impl FrameworkVersion {
    pub fn major(&self) -> u32 {
        self.parts.first().copied().unwrap_or_default()
    }
}

impl Default for FrameworkVersion {
    fn default() -> Self {
        FrameworkVersion {
            parts: vec![6, 0, 0, 0],
        }
    }
}

impl FromStr for FrameworkVersion {
    type Err = Error;

    fn from_str(s: &str) -> codefirst_core::Result<FrameworkVersion> {
        let parts = s
            .split('.')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| err!("invalid framework version `{s}`"))?;

        if parts.is_empty() || parts.len() > 4 {
            return Err(err!("invalid framework version `{s}`"));
        }

        Ok(FrameworkVersion { parts })
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for part in &self.parts {
            write!(f, "{s}{part}")?;
            s = ".";
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_framework_version() {
        let version: FrameworkVersion = "6.0.0.0".parse().unwrap();
        assert_eq!(version.major(), 6);
        assert_eq!(version.to_string(), "6.0.0.0");
        assert_eq!(version, FrameworkVersion::default());

        let old: FrameworkVersion = "4.1".parse().unwrap();
        assert!(old < version);
        assert_eq!(old.major(), 4);
    }

    #[test]
    fn reject_bad_framework_version() {
        assert!("".parse::<FrameworkVersion>().is_err());
        assert!("six".parse::<FrameworkVersion>().is_err());
        assert!("1.2.3.4.5".parse::<FrameworkVersion>().is_err());
    }
}
