use super::QualifiedName;
use std::fmt;

/// A relationship between two entity types.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationType {
    pub name: QualifiedName,

    pub ends: [AssociationEnd; 2],

    /// Set for associations expressed through foreign-key properties
    pub constraint: Option<ReferentialConstraint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationEnd {
    /// Role name, unique within the association
    pub role: String,

    pub entity_type: QualifiedName,

    pub multiplicity: Multiplicity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    One,
    ZeroOrOne,
    Many,
}

/// Principal key properties referenced by dependent foreign-key properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferentialConstraint {
    pub principal_role: String,
    pub principal_properties: Vec<String>,
    pub dependent_role: String,
    pub dependent_properties: Vec<String>,
}

impl AssociationType {
    /// True when both ends have multiplicity `Many`; such associations are
    /// realized through a join table.
    pub fn is_many_to_many(&self) -> bool {
        self.ends
            .iter()
            .all(|end| end.multiplicity == Multiplicity::Many)
    }

    pub fn end(&self, role: &str) -> Option<&AssociationEnd> {
        self.ends.iter().find(|end| end.role == role)
    }

    /// The end opposite to `role`.
    pub fn other_end(&self, role: &str) -> Option<&AssociationEnd> {
        match &self.ends {
            [a, b] if a.role == role => Some(b),
            [a, b] if b.role == role => Some(a),
            _ => None,
        }
    }
}

impl Multiplicity {
    pub fn is_many(self) -> bool {
        self == Multiplicity::Many
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Multiplicity::One => "1",
            Multiplicity::ZeroOrOne => "0..1",
            Multiplicity::Many => "*",
        })
    }
}
