mod association;
pub use association::{AssociationEnd, AssociationType, Multiplicity, ReferentialConstraint};

mod container;
pub use container::{AssociationSet, AssociationSetEnd, EntityContainer, EntitySet};

mod entity;
pub use entity::{EntityType, NavigationProperty, Property};

mod qualified_name;
pub use qualified_name::QualifiedName;

mod schema;
pub use schema::Schema;

mod ty;
pub use ty::PrimitiveType;
