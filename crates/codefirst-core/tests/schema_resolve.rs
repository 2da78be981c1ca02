use codefirst_core::schema::app::{
    self, AssociationEnd, AssociationSet, AssociationSetEnd, AssociationType, EntityContainer,
    EntitySet, EntityType, Multiplicity, PrimitiveType, Property, QualifiedName,
};
use codefirst_core::schema::db::{self, Column, Table};
use codefirst_core::schema::mapping::{Mapping, MappingDocument};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

const NS: &str = "Shop";

fn qualified(name: &str) -> QualifiedName {
    QualifiedName::new(NS, name)
}

fn entity_type(name: &str, properties: &[&str]) -> EntityType {
    EntityType {
        name: qualified(name),
        properties: properties
            .iter()
            .map(|name| Property::new(*name, PrimitiveType::Int32))
            .collect(),
        key: vec![properties[0].to_string()],
        navigations: vec![],
    }
}

fn many_to_many(name: &str, left: &str, right: &str) -> AssociationType {
    AssociationType {
        name: qualified(name),
        ends: [left, right].map(|role| AssociationEnd {
            role: role.to_string(),
            entity_type: qualified(role),
            multiplicity: Multiplicity::Many,
        }),
        constraint: None,
    }
}

/// Customer and Tag entity types, joined by a many-to-many association, plus
/// a foreign-key style association that must be skipped.
fn model() -> app::Schema {
    let mut entity_types = IndexMap::new();
    for ty in [
        entity_type("Customer", &["Id", "Name"]),
        entity_type("Tag", &["Id"]),
    ] {
        entity_types.insert(ty.name.clone(), ty);
    }

    let mut associations = IndexMap::new();
    let tagged = many_to_many("CustomerTag", "Customer", "Tag");
    let mut owner = many_to_many("TagOwner", "Customer", "Tag");
    owner.ends[0].multiplicity = Multiplicity::One;
    associations.insert(tagged.name.clone(), tagged);
    associations.insert(owner.name.clone(), owner);

    let set_end = |role: &str, set: &str| AssociationSetEnd {
        role: role.to_string(),
        entity_set: set.to_string(),
    };

    app::Schema {
        namespace: NS.to_string(),
        container: EntityContainer {
            name: "ShopContext".to_string(),
            entity_sets: vec![
                EntitySet {
                    name: "Customers".to_string(),
                    entity_type: qualified("Customer"),
                },
                EntitySet {
                    name: "Tags".to_string(),
                    entity_type: qualified("Tag"),
                },
            ],
            association_sets: vec![
                AssociationSet {
                    name: "CustomerTag".to_string(),
                    association: qualified("CustomerTag"),
                    ends: [set_end("Customer", "Customers"), set_end("Tag", "Tags")],
                },
                AssociationSet {
                    name: "TagOwner".to_string(),
                    association: qualified("TagOwner"),
                    ends: [set_end("Customer", "Customers"), set_end("Tag", "Tags")],
                },
            ],
        },
        entity_types,
        associations,
    }
}

fn store() -> db::Schema {
    db::Schema {
        tables: vec![
            Table::new("CUSTOMER")
                .with_column(Column::new("ID", "NUMBER(9)"))
                .with_column(Column::new("NAME", "VARCHAR2(40)"))
                .with_primary_key(["ID"]),
            Table::new("TAG")
                .with_column(Column::new("ID", "NUMBER(9)"))
                .with_primary_key(["ID"]),
            Table::new("CUSTOMER_TAG")
                .with_column(Column::new("CUSTOMER_ID", "NUMBER(9)"))
                .with_column(Column::new("TAG_ID", "NUMBER(9)"))
                .with_primary_key(["CUSTOMER_ID", "TAG_ID"]),
        ],
    }
}

const ASSOCIATION_SETS: &str = r#"
    <AssociationSetMapping Name="CustomerTag" TypeName="Shop.CustomerTag" StoreEntitySet="CUSTOMER_TAG">
      <EndProperty Name="Customer">
        <ScalarProperty Name="Id" ColumnName="CUSTOMER_ID" />
      </EndProperty>
      <EndProperty Name="Tag">
        <ScalarProperty Name="Id" ColumnName="TAG_ID" />
      </EndProperty>
    </AssociationSetMapping>"#;

fn flat() -> String {
    format!(
        r#"<Mapping Space="C-S" xmlns="urn:schemas-microsoft-com:windows:storage:mapping:CS">
  <EntityContainerMapping StorageEntityContainer="ShopStore" CdmEntityContainer="ShopContext">
    <EntitySetMapping Name="Customers" StoreEntitySet="CUSTOMER">
      <ScalarProperty Name="Id" ColumnName="ID" />
      <ScalarProperty Name="Name" ColumnName="NAME" />
    </EntitySetMapping>
    <EntitySetMapping Name="Tags" StoreEntitySet="TAG">
      <ScalarProperty Name="Id" ColumnName="ID" />
    </EntitySetMapping>{ASSOCIATION_SETS}
  </EntityContainerMapping>
</Mapping>"#
    )
}

fn nested() -> String {
    format!(
        r#"<Mapping Space="C-S" xmlns="http://schemas.microsoft.com/ado/2009/11/mapping/cs">
  <EntityContainerMapping StorageEntityContainer="ShopStore" CdmEntityContainer="ShopContext">
    <EntitySetMapping Name="Customers">
      <EntityTypeMapping TypeName="IsTypeOf(Shop.Customer)">
        <MappingFragment StoreEntitySet="CUSTOMER">
          <ScalarProperty Name="Name" ColumnName="NAME" />
          <ScalarProperty Name="Id" ColumnName="ID" />
        </MappingFragment>
      </EntityTypeMapping>
    </EntitySetMapping>
    <EntitySetMapping Name="Tags">
      <EntityTypeMapping TypeName="IsTypeOf(Shop.Tag)">
        <MappingFragment StoreEntitySet="TAG">
          <ScalarProperty Name="Id" ColumnName="ID" />
        </MappingFragment>
      </EntityTypeMapping>
    </EntitySetMapping>{ASSOCIATION_SETS}
  </EntityContainerMapping>
</Mapping>"#
    )
}

fn resolve(xml: &str) -> codefirst_core::Result<Mapping> {
    let document = MappingDocument::parse(xml)?;
    Mapping::resolve(&document, &model(), &store())
}

#[test]
fn flat_and_nested_dialects_resolve_identically() {
    let flat = resolve(&flat()).unwrap();
    let nested = resolve(&nested()).unwrap();
    assert_eq!(flat, nested);
}

#[test]
fn entity_mapping_is_total_over_scalar_properties() {
    let mapping = resolve(&nested()).unwrap();
    let model = model();

    assert_eq!(mapping.entities.len(), model.entity_types().len());

    for entity_type in model.entity_types() {
        let entity = mapping.entity(&entity_type.name);
        let keys: Vec<_> = entity.properties.keys().cloned().collect();
        let props: Vec<_> = entity_type.properties.iter().map(|p| p.name.clone()).collect();
        assert_eq!(keys, props);
    }

    let customer = mapping.entity(&qualified("Customer"));
    assert_eq!(customer.table.name, "CUSTOMER");
    assert_eq!(customer.entity_set, "Customers");
    assert_eq!(customer.column("Name").unwrap().name, "NAME");
    assert_eq!(customer.column("Name").unwrap().ty.as_str(), "VARCHAR2(40)");
}

#[test]
fn only_many_to_many_associations_are_mapped() {
    let mapping = resolve(&flat()).unwrap();

    let keys: Vec<_> = mapping.many_to_many.keys().cloned().collect();
    assert_eq!(keys, [qualified("CustomerTag")]);

    let join = &mapping.many_to_many[&qualified("CustomerTag")];
    assert_eq!(join.table.name, "CUSTOMER_TAG");
    assert_eq!(join.ends.len(), 2);
    assert_eq!(join.end("Tag").unwrap().properties["Id"].name, "TAG_ID");
    assert_eq!(join.end("Tag").unwrap().entity_type, qualified("Tag"));
}

#[test]
#[should_panic(expected = "no entity mapping for `Shop.Order`")]
fn unknown_entity_lookup_panics() {
    let mapping = resolve(&flat()).unwrap();
    mapping.entity(&qualified("Order"));
}

#[test]
fn get_entity_is_none_for_unmapped_types() {
    let mapping = resolve(&flat()).unwrap();
    assert!(mapping.get_entity(&qualified("Order")).is_none());
    assert!(mapping.get_entity(&qualified("Tag")).is_some());
}

fn assert_resolution_error(xml: &str, message: &str) {
    let err = resolve(xml).unwrap_err();
    assert!(err.is_mapping_resolution(), "unexpected error: {err}");
    assert!(
        err.to_string().contains(message),
        "`{err}` does not mention `{message}`"
    );
}

#[test]
fn missing_entity_set_mapping() {
    let xml = flat().replace(r#"Name="Tags""#, r#"Name="Labels""#);
    assert_resolution_error(&xml, "no `EntitySetMapping` named `Tags`");
}

#[test]
fn missing_store_entity_set_attribute() {
    let xml = flat().replace(r#" StoreEntitySet="TAG""#, "");
    assert_resolution_error(&xml, "missing `StoreEntitySet` attribute");
}

#[test]
fn unknown_table() {
    let xml = nested().replace(r#"StoreEntitySet="TAG""#, r#"StoreEntitySet="LABEL""#);
    assert_resolution_error(&xml, "no table named `LABEL`");
}

#[test]
fn missing_scalar_property() {
    let xml = nested().replace(r#"<ScalarProperty Name="Name" ColumnName="NAME" />"#, "");
    assert_resolution_error(&xml, "no `ScalarProperty` named `Name`");
}

#[test]
fn missing_column_name_attribute() {
    let xml = nested().replace(r#"Name="Name" ColumnName="NAME""#, r#"Name="Name""#);
    assert_resolution_error(&xml, "`ScalarProperty` `Name` has no `ColumnName` attribute");
}

#[test]
fn unknown_column() {
    let xml = flat().replace(r#"ColumnName="NAME""#, r#"ColumnName="FULL_NAME""#);
    assert_resolution_error(&xml, "table `CUSTOMER` has no column `FULL_NAME`");
}

#[test]
fn missing_association_set_mapping() {
    let xml = flat().replace(ASSOCIATION_SETS, "");
    assert_resolution_error(&xml, "no `AssociationSetMapping` named `CustomerTag`");
}

#[test]
fn missing_end_property() {
    let xml = flat().replace(r#"<EndProperty Name="Tag">"#, r#"<EndProperty Name="Label">"#);
    assert_resolution_error(&xml, "no `EndProperty` named `Tag`");
}

#[test]
fn end_property_for_unknown_property() {
    let xml = flat().replace(
        r#"<ScalarProperty Name="Id" ColumnName="TAG_ID" />"#,
        r#"<ScalarProperty Name="Code" ColumnName="TAG_ID" />"#,
    );
    assert_resolution_error(&xml, "entity type `Shop.Tag` has no property `Code`");
}

#[test]
fn unnamed_entity_set_mapping_is_a_resolution_error() {
    let xml = flat().replace(r#"Name="Tags" "#, "");
    assert_resolution_error(&xml, "no `EntitySetMapping` named `Tags`");
}

#[test]
fn unnamed_scalar_property_is_a_resolution_error() {
    let xml = nested().replace(r#"Name="Name" ColumnName="NAME""#, r#"ColumnName="NAME""#);
    assert_resolution_error(&xml, "no `ScalarProperty` named `Name`");
}

#[test]
fn unnamed_end_property_is_a_resolution_error() {
    let xml = flat().replace(r#"<EndProperty Name="Tag">"#, "<EndProperty>");
    assert_resolution_error(&xml, "no `EndProperty` named `Tag`");
}

#[test]
fn unnamed_scalar_property_under_end_property() {
    let xml = flat().replace(
        r#"<ScalarProperty Name="Id" ColumnName="TAG_ID" />"#,
        r#"<ScalarProperty ColumnName="TAG_ID" />"#,
    );
    assert_resolution_error(
        &xml,
        "`ScalarProperty` in `EndProperty` `Tag` has no `Name` attribute",
    );
}

#[test]
fn unnamed_nodes_nobody_looks_up_are_ignored() {
    let extra = r#"<EntitySetMapping StoreEntitySet="AUDIT">
      <ScalarProperty ColumnName="ID" />
    </EntitySetMapping>
    <EntitySetMapping Name="Tags""#;
    let xml = flat().replace(r#"<EntitySetMapping Name="Tags""#, extra);

    let document = MappingDocument::parse(&xml).unwrap();
    assert_eq!(document.entity_sets.len(), 3);
    assert_eq!(resolve(&xml).unwrap(), resolve(&flat()).unwrap());
}

#[test]
fn errors_name_the_set_being_resolved() {
    let xml = flat().replace(r#"ColumnName="NAME""#, r#"ColumnName="FULL_NAME""#);
    let err = resolve(&xml).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("resolving entity set `Customers`: mapping resolution failed"));
}

#[test]
fn entity_type_without_entity_set() {
    let mut model = model();
    model.container.entity_sets.pop();

    let document = MappingDocument::parse(&flat()).unwrap();
    let err = Mapping::resolve(&document, &model, &store()).unwrap_err();
    assert!(err.is_mapping_resolution());
    assert_eq!(
        err.to_string(),
        "mapping resolution failed: entity type `Shop.Tag` has no entity set"
    );
}

#[test]
fn entity_type_with_two_entity_sets() {
    let mut model = model();
    model.container.entity_sets.push(EntitySet {
        name: "Tags".to_string(),
        entity_type: qualified("Tag"),
    });

    let document = MappingDocument::parse(&flat()).unwrap();
    let err = Mapping::resolve(&document, &model, &store()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "mapping resolution failed: entity type `Shop.Tag` is mapped by more than one entity set"
    );
}

#[test]
fn unsupported_dialect_fails_before_resolution() {
    let xml = flat().replace(
        "urn:schemas-microsoft-com:windows:storage:mapping:CS",
        "http://schemas.microsoft.com/ado/2006/04/mapping/cs",
    );
    let err = resolve(&xml).unwrap_err();
    assert!(err.is_invalid_mapping_document());
}
