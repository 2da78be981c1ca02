use codefirst_core::schema::app::{Multiplicity, PrimitiveType, QualifiedName};
use codefirst_core::schema::db::{self, Column, ForeignKey, Table};
use codefirst_core::schema::mapping::{Dialect, Mapping, MappingDocument};
use codefirst_core::schema::Builder;
use pretty_assertions::assert_eq;

fn qualified(name: &str) -> QualifiedName {
    QualifiedName::new("DefaultNamespace", name)
}

fn customer() -> Table {
    Table::new("CUSTOMER")
        .with_column(Column::new("ID", "INTEGER").auto_increment(true))
        .with_column(Column::new("NAME", "VARCHAR(50)").nullable(true))
        .with_primary_key(["ID"])
}

fn orders() -> Table {
    Table::new("ORDERS")
        .with_column(Column::new("ID", "INTEGER"))
        .with_column(Column::new("CUSTOMER_ID", "INTEGER"))
        .with_primary_key(["ID"])
        .with_foreign_key(ForeignKey::new(["CUSTOMER_ID"], "CUSTOMER").named("FK_ORDERS_CUSTOMER"))
}

fn schema(tables: Vec<Table>) -> db::Schema {
    db::Schema { tables }
}

#[test]
fn single_table_becomes_entity_type() {
    let db = schema(vec![customer()]);
    let generated = Builder::new().build(&db).unwrap();

    assert!(generated.warnings.is_empty());

    let customer = generated.app.entity_type(&qualified("Customer"));
    let names: Vec<_> = customer.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Id", "Name"]);
    assert_eq!(customer.key, ["Id"]);

    let id = customer.property("Id").unwrap();
    assert_eq!(id.ty, PrimitiveType::Int64);
    assert!(id.store_generated);

    let name = customer.property("Name").unwrap();
    assert_eq!(name.ty, PrimitiveType::String);
    assert_eq!(name.max_length, Some(50));
    assert!(name.nullable);

    let set = generated.app.container.entity_set_for(&customer.name).unwrap();
    assert_eq!(set.name, "Customers");
    assert_eq!(generated.app.container.name, "CustomDbContext");
}

#[test]
fn generated_document_resolves_in_both_dialects() {
    let db = schema(vec![customer(), orders()]);

    let mut resolved = vec![];
    for dialect in [Dialect::Flat, Dialect::Nested] {
        let generated = Builder::new().dialect(dialect).build(&db).unwrap();
        let xml = generated.document.to_xml().unwrap();
        let document = MappingDocument::parse(&xml).unwrap();
        assert_eq!(document.dialect, dialect);

        resolved.push(Mapping::resolve(&document, &generated.app, &db).unwrap());
    }

    assert_eq!(resolved[0], resolved[1]);

    let customer = resolved[0].entity(&qualified("Customer"));
    let columns: Vec<_> = customer
        .properties
        .iter()
        .map(|(prop, column)| (prop.as_str(), column.name.as_str()))
        .collect();
    assert_eq!(columns, [("Id", "ID"), ("Name", "NAME")]);
    assert_eq!(customer.table.name, "CUSTOMER");
}

#[test]
fn foreign_key_becomes_association() {
    let db = schema(vec![customer(), orders()]);
    let generated = Builder::new().build(&db).unwrap();
    let app = &generated.app;

    let association = app.association(&qualified("FK_ORDERS_CUSTOMER"));
    assert!(!association.is_many_to_many());

    let principal = association.end("Customer").unwrap();
    assert_eq!(principal.multiplicity, Multiplicity::One);
    let dependent = association.end("Order").unwrap();
    assert_eq!(dependent.multiplicity, Multiplicity::Many);

    let constraint = association.constraint.as_ref().unwrap();
    assert_eq!(constraint.principal_properties, ["Id"]);
    assert_eq!(constraint.dependent_properties, ["CustomerId"]);

    let customer = app.entity_type(&qualified("Customer"));
    assert_eq!(customer.navigation("Orders").unwrap().to_role, "Order");

    let order = app.entity_type(&qualified("Order"));
    assert!(order.property("CustomerId").is_some());
    assert_eq!(order.navigation("Customer").unwrap().to_role, "Customer");

    assert!(app.container.association_set("FK_ORDERS_CUSTOMER").is_some());
    assert!(generated.document.association_sets.is_empty());
}

#[test]
fn nullable_foreign_key_makes_principal_optional() {
    let orders = Table::new("ORDERS")
        .with_column(Column::new("ID", "INTEGER"))
        .with_column(Column::new("CUSTOMER_ID", "INTEGER").nullable(true))
        .with_primary_key(["ID"])
        .with_foreign_key(ForeignKey::new(["CUSTOMER_ID"], "CUSTOMER"));

    let generated = Builder::new().build(&schema(vec![customer(), orders])).unwrap();
    let association = generated.app.association(&qualified("FK_ORDERS_CUSTOMER"));

    assert_eq!(
        association.end("Customer").unwrap().multiplicity,
        Multiplicity::ZeroOrOne
    );
}

#[test]
fn shared_primary_key_is_one_to_zero_or_one() {
    let profile = Table::new("CUSTOMER_PROFILE")
        .with_column(Column::new("CUSTOMER_ID", "INTEGER"))
        .with_column(Column::new("BIO", "TEXT"))
        .with_primary_key(["CUSTOMER_ID"])
        .with_foreign_key(ForeignKey::new(["CUSTOMER_ID"], "CUSTOMER"));

    let generated = Builder::new()
        .build(&schema(vec![customer(), profile]))
        .unwrap();
    let association = generated
        .app
        .association(&qualified("FK_CUSTOMER_PROFILE_CUSTOMER"));

    assert_eq!(
        association.end("CustomerProfile").unwrap().multiplicity,
        Multiplicity::ZeroOrOne
    );

    let customer = generated.app.entity_type(&qualified("Customer"));
    assert!(customer.navigation("CustomerProfile").is_some());
}

#[test]
fn join_table_becomes_many_to_many() {
    let student = Table::new("STUDENT")
        .with_column(Column::new("ID", "INTEGER"))
        .with_primary_key(["ID"]);
    let course = Table::new("COURSE")
        .with_column(Column::new("ID", "INTEGER"))
        .with_primary_key(["ID"]);
    let enrollment = Table::new("STUDENT_COURSE")
        .with_column(Column::new("STUDENT_ID", "INTEGER"))
        .with_column(Column::new("COURSE_ID", "INTEGER"))
        .with_primary_key(["STUDENT_ID", "COURSE_ID"])
        .with_foreign_key(ForeignKey::new(["STUDENT_ID"], "STUDENT"))
        .with_foreign_key(ForeignKey::new(["COURSE_ID"], "COURSE"));

    let db = schema(vec![student, course, enrollment]);
    let generated = Builder::new().build(&db).unwrap();
    let app = &generated.app;

    assert_eq!(app.entity_types().len(), 2);

    let association = app.association(&qualified("StudentCourse"));
    assert!(association.is_many_to_many());
    assert!(association.constraint.is_none());

    let student = app.entity_type(&qualified("Student"));
    assert_eq!(student.navigation("Courses").unwrap().to_role, "Course");
    let course = app.entity_type(&qualified("Course"));
    assert_eq!(course.navigation("Students").unwrap().to_role, "Student");

    let mapping = Mapping::resolve(&generated.document, app, &db).unwrap();
    assert_eq!(mapping.many_to_many.len(), 1);

    let join = mapping
        .get_many_to_many(&qualified("StudentCourse"))
        .unwrap();
    assert_eq!(join.table.name, "STUDENT_COURSE");
    assert_eq!(join.ends.len(), 2);
    assert_eq!(
        join.end("Student").unwrap().properties["Id"].name,
        "STUDENT_ID"
    );
    assert_eq!(
        join.end("Course").unwrap().properties["Id"].name,
        "COURSE_ID"
    );
}

#[test]
fn self_reference_gets_distinct_roles() {
    let employee = Table::new("EMPLOYEE")
        .with_column(Column::new("ID", "INTEGER"))
        .with_column(Column::new("MANAGER_ID", "INTEGER").nullable(true))
        .with_primary_key(["ID"])
        .with_foreign_key(ForeignKey::new(["MANAGER_ID"], "EMPLOYEE").named("FK_MANAGER"));

    let generated = Builder::new().build(&schema(vec![employee])).unwrap();
    let association = generated.app.association(&qualified("FK_MANAGER"));

    let roles: Vec<_> = association.ends.iter().map(|end| end.role.as_str()).collect();
    assert_eq!(roles, ["Employee", "Employee1"]);

    let employee = generated.app.entity_type(&qualified("Employee"));
    let navigations: Vec<_> = employee
        .navigations
        .iter()
        .map(|nav| nav.name.as_str())
        .collect();
    assert_eq!(navigations, ["Employees", "Employee1"]);
}

#[test]
fn names_are_made_unique() {
    let note = Table::new("NOTE")
        .with_column(Column::new("ID", "INTEGER"))
        .with_column(Column::new("NOTE", "TEXT"))
        .with_primary_key(["ID"]);
    let notes = Table::new("NOTES")
        .with_column(Column::new("ID", "INTEGER"))
        .with_primary_key(["ID"]);

    let generated = Builder::new().build(&schema(vec![note, notes])).unwrap();

    let note = generated.app.entity_type(&qualified("Note"));
    assert!(note.property("Note1").is_some());
    assert!(generated.app.get_entity_type(&qualified("Note1")).is_some());
}

#[test]
fn unusable_tables_and_columns_are_skipped_with_warnings() {
    let log = Table::new("AUDIT_LOG").with_column(Column::new("MESSAGE", "TEXT"));
    let shape = Table::new("SHAPE")
        .with_column(Column::new("ID", "INTEGER"))
        .with_column(Column::new("OUTLINE", "SDO_GEOMETRY"))
        .with_primary_key(["ID"]);
    let blob_keyed = Table::new("BLOB_KEYED")
        .with_column(Column::new("ID", "SDO_GEOMETRY"))
        .with_primary_key(["ID"]);

    let generated = Builder::new()
        .build(&schema(vec![log, shape, blob_keyed]))
        .unwrap();

    let names: Vec<_> = generated.app.entity_types().map(|e| e.name()).collect();
    assert_eq!(names, ["Shape"]);

    let shape = generated.app.entity_type(&qualified("Shape"));
    assert!(shape.property("Outline").is_none());

    let tables: Vec<_> = generated
        .warnings
        .iter()
        .map(|w| w.table.as_deref().unwrap())
        .collect();
    assert_eq!(tables, ["AUDIT_LOG", "SHAPE", "BLOB_KEYED"]);
}

#[test]
fn foreign_key_to_excluded_table_is_a_warning() {
    let log = Table::new("AUDIT_LOG").with_column(Column::new("ID", "INTEGER"));
    let entry = Table::new("ENTRY")
        .with_column(Column::new("ID", "INTEGER"))
        .with_column(Column::new("LOG_ID", "INTEGER"))
        .with_primary_key(["ID"])
        .with_foreign_key(ForeignKey::new(["LOG_ID"], "AUDIT_LOG").referencing(["ID"]));

    let generated = Builder::new().build(&schema(vec![log, entry])).unwrap();

    assert!(generated.app.associations().len() == 0);
    assert!(generated
        .warnings
        .iter()
        .any(|w| w.table.as_deref() == Some("ENTRY")));
}

#[test]
fn configured_names_flow_into_the_model() {
    let generated = Builder::new()
        .namespace("Shop")
        .container_name("ShopContext")
        .build(&schema(vec![customer()]))
        .unwrap();

    assert!(generated
        .app
        .get_entity_type(&QualifiedName::new("Shop", "Customer"))
        .is_some());
    assert_eq!(generated.app.container.name, "ShopContext");
    assert_eq!(
        generated.document.storage_container.as_deref(),
        Some("ShopContextStoreContainer")
    );
}
