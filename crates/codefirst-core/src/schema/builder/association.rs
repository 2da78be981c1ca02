use super::{claim, unique_name, BuildSchema, EntityTable};
use crate::schema::app::{
    AssociationEnd, AssociationSet, AssociationSetEnd, AssociationType, Multiplicity,
    NavigationProperty, QualifiedName, ReferentialConstraint,
};
use crate::schema::db::{ForeignKey, TableId};
use crate::schema::mapping::{AssociationSetMapping, EndProperty, ScalarProperty};
use crate::schema::Name;

/// One end of an association under construction.
struct End {
    role: String,
    entity_type: QualifiedName,
    entity_set: String,
    multiplicity: Multiplicity,
}

impl BuildSchema<'_> {
    /// Turns each foreign key of an entity table into an association with a
    /// referential constraint. The table is the dependent end.
    pub(super) fn build_foreign_key_associations(&mut self, id: TableId) {
        let db = self.db;
        let table = db.table(id);

        for fk in &table.foreign_keys {
            // Unknown targets were already reported by schema verification
            let Some(principal_id) = db.table_id(&fk.references) else {
                continue;
            };

            let label = fk_label(fk);

            let (Some(dependent), Some(principal)) =
                (self.entities.get(&id), self.entities.get(&principal_id))
            else {
                self.warn(
                    table,
                    format!(
                        "foreign key {label} references `{}`, which is not mapped to an entity type; the relationship was excluded",
                        fk.references
                    ),
                );
                continue;
            };

            let principal_table = db.table(principal_id);
            let referenced = if fk.referenced_columns.is_empty() {
                &principal_table.primary_key
            } else {
                &fk.referenced_columns
            };

            let principal_nullable = fk
                .columns
                .iter()
                .any(|column| table.column(column).is_some_and(|column| column.nullable));

            let fk_is_pk = fk.columns.len() == table.primary_key.len()
                && fk.columns.iter().all(|column| table.is_primary_key(column));

            let principal_end = End {
                role: principal.entity_type.name().to_string(),
                entity_type: principal.entity_type.clone(),
                entity_set: principal.entity_set.clone(),
                multiplicity: if principal_nullable {
                    Multiplicity::ZeroOrOne
                } else {
                    Multiplicity::One
                },
            };

            let mut dependent_end = End {
                role: dependent.entity_type.name().to_string(),
                entity_type: dependent.entity_type.clone(),
                entity_set: dependent.entity_set.clone(),
                multiplicity: if fk_is_pk {
                    Multiplicity::ZeroOrOne
                } else {
                    Multiplicity::Many
                },
            };

            let (Some(dependent_properties), Some(principal_properties)) = (
                property_names(dependent, &fk.columns),
                property_names(principal, referenced),
            ) else {
                self.warn(
                    table,
                    format!(
                        "foreign key {label} uses a column that was excluded; the relationship was excluded"
                    ),
                );
                continue;
            };

            // Arity mismatches are reported by schema verification
            if dependent_properties.len() != principal_properties.len() {
                continue;
            }

            // Self-reference: roles must differ
            if dependent_end.role == principal_end.role {
                dependent_end.role.push('1');
            }

            let base = fk
                .name
                .clone()
                .unwrap_or_else(|| format!("FK_{}_{}", table.name, principal_table.name));

            let constraint = ReferentialConstraint {
                principal_role: principal_end.role.clone(),
                principal_properties,
                dependent_role: dependent_end.role.clone(),
                dependent_properties,
            };

            self.build_association(&base, principal_end, dependent_end, Some(constraint));
        }
    }

    /// Turns a join table into a many-to-many association and its
    /// association set mapping.
    pub(super) fn build_many_to_many(&mut self, id: TableId) {
        let db = self.db;
        let table = db.table(id);

        let [left_fk, right_fk] = &table.foreign_keys[..] else {
            return;
        };

        let mut ends = vec![];
        let mut end_properties = vec![];

        for fk in [left_fk, right_fk] {
            let Some(entity) = db
                .table_id(&fk.references)
                .and_then(|target| self.entities.get(&target).map(|entity| (target, entity)))
            else {
                return;
            };
            let (target, entity) = entity;

            let target_table = db.table(target);
            let referenced = if fk.referenced_columns.is_empty() {
                &target_table.primary_key
            } else {
                &fk.referenced_columns
            };

            let mut role = entity.entity_type.name().to_string();
            if ends.iter().any(|end: &End| end.role == role) {
                role.push('1');
            }

            let scalar_properties = fk
                .columns
                .iter()
                .zip(referenced)
                .filter_map(|(column, key)| {
                    entity
                        .columns
                        .get(key)
                        .map(|prop| ScalarProperty::new(&prop.name, column))
                })
                .collect();

            end_properties.push(EndProperty {
                name: Some(role.clone()),
                scalar_properties,
            });

            ends.push(End {
                role,
                entity_type: entity.entity_type.clone(),
                entity_set: entity.entity_set.clone(),
                multiplicity: Multiplicity::Many,
            });
        }

        let [left, right]: [End; 2] = match ends.try_into() {
            Ok(ends) => ends,
            Err(_) => return,
        };

        let base = Name::new(&table.name).pascal_case();
        let base = if base.is_empty() { "Association".to_string() } else { base };

        let (name, set_name) = self.build_association(&base, left, right, None);

        self.document.association_sets.push(AssociationSetMapping {
            name: Some(set_name),
            type_name: Some(name.to_string()),
            store_entity_set: Some(table.name.clone()),
            end_properties,
        });
    }

    /// Registers the association, its association set and a navigation
    /// property on each end. Returns the association's qualified name and its
    /// set name.
    fn build_association(
        &mut self,
        base: &str,
        first: End,
        second: End,
        constraint: Option<ReferentialConstraint>,
    ) -> (QualifiedName, String) {
        let name = claim(&mut self.type_names, base);
        let set_name = claim(&mut self.set_names, &name);
        let qualified = self.qualify(&name);

        let first_nav = self.navigation_name(&second);
        let second_nav = self.navigation_name(&first);
        self.add_navigation(&first, &second, first_nav, &qualified);
        self.add_navigation(&second, &first, second_nav, &qualified);

        self.container.association_sets.push(AssociationSet {
            name: set_name.clone(),
            association: qualified.clone(),
            ends: [
                AssociationSetEnd {
                    role: first.role.clone(),
                    entity_set: first.entity_set.clone(),
                },
                AssociationSetEnd {
                    role: second.role.clone(),
                    entity_set: second.entity_set.clone(),
                },
            ],
        });

        tracing::debug!(association = %qualified, "built association");

        self.associations.insert(
            qualified.clone(),
            AssociationType {
                name: qualified.clone(),
                ends: [first.into(), second.into()],
                constraint,
            },
        );

        (qualified, set_name)
    }

    /// Plural for collection ends, the entity type name otherwise.
    fn navigation_name(&self, target: &End) -> String {
        let name = target.entity_type.name();
        if target.multiplicity.is_many() {
            self.builder.pluralizer.pluralize(name)
        } else {
            name.to_string()
        }
    }

    fn add_navigation(&mut self, from: &End, to: &End, base: String, association: &QualifiedName) {
        let Some(entity_type) = self.entity_types.get_mut(&from.entity_type) else {
            return;
        };

        let name = unique_name(&base, |candidate| {
            candidate == entity_type.name()
                || entity_type.property(candidate).is_some()
                || entity_type.navigation(candidate).is_some()
        });

        entity_type.navigations.push(NavigationProperty {
            name,
            association: association.clone(),
            from_role: from.role.clone(),
            to_role: to.role.clone(),
        });
    }
}

impl From<End> for AssociationEnd {
    fn from(end: End) -> AssociationEnd {
        AssociationEnd {
            role: end.role,
            entity_type: end.entity_type,
            multiplicity: end.multiplicity,
        }
    }
}

fn property_names(entity: &EntityTable, columns: &[String]) -> Option<Vec<String>> {
    columns
        .iter()
        .map(|column| entity.columns.get(column).map(|prop| prop.name.clone()))
        .collect()
}

fn fk_label(fk: &ForeignKey) -> String {
    match &fk.name {
        Some(name) => format!("`{name}`"),
        None => format!("({})", fk.columns.join(", ")),
    }
}
