use super::{claim, unique_name, BuildSchema, EntityTable};
use crate::schema::app::{EntitySet, EntityType, PrimitiveType, Property};
use crate::schema::db::{self, TableId};
use crate::schema::mapping::{EntitySetMapping, EntityTypeMapping, MappingFragment, ScalarProperty};
use crate::schema::Name;
use indexmap::{IndexMap, IndexSet};

/// A table whose key survived type mapping.
pub(super) struct Candidate {
    id: TableId,

    /// Index and primitive type of every mapped column
    columns: Vec<(usize, PrimitiveType)>,
}

impl BuildSchema<'_> {
    pub(super) fn candidate_tables(&mut self) -> Vec<Candidate> {
        let db = self.db;
        let mut candidates = vec![];

        'tables: for (id, table) in db.tables() {
            if table.primary_key.is_empty() {
                self.warn(table, "table has no primary key and was excluded".to_string());
                continue;
            }

            let mut columns = vec![];

            for (index, column) in table.columns.iter().enumerate() {
                match PrimitiveType::from_store(&column.ty.base(), &column.ty.args()) {
                    Some(ty) => columns.push((index, ty)),
                    None if table.is_primary_key(&column.name) => {
                        self.warn(
                            table,
                            format!(
                                "key column `{}` has unsupported type `{}`; the table was excluded",
                                column.name, column.ty
                            ),
                        );
                        continue 'tables;
                    }
                    None => self.warn(
                        table,
                        format!(
                            "column `{}` has unsupported type `{}` and was excluded",
                            column.name, column.ty
                        ),
                    ),
                }
            }

            candidates.push(Candidate { id, columns });
        }

        candidates
    }

    /// Splits candidates into join tables and entity tables, and builds an
    /// entity type for each of the latter.
    pub(super) fn build_entity_types(&mut self, candidates: &[Candidate]) {
        let db = self.db;
        let candidate_ids: IndexSet<TableId> = candidates.iter().map(|c| c.id).collect();

        let join_shaped: IndexSet<TableId> = candidates
            .iter()
            .map(|c| c.id)
            .filter(|id| self.is_join_shaped(db.table(*id), &candidate_ids))
            .collect();

        for candidate in candidates {
            let table = db.table(candidate.id);

            // A join table must link two entity tables, not other join tables
            let is_join = join_shaped.contains(&candidate.id)
                && table.foreign_keys.iter().all(|fk| {
                    db.table_id(&fk.references)
                        .is_some_and(|id| !join_shaped.contains(&id))
                });

            if is_join {
                self.join_tables.push(candidate.id);
            } else {
                self.build_entity_type(candidate);
            }
        }
    }

    /// Exactly two foreign keys to model tables, each referencing the target's
    /// primary key, and every column part of both the primary key and one of
    /// the foreign keys.
    fn is_join_shaped(&self, table: &db::Table, candidates: &IndexSet<TableId>) -> bool {
        if table.foreign_keys.len() != 2 {
            return false;
        }

        let every_column_linked = table.columns.iter().all(|column| {
            table.is_primary_key(&column.name) && table.is_foreign_key(&column.name)
        });

        every_column_linked
            && table.foreign_keys.iter().all(|fk| {
                let Some(target) = self.db.table_id(&fk.references) else {
                    return false;
                };
                let target_table = self.db.table(target);

                candidates.contains(&target)
                    && (fk.referenced_columns.is_empty()
                        || fk.referenced_columns == target_table.primary_key)
                    && fk.columns.len() == target_table.primary_key.len()
            })
    }

    fn build_entity_type(&mut self, candidate: &Candidate) {
        let db = self.db;
        let table = db.table(candidate.id);

        let base = self
            .builder
            .pluralizer
            .singularize(&Name::new(&table.name).pascal_case());
        let base = if base.is_empty() { "Entity".to_string() } else { base };

        let type_name = claim(&mut self.type_names, &base);
        let set_name = claim(
            &mut self.set_names,
            &self.builder.pluralizer.pluralize(&type_name),
        );
        let qualified = self.qualify(&type_name);

        let mut columns: IndexMap<String, Property> = IndexMap::new();

        for &(index, ty) in &candidate.columns {
            let column = &table.columns[index];

            let base = Name::new(&column.name).pascal_case();
            let base = if base.is_empty() { "Property".to_string() } else { base };

            let name = unique_name(&base, |candidate| {
                candidate == type_name || columns.values().any(|prop| prop.name == candidate)
            });

            let property = Property {
                name,
                ty,
                nullable: column.nullable,
                max_length: if ty.has_length() {
                    column.effective_max_length()
                } else {
                    None
                },
                store_generated: column.auto_increment,
            };

            columns.insert(column.name.clone(), property);
        }

        let key = table
            .primary_key
            .iter()
            .filter_map(|column| columns.get(column))
            .map(|prop| prop.name.clone())
            .collect();

        let scalar_properties = columns
            .iter()
            .map(|(column, prop)| ScalarProperty::new(&prop.name, column))
            .collect();

        self.document.entity_sets.push(EntitySetMapping {
            name: Some(set_name.clone()),
            type_mappings: vec![EntityTypeMapping {
                type_name: Some(format!("IsTypeOf({qualified})")),
                fragments: vec![MappingFragment {
                    store_entity_set: Some(table.name.clone()),
                    scalar_properties,
                }],
            }],
        });

        self.container.entity_sets.push(EntitySet {
            name: set_name.clone(),
            entity_type: qualified.clone(),
        });

        self.entity_types.insert(
            qualified.clone(),
            EntityType {
                name: qualified.clone(),
                properties: columns.values().cloned().collect(),
                key,
                navigations: vec![],
            },
        );

        self.entities.insert(
            candidate.id,
            EntityTable {
                entity_type: qualified,
                entity_set: set_name,
                columns,
            },
        );
    }
}
