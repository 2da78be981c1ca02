use super::{
    AssociationSetMapping, ColumnBinding, EndMapping, EntityMapping, ManyToManyMapping, Mapping,
    MappingDocument, MappingFragment, TableBinding,
};
use crate::schema::{app, db};
use crate::{err, Error, Result};
use indexmap::IndexMap;

struct Resolve<'a> {
    document: &'a MappingDocument,
    app: &'a app::Schema,
    db: &'a db::Schema,
}

impl Mapping {
    /// Reconciles the conceptual model with the store schema through the
    /// mapping document.
    ///
    /// Every entity type of `app` ends up with exactly one entry. Association
    /// sets whose association is not many-to-many are skipped; foreign-key
    /// associations need no join table.
    pub fn resolve(
        document: &MappingDocument,
        app: &app::Schema,
        db: &db::Schema,
    ) -> Result<Mapping> {
        let cx = Resolve { document, app, db };

        let mut entities = IndexMap::new();

        for set in &app.container.entity_sets {
            let mapping = cx
                .entity_set(set)
                .map_err(|e| e.context(err!("resolving entity set `{}`", set.name)))?;

            if entities.contains_key(&mapping.entity_type) {
                return Err(Error::mapping_resolution(format!(
                    "entity type `{}` is mapped by more than one entity set",
                    mapping.entity_type
                )));
            }

            tracing::debug!(
                entity_type = %mapping.entity_type,
                table = %mapping.table.name,
                properties = mapping.properties.len(),
                "resolved entity mapping"
            );
            entities.insert(mapping.entity_type.clone(), mapping);
        }

        for entity_type in app.entity_types() {
            if !entities.contains_key(&entity_type.name) {
                return Err(Error::mapping_resolution(format!(
                    "entity type `{}` has no entity set",
                    entity_type.name
                )));
            }
        }

        let mut many_to_many = IndexMap::new();

        for set in &app.container.association_sets {
            let association = app.get_association(&set.association).ok_or_else(|| {
                Error::mapping_resolution(format!(
                    "association set `{}` references unknown association `{}`",
                    set.name, set.association
                ))
            })?;

            if !association.is_many_to_many() {
                continue;
            }

            let mapping = cx
                .association_set(set, association)
                .map_err(|e| e.context(err!("resolving association set `{}`", set.name)))?;

            if many_to_many.contains_key(&mapping.association) {
                return Err(Error::mapping_resolution(format!(
                    "association `{}` is mapped more than once",
                    mapping.association
                )));
            }

            tracing::debug!(
                association = %mapping.association,
                table = %mapping.table.name,
                "resolved many-to-many mapping"
            );
            many_to_many.insert(mapping.association.clone(), mapping);
        }

        Ok(Mapping {
            entities,
            many_to_many,
        })
    }
}

impl Resolve<'_> {
    fn entity_set(&self, set: &app::EntitySet) -> Result<EntityMapping> {
        let entity_type = self.app.get_entity_type(&set.entity_type).ok_or_else(|| {
            Error::mapping_resolution(format!("unknown entity type `{}`", set.entity_type))
        })?;

        let set_mapping = self.document.entity_set(&set.name).ok_or_else(|| {
            Error::mapping_resolution(format!("no `EntitySetMapping` named `{}`", set.name))
        })?;

        let fragment = set_mapping.fragment().ok_or_else(|| {
            Error::mapping_resolution(format!(
                "`EntitySetMapping` `{}` has no mapping fragment",
                set.name
            ))
        })?;

        let (table_id, table) = self.store_table(fragment.store_entity_set.as_deref())?;

        let mut properties = IndexMap::new();

        for property in &entity_type.properties {
            let column = self.scalar_column(fragment, &property.name, table)?;
            properties.insert(property.name.clone(), column);
        }

        Ok(EntityMapping {
            entity_type: entity_type.name.clone(),
            entity_set: set.name.clone(),
            table: TableBinding::new(table_id, table),
            properties,
        })
    }

    fn association_set(
        &self,
        set: &app::AssociationSet,
        association: &app::AssociationType,
    ) -> Result<ManyToManyMapping> {
        let set_mapping: &AssociationSetMapping =
            self.document.association_set(&set.name).ok_or_else(|| {
                Error::mapping_resolution(format!(
                    "no `AssociationSetMapping` named `{}`",
                    set.name
                ))
            })?;

        let (table_id, table) = self.store_table(set_mapping.store_entity_set.as_deref())?;

        let mut ends = IndexMap::new();

        for set_end in &set.ends {
            let end = association.end(&set_end.role).ok_or_else(|| {
                Error::mapping_resolution(format!(
                    "association `{}` has no end `{}`",
                    association.name, set_end.role
                ))
            })?;

            let entity_type = self.app.get_entity_type(&end.entity_type).ok_or_else(|| {
                Error::mapping_resolution(format!("unknown entity type `{}`", end.entity_type))
            })?;

            let end_property = set_mapping.end_property(&set_end.role).ok_or_else(|| {
                Error::mapping_resolution(format!("no `EndProperty` named `{}`", set_end.role))
            })?;

            let mut properties = IndexMap::new();

            for scalar in &end_property.scalar_properties {
                let name = scalar.name.as_deref().ok_or_else(|| {
                    Error::mapping_resolution(format!(
                        "`ScalarProperty` in `EndProperty` `{}` has no `Name` attribute",
                        set_end.role
                    ))
                })?;

                if entity_type.property(name).is_none() {
                    return Err(Error::mapping_resolution(format!(
                        "entity type `{}` has no property `{name}`",
                        entity_type.name
                    )));
                }

                let column_name = scalar.column_name.as_deref().ok_or_else(|| {
                    Error::mapping_resolution(format!(
                        "`ScalarProperty` `{name}` has no `ColumnName` attribute"
                    ))
                })?;

                properties.insert(name.to_string(), column(table, column_name)?);
            }

            ends.insert(
                set_end.role.clone(),
                EndMapping {
                    role: set_end.role.clone(),
                    entity_type: entity_type.name.clone(),
                    properties,
                },
            );
        }

        Ok(ManyToManyMapping {
            association: association.name.clone(),
            association_set: set.name.clone(),
            table: TableBinding::new(table_id, table),
            ends,
        })
    }

    fn store_table(&self, store_entity_set: Option<&str>) -> Result<(db::TableId, &'_ db::Table)> {
        let name = store_entity_set.ok_or_else(|| {
            Error::mapping_resolution("missing `StoreEntitySet` attribute")
        })?;

        let id = self.db.table_id(name).ok_or_else(|| {
            Error::mapping_resolution(format!("no table named `{name}`"))
        })?;

        Ok((id, self.db.table(id)))
    }

    fn scalar_column(
        &self,
        fragment: &MappingFragment,
        property: &str,
        table: &db::Table,
    ) -> Result<ColumnBinding> {
        let scalar = fragment.scalar_property(property).ok_or_else(|| {
            Error::mapping_resolution(format!("no `ScalarProperty` named `{property}`"))
        })?;

        let column_name = scalar.column_name.as_deref().ok_or_else(|| {
            Error::mapping_resolution(format!(
                "`ScalarProperty` `{property}` has no `ColumnName` attribute"
            ))
        })?;

        column(table, column_name)
    }
}

fn column(table: &db::Table, name: &str) -> Result<ColumnBinding> {
    table.column(name).map(ColumnBinding::from).ok_or_else(|| {
        Error::mapping_resolution(format!(
            "table `{}` has no column `{name}`",
            table.name
        ))
    })
}
