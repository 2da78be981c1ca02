use super::{SchemaError, Schema, Table};
use std::collections::HashSet;

impl Schema {
    /// Structural checks every store provider's output must pass before a
    /// conceptual model is derived from it.
    pub(crate) fn verify(&self) -> Vec<SchemaError> {
        let mut errors = vec![];
        let mut names = HashSet::new();

        for table in &self.tables {
            if !names.insert(table.name.as_str()) {
                errors.push(SchemaError::error(&table.name, "duplicate table name"));
            }

            Verify {
                schema: self,
                table,
                errors: &mut errors,
            }
            .verify();
        }

        errors
    }
}

struct Verify<'a> {
    schema: &'a Schema,
    table: &'a Table,
    errors: &'a mut Vec<SchemaError>,
}

impl Verify<'_> {
    fn verify(&mut self) {
        self.verify_columns();
        self.verify_primary_key();
        self.verify_foreign_keys();
    }

    fn verify_columns(&mut self) {
        let table = self.table;

        if table.columns.is_empty() {
            self.error("table has no columns".to_string());
        }

        let mut names = HashSet::new();
        for column in &table.columns {
            if !names.insert(column.name.as_str()) {
                self.error(format!("duplicate column `{}`", column.name));
            }
        }
    }

    fn verify_primary_key(&mut self) {
        let table = self.table;

        for name in &table.primary_key {
            if table.column(name).is_none() {
                self.error(format!("primary key column `{name}` does not exist"));
            }
        }
    }

    fn verify_foreign_keys(&mut self) {
        let (schema, table) = (self.schema, self.table);

        for fk in &table.foreign_keys {
            let fk_name = fk.name.as_deref().unwrap_or("<unnamed>");

            if fk.columns.is_empty() {
                self.error(format!("foreign key `{fk_name}` has no columns"));
                continue;
            }

            for name in &fk.columns {
                if table.column(name).is_none() {
                    self.error(format!(
                        "foreign key `{fk_name}` uses column `{name}` which does not exist"
                    ));
                }
            }

            let Some(target) = schema.table_by_name(&fk.references) else {
                self.errors.push(SchemaError::warning(
                    &table.name,
                    format!(
                        "foreign key `{fk_name}` references table `{}` which was not discovered; the relationship was excluded",
                        fk.references
                    ),
                ));
                continue;
            };

            let referenced = if fk.referenced_columns.is_empty() {
                &target.primary_key
            } else {
                &fk.referenced_columns
            };

            if referenced.len() != fk.columns.len() {
                self.error(format!(
                    "foreign key `{fk_name}` has {} columns but references {}",
                    fk.columns.len(),
                    referenced.len()
                ));
                continue;
            }

            for name in referenced {
                if target.column(name).is_none() {
                    self.error(format!(
                        "foreign key `{fk_name}` references column `{}.{name}` which does not exist",
                        target.name
                    ));
                }
            }
        }
    }

    fn error(&mut self, message: String) {
        self.errors
            .push(SchemaError::error(&self.table.name, message));
    }
}
