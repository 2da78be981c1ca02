/// Store objects that discovery must leave out.
///
/// The default excludes the bookkeeping tables that code-first frameworks
/// create in the database they manage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFilter {
    excluded_tables: Vec<String>,
}

impl StoreFilter {
    /// A filter that excludes nothing.
    pub fn none() -> StoreFilter {
        StoreFilter {
            excluded_tables: vec![],
        }
    }

    /// Also exclude the table with exactly this name.
    pub fn exclude(mut self, table: impl Into<String>) -> StoreFilter {
        self.excluded_tables.push(table.into());
        self
    }

    pub fn excludes(&self, table: &str) -> bool {
        self.excluded_tables.iter().any(|name| name == table)
    }

    pub fn excluded_tables(&self) -> &[String] {
        &self.excluded_tables
    }
}

impl Default for StoreFilter {
    fn default() -> Self {
        StoreFilter::none()
            .exclude("EdmMetadata")
            .exclude("__MigrationHistory")
    }
}
