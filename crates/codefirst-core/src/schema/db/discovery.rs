use super::Schema;
use crate::{Error, Result};
use std::fmt;

/// Outcome of introspecting the store: the schema plus everything the
/// provider (or verification) found wrong with it.
#[derive(Debug, Default)]
pub struct Discovery {
    pub schema: Schema,
    pub errors: Vec<SchemaError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The schema cannot be reverse-engineered; the run is aborted.
    Error,

    /// Some store object was left out; the run continues.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub severity: Severity,

    /// Table the problem was found on, if any
    pub table: Option<String>,

    pub message: String,
}

impl Discovery {
    pub fn new(schema: Schema) -> Discovery {
        Discovery {
            schema,
            errors: vec![],
        }
    }

    pub fn push(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    /// Verifies the discovered schema and splits out the problems.
    ///
    /// Error-severity entries, whether reported by the provider or found by
    /// verification, are aggregated into one [`Error::schema_discovery`].
    /// Warnings are logged and handed back alongside the schema.
    pub fn check(self) -> Result<(Schema, Vec<SchemaError>)> {
        let Discovery { schema, mut errors } = self;
        errors.extend(schema.verify());

        let (errors, warnings): (Vec<_>, Vec<_>) =
            errors.into_iter().partition(SchemaError::is_error);

        for warning in &warnings {
            tracing::warn!(table = warning.table.as_deref(), "{}", warning.message);
        }

        if !errors.is_empty() {
            return Err(Error::schema_discovery(errors));
        }

        Ok((schema, warnings))
    }
}

impl SchemaError {
    pub fn error(table: impl Into<String>, message: impl Into<String>) -> SchemaError {
        SchemaError {
            severity: Severity::Error,
            table: Some(table.into()),
            message: message.into(),
        }
    }

    pub fn warning(table: impl Into<String>, message: impl Into<String>) -> SchemaError {
        SchemaError {
            severity: Severity::Warning,
            table: Some(table.into()),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}: {}", table, self.message),
            None => f.write_str(&self.message),
        }
    }
}
