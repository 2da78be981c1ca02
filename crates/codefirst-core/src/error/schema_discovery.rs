use super::Error;
use crate::schema::db::SchemaError;

/// Error-severity problems reported while discovering the store schema.
///
/// All of them are reported together; generation never starts.
#[derive(Debug)]
pub(super) struct SchemaDiscoveryError {
    errors: Vec<SchemaError>,
}

impl std::error::Error for SchemaDiscoveryError {}

impl core::fmt::Display for SchemaDiscoveryError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("schema discovery failed: ")?;

        let mut s = "";
        for error in &self.errors {
            write!(f, "{s}{error}")?;
            s = "; ";
        }

        Ok(())
    }
}

impl Error {
    /// Creates a schema discovery error from the error-severity entries of a
    /// discovery.
    pub fn schema_discovery(errors: Vec<SchemaError>) -> Error {
        Error::from(super::ErrorKind::SchemaDiscovery(SchemaDiscoveryError {
            errors,
        }))
    }

    /// Returns `true` if this error is a schema discovery error.
    pub fn is_schema_discovery(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::SchemaDiscovery(_)))
    }
}
