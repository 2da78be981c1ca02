use super::Error;

/// Error when the mapping document does not agree with the conceptual or
/// store model.
///
/// An expected reconciliation node, attribute, table, column or property is
/// missing. This signals an inconsistency between the model builder and the
/// document it produced, so it is never skipped.
#[derive(Debug)]
pub(super) struct MappingResolutionError {
    message: Box<str>,
}

impl std::error::Error for MappingResolutionError {}

impl core::fmt::Display for MappingResolutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "mapping resolution failed: {}", self.message)
    }
}

impl Error {
    /// Creates a mapping resolution error.
    pub fn mapping_resolution(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MappingResolution(MappingResolutionError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a mapping resolution error.
    pub fn is_mapping_resolution(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MappingResolution(_)))
    }
}
