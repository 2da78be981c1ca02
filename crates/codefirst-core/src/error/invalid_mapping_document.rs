use super::Error;

/// Error when the mapping document cannot be read at all.
///
/// This occurs when:
/// - The document is not well-formed XML
/// - The root element declares a namespace that is neither mapping dialect
/// - A mapping element lacks the `Name` it is looked up by
#[derive(Debug)]
pub(super) struct InvalidMappingDocument {
    message: Box<str>,
}

impl std::error::Error for InvalidMappingDocument {}

impl core::fmt::Display for InvalidMappingDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping document: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid mapping document error.
    pub fn invalid_mapping_document(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMappingDocument(
            InvalidMappingDocument {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid mapping document error.
    pub fn is_invalid_mapping_document(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidMappingDocument(_)))
    }
}
