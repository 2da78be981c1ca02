use super::Error;

/// Error when a template cannot render the host it was given.
#[derive(Debug)]
pub(super) struct TemplateError {
    template: Box<str>,
    message: Box<str>,
}

impl std::error::Error for TemplateError {}

impl core::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} template failed: {}", self.template, self.message)
    }
}

impl Error {
    /// Creates a template error for the named template.
    pub fn template(template: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Template(TemplateError {
            template: template.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a template error.
    pub fn is_template(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Template(_)))
    }
}
