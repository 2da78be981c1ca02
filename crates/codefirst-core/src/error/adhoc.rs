/// Error built from a free-form message.
///
/// Used for failures that do not warrant a dedicated kind yet, and for
/// context added with [`err!`](crate::err).
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    pub(super) fn new(message: impl Into<String>) -> AdhocError {
        AdhocError {
            message: message.into().into(),
        }
    }

    pub(super) fn from_args(args: core::fmt::Arguments<'_>) -> AdhocError {
        match args.as_str() {
            Some(s) => AdhocError::new(s),
            None => AdhocError::new(args.to_string()),
        }
    }
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}
