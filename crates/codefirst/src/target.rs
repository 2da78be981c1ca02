use codefirst_codegen::Kind;
use codefirst_core::{Error, Result};
use std::{fs, path::PathBuf};

/// One rendered file, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTarget {
    pub kind: Kind,

    /// Destination path
    pub path: PathBuf,

    /// Rendered source text
    pub contents: String,
}

impl GenerationTarget {
    /// Writes the file, replacing any existing one.
    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, &self.contents).map_err(|err| Error::io(&self.path, err))?;

        tracing::info!(kind = %self.kind, path = %self.path.display(), "wrote file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Customer.cs");
        fs::write(&path, "stale").unwrap();

        let target = GenerationTarget {
            kind: Kind::Entity,
            path: path.clone(),
            contents: "fresh".to_string(),
        };
        target.write().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn write_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("Customer.cs");

        let target = GenerationTarget {
            kind: Kind::Entity,
            path: path.clone(),
            contents: String::new(),
        };
        let err = target.write().unwrap_err();

        assert!(err.is_io());
        assert!(err.to_string().contains("Customer.cs"), "{err}");
    }
}
