use codefirst_core::{schema::pascal_case, Error, Result};
use std::path::{Path, PathBuf};

/// Name of the directory, under the output root, holding mapping classes.
const MAPPING_DIR: &str = "Mapping";

/// Name of the default output directory, next to the running executable.
const DEFAULT_DIR: &str = "Codes";

/// Computes where each generated file goes.
///
/// ```text
/// <root>/<Entity><ext>
/// <root>/Mapping/<Entity>Map<ext>
/// <root>/<Container><ext>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Layout {
        Layout { root: root.into() }
    }

    /// `Codes` in the directory of the running executable.
    pub fn default_root() -> Result<PathBuf> {
        let exe = std::env::current_exe().map_err(|err| Error::io("<current exe>", err))?;

        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(dir.join(DEFAULT_DIR))
    }

    pub fn mapping_dir(&self) -> PathBuf {
        self.root.join(MAPPING_DIR)
    }

    pub fn entity(&self, entity: &str, ext: &str) -> PathBuf {
        self.root.join(format!("{}{ext}", pascal_case(entity)))
    }

    pub fn mapping(&self, entity: &str, ext: &str) -> PathBuf {
        self.mapping_dir().join(format!("{}Map{ext}", pascal_case(entity)))
    }

    pub fn context(&self, container: &str, ext: &str) -> PathBuf {
        self.root.join(format!("{}{ext}", pascal_case(container)))
    }

    /// Creates the root and mapping directories if they do not exist yet.
    pub fn create_dirs(&self) -> Result<()> {
        for dir in [self.root.clone(), self.mapping_dir()] {
            std::fs::create_dir_all(&dir).map_err(|err| Error::io(&dir, err))?;
        }
        Ok(())
    }
}
