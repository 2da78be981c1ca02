use codefirst_core::schema::mapping::Dialect;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Where generated files go. Defaults to `Codes` next to the running
    /// executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Namespace of entity classes and the data context
    pub models_namespace: String,

    /// Namespace of mapping classes; `<models_namespace>.Mapping` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_namespace: Option<String>,

    /// Namespace of the conceptual model the mapping document refers to
    pub model_namespace: String,

    /// Name of the entity container, and so of the data context class
    pub context_name: String,

    /// Version of the targeted ORM, passed to templates
    pub framework_version: String,

    /// Dialect of the intermediate mapping document
    pub dialect: Dialect,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            models_namespace: "EF.Models".to_string(),
            mapping_namespace: None,
            model_namespace: "DefaultNamespace".to_string(),
            context_name: "CustomDbContext".to_string(),
            framework_version: "6.0.0.0".to_string(),
            dialect: Dialect::Nested,
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    pub fn models_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.models_namespace = namespace.into();
        self
    }

    pub fn mapping_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.mapping_namespace = Some(namespace.into());
        self
    }

    pub fn model_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.model_namespace = namespace.into();
        self
    }

    pub fn context_name(mut self, name: impl Into<String>) -> Self {
        self.context_name = name.into();
        self
    }

    pub fn framework_version(mut self, version: impl Into<String>) -> Self {
        self.framework_version = version.into();
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// The mapping namespace, falling back to `<models_namespace>.Mapping`
    pub fn get_mapping_namespace(&self) -> String {
        self.mapping_namespace
            .clone()
            .unwrap_or_else(|| format!("{}.Mapping", self.models_namespace))
    }
}
