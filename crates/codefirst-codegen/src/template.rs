use crate::{csharp, Host, Kind, Result};
use std::fmt::Debug;

/// Turns a host record into source text.
///
/// Templates hold no state between calls; the same host always renders to
/// the same text.
pub trait Template: Debug + Send + Sync {
    /// Extension of the files this template produces, including the dot
    fn file_extension(&self) -> &str;

    fn render(&self, host: &Host<'_>) -> Result<String>;
}

/// One template per render kind.
#[derive(Debug)]
pub struct Templates {
    entity: Box<dyn Template>,
    mapping: Box<dyn Template>,
    context: Box<dyn Template>,
}

impl Templates {
    pub fn new(
        entity: impl Template + 'static,
        mapping: impl Template + 'static,
        context: impl Template + 'static,
    ) -> Templates {
        Templates {
            entity: Box::new(entity),
            mapping: Box::new(mapping),
            context: Box::new(context),
        }
    }

    /// C# classes for Entity Framework code-first.
    pub fn csharp() -> Templates {
        Templates::new(
            csharp::EntityTemplate,
            csharp::MappingTemplate,
            csharp::ContextTemplate,
        )
    }

    pub fn get(&self, kind: Kind) -> &dyn Template {
        match kind {
            Kind::Entity => &*self.entity,
            Kind::Mapping => &*self.mapping,
            Kind::Context => &*self.context,
        }
    }
}

impl Default for Templates {
    fn default() -> Templates {
        Templates::csharp()
    }
}
