use crate::{Host, Kind, Result, Templates};

/// Dispatches render calls to the template for the host's kind.
#[derive(Debug, Default)]
pub struct Renderer {
    templates: Templates,
}

impl Renderer {
    pub fn new(templates: Templates) -> Renderer {
        Renderer { templates }
    }

    pub fn file_extension(&self, kind: Kind) -> &str {
        self.templates.get(kind).file_extension()
    }

    pub fn render(&self, host: &Host<'_>) -> Result<String> {
        if host.kind.requires_entity_type() {
            host.require_entity_type()?;
        }

        let text = self.templates.get(host.kind).render(host)?;

        tracing::debug!(
            kind = %host.kind,
            entity_type = host.entity_type.map(|ty| ty.name()),
            bytes = text.len(),
            "rendered"
        );

        Ok(text)
    }
}
