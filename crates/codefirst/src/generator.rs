use crate::{Config, Filter, GenerationTarget, Layout};
use codefirst_codegen::{FrameworkVersion, Kind, Renderer, Scope, Templates};
use codefirst_core::schema::db::{Discovery, SchemaError, StoreFilter};
use codefirst_core::schema::mapping::MappingDocument;
use codefirst_core::schema::Builder;
use codefirst_core::{err, Result, Schema, StoreProvider};

/// Runs the whole pipeline: discover the store, build the conceptual model,
/// resolve its mapping, select entity types, render and write.
#[derive(Debug)]
pub struct Generator {
    config: Config,
    filter: Filter,
    renderer: Renderer,
}

/// What a run produced.
#[derive(Debug)]
pub struct Report {
    /// Files rendered by the run, in generation order
    pub targets: Vec<GenerationTarget>,

    /// Store objects that were left out of the model
    pub warnings: Vec<SchemaError>,

    /// Number of entity types in the conceptual model, selected or not
    pub entity_types: usize,
}

impl Generator {
    pub fn new(config: Config) -> Generator {
        Generator {
            config,
            filter: Filter::all(),
            renderer: Renderer::default(),
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn templates(mut self, templates: Templates) -> Self {
        self.renderer = Renderer::new(templates);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Renders every file without touching the filesystem.
    pub fn plan(&self, provider: &dyn StoreProvider) -> Result<Report> {
        let layout = self.layout()?;
        let (schema, warnings) = self.resolve(provider)?;
        let targets = self.render(&schema, &layout)?;

        Ok(Report {
            targets,
            warnings,
            entity_types: schema.app.entity_types.len(),
        })
    }

    /// Renders and writes every file.
    ///
    /// A failed write aborts the run; files written before it stay on disk.
    pub fn run(&self, provider: &dyn StoreProvider) -> Result<Report> {
        let report = self.plan(provider)?;

        self.layout()?.create_dirs()?;

        for target in &report.targets {
            target.write()?;
        }

        tracing::info!(
            files = report.targets.len(),
            entity_types = report.entity_types,
            warnings = report.warnings.len(),
            "generation complete"
        );

        Ok(report)
    }

    fn layout(&self) -> Result<Layout> {
        let root = match &self.config.output_dir {
            Some(dir) => dir.clone(),
            None => Layout::default_root()?,
        };
        Ok(Layout::new(root))
    }

    fn resolve(&self, provider: &dyn StoreProvider) -> Result<(Schema, Vec<SchemaError>)> {
        tracing::debug!(provider = provider.name(), "discovering store schema");

        let (db, mut warnings) = provider
            .discover(&StoreFilter::default())
            .and_then(Discovery::check)
            .map_err(|e| e.context(err!("discovering schema with `{}`", provider.name())))?;

        let generated = Builder::new()
            .namespace(&self.config.model_namespace)
            .container_name(&self.config.context_name)
            .dialect(self.config.dialect)
            .build(&db)?;

        for warning in &generated.warnings {
            tracing::warn!(table = warning.table.as_deref(), "{}", warning.message);
        }
        warnings.extend(generated.warnings);

        // The resolver consumes the serialized document, so the dialect
        // written here is the one that gets parsed back.
        let xml = generated.document.to_xml()?;
        let document = MappingDocument::parse(&xml)?;

        let schema = Schema::resolve(db, generated.app, &document)?;
        Ok((schema, warnings))
    }

    fn render(&self, schema: &Schema, layout: &Layout) -> Result<Vec<GenerationTarget>> {
        let framework_version: FrameworkVersion = self.config.framework_version.parse()?;
        let mapping_namespace = self.config.get_mapping_namespace();

        let scope = Scope {
            model: &schema.app,
            mapping: &schema.mapping,
            models_namespace: &self.config.models_namespace,
            mapping_namespace: &mapping_namespace,
            framework_version: &framework_version,
        };

        let entity_ext = self.renderer.file_extension(Kind::Entity);
        let mapping_ext = self.renderer.file_extension(Kind::Mapping);
        let mut targets = vec![];

        for entity_type in schema.app.entity_types() {
            let name = entity_type.name();

            if !self.filter.includes(name) {
                tracing::debug!(entity_type = name, "skipped by filter");
                continue;
            }

            targets.push(GenerationTarget {
                kind: Kind::Entity,
                path: layout.entity(name, entity_ext),
                contents: self.renderer.render(&scope.entity(entity_type))?,
            });

            targets.push(GenerationTarget {
                kind: Kind::Mapping,
                path: layout.mapping(name, mapping_ext),
                contents: self.renderer.render(&scope.mapping(entity_type))?,
            });
        }

        if self.filter.is_full_run() {
            let context_ext = self.renderer.file_extension(Kind::Context);

            targets.push(GenerationTarget {
                kind: Kind::Context,
                path: layout.context(&schema.app.container.name, context_ext),
                contents: self.renderer.render(&scope.context())?,
            });
        }

        Ok(targets)
    }
}
