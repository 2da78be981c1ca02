use super::{class_name, escape, literal, Formatter, FILE_EXTENSION};
use crate::{Host, Result, Template};

/// The data context: one `DbSet` per entity set, and registration of every
/// mapping class.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextTemplate;

impl Template for ContextTemplate {
    fn file_extension(&self) -> &str {
        FILE_EXTENSION
    }

    fn render(&self, host: &Host<'_>) -> Result<String> {
        let container = &host.model.container;
        let class = class_name(&container.name);

        let mut f = Formatter::new();

        fmt!(f, "using System.Data.Entity;");
        fmt!(f, "using System.Data.Entity.Infrastructure;");
        fmt!(f, "using {};", host.mapping_namespace);
        fmt!(f);
        f.open(format_args!("namespace {}", host.namespace));
        f.open(format_args!("public partial class {class} : DbContext"));

        f.open(format_args!("static {class}()"));
        fmt!(f, "Database.SetInitializer<{class}>(null);");
        f.close();
        fmt!(f);

        fmt!(f, "public {class}()");
        f.indent();
        fmt!(f, ": base({})", literal(&format!("Name={}", container.name)));
        f.dedent();
        fmt!(f, "{{");
        fmt!(f, "}}");
        fmt!(f);

        for set in &container.entity_sets {
            fmt!(
                f,
                "public DbSet<{}> {} {{ get; set; }}",
                class_name(set.entity_type.name()),
                escape(&set.name)
            );
        }
        fmt!(f);

        f.open(format_args!(
            "protected override void OnModelCreating(DbModelBuilder modelBuilder)"
        ));
        for set in &container.entity_sets {
            fmt!(
                f,
                "modelBuilder.Configurations.Add(new {}Map());",
                class_name(set.entity_type.name())
            );
        }
        f.close();

        f.close();
        f.close();

        Ok(f.finish())
    }
}
