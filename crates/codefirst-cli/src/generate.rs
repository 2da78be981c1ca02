use crate::{load_config, ConnectionArgs};
use anyhow::Result;
use clap::Parser;
use codefirst::{Config, Dialect, Filter, Generator, Report};
use console::style;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Entity types to generate: names separated by whitespace, `,` or `:`;
    /// a trailing `*` matches by prefix. All entity types when omitted.
    #[arg(long)]
    tables: Option<String>,

    /// Output directory (default: `Codes` next to the executable)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: `codefirst.toml` when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Namespace of entity classes and the data context
    #[arg(long)]
    models_namespace: Option<String>,

    /// Name of the data context class
    #[arg(long)]
    context_name: Option<String>,

    /// Dialect of the intermediate mapping document
    #[arg(long)]
    dialect: Option<Dialect>,

    /// Render everything but write nothing
    #[arg(long)]
    dry_run: bool,
}

impl GenerateCommand {
    pub(crate) fn run(self) -> Result<()> {
        println!();
        println!(
            "  {}",
            style("Generate Code-First Sources").cyan().bold().underlined()
        );
        println!();

        let config = self.config()?;
        let provider = self.connection.open()?;
        let generator = Generator::new(config).filter(self.filter());

        let report = if self.dry_run {
            generator.plan(&*provider)?
        } else {
            generator.run(&*provider)?
        };

        print_report(&report, self.dry_run);
        Ok(())
    }

    /// A blank `--tables` is the same as leaving it out.
    fn filter(&self) -> Filter {
        Filter::parse(
            self.tables
                .as_deref()
                .filter(|tables| !tables.trim().is_empty()),
        )
    }

    fn config(&self) -> Result<Config> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(output) = &self.output {
            config = config.output_dir(output);
        }

        if let Some(namespace) = &self.models_namespace {
            config = config.models_namespace(namespace);
        }

        if let Some(name) = &self.context_name {
            config = config.context_name(name);
        }

        if let Some(dialect) = self.dialect {
            config = config.dialect(dialect);
        }

        Ok(config)
    }
}

fn print_report(report: &Report, dry_run: bool) {
    for warning in &report.warnings {
        println!("  {} {}", style("!").yellow().bold(), style(warning).dim());
    }

    if !report.warnings.is_empty() {
        println!();
    }

    let action = if dry_run { "would write" } else { "writing" };
    for target in &report.targets {
        println!("  {:>12}    {}", action, target.path.display());
    }

    println!();

    if report.targets.is_empty() {
        println!(
            "  {}",
            style("No entity type matched the filter. Nothing generated.")
                .magenta()
                .dim()
        );
    } else {
        println!(
            "  {} {}",
            style("✓").green().bold(),
            style(format!(
                "{} files from {} entity types",
                report.targets.len(),
                report.entity_types
            ))
            .green()
            .bold()
        );
    }
    println!();
}
