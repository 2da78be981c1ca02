use crate::{ConnectionArgs, SnapshotFile};
use anyhow::Result;
use clap::Parser;
use codefirst::StoreFilter;
use console::style;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct SnapshotCommand {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// File the snapshot is written to
    #[arg(long)]
    out: PathBuf,
}

impl SnapshotCommand {
    pub(crate) fn run(self) -> Result<()> {
        println!();
        println!("  {}", style("Snapshot Store Schema").cyan().bold().underlined());
        println!();

        let provider = self.connection.open()?;
        let (schema, warnings) = provider.discover(&StoreFilter::default())?.check()?;

        for warning in &warnings {
            println!("  {} {}", style("!").yellow().bold(), style(warning).dim());
        }

        if let Some(parent) = self.out.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tables = schema.tables.len();
        SnapshotFile::new(schema).save(&self.out)?;

        println!(
            "  {} {}",
            style("✓").green().bold(),
            style(format!(
                "Saved {} tables to {}",
                tables,
                self.out.display()
            ))
            .dim()
        );
        println!();

        Ok(())
    }
}
