mod config;
pub use config::load_config;

mod connection;
pub use connection::{ConnectionArgs, ProviderKind};

mod generate;
pub use generate::GenerateCommand;

mod snapshot;
pub use snapshot::SnapshotCommand;

mod snapshot_file;
pub use snapshot_file::SnapshotFile;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "codefirst")]
#[command(about = "Reverse-engineer a database schema into code-first ORM sources")]
#[command(version)]
pub struct Cli {
    /// Log progress to stderr (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Generate entity, mapping and data context sources
    Generate(GenerateCommand),

    /// Save the discovered store schema to a TOML snapshot file
    Snapshot(SnapshotCommand),
}

impl Cli {
    /// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to
    /// `warn`, or `info` with `--verbose`.
    pub fn init_tracing(&self) {
        let default = if self.verbose { "info" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        // Fails if a global subscriber is already set.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Generate(cmd) => cmd.run(),
            Command::Snapshot(cmd) => cmd.run(),
        }
    }
}
