use crate::SnapshotFile;
use anyhow::Result;
use clap::{Args, ValueEnum};
use codefirst::{ConnectionDescriptor, StoreProvider};
use codefirst_driver_sqlite::Sqlite;

/// Where the store schema comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// A SQLite database file
    #[default]
    Sqlite,

    /// A TOML schema snapshot written by `codefirst snapshot`
    Snapshot,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Host, file path or snapshot file of the store
    #[arg(long)]
    pub data_source: String,

    /// Service name appended to the data source
    #[arg(long)]
    pub service_name: Option<String>,

    #[arg(long)]
    pub user: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Store provider used to discover the schema
    #[arg(long, value_enum, default_value_t)]
    pub provider: ProviderKind,
}

impl ConnectionArgs {
    pub fn descriptor(&self) -> ConnectionDescriptor {
        let mut descriptor = ConnectionDescriptor::new(&self.data_source);
        descriptor.service_name = self.service_name.clone();
        descriptor.user = self.user.clone();
        descriptor.password = self.password.clone();
        descriptor
    }

    pub fn open(&self) -> Result<Box<dyn StoreProvider>> {
        let descriptor = self.descriptor();
        tracing::info!(
            provider = ?self.provider,
            connection = %descriptor.redacted(),
            "connecting"
        );

        let provider: Box<dyn StoreProvider> = match self.provider {
            ProviderKind::Sqlite => Box::new(Sqlite::from_descriptor(&descriptor)?),
            ProviderKind::Snapshot => Box::new(SnapshotFile::load(&descriptor.data_source)?),
        };
        Ok(provider)
    }
}
