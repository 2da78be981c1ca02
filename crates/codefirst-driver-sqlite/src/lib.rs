mod introspect;

use codefirst_core::{
    err,
    schema::db::{Discovery, StoreFilter},
    ConnectionDescriptor, Error, Result, StoreProvider,
};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// Data source naming an in-memory database.
const MEMORY: &str = ":memory:";

/// Introspects a SQLite database.
#[derive(Debug)]
pub struct Sqlite {
    /// Where the database lives; `None` for an in-memory database
    path: Option<PathBuf>,
    connection: Connection,
}

impl Sqlite {
    /// Open an existing SQLite database at the specified file path, read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|err| {
            Error::driver(err).context(err!("opening SQLite database `{}`", path.display()))
        })?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            connection,
        })
    }

    /// Create an empty in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(Error::driver)?;
        Ok(Self {
            path: None,
            connection,
        })
    }

    /// Open the database the descriptor's data source names.
    ///
    /// SQLite has no users or services; only the data source is used.
    pub fn from_descriptor(descriptor: &ConnectionDescriptor) -> Result<Self> {
        match descriptor.data_source.as_str() {
            MEMORY => Self::in_memory(),
            path => Self::open(path),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs a batch of SQL statements, for seeding in-memory databases.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.connection.execute_batch(sql).map_err(Error::driver)
    }
}

impl StoreProvider for Sqlite {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn discover(&self, filter: &StoreFilter) -> Result<Discovery> {
        let schema = introspect::schema(&self.connection, filter).map_err(Error::driver)?;

        tracing::debug!(
            path = ?self.path,
            tables = schema.tables.len(),
            "introspected SQLite database"
        );

        Ok(Discovery::new(schema))
    }
}
