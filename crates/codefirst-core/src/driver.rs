mod connection;
pub use connection::ConnectionDescriptor;

use crate::schema::db::{Discovery, StoreFilter};

use std::fmt::Debug;

/// Introspects a store and describes its tables.
pub trait StoreProvider: Debug {
    /// Short provider name used in logs, e.g. `sqlite`
    fn name(&self) -> &str;

    /// Discovers every table the filter does not exclude.
    ///
    /// Problems with individual store objects are reported in the returned
    /// [`Discovery`] rather than as an `Err`; an `Err` means the store could
    /// not be introspected at all.
    fn discover(&self, filter: &StoreFilter) -> crate::Result<Discovery>;
}

impl<T: StoreProvider + ?Sized> StoreProvider for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn discover(&self, filter: &StoreFilter) -> crate::Result<Discovery> {
        (**self).discover(filter)
    }
}
