pub mod driver;
pub use driver::{ConnectionDescriptor, StoreProvider};

mod error;
pub use error::Error;

pub mod schema;
pub use schema::Schema;

/// A Result type alias that uses codefirst's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
