mod column;
pub use column::Column;

mod discovery;
pub use discovery::{Discovery, SchemaError, Severity};

mod filter;
pub use filter::StoreFilter;

mod fk;
pub use fk::ForeignKey;

mod schema;
pub use schema::Schema;

mod table;
pub use table::{Table, TableId};

mod ty;
pub use ty::Type;

mod verify;
