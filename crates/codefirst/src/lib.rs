mod config;
pub use config::Config;

mod filter;
pub use filter::Filter;

mod generator;
pub use generator::{Generator, Report};

mod layout;
pub use layout::Layout;

mod target;
pub use target::GenerationTarget;

pub use codefirst_codegen::{Kind, Templates};
pub use codefirst_core::{
    schema::db::{Discovery, SchemaError, StoreFilter},
    schema::mapping::Dialect,
    ConnectionDescriptor, Error, Result, StoreProvider,
};
