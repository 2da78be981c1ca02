//! Entity Framework code-first templates.

#[macro_use]
mod fmt;
use fmt::{Comma, Formatter};

mod context;
pub use context::ContextTemplate;

mod entity;
pub use entity::EntityTemplate;

mod ident;
use ident::{class_name, escape, literal, type_name};

mod mapping;
pub use mapping::MappingTemplate;

const FILE_EXTENSION: &str = ".cs";
