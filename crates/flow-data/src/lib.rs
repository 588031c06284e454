//! Declarative container definitions loaded from RON, TOML, or JSON.
//!
//! A data file lists named containers with a capacity and an optional
//! starting fill. [`load_containers`] validates the list and builds a
//! [`ContainerTable`] for one resource tag.

pub mod loader;
pub mod schema;
pub mod table;

pub use loader::{DataLoadError, build_table, load_containers};
pub use table::{ContainerTable, TableError};
