//! Tool Catalog CLI - terminal front end for browsing and comparing tools.

pub mod config;
pub mod render;
pub mod repl;
pub mod session;

pub use config::{resolve_catalog_path, CatalogLocation};
pub use session::{CatalogSession, CatalogSource};
