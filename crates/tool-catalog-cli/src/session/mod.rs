//! Session management for the catalog.

pub mod manager;

pub use manager::{CatalogSession, CatalogSource};
