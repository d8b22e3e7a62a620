//! Tool Catalog - core library for filtering, inspecting, and comparing tool records.

pub mod compare;
pub mod detail;
pub mod filter;
pub mod storage;
pub mod types;

pub use compare::{
    ComparisonRow, ComparisonSelection, ComparisonTable, COMPARE_DISPLAY_LIMIT, MIN_COMPARE,
};
pub use detail::{detail, ToolDetail};
pub use filter::{filter, Facets};
pub use storage::{sample_catalog, CatalogReader, CatalogWriter};
pub use types::*;
