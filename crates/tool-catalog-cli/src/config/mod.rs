//! Configuration loading and resolution.

use std::path::PathBuf;

/// Environment variable naming the catalog file.
pub const CATALOG_ENV: &str = "TOOL_CATALOG_FILE";

/// A resolved catalog path and whether the user asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    /// Named by `--catalog` or the environment. Must exist.
    Explicit(String),
    /// One of the default locations. May be absent.
    Default(String),
}

impl CatalogLocation {
    pub fn path(&self) -> &str {
        match self {
            CatalogLocation::Explicit(path) | CatalogLocation::Default(path) => path,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, CatalogLocation::Explicit(_))
    }
}

/// Resolve the catalog file path.
pub fn resolve_catalog_path(explicit: Option<&str>) -> CatalogLocation {
    if let Some(path) = explicit {
        return CatalogLocation::Explicit(path.to_string());
    }

    if let Ok(env_path) = std::env::var(CATALOG_ENV) {
        return CatalogLocation::Explicit(env_path);
    }

    let cwd_catalog = PathBuf::from("catalog.json");
    if cwd_catalog.exists() {
        return CatalogLocation::Default(cwd_catalog.display().to_string());
    }

    CatalogLocation::Default(resolve_default_catalog_path())
}

fn resolve_default_catalog_path() -> String {
    format!("{}/.tool-catalog/catalog.json", home_dir())
}

/// Path of the REPL history file.
pub fn history_path() -> PathBuf {
    PathBuf::from(home_dir()).join(".tool_catalog_history")
}

fn home_dir() -> String {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string())
}
