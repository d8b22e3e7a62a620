//! Core data types for catalog records and filter criteria.

use serde::{Deserialize, Deserializer, Serialize};

/// Value of a filter dimension meaning "no constraint".
pub const ALL: &str = "all";

/// One catalog entry describing a product or service.
///
/// Everything except `id` defaults to empty when missing or `null` in the
/// source JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pricing_model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pros: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cons: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub integrations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub case_studies: Vec<CaseStudy>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub official_url: String,
}

impl ToolRecord {
    /// Create a record with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A short customer story attached to a tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
}

/// The active filter dimensions, rebuilt from user input on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub category: String,
    pub skill_level: String,
    pub pricing_model: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: all(),
            skill_level: all(),
            pricing_model: all(),
        }
    }
}

impl FilterCriteria {
    /// Criteria with only a free-text query.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn skill_level(mut self, skill_level: impl Into<String>) -> Self {
        self.skill_level = skill_level.into();
        self
    }

    pub fn pricing_model(mut self, pricing_model: impl Into<String>) -> Self {
        self.pricing_model = pricing_model.into();
        self
    }

    /// True when no dimension constrains the result.
    pub fn is_identity(&self) -> bool {
        self.normalized_query().is_empty()
            && self.category == ALL
            && self.skill_level == ALL
            && self.pricing_model == ALL
    }

    /// The query as it is matched: trimmed and lowercased.
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }
}

fn all() -> String {
    ALL.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Errors that can occur in the catalog library.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate tool id: {0}")]
    DuplicateId(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Select at least two tools to compare.")]
    NotEnoughSelected { selected: usize },
}

impl CatalogError {
    /// Validation failures are reported to the user and never end a session.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::NotEnoughSelected { .. } | CatalogError::ToolNotFound(_)
        )
    }
}

/// Convenience result type.
pub type CatalogResult<T> = Result<T, CatalogError>;
