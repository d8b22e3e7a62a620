//! Single-tool detail view.

use serde::Serialize;

use crate::types::{CatalogError, CatalogResult, ToolRecord};

/// Everything shown when a single tool is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub limitations: Vec<String>,
    pub case_study: Option<String>,
    pub official_url: String,
}

impl ToolDetail {
    pub fn from_record(record: &ToolRecord) -> Self {
        let description = if record.long_description.is_empty() {
            record.short_description.clone()
        } else {
            record.long_description.clone()
        };

        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            description,
            features: record.pros.clone(),
            limitations: record.cons.clone(),
            case_study: record
                .case_studies
                .first()
                .map(|c| format!("{}: {}", c.title, c.summary)),
            official_url: record.official_url.clone(),
        }
    }
}

/// Look up a tool by id and build its detail view.
pub fn detail(records: &[ToolRecord], id: &str) -> CatalogResult<ToolDetail> {
    records
        .iter()
        .find(|r| r.id == id)
        .map(ToolDetail::from_record)
        .ok_or_else(|| CatalogError::ToolNotFound(id.to_string()))
}
