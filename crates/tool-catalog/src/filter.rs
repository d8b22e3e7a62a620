//! Free-text and facet filtering over tool records.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::{FilterCriteria, ToolRecord, ALL};

/// Return the records matching every active dimension of `criteria`,
/// in their original order.
pub fn filter<'a>(records: &'a [ToolRecord], criteria: &FilterCriteria) -> Vec<&'a ToolRecord> {
    let query = criteria.normalized_query();
    let matches: Vec<&ToolRecord> = records
        .iter()
        .filter(|r| matches_query(r, &query) && matches_dimensions(r, criteria))
        .collect();

    tracing::debug!(
        "Filter matched {} of {} records (query={:?}, category={}, skill={}, pricing={})",
        matches.len(),
        records.len(),
        query,
        criteria.category,
        criteria.skill_level,
        criteria.pricing_model
    );
    matches
}

impl FilterCriteria {
    /// Check a single record against these criteria.
    pub fn matches(&self, record: &ToolRecord) -> bool {
        matches_query(record, &self.normalized_query()) && matches_dimensions(record, self)
    }
}

/// `query` must already be trimmed and lowercased.
fn matches_query(record: &ToolRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let contains = |text: &str| text.to_lowercase().contains(query);

    contains(&record.name)
        || contains(&record.short_description)
        || contains(&record.long_description)
        || record.tags.iter().any(|tag| contains(tag))
}

fn matches_dimensions(record: &ToolRecord, criteria: &FilterCriteria) -> bool {
    dimension_matches(&criteria.category, &record.category)
        && dimension_matches(&criteria.skill_level, &record.skill_level)
        && dimension_matches(&criteria.pricing_model, &record.pricing_model)
}

fn dimension_matches(wanted: &str, actual: &str) -> bool {
    wanted == ALL || wanted == actual
}

/// Distinct values available for each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub skill_levels: Vec<String>,
    pub pricing_models: Vec<String>,
}

impl Facets {
    /// Collect sorted, deduplicated facet values. Empty values are skipped.
    pub fn from_records(records: &[ToolRecord]) -> Self {
        fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
            values
                .filter(|v| !v.is_empty())
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        }

        Self {
            categories: distinct(records.iter().map(|r| &r.category)),
            skill_levels: distinct(records.iter().map(|r| &r.skill_level)),
            pricing_models: distinct(records.iter().map(|r| &r.pricing_model)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_beta() -> Vec<ToolRecord> {
        vec![
            ToolRecord {
                category: "X".to_string(),
                tags: vec!["ai".to_string()],
                ..ToolRecord::new("a", "Alpha")
            },
            ToolRecord {
                category: "Y".to_string(),
                ..ToolRecord::new("b", "Beta")
            },
        ]
    }

    fn ids(records: &[&ToolRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_identity_returns_everything() {
        let records = alpha_beta();
        let result = filter(&records, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_query_prefix_of_name() {
        let records = alpha_beta();
        let result = filter(&records, &FilterCriteria::with_query("alp"));
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn test_category_only() {
        let records = alpha_beta();
        let result = filter(&records, &FilterCriteria::default().category("Y"));
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive() {
        let records = alpha_beta();
        let result = filter(&records, &FilterCriteria::with_query("  BETA "));
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[test]
    fn test_query_matches_tags_and_descriptions() {
        let mut records = alpha_beta();
        records[1].long_description = "Runs Workflows at scale".to_string();

        assert_eq!(ids(&filter(&records, &FilterCriteria::with_query("AI"))), vec!["a"]);
        assert_eq!(
            ids(&filter(&records, &FilterCriteria::with_query("workflows"))),
            vec!["b"]
        );
    }

    #[test]
    fn test_dimension_match_is_case_sensitive() {
        let records = alpha_beta();
        let result = filter(&records, &FilterCriteria::default().category("x"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_all_dimensions_are_anded() {
        let mut records = alpha_beta();
        records[0].skill_level = "Beginner".to_string();
        records[1].skill_level = "Beginner".to_string();

        let criteria = FilterCriteria::with_query("a")
            .category("Y")
            .skill_level("Beginner");
        assert_eq!(ids(&filter(&records, &criteria)), vec!["b"]);

        let criteria = criteria.pricing_model("Free");
        assert!(filter(&records, &criteria).is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let records = alpha_beta();
        assert!(filter(&records, &FilterCriteria::with_query("zzz")).is_empty());
        assert!(filter(&[], &FilterCriteria::with_query("a")).is_empty());
    }

    #[test]
    fn test_matches_single_record() {
        let records = alpha_beta();
        let criteria = FilterCriteria::with_query("alpha").category("X");
        assert!(criteria.matches(&records[0]));
        assert!(!criteria.matches(&records[1]));
    }

    #[test]
    fn test_facets_sorted_and_deduplicated() {
        let mut records = alpha_beta();
        records.push(ToolRecord {
            category: "X".to_string(),
            pricing_model: "Free".to_string(),
            ..ToolRecord::new("c", "Gamma")
        });

        let facets = Facets::from_records(&records);
        assert_eq!(facets.categories, vec!["X", "Y"]);
        assert!(facets.skill_levels.is_empty());
        assert_eq!(facets.pricing_models, vec!["Free"]);
    }
}
