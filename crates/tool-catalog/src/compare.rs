//! Comparison selection and side-by-side comparison tables.

use serde::Serialize;

use crate::types::{CatalogError, CatalogResult, ToolRecord};

/// Number of selected tools shown in the summary bar.
pub const COMPARE_DISPLAY_LIMIT: usize = 6;

/// Minimum selection size for a comparison.
pub const MIN_COMPARE: usize = 2;

/// Set of tool ids marked for comparison, kept in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            tracing::debug!("Deselected {id} ({} selected)", self.ids.len());
            false
        } else {
            self.ids.push(id.to_string());
            tracing::debug!("Selected {id} ({} selected)", self.ids.len());
            true
        }
    }

    /// Checkbox semantics: select when `selected`, deselect otherwise.
    pub fn set_selected(&mut self, id: &str, selected: bool) {
        if self.contains(id) != selected {
            self.toggle(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// A comparison needs at least two selected tools.
    pub fn can_open_compare(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }

    /// Resolve selected ids against `records`, skipping ids that no longer exist.
    pub fn resolve<'a>(&self, records: &'a [ToolRecord]) -> Vec<&'a ToolRecord> {
        let resolved: Vec<&ToolRecord> = self
            .ids
            .iter()
            .filter_map(|id| records.iter().find(|r| &r.id == id))
            .collect();

        if resolved.len() < self.ids.len() {
            tracing::warn!(
                "{} selected tool(s) are no longer in the catalog",
                self.ids.len() - resolved.len()
            );
        }
        resolved
    }

    /// Names for the summary bar: the first resolvable selections, capped
    /// at [`COMPARE_DISPLAY_LIMIT`].
    pub fn chips(&self, records: &[ToolRecord]) -> Vec<String> {
        self.ids
            .iter()
            .take(COMPARE_DISPLAY_LIMIT)
            .filter_map(|id| records.iter().find(|r| &r.id == id))
            .map(|r| r.name.clone())
            .collect()
    }

    /// Official URLs of every resolvable selection.
    pub fn official_urls(&self, records: &[ToolRecord]) -> Vec<String> {
        self.resolve(records)
            .into_iter()
            .map(|r| r.official_url.clone())
            .filter(|url| !url.is_empty())
            .collect()
    }

    /// Build the side-by-side table for the current selection.
    ///
    /// Fails with [`CatalogError::NotEnoughSelected`] when fewer than two
    /// tools are selected. Selected ids missing from `records` are dropped.
    pub fn build_comparison_view(&self, records: &[ToolRecord]) -> CatalogResult<ComparisonTable> {
        if !self.can_open_compare() {
            return Err(CatalogError::NotEnoughSelected {
                selected: self.ids.len(),
            });
        }

        Ok(ComparisonTable::from_records(&self.resolve(records)))
    }
}

/// One compared attribute across every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub cells: Vec<String>,
}

/// Side-by-side comparison: one column per tool, one row per attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub columns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn from_records(records: &[&ToolRecord]) -> Self {
        let row = |label: &str, cell: fn(&ToolRecord) -> String| ComparisonRow {
            label: label.to_string(),
            cells: records.iter().map(|r| cell(r)).collect(),
        };

        let rows = vec![
            row("Category", |r| r.category.clone()),
            row("Skill level", |r| r.skill_level.clone()),
            row("Pricing", |r| r.pricing_model.clone()),
            row("Tags", |r| r.tags.join(", ")),
            row("Pros", |r| r.pros.join("; ")),
            row("Cons", |r| r.cons.join("; ")),
            row("Integrations", |r| r.integrations.join(", ")),
        ];

        Self {
            columns: records.iter().map(|r| r.name.clone()).collect(),
            rows,
        }
    }

    /// Look up a row by its label.
    pub fn row(&self, label: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_beta() -> Vec<ToolRecord> {
        vec![
            ToolRecord {
                category: "X".to_string(),
                tags: vec!["ai".to_string(), "ml".to_string()],
                pros: vec!["fast".to_string(), "cheap".to_string()],
                integrations: vec!["Slack".to_string(), "Zapier".to_string()],
                ..ToolRecord::new("a", "Alpha")
            },
            ToolRecord {
                category: "Y".to_string(),
                cons: vec!["slow".to_string(), "pricey".to_string()],
                ..ToolRecord::new("b", "Beta")
            },
        ]
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut sel = ComparisonSelection::new();
        assert!(sel.toggle("a"));
        assert!(sel.contains("a"));
        assert!(!sel.toggle("a"));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_set_selected_is_idempotent() {
        let mut sel = ComparisonSelection::new();
        sel.set_selected("a", true);
        sel.set_selected("a", true);
        assert_eq!(sel.len(), 1);
        sel.set_selected("a", false);
        sel.set_selected("a", false);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_can_open_compare_threshold() {
        let mut sel = ComparisonSelection::new();
        assert!(!sel.can_open_compare());
        sel.toggle("a");
        assert!(!sel.can_open_compare());
        sel.toggle("b");
        assert!(sel.can_open_compare());
        sel.toggle("c");
        assert!(sel.can_open_compare());
        sel.clear();
        assert!(!sel.can_open_compare());
    }

    #[test]
    fn test_build_view_columns_and_rows() {
        let records = alpha_beta();
        let mut sel = ComparisonSelection::new();
        sel.toggle("a");
        sel.toggle("b");

        let table = sel.build_comparison_view(&records).unwrap();
        assert_eq!(table.columns, vec!["Alpha", "Beta"]);

        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Category", "Skill level", "Pricing", "Tags", "Pros", "Cons", "Integrations"]
        );
        assert_eq!(table.row("Category").unwrap().cells, vec!["X", "Y"]);
        assert_eq!(table.row("Tags").unwrap().cells, vec!["ai, ml", ""]);
        assert_eq!(table.row("Pros").unwrap().cells, vec!["fast; cheap", ""]);
        assert_eq!(table.row("Cons").unwrap().cells, vec!["", "slow; pricey"]);
        assert_eq!(table.row("Integrations").unwrap().cells, vec!["Slack, Zapier", ""]);
    }

    #[test]
    fn test_single_selection_is_rejected() {
        let records = alpha_beta();
        let mut sel = ComparisonSelection::new();
        sel.toggle("a");

        assert!(!sel.can_open_compare());
        let err = sel.build_comparison_view(&records).unwrap_err();
        assert!(matches!(err, CatalogError::NotEnoughSelected { selected: 1 }));
    }

    #[test]
    fn test_unresolved_ids_are_dropped() {
        let records = alpha_beta();
        let mut sel = ComparisonSelection::new();
        sel.toggle("a");
        sel.toggle("gone");
        sel.toggle("b");

        let table = sel.build_comparison_view(&records).unwrap();
        assert_eq!(table.columns, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_table_is_not_capped() {
        let records: Vec<ToolRecord> = (0..9)
            .map(|i| ToolRecord::new(format!("t{i}"), format!("Tool {i}")))
            .collect();
        let mut sel = ComparisonSelection::new();
        for r in &records {
            sel.toggle(&r.id);
        }

        assert_eq!(sel.chips(&records).len(), COMPARE_DISPLAY_LIMIT);
        let table = sel.build_comparison_view(&records).unwrap();
        assert_eq!(table.columns.len(), 9);
    }

    #[test]
    fn test_chips_follow_selection_order() {
        let records = alpha_beta();
        let mut sel = ComparisonSelection::new();
        sel.toggle("b");
        sel.toggle("a");
        assert_eq!(sel.chips(&records), vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_official_urls_skip_missing() {
        let mut records = alpha_beta();
        records[0].official_url = "https://alpha.example".to_string();
        let mut sel = ComparisonSelection::new();
        sel.toggle("a");
        sel.toggle("b");
        sel.toggle("gone");
        assert_eq!(sel.official_urls(&records), vec!["https://alpha.example"]);
    }
}
