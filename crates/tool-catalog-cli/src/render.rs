//! Plain-text rendering of catalog views for the terminal.

use std::fmt::Write;

use tool_catalog::{ComparisonSelection, ComparisonTable, Facets, ToolDetail, ToolRecord};

/// Tags shown per row in the tool list.
const LIST_TAG_LIMIT: usize = 4;

/// Widest a comparison cell may get before it is truncated.
const MAX_CELL_WIDTH: usize = 32;

/// Render the tool list. Selected tools are marked with `[x]`.
pub fn render_list(tools: &[&ToolRecord], selection: &ComparisonSelection) -> String {
    if tools.is_empty() {
        return "  No results found.\n".to_string();
    }

    let id_width = tools.iter().map(|t| t.id.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for t in tools {
        let mark = if selection.contains(&t.id) { "[x]" } else { "[ ]" };
        let _ = writeln!(
            out,
            "  {mark} {:<id_width$}  {}  ({} / {} / {})",
            t.id, t.name, t.category, t.skill_level, t.pricing_model
        );
        if !t.short_description.is_empty() {
            let _ = writeln!(out, "      {:id_width$}  {}", "", t.short_description);
        }
        if !t.tags.is_empty() {
            let tags: Vec<String> = t
                .tags
                .iter()
                .take(LIST_TAG_LIMIT)
                .map(|tag| format!("#{tag}"))
                .collect();
            let _ = writeln!(out, "      {:id_width$}  {}", "", tags.join(" "));
        }
    }
    out
}

/// Render the comparison bar, or `None` when nothing is selected.
pub fn render_bar(chips: &[String], selection: &ComparisonSelection) -> Option<String> {
    if selection.is_empty() {
        return None;
    }

    let mut out = format!("  Compare ({} selected): {}", selection.len(), chips.join(" | "));
    if !selection.can_open_compare() {
        out.push_str("  (select one more to compare)");
    }
    Some(out)
}

/// Render the single-tool detail view.
pub fn render_detail(detail: &ToolDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}", detail.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", detail.description);
    let _ = writeln!(out);

    let _ = writeln!(out, "  Features:");
    for f in &detail.features {
        let _ = writeln!(out, "    - {f}");
    }
    let _ = writeln!(out, "  Limitations:");
    for l in &detail.limitations {
        let _ = writeln!(out, "    - {l}");
    }

    let _ = writeln!(
        out,
        "  Case study: {}",
        detail.case_study.as_deref().unwrap_or("-")
    );
    if !detail.official_url.is_empty() {
        let _ = writeln!(out, "  Official:   {}", detail.official_url);
    }
    out
}

/// Render a comparison table with a leading "Feature" column.
pub fn render_table(table: &ComparisonTable) -> String {
    let label_width = table
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .chain(std::iter::once("Feature".len()))
        .max()
        .unwrap_or(0);

    let col_widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            table
                .rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .chain(std::iter::once(name))
                .map(|c| c.chars().count().min(MAX_CELL_WIDTH))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let mut line = |label: &str, cells: &[String]| {
        let mut row = format!("  {label:<label_width$}");
        for (cell, &width) in cells.iter().zip(&col_widths) {
            let _ = write!(row, " | {:<width$}", truncate(cell, width));
        }
        let _ = writeln!(out, "{}", row.trim_end());
    };

    line("Feature", &table.columns);
    let rule: Vec<String> = col_widths.iter().map(|w| "-".repeat(*w)).collect();
    line(&"-".repeat(label_width), &rule);
    for row in &table.rows {
        line(&row.label, &row.cells);
    }
    out
}

/// Render the available filter values.
pub fn render_facets(facets: &Facets) -> String {
    let join = |values: &[String]| {
        if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        }
    };

    format!(
        "  Categories:  {}\n  Skill:       {}\n  Pricing:     {}\n",
        join(&facets.categories),
        join(&facets.skill_levels),
        join(&facets.pricing_models)
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
