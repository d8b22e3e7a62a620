//! Catalog session state: loaded records, active filters, and comparison selection.

use std::path::{Path, PathBuf};

use crate::config::CatalogLocation;
use tool_catalog::{
    detail, filter, sample_catalog, CatalogError, CatalogReader, CatalogResult, CatalogWriter,
    ComparisonSelection, ComparisonTable, Facets, FilterCriteria, ToolDetail, ToolRecord,
};

/// Where the current records came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Sample,
    Memory,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Sample => write!(f, "bundled sample"),
            CatalogSource::Memory => write!(f, "in-memory"),
        }
    }
}

/// Owns all mutable catalog state and routes user actions to the filter
/// engine and the comparison selector.
pub struct CatalogSession {
    records: Vec<ToolRecord>,
    criteria: FilterCriteria,
    selection: ComparisonSelection,
    facets: Facets,
    source: CatalogSource,
}

impl CatalogSession {
    /// Open the catalog file at `path`. A missing file is an error.
    pub fn open(path: &str) -> CatalogResult<Self> {
        let file_path = PathBuf::from(path);
        tracing::info!("Opening catalog file: {}", file_path.display());
        let records = CatalogReader::read_from_file(&file_path)?;
        Ok(Self::with_source(records, CatalogSource::File(file_path)))
    }

    /// Open the catalog at `path`, falling back to the bundled sample when the
    /// file does not exist.
    pub fn open_or_sample(path: &str) -> CatalogResult<Self> {
        if Path::new(path).exists() {
            Self::open(path)
        } else {
            tracing::info!("Catalog file {path} not found, using bundled sample");
            Self::with_sample()
        }
    }

    /// Open a resolved location. Only default locations fall back to the sample.
    pub fn open_location(location: &CatalogLocation) -> CatalogResult<Self> {
        if location.is_explicit() {
            Self::open(location.path())
        } else {
            Self::open_or_sample(location.path())
        }
    }

    /// Start a session on the bundled sample catalog.
    pub fn with_sample() -> CatalogResult<Self> {
        Ok(Self::with_source(sample_catalog()?, CatalogSource::Sample))
    }

    /// Start a session on records supplied by the caller.
    pub fn with_records(records: Vec<ToolRecord>) -> Self {
        Self::with_source(records, CatalogSource::Memory)
    }

    fn with_source(records: Vec<ToolRecord>, source: CatalogSource) -> Self {
        let facets = Facets::from_records(&records);
        tracing::info!("Catalog ready: {} tools from {source}", records.len());
        Self {
            records,
            criteria: FilterCriteria::default(),
            selection: ComparisonSelection::new(),
            facets,
            source,
        }
    }

    /// Replace every record. The comparison selection is kept; ids that no
    /// longer resolve drop out of views.
    pub fn load(&mut self, records: Vec<ToolRecord>, source: CatalogSource) {
        self.facets = Facets::from_records(&records);
        self.records = records;
        self.source = source;
        tracing::info!("Reloaded {} tools from {}", self.records.len(), self.source);
    }

    /// Reload from a catalog file.
    pub fn load_file(&mut self, path: &str) -> CatalogResult<usize> {
        let file_path = PathBuf::from(path);
        let records = CatalogReader::read_from_file(&file_path)?;
        let count = records.len();
        self.load(records, CatalogSource::File(file_path));
        Ok(count)
    }

    /// Reload the bundled sample catalog.
    pub fn load_sample(&mut self) -> CatalogResult<usize> {
        let records = sample_catalog()?;
        let count = records.len();
        self.load(records, CatalogSource::Sample);
        Ok(count)
    }

    pub fn records(&self) -> &[ToolRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selection(&self) -> &ComparisonSelection {
        &self.selection
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn set_query(&mut self, query: &str) {
        self.criteria.query = query.to_string();
    }

    pub fn set_category(&mut self, category: &str) {
        self.criteria.category = category.to_string();
    }

    pub fn set_skill_level(&mut self, skill_level: &str) {
        self.criteria.skill_level = skill_level.to_string();
    }

    pub fn set_pricing_model(&mut self, pricing_model: &str) {
        self.criteria.pricing_model = pricing_model.to_string();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Records matching the current criteria.
    pub fn filtered(&self) -> Vec<&ToolRecord> {
        filter(&self.records, &self.criteria)
    }

    /// Reset every filter and clear the comparison selection.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::default();
        self.selection.clear();
        tracing::debug!("Filters and comparison selection reset");
    }

    /// Toggle a tool in the comparison selection. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Names shown in the comparison bar.
    pub fn chips(&self) -> Vec<String> {
        self.selection.chips(&self.records)
    }

    /// Build the comparison table, or a validation error when fewer than two
    /// tools are selected.
    pub fn open_compare(&self) -> CatalogResult<ComparisonTable> {
        self.selection.build_comparison_view(&self.records)
    }

    /// Compare tools named by the caller. Unlike the session selection, every
    /// id must resolve.
    pub fn compare_ids(&self, ids: &[String]) -> CatalogResult<ComparisonTable> {
        let mut selection = ComparisonSelection::new();
        for id in ids {
            if !self.records.iter().any(|r| &r.id == id) {
                return Err(CatalogError::ToolNotFound(id.clone()));
            }
            selection.set_selected(id, true);
        }
        selection.build_comparison_view(&self.records)
    }

    /// Official URLs of every selected tool.
    pub fn visit_all(&self) -> Vec<String> {
        self.selection.official_urls(&self.records)
    }

    pub fn detail(&self, id: &str) -> CatalogResult<ToolDetail> {
        detail(&self.records, id)
    }

    /// Write the currently filtered records to `path`.
    pub fn export(&self, path: &Path) -> CatalogResult<usize> {
        let filtered: Vec<ToolRecord> = self.filtered().into_iter().cloned().collect();
        CatalogWriter::write_to_file(&filtered, path)?;
        tracing::info!("Exported {} tools to {}", filtered.len(), path.display());
        Ok(filtered.len())
    }

    /// All tool ids, in catalog order.
    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }
}
