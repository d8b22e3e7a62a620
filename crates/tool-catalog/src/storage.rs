//! JSON catalog reader/writer.
//!
//! A catalog file is either a bare array of tool records or an object with a
//! `tools` array. Files are always written in the object form.

use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{CatalogError, CatalogResult, ToolRecord};

/// Bundled sample catalog.
const SAMPLE_CATALOG: &str = include_str!("../data/sample_tools.json");

/// Writer for catalog files.
pub struct CatalogWriter;

/// Reader for catalog files.
pub struct CatalogReader;

impl CatalogWriter {
    /// Write records to a file, creating parent directories as needed.
    pub fn write_to_file(records: &[ToolRecord], path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::File::create(path)?;
        Self::write_to(records, &mut file)
    }

    /// Write records to any writer.
    pub fn write_to<W: Write>(records: &[ToolRecord], writer: &mut W) -> CatalogResult<()> {
        serde_json::to_writer_pretty(&mut *writer, &SerializedCatalog { tools: records })?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl CatalogReader {
    /// Read a catalog from a file.
    pub fn read_from_file(path: &Path) -> CatalogResult<Vec<ToolRecord>> {
        let mut file = std::fs::File::open(path)?;
        let records = Self::read_from(&mut file)?;
        tracing::info!("Loaded {} tools from {}", records.len(), path.display());
        Ok(records)
    }

    /// Read a catalog from any reader.
    pub fn read_from<R: Read>(reader: &mut R) -> CatalogResult<Vec<ToolRecord>> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_json_str(&buf)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> CatalogResult<Vec<ToolRecord>> {
        let records: Vec<ToolRecord> = if json.trim_start().starts_with('[') {
            serde_json::from_str(json)?
        } else {
            serde_json::from_str::<DeserializedCatalog>(json)?.tools
        };
        check_unique_ids(&records)?;
        Ok(records)
    }
}

/// Parse the bundled sample catalog.
pub fn sample_catalog() -> CatalogResult<Vec<ToolRecord>> {
    CatalogReader::from_json_str(SAMPLE_CATALOG)
}

fn check_unique_ids(records: &[ToolRecord]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(CatalogError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct SerializedCatalog<'a> {
    tools: &'a [ToolRecord],
}

#[derive(Deserialize)]
struct DeserializedCatalog {
    tools: Vec<ToolRecord>,
}
