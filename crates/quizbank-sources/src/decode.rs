//! Decoding asset bodies into core model types.
//!
//! A body that is not valid for its format fails the whole source. Inside a
//! valid body, individual records that do not fit the expected shape are
//! skipped so the normalizer can deal with what remains.

use std::collections::BTreeMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use serde_json::Value;

use quizbank_core::model::{CatalogEntry, Definition, InventoryRow, QuestionSet, RawQuestion};

use crate::error::SourceError;

/// Key holding sign catalogs in a question-set document.
pub const CATALOGS_KEY: &str = "catalogs";

/// Decode a question-set JSON document.
///
/// Every top-level array other than `catalogs` is a category of raw
/// questions. Non-object records are skipped.
pub fn question_set(path: &str, body: &str) -> Result<QuestionSet, SourceError> {
    let doc: Value = serde_json::from_str(body).map_err(|e| SourceError::parse(path, "JSON", e))?;
    let Value::Object(map) = doc else {
        return Err(SourceError::parse(path, "JSON", "expected an object of question lists"));
    };

    let mut set = QuestionSet::default();
    for (key, value) in map {
        if key == CATALOGS_KEY {
            set.catalogs = catalogs(path, value);
            continue;
        }
        let Value::Array(items) = value else {
            tracing::debug!("{path}: ignoring non-list key '{key}'");
            continue;
        };
        let records: Vec<RawQuestion> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    tracing::debug!("{path}: skipping malformed record in '{key}': {e}");
                    None
                }
            })
            .collect();
        set.categories.insert(key, records);
    }
    Ok(set)
}

fn catalogs(path: &str, value: Value) -> BTreeMap<String, Vec<CatalogEntry>> {
    let Value::Object(map) = value else {
        tracing::debug!("{path}: '{CATALOGS_KEY}' is not an object");
        return BTreeMap::new();
    };
    map.into_iter()
        .filter_map(|(name, entries)| {
            let Value::Array(entries) = entries else {
                return None;
            };
            let entries = entries
                .into_iter()
                .filter_map(|e| serde_json::from_value::<CatalogEntry>(e).ok())
                .filter(|e| !e.name.trim().is_empty())
                .collect();
            Some((name, entries))
        })
        .collect()
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Decode the sign inventory CSV.
///
/// Requires `nombre_visible` and `archivo` columns; `url` is optional.
/// Rows with an empty display name are skipped.
pub fn inventory(path: &str, body: &str) -> Result<Vec<InventoryRow>, SourceError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SourceError::parse(path, "CSV", e))?
        .clone();
    let name_col = column(&headers, "nombre_visible")
        .ok_or_else(|| SourceError::parse(path, "CSV", "missing column 'nombre_visible'"))?;
    let file_col = column(&headers, "archivo")
        .ok_or_else(|| SourceError::parse(path, "CSV", "missing column 'archivo'"))?;
    let url_col = column(&headers, "url");

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("{path}: skipping row {}: {e}", i + 1);
                continue;
            }
        };
        let name = record.get(name_col).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        rows.push(InventoryRow {
            nombre_visible: name.to_string(),
            archivo: record.get(file_col).unwrap_or_default().to_string(),
            url: url_col
                .and_then(|c| record.get(c))
                .filter(|u| !u.is_empty())
                .map(str::to_string),
        });
    }
    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct DefinitionRecord {
    #[serde(default)]
    term: String,
    #[serde(default)]
    definition: String,
}

impl From<DefinitionRecord> for Definition {
    fn from(r: DefinitionRecord) -> Self {
        Definition {
            term: r.term.trim().to_string(),
            definition: r.definition.trim().to_string(),
        }
    }
}

fn usable(d: &Definition) -> bool {
    !d.term.is_empty() && !d.definition.is_empty()
}

/// Decode the legal-definitions table, JSON or CSV by file extension.
pub fn definitions(path: &str, body: &str) -> Result<Vec<Definition>, SourceError> {
    if path.to_ascii_lowercase().ends_with(".csv") {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(body.as_bytes());
        let mut out = Vec::new();
        for record in reader.deserialize::<DefinitionRecord>() {
            match record {
                Ok(r) => out.push(Definition::from(r)),
                Err(e) => tracing::debug!("{path}: skipping definition row: {e}"),
            }
        }
        return Ok(out.into_iter().filter(usable).collect());
    }

    let doc: Value = serde_json::from_str(body).map_err(|e| SourceError::parse(path, "JSON", e))?;
    let Value::Array(items) = doc else {
        return Err(SourceError::parse(path, "JSON", "expected a list of {term, definition}"));
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<DefinitionRecord>(item).ok())
        .map(Definition::from)
        .filter(usable)
        .collect())
}
