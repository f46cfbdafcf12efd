//! Fetching every source and building the bank.
//!
//! All sources are fetched concurrently. The base question set and the sign
//! inventory are mandatory: if either cannot be fetched or decoded the load
//! fails. The supplementary set and the definitions table are optional and
//! contribute nothing when they are absent or broken.

use quizbank_core::model::{Definition, QuestionSet};
use quizbank_core::random::RandomSource;
use quizbank_core::{build_bank, Bank, BankSources, BuildError, BuilderConfig};

use crate::config::SourcePaths;
use crate::decode;
use crate::error::SourceError;
use crate::fetch::AssetFetcher;

/// Source names used in errors and logs.
pub const BASE_SOURCE: &str = "base";
pub const INVENTORY_SOURCE: &str = "inventory";
pub const SUPPLEMENTARY_SOURCE: &str = "supplementary";
pub const DEFINITIONS_SOURCE: &str = "definitions";

async fn fetch_optional(
    fetcher: &dyn AssetFetcher,
    path: Option<&str>,
) -> Option<Result<String, SourceError>> {
    match path {
        Some(path) => Some(fetcher.fetch(path).await),
        None => None,
    }
}

fn optional<T>(
    name: &str,
    fetched: Option<Result<String, SourceError>>,
    path: Option<&str>,
    decode: impl FnOnce(&str, &str) -> Result<T, SourceError>,
) -> Option<T> {
    let (fetched, path) = (fetched?, path?);
    match fetched.and_then(|body| decode(path, &body)) {
        Ok(value) => Some(value),
        Err(e) if e.is_not_found() => {
            tracing::warn!("optional source '{name}' not present: {e}");
            None
        }
        Err(e) => {
            tracing::warn!("ignoring optional source '{name}': {e}");
            None
        }
    }
}

/// Fetch and decode every configured source.
pub async fn load_sources(
    fetcher: &dyn AssetFetcher,
    paths: &SourcePaths,
) -> Result<BankSources, BuildError> {
    let supplementary_path = paths.supplementary.as_deref();
    let definitions_path = paths.definitions.as_deref();

    let (base, inventory, supplementary, definitions) = futures::join!(
        fetcher.fetch(&paths.base),
        fetcher.fetch(&paths.inventory),
        fetch_optional(fetcher, supplementary_path),
        fetch_optional(fetcher, definitions_path),
    );

    let base: QuestionSet = base
        .and_then(|body| decode::question_set(&paths.base, &body))
        .map_err(|e| BuildError::missing(BASE_SOURCE, e))?;
    let inventory = inventory
        .and_then(|body| decode::inventory(&paths.inventory, &body))
        .map_err(|e| BuildError::missing(INVENTORY_SOURCE, e))?;

    let supplementary = optional(
        SUPPLEMENTARY_SOURCE,
        supplementary,
        supplementary_path,
        decode::question_set,
    );
    let definitions: Option<Vec<Definition>> = optional(
        DEFINITIONS_SOURCE,
        definitions,
        definitions_path,
        decode::definitions,
    );

    tracing::info!(
        "loaded sources via {}: {} base records, {} signs, supplementary: {}, definitions: {}",
        fetcher.name(),
        base.record_count(),
        inventory.len(),
        supplementary.as_ref().map_or(0, QuestionSet::record_count),
        definitions.as_ref().map_or(0, Vec::len),
    );

    Ok(BankSources {
        base,
        inventory,
        supplementary,
        definitions,
    })
}

/// Fetch every source, then build the bank.
pub async fn load_bank(
    fetcher: &dyn AssetFetcher,
    paths: &SourcePaths,
    config: &BuilderConfig,
    rng: &mut dyn RandomSource,
) -> Result<Bank, BuildError> {
    let sources = load_sources(fetcher, paths).await?;
    build_bank(&sources, config, rng)
}
