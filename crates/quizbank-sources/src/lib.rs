//! quizbank-sources — Loading the static assets a question bank is built from.
//!
//! Fetches asset bodies through the [`AssetFetcher`] trait, decodes the JSON
//! question sets and CSV tables, and applies the mandatory/optional source
//! policy before handing everything to `quizbank-core`.

pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod mock;

pub use config::{load_config, load_config_from, QuizbankConfig};
pub use error::SourceError;
pub use fetch::{AssetFetcher, FsFetcher};
pub use loader::{load_bank, load_sources};
