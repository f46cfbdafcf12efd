pub mod build;
pub mod init;
pub mod play;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::random::{RandomSource, RngSource};
use quizbank_core::Bank;
use quizbank_sources::config::load_config_from;
use quizbank_sources::{load_bank, FsFetcher, QuizbankConfig};

/// Load config and build the bank from the configured assets directory.
pub async fn load(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<(QuizbankConfig, Bank, Box<dyn RandomSource>)> {
    let config = load_config_from(config_path.as_deref())?;
    let mut rng: Box<dyn RandomSource> = match seed.or(config.seed) {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::from_entropy()),
    };

    let fetcher = FsFetcher::new(&config.assets_dir);
    let bank = load_bank(
        &fetcher,
        &config.sources,
        &config.builder_config(),
        rng.as_mut(),
    )
    .await?;
    Ok((config, bank, rng))
}
