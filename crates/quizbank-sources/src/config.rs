//! quizbank configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizbank_core::assembly::{DEFAULT_DEFINITION_PROMPT, DEFAULT_SIGN_PROMPT};
use quizbank_core::distractors::{DistractorSynthesizer, DEFAULT_DISTRACTOR_COUNT, FALLBACK_LABELS};
use quizbank_core::matching::DEFAULT_MIN_SCORE;
use quizbank_core::BuilderConfig;

/// Asset names, relative to `assets_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePaths {
    /// Base question set (mandatory).
    #[serde(default = "default_base")]
    pub base: String,
    /// Sign inventory table (mandatory).
    #[serde(default = "default_inventory")]
    pub inventory: String,
    /// Supplementary question set (optional).
    #[serde(default = "default_supplementary")]
    pub supplementary: Option<String>,
    /// Legal-definitions table (optional).
    #[serde(default = "default_definitions")]
    pub definitions: Option<String>,
}

fn default_base() -> String {
    "questions.json".to_string()
}
fn default_inventory() -> String {
    "inventario.csv".to_string()
}
fn default_supplementary() -> Option<String> {
    Some("questions_extra.json".to_string())
}
fn default_definitions() -> Option<String> {
    Some("definiciones.json".to_string())
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            base: default_base(),
            inventory: default_inventory(),
            supplementary: default_supplementary(),
            definitions: default_definitions(),
        }
    }
}

/// Distractor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistractorSettings {
    /// Wrong options per question.
    #[serde(default = "default_distractor_count")]
    pub count: usize,
    /// Generic labels used when the pool runs out.
    #[serde(default = "default_fallback")]
    pub fallback: Vec<String>,
}

fn default_distractor_count() -> usize {
    DEFAULT_DISTRACTOR_COUNT
}
fn default_fallback() -> Vec<String> {
    FALLBACK_LABELS.iter().map(|s| s.to_string()).collect()
}

impl Default for DistractorSettings {
    fn default() -> Self {
        Self {
            count: default_distractor_count(),
            fallback: default_fallback(),
        }
    }
}

/// Top-level quizbank configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizbankConfig {
    /// Directory holding the asset files.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    #[serde(default)]
    pub sources: SourcePaths,
    #[serde(default)]
    pub distractors: DistractorSettings,
    /// Minimum fuzzy score for catalog image lookup.
    #[serde(default = "default_min_score")]
    pub min_match_score: u32,
    #[serde(default = "default_sign_prompt")]
    pub sign_prompt: String,
    #[serde(default = "default_definition_prompt")]
    pub definition_prompt: String,
    /// Seed for reproducible shuffles; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}
fn default_min_score() -> u32 {
    DEFAULT_MIN_SCORE
}
fn default_sign_prompt() -> String {
    DEFAULT_SIGN_PROMPT.to_string()
}
fn default_definition_prompt() -> String {
    DEFAULT_DEFINITION_PROMPT.to_string()
}

impl Default for QuizbankConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            sources: SourcePaths::default(),
            distractors: DistractorSettings::default(),
            min_match_score: default_min_score(),
            sign_prompt: default_sign_prompt(),
            definition_prompt: default_definition_prompt(),
            seed: None,
        }
    }
}

impl QuizbankConfig {
    /// Builder settings derived from this configuration.
    pub fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            synthesizer: DistractorSynthesizer::new(
                self.distractors.count,
                self.distractors.fallback.clone(),
            ),
            min_match_score: self.min_match_score,
            sign_prompt: self.sign_prompt.clone(),
            definition_prompt: self.definition_prompt.clone(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizbank.toml` in the current directory
/// 2. `~/.config/quizbank/config.toml`
///
/// `QUIZBANK_ASSETS_DIR` overrides `assets_dir`.
pub fn load_config() -> Result<QuizbankConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizbankConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizbank.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizbankConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizbankConfig::default(),
    };

    config.assets_dir = PathBuf::from(resolve_env_vars(&config.assets_dir.to_string_lossy()));
    config.sources.base = resolve_env_vars(&config.sources.base);
    config.sources.inventory = resolve_env_vars(&config.sources.inventory);
    // An empty name disables an optional source.
    config.sources.supplementary = config
        .sources
        .supplementary
        .as_deref()
        .map(resolve_env_vars)
        .filter(|s| !s.trim().is_empty());
    config.sources.definitions = config
        .sources
        .definitions
        .as_deref()
        .map(resolve_env_vars)
        .filter(|s| !s.trim().is_empty());

    // Relative asset dirs in a config file are relative to that file.
    if let Some(parent) = config_path.as_deref().and_then(Path::parent) {
        if config.assets_dir.is_relative() && !parent.as_os_str().is_empty() {
            config.assets_dir = parent.join(&config.assets_dir);
        }
    }

    if let Ok(dir) = std::env::var("QUIZBANK_ASSETS_DIR") {
        config.assets_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizbank"))
}
