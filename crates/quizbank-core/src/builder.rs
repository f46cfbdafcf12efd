//! Question-bank construction.
//!
//! [`build_bank`] runs once per load cycle, after every source has been
//! fetched: it normalizes each question set, expands catalog placeholders,
//! assembles sign and definition questions, and merges everything with
//! earlier sources taking priority.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::assembly::{
    definition_questions, expand_placeholder, sign_questions, DEFAULT_DEFINITION_PROMPT,
    DEFAULT_SIGN_PROMPT,
};
use crate::distractors::DistractorSynthesizer;
use crate::error::BuildError;
use crate::matching::DEFAULT_MIN_SCORE;
use crate::merge::merge_categories;
use crate::model::{
    Bank, CatalogEntry, CategoryStats, Definition, InventoryRow, Question, QuestionSet,
    DEFINITIONS_CATEGORY, SIGNALS_CATEGORY,
};
use crate::normalize::normalize;
use crate::random::RandomSource;

/// Everything a build consumes. Mandatory sources are plain fields; optional
/// ones are `None` when they were absent or failed to load.
#[derive(Debug, Clone, Default)]
pub struct BankSources {
    /// Base question set (theory and code questions).
    pub base: QuestionSet,
    /// Sign inventory table.
    pub inventory: Vec<InventoryRow>,
    /// Supplementary question set merged under the base set.
    pub supplementary: Option<QuestionSet>,
    /// Legal-definitions table.
    pub definitions: Option<Vec<Definition>>,
}

/// Tunables for a build.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    pub synthesizer: DistractorSynthesizer,
    /// Minimum fuzzy score for a catalog name to claim an inventory image.
    pub min_match_score: u32,
    pub sign_prompt: String,
    /// Definition prompt template with a `{term}` slot.
    pub definition_prompt: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            synthesizer: DistractorSynthesizer::default(),
            min_match_score: DEFAULT_MIN_SCORE,
            sign_prompt: DEFAULT_SIGN_PROMPT.to_string(),
            definition_prompt: DEFAULT_DEFINITION_PROMPT.to_string(),
        }
    }
}

type Categories = BTreeMap<String, Vec<Question>>;

struct Stage {
    categories: Categories,
    rejected: BTreeMap<String, usize>,
}

impl Stage {
    fn single(name: &str, questions: Vec<Question>, rejected: usize) -> Self {
        Self {
            categories: BTreeMap::from([(name.to_string(), questions)]),
            rejected: BTreeMap::from([(name.to_string(), rejected)]),
        }
    }
}

fn normalize_set(
    set: &QuestionSet,
    fallback_catalogs: &BTreeMap<String, Vec<CatalogEntry>>,
    inventory: &[InventoryRow],
    config: &BuilderConfig,
    rng: &mut dyn RandomSource,
) -> Stage {
    let mut stage = Stage {
        categories: BTreeMap::new(),
        rejected: BTreeMap::new(),
    };

    for (name, records) in &set.categories {
        let mut questions = Vec::with_capacity(records.len());
        let mut rejected = 0;

        for raw in records {
            let Some(catalog_name) = raw.catalog.as_deref() else {
                match normalize(raw) {
                    Some(q) => questions.push(q),
                    None => rejected += 1,
                }
                continue;
            };

            let catalog = set
                .catalogs
                .get(catalog_name)
                .or_else(|| fallback_catalogs.get(catalog_name));
            let Some(catalog) = catalog else {
                tracing::warn!("placeholder in '{name}' names unknown catalog '{catalog_name}'");
                rejected += 1;
                continue;
            };

            let expanded = expand_placeholder(
                raw,
                catalog,
                inventory,
                config.min_match_score,
                &config.synthesizer,
                rng,
            );
            questions.extend(expanded.questions);
            rejected += expanded.rejected;
        }

        stage.categories.insert(name.clone(), questions);
        stage.rejected.insert(name.clone(), rejected);
    }
    stage
}

/// Build the question bank from loaded sources.
///
/// Priority on id collision: base set, supplementary set, inventory signs,
/// definitions. Fails with [`BuildError::EmptyBank`] when nothing survives.
pub fn build_bank(
    sources: &BankSources,
    config: &BuilderConfig,
    rng: &mut dyn RandomSource,
) -> Result<Bank, BuildError> {
    let no_catalogs = BTreeMap::new();
    let mut stages = vec![normalize_set(
        &sources.base,
        &no_catalogs,
        &sources.inventory,
        config,
        rng,
    )];

    if let Some(extra) = &sources.supplementary {
        stages.push(normalize_set(
            extra,
            &sources.base.catalogs,
            &sources.inventory,
            config,
            rng,
        ));
    }

    let signs = sign_questions(&sources.inventory, &config.sign_prompt, &config.synthesizer, rng);
    stages.push(Stage::single(SIGNALS_CATEGORY, signs.questions, signs.rejected));

    if let Some(definitions) = &sources.definitions {
        let defs = definition_questions(
            definitions,
            &config.definition_prompt,
            &config.synthesizer,
            rng,
        );
        stages.push(Stage::single(DEFINITIONS_CATEGORY, defs.questions, defs.rejected));
    }

    let mut stats: BTreeMap<String, CategoryStats> = BTreeMap::new();
    for stage in &stages {
        for (name, &rejected) in &stage.rejected {
            stats.entry(name.clone()).or_default().absorb(CategoryStats {
                rejected,
                ..Default::default()
            });
        }
    }

    let merged = merge_categories(stages.into_iter().map(|s| s.categories));
    for (name, questions) in &merged.categories {
        let entry = stats.entry(name.clone()).or_default();
        entry.accepted = questions.len();
        entry.duplicates = merged.skipped.get(name).copied().unwrap_or_default();
    }

    let bank = Bank {
        built_at: Utc::now(),
        signal_count: merged
            .categories
            .get(SIGNALS_CATEGORY)
            .map_or(0, Vec::len),
        categories: merged.categories,
        stats,
    };

    if bank.total_questions() == 0 {
        return Err(BuildError::EmptyBank);
    }

    tracing::info!(
        "built question bank: {} questions in {} categories ({} signs)",
        bank.total_questions(),
        bank.categories.len(),
        bank.signal_count
    );
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawQuestion;
    use crate::random::{RngSource, SequenceSource};
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawQuestion {
        serde_json::from_value(value).unwrap()
    }

    fn set(category: &str, records: Vec<serde_json::Value>) -> QuestionSet {
        let mut set = QuestionSet::default();
        set.categories
            .insert(category.into(), records.into_iter().map(raw).collect());
        set
    }

    fn inventory() -> Vec<InventoryRow> {
        ["Pare", "Ceda el paso", "Zona escolar", "Curva peligrosa", "Paso peatonal"]
            .iter()
            .enumerate()
            .map(|(i, name)| InventoryRow {
                nombre_visible: name.to_string(),
                archivo: format!(r"senales\{i}.png"),
                url: None,
            })
            .collect()
    }

    #[test]
    fn base_wins_over_supplementary() {
        let sources = BankSources {
            base: set("quiz1", vec![json!({"question": "Q1", "options": ["A", "B"], "correct": "A"})]),
            supplementary: Some(set(
                "quiz1",
                vec![
                    json!({"question": "Q1", "options": ["A", "B", "C"], "correct": "A"}),
                    json!({"question": "Q2", "options": ["X", "Y"], "correct": "X"}),
                ],
            )),
            inventory: inventory(),
            definitions: None,
        };
        let bank = build_bank(&sources, &BuilderConfig::default(), &mut RngSource::seeded(1)).unwrap();

        let quiz1 = bank.category("quiz1").unwrap();
        assert_eq!(quiz1.len(), 2);
        assert_eq!(quiz1[0].prompt, "Q1");
        assert_eq!(quiz1[0].options, vec!["A", "B"]);
        assert_eq!(quiz1[1].prompt, "Q2");
        assert_eq!(bank.stats["quiz1"].duplicates, 1);
        assert_eq!(bank.stats["quiz1"].accepted, 2);
    }

    #[test]
    fn signals_category_and_count() {
        let sources = BankSources {
            base: set("quiz2", vec![json!({"question": "Q", "options": ["A", "B"], "correct": "B"})]),
            inventory: inventory(),
            ..Default::default()
        };
        let bank = build_bank(&sources, &BuilderConfig::default(), &mut SequenceSource::zeros()).unwrap();
        assert_eq!(bank.signal_count, 5);
        let signals = bank.category(SIGNALS_CATEGORY).unwrap();
        assert!(signals.iter().all(|q| q.options.len() == 4));
        assert!(signals.iter().all(|q| q.image.as_deref().is_some_and(|i| !i.contains('\\'))));
        assert!(bank.category(DEFINITIONS_CATEGORY).is_none());
    }

    #[test]
    fn malformed_records_are_counted_not_fatal() {
        let sources = BankSources {
            base: set(
                "quiz1",
                vec![
                    json!({"question": "Ok", "options": ["A", "B"], "correct": "A"}),
                    json!({"options": ["A", "B"], "correct": "A"}),
                    json!({"question": "Uno", "options": ["A"], "correct": "A"}),
                ],
            ),
            inventory: inventory(),
            ..Default::default()
        };
        let bank = build_bank(&sources, &BuilderConfig::default(), &mut SequenceSource::zeros()).unwrap();
        assert_eq!(bank.category("quiz1").unwrap().len(), 1);
        assert_eq!(bank.stats["quiz1"].rejected, 2);
    }

    #[test]
    fn placeholders_expand_from_base_catalogs() {
        let mut base = set(
            "quiz1",
            vec![json!({"question": "¿Cómo se llama la señal {code}?", "catalog": "reglamentarias"})],
        );
        base.catalogs.insert(
            "reglamentarias".into(),
            vec![
                CatalogEntry { code: "SR-01".into(), name: "Pare".into() },
                CatalogEntry { code: "SR-02".into(), name: "Ceda el paso".into() },
                CatalogEntry { code: "SR-30".into(), name: "Velocidad máxima".into() },
            ],
        );
        let supplementary = set(
            "quiz2",
            vec![
                json!({"question": "Señal {code}", "catalog": "reglamentarias"}),
                json!({"question": "Sin catálogo", "catalog": "preventivas"}),
            ],
        );
        let sources = BankSources {
            base,
            supplementary: Some(supplementary),
            inventory: inventory(),
            definitions: None,
        };
        let bank = build_bank(&sources, &BuilderConfig::default(), &mut RngSource::seeded(5)).unwrap();

        let quiz1 = bank.category("quiz1").unwrap();
        assert_eq!(quiz1.len(), 3);
        assert_eq!(quiz1[0].prompt, "¿Cómo se llama la señal SR-01?");
        assert_eq!(quiz1[0].image.as_deref(), Some("senales/0.png"));
        assert!(quiz1[2].image.is_none());

        assert_eq!(bank.category("quiz2").unwrap().len(), 3);
        assert_eq!(bank.stats["quiz2"].rejected, 1);
    }

    #[test]
    fn definitions_become_a_category() {
        let sources = BankSources {
            base: QuestionSet::default(),
            inventory: Vec::new(),
            supplementary: None,
            definitions: Some(vec![
                Definition { term: "Calzada".into(), definition: "Zona para vehículos".into() },
                Definition { term: "Andén".into(), definition: "Zona para peatones".into() },
            ]),
        };
        let bank = build_bank(&sources, &BuilderConfig::default(), &mut SequenceSource::zeros()).unwrap();
        assert_eq!(bank.category(DEFINITIONS_CATEGORY).unwrap().len(), 2);
        assert_eq!(bank.signal_count, 0);
    }

    #[test]
    fn empty_build_is_an_error() {
        let sources = BankSources::default();
        let err = build_bank(&sources, &BuilderConfig::default(), &mut SequenceSource::zeros()).unwrap_err();
        assert!(matches!(err, BuildError::EmptyBank));
    }
}
