//! Wrong-answer synthesis.
//!
//! Given the correct label and a pool of labeled items, pick distinct wrong
//! labels at random. When the pool runs dry, generic sign names fill the gap.

use std::collections::HashSet;

use crate::model::Labeled;
use crate::random::RandomSource;

/// Number of distractors per question (four options in total).
pub const DEFAULT_DISTRACTOR_COUNT: usize = 3;

/// Generic sign names used when the pool cannot supply enough labels.
pub const FALLBACK_LABELS: &[&str] = &[
    "Pare",
    "Ceda el paso",
    "Prohibido adelantar",
    "Prohibido parquear",
    "Velocidad máxima permitida",
    "Zona escolar",
    "Curva peligrosa",
    "Vía en construcción",
];

/// Picks wrong options for a question.
#[derive(Debug, Clone)]
pub struct DistractorSynthesizer {
    count: usize,
    fallback: Vec<String>,
}

impl Default for DistractorSynthesizer {
    fn default() -> Self {
        Self {
            count: DEFAULT_DISTRACTOR_COUNT,
            fallback: FALLBACK_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DistractorSynthesizer {
    pub fn new(count: usize, fallback: Vec<String>) -> Self {
        Self { count, fallback }
    }

    /// Same count, no fallback labels.
    pub fn without_fallback(&self) -> Self {
        Self {
            count: self.count,
            fallback: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Return up to `count` distinct labels, none equal to `correct`.
    ///
    /// Pool labels are sampled without replacement; fallback labels are
    /// appended in list order. The result has no meaningful order.
    pub fn synthesize<L: Labeled>(
        &self,
        correct: &str,
        pool: &[L],
        rng: &mut dyn RandomSource,
    ) -> Vec<String> {
        let correct = correct.trim();

        let mut seen = HashSet::new();
        let mut candidates: Vec<&str> = Vec::new();
        for item in pool {
            let label = item.label().trim();
            if label.is_empty() || label == correct {
                continue;
            }
            if seen.insert(label) {
                candidates.push(label);
            }
        }

        let mut chosen: Vec<String> = Vec::with_capacity(self.count);
        while chosen.len() < self.count && !candidates.is_empty() {
            let idx = rng.next_index(candidates.len());
            chosen.push(candidates.swap_remove(idx).to_string());
        }

        for label in &self.fallback {
            if chosen.len() >= self.count {
                break;
            }
            let label = label.trim();
            if label.is_empty() || label == correct || chosen.iter().any(|c| c == label) {
                continue;
            }
            chosen.push(label.to_string());
        }

        if chosen.len() < self.count {
            tracing::debug!(
                "only {} of {} distractors available for '{correct}'",
                chosen.len(),
                self.count
            );
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, SequenceSource};

    #[test]
    fn large_pool_yields_three_distinct() {
        let pool = vec!["Pare", "Ceda el paso", "Zona escolar", "Curva peligrosa", "Pare"];
        let synth = DistractorSynthesizer::default();
        for seed in 0..20 {
            let picked = synth.synthesize("Pare", &pool, &mut RngSource::seeded(seed));
            assert_eq!(picked.len(), 3);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(!picked.iter().any(|p| p == "Pare"));
        }
    }

    #[test]
    fn pool_labels_come_first() {
        let pool = vec!["A", "B", "C", "D", "E"];
        let synth = DistractorSynthesizer::default();
        let picked = synth.synthesize("A", &pool, &mut SequenceSource::zeros());
        // zeros + swap_remove: B, then E (moved to 0), then D.
        assert_eq!(picked, vec!["B", "E", "D"]);
    }

    #[test]
    fn small_pool_is_topped_up_from_fallback() {
        let pool = vec!["Ceda el paso", "Ceda el paso", "Pare"];
        let synth = DistractorSynthesizer::default();
        let picked = synth.synthesize("Pare", &pool, &mut RngSource::seeded(1));
        assert_eq!(picked, vec!["Ceda el paso", "Prohibido adelantar", "Prohibido parquear"]);
    }

    #[test]
    fn exhausted_pool_and_fallback_degrade_count() {
        let synth = DistractorSynthesizer::new(3, vec!["Pare".into(), "Zona escolar".into()]);
        let picked = synth.synthesize("Pare", &["Zona escolar", "Pare"], &mut SequenceSource::zeros());
        assert_eq!(picked, vec!["Zona escolar"]);

        let none = synth
            .without_fallback()
            .synthesize("Pare", &["Pare", " "], &mut SequenceSource::zeros());
        assert!(none.is_empty());
    }

    #[test]
    fn result_size_is_min_of_three_and_available() {
        let fallback: Vec<String> = vec!["F1".into(), "F2".into(), "X".into()];
        let synth = DistractorSynthesizer::new(3, fallback);
        // One non-matching pool label plus fallback with the correct label inside.
        let picked = synth.synthesize("X", &["X", "P"], &mut SequenceSource::zeros());
        assert_eq!(picked.len(), 3);
        assert!(!picked.contains(&"X".to_string()));

        let small = DistractorSynthesizer::new(3, vec!["X".into(), "F1".into()]);
        let picked = small.synthesize("X", &["X", "P"], &mut SequenceSource::zeros());
        assert_eq!(picked, vec!["P", "F1"]);
    }
}
