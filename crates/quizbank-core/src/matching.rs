//! Fuzzy sign-name matching.
//!
//! A scored linear scan over the inventory: exact match, substring
//! containment, and shared keywords each add to the score. The catalog and
//! inventory hold tens of entries, so no index is built.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::Labeled;

/// Score for names equal after folding.
pub const EXACT_SCORE: u32 = 100;
/// Score when one folded name contains the other.
pub const SUBSTRING_SCORE: u32 = 50;
/// Score per shared keyword.
pub const KEYWORD_SCORE: u32 = 10;
/// Default minimum score for a candidate to count as a match.
pub const DEFAULT_MIN_SCORE: u32 = KEYWORD_SCORE;

const MIN_KEYWORD_LEN: usize = 3;

const STOPWORDS: &[&str] = &[
    "del", "los", "las", "por", "para", "con", "una", "uno", "que", "sin", "senal",
];

/// Lowercase, strip accents, and reduce punctuation to single spaces.
///
/// Decomposes first so precomposed and combining-mark spellings fold alike.
pub fn fold(s: &str) -> String {
    let mapped: String = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn keywords(folded: &str) -> Vec<&str> {
    let mut words: Vec<&str> = folded
        .split(' ')
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN && !STOPWORDS.contains(w))
        .collect();
    words.sort_unstable();
    words.dedup();
    words
}

/// Similarity between a wanted name and a candidate label.
pub fn match_score(query: &str, candidate: &str) -> u32 {
    let q = fold(query);
    let c = fold(candidate);
    if q.is_empty() || c.is_empty() {
        return 0;
    }

    let mut score = 0;
    if q == c {
        score += EXACT_SCORE;
    } else if q.contains(&c) || c.contains(&q) {
        score += SUBSTRING_SCORE;
    }

    let candidate_words = keywords(&c);
    let shared = keywords(&q)
        .into_iter()
        .filter(|w| candidate_words.contains(w))
        .count() as u32;
    score + shared * KEYWORD_SCORE
}

/// Best candidate for `query`.
///
/// A verbatim (trimmed) label match wins outright. Otherwise the highest
/// score at or above `min_score` wins, the earliest candidate on ties.
pub fn best_match<'a, L: Labeled>(query: &str, candidates: &'a [L], min_score: u32) -> Option<&'a L> {
    let query = query.trim();
    if let Some(exact) = candidates.iter().find(|c| c.label().trim() == query) {
        return Some(exact);
    }

    let mut best: Option<(&L, u32)> = None;
    for candidate in candidates {
        let score = match_score(query, candidate.label());
        if score < min_score.max(1) {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }
    best.map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InventoryRow;

    #[test]
    fn fold_strips_accents_and_punctuation() {
        assert_eq!(fold("  Vía  en CONSTRUCCIÓN!! "), "via en construccion");
        assert_eq!(fold("Señal: ¿Peatón?"), "senal peaton");
    }

    #[test]
    fn decomposed_names_fold_like_precomposed() {
        assert_eq!(fold("Vi\u{301}a en construccio\u{301}n"), "via en construccion");
        assert_eq!(fold("Sen\u{303}al"), fold("Señal"));

        let inventory = vec![
            InventoryRow {
                nombre_visible: "Zona escolar".into(),
                archivo: "img/zona.png".into(),
                url: None,
            },
            InventoryRow {
                nombre_visible: "Vi\u{301}a en construccio\u{301}n".into(),
                archivo: "img/obras.png".into(),
                url: None,
            },
        ];
        let found = best_match("Vía en construcción", &inventory, DEFAULT_MIN_SCORE).unwrap();
        assert_eq!(found.archivo, "img/obras.png");
        assert!(match_score("Vía en construcción", &inventory[1].nombre_visible) >= EXACT_SCORE);
    }

    #[test]
    fn exact_beats_partial() {
        assert!(match_score("Ceda el paso", "CEDA EL PASO") > match_score("Ceda el paso", "Ceda el paso a peatones"));
        assert_eq!(match_score("Pare", "pare"), EXACT_SCORE + KEYWORD_SCORE);
    }

    #[test]
    fn keyword_overlap_scores() {
        assert_eq!(match_score("Prohibido girar a la izquierda", "Giro prohibido izquierda"), 2 * KEYWORD_SCORE);
        assert_eq!(match_score("Zona escolar", "Curva peligrosa"), 0);
        // stopwords and short words do not count
        assert_eq!(match_score("El de la", "El por la"), 0);
    }

    #[test]
    fn best_match_prefers_verbatim() {
        let names = vec!["Ceda el paso a peatones", "Ceda el paso"];
        assert_eq!(best_match("Ceda el paso", &names, DEFAULT_MIN_SCORE), Some(&"Ceda el paso"));
    }

    #[test]
    fn best_match_ties_go_to_first() {
        let names = vec!["Curva peligrosa derecha", "Curva peligrosa izquierda"];
        assert_eq!(best_match("Curva peligrosa", &names, DEFAULT_MIN_SCORE), Some(&"Curva peligrosa derecha"));
    }

    #[test]
    fn best_match_respects_threshold() {
        let names = vec!["Zona escolar", "Paso peatonal"];
        assert_eq!(best_match("Curva peligrosa", &names, DEFAULT_MIN_SCORE), None);
        assert_eq!(best_match("Zona de escuela escolar", &names, 30), None);
        assert_eq!(best_match("Zona de escuela escolar", &names, 20), Some(&"Zona escolar"));
    }
}
