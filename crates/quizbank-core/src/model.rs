//! Core data model types for quizbank.
//!
//! Raw records as they arrive from the question sets, the sign inventory, and
//! the definitions table, plus the canonical [`Question`] and [`Bank`] the
//! quiz screens consume.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category built from the sign inventory.
pub const SIGNALS_CATEGORY: &str = "signals";

/// Category built from the legal-definitions table.
pub const DEFINITIONS_CATEGORY: &str = "definitions";

/// A canonical multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier derived from the prompt and image reference.
    pub id: String,
    /// Text shown to the user.
    pub prompt: String,
    /// Optional reference to a visual asset (local path or URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional caption shown under the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_desc: Option<String>,
    /// Deduplicated candidate answers, exactly one equal to `correct`.
    pub options: Vec<String>,
    /// The exact option text that is the right answer.
    pub correct: String,
}

impl Question {
    /// Whether `answer` is the correct option.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct == answer
    }
}

/// A question-like record from a JSON question set. Not yet validated.
///
/// `prompt`, `answer` and `imageDesc` are accepted as alternate keys. When a
/// record carries both spellings the primary key wins unless it is blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct RawQuestion {
    pub question: Option<String>,
    /// Either an array of strings/numbers or one `|`/`;` delimited string.
    pub options: Option<serde_json::Value>,
    pub correct: Option<serde_json::Value>,
    pub image: Option<String>,
    pub image_desc: Option<String>,
    /// Names a catalog; the record is then a placeholder to expand.
    pub catalog: Option<String>,
}

/// Wire shape of [`RawQuestion`], keeping every key spelling apart.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    options: Option<serde_json::Value>,
    #[serde(default)]
    correct: Option<serde_json::Value>,
    #[serde(default)]
    answer: Option<serde_json::Value>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    image_desc: Option<String>,
    #[serde(default, rename = "imageDesc")]
    image_desc_camel: Option<String>,
    #[serde(default)]
    catalog: Option<String>,
}

fn blank_text(s: &Option<String>) -> bool {
    s.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn blank_value(v: &Option<serde_json::Value>) -> bool {
    match v {
        None | Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

impl From<RawRecord> for RawQuestion {
    fn from(r: RawRecord) -> Self {
        RawQuestion {
            question: if blank_text(&r.question) { r.prompt.or(r.question) } else { r.question },
            options: r.options,
            correct: if blank_value(&r.correct) { r.answer.or(r.correct) } else { r.correct },
            image: r.image,
            image_desc: if blank_text(&r.image_desc) {
                r.image_desc_camel.or(r.image_desc)
            } else {
                r.image_desc
            },
            catalog: r.catalog,
        }
    }
}

/// One numbered entry of a sign catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
    pub name: String,
}

/// A parsed question set: named raw-question lists plus sign catalogs.
#[derive(Debug, Clone, Default)]
pub struct QuestionSet {
    /// Raw records keyed by category (`quiz1`, `quiz2`, ...).
    pub categories: BTreeMap<String, Vec<RawQuestion>>,
    /// Catalogs referenced by placeholder records.
    pub catalogs: BTreeMap<String, Vec<CatalogEntry>>,
}

impl QuestionSet {
    /// Total number of raw records across all categories.
    pub fn record_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

/// One row of the sign inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    /// Display name of the sign.
    pub nombre_visible: String,
    /// Local asset path, possibly with Windows separators.
    #[serde(default)]
    pub archivo: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl InventoryRow {
    /// The image reference for this sign: the local path with `/`
    /// separators, or the remote URL when there is no local path.
    pub fn resolved_image(&self) -> Option<String> {
        let path = self.archivo.trim();
        if !path.is_empty() {
            return Some(path.replace('\\', "/"));
        }
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
    }
}

/// A legal term and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub definition: String,
}

/// Anything that exposes a display label usable as an answer option.
pub trait Labeled {
    fn label(&self) -> &str;
}

impl Labeled for InventoryRow {
    fn label(&self) -> &str {
        &self.nombre_visible
    }
}

impl Labeled for CatalogEntry {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Labeled for Definition {
    fn label(&self) -> &str {
        &self.definition
    }
}

impl Labeled for String {
    fn label(&self) -> &str {
        self
    }
}

impl Labeled for &str {
    fn label(&self) -> &str {
        self
    }
}

/// Per-category counters collected while building a bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Questions that made it into the bank.
    pub accepted: usize,
    /// Records dropped at normalization.
    pub rejected: usize,
    /// Valid questions skipped because their id was already present.
    pub duplicates: usize,
}

impl CategoryStats {
    pub(crate) fn absorb(&mut self, other: CategoryStats) {
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.duplicates += other.duplicates;
    }
}

/// The full categorized question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    /// When the bank was built.
    pub built_at: DateTime<Utc>,
    /// Questions keyed by category name.
    pub categories: BTreeMap<String, Vec<Question>>,
    /// Number of questions in the signs category, for bounds checks.
    pub signal_count: usize,
    /// Build counters keyed by category name.
    #[serde(default)]
    pub stats: BTreeMap<String, CategoryStats>,
}

impl Bank {
    /// Questions of a category, if it exists.
    pub fn category(&self, name: &str) -> Option<&[Question]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Category names in display order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn total_questions(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_row_prefers_local_path() {
        let row = InventoryRow {
            nombre_visible: "Pare".into(),
            archivo: r"senales\reglamentarias\SR-01.png".into(),
            url: Some("https://example.org/sr01.png".into()),
        };
        assert_eq!(
            row.resolved_image().as_deref(),
            Some("senales/reglamentarias/SR-01.png")
        );
    }

    #[test]
    fn inventory_row_falls_back_to_url() {
        let row = InventoryRow {
            nombre_visible: "Pare".into(),
            archivo: "  ".into(),
            url: Some(" https://example.org/sr01.png ".into()),
        };
        assert_eq!(
            row.resolved_image().as_deref(),
            Some("https://example.org/sr01.png")
        );

        let bare = InventoryRow {
            nombre_visible: "Pare".into(),
            archivo: String::new(),
            url: None,
        };
        assert!(bare.resolved_image().is_none());
    }

    #[test]
    fn raw_question_accepts_aliases() {
        let raw: RawQuestion = serde_json::from_str(
            r#"{"prompt": "¿Qué indica?", "options": ["A", "B"], "answer": "A", "imageDesc": "Foto"}"#,
        )
        .unwrap();
        assert_eq!(raw.question.as_deref(), Some("¿Qué indica?"));
        assert_eq!(raw.image_desc.as_deref(), Some("Foto"));
        assert!(raw.correct.is_some());
    }

    #[test]
    fn raw_question_with_both_spellings_keeps_the_record() {
        let raw: RawQuestion = serde_json::from_str(
            r#"{"question": "Principal", "prompt": "Alterna", "options": ["A", "B"],
                "correct": "A", "answer": "B", "image_desc": "", "imageDesc": "Foto"}"#,
        )
        .unwrap();
        assert_eq!(raw.question.as_deref(), Some("Principal"));
        assert_eq!(raw.correct, Some(serde_json::json!("A")));
        assert_eq!(raw.image_desc.as_deref(), Some("Foto"));

        let raw: RawQuestion =
            serde_json::from_str(r#"{"question": "  ", "prompt": "Alterna", "correct": null, "answer": "B"}"#).unwrap();
        assert_eq!(raw.question.as_deref(), Some("Alterna"));
        assert_eq!(raw.correct, Some(serde_json::json!("B")));
    }

    #[test]
    fn question_serializes_without_empty_image() {
        let q = Question {
            id: "abc".into(),
            prompt: "P".into(),
            image: None,
            image_desc: None,
            options: vec!["A".into(), "B".into()],
            correct: "A".into(),
        };
        let json = serde_json::to_string(&q).unwrap();
        assert!(!json.contains("image"));
        assert!(q.is_correct("A"));
        assert!(!q.is_correct("B"));
    }
}
