//! Raw record normalization.
//!
//! Turns one raw record into zero or one canonical [`Question`]. Records that
//! cannot be shown (no prompt, no answer, unreadable options, fewer than two
//! options after cleaning) are dropped here rather than reported as errors.

use std::collections::HashSet;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::model::{Question, RawQuestion};

/// Minimum number of options a question needs to be shown.
pub const MIN_OPTIONS: usize = 2;

/// Separates the prompt from the image in the id hash input.
const ID_SEPARATOR: char = '\u{1f}';

/// Trim and collapse internal whitespace runs to one space.
pub fn normalize_prompt(prompt: &str) -> String {
    prompt.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim and switch Windows separators to `/`.
pub fn normalize_image_path(path: &str) -> String {
    path.trim().replace('\\', "/")
}

/// Deterministic id over the normalized prompt and image reference.
pub fn question_id(prompt: &str, image: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_prompt(prompt).as_bytes());
    hasher.update(ID_SEPARATOR.to_string().as_bytes());
    if let Some(image) = image {
        hasher.update(normalize_image_path(image).as_bytes());
    }
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}

/// Trim, drop empties, and deduplicate keeping first occurrences.
pub fn clean_options<I, S>(options: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();
    for opt in options {
        let opt = opt.as_ref().trim();
        if opt.is_empty() {
            continue;
        }
        if seen.insert(opt.to_string()) {
            cleaned.push(opt.to_string());
        }
    }
    cleaned
}

/// Read an options field: an array of strings/numbers, or one string split
/// on `|` (or `;` when there is no `|`). Returns `None` when unreadable.
pub fn parse_options(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items.iter().map(scalar_text).collect(),
        Value::String(s) => {
            let sep = if s.contains('|') { '|' } else { ';' };
            Some(s.split(sep).map(str::to_string).collect())
        }
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Build a question from already extracted parts.
///
/// `correct` is trimmed and prepended to the options if missing.
pub fn assemble(
    prompt: &str,
    image: Option<&str>,
    image_desc: Option<&str>,
    options: Vec<String>,
    correct: &str,
) -> Option<Question> {
    let prompt = normalize_prompt(prompt);
    let correct = correct.trim();
    if prompt.is_empty() || correct.is_empty() {
        return None;
    }

    let mut options = clean_options(options);
    if !options.iter().any(|o| o == correct) {
        options.insert(0, correct.to_string());
    }
    if options.len() < MIN_OPTIONS {
        return None;
    }

    let image = image
        .map(normalize_image_path)
        .filter(|i| !i.is_empty());
    let image_desc = image_desc
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Some(Question {
        id: question_id(&prompt, image.as_deref()),
        prompt,
        image,
        image_desc,
        options,
        correct: correct.to_string(),
    })
}

/// Normalize one raw question record.
pub fn normalize(raw: &RawQuestion) -> Option<Question> {
    let Some(prompt) = raw.question.as_deref() else {
        tracing::debug!("dropping record without prompt");
        return None;
    };
    let options = match raw.options.as_ref() {
        Some(value) => match parse_options(value) {
            Some(options) => options,
            None => {
                tracing::debug!("dropping '{prompt}': unreadable options");
                return None;
            }
        },
        None => Vec::new(),
    };
    let correct = raw.correct.as_ref().and_then(scalar_text).unwrap_or_default();

    let question = assemble(
        prompt,
        raw.image.as_deref(),
        raw.image_desc.as_deref(),
        options,
        &correct,
    );
    if question.is_none() {
        tracing::debug!("dropping '{prompt}': no usable answer or fewer than {MIN_OPTIONS} options");
    }
    question
}
