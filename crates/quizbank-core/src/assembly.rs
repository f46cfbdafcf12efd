//! Category-specific question assembly.
//!
//! Sign questions from the inventory, definition questions from the legal
//! glossary, and expansion of catalog placeholders into one question per
//! catalog entry.

use crate::distractors::DistractorSynthesizer;
use crate::matching::best_match;
use crate::model::{CatalogEntry, Definition, InventoryRow, Question, RawQuestion};
use crate::normalize::assemble;
use crate::random::RandomSource;

/// Default prompt for inventory sign questions.
pub const DEFAULT_SIGN_PROMPT: &str = "¿Cuál es el nombre de esta señal?";

/// Default prompt for definition questions; `{term}` is substituted.
pub const DEFAULT_DEFINITION_PROMPT: &str = "¿Cuál es la definición de \"{term}\"?";

/// Questions produced by one assembly step plus the inputs it dropped.
#[derive(Debug, Clone, Default)]
pub struct Assembled {
    pub questions: Vec<Question>,
    pub rejected: usize,
}

impl Assembled {
    fn push(&mut self, question: Option<Question>) {
        match question {
            Some(q) => self.questions.push(q),
            None => self.rejected += 1,
        }
    }
}

fn with_distractors(correct: &str, distractors: Vec<String>) -> Vec<String> {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct.to_string());
    options.extend(distractors);
    options
}

/// One "name this sign" question per inventory row.
///
/// Rows without any image reference are dropped: the prompt alone cannot
/// tell them apart.
pub fn sign_questions(
    inventory: &[InventoryRow],
    prompt: &str,
    synthesizer: &DistractorSynthesizer,
    rng: &mut dyn RandomSource,
) -> Assembled {
    let mut out = Assembled::default();
    for row in inventory {
        let name = row.nombre_visible.trim();
        let Some(image) = row.resolved_image() else {
            tracing::debug!("dropping sign '{name}': no image reference");
            out.rejected += 1;
            continue;
        };
        let distractors = synthesizer.synthesize(name, inventory, rng);
        out.push(assemble(
            prompt,
            Some(&image),
            None,
            with_distractors(name, distractors),
            name,
        ));
    }
    out
}

/// One question per glossary term; wrong answers are other definitions.
pub fn definition_questions(
    definitions: &[Definition],
    template: &str,
    synthesizer: &DistractorSynthesizer,
    rng: &mut dyn RandomSource,
) -> Assembled {
    let synthesizer = synthesizer.without_fallback();
    let mut out = Assembled::default();
    for entry in definitions {
        let term = entry.term.trim();
        if term.is_empty() {
            out.rejected += 1;
            continue;
        }
        let prompt = template.replace("{term}", term);
        let distractors = synthesizer.synthesize(&entry.definition, definitions, rng);
        out.push(assemble(
            &prompt,
            None,
            None,
            with_distractors(&entry.definition, distractors),
            &entry.definition,
        ));
    }
    out
}

/// Fill `{code}` and `{name}` in a placeholder prompt.
///
/// Without a `{code}` slot the code is appended so entries stay distinct.
pub fn render_placeholder(template: &str, entry: &CatalogEntry) -> String {
    let code = entry.code.trim();
    let mut prompt = template
        .replace("{code}", code)
        .replace("{name}", entry.name.trim());
    if !template.contains("{code}") && !code.is_empty() {
        prompt = format!("{} ({code})", prompt.trim_end());
    }
    prompt
}

/// Replace a placeholder record with one question per catalog entry.
///
/// Each entry's image is looked up by fuzzy name match in the inventory; an
/// entry without a match still yields a question, just without an image.
pub fn expand_placeholder(
    placeholder: &RawQuestion,
    catalog: &[CatalogEntry],
    inventory: &[InventoryRow],
    min_match_score: u32,
    synthesizer: &DistractorSynthesizer,
    rng: &mut dyn RandomSource,
) -> Assembled {
    let mut out = Assembled::default();
    let template = placeholder.question.as_deref().unwrap_or_default();
    if template.trim().is_empty() {
        out.rejected += 1;
        return out;
    }

    for entry in catalog {
        let name = entry.name.trim();
        let image = best_match(name, inventory, min_match_score).and_then(InventoryRow::resolved_image);
        if image.is_none() {
            tracing::debug!("no inventory image for catalog entry '{name}'");
        }
        let distractors = synthesizer.synthesize(name, catalog, rng);
        out.push(assemble(
            &render_placeholder(template, entry),
            image.as_deref(),
            placeholder.image_desc.as_deref(),
            with_distractors(name, distractors),
            name,
        ));
    }
    out
}
