//! Merging normalized question collections.
//!
//! Collections are processed in priority order and the first question seen
//! for an id wins; later questions with the same id are skipped.

use std::collections::{BTreeMap, HashSet};

use crate::model::Question;

/// Merge collections in priority order, keeping the first question per id.
pub fn merge_collections<I>(collections: I) -> Vec<Question>
where
    I: IntoIterator<Item = Vec<Question>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for collection in collections {
        for question in collection {
            if seen.insert(question.id.clone()) {
                merged.push(question);
            } else {
                tracing::debug!("skipping duplicate question {}", question.id);
            }
        }
    }
    merged
}

/// Category-keyed merge result.
#[derive(Debug, Clone, Default)]
pub struct MergedCategories {
    pub categories: BTreeMap<String, Vec<Question>>,
    /// Number of questions skipped per category as duplicates.
    pub skipped: BTreeMap<String, usize>,
}

/// Merge category maps in priority order; ids are deduplicated per category.
pub fn merge_categories<I>(sources: I) -> MergedCategories
where
    I: IntoIterator<Item = BTreeMap<String, Vec<Question>>>,
{
    let mut pending: BTreeMap<String, Vec<Vec<Question>>> = BTreeMap::new();
    for source in sources {
        for (name, questions) in source {
            pending.entry(name).or_default().push(questions);
        }
    }

    let mut result = MergedCategories::default();
    for (name, collections) in pending {
        let total: usize = collections.iter().map(Vec::len).sum();
        let merged = merge_collections(collections);
        result.skipped.insert(name.clone(), total - merged.len());
        result.categories.insert(name, merged);
    }
    result
}
