//! Bank persistence and build reports.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Bank;

/// One row of the build report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub questions: usize,
    pub with_image: usize,
    pub rejected: usize,
    pub duplicates: usize,
}

impl Bank {
    /// Save the bank as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize bank")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write bank to {}", path.display()))?;
        Ok(())
    }

    /// Load a bank from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read bank from {}", path.display()))?;
        let bank: Bank = serde_json::from_str(&content).context("failed to parse bank JSON")?;
        Ok(bank)
    }

    /// Per-category counts, in category order.
    pub fn report(&self) -> Vec<CategoryReport> {
        self.categories
            .iter()
            .map(|(name, questions)| {
                let stats = self.stats.get(name).copied().unwrap_or_default();
                CategoryReport {
                    category: name.clone(),
                    questions: questions.len(),
                    with_image: questions.iter().filter(|q| q.image.is_some()).count(),
                    rejected: stats.rejected,
                    duplicates: stats.duplicates,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;
    use crate::model::CategoryStats;
    use crate::normalize::assemble;

    fn sample_bank() -> Bank {
        let q1 = assemble("Q1", Some("img/a.png"), None, vec!["A".into(), "B".into()], "A").unwrap();
        let q2 = assemble("Q2", None, None, vec!["C".into(), "D".into()], "D").unwrap();
        Bank {
            built_at: Utc::now(),
            categories: BTreeMap::from([("quiz1".to_string(), vec![q1, q2])]),
            signal_count: 0,
            stats: BTreeMap::from([(
                "quiz1".to_string(),
                CategoryStats {
                    accepted: 2,
                    rejected: 3,
                    duplicates: 1,
                },
            )]),
        }
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("bank.json");
        let bank = sample_bank();
        bank.save_json(&path).unwrap();

        let loaded = Bank::load_json(&path).unwrap();
        assert_eq!(loaded.categories, bank.categories);
        assert_eq!(loaded.stats["quiz1"].rejected, 3);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Bank::load_json(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn report_counts_images() {
        let rows = sample_bank().report();
        assert_eq!(
            rows,
            vec![CategoryReport {
                category: "quiz1".into(),
                questions: 2,
                with_image: 1,
                rejected: 3,
                duplicates: 1,
            }]
        );
    }
}
