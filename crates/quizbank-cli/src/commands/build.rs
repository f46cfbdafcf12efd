//! The `quizbank build` command.

use std::path::PathBuf;

use anyhow::Result;

pub async fn execute(config_path: Option<PathBuf>, output: PathBuf, seed: Option<u64>) -> Result<()> {
    let (_, bank, _) = super::load(config_path, seed).await?;

    bank.save_json(&output)?;
    tracing::info!(
        "saved bank built at {} to {}",
        bank.built_at.to_rfc3339(),
        output.display()
    );
    for (name, questions) in &bank.categories {
        eprintln!("  {name}: {} questions", questions.len());
    }
    println!(
        "Bank with {} questions written to {}",
        bank.total_questions(),
        output.display()
    );

    Ok(())
}
