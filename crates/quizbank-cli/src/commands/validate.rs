//! The `quizbank validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::report::CategoryReport;
use quizbank_core::Bank;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (config, bank, _) = super::load(config_path, None).await?;

    println!(
        "Question bank from {} ({} questions)",
        config.assets_dir.display(),
        bank.total_questions()
    );
    let rows = bank.report();
    print_table(&rows);

    let mut total_warnings = 0;
    for row in &rows {
        if row.questions == 0 {
            println!("  [{}] WARNING: category is empty", row.category);
            total_warnings += 1;
        }
        if row.rejected > 0 {
            println!(
                "  [{}] WARNING: {} record(s) dropped during normalization",
                row.category, row.rejected
            );
            total_warnings += 1;
        }
    }

    if total_warnings == 0 {
        println!("All sources valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }
    print_signal_bounds(&bank);

    Ok(())
}

fn print_table(rows: &[CategoryReport]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Category",
        "Questions",
        "With image",
        "Dropped",
        "Duplicates",
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(row.questions),
            Cell::new(row.with_image),
            Cell::new(row.rejected),
            Cell::new(row.duplicates),
        ]);
    }
    println!("{table}");
}

fn print_signal_bounds(bank: &Bank) {
    println!("Sign questions available: {}", bank.signal_count);
}
