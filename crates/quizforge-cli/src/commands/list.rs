//! The `quizforge list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_terms::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = config.store();
    let records = store.list()?;

    if records.is_empty() {
        println!(
            "No quizzes found in {}. Run `quizforge build` to create one.",
            store.root().display()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Name",
        "Difficulty",
        "Style",
        "Paragraphs",
        "Blanks",
        "Coverage",
        "Generated",
    ]);
    for record in &records {
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(record.difficulty),
            Cell::new(record.quiz_style),
            Cell::new(record.num_paragraphs),
            Cell::new(record.num_blanks),
            Cell::new(format!("{:.1}%", record.coverage_percentage)),
            Cell::new(record.generated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");
    println!("{} quiz(zes)", records.len());

    Ok(())
}
