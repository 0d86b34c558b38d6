//! The `quizforge init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("quizforge.toml").exists() {
        println!("quizforge.toml already exists, skipping.");
    } else {
        std::fs::write("quizforge.toml", SAMPLE_CONFIG)?;
        println!("Created quizforge.toml");
    }

    std::fs::create_dir_all("quiz-sets")?;
    let example_path = Path::new("quiz-sets/example.toml");
    if example_path.exists() {
        println!("quiz-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ_SET)?;
        println!("Created quiz-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizforge validate --manifest quiz-sets/example.toml");
    println!("  2. Run: quizforge run --manifest quiz-sets/example.toml --format all");
    println!("  3. Run: quizforge list");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

data_dir = "./quizforge-data"
default_difficulty = "Medium"
default_style = "Full Page"
max_occurrences_per_term = 2
parallelism = 4
max_retries = 3
retry_delay_ms = 1000

# Saved term selections for quizzes that list no terms of their own,
# looked up as <dir>/<quiz name>.json or .txt
# [term_source]
# type = "directory"
# dir = "./selections"
"#;

const EXAMPLE_QUIZ_SET: &str = r#"[quiz_set]
id = "example"
name = "Example Quiz Set"
description = "A small quiz set to get started"
default_difficulty = "Medium"

[[quizzes]]
name = "photosynthesis"
style = "Split Page"
source_text = """
PHOTOSYNTHESIS:

Photosynthesis is the process by which plants turn light into chemical energy. It takes place in the chloroplasts, which contain chlorophyll.

Carbon dioxide and water go in; glucose and oxygen come out. The glucose is stored as starch.
"""

[[quizzes.terms]]
word = "Photosynthesis"
importance = 0.95
word_type = "concept"

[[quizzes.terms]]
word = "chlorophyll"
importance = 0.9
word_type = "noun"

[[quizzes.terms]]
word = "chloroplasts"
importance = 0.8
word_type = "noun"

[[quizzes.terms]]
word = "glucose"
importance = 0.7
word_type = "noun"

[[quizzes]]
name = "cell-biology"
difficulty = "Hard"
source_text = """
The mitochondria is the powerhouse of the cell. It produces ATP through cellular respiration.
"""

[[quizzes.terms]]
word = "mitochondria"
importance = 0.9
word_type = "noun"

[[quizzes.terms]]
word = "ATP"
importance = 0.8
word_type = "acronym"
"#;
