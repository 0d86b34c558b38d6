//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SOURCE: &str = "CELL PARTS:\n\nThe mitochondria is the powerhouse of the cell. \
Every mitochondria makes ATP.\n\nPlants use chlorophyll to capture light.";

const TERMS: &str = r#"Here are the terms:
```json
{
  "words_to_blank": [
    {"word": "mitochondria", "importance": 0.9, "word_type": "noun"},
    {"word": "chlorophyll", "importance": 0.8, "word_type": "noun"}
  ],
  "difficulty": "Medium"
}
```"#;

/// A `quizforge` command isolated inside `dir`.
fn quizforge(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizforge").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("QUIZFORGE_DATA_DIR", dir.join("data"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_inputs(dir: &Path) {
    std::fs::write(dir.join("source.txt"), SOURCE).unwrap();
    std::fs::write(dir.join("terms.json"), TERMS).unwrap();
}

fn build(dir: &Path, name: &str) -> Command {
    let mut cmd = quizforge(dir);
    cmd.args(["build", "--source", "source.txt", "--terms", "terms.json", "--name", name]);
    cmd
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cloze quiz builder"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizforge"));
}

#[test]
fn build_writes_sheet_and_record() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    build(dir.path(), "cells")
        .args(["--format", "all"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cells"))
        .stderr(predicate::str::contains("Wrote"));

    let quizzes = dir.path().join("data/quizzes");
    let text = std::fs::read_to_string(quizzes.join("cells.txt")).unwrap();
    assert!(text.contains(&format!("The mit{} is the powerhouse", "_".repeat(18))));
    assert!(text.contains("Answer Key\nmitochondria    mitochondria    chlorophyll"));
    assert!(quizzes.join("cells.html").exists());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(quizzes.join("cells.json")).unwrap())
            .unwrap();
    assert_eq!(json["metadata"]["total_blanks"], 3);

    let record: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("data/quiz_metadata/cells.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(record["version"], "3.0");
    assert_eq!(record["generation_method"], "llm_selection_local_building");
    assert_eq!(record["num_blanks"], 3);
    assert_eq!(record["num_paragraphs"], 3);
}

#[test]
fn build_split_page_hard() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    build(dir.path(), "cells-hard")
        .args(["--difficulty", "hard", "--style", "split-page", "--max-occurrences", "1"])
        .assert()
        .success();

    let text =
        std::fs::read_to_string(dir.path().join("data/quizzes/cells-hard.txt")).unwrap();
    assert!(text.contains(&format!("The m{} is", "_".repeat(22))));
    assert!(text.contains("Every mitochondria makes ATP."));
    assert!(text.contains("Answers: mitochondria\n"));
    assert!(text.contains("Answers: chlorophyll\n"));
}

#[test]
fn build_rejects_duplicate_name() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    build(dir.path(), "cells").assert().success();
    build(dir.path(), "cells")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn build_rejects_bad_arguments() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    build(dir.path(), "a")
        .args(["--difficulty", "brutal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));

    build(dir.path(), "b")
        .args(["--style", "poster"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown quiz style"));

    build(dir.path(), "c")
        .args(["--max-occurrences", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));

    build(dir.path(), "d")
        .args(["--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));

    build(dir.path(), "bad/name")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not usable as a file name"));

    assert!(!dir.path().join("data/quiz_metadata").exists());
}

#[test]
fn build_rejects_malformed_terms() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    std::fs::write(dir.path().join("terms.json"), "I could not pick any words.").unwrap();

    build(dir.path(), "cells")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse terms file"));
}

#[test]
fn build_without_terms_needs_a_term_source() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    quizforge(dir.path())
        .args(["build", "--source", "source.txt", "--name", "cells"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no term source is configured"));
}

#[test]
fn build_with_directory_term_source() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    let selections = dir.path().join("selections");
    std::fs::create_dir_all(&selections).unwrap();
    std::fs::write(selections.join("cells.txt"), TERMS).unwrap();

    let config = dir.path().join("custom.toml");
    std::fs::write(
        &config,
        format!(
            "default_difficulty = \"Easy\"\n\n[term_source]\ntype = \"directory\"\ndir = {:?}\n",
            selections.to_string_lossy()
        ),
    )
    .unwrap();

    quizforge(dir.path())
        .args(["build", "--source", "source.txt", "--name", "cells", "--config"])
        .arg(&config)
        .assert()
        .success();

    let record: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("data/quiz_metadata/cells.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(record["difficulty"], "Easy");
}

#[test]
fn list_and_show() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    quizforge(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No quizzes found"));

    build(dir.path(), "cells").assert().success();

    quizforge(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("cells"))
        .stdout(predicate::str::contains("1 quiz(zes)"));

    quizforge(dir.path())
        .args(["show", "--name", "cells"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"quiz_style\": \"Full Page\""))
        .stdout(predicate::str::contains("\"version\": \"3.0\""));

    quizforge(dir.path())
        .args(["show", "--name", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizforge(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"))
        .stdout(predicate::str::contains("Created quiz-sets/example.toml"));

    assert!(dir.path().join("quizforge.toml").exists());
    assert!(dir.path().join("quiz-sets/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizforge(dir.path()).arg("init").assert().success();
    quizforge(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_example_quiz_set() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path()).arg("init").assert().success();

    quizforge(dir.path())
        .args(["validate", "--manifest", "quiz-sets/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Quiz Set (2 quizzes)"))
        .stdout(predicate::str::contains("All quiz sets valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("set.toml"),
        r#"
[quiz_set]
id = "w"
name = "Warnings"

[[quizzes]]
name = "one"
source_file = "missing.txt"

[[quizzes]]
name = "one"
source_text = "Some text."
terms = [{ word = "text" }]
"#,
    )
    .unwrap();

    quizforge(dir.path())
        .args(["validate", "--manifest", "set.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[one] WARNING: source_file not found"))
        .stdout(predicate::str::contains("term source will be asked"))
        .stdout(predicate::str::contains("duplicate quiz name"));
}

#[test]
fn validate_rejects_conflicting_sources() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("set.toml"),
        r#"
[quiz_set]
id = "bad"
name = "Bad"

[[quizzes]]
name = "both"
source_text = "text"
source_file = "file.txt"
"#,
    )
    .unwrap();

    quizforge(dir.path())
        .args(["validate", "--manifest", "set.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("both source_file and source_text"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path())
        .args(["validate", "--manifest", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn run_example_quiz_set() {
    let dir = TempDir::new().unwrap();
    quizforge(dir.path()).arg("init").assert().success();

    quizforge(dir.path())
        .args(["run", "--manifest", "quiz-sets", "--format", "text,html", "--parallelism", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Complete: 2/2 succeeded, 0 failed"));

    let quizzes = dir.path().join("data/quizzes");
    for name in ["photosynthesis", "cell-biology"] {
        assert!(quizzes.join(format!("{name}.txt")).exists());
        assert!(quizzes.join(format!("{name}.html")).exists());
        assert!(dir
            .path()
            .join(format!("data/quiz_metadata/{name}.json"))
            .exists());
    }

    let split = std::fs::read_to_string(quizzes.join("photosynthesis.txt")).unwrap();
    assert!(split.contains("Answers: "));
    assert!(!split.contains("Answer Key"));

    // Names are taken now.
    quizforge(dir.path())
        .args(["run", "--manifest", "quiz-sets/example.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quiz already exists"))
        .stderr(predicate::str::contains("2 quiz(zes) failed"));
}

#[test]
fn run_collects_failures_without_aborting() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("set.toml"),
        r#"
[quiz_set]
id = "mixed"
name = "Mixed"

[[quizzes]]
name = "good"
source_text = "Glucose is a sugar."
terms = [{ word = "Glucose", importance = 0.9 }]

[[quizzes]]
name = "missing-source"
source_file = "nope.txt"
terms = [{ word = "x" }]
"#,
    )
    .unwrap();

    quizforge(dir.path())
        .args(["run", "--manifest", "set.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR: missing-source"))
        .stderr(predicate::str::contains("1 quiz(zes) failed"));

    assert!(dir.path().join("data/quizzes/good.txt").exists());
    assert!(!dir.path().join("data/quizzes/missing-source.txt").exists());
}

#[test]
fn run_rejects_names_that_leave_the_data_dir() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir_all(&work).unwrap();
    std::fs::write(
        work.join("set.toml"),
        r#"
[quiz_set]
id = "escape"
name = "Escape"

[[quizzes]]
name = "../../escaped"
source_text = "Glucose is a sugar."
terms = [{ word = "Glucose" }]

[[quizzes]]
name = "kept"
source_text = "Glucose is a sugar."
terms = [{ word = "Glucose" }]
"#,
    )
    .unwrap();

    quizforge(&work)
        .args(["run", "--manifest", "set.toml", "--format", "all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("../../escaped: name is not usable"))
        .stderr(predicate::str::contains("1 quiz(zes) failed"));

    assert!(work.join("data/quizzes/kept.txt").exists());
    assert!(!work.join("escaped.txt").exists());
    assert!(!work.join("escaped.json").exists());
}

#[test]
fn show_rejects_names_that_leave_the_data_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("outside.json"), "{}").unwrap();

    quizforge(dir.path())
        .args(["show", "--name", "../../outside"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not usable as a file name"));
}
