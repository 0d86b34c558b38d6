//! The `quizforge show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_terms::load_config_from;

pub fn execute(name: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let record = config.store().load(&name)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
