use super::intent::TaggedIntent;
use super::models::{Record, find_duplicate_id};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    rows: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    intents: Vec<TaggedIntent>,
}

pub fn parse_seed_file(file_path: &str) -> Result<Vec<Record>> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read seed file: {}", file_path))?;
    parse_seed(&content).with_context(|| format!("Invalid seed file: {}", file_path))
}

pub fn parse_seed(content: &str) -> Result<Vec<Record>> {
    let seed: SeedFile = toml::from_str(content).context("Failed to parse seed rows")?;

    if let Some(id) = find_duplicate_id(&seed.rows) {
        bail!("Duplicate row id '{}'", id);
    }

    Ok(seed.rows)
}

/// Reads `[[intents]]` entries. Tags are checked later, when each entry is
/// turned into an `Intent`.
pub fn parse_intent_script(file_path: &str) -> Result<Vec<TaggedIntent>> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read intent script: {}", file_path))?;
    let script: ScriptFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse intent script: {}", file_path))?;
    Ok(script.intents)
}
