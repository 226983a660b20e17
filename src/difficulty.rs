use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

static BUILTIN_CONFIG: &str = include_str!("../data/difficulties.json");

/// A named share of letters to hide in fill-in-the-blanks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyLevel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub blank_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    #[serde(default)]
    pub difficulties: Vec<DifficultyLevel>,
}

/// Checks the config once at load time. Sessions assume the levels they get are valid.
pub fn validate(config: DifficultyConfig) -> Result<Vec<DifficultyLevel>, ConfigError> {
    if config.difficulties.is_empty() {
        return Err(ConfigError::NoDifficulties);
    }

    let mut ids = HashSet::new();
    for level in &config.difficulties {
        if !ids.insert(level.id.as_str()) {
            return Err(ConfigError::DuplicateId(level.id.clone()));
        }
        let p = level.blank_percentage;
        if !(p > 0.0 && p < 1.0) {
            return Err(ConfigError::BlankPercentageOutOfRange {
                id: level.id.clone(),
                value: p,
            });
        }
    }

    Ok(config.difficulties)
}

pub fn parse(json: &str) -> Result<Vec<DifficultyLevel>, ConfigError> {
    let config: DifficultyConfig = serde_json::from_str(json)?;
    validate(config)
}

pub fn load_builtin() -> Result<Vec<DifficultyLevel>, ConfigError> {
    parse(BUILTIN_CONFIG)
}

pub fn load_file(path: &Path) -> Result<Vec<DifficultyLevel>, ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&json)
}

/// Loads from `path` when given, otherwise the bundled levels.
pub fn load(path: Option<&Path>) -> Result<Vec<DifficultyLevel>, ConfigError> {
    let levels = match path {
        Some(p) => load_file(p)?,
        None => load_builtin()?,
    };
    log::info!(
        "loaded {} difficulty levels: {}",
        levels.len(),
        levels.iter().map(|l| l.id.as_str()).collect::<Vec<_>>().join(", ")
    );
    Ok(levels)
}
