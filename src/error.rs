use std::path::PathBuf;

use thiserror::Error;

/// Problems with the difficulty configuration. These are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config must have at least one difficulty")]
    NoDifficulties,

    #[error("Duplicate difficulty id: \"{0}\"")]
    DuplicateId(String),

    #[error("blankPercentage for \"{id}\" must be > 0 and < 1, got {value}")]
    BlankPercentageOutOfRange { id: String, value: f64 },

    #[error("Failed to read difficulty config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid difficulty config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems loading word lists.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid word list {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Word list {0} is not valid UTF-8")]
    Encoding(PathBuf),
}

/// Reasons a practice session cannot start or accept an action.
#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("There are no words to practice")]
    EmptyWordList,

    #[error("Unknown difficulty: \"{0}\"")]
    UnknownDifficulty(String),

    #[error("A difficulty has already been chosen for this session")]
    DifficultyAlreadyChosen,
}
