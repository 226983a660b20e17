use include_dir::{include_dir, Dir, DirEntry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::CatalogError;
use crate::util::natural_cmp;

static UNITS_DIR: Dir = include_dir!("data/units");

/// File name every unit directory must contain.
pub const WORDS_FILE: &str = "words.json";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    pub en: String,
    pub pl: String,
}

impl Word {
    pub fn new(en: impl Into<String>, pl: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            pl: pl.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordGroup {
    pub name: String,
    pub words: Vec<Word>,
}

/// On-disk shape of a unit's `words.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordsFile {
    pub title: String,
    pub groups: Vec<WordGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: String,
    pub title: String,
    /// All group words concatenated in group order.
    pub words: Vec<Word>,
    pub groups: Vec<WordGroup>,
}

impl Unit {
    pub fn from_file(id: impl Into<String>, file: WordsFile) -> Self {
        let words = file
            .groups
            .iter()
            .flat_map(|g| g.words.iter().cloned())
            .collect();
        Self {
            id: id.into(),
            title: file.title,
            words,
            groups: file.groups,
        }
    }

    /// Words of the selected groups, in group order. Out of range indices are ignored.
    pub fn words_for_groups(&self, selected: &[usize]) -> Vec<Word> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(idx, _)| selected.contains(idx))
            .flat_map(|(_, g)| g.words.iter().cloned())
            .collect()
    }
}

/// Extracts the unit id from a `<id>/words.json` path relative to the catalog root.
pub fn unit_id_from_path(path: &Path) -> Option<String> {
    let parts: Vec<&str> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;

    match parts.as_slice() {
        [id, file] if *file == WORDS_FILE && !id.is_empty() => Some(id.to_string()),
        _ => None,
    }
}

/// Builds units from `(relative path, words file)` entries. Entries whose path
/// is not `<id>/words.json` are skipped. Units come back ordered by id with
/// numbers compared numerically.
pub fn parse_units<I, P>(entries: I) -> Vec<Unit>
where
    I: IntoIterator<Item = (P, WordsFile)>,
    P: AsRef<Path>,
{
    let mut units: Vec<Unit> = entries
        .into_iter()
        .filter_map(|(path, file)| match unit_id_from_path(path.as_ref()) {
            Some(id) => Some(Unit::from_file(id, file)),
            None => {
                log::debug!("skipping {}: not a unit word list", path.as_ref().display());
                None
            }
        })
        .collect();

    units.sort_by(|a, b| natural_cmp(&a.id, &b.id));
    units
}

fn parse_words_file(path: &Path, contents: &str) -> Result<WordsFile, CatalogError> {
    serde_json::from_str(contents).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Units bundled into the binary.
pub fn load_builtin() -> Result<Vec<Unit>, CatalogError> {
    let mut entries = Vec::new();

    for entry in UNITS_DIR.entries() {
        let DirEntry::Dir(dir) = entry else {
            continue;
        };
        for file in dir.files() {
            let path = file.path();
            if unit_id_from_path(path).is_none() {
                continue;
            }
            let contents = file
                .contents_utf8()
                .ok_or_else(|| CatalogError::Encoding(path.to_path_buf()))?;
            entries.push((path.to_path_buf(), parse_words_file(path, contents)?));
        }
    }

    Ok(parse_units(entries))
}

/// Units from a directory on disk laid out as `<root>/<id>/words.json`.
pub fn load_dir(root: &Path) -> Result<Vec<Unit>, CatalogError> {
    let read_err = |path: &Path, source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| read_err(root, e))? {
        let entry = entry.map_err(|e| read_err(root, e))?;
        let words_path = entry.path().join(WORDS_FILE);
        if !words_path.is_file() {
            continue;
        }
        let contents = fs::read_to_string(&words_path).map_err(|e| read_err(&words_path, e))?;
        let relative = PathBuf::from(entry.file_name()).join(WORDS_FILE);
        entries.push((relative, parse_words_file(&words_path, &contents)?));
    }

    Ok(parse_units(entries))
}

/// Loads from `dir` when given, otherwise the bundled units.
pub fn load(dir: Option<&Path>) -> Result<Vec<Unit>, CatalogError> {
    let units = match dir {
        Some(root) => load_dir(root)?,
        None => load_builtin()?,
    };
    log::info!("loaded {} units", units.len());
    Ok(units)
}
