use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::quiz::{Level, Word};

const A1_WORDS: &str = include_str!("../../data/a1.json");
const A2_WORDS: &str = include_str!("../../data/a2.json");
const VERB_WORDS: &str = include_str!("../../data/verbs.json");

/// Word lists for every level, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    levels: HashMap<Level, Vec<Word>>,
}

impl Catalog {
    /// Word lists compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for level in Level::ALL {
            let raw = match level {
                Level::A1 => A1_WORDS,
                Level::A2 => A2_WORDS,
                Level::Verbs => VERB_WORDS,
            };
            catalog.insert(level, parse_level(level, raw)?);
        }
        Ok(catalog)
    }

    /// Word lists read from `dir`, one file per level (`a1.json`, `a2.json`, `verbs.json`).
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for level in Level::ALL {
            let path = dir.join(level.file_name());
            let raw = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            catalog.insert(level, parse_level(level, &raw)?);
        }
        Ok(catalog)
    }

    #[cfg(test)]
    pub fn from_levels(levels: impl IntoIterator<Item = (Level, Vec<Word>)>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }

    fn insert(&mut self, level: Level, words: Vec<Word>) {
        log::info!("Loaded {} words for level {}", words.len(), level);
        self.levels.insert(level, words);
    }

    /// Every word of `level`, in dataset order. Empty when the level has no list.
    pub fn level_data(&self, level: Level) -> &[Word] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn parse_level(level: Level, raw: &str) -> Result<Vec<Word>, CatalogError> {
    let words: Vec<Word> =
        serde_json::from_str(raw).map_err(|source| CatalogError::Parse { level, source })?;

    let mut seen = HashSet::new();
    for word in &words {
        if word.level != level {
            return Err(CatalogError::LevelMismatch {
                expected: level,
                found: word.level,
                id: word.id,
            });
        }
        if !seen.insert(word.id) {
            return Err(CatalogError::DuplicateId { level, id: word.id });
        }
    }
    Ok(words)
}
