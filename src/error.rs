use std::path::PathBuf;

use thiserror::Error;

use crate::quiz::Level;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("level {0} has no words to build a round from")]
    EmptyCollection(Level),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse word list for level {level}: {source}")]
    Parse {
        level: Level,
        #[source]
        source: serde_json::Error,
    },
    #[error("level {level} lists word id {id} more than once")]
    DuplicateId { level: Level, id: u32 },
    #[error("word {id} is tagged {found} but was loaded for level {expected}")]
    LevelMismatch { expected: Level, found: Level, id: u32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}
