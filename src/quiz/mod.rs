pub mod catalog;
pub mod round;
pub mod session;
pub mod timer;

use std::fmt;
use std::str::FromStr;

/// Proficiency bucket selecting which word collection is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Level {
    A1,
    A2,
    #[serde(rename = "VERBS")]
    Verbs,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::A1, Level::A2, Level::Verbs];

    /// Name of the bundled dataset file for this level.
    pub fn file_name(&self) -> &'static str {
        match self {
            Level::A1 => "a1.json",
            Level::A2 => "a2.json",
            Level::Verbs => "verbs.json",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::Verbs => "Verbs",
        };
        f.write_str(name)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a1" => Ok(Level::A1),
            "a2" => Ok(Level::A2),
            "verbs" | "verb" => Ok(Level::Verbs),
            other => Err(format!("unknown level '{}'", other)),
        }
    }
}

/// Language the translations are shown (and compared) in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Chinese,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "English",
            Language::Chinese => "中文",
        };
        f.write_str(name)
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "zh" | "chinese" | "中文" => Ok(Language::Chinese),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

/// One translation per supported display language.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Translations {
    pub english: String,
    pub chinese: String,
}

impl Translations {
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::English => &self.english,
            Language::Chinese => &self.chinese,
        }
    }
}

/// A vocabulary entry. Two words are the same word when their ids match,
/// whatever their texts say.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Word {
    pub id: u32,
    #[serde(rename = "spanish")]
    pub source_text: String,
    #[serde(flatten)]
    pub translations: Translations,
    pub category: String,
    pub level: Level,
}

impl Word {
    #[cfg(test)]
    pub fn new(id: u32, source_text: &str, english: &str, chinese: &str, level: Level) -> Self {
        Self {
            id,
            source_text: source_text.to_string(),
            translations: Translations {
                english: english.to_string(),
                chinese: chinese.to_string(),
            },
            category: String::new(),
            level,
        }
    }

    pub fn translation(&self, language: Language) -> &str {
        self.translations.get(language)
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Word {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_identity_is_the_id() {
        let a = Word::new(1, "banco", "bank", "银行", Level::A1);
        let b = Word::new(1, "banco", "bench", "长椅", Level::A1);
        let c = Word::new(2, "banco", "bank", "银行", Level::A1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn parses_levels_and_languages_from_user_input() {
        assert_eq!("A1".parse::<Level>(), Ok(Level::A1));
        assert_eq!(" verbs ".parse::<Level>(), Ok(Level::Verbs));
        assert!("b2".parse::<Level>().is_err());
        assert_eq!("zh".parse::<Language>(), Ok(Language::Chinese));
        assert_eq!("English".parse::<Language>(), Ok(Language::English));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn deserializes_dataset_record() {
        let json = r#"{"id":7,"spanish":"gato","english":"cat","chinese":"猫","category":"animals","level":"VERBS"}"#;
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word.id, 7);
        assert_eq!(word.source_text, "gato");
        assert_eq!(word.translation(Language::Chinese), "猫");
        assert_eq!(word.level, Level::Verbs);
    }
}
