//! Normalization settings, read from a JSON file such as:
//!
//! ```json
//! { "remove_stop_words": true, "stop_words_language": "english", "use_stemming": false }
//! ```
//!
//! Values of the wrong type fall back to their defaults instead of failing.

use crate::error::ConfigError;
use rust_stemmers::Algorithm;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Languages with both a Snowball stemmer and a stopword list slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    Arabic,
    Danish,
    Dutch,
    #[default]
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl Language {
    pub const ALL: [Language; 18] = [
        Language::Arabic,
        Language::Danish,
        Language::Dutch,
        Language::English,
        Language::Finnish,
        Language::French,
        Language::German,
        Language::Greek,
        Language::Hungarian,
        Language::Italian,
        Language::Norwegian,
        Language::Portuguese,
        Language::Romanian,
        Language::Russian,
        Language::Spanish,
        Language::Swedish,
        Language::Tamil,
        Language::Turkish,
    ];

    /// Lower-case name, also the stopword file name.
    pub fn name(self) -> &'static str {
        match self {
            Language::Arabic => "arabic",
            Language::Danish => "danish",
            Language::Dutch => "dutch",
            Language::English => "english",
            Language::Finnish => "finnish",
            Language::French => "french",
            Language::German => "german",
            Language::Greek => "greek",
            Language::Hungarian => "hungarian",
            Language::Italian => "italian",
            Language::Norwegian => "norwegian",
            Language::Portuguese => "portuguese",
            Language::Romanian => "romanian",
            Language::Russian => "russian",
            Language::Spanish => "spanish",
            Language::Swedish => "swedish",
            Language::Tamil => "tamil",
            Language::Turkish => "turkish",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.name() == name)
    }

    pub(crate) fn algorithm(self) -> Algorithm {
        match self {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::Finnish => Algorithm::Finnish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Greek => Algorithm::Greek,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Tamil => Algorithm::Tamil,
            Language::Turkish => Algorithm::Turkish,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub remove_stop_words: bool,
    pub language: Language,
    /// As requested; see [`Config::stemming_enabled`] for what is applied.
    pub use_stemming: bool,
    /// Directory with one stopword file per language.
    pub stopwords_dir: Option<PathBuf>,
}

#[derive(Deserialize)]
struct RawConfig {
    remove_stop_words: Option<Value>,
    stop_words_language: Option<Value>,
    use_stemming: Option<Value>,
    stopwords_dir: Option<Value>,
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        Ok(Self {
            remove_stop_words: flag(raw.remove_stop_words, "remove_stop_words"),
            language: language(raw.stop_words_language),
            use_stemming: flag(raw.use_stemming, "use_stemming"),
            stopwords_dir: match raw.stopwords_dir {
                Some(Value::String(dir)) => Some(PathBuf::from(dir)),
                Some(other) => {
                    tracing::warn!(value = %other, "stopwords_dir is not a string, ignoring");
                    None
                }
                None => None,
            },
        })
    }

    /// Stemming only applies to english when stopwords are also removed.
    pub fn stemming_enabled(&self) -> bool {
        if self.remove_stop_words && self.language != Language::English {
            return false;
        }
        self.use_stemming
    }
}

fn flag(value: Option<Value>, key: &str) -> bool {
    match value {
        Some(Value::Bool(b)) => b,
        Some(other) => {
            tracing::warn!(key, value = %other, "expected a boolean, using false");
            false
        }
        None => false,
    }
}

fn language(value: Option<Value>) -> Language {
    match value {
        Some(Value::String(name)) => Language::from_name(&name).unwrap_or_else(|| {
            tracing::warn!(language = %name, "unsupported stopword language, using english");
            Language::English
        }),
        Some(other) => {
            tracing::warn!(value = %other, "stop_words_language is not a string, using english");
            Language::English
        }
        None => Language::English,
    }
}
