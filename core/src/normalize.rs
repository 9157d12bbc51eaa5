//! Term normalization applied at ingestion and at query-term resolution.

use crate::config::{Config, Language};
use crate::error::ConfigError;
use lazy_static::lazy_static;
use rust_stemmers::Stemmer;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref ENGLISH_STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// The normalization capability a [`PostingStore`](crate::PostingStore) is built with.
///
/// `is_stopword` is only consulted when `should_remove_stopwords` is true, and
/// `stem` only when `should_stem` is true. Terms handed to either are already
/// lower-cased.
pub trait Normalizer {
    fn should_remove_stopwords(&self) -> bool;
    fn is_stopword(&self, term: &str) -> bool;
    fn should_stem(&self) -> bool;
    fn stem(&self, term: &str) -> String;
}

/// Stopword set plus an optional Snowball stemmer.
pub struct Pipeline {
    stopwords: Option<HashSet<String>>,
    stemmer: Option<(Language, Stemmer)>,
}

impl Pipeline {
    /// No stopword removal, no stemming.
    pub fn plain() -> Self {
        Self { stopwords: None, stemmer: None }
    }

    pub fn new(stopwords: Option<HashSet<String>>, stem_language: Option<Language>) -> Self {
        let stemmer = stem_language.map(|lang| (lang, Stemmer::create(lang.algorithm())));
        Self { stopwords, stemmer }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let stopwords = if config.remove_stop_words {
            Some(load_stopwords(config.language, config.stopwords_dir.as_deref())?)
        } else {
            None
        };
        let stem_language = config.stemming_enabled().then_some(config.language);
        tracing::debug!(
            remove_stopwords = stopwords.is_some(),
            stemming = stem_language.is_some(),
            language = config.language.name(),
            "normalization pipeline ready"
        );
        Ok(Self::new(stopwords, stem_language))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::plain()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stopwords", &self.stopwords.as_ref().map(HashSet::len))
            .field("stemmer", &self.stemmer.as_ref().map(|(lang, _)| lang.name()))
            .finish()
    }
}

impl Normalizer for Pipeline {
    fn should_remove_stopwords(&self) -> bool {
        self.stopwords.is_some()
    }

    fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.as_ref().is_some_and(|set| set.contains(term))
    }

    fn should_stem(&self) -> bool {
        self.stemmer.is_some()
    }

    fn stem(&self, term: &str) -> String {
        match &self.stemmer {
            Some((_, stemmer)) => stemmer.stem(term).into_owned(),
            None => term.to_owned(),
        }
    }
}

/// Read the stopword list for `language`: `<dir>/<language>`, one word per line.
/// Without a directory only the built-in English list is available.
pub fn load_stopwords(language: Language, dir: Option<&Path>) -> Result<HashSet<String>, ConfigError> {
    match dir {
        Some(dir) => {
            let path = dir.join(language.name());
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(ConfigError::MissingStopwords { language: language.name().into(), path });
                }
                Err(e) => return Err(e.into()),
            };
            Ok(text
                .lines()
                .map(|line| line.trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect())
        }
        None if language == Language::English => {
            Ok(ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect())
        }
        None => Err(ConfigError::MissingStopwords {
            language: language.name().into(),
            path: Path::new("stopwords").join(language.name()),
        }),
    }
}
