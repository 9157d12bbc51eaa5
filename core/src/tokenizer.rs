use crate::normalize::Normalizer;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    pub(crate) static ref WORD_RE: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Maximal runs of word characters, in order of appearance.
pub fn word_runs(text: &str) -> impl Iterator<Item = &str> {
    WORD_RE.find_iter(text).map(|m| m.as_str())
}

/// Lower-cased distinct tokens of `text`.
pub fn distinct_tokens(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    word_runs(&lowered).map(str::to_owned).collect()
}

/// Tokenize a document into the set of index terms it contributes:
/// lower-case, dedup, drop stopwords and short tokens, then stem.
pub fn tokenize(text: &str, normalizer: &dyn Normalizer) -> BTreeSet<String> {
    let remove_stopwords = normalizer.should_remove_stopwords();
    let stem = normalizer.should_stem();
    distinct_tokens(text)
        .into_iter()
        .filter(|token| {
            !remove_stopwords || (token.chars().count() > 2 && !normalizer.is_stopword(token))
        })
        .map(|token| if stem { normalizer.stem(&token) } else { token })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Pipeline;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Data, data; DATA_set 42", &Pipeline::plain());
        let words: Vec<&str> = t.iter().map(String::as_str).collect();
        assert_eq!(words, vec!["42", "data", "data_set"]);
    }

    #[test]
    fn word_runs_split_on_non_word_characters() {
        let runs: Vec<&str> = word_runs("a&&b || (c) !d").collect();
        assert_eq!(runs, vec!["a", "b", "c", "d"]);
    }
}
