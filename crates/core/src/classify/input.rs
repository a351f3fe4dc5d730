#![forbid(unsafe_code)]

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word pattern"));

/// Unicode word runs of already lower-cased text.
pub(crate) fn word_set(lowered: &str) -> BTreeSet<String> {
    WORD.find_iter(lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Input text normalized once per classification.
#[derive(Clone, Debug)]
pub struct PreparedInput {
    lowered: String,
    tokens: Vec<String>,
    words: BTreeSet<String>,
}

impl PreparedInput {
    pub fn new(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let tokens = lowered.split_whitespace().map(str::to_string).collect();
        let words = word_set(&lowered);
        Self {
            lowered,
            tokens,
            words,
        }
    }

    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// Whitespace-delimited tokens, in input order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
