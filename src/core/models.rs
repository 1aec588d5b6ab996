use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// A bidirectional word pair ("glosa") with its group tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Glosa {
    pub words: (String, String),
    pub tags: Vec<String>,
}

impl Glosa {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self { words: (first.into(), second.into()), tags: Vec::new() }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn word(&self, side: Side) -> &str {
        match side {
            Side::First => &self.words.0,
            Side::Second => &self.words.1,
        }
    }

    /// Positional match on both words. Tags are ignored.
    pub fn same_words(&self, other: &Glosa) -> bool {
        self.words.0 == other.words.0 && self.words.1 == other.words.1
    }

    pub fn has_blank_word(&self) -> bool {
        self.words.0.trim().is_empty() || self.words.1.trim().is_empty()
    }

    pub fn has_any_tag<'a>(&self, tags: impl IntoIterator<Item = &'a String>) -> bool {
        tags.into_iter().any(|t| self.tags.contains(t))
    }

    /// Trims both words and drops repeated tags, keeping first occurrences.
    pub fn normalized(&self) -> Glosa {
        Glosa {
            words: (self.words.0.trim().to_string(), self.words.1.trim().to_string()),
            tags: dedup_tags(self.tags.iter().cloned()),
        }
    }

    pub(crate) fn key(&self) -> (String, String) {
        self.words.clone()
    }
}

impl fmt::Display for Glosa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.words.0, self.words.1)
    }
}

pub fn dedup_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Which half of a word pair is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}
