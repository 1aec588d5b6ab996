use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::Glosa;

/// A selectable tag. The label is always the tag itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TagOption {
    pub value: String,
    pub label: String,
}

/// Stateless view over the tags present in a vocabulary.
pub struct TagIndex;

impl TagIndex {
    pub fn available(vocab: &[Glosa]) -> BTreeSet<String> {
        vocab.iter().flat_map(|g| g.tags.iter().cloned()).collect()
    }

    pub fn options(vocab: &[Glosa]) -> Vec<TagOption> {
        Self::available(vocab)
            .into_iter()
            .map(|tag| TagOption { label: tag.clone(), value: tag })
            .collect()
    }
}
