pub mod import;
pub mod store;
pub mod tags;

pub use import::{
    export_selection,
    merge_import,
};
pub use store::{
    apply_command,
    ApplyOutcome,
    SkipReason,
    VocabularyStore,
    VOCAB_KEY,
};
pub use tags::{
    TagIndex,
    TagOption,
};

use crate::core::Glosa;

/// Swedish / Turkish starter set installed on first launch.
pub const DEFAULT_VOCABULARY: &[(&str, &str)] = &[
    ("Jag", "Ben"),
    ("Du", "Sen"),
    ("Han/Hon", "O"),
    ("Vi", "Biz"),
    ("Dem", "Siz"),
    ("Dricka", "Icer"),
    ("Äta", "yer"),
    ("Vatten", "Su"),
    ("Mjölk", "Sut"),
];

pub fn default_vocabulary() -> Vec<Glosa> {
    DEFAULT_VOCABULARY.iter().map(|(first, second)| Glosa::new(*first, *second)).collect()
}
