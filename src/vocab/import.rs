use std::collections::BTreeSet;

use crate::core::{
    models::dedup_tags,
    GlosorError,
    Glosa,
};

/// Folds fetched entries into the current vocabulary.
///
/// New pairs are appended carrying their own tags plus `extra_tags`. A pair that
/// is already present gains the incoming and extra tags instead of a second row.
pub fn merge_import(current: &[Glosa], incoming: Vec<Glosa>, extra_tags: &[String]) -> Vec<Glosa> {
    let mut merged = current.to_vec();
    for glosa in incoming {
        match merged.iter_mut().find(|existing| existing.same_words(&glosa)) {
            Some(existing) => {
                let tags = existing
                    .tags
                    .iter()
                    .chain(glosa.tags.iter())
                    .chain(extra_tags.iter())
                    .cloned();
                existing.tags = dedup_tags(tags);
            }
            None => {
                let tags = glosa.tags.iter().chain(extra_tags.iter()).cloned();
                merged.push(Glosa { words: glosa.words, tags: dedup_tags(tags) });
            }
        }
    }
    merged
}

/// Entries matching `filter` (all of them for an empty filter) as a compact JSON
/// array, which doubles as a bulk replace payload.
pub fn export_selection(vocab: &[Glosa], filter: &BTreeSet<String>) -> Result<String, GlosorError> {
    let selected: Vec<&Glosa> =
        vocab.iter().filter(|g| filter.is_empty() || g.has_any_tag(filter)).collect();
    Ok(serde_json::to_string(&selected)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::VocabCommand,
        persistence::MemoryStore,
        vocab::{
            default_vocabulary,
            VocabularyStore,
        },
    };

    #[test]
    fn test_merge_appends_and_merges_tags() {
        let current = vec![Glosa::new("Jag", "Ben").with_tags(["pronoun"])];
        let incoming = vec![
            Glosa::new("Jag", "Ben").with_tags(["basic", "pronoun"]),
            Glosa::new("Su", "Vatten").with_tags(["noun"]),
            Glosa::new("Su", "Vatten").with_tags(["drink"]),
        ];
        let merged = merge_import(&current, incoming, &["lesson1".to_string()]);

        assert_eq!(
            merged,
            vec![
                Glosa::new("Jag", "Ben").with_tags(["pronoun", "basic", "lesson1"]),
                Glosa::new("Su", "Vatten").with_tags(["noun", "lesson1", "drink"]),
            ]
        );
    }

    #[test]
    fn test_export_respects_filter() {
        let vocab = vec![
            Glosa::new("Äta", "yer").with_tags(["verb"]),
            Glosa::new("Su", "Vatten").with_tags(["noun"]),
        ];
        let filter: BTreeSet<String> = ["noun".to_string()].into();
        assert_eq!(
            export_selection(&vocab, &filter).unwrap(),
            r#"[{"words":["Su","Vatten"],"tags":["noun"]}]"#
        );
    }

    #[test]
    fn test_export_then_bulk_import_round_trips() {
        let mut vocab = default_vocabulary();
        vocab[2].tags = vec!["pronoun".to_string()];
        let exported = export_selection(&vocab, &BTreeSet::new()).unwrap();

        let mut store = VocabularyStore::load(MemoryStore::new()).unwrap();
        store.apply(&VocabCommand::create(Glosa::new("Extra", "Ekstra"))).unwrap();
        store.apply(&VocabCommand::decode(&exported).unwrap()).unwrap();
        assert_eq!(store.entries(), vocab.as_slice());
    }
}
