use super::default_vocabulary;
use crate::{
    commands::{
        types::validate_bulk_entry,
        EditCommand,
        VocabCommand,
    },
    core::{
        models::dedup_tags,
        GlosorError,
        Glosa,
    },
    persistence::KeyValueStore,
};

pub const VOCAB_KEY: &str = "vocab";

/// Why a command left the vocabulary untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    BlankWord,
    Duplicate,
    IndexOutOfRange { index: i64, len: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Changed(Vec<Glosa>),
    Skipped(SkipReason),
}

/// Computes the vocabulary a command produces, without touching `current`.
pub fn apply_command(current: &[Glosa], command: &VocabCommand) -> Result<ApplyOutcome, GlosorError> {
    let outcome = match command {
        VocabCommand::Edit(EditCommand::Replace { index, value }) => {
            if value.has_blank_word() {
                ApplyOutcome::Skipped(SkipReason::BlankWord)
            } else {
                match checked_index(*index, current.len()) {
                    Ok(i) => {
                        let mut next = current.to_vec();
                        next[i] = value.normalized();
                        ApplyOutcome::Changed(next)
                    }
                    Err(reason) => ApplyOutcome::Skipped(reason),
                }
            }
        }
        VocabCommand::Edit(EditCommand::Create { value }) => {
            if value.has_blank_word() {
                ApplyOutcome::Skipped(SkipReason::BlankWord)
            } else {
                let glosa = value.normalized();
                if current.iter().any(|g| g.same_words(&glosa)) {
                    ApplyOutcome::Skipped(SkipReason::Duplicate)
                } else {
                    let mut next = current.to_vec();
                    next.push(glosa);
                    ApplyOutcome::Changed(next)
                }
            }
        }
        VocabCommand::Edit(EditCommand::Delete { index }) => {
            match checked_index(*index, current.len()) {
                Ok(i) => {
                    let mut next = current.to_vec();
                    next.remove(i);
                    ApplyOutcome::Changed(next)
                }
                Err(reason) => ApplyOutcome::Skipped(reason),
            }
        }
        VocabCommand::BulkReplace(entries) => {
            let mut next = Vec::with_capacity(entries.len());
            for (index, glosa) in entries.iter().enumerate() {
                validate_bulk_entry(index, glosa)?;
                next.push(Glosa {
                    words: glosa.words.clone(),
                    tags: dedup_tags(glosa.tags.iter().cloned()),
                });
            }
            ApplyOutcome::Changed(next)
        }
    };
    Ok(outcome)
}

fn checked_index(index: i64, len: usize) -> Result<usize, SkipReason> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(SkipReason::IndexOutOfRange { index, len })
}

/// Owns the canonical vocabulary and mirrors every change into storage.
pub struct VocabularyStore<S: KeyValueStore> {
    storage: S,
    entries: Vec<Glosa>,
}

impl<S: KeyValueStore> VocabularyStore<S> {
    /// Reads the persisted vocabulary, installing the defaults when storage is
    /// empty, blank or unreadable.
    pub fn load(mut storage: S) -> Result<Self, GlosorError> {
        let persisted = storage.get(VOCAB_KEY)?;
        let parsed = match persisted.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match serde_json::from_str::<Vec<Glosa>>(raw) {
                Ok(entries) => Some(entries),
                Err(e) => {
                    log::warn!("Stored vocabulary is malformed ({}), restoring defaults", e);
                    None
                }
            },
            _ => None,
        };

        let entries = match parsed {
            Some(entries) => entries,
            None => {
                let defaults = default_vocabulary();
                storage.set(VOCAB_KEY, &serde_json::to_string(&defaults)?)?;
                defaults
            }
        };

        log::info!("Loaded {} vocabulary entries", entries.len());
        Ok(Self { storage, entries })
    }

    pub fn entries(&self) -> &[Glosa] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Applies one command and persists the whole vocabulary on change.
    ///
    /// Skips are logged and reported as `Ok(ApplyOutcome::Skipped)`. Only a
    /// rejected bulk replace or a storage failure is an error, and neither leaves
    /// a partial write behind.
    pub fn apply(&mut self, command: &VocabCommand) -> Result<ApplyOutcome, GlosorError> {
        let outcome = apply_command(&self.entries, command)?;
        match &outcome {
            ApplyOutcome::Changed(next) => {
                self.storage.set(VOCAB_KEY, &serde_json::to_string(next)?)?;
                self.entries = next.clone();
                log::info!(
                    "Setting new vocab after {} ({} entries)",
                    command.action_name(),
                    self.entries.len()
                );
            }
            ApplyOutcome::Skipped(SkipReason::Duplicate) => {
                log::warn!("New word already exists, skipping");
            }
            ApplyOutcome::Skipped(reason) => {
                log::warn!("Ignoring {} command: {:?}", command.action_name(), reason);
            }
        }
        Ok(outcome)
    }
}
