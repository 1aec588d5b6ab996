use std::{
    collections::HashMap,
    fmt,
    hash::Hash,
};

use serde::Serialize;

use crate::core::{
    Glosa,
    Side,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnsweredQuestion {
    pub prompt: Glosa,
    pub chosen: Glosa,
    pub asked_side: Side,
}

impl AnsweredQuestion {
    /// Both words must match positionally, whichever side was asked.
    pub fn is_correct(&self) -> bool {
        self.chosen.same_words(&self.prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.correct, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordStats {
    pub glosa: Glosa,
    pub most_frequent_answer: Glosa,
    pub times_asked: usize,
    pub accuracy: f64,
}

impl WordStats {
    /// Accuracy with two decimals, halves rounded up.
    pub fn accuracy_display(&self) -> String {
        format!("{:.2}", (self.accuracy * 100.0).round() / 100.0)
    }
}

/// Append-only record of one quiz run.
#[derive(Debug, Default, Clone)]
pub struct AnswerLedger {
    answers: Vec<AnsweredQuestion>,
}

impl AnswerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, prompt: Glosa, chosen: Glosa, asked_side: Side) -> &AnsweredQuestion {
        self.answers.push(AnsweredQuestion { prompt, chosen, asked_side });
        &self.answers[self.answers.len() - 1]
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn overall_score(&self) -> Score {
        Score {
            correct: self.answers.iter().filter(|a| a.is_correct()).count(),
            total: self.answers.len(),
        }
    }

    /// One vote per prompt: the first answer of each group from `by_prompt`.
    pub fn latest_run_score(&self) -> Score {
        let groups = self.by_prompt();
        Score {
            correct: groups.iter().filter(|group| group[0].is_correct()).count(),
            total: groups.len(),
        }
    }

    /// Per-word rows, most asked first.
    pub fn per_word_breakdown(&self) -> Vec<WordStats> {
        let mut groups = self.by_prompt();
        groups.sort_by(|a, b| b.len().cmp(&a.len()));
        groups
            .into_iter()
            .map(|group| {
                let correct = group.iter().filter(|a| a.is_correct()).count();
                WordStats {
                    glosa: group[0].prompt.clone(),
                    most_frequent_answer: group[0].chosen.clone(),
                    times_asked: group.len(),
                    accuracy: correct as f64 / group.len() as f64,
                }
            })
            .collect()
    }

    /// Answers grouped by prompt pair in order of first appearance.
    ///
    /// Inside each group the answers are regrouped by the chosen pair, the
    /// subgroups ordered largest first and flattened, so the head of each group
    /// is the answer given most often for that prompt.
    fn by_prompt(&self) -> Vec<Vec<&AnsweredQuestion>> {
        group_prepending(self.answers.iter(), |a| a.prompt.key())
            .into_iter()
            .map(|group| {
                let mut by_choice = group_prepending(group, |a| a.chosen.key());
                by_choice.sort_by(|a, b| b.len().cmp(&a.len()));
                by_choice.into_iter().flatten().collect()
            })
            .collect()
    }
}

/// Buckets items by key, buckets in first-seen order, each bucket newest first.
fn group_prepending<'a, K, I, F>(items: I, key: F) -> Vec<Vec<&'a AnsweredQuestion>>
where
    K: Eq + Hash,
    I: IntoIterator<Item = &'a AnsweredQuestion>,
    F: Fn(&AnsweredQuestion) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<&AnsweredQuestion>> = Vec::new();
    for item in items {
        let slot = *slots.entry(key(item)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].insert(0, item);
    }
    groups
}
