use std::collections::BTreeSet;

use rand::{
    seq::SliceRandom,
    Rng,
};

use crate::core::{
    Glosa,
    Side,
};

/// Number of shuffled candidates discarded before the survivors become distractors.
pub const DISCARDED_CANDIDATES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingOptions,
    QuestionActive,
    Complete,
}

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub index: usize,
    pub glosa: Glosa,
    pub prompt_side: Side,
    pub options: Vec<Glosa>,
}

impl Question {
    pub fn prompt(&self) -> &str {
        self.glosa.word(self.prompt_side)
    }

    pub fn answer_side(&self) -> Side {
        self.prompt_side.opposite()
    }
}

/// Walks a vocabulary snapshot one question at a time.
pub struct SessionEngine<R: Rng> {
    vocab: Vec<Glosa>,
    filter: BTreeSet<String>,
    current_index: usize,
    state: SessionState,
    question: Option<Question>,
    rng: R,
}

impl<R: Rng> SessionEngine<R> {
    /// Starts at the first entry matching `filter`.
    pub fn new(vocab: Vec<Glosa>, filter: BTreeSet<String>, rng: R) -> Self {
        let mut engine = Self {
            vocab,
            filter,
            current_index: 0,
            state: SessionState::AwaitingOptions,
            question: None,
            rng,
        };
        engine.restart();
        engine
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn filter(&self) -> &BTreeSet<String> {
        &self.filter
    }

    pub fn vocabulary(&self) -> &[Glosa] {
        &self.vocab
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn matches_filter(&self, glosa: &Glosa) -> bool {
        self.filter.is_empty() || glosa.has_any_tag(&self.filter)
    }

    /// Index following `from` (`None` meaning "before the first entry"). With a
    /// filter, non-matching entries are skipped; `len` means there is none.
    pub fn next_index(&self, from: Option<usize>) -> usize {
        let start = from.map_or(0, |i| i + 1);
        if self.filter.is_empty() {
            return start;
        }
        self.scan_from(start)
    }

    fn scan_from(&self, start: usize) -> usize {
        (start..self.vocab.len())
            .find(|&i| self.matches_filter(&self.vocab[i]))
            .unwrap_or(self.vocab.len())
    }

    /// Moves past `from` and prepares the next question, or completes the run.
    pub fn advance(&mut self, from: Option<usize>) -> SessionState {
        let index = self.next_index(from);
        self.enter(index)
    }

    pub fn restart(&mut self) -> SessionState {
        self.advance(None)
    }

    /// Replaces the filter; always restarts the run.
    pub fn set_filter(&mut self, filter: BTreeSet<String>) -> SessionState {
        self.filter = filter;
        self.restart()
    }

    /// Swaps in an updated vocabulary, keeping the current position where it
    /// still makes sense.
    pub fn sync_vocabulary(&mut self, vocab: Vec<Glosa>) -> SessionState {
        self.vocab = vocab;
        if self.state == SessionState::Complete {
            return self.state;
        }
        let index = if self.current_index < self.vocab.len()
            && !self.matches_filter(&self.vocab[self.current_index])
        {
            self.scan_from(self.current_index)
        } else {
            self.current_index
        };
        if index == self.current_index && self.question_still_valid() {
            return self.state;
        }
        self.enter(index)
    }

    /// The active question shows the entry at its index and only options that
    /// are still in the vocabulary.
    fn question_still_valid(&self) -> bool {
        let Some(question) = &self.question else {
            return false;
        };
        self.vocab.get(question.index) == Some(&question.glosa)
            && question.options.iter().all(|o| self.vocab.iter().any(|g| g.same_words(o)))
    }

    fn enter(&mut self, index: usize) -> SessionState {
        self.current_index = index;
        if index >= self.vocab.len() {
            log::debug!("Run complete at index {}", index);
            self.question = None;
            self.state = SessionState::Complete;
            return self.state;
        }

        self.state = SessionState::AwaitingOptions;
        let options = self.sample_options(index);
        let prompt_side = if self.rng.random_bool(0.5) { Side::First } else { Side::Second };
        self.question =
            Some(Question { index, glosa: self.vocab[index].clone(), prompt_side, options });
        self.state = SessionState::QuestionActive;
        self.state
    }

    /// Options for the question at `index`: the target spliced at a random
    /// position into a random subset of entries with a different first word.
    ///
    /// The first `DISCARDED_CANDIDATES` shuffled candidates are dropped, so small
    /// vocabularies can leave the target as the only option.
    pub fn sample_options(&mut self, index: usize) -> Vec<Glosa> {
        let target = &self.vocab[index];
        let mut candidates: Vec<Glosa> =
            self.vocab.iter().filter(|g| g.words.0 != target.words.0).cloned().collect();
        candidates.shuffle(&mut self.rng);

        let mut options: Vec<Glosa> =
            candidates.into_iter().skip(DISCARDED_CANDIDATES).collect();
        let split = self.rng.random_range(0..=options.len());
        options.insert(split, target.clone());
        options
    }

    /// Moves past the question that was just answered.
    pub fn answered(&mut self) -> SessionState {
        let from = self.current_index;
        self.advance(Some(from))
    }

    /// 1-based position of the current entry among filter matches, and their count.
    pub fn progress(&self) -> Option<(usize, usize)> {
        if self.state == SessionState::Complete {
            return None;
        }
        let total = self.vocab.iter().filter(|g| self.matches_filter(g)).count();
        let position = self.vocab[..=self.current_index]
            .iter()
            .filter(|g| self.matches_filter(g))
            .count();
        Some((position, total))
    }
}
