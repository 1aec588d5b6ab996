use std::collections::BTreeSet;

use rand::Rng;

use crate::{
    commands::{
        CommandSender,
        MutationChannel,
        VocabCommand,
    },
    core::{
        GlosorError,
        Glosa,
    },
    persistence::KeyValueStore,
    session::{
        AnswerLedger,
        AnsweredQuestion,
        SessionEngine,
        SessionState,
    },
    vocab::{
        export_selection,
        ApplyOutcome,
        TagIndex,
        TagOption,
        VocabularyStore,
    },
};

/// One quiz: the stored vocabulary, the run over it, its answers, and the
/// inbox for out-of-band edits.
pub struct QuizApp<S: KeyValueStore, R: Rng> {
    store: VocabularyStore<S>,
    session: SessionEngine<R>,
    ledger: AnswerLedger,
    channel: MutationChannel,
}

impl<S: KeyValueStore, R: Rng> QuizApp<S, R> {
    pub fn new(storage: S, filter: BTreeSet<String>, rng: R) -> Result<Self, GlosorError> {
        let store = VocabularyStore::load(storage)?;
        let session = SessionEngine::new(store.entries().to_vec(), filter, rng);
        Ok(Self { store, session, ledger: AnswerLedger::new(), channel: MutationChannel::new() })
    }

    pub fn command_sender(&self) -> CommandSender {
        self.channel.sender()
    }

    pub fn session(&self) -> &SessionEngine<R> {
        &self.session
    }

    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    pub fn vocabulary(&self) -> &[Glosa] {
        self.store.entries()
    }

    pub fn store(&self) -> &VocabularyStore<S> {
        &self.store
    }

    pub fn available_tags(&self) -> Vec<TagOption> {
        TagIndex::options(self.store.entries())
    }

    /// Picks option `choice` of the active question. `None` when there is no
    /// question or the choice is out of range.
    pub fn answer(&mut self, choice: usize) -> Option<AnsweredQuestion> {
        let question = self.session.question()?;
        let chosen = question.options.get(choice)?.clone();
        let prompt = question.glosa.clone();
        let asked_side = question.prompt_side;

        let answered = self.ledger.record(prompt, chosen, asked_side).clone();
        self.session.answered();
        Some(answered)
    }

    /// Starts a new run and forgets the previous run's answers.
    pub fn restart(&mut self) -> SessionState {
        self.ledger.clear();
        self.session.restart()
    }

    pub fn set_filter(&mut self, filter: BTreeSet<String>) -> SessionState {
        self.ledger.clear();
        self.session.set_filter(filter)
    }

    /// Applies a command right away, bypassing the queue.
    pub fn apply(&mut self, command: &VocabCommand) -> Result<ApplyOutcome, GlosorError> {
        let outcome = self.store.apply(command)?;
        if let ApplyOutcome::Changed(entries) = &outcome {
            self.session.sync_vocabulary(entries.clone());
        }
        Ok(outcome)
    }

    /// Applies everything queued on the channel, oldest first. Returns the
    /// failures that have to be shown to the user.
    pub fn process_pending_commands(&mut self) -> Vec<GlosorError> {
        let mut failures = Vec::new();
        for command in self.channel.drain() {
            if let Err(e) = self.apply(&command) {
                log::error!("Failed to apply {} command: {}", command.action_name(), e);
                failures.push(e);
            }
        }
        failures
    }

    /// Waits for the next queued command and applies it.
    pub async fn process_next_command(&mut self) -> Option<Result<ApplyOutcome, GlosorError>> {
        let command = self.channel.recv().await?;
        Some(self.apply(&command))
    }

    /// Filter-selected entries as a bulk replace payload.
    pub fn export(&self) -> Result<String, GlosorError> {
        export_selection(self.store.entries(), self.session.filter())
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;
    use crate::{
        persistence::MemoryStore,
        session::Score,
        vocab::{
            SkipReason,
            VOCAB_KEY,
        },
    };

    fn app_with(entries: &[Glosa]) -> QuizApp<MemoryStore, StdRng> {
        let storage = MemoryStore::with_value(VOCAB_KEY, &serde_json::to_string(entries).unwrap());
        QuizApp::new(storage, BTreeSet::new(), StdRng::seed_from_u64(11)).unwrap()
    }

    fn correct_choice(app: &QuizApp<MemoryStore, StdRng>) -> usize {
        let question = app.session().question().unwrap();
        question.options.iter().position(|o| o.same_words(&question.glosa)).unwrap()
    }

    #[test]
    fn test_full_run_on_defaults() {
        let mut app =
            QuizApp::new(MemoryStore::new(), BTreeSet::new(), StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(app.vocabulary().len(), 9);

        let mut asked = 0;
        while !app.session().is_complete() {
            let choice = correct_choice(&app);
            let answered = app.answer(choice).unwrap();
            assert!(answered.is_correct());
            asked += 1;
        }
        assert_eq!(asked, 9);
        assert_eq!(app.ledger().overall_score(), Score { correct: 9, total: 9 });
        assert_eq!(app.ledger().latest_run_score(), Score { correct: 9, total: 9 });
        assert!(app.answer(0).is_none());

        app.restart();
        assert!(app.ledger().is_empty());
        assert_eq!(app.session().current_index(), 0);
    }

    #[test]
    fn test_commands_from_channel_update_session() {
        let mut app = app_with(&[Glosa::new("Jag", "Ben"), Glosa::new("Du", "Sen")]);
        let sender = app.command_sender();
        let choice = correct_choice(&app);
        app.answer(choice);
        assert_eq!(app.session().current_index(), 1);

        sender.submit(VocabCommand::delete(0)).unwrap();
        sender.submit(VocabCommand::delete(5)).unwrap();
        assert!(app.process_pending_commands().is_empty());

        // The old index 1 is now past the end
        assert_eq!(app.vocabulary(), &[Glosa::new("Du", "Sen")]);
        assert!(app.session().is_complete());
    }

    #[test]
    fn test_bulk_failure_is_reported_and_harmless() {
        let mut app = app_with(&[Glosa::new("Jag", "Ben")]);
        let sender = app.command_sender();
        sender.submit(VocabCommand::BulkReplace(vec![Glosa::new("", "x")])).unwrap();
        sender.submit(VocabCommand::create(Glosa::new("Vi", "Biz"))).unwrap();

        let failures = app.process_pending_commands();
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], GlosorError::BulkReplaceRejected { .. }));
        assert_eq!(app.vocabulary(), &[Glosa::new("Jag", "Ben"), Glosa::new("Vi", "Biz")]);
    }

    #[test]
    fn test_tags_follow_vocabulary() {
        let mut app = app_with(&[Glosa::new("Jag", "Ben")]);
        assert!(app.available_tags().is_empty());

        app.apply(&VocabCommand::replace(0, Glosa::new("Jag", "Ben").with_tags(["pronoun"])))
            .unwrap();
        let tags: Vec<String> = app.available_tags().into_iter().map(|t| t.value).collect();
        assert_eq!(tags, vec!["pronoun"]);

        let outcome = app.apply(&VocabCommand::create(Glosa::new("Jag", "Ben"))).unwrap();
        assert_eq!(outcome, ApplyOutcome::Skipped(SkipReason::Duplicate));
    }

    #[test]
    fn test_filter_change_restarts_and_exports_selection() {
        let mut app = app_with(&[
            Glosa::new("Jag", "Ben").with_tags(["pronoun"]),
            Glosa::new("Äta", "yer").with_tags(["verb"]),
        ]);
        let choice = correct_choice(&app);
        app.answer(choice);
        assert_eq!(app.ledger().len(), 1);

        app.set_filter(["verb".to_string()].into());
        assert!(app.ledger().is_empty());
        assert_eq!(app.session().current_index(), 1);
        assert_eq!(app.export().unwrap(), r#"[{"words":["Äta","yer"],"tags":["verb"]}]"#);
    }

    #[tokio::test]
    async fn test_async_command_processing() {
        let mut app = app_with(&[Glosa::new("Jag", "Ben")]);
        let sender = app.command_sender();
        tokio::spawn(async move {
            sender
                .submit_json(r#"{"action":"create","value":{"words":["Du","Sen"],"tags":[]}}"#)
                .unwrap();
        });

        let outcome = app.process_next_command().await.unwrap().unwrap();
        assert!(matches!(outcome, ApplyOutcome::Changed(_)));
        assert_eq!(app.session().vocabulary().len(), 2);
    }
}
