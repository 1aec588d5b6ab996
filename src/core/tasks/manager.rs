use std::{
    sync::mpsc,
    thread,
};

use super::TaskResult;
use crate::{
    core::{
        http::{
            fetch_vocabulary,
            http_client,
        },
        Glosa,
    },
    persistence::Settings,
    vocab::merge_import,
};

/// Runs slow work off the quiz thread and hands results back through a channel.
pub struct TaskManager {
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    timeout_secs: u64,
    attempts: usize,
}

impl TaskManager {
    pub fn new(settings: &Settings) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            receiver,
            sender,
            timeout_secs: settings.import_timeout_secs,
            attempts: settings.import_attempts,
        }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    /// Blocks until the next result arrives.
    pub fn wait_result(&mut self) -> Option<TaskResult> {
        self.receiver.recv().ok()
    }

    /// Fetches `url` and merges it into a snapshot of the current vocabulary,
    /// tagging every imported entry with `extra_tags`.
    pub fn import_vocabulary(
        &self,
        url: String,
        extra_tags: Vec<String>,
        current: Vec<Glosa>,
    ) -> thread::JoinHandle<()> {
        let sender = self.sender.clone();
        let (timeout_secs, attempts) = (self.timeout_secs, self.attempts);

        thread::spawn(move || {
            let progress = TaskResult::LoadingMessage(format!("Importing from {url}..."));
            if let Err(e) = sender.send(progress) {
                log::debug!("Dropping import progress message: {}", e);
            }

            let result = http_client(timeout_secs)
                .and_then(|client| fetch_vocabulary(&client, &url, attempts))
                .map(|incoming| merge_import(&current, incoming, &extra_tags))
                .map_err(|e| e.to_string());

            if let Ok(merged) = &result {
                log::info!("Imported from {}, merged vocabulary has {} entries", url, merged.len());
            }
            if let Err(e) = sender.send(TaskResult::ImportFinished { url, result }) {
                log::debug!("Import result has no receiver: {}", e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_import_reports_back() {
        let settings =
            Settings { import_timeout_secs: 1, import_attempts: 1, default_filter: Vec::new() };
        let mut manager = TaskManager::new(&settings);
        manager.import_vocabulary(
            "http://127.0.0.1:9/vocab.json".to_string(),
            Vec::new(),
            vec![Glosa::new("Jag", "Ben")],
        );

        let mut finished = None;
        while let Some(result) = manager.wait_result() {
            if let TaskResult::ImportFinished { url, result } = result {
                finished = Some((url, result));
                break;
            }
        }
        let (url, result) = finished.unwrap();
        assert_eq!(url, "http://127.0.0.1:9/vocab.json");
        assert!(result.unwrap_err().starts_with("Couldn't import Vocabulary from url"));
    }

    #[test]
    fn test_import_outliving_its_manager_finishes_quietly() {
        let settings =
            Settings { import_timeout_secs: 1, import_attempts: 1, default_filter: Vec::new() };
        let manager = TaskManager::new(&settings);
        let handle = manager.import_vocabulary(
            "http://127.0.0.1:9/vocab.json".to_string(),
            Vec::new(),
            Vec::new(),
        );
        drop(manager);
        assert!(handle.join().is_ok());
    }
}
