use tokio::sync::mpsc::{
    self,
    error::TryRecvError,
    UnboundedReceiver,
    UnboundedSender,
};

use super::VocabCommand;
use crate::core::GlosorError;

/// Handle given to transports (editors, import flow, terminal) for submitting
/// vocabulary commands.
#[derive(Clone, Debug)]
pub struct CommandSender {
    tx: UnboundedSender<VocabCommand>,
}

impl CommandSender {
    pub fn submit(&self, command: VocabCommand) -> Result<(), GlosorError> {
        log::debug!("Submitting {} command", command.action_name());
        self.tx
            .send(command)
            .map_err(|e| GlosorError::Custom(format!("Command channel closed: {e}")))
    }

    /// Decodes and submits a wire payload.
    ///
    /// A payload that is not a command at all is logged and dropped. A rejected
    /// bulk replace is returned to the sender.
    pub fn submit_json(&self, payload: &str) -> Result<(), GlosorError> {
        match VocabCommand::decode(payload) {
            Ok(command) => self.submit(command),
            Err(GlosorError::MalformedCommand(reason)) => {
                log::warn!("Dropping malformed command: {}", reason);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Delivers commands one at a time, in send order.
#[derive(Debug)]
pub struct MutationChannel {
    sender: CommandSender,
    receiver: UnboundedReceiver<VocabCommand>,
}

impl MutationChannel {
    pub fn new() -> Self {
        let (tx, receiver) = mpsc::unbounded_channel();
        Self { sender: CommandSender { tx }, receiver }
    }

    pub fn sender(&self) -> CommandSender {
        self.sender.clone()
    }

    pub fn try_next(&mut self) -> Option<VocabCommand> {
        match self.receiver.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Everything queued right now, oldest first.
    pub fn drain(&mut self) -> Vec<VocabCommand> {
        let mut commands = Vec::new();
        while let Some(command) = self.try_next() {
            commands.push(command);
        }
        commands
    }

    /// Waits for the next command. The channel keeps its own sender alive, so
    /// this only returns `None` after `close`.
    pub async fn recv(&mut self) -> Option<VocabCommand> {
        self.receiver.recv().await
    }

    pub fn close(&mut self) {
        self.receiver.close();
    }
}

impl Default for MutationChannel {
    fn default() -> Self {
        Self::new()
    }
}
