use crate::core::Glosa;

#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Merged vocabulary ready to be applied as a bulk replace.
    ImportFinished { url: String, result: Result<Vec<Glosa>, String> },
    LoadingMessage(String),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::ImportFinished { .. } => "import",
            TaskResult::LoadingMessage(_) => "loading_message",
        }
    }
}
