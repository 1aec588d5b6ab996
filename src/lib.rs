pub mod app;
pub mod commands;
pub mod core;
pub mod persistence;
pub mod session;
pub mod vocab;

pub use app::QuizApp;
pub use commands::{
    CommandSender,
    MutationChannel,
    VocabCommand,
};
pub use crate::core::{
    GlosorError,
    Glosa,
    Side,
};
