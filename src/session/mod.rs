pub mod engine;
pub mod ledger;

pub use engine::{
    Question,
    SessionEngine,
    SessionState,
    DISCARDED_CANDIDATES,
};
pub use ledger::{
    AnswerLedger,
    AnsweredQuestion,
    Score,
    WordStats,
};
