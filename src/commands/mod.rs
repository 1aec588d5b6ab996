pub mod channel;
pub mod types;

pub use channel::{
    CommandSender,
    MutationChannel,
};
pub use types::{
    EditCommand,
    VocabCommand,
};
