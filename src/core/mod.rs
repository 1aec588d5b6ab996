pub mod errors;
pub mod http;
pub mod models;
pub mod tasks;

pub use errors::GlosorError;
pub use models::{
    Glosa,
    Side,
};
