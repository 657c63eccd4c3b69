pub mod commands;
mod error;
mod interaction;

pub use error::HandlerResult;
