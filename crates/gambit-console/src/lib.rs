//! Plain-text console front end for gambit.

pub mod command;
pub mod error;
pub mod session;

pub use command::{Command, parse_command};
pub use error::ConsoleError;
pub use session::Session;
