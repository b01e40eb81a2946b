//! Console front end errors.

use gambit_engine::LogError;

/// Errors that can occur while reading and running console commands.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// A square argument is not algebraic notation such as `e4`.
    #[error("unknown square: {text}")]
    UnknownSquare {
        /// The text that failed to parse.
        text: String,
    },

    /// A command is missing an argument or has too many.
    #[error("malformed {command} command, usage: {usage}")]
    MalformedCommand {
        /// The command word.
        command: &'static str,
        /// Expected form.
        usage: &'static str,
    },

    /// Saving the move log failed.
    #[error(transparent)]
    Log(#[from] LogError),

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl ConsoleError {
    /// Whether the session can report this error and keep reading commands.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ConsoleError::Io { .. })
    }
}
