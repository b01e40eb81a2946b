//! Engine configuration.

use std::path::PathBuf;

/// Default file the move log is appended to.
pub const DEFAULT_LOG_PATH: &str = "game_log.csv";

/// Default number of trailing moves shown by history views.
pub const DEFAULT_HISTORY_WINDOW: usize = 20;

/// Configuration knobs fixed when the engine is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// CSV file the move log is appended to on save.
    pub log_path: PathBuf,
    /// How many of the most recent records a history view shows.
    pub history_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.log_path, PathBuf::from("game_log.csv"));
        assert_eq!(config.history_window, 20);
    }
}
