//! Game orchestration for gambit: turn order, move history and its persistence.

pub mod config;
pub mod engine;
pub mod log;

pub use config::EngineConfig;
pub use engine::{Engine, GameState};
pub use log::{CSV_HEADER, LogError, MoveLog, MoveLogRecord};
