//! Append-only move history and its CSV persistence.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use gambit_core::{Color, PieceKind, Square};

/// Header row written when a log file is created.
pub const CSV_HEADER: &str = "timestamp,player,piece,initial_pos,final_pos,notation";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised while persisting the move log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log file could not be opened or written.
    #[error("failed to write move log {}: {source}", path.display())]
    Io {
        /// File being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// A row could not be encoded.
    #[error("failed to write move log {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

/// One executed move. Never changed after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLogRecord {
    pub timestamp: NaiveDateTime,
    pub player: Color,
    pub piece: PieceKind,
    pub initial: Square,
    pub final_square: Square,
    pub notation: String,
}

impl MoveLogRecord {
    /// Format the timestamp the way it is persisted.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// The fields of this record's CSV row, in [`CSV_HEADER`] order.
    ///
    /// Positions are written `col,row`.
    pub fn csv_fields(&self) -> [String; 6] {
        [
            self.timestamp_string(),
            self.player.name().to_string(),
            self.piece.name().to_string(),
            format!("{},{}", self.initial.col(), self.initial.row()),
            format!("{},{}", self.final_square.col(), self.final_square.row()),
            self.notation.clone(),
        ]
    }
}

/// Ordered, append-only sequence of [`MoveLogRecord`]s.
///
/// Tracks how many records already reached disk so that repeated saves
/// append each record exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    records: Vec<MoveLogRecord>,
    saved: usize,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: MoveLogRecord) {
        self.records.push(record);
    }

    /// Every record, oldest first.
    pub fn records(&self) -> &[MoveLogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&MoveLogRecord> {
        self.records.last()
    }

    /// The last `window` records, oldest first.
    pub fn recent(&self, window: usize) -> &[MoveLogRecord] {
        let start = self.records.len().saturating_sub(window);
        &self.records[start..]
    }

    /// Records not yet written by [`MoveLog::save`].
    pub fn unsaved(&self) -> &[MoveLogRecord] {
        &self.records[self.saved..]
    }

    /// Append the unsaved records to the CSV file at `path`.
    ///
    /// The file is created with a header row if it does not exist or is
    /// empty; otherwise rows are appended below the existing content.
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the file cannot be opened or written.
    /// Nothing is marked as saved in that case.
    pub fn save(&mut self, path: &Path) -> Result<usize, LogError> {
        let pending = self.unsaved();
        if pending.is_empty() {
            debug!(path = %path.display(), "move log has nothing new to save");
            return Ok(0);
        }

        let io_err = |source| LogError::Io {
            path: path.to_path_buf(),
            source,
        };
        let csv_err = |source| LogError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;
        let needs_header = file.metadata().map_err(io_err)?.len() == 0;

        let mut out = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            out.write_record(CSV_HEADER.split(',')).map_err(csv_err)?;
        }
        for record in pending {
            out.write_record(record.csv_fields()).map_err(csv_err)?;
        }
        out.flush().map_err(io_err)?;

        let written = pending.len();
        self.saved = self.records.len();
        info!(path = %path.display(), written, header = needs_header, "move log saved");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(notation: &str, initial: Square, final_square: Square) -> MoveLogRecord {
        MoveLogRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(14, 5, 7)
                .unwrap(),
            player: Color::White,
            piece: PieceKind::Pawn,
            initial,
            final_square,
            notation: notation.to_string(),
        }
    }

    #[test]
    fn fields_follow_header_order() {
        let r = record("e2-e4", Square::E2, Square::E4);
        assert_eq!(r.timestamp_string(), "2024-03-09 14:05:07");
        assert_eq!(
            r.csv_fields(),
            ["2024-03-09 14:05:07", "white", "pawn", "4,6", "4,4", "e2-e4"].map(String::from)
        );
        assert_eq!(CSV_HEADER.split(',').count(), r.csv_fields().len());
    }

    #[test]
    fn recent_window() {
        let mut log = MoveLog::new();
        assert!(log.recent(20).is_empty());
        log.push(record("e2-e4", Square::E2, Square::E4));
        log.push(record("d2-d4", Square::D2, Square::D4));
        log.push(record("c2-c4", Square::C2, Square::C4));
        assert_eq!(log.recent(2).len(), 2);
        assert_eq!(log.recent(2)[0].notation, "d2-d4");
        assert_eq!(log.recent(20).len(), 3);
        assert_eq!(log.last().map(|r| r.notation.as_str()), Some("c2-c4"));
    }

    #[test]
    fn save_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut log = MoveLog::new();
        log.push(record("e2-e4", Square::E2, Square::E4));

        assert_eq!(log.save(&path).unwrap(), 1);
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec![CSV_HEADER, "2024-03-09 14:05:07,white,pawn,\"4,6\",\"4,4\",e2-e4"]);
    }

    #[test]
    fn repeated_saves_append_each_record_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut log = MoveLog::new();
        log.push(record("e2-e4", Square::E2, Square::E4));
        log.save(&path).unwrap();

        assert_eq!(log.save(&path).unwrap(), 0);
        log.push(record("d2-d4", Square::D2, Square::D4));
        assert_eq!(log.save(&path).unwrap(), 1);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.matches(CSV_HEADER).count(), 1);
        assert!(log.unsaved().is_empty());
    }

    #[test]
    fn existing_file_is_appended_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(&path, format!("{CSV_HEADER}\nearlier,row\n")).unwrap();

        let mut log = MoveLog::new();
        log.push(record("e2-e4", Square::E2, Square::E4));
        log.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "earlier,row");
        assert!(lines[2].ends_with("e2-e4"));
    }

    #[test]
    fn empty_log_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut log = MoveLog::new();
        assert_eq!(log.save(&path).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("log.csv");
        let mut log = MoveLog::new();
        log.push(record("e2-e4", Square::E2, Square::E4));

        let err = log.save(&path).unwrap_err();
        assert!(matches!(err, LogError::Io { .. }));
        assert_eq!(log.unsaved().len(), 1);
    }
}
