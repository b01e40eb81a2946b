//! Turn order, move validation and execution, and game state.

use std::collections::HashMap;

use tracing::{debug, error, info};

use gambit_core::{
    Board, Color, Move, MoveList, PieceId, PieceKind, Setup, Square, filter_legal, is_checkmate,
    is_stalemate, king_attacked, legal_moves, pseudo_legal_moves,
};

use crate::config::EngineConfig;
use crate::log::{LogError, MoveLog, MoveLogRecord};

/// Whether the game still accepts moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    /// Terminal. Reached when a king leaves the board.
    GameOver,
}

/// The rules engine a front end drives.
///
/// A front end selects a piece with [`Engine::calculate_moves`], then submits
/// one of the returned moves through [`Engine::make_move`]. Candidate lists
/// are cached per piece and discarded after every executed move, so a stale
/// list can never validate a move.
pub struct Engine {
    board: Board,
    next_player: Color,
    state: GameState,
    hovered: Option<Square>,
    candidates: HashMap<PieceId, MoveList>,
    log: MoveLog,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine at the starting position with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_setup(Setup::starting_position(), config)
    }

    /// Start from an arbitrary position, e.g. one parsed from FEN.
    pub fn from_setup(setup: Setup, config: EngineConfig) -> Self {
        Self {
            board: setup.board,
            next_player: setup.side_to_move,
            state: GameState::InProgress,
            hovered: None,
            candidates: HashMap::new(),
            log: MoveLog::new(),
            config,
        }
    }

    /// Regenerate the legal moves of `piece`, which stands on `sq`.
    ///
    /// The result replaces the piece's candidate list and is what
    /// [`Engine::valid_move`] checks against. A piece that is not on `sq`
    /// gets an empty list.
    pub fn calculate_moves(&mut self, piece: PieceId, sq: Square) -> &[Move] {
        let moves = self.moves_for(piece, sq, true);
        let slot = self.candidates.entry(piece).or_default();
        *slot = moves;
        slot.as_slice()
    }

    /// Candidate generation without the legality filter, for probing what an
    /// enemy piece reaches. Leaves the candidate buffers alone, so nothing it
    /// returns can be executed.
    pub(crate) fn calculate_unfiltered(&self, piece: PieceId, sq: Square) -> MoveList {
        self.moves_for(piece, sq, false)
    }

    fn moves_for(&self, piece: PieceId, sq: Square, check_for_checks: bool) -> MoveList {
        let moves = match self.board.occupant(sq) {
            Some(p) if self.board.occupant_id(sq) == Some(piece) => {
                let pseudo = pseudo_legal_moves(&self.board, sq);
                if check_for_checks {
                    filter_legal(&self.board, p.color(), &pseudo)
                } else {
                    pseudo
                }
            }
            _ => {
                debug!(?piece, %sq, "piece is not on the requested square");
                MoveList::new()
            }
        };
        debug!(?piece, %sq, count = moves.len(), check_for_checks, "calculated moves");
        moves
    }

    /// Select the piece on `sq` and calculate its moves.
    ///
    /// Returns `None` for an empty square.
    pub fn select(&mut self, sq: Square) -> Option<(PieceId, &[Move])> {
        let piece = self.board.occupant_id(sq)?;
        Some((piece, self.calculate_moves(piece, sq)))
    }

    /// The candidate list last calculated for `piece`, if it is still current.
    pub fn candidates(&self, piece: PieceId) -> &[Move] {
        self.candidates.get(&piece).map(MoveList::as_slice).unwrap_or(&[])
    }

    /// True iff a move between the same squares is in `piece`'s latest list.
    pub fn valid_move(&self, piece: PieceId, mv: &Move) -> bool {
        self.candidates
            .get(&piece)
            .is_some_and(|list| list.find(mv.from(), mv.to()).is_some())
    }

    /// Execute `mv` for `piece` if it is that side's turn and the move was
    /// calculated as legal. Returns whether the move was played.
    ///
    /// Rejections are not errors: after game over, out of turn, or for a
    /// move missing from the candidate list, the engine is left untouched.
    pub fn make_move(&mut self, piece: PieceId, mv: &Move) -> bool {
        if self.state == GameState::GameOver {
            debug!(%mv, "move rejected: game is over");
            return false;
        }

        let mover = match self.board.occupant(mv.from()) {
            Some(p) if self.board.occupant_id(mv.from()) == Some(piece) => *p,
            _ => {
                debug!(?piece, %mv, "move rejected: piece is not on the source square");
                return false;
            }
        };
        if mover.color() != self.next_player {
            debug!(%mv, color = %mover.color(), "move rejected: not this side's turn");
            return false;
        }

        // Play the buffered move, which carries the kind and capture the generator computed.
        let Some(canonical) = self
            .candidates
            .get(&piece)
            .and_then(|list| list.find(mv.from(), mv.to()))
            .copied()
        else {
            debug!(%mv, "move rejected: not in the legal move list");
            return false;
        };

        if let Err(err) = self.board.execute(&canonical, false) {
            error!(%canonical, %err, "buffered move could not be executed");
            return false;
        }

        let notation = Engine::notation(mover.kind(), &canonical);
        info!(player = %mover.color(), %notation, capture = canonical.is_capture(), "move played");
        self.log.push(MoveLogRecord {
            timestamp: chrono::Local::now().naive_local(),
            player: mover.color(),
            piece: mover.kind(),
            initial: canonical.from(),
            final_square: canonical.to(),
            notation,
        });

        self.next_player = self.next_player.flip();
        self.candidates.clear();
        self.update_state(mover.color());
        true
    }

    fn update_state(&mut self, mover: Color) {
        if self.board.king_square(mover).is_none() {
            error!(%mover, "mover's king left the board; halting");
            self.state = GameState::GameOver;
        } else if self.board.king_square(mover.flip()).is_none() {
            info!(winner = %mover, "king captured, game over");
            self.state = GameState::GameOver;
        }
    }

    /// True once either king is gone from the board.
    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
            || Color::ALL
                .iter()
                .any(|&color| self.board.king_square(color).is_none())
    }

    /// Move text such as `Ng1-f3`; pawns carry no letter.
    pub fn notation(kind: PieceKind, mv: &Move) -> String {
        mv.notation(kind)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.log
    }

    /// The most recent records, as many as the configured history window.
    pub fn history(&self) -> &[MoveLogRecord] {
        self.log.recent(self.config.history_window)
    }

    pub fn hovered_sqr(&self) -> Option<Square> {
        self.hovered
    }

    pub fn set_hovered(&mut self, sq: Option<Square>) {
        self.hovered = sq;
    }

    pub fn next_player(&self) -> Color {
        self.next_player
    }

    pub fn is_active(&self) -> bool {
        self.state == GameState::InProgress
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Every legal move of the side to move.
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(&self.board, self.next_player)
    }

    /// Is the side to move in check.
    pub fn in_check(&self) -> bool {
        king_attacked(&self.board, self.next_player)
    }

    /// Squares of the enemy pieces that attack the king of the side to move,
    /// in board order. Empty when not in check or when that king is gone.
    pub fn checkers(&self) -> Vec<Square> {
        let Some(king_sq) = self.board.king_square(self.next_player) else {
            return Vec::new();
        };
        self.board
            .pieces_of(self.next_player.flip())
            .filter(|&(sq, id)| {
                self.calculate_unfiltered(id, sq)
                    .iter()
                    .any(|m| m.to() == king_sq)
            })
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Informational: the game itself only ends on king capture.
    pub fn is_checkmate(&self) -> bool {
        is_checkmate(&self.board, self.next_player)
    }

    /// Informational: the game itself only ends on king capture.
    pub fn is_stalemate(&self) -> bool {
        is_stalemate(&self.board, self.next_player)
    }

    /// Append the unsaved part of the move log to the configured file.
    pub fn save_log(&mut self) -> Result<usize, LogError> {
        let path = self.config.log_path.clone();
        self.log.save(&path)
    }

    /// Return to the starting position. Configuration and the move log,
    /// including records not yet saved, carry over.
    pub fn reset(&mut self) {
        info!("game reset");
        self.board = Board::starting_position();
        self.next_player = Color::White;
        self.state = GameState::InProgress;
        self.hovered = None;
        self.candidates.clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
