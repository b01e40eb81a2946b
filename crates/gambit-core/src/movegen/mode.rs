//! Compile-time generation mode dispatch.

/// Marker trait selecting what a generation pass produces.
pub(crate) trait GenMode {
    /// When set, pawns emit both diagonals as attacks regardless of occupancy,
    /// pawn pushes are skipped, and the king does not consider castling.
    const ATTACKS_ONLY: bool;
}

/// Zero-sized type for ordinary pseudo-legal generation.
pub(crate) struct Pseudo;
impl GenMode for Pseudo {
    const ATTACKS_ONLY: bool = false;
}

/// Zero-sized type for attack probing. Castling is never an attack, and
/// skipping it keeps attack detection from recursing through the king.
pub(crate) struct Attacks;
impl GenMode for Attacks {
    const ATTACKS_ONLY: bool = true;
}
