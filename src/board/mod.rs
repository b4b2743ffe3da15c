//! Game-state collaborator seam.
//!
//! The search never owns a board. It talks to whatever implements
//! [`GameState`], mutating it in place through [`GameState::play`], which
//! hands back an [`Applied`] guard that undoes the move when dropped.

use cozy_chess::{BitBoard, Color, Piece, Square};
use std::fmt;
use std::ops::{Deref, DerefMut};

pub mod cozy;
#[cfg(feature = "board-pleco")]
pub mod pleco;

/// A legal move as reported by the collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Piece being moved.
    pub piece: Piece,
    /// Enemy piece removed by this move, including the pawn taken en passant.
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
}

impl Move {
    #[inline]
    pub fn is_capture(&self) -> bool { self.captured.is_some() }

    #[inline]
    pub fn is_promotion(&self) -> bool { self.promotion.is_some() }
}

pub(crate) fn piece_char(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion { write!(f, "{}", piece_char(p))?; }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("FEN error: {0}")]
    Fen(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),
}

/// Mutable chess position driven by the search.
///
/// Implementors must guarantee that `undo_move` restores exactly the state
/// that preceded the matching `make_move`: occupancy, side to move, castling
/// and en-passant rights, and therefore the legal-move set.
pub trait GameState {
    fn side_to_move(&self) -> Color;

    /// All legal moves in the current position.
    fn legal_moves(&self) -> Vec<Move>;

    /// Legal moves that remove an enemy piece.
    fn capture_moves(&self) -> Vec<Move> {
        self.legal_moves().into_iter().filter(Move::is_capture).collect()
    }

    /// Applies `mv`, which must come from `legal_moves` of this exact position.
    fn make_move(&mut self, mv: Move);

    /// Reverts the most recent `make_move`.
    fn undo_move(&mut self);

    fn in_check(&self) -> bool;

    /// Draw by rule (fifty moves, repetition, insufficient material).
    /// Stalemate is detected by the search from an empty move list.
    fn is_draw(&self) -> bool;

    fn piece_on(&self, sq: Square) -> Option<(Color, Piece)>;

    fn pieces(&self, color: Color, piece: Piece) -> BitBoard;

    fn fen(&self) -> String;

    fn king(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).into_iter().next()
    }

    fn count(&self, color: Color, piece: Piece) -> i32 {
        self.pieces(color, piece).len() as i32
    }

    /// Makes `mv` and returns a guard that undoes it on drop.
    fn play(&mut self, mv: Move) -> Applied<'_, Self>
    where
        Self: Sized,
    {
        Applied::new(self, mv)
    }
}

/// No pawns, rooks or queens, and at most one minor piece on the board.
pub(crate) fn insufficient_material<P: GameState>(pos: &P) -> bool {
    let heavy = [Piece::Pawn, Piece::Rook, Piece::Queen];
    let colors = [Color::White, Color::Black];
    if colors.iter().any(|&c| heavy.iter().any(|&p| pos.count(c, p) > 0)) { return false; }
    let minors: i32 = colors.iter().map(|&c| pos.count(c, Piece::Knight) + pos.count(c, Piece::Bishop)).sum();
    minors <= 1
}

/// A move applied to a position for the lifetime of the guard.
///
/// Dropping the guard undoes the move, so cutoffs, `?` and unwinding all
/// restore the parent position.
pub struct Applied<'a, P: GameState> {
    pos: &'a mut P,
    mv: Move,
}

impl<'a, P: GameState> Applied<'a, P> {
    pub fn new(pos: &'a mut P, mv: Move) -> Self {
        pos.make_move(mv);
        Self { pos, mv }
    }

    pub fn applied_move(&self) -> Move { self.mv }
}

impl<P: GameState> Deref for Applied<'_, P> {
    type Target = P;

    fn deref(&self) -> &Self::Target { &*self.pos }
}

impl<P: GameState> DerefMut for Applied<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut *self.pos }
}

impl<P: GameState> Drop for Applied<'_, P> {
    fn drop(&mut self) {
        self.pos.undo_move();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;

    #[test]
    fn guard_undoes_on_drop() {
        let mut pos = Position::startpos();
        let before = pos.fen();
        let mv = pos.find_move_uci("e2e4").expect("e2e4 legal");
        {
            let child = pos.play(mv);
            assert_ne!(child.fen(), before);
            assert_eq!(child.side_to_move(), Color::Black);
        }
        assert_eq!(pos.fen(), before);
    }

    #[test]
    fn guards_nest_in_lifo_order() {
        let mut pos = Position::startpos();
        let before = pos.fen();
        let e4 = pos.find_move_uci("e2e4").unwrap();
        {
            let mut child = pos.play(e4);
            let after_e4 = child.fen();
            let e5 = child.find_move_uci("e7e5").unwrap();
            {
                let grandchild = child.play(e5);
                assert_eq!(grandchild.side_to_move(), Color::White);
            }
            assert_eq!(child.fen(), after_e4);
        }
        assert_eq!(pos.fen(), before);
    }

    #[test]
    fn display_includes_promotion_suffix() {
        let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mv = pos.find_move_uci("a7a8q").expect("promotion legal");
        assert_eq!(mv.to_string(), "a7a8q");
        assert_eq!(mv.promotion, Some(Piece::Queen));
        assert!(!mv.is_capture());
    }
}
