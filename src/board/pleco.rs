#![cfg(feature = "board-pleco")]
use cozy_chess::{BitBoard, Color, Piece, Square};
use pleco::{Board as PlecoBoard, BitMove, Player, PieceType};
use crate::board::{insufficient_material, GameState, Move, PositionError};

/// Pleco board driven through native make/unmake.
pub struct RevBoard {
    board: PlecoBoard,
    stack: Vec<Option<BitMove>>,
    /// Zobrist keys of the positions preceding each applied move.
    keys: Vec<u64>,
}

const PIECES: [Piece; 6] = [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King];

#[inline]
fn player(color: Color) -> Player {
    match color { Color::White => Player::White, Color::Black => Player::Black }
}

#[inline]
fn piece_type(piece: Piece) -> PieceType {
    match piece {
        Piece::Pawn => PieceType::P,
        Piece::Knight => PieceType::N,
        Piece::Bishop => PieceType::B,
        Piece::Rook => PieceType::R,
        Piece::Queen => PieceType::Q,
        Piece::King => PieceType::K,
    }
}

#[inline]
fn from_piece_type(pt: PieceType) -> Option<Piece> {
    match pt {
        PieceType::P => Some(Piece::Pawn),
        PieceType::N => Some(Piece::Knight),
        PieceType::B => Some(Piece::Bishop),
        PieceType::R => Some(Piece::Rook),
        PieceType::Q => Some(Piece::Queen),
        PieceType::K => Some(Piece::King),
        _ => None,
    }
}

#[inline]
fn square(sq: pleco::SQ) -> Square { Square::index(sq.0 as usize) }

impl RevBoard {
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        PlecoBoard::from_fen(fen)
            .map(|b| Self { board: b, stack: Vec::with_capacity(128), keys: Vec::with_capacity(128) })
            .map_err(|e| PositionError::Fen(format!("{e:?}")))
    }

    pub fn startpos() -> Self {
        Self { board: PlecoBoard::start_pos(), stack: Vec::with_capacity(128), keys: Vec::with_capacity(128) }
    }

    pub fn inner(&self) -> &PlecoBoard { &self.board }

    fn occupant(&self, sq: Square) -> Option<(Color, Piece)> {
        for color in [Color::White, Color::Black] {
            for piece in PIECES {
                if self.pieces(color, piece).has(sq) { return Some((color, piece)); }
            }
        }
        None
    }

    fn describe(&self, m: BitMove) -> Option<Move> {
        let from = square(m.get_src());
        let to = square(m.get_dest());
        let (_, piece) = self.occupant(from)?;
        let captured = if !m.is_capture() {
            None
        } else if m.is_en_passant() {
            Some(Piece::Pawn)
        } else {
            self.occupant(to).map(|(_, p)| p)
        };
        let promotion = if m.is_promo() { from_piece_type(m.promo_piece()) } else { None };
        Some(Move { from, to, piece, captured, promotion })
    }

    fn is_repetition(&self) -> bool {
        let key = self.board.zobrist();
        let window = self.board.rule_50().max(0) as usize;
        self.keys.iter().rev().take(window).any(|&k| k == key)
    }

    fn native(&self, mv: Move) -> Option<BitMove> {
        self.board.generate_moves().iter().copied().find(|&m| {
            square(m.get_src()) == mv.from
                && square(m.get_dest()) == mv.to
                && (if m.is_promo() { from_piece_type(m.promo_piece()) } else { None }) == mv.promotion
        })
    }
}

impl GameState for RevBoard {
    fn side_to_move(&self) -> Color {
        match self.board.turn() { Player::White => Color::White, Player::Black => Color::Black }
    }

    fn legal_moves(&self) -> Vec<Move> {
        self.board.generate_moves().iter().filter_map(|&m| self.describe(m)).collect()
    }

    fn make_move(&mut self, mv: Move) {
        let native = self.native(mv);
        match native {
            Some(m) => {
                self.keys.push(self.board.zobrist());
                self.board.apply_move(m);
            }
            None => log::error!("pleco backend: {} is not legal in {}", mv, self.board.fen()),
        }
        self.stack.push(native);
    }

    fn undo_move(&mut self) {
        if let Some(Some(_)) = self.stack.pop() {
            self.board.undo_move();
            self.keys.pop();
        }
    }

    fn in_check(&self) -> bool { self.board.in_check() }

    fn is_draw(&self) -> bool {
        self.board.rule_50() >= 100 || self.is_repetition() || insufficient_material(self)
    }

    fn piece_on(&self, sq: Square) -> Option<(Color, Piece)> { self.occupant(sq) }

    fn pieces(&self, color: Color, piece: Piece) -> BitBoard {
        BitBoard(self.board.piece_bb(player(color), piece_type(piece)).0)
    }

    fn fen(&self) -> String { self.board.fen() }
}
