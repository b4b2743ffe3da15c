use cozy_chess::{BitBoard, Board as CozyBoard, Color, File, Piece, Rank, Square};
use crate::board::{insufficient_material, GameState, Move, PositionError};

/// cozy-chess board with an undo stack.
///
/// cozy-chess boards are copy-make, so `make_move` pushes the parent board and
/// `undo_move` pops it back. The stack doubles as the game history used for
/// repetition detection.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    history: Vec<CozyBoard>,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default(), history: Vec::with_capacity(128) }
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        CozyBoard::from_fen(fen, false)
            .map(|b| Self { board: b, history: Vec::with_capacity(128) })
            .map_err(|e| PositionError::Fen(format!("{e:?}")))
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    /// Number of moves currently on the undo stack.
    pub fn ply(&self) -> usize { self.history.len() }

    /// Finds a legal move by its UCI text. Castling is accepted both as
    /// king-two-squares (`e1g1`) and as king-takes-rook (`e1h1`).
    pub fn find_move_uci(&self, mv_uci: &str) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|&m| m.to_string() == mv_uci || self.uci_string(m) == mv_uci)
    }

    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<(), PositionError> {
        match self.find_move_uci(mv_uci) {
            Some(m) => { self.make_move(m); Ok(()) }
            None => Err(PositionError::IllegalMove(mv_uci.to_string())),
        }
    }

    /// Standard UCI text for a move legal in this position.
    pub fn uci_string(&self, mv: Move) -> String {
        let own = self.board.colors(self.board.side_to_move());
        if mv.piece == Piece::King && own.has(mv.to) {
            let file = if (mv.to.file() as usize) > (mv.from.file() as usize) { File::G } else { File::C };
            return format!("{}{}", mv.from, Square::new(file, mv.from.rank()));
        }
        mv.to_string()
    }

    pub fn legal_moves_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self, PositionError> {
        let mut pos = Self::startpos();
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }

    pub fn set_from_fen_and_moves(fen: &str, moves: &[String]) -> Result<Self, PositionError> {
        let mut pos = Self::from_fen(fen)?;
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }

    fn en_passant_square(&self) -> Option<Square> {
        let stm = self.board.side_to_move();
        self.board.en_passant().map(|file| Square::new(file, Rank::Sixth.relative_to(stm)))
    }

    fn describe(&self, piece: Piece, mv: cozy_chess::Move) -> Move {
        let them = self.board.colors(!self.board.side_to_move());
        let captured = if them.has(mv.to) {
            self.board.piece_on(mv.to)
        } else if piece == Piece::Pawn && mv.from.file() != mv.to.file() {
            Some(Piece::Pawn)
        } else {
            None
        };
        Move { from: mv.from, to: mv.to, piece, captured, promotion: mv.promotion }
    }

    fn collect_moves(&self, captures_only: bool) -> Vec<Move> {
        let them = self.board.colors(!self.board.side_to_move());
        let ep = self.en_passant_square();
        let mut out: Vec<Move> = Vec::with_capacity(64);
        self.board.generate_moves(|mut pm| {
            let piece = pm.piece;
            if captures_only {
                let mut mask = them;
                if piece == Piece::Pawn {
                    if let Some(sq) = ep { mask |= sq.bitboard(); }
                }
                pm.to &= mask;
            }
            for m in pm { out.push(self.describe(piece, m)); }
            false
        });
        out
    }

    fn is_repetition(&self) -> bool {
        let key = self.board.hash();
        self.history
            .iter()
            .rev()
            .take(self.board.halfmove_clock() as usize)
            .any(|b| b.hash() == key)
    }
}

impl GameState for Position {
    fn side_to_move(&self) -> Color { self.board.side_to_move() }

    fn legal_moves(&self) -> Vec<Move> { self.collect_moves(false) }

    fn capture_moves(&self) -> Vec<Move> { self.collect_moves(true) }

    fn make_move(&mut self, mv: Move) {
        let raw = cozy_chess::Move { from: mv.from, to: mv.to, promotion: mv.promotion };
        self.history.push(self.board.clone());
        self.board.play(raw);
    }

    fn undo_move(&mut self) {
        if let Some(prev) = self.history.pop() { self.board = prev; }
    }

    fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    fn is_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100 || self.is_repetition() || insufficient_material(self)
    }

    fn piece_on(&self, sq: Square) -> Option<(Color, Piece)> {
        match (self.board.color_on(sq), self.board.piece_on(sq)) {
            (Some(c), Some(p)) => Some((c, p)),
            _ => None,
        }
    }

    fn pieces(&self, color: Color, piece: Piece) -> BitBoard { self.board.colored_pieces(color, piece) }

    fn fen(&self) -> String { format!("{}", self.board) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twenty_moves_and_no_captures() {
        let pos = Position::startpos();
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.legal_moves_count(), 20);
        assert!(pos.capture_moves().is_empty());
    }

    #[test]
    fn en_passant_reports_captured_pawn() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let ep = pos.find_move_uci("e5d6").expect("en passant legal");
        assert_eq!(ep.captured, Some(Piece::Pawn));
        assert!(pos.capture_moves().contains(&ep));
    }

    #[test]
    fn castling_round_trips_through_uci_text() {
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let castle = pos.find_move_uci("e1g1").expect("castling legal");
        assert_eq!(castle.piece, Piece::King);
        assert_eq!(castle.captured, None);
        assert_eq!(pos.uci_string(castle), "e1g1");
        pos.make_move(castle);
        assert_eq!(pos.piece_on(Square::G1), Some((Color::White, Piece::King)));
        assert_eq!(pos.piece_on(Square::F1), Some((Color::White, Piece::Rook)));
        pos.undo_move();
        assert_eq!(pos.piece_on(Square::E1), Some((Color::White, Piece::King)));
    }

    #[test]
    fn knight_shuffle_is_a_repetition_draw() {
        let moves: Vec<String> = ["g1f3", "g8f6", "f3g1", "f6g8"].iter().map(|s| s.to_string()).collect();
        let pos = Position::set_from_start_and_moves(&moves).unwrap();
        assert!(pos.is_draw());
        assert!(!Position::startpos().is_draw());
    }

    #[test]
    fn bare_kings_are_insufficient_material() {
        let pos = Position::from_fen("k7/8/8/8/8/8/8/7K w - - 0 1").unwrap();
        assert!(pos.is_draw());
        let rook = Position::from_fen("k7/8/8/8/8/8/8/R6K w - - 0 1").unwrap();
        assert!(!rook.is_draw());
    }

    #[test]
    fn illegal_uci_move_is_rejected() {
        let mut pos = Position::startpos();
        assert_eq!(pos.make_move_uci("e2e5"), Err(PositionError::IllegalMove("e2e5".to_string())));
        assert_eq!(pos.ply(), 0);
    }
}
