use cozy_chess::{Color, Piece, Square};
use crate::board::GameState;

const PAWN: i32 = 100;
const KNIGHT: i32 = 300;
const BISHOP: i32 = 300;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;
/// Never summed into material; only used by ordering arithmetic.
const KING: i32 = 10_000;

const MATERIAL_PIECES: [(Piece, i32); 5] = [
    (Piece::Pawn, PAWN),
    (Piece::Knight, KNIGHT),
    (Piece::Bishop, BISHOP),
    (Piece::Rook, ROOK),
    (Piece::Queen, QUEEN),
];

/// Centipawns per reported evaluation unit. Material and mop-up weights are
/// multiples of this, so the division is exact.
pub const EVAL_SCALE: i32 = 10;
/// Bound on any static evaluation, in reported units.
pub const MAX_EVAL: i32 = 500;

// Endgame mop-up
pub const ENDGAME_WEAK_MATERIAL: i32 = PAWN;
pub const ENDGAME_WEIGHT: i32 = 1;
const CENTER_WEIGHT: i32 = 2 * EVAL_SCALE;
const PROXIMITY_WEIGHT: i32 = EVAL_SCALE;
const MAX_CENTER_DISTANCE: i32 = 6;
// Kings are never adjacent, so they are at least two Manhattan steps apart.
const MIN_KING_DISTANCE: i32 = 2;
/// Largest mop-up bonus any position can earn, in centipawns.
pub const MOP_UP_MAX: i32 =
    ENDGAME_WEIGHT * (CENTER_WEIGHT * MAX_CENTER_DISTANCE + PROXIMITY_WEIGHT * (14 - MIN_KING_DISTANCE));

// Mate scoring helpers
pub const MATE_SCORE: i32 = 100_000;
pub const INFINITY: i32 = MATE_SCORE + 1;
pub const DRAW_SCORE: i32 = 0;
pub const MAX_PLY: i32 = 256;

pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => KING,
    }
}

fn material_of<P: GameState>(pos: &P, color: Color) -> i32 {
    MATERIAL_PIECES.iter().map(|&(piece, v)| pos.count(color, piece) * v).sum()
}

// Side-agnostic material in centipawns: positive means White has more material.
pub fn material_cp_side_agnostic<P: GameState>(pos: &P) -> i32 {
    material_of(pos, Color::White) - material_of(pos, Color::Black)
}

fn center_distance(sq: Square) -> i32 {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    let df = if file < 4 { 3 - file } else { file - 4 };
    let dr = if rank < 4 { 3 - rank } else { rank - 4 };
    df + dr
}

fn manhattan(a: Square, b: Square) -> i32 {
    (a.file() as i32 - b.file() as i32).abs() + (a.rank() as i32 - b.rank() as i32).abs()
}

/// Mop-up bonus for `strong` in centipawns: pushes the weak king to the rim
/// and brings the strong king closer. Zero unless the weak side is down to at
/// most a pawn of material and the strong side is ahead.
pub fn mop_up_cp<P: GameState>(pos: &P, strong: Color) -> i32 {
    let weak = !strong;
    let weak_material = material_of(pos, weak);
    if weak_material > ENDGAME_WEAK_MATERIAL || material_of(pos, strong) <= weak_material {
        return 0;
    }
    let (Some(sk), Some(wk)) = (pos.king(strong), pos.king(weak)) else { return 0 };
    ENDGAME_WEIGHT * (CENTER_WEIGHT * center_distance(wk) + PROXIMITY_WEIGHT * (14 - manhattan(sk, wk)))
}

/// Static evaluation from the side to move's perspective.
pub fn evaluate<P: GameState>(pos: &P) -> i32 {
    let white_cp = material_cp_side_agnostic(pos)
        + mop_up_cp(pos, Color::White)
        - mop_up_cp(pos, Color::Black);
    let stm_cp = if pos.side_to_move() == Color::White { white_cp } else { -white_cp };
    (stm_cp / EVAL_SCALE).clamp(-MAX_EVAL, MAX_EVAL)
}

/// A search score with mate and draw kept distinct from material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Side to move mates; ply distance from the root.
    Win(i32),
    /// Side to move is mated; ply distance from the root.
    Loss(i32),
    Draw,
    Score(i32),
}

impl Outcome {
    pub fn to_score(self) -> i32 {
        match self {
            Outcome::Win(ply) => MATE_SCORE - ply,
            Outcome::Loss(ply) => -MATE_SCORE + ply,
            Outcome::Draw => DRAW_SCORE,
            Outcome::Score(v) => v.clamp(-MAX_EVAL, MAX_EVAL),
        }
    }

    pub fn from_score(score: i32) -> Self {
        if score >= MATE_SCORE - MAX_PLY {
            Outcome::Win(MATE_SCORE - score)
        } else if score <= -MATE_SCORE + MAX_PLY {
            Outcome::Loss(MATE_SCORE + score)
        } else {
            Outcome::Score(score)
        }
    }

    pub fn is_mate(self) -> bool { matches!(self, Outcome::Win(_) | Outcome::Loss(_)) }

    /// Full moves to mate as reported by UCI (`score mate N`), negative when mated.
    pub fn mate_in_moves(self) -> Option<i32> {
        match self {
            Outcome::Win(ply) => Some((ply + 1) / 2),
            Outcome::Loss(ply) => Some(-((ply + 1) / 2)),
            _ => None,
        }
    }
}

impl std::ops::Neg for Outcome {
    type Output = Outcome;

    fn neg(self) -> Outcome {
        match self {
            Outcome::Win(p) => Outcome::Loss(p),
            Outcome::Loss(p) => Outcome::Win(p),
            Outcome::Draw => Outcome::Draw,
            Outcome::Score(v) => Outcome::Score(-v),
        }
    }
}
