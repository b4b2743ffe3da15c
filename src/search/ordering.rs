use cozy_chess::{get_pawn_attacks, BitBoard, Piece};
use crate::board::{GameState, Move};
use crate::search::eval::piece_value;

/// A move paired with its ordering priority. Lives only inside [`order_moves`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub priority: i32,
}

/// Squares attacked by the pawns of the side not to move.
pub fn pawn_attack_map<P: GameState>(pos: &P) -> BitBoard {
    let them = !pos.side_to_move();
    let mut attacks = BitBoard::EMPTY;
    for sq in pos.pieces(them, Piece::Pawn) {
        attacks |= get_pawn_attacks(sq, them);
    }
    attacks
}

/// MVV-LVA for captures, a bonus for promotions and a penalty for stepping
/// onto a square an enemy pawn covers.
pub fn score_move(mv: &Move, pawn_attacks: BitBoard) -> i32 {
    let mut priority = 0;
    if let Some(victim) = mv.captured {
        if mv.piece != Piece::King {
            priority = 10 * piece_value(victim) - piece_value(mv.piece);
        }
    }
    if let Some(promo) = mv.promotion {
        priority += piece_value(promo);
    }
    if pawn_attacks.has(mv.to) {
        priority -= piece_value(mv.piece);
    }
    priority
}

/// Orders `moves` by descending priority; equal priorities keep input order.
pub fn order_moves<P: GameState>(pos: &P, moves: Vec<Move>) -> Vec<Move> {
    if moves.len() <= 1 { return moves; }
    let pawn_attacks = pawn_attack_map(pos);
    let mut scored: Vec<ScoredMove> = moves
        .into_iter()
        .map(|mv| ScoredMove { mv, priority: score_move(&mv, pawn_attacks) })
        .collect();
    scored.sort_by(|a, b| b.priority.cmp(&a.priority));
    scored.into_iter().map(|s| s.mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;
    use cozy_chess::Square;

    fn find(pos: &Position, uci: &str) -> Move {
        pos.find_move_uci(uci).unwrap_or_else(|| panic!("{uci} should be legal"))
    }

    #[test]
    fn pawn_attack_map_covers_enemy_pawn_diagonals() {
        let pos = Position::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1").unwrap();
        let map = pawn_attack_map(&pos);
        assert!(map.has(Square::C4));
        assert!(map.has(Square::E4));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn mvv_lva_prefers_cheap_attacker_on_valuable_victim() {
        // Both the pawn and the rook can take the queen on d5.
        let pos = Position::from_fen("4k3/8/8/3q4/4P3/8/8/3RK3 w - - 0 1").unwrap();
        let pxq = find(&pos, "e4d5");
        let rxq = find(&pos, "d1d5");
        let pa = pawn_attack_map(&pos);
        assert_eq!(score_move(&pxq, pa), 10 * 900 - 100);
        assert_eq!(score_move(&rxq, pa), 10 * 900 - 500);
        let ordered = order_moves(&pos, pos.legal_moves());
        assert_eq!(ordered[0], pxq);
        assert_eq!(ordered[1], rxq);
    }

    #[test]
    fn promotion_adds_promoted_piece_value() {
        let pos = Position::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let q = find(&pos, "a7a8q");
        let n = find(&pos, "a7a8n");
        assert_eq!(score_move(&q, BitBoard::EMPTY), 900);
        assert_eq!(score_move(&n, BitBoard::EMPTY), 300);
        assert_eq!(order_moves(&pos, pos.legal_moves())[0], q);
    }

    #[test]
    fn stepping_into_pawn_attack_is_penalised() {
        // Nc3-d5?? walks into ...exd5.
        let pos = Position::from_fen("4k3/8/4p3/8/8/2N5/8/4K3 w - - 0 1").unwrap();
        let nd5 = find(&pos, "c3d5");
        let nb5 = find(&pos, "c3b5");
        let pa = pawn_attack_map(&pos);
        assert_eq!(score_move(&nd5, pa), -300);
        assert_eq!(score_move(&nb5, pa), 0);
        let ordered = order_moves(&pos, pos.legal_moves());
        assert_eq!(ordered.last(), Some(&nd5));
    }

    #[test]
    fn equal_priorities_keep_input_order() {
        let pos = Position::startpos();
        let moves = pos.legal_moves();
        assert_eq!(order_moves(&pos, moves.clone()), moves);
    }

    #[test]
    fn ordering_is_deterministic() {
        let pos = Position::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4").unwrap();
        let a = order_moves(&pos, pos.legal_moves());
        let b = order_moves(&pos, pos.legal_moves());
        assert_eq!(a, b);
    }

    #[test]
    fn king_captures_skip_mvv_lva() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").unwrap();
        let kxd2 = find(&pos, "e1d2");
        assert_eq!(kxd2.captured, Some(Piece::Pawn));
        assert_eq!(score_move(&kxd2, BitBoard::EMPTY), 0);
    }
}
