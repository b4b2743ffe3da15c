use crate::board::GameState;

/// Leaf count of the legal move tree, walked with make/undo on one position.
pub fn perft<P: GameState>(pos: &mut P, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = pos.legal_moves();
    if depth == 1 { return moves.len() as u64; }
    let mut nodes = 0u64;
    for mv in moves {
        let mut child = pos.play(mv);
        nodes += perft(&mut *child, depth - 1);
    }
    nodes
}

/// Per-root-move leaf counts, in generation order.
pub fn divide<P: GameState>(pos: &mut P, depth: u32) -> Vec<(crate::board::Move, u64)> {
    let moves = pos.legal_moves();
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        let mut child = pos.play(mv);
        out.push((mv, perft(&mut *child, depth.saturating_sub(1))));
    }
    out
}
