use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::board::{GameState, Move};
use crate::search::eval::{Outcome, INFINITY};
use crate::search::ordering::order_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub depth: u32,
    pub order_moves: bool,
}

impl Default for SearchParams {
    fn default() -> Self { Self { depth: 4, order_moves: true } }
}

impl SearchParams {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub qnodes: u64,
    pub cutoffs: u64,
}

/// Result of searching one node: the fail-hard score and the move that
/// produced it (the refutation on a cutoff, `None` at leaves).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub score: i32,
    pub best: Option<Move>,
}

impl SearchNode {
    fn leaf(outcome: Outcome, alpha: i32, beta: i32) -> Self {
        Self { score: fail_hard(outcome.to_score(), alpha, beta), best: None }
    }
}

#[inline]
pub(crate) fn fail_hard(score: i32, alpha: i32, beta: i32) -> i32 { score.max(alpha).min(beta) }

#[derive(Debug, Default)]
pub struct Searcher {
    pub(crate) params: SearchParams,
    pub(crate) stats: SearchStats,
}

impl Searcher {
    pub fn new(params: SearchParams) -> Self { Self { params, stats: SearchStats::default() } }

    pub fn params(&self) -> SearchParams { self.params }

    pub fn stats(&self) -> SearchStats { self.stats }

    /// Fail-hard negamax from the root (ply 0) within `(alpha, beta)`.
    pub fn search<P: GameState>(&mut self, pos: &mut P, depth: u32, alpha: i32, beta: i32) -> SearchNode {
        self.stats = SearchStats::default();
        self.alphabeta(pos, depth, alpha, beta, 0)
    }

    /// Full-window search at the configured depth.
    pub fn search_depth<P: GameState>(&mut self, pos: &mut P) -> SearchNode {
        let depth = self.params.depth;
        self.search(pos, depth, -INFINITY, INFINITY)
    }

    fn alphabeta<P: GameState>(&mut self, pos: &mut P, depth: u32, mut alpha: i32, beta: i32, ply: i32) -> SearchNode {
        self.stats.nodes += 1;
        if ply > 0 && pos.is_draw() { return SearchNode::leaf(Outcome::Draw, alpha, beta); }

        if depth == 0 {
            if pos.in_check() && pos.legal_moves().is_empty() {
                return SearchNode::leaf(Outcome::Loss(ply), alpha, beta);
            }
            return SearchNode { score: self.qsearch(pos, alpha, beta), best: None };
        }

        let moves = pos.legal_moves();
        if moves.is_empty() {
            let outcome = if pos.in_check() { Outcome::Loss(ply) } else { Outcome::Draw };
            return SearchNode::leaf(outcome, alpha, beta);
        }
        let moves = if self.params.order_moves { order_moves(pos, moves) } else { moves };

        let mut best: Option<Move> = None;
        for mv in moves {
            let score = {
                let mut child = pos.play(mv);
                -self.alphabeta(&mut *child, depth - 1, -beta, -alpha, ply + 1).score
            };
            if score >= beta {
                self.stats.cutoffs += 1;
                return SearchNode { score: beta, best: Some(mv) };
            }
            if score > alpha {
                alpha = score;
                best = Some(mv);
                if ply == 0 { log::debug!("new best root move {} score {}", mv, score); }
            }
        }
        SearchNode { score: alpha, best }
    }
}
