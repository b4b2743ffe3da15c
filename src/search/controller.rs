//! Per-turn driver: runs the fixed-depth search, then refuses to hand back a
//! move that is not legal in the position it was asked about.

use std::time::{Duration, Instant};
use crate::board::{GameState, Move};
use crate::search::alphabeta::{SearchParams, SearchStats, Searcher};
use crate::search::eval::{Outcome, INFINITY};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The search selected a move the position does not allow. Make/undo
    /// bookkeeping is broken somewhere; the turn must not be played.
    #[error("internal inconsistency: selected move {mv:?} is not legal in {fen}")]
    InternalInconsistency { mv: Option<Move>, fen: String },

    #[error("no legal moves in {fen}")]
    NoLegalMoves { fen: String },
}

/// One turn's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mv: Move,
    pub score: i32,
    pub outcome: Outcome,
    pub depth: u32,
    pub stats: SearchStats,
    pub elapsed: Duration,
    pub time_budget: Duration,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine {
    params: SearchParams,
}

impl Engine {
    pub fn new(params: SearchParams) -> Self { Self { params } }

    pub fn params(&self) -> SearchParams { self.params }

    pub fn set_depth(&mut self, depth: u32) { self.params.depth = depth; }

    /// Picks one legal move for the side to move.
    ///
    /// `time_budget` is recorded but does not stop the search: the depth is
    /// fixed by [`SearchParams::depth`].
    pub fn think<P: GameState>(&self, pos: &mut P, time_budget: Duration) -> Result<Decision, SearchError> {
        let t0 = Instant::now();
        let mut params = self.params;
        if params.depth == 0 {
            log::warn!("Depth 0 is not supported, using minimum depth of 1");
            params.depth = 1;
        }
        if pos.legal_moves().is_empty() {
            return Err(SearchError::NoLegalMoves { fen: pos.fen() });
        }

        let mut searcher = Searcher::new(params);
        let node = searcher.search(pos, params.depth, -INFINITY, INFINITY);
        let stats = searcher.stats();
        log::debug!(
            "search depth={} score={} nodes={} qnodes={} cutoffs={}",
            params.depth, node.score, stats.nodes, stats.qnodes, stats.cutoffs
        );

        let legal = pos.legal_moves();
        let mv = match node.best {
            Some(mv) if legal.contains(&mv) => mv,
            other => {
                let fen = pos.fen();
                let listed: Vec<String> = legal.iter().map(|m| m.to_string()).collect();
                log::error!(
                    "selected move {:?} is not legal; fen={} legal=[{}] score={}",
                    other, fen, listed.join(" "), node.score
                );
                return Err(SearchError::InternalInconsistency { mv: other, fen });
            }
        };

        let outcome = Outcome::from_score(node.score);
        let elapsed = t0.elapsed();
        log::info!(
            "bestmove {} score {} ({:?}) depth {} nodes {} in {:.3}s (budget {:.3}s)",
            mv, node.score, outcome, params.depth, stats.nodes + stats.qnodes,
            elapsed.as_secs_f64(), time_budget.as_secs_f64()
        );
        Ok(Decision { mv, score: node.score, outcome, depth: params.depth, stats, elapsed, time_budget })
    }
}
