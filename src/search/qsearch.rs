use crate::board::GameState;
use crate::search::alphabeta::Searcher;
use crate::search::eval::{evaluate, INFINITY};
use crate::search::ordering::order_moves;

impl Searcher {
    pub fn qsearch_eval<P: GameState>(&mut self, pos: &mut P) -> i32 {
        self.qsearch(pos, -INFINITY, INFINITY)
    }

    /// Fail-hard capture search. The side to move may always stand pat, so
    /// the static score is a floor and only captures can raise it.
    pub(crate) fn qsearch<P: GameState>(&mut self, pos: &mut P, mut alpha: i32, beta: i32) -> i32 {
        self.stats.qnodes += 1;
        // Stand pat
        let stand = evaluate(pos);
        if stand >= beta { return beta; }
        if stand > alpha { alpha = stand; }

        // Captures only
        let caps = pos.capture_moves();
        let caps = if self.params.order_moves { order_moves(pos, caps) } else { caps };
        for m in caps {
            let score = {
                let mut child = pos.play(m);
                -self.qsearch(&mut *child, -beta, -alpha)
            };
            if score >= beta { return beta; }
            if score > alpha { alpha = score; }
        }
        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cozy::Position;

    #[test]
    fn qsearch_respects_window() {
        let mut pos = Position::from_fen("4k3/8/8/8/5Q2/8/8/2b4K b - - 0 1").unwrap();
        let mut s = Searcher::default();
        for (alpha, beta) in [(-3, 3), (-20, -10), (5, 6), (0, 1)] {
            let v = s.qsearch(&mut pos, alpha, beta);
            assert!(alpha <= v && v <= beta, "window ({alpha}, {beta}) gave {v}");
        }
    }

    #[test]
    fn qsearch_counts_one_node_when_quiet() {
        let mut pos = Position::startpos();
        let mut s = Searcher::default();
        assert_eq!(s.qsearch_eval(&mut pos), 0);
        assert_eq!(s.stats().qnodes, 1);
    }
}
