use negabot::board::cozy::Position;
use negabot::board::GameState;
use negabot::search::alphabeta::{SearchParams, Searcher};
use negabot::search::eval::{evaluate, Outcome, INFINITY};

#[test]
fn eval_material_startpos_is_zero() {
    assert_eq!(evaluate(&Position::startpos()), 0);
}

#[test]
fn eval_material_known_advantage() {
    // White: Kh1, Qe2; Black: Ka8, Qd2. Material equal.
    let b = Position::from_fen("k7/8/8/8/8/8/3qQ3/7K w - - 0 1").expect("valid fen");
    assert_eq!(evaluate(&b), 0);
}

#[test]
fn search_returns_legal_move_startpos() {
    let mut b = Position::startpos();
    let mut s = Searcher::new(SearchParams { depth: 1, ..SearchParams::default() });
    let res = s.search_depth(&mut b);
    let bm = res.best.expect("no move found at depth 1");
    assert!(b.legal_moves().contains(&bm));
}

#[test]
fn search_prefers_winning_queen_capture() {
    let mut b = Position::from_fen("k7/8/8/8/8/8/3qQ3/7K w - - 0 1").expect("valid fen");
    let mut s = Searcher::new(SearchParams { depth: 1, ..SearchParams::default() });
    let res = s.search_depth(&mut b);
    let bm = res.best.expect("expected a best move");
    assert_eq!(bm.to_string(), "e2d2", "expected Qe2xd2 as best move, got {bm}");
    assert!(res.score >= 90, "queen up should be worth at least 90, got {}", res.score);
}

fn positions() -> Vec<Position> {
    [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "k7/8/8/8/8/8/3qQ3/7K w - - 0 1",
        "4k3/8/8/8/5Q2/8/8/2b4K b - - 0 1",
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
    ]
    .iter()
    .map(|f| Position::from_fen(f).expect("valid fen"))
    .collect()
}

#[test]
fn scores_stay_inside_the_window() {
    let windows = [(-3, 3), (-1, 0), (0, 1), (5, 9), (-20, -10), (-INFINITY, INFINITY)];
    for mut pos in positions() {
        for depth in 1..=3 {
            for &(alpha, beta) in &windows {
                let mut s = Searcher::default();
                let r = s.search(&mut pos, depth, alpha, beta);
                assert!(alpha <= r.score && r.score <= beta, "{} d{} ({alpha},{beta}) -> {}", pos.fen(), depth, r.score);
            }
        }
    }
}

#[test]
fn fail_high_returns_beta_and_fail_low_returns_alpha() {
    for mut pos in positions() {
        let depth = 2;
        let mut s = Searcher::default();
        let exact = s.search(&mut pos, depth, -INFINITY, INFINITY).score;

        let high = s.search(&mut pos, depth, exact - 5, exact - 1);
        assert_eq!(high.score, exact - 1, "fail high in {}", pos.fen());
        assert!(high.best.is_some(), "a cutoff names its refutation");

        let low = s.search(&mut pos, depth, exact + 1, exact + 5);
        assert_eq!(low.score, exact + 1, "fail low in {}", pos.fen());
        assert_eq!(low.best, None);

        let inside = s.search(&mut pos, depth, exact - 1, exact + 1);
        assert_eq!(inside.score, exact);
    }
}

#[test]
fn ordering_does_not_change_the_value() {
    for mut pos in positions() {
        let mut ordered = Searcher::new(SearchParams { depth: 3, order_moves: true });
        let mut plain = Searcher::new(SearchParams { depth: 3, order_moves: false });
        let a = ordered.search_depth(&mut pos).score;
        let b = plain.search_depth(&mut pos).score;
        assert_eq!(a, b, "{}", pos.fen());
    }
}

#[test]
fn mate_score_is_decoded_as_win() {
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("valid fen");
    let mut s = Searcher::new(SearchParams { depth: 3, ..SearchParams::default() });
    let r = s.search_depth(&mut pos);
    assert_eq!(Outcome::from_score(r.score), Outcome::Win(1));
}
