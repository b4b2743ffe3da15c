use clap::Parser;
use negabot::board::cozy::Position;
use negabot::search::alphabeta::{SearchParams, Searcher};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "negabot-bench", version, about = "Benchmark NegaBot fixed-depth search")]
struct Args {
    /// FEN string or 'startpos'
    #[arg(long, default_value = "startpos")]
    fen: String,

    /// Fixed search depth
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Disable move ordering to measure its pruning effect
    #[arg(long, default_value_t = false)]
    no_ordering: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut pos = if args.fen == "startpos" { Position::startpos() } else { Position::from_fen(&args.fen)? };

    let params = SearchParams { depth: args.depth, order_moves: !args.no_ordering };
    let mut s = Searcher::new(params);
    let t0 = Instant::now();
    let node = s.search_depth(&mut pos);
    let dt = t0.elapsed();
    let st = s.stats();
    let total = st.nodes + st.qnodes;
    let nps = if dt.as_secs_f64() > 0.0 { total as f64 / dt.as_secs_f64() } else { 0.0 };
    let best = node.best.map(|m| pos.uci_string(m)).unwrap_or_else(|| "(none)".to_string());
    println!(
        "bestmove={} score={} nodes={} qnodes={} cutoffs={} elapsed={:.3}s nps={:.1}",
        best, node.score, st.nodes, st.qnodes, st.cutoffs, dt.as_secs_f64(), nps
    );
    Ok(())
}
