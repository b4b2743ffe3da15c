use anyhow::{Context, Result};
use clap::Parser;
use negabot::board::cozy::Position;
use negabot::search::alphabeta::SearchParams;
use negabot::uci::UciEngine;
use negabot::Engine;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fixed-depth negamax chess engine (UCI by default)", long_about = None)]
struct Args {
    /// JSON file with search parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth in plies (overrides the config file)
    #[arg(long)]
    depth: Option<u32>,

    /// Disable MVV-LVA move ordering
    #[arg(long, default_value_t = false)]
    no_ordering: bool,

    /// Search this FEN once and print the best move instead of running UCI
    #[arg(long)]
    fen: Option<String>,

    /// Search the start position once and print the best move
    #[arg(long, default_value_t = false)]
    go: bool,

    /// Time budget in milliseconds reported to the controller
    #[arg(long, default_value_t = 1000)]
    movetime: u64,
}

fn load_params(args: &Args) -> Result<SearchParams> {
    let mut params = match &args.config {
        Some(path) => SearchParams::from_json_file(path)?,
        None => SearchParams::default(),
    };
    if let Some(d) = args.depth { params.depth = d; }
    if args.no_ordering { params.order_moves = false; }
    Ok(params)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = load_params(&args)?;
    log::debug!("search params: {:?}", params);

    if args.fen.is_none() && !args.go {
        let mut uci = UciEngine::new(params);
        uci.run_loop().context("UCI loop aborted")?;
        return Ok(());
    }

    let mut pos = match args.fen.as_deref() {
        Some(fen) => Position::from_fen(fen).context("invalid --fen")?,
        None => Position::startpos(),
    };
    let engine = Engine::new(params);
    let decision = engine
        .think(&mut pos, Duration::from_millis(args.movetime))
        .context("search failed")?;
    println!(
        "bestmove={} score={} outcome={:?} depth={} nodes={} qnodes={} elapsed={:.3}s",
        pos.uci_string(decision.mv),
        decision.score,
        decision.outcome,
        decision.depth,
        decision.stats.nodes,
        decision.stats.qnodes,
        decision.elapsed.as_secs_f64()
    );
    Ok(())
}
