use negabot::board::cozy::Position;
use negabot::board::GameState;
use negabot::perft::{divide, perft};

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Make/undo perft driver for NegaBot")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print per-move counts
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use rayon::prelude::*;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let base = if args.fen == "startpos" { Position::startpos() } else { Position::from_fen(&args.fen)? };

    if args.divide {
        let mut pos = base.clone();
        let mut total = 0u64;
        for (mv, n) in divide(&mut pos, args.depth) {
            println!("{}: {}", pos.uci_string(mv), n);
            total += n;
        }
        println!("nodes: {}", total);
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let t0 = Instant::now();
    let nodes = pool.install(|| {
        if args.threads <= 1 || args.depth <= 1 {
            let mut pos = base.clone();
            perft(&mut pos, args.depth)
        } else {
            // Each worker owns its own copy; the search itself stays single-threaded.
            let root_moves = base.legal_moves();
            root_moves.par_iter().map(|&mv| {
                let mut pos = base.clone();
                let mut child = pos.play(mv);
                perft(&mut *child, args.depth - 1)
            }).sum()
        }
    });
    let dt = t0.elapsed().as_secs_f64();
    if args.nps {
        let nps = if dt > 0.0 { nodes as f64 / dt } else { f64::INFINITY };
        println!("nodes: {} elapsed: {:.3}s nps: {:.0}", nodes, dt, nps);
    } else {
        println!("nodes: {}", nodes);
    }
    Ok(())
}
