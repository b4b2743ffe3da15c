use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use negabot::board::cozy::Position;
use negabot::search::alphabeta::SearchParams;
use negabot::search::eval::Outcome;
use negabot::Engine;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, serde::Deserialize)]
struct Rec { fen: String, best: String }

#[derive(Parser, Debug)]
#[command(name = "accept", about = "Run a JSONL suite of {fen, best} positions through the engine")]
struct Args {
    /// Suite file, one JSON object per line
    #[arg(long)]
    suite: Option<PathBuf>,
    /// Fixed search depth
    #[arg(long, default_value_t = 4)]
    depth: u32,
    /// Print each solved case
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn load_jsonl(path: &Path) -> Result<Vec<Rec>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let l = line.trim();
        if l.is_empty() { continue; }
        let rec: Rec = serde_json::from_str(l).with_context(|| format!("{}:{}", path.display(), i + 1))?;
        out.push(rec);
    }
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let path = args.suite.clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}/src/suites/tactics.jsonl", env!("CARGO_MANIFEST_DIR"))));
    let cases = load_jsonl(&path)?;
    let engine = Engine::new(SearchParams { depth: args.depth, ..SearchParams::default() });

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?,
    );

    let t_total = Instant::now();
    let mut failures: Vec<String> = Vec::new();
    let mut sum_nodes: u64 = 0;
    for (i, case) in cases.iter().enumerate() {
        let mut pos = Position::from_fen(&case.fen).with_context(|| format!("case {i}"))?;
        match engine.think(&mut pos, Duration::ZERO) {
            Ok(d) => {
                sum_nodes += d.stats.nodes + d.stats.qnodes;
                let got = pos.uci_string(d.mv);
                // Any mating move is accepted.
                if got == case.best || matches!(d.outcome, Outcome::Win(_)) {
                    if args.verbose { progress.println(format!("ok idx={} move={} score={}", i, got, d.score)); }
                } else {
                    failures.push(format!("idx={} fen={} got={} expect={} score={}", i, case.fen, got, case.best, d.score));
                }
            }
            Err(e) => failures.push(format!("idx={} fen={} error={}", i, case.fen, e)),
        }
        progress.inc(1);
    }
    progress.finish_with_message("done");

    let total = t_total.elapsed().as_secs_f64();
    println!(
        "summary: cases={} failures={} depth={} elapsed={:.3}s nodes={} nps={:.1}",
        cases.len(), failures.len(), args.depth, total, sum_nodes,
        if total > 0.0 { sum_nodes as f64 / total } else { 0.0 }
    );
    if !failures.is_empty() {
        eprintln!("failures ({}):\n{}", failures.len(), failures.join("\n"));
        std::process::exit(1);
    }
    Ok(())
}
