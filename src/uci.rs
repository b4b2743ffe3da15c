use std::io::{self, BufRead, Write};
use std::time::Duration;
use crate::board::cozy::Position;
use crate::search::alphabeta::SearchParams;
use crate::search::controller::{Decision, Engine, SearchError};
use crate::search::eval::EVAL_SCALE;

/// Budget reported to the controller when `go` carries no `movetime`.
const DEFAULT_BUDGET: Duration = Duration::from_secs(1);

pub struct UciEngine {
    pos: Position,
    engine: Engine,
}

impl Default for UciEngine {
    fn default() -> Self { Self::new(SearchParams::default()) }
}

impl UciEngine {
    pub fn new(params: SearchParams) -> Self { Self { pos: Position::startpos(), engine: Engine::new(params) } }

    pub fn position(&self) -> &Position { &self.pos }

    fn cmd_uci(&self) {
        println!("id name NegaBot");
        println!("id author NegaBot Team");
        println!("option name Depth type spin default {} min 1 max 64", self.engine.params().depth);
        println!("uciok");
    }

    fn cmd_isready(&self) { println!("readyok"); }

    fn cmd_ucinewgame(&mut self) { self.pos = Position::startpos(); }

    fn cmd_setoption(&mut self, args: &str) {
        // setoption name Depth value N
        let tokens: Vec<&str> = args.split_whitespace().collect();
        if let [ "name", name, "value", value ] = tokens.as_slice() {
            if name.eq_ignore_ascii_case("depth") {
                match value.parse::<u32>() {
                    Ok(d) => self.engine.set_depth(d),
                    Err(_) => log::warn!("ignoring bad Depth value {value}"),
                }
            }
        }
    }

    /// Supports `startpos [moves ...]` and `fen <6 fields> [moves ...]`.
    pub fn cmd_position(&mut self, args: &str) {
        let mut tokens = args.split_whitespace();
        let fen = match tokens.next() {
            Some("startpos") => None,
            Some("fen") => {
                let fen_fields: Vec<&str> = tokens.by_ref().take(6).collect();
                if fen_fields.len() != 6 {
                    log::warn!("ignoring short FEN in 'position {args}'");
                    return;
                }
                Some(fen_fields.join(" "))
            }
            _ => return,
        };
        let moves: Vec<String> = match tokens.next() {
            Some("moves") => tokens.map(|s| s.to_string()).collect(),
            _ => Vec::new(),
        };
        let built = match fen {
            None => Position::set_from_start_and_moves(&moves),
            Some(f) => Position::set_from_fen_and_moves(&f, &moves),
        };
        match built {
            Ok(p) => self.pos = p,
            Err(e) => log::warn!("ignoring 'position {args}': {e}"),
        }
    }

    /// Supports `go [depth N] [movetime T]`. Returns the decision, or `None`
    /// when the game is already over.
    pub fn cmd_go(&mut self, args: &str) -> Result<Option<Decision>, SearchError> {
        let mut engine = self.engine;
        let mut budget = DEFAULT_BUDGET;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            match tok {
                "depth" => {
                    if let Some(d) = tokens.next().and_then(|s| s.parse::<u32>().ok()) { engine.set_depth(d); }
                }
                "movetime" => {
                    if let Some(t) = tokens.next().and_then(|s| s.parse::<u64>().ok()) { budget = Duration::from_millis(t); }
                }
                _ => {}
            }
        }
        match engine.think(&mut self.pos, budget) {
            Ok(d) => {
                match d.outcome.mate_in_moves() {
                    Some(n) => println!("info depth {} score mate {} nodes {}", d.depth, n, d.stats.nodes + d.stats.qnodes),
                    None => println!("info depth {} score cp {} nodes {}", d.depth, d.score * EVAL_SCALE, d.stats.nodes + d.stats.qnodes),
                }
                println!("bestmove {}", self.pos.uci_string(d.mv));
                Ok(Some(d))
            }
            Err(SearchError::NoLegalMoves { .. }) => { println!("bestmove 0000"); Ok(None) }
            Err(e) => Err(e),
        }
    }

    /// Reads commands until `quit` or EOF. An internal inconsistency ends the
    /// loop with the error instead of playing a move.
    pub fn run_loop(&mut self) -> Result<(), SearchError> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line { Ok(s) => s.trim().to_string(), Err(_) => break };
            if line.is_empty() { continue; }
            if line == "uci" { self.cmd_uci(); }
            else if line == "isready" { self.cmd_isready(); }
            else if line == "ucinewgame" { self.cmd_ucinewgame(); }
            else if line == "quit" { break; }
            else if let Some(rest) = line.strip_prefix("setoption ") { self.cmd_setoption(rest); }
            else if let Some(rest) = line.strip_prefix("position ") { self.cmd_position(rest); }
            else if line == "go" { self.cmd_go("")?; }
            else if let Some(rest) = line.strip_prefix("go ") { self.cmd_go(rest)?; }
            else { log::debug!("ignoring '{line}'"); }
            let _ = io::stdout().flush();
        }
        Ok(())
    }
}
