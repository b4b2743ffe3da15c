// Fixed-depth negamax engine over a pluggable board collaborator
pub mod uci;
pub mod perft;
pub mod board;
pub mod search;

pub use board::{Applied, GameState, Move};
pub use search::controller::{Decision, Engine, SearchError};
