pub mod eval;
pub mod ordering;
pub mod qsearch;
pub mod alphabeta;
pub mod controller;
