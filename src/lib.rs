//! gridfill — fill a crossword grid from a vocabulary.
//!
//! The grid is modeled as a constraint satisfaction problem: variables are
//! slots, domains are candidate words, and constraints are length match,
//! letter agreement at crossings, and global word uniqueness. See
//! [`solver::Solver`] for the engine and [`crossword::Crossword`] for the
//! grid model it consumes.

pub mod crossword;
pub mod errors;
pub mod log;
pub mod render;
pub mod solver;
pub mod word_list;
