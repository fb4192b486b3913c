//! Genetic algorithm search for placements of eight non-attacking queens.
//!
//! The engine lives in [`evolution`]; [`evaluation`] repeats and times runs and reports on
//! them; [`export`] writes a finished trial set to JSON.

pub mod config;
pub mod evaluation;
pub mod evolution;
pub mod export;
