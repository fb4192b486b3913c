//! Everything that happens around the engine: repeating runs, timing them, aggregating the
//! results and rendering them for the console.

pub mod report;
pub mod runs;
pub mod statistics;
