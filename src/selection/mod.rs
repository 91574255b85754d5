//! Selection accumulation
//!
//! # Overview
//!
//! Turns "select the first N records" into a sequence of page fetches.
//! Pages are fetched strictly in order starting at page 1, because whether
//! page k+1 is needed depends on what page k returned.

mod accumulator;

pub use accumulator::{AccumulateStats, SelectionAccumulator};
