//! Integrals module - time-weighted value share per account over a grid.

mod accumulator;
mod integral_model;

pub use accumulator::IntegralAccumulator;
pub use integral_model::{AccumulationResult, StepSummary, TimeGrid, UserIntegral};
