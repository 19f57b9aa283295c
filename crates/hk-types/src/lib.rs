//! Shared data types for bounded-confidence opinion dynamics.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the simulation crate and for anything that
//! consumes its output.

pub mod options;
pub mod point;
pub mod report;

// Re-export option enums
pub use options::{BoundaryPolicy, Norm, Regime, ResultMode, Topology};

// Re-export opinion types
pub use point::Point2;

// Re-export run output types
pub use report::{RunOutput, RunReport, Termination};
