//! Platform abstraction layer
//!
//! Handles the shell side of the frame loop:
//! - Input events sampled into per-tick commands
//! - Fixed-step pacing against wall-clock time

pub mod input;
pub mod time;

pub use input::{InputSampler, Key};
pub use time::FixedStep;
