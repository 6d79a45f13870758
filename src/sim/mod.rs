//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One update per tick, with per-tick speed constants
//! - Stable iteration order (enemy roster order)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod enemy;
pub mod flow;
pub mod interaction;
pub mod player;
pub mod stage;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{Axis, Body, Rect, Side};
pub use enemy::{Direction, Enemy, EnemyState, Interaction};
pub use flow::{Outcome, Phase, RetryChoice, Session};
pub use interaction::Interactions;
pub use player::{MotionState, Player};
pub use stage::{LayoutError, Span, Stage, StageLayout};
pub use state::GameState;
pub use tick::{GameEvent, TickInput, tick};
