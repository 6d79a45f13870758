//! Aggregate game state
//!
//! Everything the simulation owns for one run: the session record, the
//! player, the stage and the camera.

use glam::IVec2;

use super::camera::Camera;
use super::flow::Session;
use super::player::Player;
use super::stage::{Stage, StageLayout};
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct GameState {
    pub session: Session,
    /// Persists across retries; repositioned rather than recreated
    pub player: Player,
    pub stage: Stage,
    pub camera: Camera,
    /// Screen size in pixels
    pub screen: IVec2,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(layout: StageLayout) -> Self {
        Self::with_screen(layout, IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT))
    }

    pub fn with_screen(layout: StageLayout, screen: IVec2) -> Self {
        let stage = Stage::new(layout);
        let start = stage.start_position();
        Self {
            session: Session::new(),
            player: Player::new(start.x, start.y),
            stage,
            camera: Camera::default(),
            screen,
            time_ticks: 0,
        }
    }

    /// Put the player back at the start of a freshly rebuilt stage
    pub fn respawn(&mut self) {
        self.stage.reset();
        let start = self.stage.start_position();
        self.player.reset_position(start.x, start.y);
        self.camera.reset();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(StageLayout::classic())
    }
}
