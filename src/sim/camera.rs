//! Horizontal scroll offset
//!
//! Scrolls forward only: the offset follows the player once they pass the
//! middle of the screen and never moves back left until `reset()`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub offset_x: i32,
}

impl Camera {
    pub fn reset(&mut self) {
        self.offset_x = 0;
    }

    /// Follow the player's box x, clamped to `[0, stage_width - screen_width]`
    pub fn follow(&mut self, player_x: i32, screen_width: i32, stage_width: i32) {
        let half = screen_width / 2;
        if player_x - self.offset_x > half {
            self.offset_x = player_x - half;
        }
        let max_offset = (stage_width - screen_width).max(0);
        self.offset_x = self.offset_x.clamp(0, max_offset);
    }

    /// World x to screen x
    #[inline]
    pub fn to_screen(&self, world_x: i32) -> i32 {
        world_x - self.offset_x
    }
}
