//! Player character
//!
//! Horizontal velocity comes from input commands; vertical velocity from
//! jumps, gravity and stomp bounces. Each update resolves the horizontal axis
//! against the stage first, then the vertical axis, then probes for ground.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::{Axis, Body, Rect, Side};
use crate::consts::*;

/// Player motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    Standing,
    Jumping,
    Falling,
    /// Knocked off the stage: no control, no block collisions
    Damaged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub vel: Vec2,
    pub state: MotionState,
}

impl Player {
    /// Spawn in the air; the first updates settle it onto the ground
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            body: Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            state: MotionState::Falling,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_damaged(&self) -> bool {
        self.state == MotionState::Damaged
    }

    fn horizontal_speed(dash: bool) -> f32 {
        if dash {
            PLAYER_DASH_SPEED
        } else {
            PLAYER_WALK_SPEED
        }
    }

    pub fn move_left(&mut self, dash: bool) {
        if !self.is_damaged() {
            self.vel.x = -Self::horizontal_speed(dash);
        }
    }

    pub fn move_right(&mut self, dash: bool) {
        if !self.is_damaged() {
            self.vel.x = Self::horizontal_speed(dash);
        }
    }

    pub fn stop(&mut self) {
        self.vel.x = 0.0;
    }

    /// Jump if standing; otherwise ignored
    pub fn jump(&mut self) {
        if self.state == MotionState::Standing {
            self.vel.y = -PLAYER_JUMP_POWER;
            self.state = MotionState::Jumping;
        }
    }

    /// Rebound off a stomped enemy
    pub fn bounce(&mut self, dash: bool) {
        self.vel.y = if dash { -DASH_STOMP_BOUNCE } else { -STOMP_BOUNCE };
    }

    pub fn take_damage(&mut self) {
        if self.is_damaged() {
            return;
        }
        self.state = MotionState::Damaged;
        self.vel = Vec2::new(0.0, DAMAGE_FALL_SPEED);
    }

    /// Teleport and drop. The ground probe decides on the next update
    /// whether the player is actually standing.
    pub fn reset_position(&mut self, x: i32, y: i32) {
        self.body.place(x, y);
        self.vel = Vec2::ZERO;
        self.state = MotionState::Falling;
    }

    pub fn update(&mut self, blocks: &[Rect]) {
        if self.is_damaged() {
            self.vel.y += GRAVITY;
            self.body.pos.y += self.vel.y;
            return;
        }

        self.body.move_axis(Axis::Horizontal, self.vel.x, blocks);

        if matches!(self.state, MotionState::Jumping | MotionState::Falling) {
            self.vel.y += GRAVITY;
        }

        // Landing keeps vel.y: a standing player presses into the ground
        // every frame and carries that speed off a ledge
        match self.body.move_axis(Axis::Vertical, self.vel.y, blocks) {
            Some(Side::Bottom) => self.state = MotionState::Standing,
            Some(Side::Top) => self.vel.y = 0.0,
            _ => {}
        }

        if self.state == MotionState::Standing
            && !self.body.probe(IVec2::new(0, GROUND_PROBE), blocks)
        {
            self.state = MotionState::Falling;
        }
    }
}
