//! Patrolling enemy
//!
//! Walks until it bumps into a block, then turns around. Once stomped it drops
//! straight down at a constant speed and expires below the stage.

use serde::{Deserialize, Serialize};

use super::collision::{Axis, Body, Rect};
use crate::consts::*;

/// Facing / walking direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Enemy life state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Active,
    /// Stomped; falling out of the stage
    Defeated,
}

/// How the player's box relates to an enemy this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    None,
    StompedFromAbove,
    SideContact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub direction: Direction,
    pub state: EnemyState,
}

impl Enemy {
    /// Spawn an active enemy facing left
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            body: Body::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            direction: Direction::Left,
            state: EnemyState::Active,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_active(&self) -> bool {
        self.state == EnemyState::Active
    }

    /// Advance one tick against the static geometry
    pub fn advance(&mut self, blocks: &[Rect]) {
        match self.state {
            EnemyState::Active => {
                let delta = ENEMY_WALK_SPEED * self.direction.sign();
                if self.body.move_axis(Axis::Horizontal, delta, blocks).is_some() {
                    self.direction = self.direction.reversed();
                }
            }
            EnemyState::Defeated => {
                self.body.pos.y += ENEMY_DEFEATED_FALL_SPEED;
            }
        }
    }

    /// Defeated and far enough below the stage to be dropped
    pub fn is_expired(&self) -> bool {
        self.state == EnemyState::Defeated && self.rect().y > ENEMY_DESPAWN_Y
    }

    pub fn mark_defeated(&mut self) {
        if self.state == EnemyState::Active {
            self.state = EnemyState::Defeated;
        }
    }

    /// Classify contact with the player. Does not mutate either side.
    pub fn interaction_with_player(&self, player: &Rect, player_vy: f32) -> Interaction {
        let rect = self.rect();
        if self.state == EnemyState::Defeated || !rect.intersects(player) {
            return Interaction::None;
        }

        if player_vy > 0.0 && player.bottom() < rect.center_y() {
            Interaction::StompedFromAbove
        } else {
            Interaction::SideContact
        }
    }
}
