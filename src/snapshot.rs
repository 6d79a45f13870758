//! Per-frame render output
//!
//! Everything the presentation shell needs to draw one frame, copied out of
//! the simulation so the renderer never touches live state.

use serde::{Deserialize, Serialize};

use crate::sim::{
    Camera, Direction, EnemyState, GameState, MotionState, Outcome, Phase, Rect, RetryChoice,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Block,
    Enemy,
    Goal,
    Player,
}

/// Appearance hint for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum VisualTag {
    Solid,
    Goal,
    Enemy { facing: Direction, defeated: bool },
    Player { motion: MotionState },
}

/// One drawable entity in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: EntityKind,
    pub rect: Rect,
    pub visual: VisualTag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: Phase,
    pub lives: i32,
    pub cleared: bool,
    pub outcome: Option<Outcome>,
    pub retry_choice: RetryChoice,
    pub camera_x: i32,
    pub screen_width: i32,
    /// Audio cue: music should be looping
    pub music_playing: bool,
    /// Draw order: blocks, enemies, goal, player
    pub sprites: Vec<Sprite>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let stage = &state.stage;
        let mut sprites = Vec::with_capacity(stage.blocks().len() + stage.enemies().len() + 2);

        sprites.extend(stage.blocks().iter().map(|&rect| Sprite {
            kind: EntityKind::Block,
            rect,
            visual: VisualTag::Solid,
        }));
        sprites.extend(stage.enemies().iter().map(|enemy| Sprite {
            kind: EntityKind::Enemy,
            rect: enemy.rect(),
            visual: VisualTag::Enemy {
                facing: enemy.direction,
                defeated: enemy.state == EnemyState::Defeated,
            },
        }));
        sprites.push(Sprite {
            kind: EntityKind::Goal,
            rect: stage.goal(),
            visual: VisualTag::Goal,
        });
        sprites.push(Sprite {
            kind: EntityKind::Player,
            rect: state.player.rect(),
            visual: VisualTag::Player {
                motion: state.player.state,
            },
        });

        let session = &state.session;
        Self {
            tick: state.time_ticks,
            phase: session.phase,
            lives: session.lives,
            cleared: session.cleared,
            outcome: session.outcome,
            retry_choice: session.retry_choice,
            camera_x: state.camera.offset_x,
            screen_width: state.screen.x,
            music_playing: session.music_playing(),
            sprites,
        }
    }

    /// The stage is drawn while playing and behind the retry prompt
    pub fn shows_world(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Retry)
    }

    /// Sprites inside the camera view, with rects moved to screen space
    pub fn visible_sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        let camera = Camera {
            offset_x: self.camera_x,
        };
        let left = self.camera_x;
        let right = self.camera_x + self.screen_width;
        self.sprites
            .iter()
            .filter(move |s| s.rect.right() > left && s.rect.left() < right)
            .map(move |s| Sprite {
                rect: Rect::new(camera.to_screen(s.rect.x), s.rect.y, s.rect.w, s.rect.h),
                ..*s
            })
    }
}
