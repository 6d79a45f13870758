//! Stage geometry, enemy roster and goal
//!
//! The stage is rebuilt from a `StageLayout` description. Blocks and the goal
//! never change after a build; enemies are the only dynamic members and come
//! back to their spawn points on `reset()`.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::Rect;
use super::enemy::Enemy;
use crate::consts::*;

/// Horizontal run of ground tiles covering `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: i32,
    pub end: i32,
}

/// Static description of a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageLayout {
    pub width: i32,
    pub height: i32,
    /// Ground tile edge length
    pub tile: i32,
    /// Top of the ground row
    pub ground_y: i32,
    pub ground: Vec<Span>,
    pub obstacles: Vec<Rect>,
    /// Enemy spawn points (top-left of the enemy box)
    pub enemies: Vec<IVec2>,
    /// Top-left of the goal marker
    pub goal: IVec2,
    /// Player spawn point
    pub start: IVec2,
}

/// Problems found while loading or validating a layout
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid layout json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tile size must be positive, got {0}")]
    InvalidTile(i32),
    #[error("ground segment {index} has an empty span {start}..{end}")]
    InvalidSegment { index: usize, start: i32, end: i32 },
    #[error("obstacle {index} has zero-sized dimensions")]
    ZeroSizedObstacle { index: usize },
    #[error("stage width {stage} is narrower than the screen width {screen}")]
    NarrowerThanScreen { stage: i32, screen: i32 },
    #[error("goal at ({x}, {y}) lies outside the stage")]
    GoalOutsideStage { x: i32, y: i32 },
    #[error("start at ({x}, {y}) lies outside the stage")]
    StartOutsideStage { x: i32, y: i32 },
}

impl StageLayout {
    /// The built-in stage: three ground runs split by two pits, seven
    /// obstacle columns, four enemies and a goal at the far end.
    pub fn classic() -> Self {
        let ground_y = 500;
        let column = |x: i32, h: i32| Rect::new(x, ground_y - h, 50, h);
        let enemy_y = ground_y - ENEMY_SIZE;

        Self {
            width: 3000,
            height: SCREEN_HEIGHT,
            tile: 50,
            ground_y,
            ground: vec![
                Span { start: 0, end: 800 },
                // 200px pit: a dash jump clears it
                Span { start: 1000, end: 1800 },
                Span { start: 2000, end: 3000 },
            ],
            obstacles: vec![
                column(500, 100),
                column(700, 150),
                column(1200, 100),
                column(1400, 150),
                column(1600, 100),
                column(2200, 100),
                column(2400, 150),
            ],
            enemies: vec![
                IVec2::new(600, enemy_y),
                IVec2::new(1300, enemy_y),
                IVec2::new(1700, enemy_y),
                IVec2::new(2300, enemy_y),
            ],
            goal: IVec2::new(2800, ground_y - GOAL_HEIGHT),
            start: IVec2::new(100, 400),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the layout is usable on a screen of the given width
    pub fn validate(&self, screen_width: i32) -> Result<(), LayoutError> {
        if self.tile <= 0 {
            return Err(LayoutError::InvalidTile(self.tile));
        }
        if self.width < screen_width {
            return Err(LayoutError::NarrowerThanScreen {
                stage: self.width,
                screen: screen_width,
            });
        }
        for (index, span) in self.ground.iter().enumerate() {
            if span.end <= span.start {
                return Err(LayoutError::InvalidSegment {
                    index,
                    start: span.start,
                    end: span.end,
                });
            }
        }
        if let Some(index) = self.obstacles.iter().position(|r| r.w <= 0 || r.h <= 0) {
            return Err(LayoutError::ZeroSizedObstacle { index });
        }

        let inside = |p: IVec2| (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y);
        if !inside(self.goal) {
            return Err(LayoutError::GoalOutsideStage {
                x: self.goal.x,
                y: self.goal.y,
            });
        }
        if !inside(self.start) {
            return Err(LayoutError::StartOutsideStage {
                x: self.start.x,
                y: self.start.y,
            });
        }
        Ok(())
    }
}

impl Default for StageLayout {
    fn default() -> Self {
        Self::classic()
    }
}

/// A built stage
#[derive(Debug, Clone)]
pub struct Stage {
    layout: StageLayout,
    blocks: Vec<Rect>,
    enemies: Vec<Enemy>,
    goal: Rect,
}

impl Stage {
    pub fn new(layout: StageLayout) -> Self {
        let mut stage = Self {
            goal: Rect::new(layout.goal.x, layout.goal.y, GOAL_WIDTH, GOAL_HEIGHT),
            layout,
            blocks: Vec::new(),
            enemies: Vec::new(),
        };
        stage.build();
        stage
    }

    fn build(&mut self) {
        let layout = &self.layout;

        for span in &layout.ground {
            let mut x = span.start;
            while x < span.end {
                let w = layout.tile.min(span.end - x);
                self.blocks.push(Rect::new(x, layout.ground_y, w, layout.tile));
                x += layout.tile;
            }
        }
        self.blocks.extend_from_slice(&layout.obstacles);

        self.enemies
            .extend(layout.enemies.iter().map(|p| Enemy::new(p.x, p.y)));
        self.goal = Rect::new(layout.goal.x, layout.goal.y, GOAL_WIDTH, GOAL_HEIGHT);
    }

    /// Discard everything and rebuild from the layout
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.enemies.clear();
        self.build();
    }

    /// Advance every live enemy, then drop the ones that fell out.
    /// Returns how many were dropped.
    pub fn update(&mut self) -> usize {
        for enemy in &mut self.enemies {
            enemy.advance(&self.blocks);
        }
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.is_expired());
        before - self.enemies.len()
    }

    pub fn blocks(&self) -> &[Rect] {
        &self.blocks
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn goal(&self) -> Rect {
        self.goal
    }

    pub fn start_position(&self) -> IVec2 {
        self.layout.start
    }

    pub fn width(&self) -> i32 {
        self.layout.width
    }
}
