//! Session flow: start screen, play, retry prompt and result screen
//!
//! Only this module mutates the session record. Commands that make no sense in
//! the current phase are ignored.

use serde::{Deserialize, Serialize};

use crate::consts::INITIAL_LIVES;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen, waiting for the start command
    Start,
    /// Stage in progress
    Playing,
    /// A life was lost; asking whether to continue
    Retry,
    /// Session over (cleared or not)
    Result,
}

/// Retry prompt selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetryChoice {
    #[default]
    Yes,
    No,
}

impl RetryChoice {
    pub fn toggled(self) -> Self {
        match self {
            RetryChoice::Yes => RetryChoice::No,
            RetryChoice::No => RetryChoice::Yes,
        }
    }
}

/// Why the session reached the result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player reached the goal
    Cleared,
    /// Lost a life with none left
    OutOfLives,
    /// Chose not to continue at the retry prompt
    Declined,
}

/// The per-run session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phase: Phase,
    /// Remaining lives. Drops to -1 when the session ends without a clear.
    pub lives: i32,
    pub cleared: bool,
    pub retry_choice: RetryChoice,
    /// Set while in `Phase::Result`
    pub outcome: Option<Outcome>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Start,
            lives: INITIAL_LIVES,
            cleared: false,
            retry_choice: RetryChoice::Yes,
            outcome: None,
        }
    }

    /// Background music plays only while the stage is in progress
    pub fn music_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Start -> Playing with a full set of lives
    pub fn start_game(&mut self) -> bool {
        if self.phase != Phase::Start {
            return false;
        }
        self.phase = Phase::Playing;
        self.lives = INITIAL_LIVES;
        self.cleared = false;
        self.outcome = None;
        log::info!("Session started with {} lives", self.lives);
        true
    }

    /// Playing -> Retry, or Result once the lives run out.
    /// The retry prompt always opens on Yes; a No picked at an earlier
    /// prompt is not remembered.
    pub fn lose_life(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.lives -= 1;
        if self.lives < 0 {
            self.finish(Outcome::OutOfLives);
        } else {
            self.phase = Phase::Retry;
            self.retry_choice = RetryChoice::Yes;
            log::info!("Life lost, {} remaining", self.lives);
        }
    }

    /// Playing -> Result (cleared)
    pub fn clear_game(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.cleared = true;
        self.finish(Outcome::Cleared);
    }

    pub fn toggle_retry(&mut self) {
        if self.phase == Phase::Retry {
            self.retry_choice = self.retry_choice.toggled();
        }
    }

    /// Resolve the retry prompt. Returns true when play resumes, in which
    /// case the caller rebuilds the stage and respawns the player.
    pub fn confirm_retry(&mut self) -> bool {
        if self.phase != Phase::Retry {
            return false;
        }
        match self.retry_choice {
            RetryChoice::Yes => {
                self.phase = Phase::Playing;
                log::info!("Continuing with {} lives", self.lives);
                true
            }
            RetryChoice::No => {
                self.lives = -1;
                self.cleared = false;
                self.finish(Outcome::Declined);
                false
            }
        }
    }

    /// Result -> Start. Returns true when the caller should reset the world.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::Result {
            return false;
        }
        self.phase = Phase::Start;
        self.outcome = None;
        log::info!("Back to the start screen");
        true
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Result;
        self.outcome = Some(outcome);
        log::info!("Session finished: {:?} (lives {})", outcome, self.lives);
    }
}
