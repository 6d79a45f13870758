//! Keyboard sampling
//!
//! Key events arrive between frames. At the top of each tick the sampler
//! turns the currently held keys plus the presses seen since the last sample
//! into one `TickInput`. Each press is delivered exactly once.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    LeftShift,
    RightShift,
    Space,
    A,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    held: HashSet<Key>,
    pressed: Vec<Key>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. OS auto-repeat of a held key is not a new press.
    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Build this tick's commands and consume pending presses
    pub fn sample(&mut self) -> TickInput {
        let mut input = TickInput {
            move_left: self.is_held(Key::Left),
            move_right: self.is_held(Key::Right),
            dash: self.is_held(Key::LeftShift) || self.is_held(Key::RightShift),
            ..Default::default()
        };

        for key in self.pressed.drain(..) {
            match key {
                Key::Left | Key::Right => input.retry_toggle = true,
                Key::Space => input.jump = true,
                Key::A => input.start = true,
                Key::Enter => input.confirm = true,
                Key::Escape => input.quit = true,
                Key::LeftShift | Key::RightShift => {}
            }
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_repeat_every_sample() {
        let mut sampler = InputSampler::new();
        sampler.key_down(Key::Right);
        sampler.key_down(Key::LeftShift);

        for _ in 0..3 {
            let input = sampler.sample();
            assert!(input.move_right);
            assert!(input.dash);
            assert!(!input.move_left);
        }

        sampler.key_up(Key::LeftShift);
        assert!(!sampler.sample().dash);
    }

    #[test]
    fn test_presses_are_consumed_once() {
        let mut sampler = InputSampler::new();
        sampler.key_down(Key::Space);
        sampler.key_down(Key::Space); // auto-repeat

        assert!(sampler.sample().jump);
        assert!(!sampler.sample().jump);

        sampler.key_up(Key::Space);
        sampler.key_down(Key::Space);
        assert!(sampler.sample().jump);
    }

    #[test]
    fn test_tap_between_samples_still_counts() {
        let mut sampler = InputSampler::new();
        sampler.key_down(Key::Enter);
        sampler.key_up(Key::Enter);
        let input = sampler.sample();
        assert!(input.confirm);
    }

    #[test]
    fn test_edge_mapping() {
        let mut sampler = InputSampler::new();
        sampler.key_down(Key::A);
        sampler.key_down(Key::Left);
        sampler.key_down(Key::Escape);
        let input = sampler.sample();
        assert!(input.start);
        assert!(input.retry_toggle);
        assert!(input.quit);
        assert!(input.move_left);
        assert!(!input.confirm);
    }
}
