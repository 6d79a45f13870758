//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame at the reference tick
//! rate. Order within a playing frame: input, player, enemies, camera,
//! interactions, then session reactions.

use serde::{Deserialize, Serialize};

use super::flow::Phase;
use super::interaction;
use super::state::GameState;

/// Input commands for a single tick
///
/// `move_left`, `move_right` and `dash` are held states; the rest are edges
/// that the input sampler delivers at most once per key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub dash: bool,
    pub jump: bool,
    pub start: bool,
    pub retry_toggle: bool,
    pub confirm: bool,
    /// Handled by the shell; the simulation ignores it
    pub quit: bool,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    EnemyStomped,
    PlayerDamaged,
    EnemyDespawned,
    LifeLost { lives_left: i32 },
    StageCleared,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let before = state.session.phase;
    state.time_ticks += 1;

    match before {
        Phase::Start => {
            if input.start {
                state.session.start_game();
            }
        }
        Phase::Playing => play_frame(state, input, &mut events),
        Phase::Retry => {
            if input.retry_toggle {
                state.session.toggle_retry();
            }
            if input.confirm && state.session.confirm_retry() {
                state.respawn();
            }
        }
        Phase::Result => {
            if input.confirm && state.session.restart() {
                state.respawn();
            }
        }
    }

    let after = state.session.phase;
    if after != before {
        events.push(GameEvent::PhaseChanged {
            from: before,
            to: after,
        });
    }
    events
}

fn play_frame(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    if input.move_left {
        player.move_left(input.dash);
    } else if input.move_right {
        player.move_right(input.dash);
    } else {
        player.stop();
    }
    if input.jump {
        player.jump();
    }

    player.update(state.stage.blocks());

    let despawned = state.stage.update();
    events.extend(std::iter::repeat_n(GameEvent::EnemyDespawned, despawned));

    state
        .camera
        .follow(state.player.rect().x, state.screen.x, state.stage.width());

    let hits = interaction::resolve(
        &mut state.player,
        &mut state.stage,
        input.dash,
        state.screen.y,
    );
    events.extend(std::iter::repeat_n(GameEvent::EnemyStomped, hits.stomps as usize));
    if hits.damaged {
        events.push(GameEvent::PlayerDamaged);
    }

    if hits.fell_out {
        state.session.lose_life();
        events.push(GameEvent::LifeLost {
            lives_left: state.session.lives,
        });
    }

    if hits.reached_goal && state.session.phase == Phase::Playing {
        state.session.clear_game();
        events.push(GameEvent::StageCleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::enemy::EnemyState;
    use crate::sim::flow::{Outcome, RetryChoice};
    use crate::sim::player::MotionState;
    use crate::sim::stage::{Span, StageLayout};
    use glam::IVec2;

    /// Flat stage with one pit at [400, 600) and a single enemy past it
    fn pit_layout() -> StageLayout {
        StageLayout {
            width: 1600,
            height: SCREEN_HEIGHT,
            tile: 50,
            ground_y: 500,
            ground: vec![Span { start: 0, end: 400 }, Span { start: 600, end: 1600 }],
            obstacles: Vec::new(),
            enemies: vec![IVec2::new(900, 470)],
            goal: IVec2::new(1500, 420),
            start: IVec2::new(100, 400),
        }
    }

    fn playing(layout: StageLayout) -> GameState {
        let mut state = GameState::new(layout);
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        let events = tick(&mut state, &start);
        assert_eq!(
            events,
            vec![GameEvent::PhaseChanged {
                from: Phase::Start,
                to: Phase::Playing
            }]
        );
        state
    }

    fn run_until(
        state: &mut GameState,
        input: &TickInput,
        max_ticks: usize,
        done: impl Fn(&GameState) -> bool,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..max_ticks {
            events.extend(tick(state, input));
            if done(state) {
                return events;
            }
        }
        panic!("condition not reached in {max_ticks} ticks");
    }

    #[test]
    fn test_tick_start_to_playing() {
        let mut state = GameState::default();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.phase, Phase::Start);

        let state = playing(StageLayout::classic());
        assert_eq!(state.session.lives, 2);
    }

    #[test]
    fn test_walking_into_pit_costs_a_life() {
        let mut state = playing(pit_layout());
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };

        run_until(&mut state, &right, 200, |s| {
            s.player.rect().x >= 400 && s.player.state == MotionState::Falling
        });
        assert_eq!(state.session.phase, Phase::Playing);

        let events = run_until(&mut state, &right, 200, |s| s.session.phase != Phase::Playing);
        assert!(state.player.rect().y > SCREEN_HEIGHT);
        assert!(state.player.rect().right() <= 600);
        assert_eq!(state.session.phase, Phase::Retry);
        assert_eq!(state.session.lives, 1);
        assert!(events.contains(&GameEvent::LifeLost { lives_left: 1 }));
    }

    #[test]
    fn test_retry_yes_respawns_and_no_ends_session() {
        let mut state = playing(pit_layout());
        state.player.body.place(500, SCREEN_HEIGHT + 10);
        state.stage.enemies_mut()[0].mark_defeated();
        state.camera.offset_x = 300;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.phase, Phase::Retry);

        // Stage is frozen while the prompt is up
        let enemy = state.stage.enemies()[0].clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.stage.enemies()[0], enemy);

        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm);
        assert_eq!(state.session.phase, Phase::Playing);
        assert_eq!(state.player.rect().x, 100);
        assert_eq!(state.player.state, MotionState::Falling);
        assert_eq!(state.camera.offset_x, 0);
        assert_eq!(state.stage.enemies()[0].state, EnemyState::Active);

        // Second fall, then decline
        state.player.body.place(500, SCREEN_HEIGHT + 10);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.lives, 0);
        let toggle = TickInput {
            retry_toggle: true,
            ..Default::default()
        };
        tick(&mut state, &toggle);
        assert_eq!(state.session.retry_choice, RetryChoice::No);
        tick(&mut state, &confirm);
        assert_eq!(state.session.phase, Phase::Result);
        assert_eq!(state.session.lives, -1);
        assert_eq!(state.session.outcome, Some(Outcome::Declined));
        assert!(!state.session.cleared);
    }

    #[test]
    fn test_running_out_of_lives() {
        let mut state = playing(pit_layout());
        state.session.lives = 0;
        state.player.body.place(500, SCREEN_HEIGHT + 10);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.phase, Phase::Result);
        assert_eq!(state.session.outcome, Some(Outcome::OutOfLives));
        assert!(!state.session.cleared);
    }

    fn stomp_setup() -> GameState {
        let mut state = playing(pit_layout());
        // Falling onto the enemy at x=900 (it steps left to 898 this tick)
        state.player.body.place(900, 420);
        state.player.vel.y = 4.0;
        state.player.state = MotionState::Falling;
        state
    }

    #[test]
    fn test_dash_stomp_bounces_like_a_jump() {
        let mut state = stomp_setup();
        let dash = TickInput {
            dash: true,
            ..Default::default()
        };
        let events = tick(&mut state, &dash);
        assert_eq!(events, vec![GameEvent::EnemyStomped]);
        assert_eq!(state.stage.enemies()[0].state, EnemyState::Defeated);
        assert_eq!(state.player.vel.y, -PLAYER_JUMP_POWER);
    }

    #[test]
    fn test_plain_stomp_uses_small_bounce() {
        let mut state = stomp_setup();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.stage.enemies()[0].state, EnemyState::Defeated);
        assert_eq!(state.player.vel.y, -STOMP_BOUNCE);
    }

    #[test]
    fn test_stomped_enemy_despawns() {
        let mut state = stomp_setup();
        let events = run_until(&mut state, &TickInput::default(), 200, |s| {
            s.stage.enemies().is_empty()
        });
        assert!(events.contains(&GameEvent::EnemyDespawned));
        assert_eq!(state.session.phase, Phase::Playing);
    }

    #[test]
    fn test_walking_into_enemy_knocks_player_out() {
        let mut state = playing(pit_layout());
        state.player.body.place(820, 450);
        state.player.state = MotionState::Standing;
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };

        let events = run_until(&mut state, &right, 100, |s| s.player.is_damaged());
        assert!(events.contains(&GameEvent::PlayerDamaged));

        // Falls through the ground and off the screen
        run_until(&mut state, &right, 100, |s| s.session.phase == Phase::Retry);
        assert_eq!(state.session.lives, 1);
    }

    #[test]
    fn test_reaching_goal_clears_regardless_of_lives() {
        let mut state = playing(pit_layout());
        state.session.lives = 0;
        state.player.body.place(1480, 450);
        state.player.state = MotionState::Standing;

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::StageCleared));
        assert_eq!(state.session.phase, Phase::Result);
        assert!(state.session.cleared);
        assert_eq!(state.session.outcome, Some(Outcome::Cleared));
    }

    #[test]
    fn test_result_confirm_returns_to_start_with_fresh_world() {
        let mut state = playing(pit_layout());
        state.player.body.place(1480, 450);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.session.phase, Phase::Result);

        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm);
        assert_eq!(state.session.phase, Phase::Start);
        assert_eq!(state.player.rect().x, 100);
        assert_eq!(state.camera.offset_x, 0);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start);
        assert_eq!(state.session.phase, Phase::Playing);
        assert_eq!(state.session.lives, 2);
        assert!(!state.session.cleared);
    }

    #[test]
    fn test_camera_scrolls_with_player() {
        let mut state = playing(StageLayout::classic());
        state.player.body.place(1000, 450);
        state.player.state = MotionState::Standing;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.camera.offset_x, 600);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(StageLayout::classic());
        let mut state2 = playing(StageLayout::classic());

        let inputs = [
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                jump: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                dash: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.stage.enemies(), state2.stage.enemies());
        assert_eq!(state1.session, state2.session);
    }
}
