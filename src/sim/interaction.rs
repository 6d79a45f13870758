//! Per-frame player interactions with enemies, pits and the goal

use super::enemy::Interaction;
use super::player::Player;
use super::stage::Stage;

/// What happened to the player this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interactions {
    /// Enemies defeated by stomping
    pub stomps: u32,
    /// Player was knocked out by a side contact
    pub damaged: bool,
    /// Player dropped below the screen
    pub fell_out: bool,
    /// Player box overlaps the goal
    pub reached_goal: bool,
}

/// Resolve enemy contacts, then report fall-out and goal overlap.
///
/// Enemies are checked in roster order against the player's current box and
/// velocity, so a stomp bounce changes how later enemies see the player.
pub fn resolve(
    player: &mut Player,
    stage: &mut Stage,
    dash: bool,
    screen_height: i32,
) -> Interactions {
    let mut result = Interactions::default();

    for enemy in stage.enemies_mut() {
        match enemy.interaction_with_player(&player.rect(), player.vel.y) {
            Interaction::StompedFromAbove => {
                enemy.mark_defeated();
                player.bounce(dash);
                result.stomps += 1;
                log::debug!("Enemy stomped at x={}", enemy.rect().x);
            }
            Interaction::SideContact => {
                if !player.is_damaged() {
                    player.take_damage();
                    result.damaged = true;
                    log::debug!("Player hit by enemy at x={}", enemy.rect().x);
                }
            }
            Interaction::None => {}
        }
    }

    let rect = player.rect();
    result.fell_out = rect.y > screen_height;
    result.reached_goal = rect.intersects(&stage.goal());
    result
}
