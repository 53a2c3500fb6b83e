//! Collision Detection
//!
//! Bugs and the player are compared by their sprite draw origins, not by
//! pixel masks. A hit needs both axes inside a loose box sized to the sprite
//! art's transparent padding.

use super::enemy::Enemy;
use super::player::Player;

/// Horizontal reach of a hit, in screen units (exclusive)
pub const HIT_HALF_WIDTH: f32 = 33.0;

/// Vertical reach of a hit, in screen units (exclusive)
pub const HIT_HALF_HEIGHT: f32 = 15.0;

/// True if two reference points are close enough to count as a hit
pub fn points_overlap(a: (f32, f32), b: (f32, f32)) -> bool {
    (a.0 - b.0).abs() < HIT_HALF_WIDTH && (a.1 - b.1).abs() < HIT_HALF_HEIGHT
}

/// Slot index of the first enemy touching the player, if any
pub fn first_collision(player: &Player, enemies: &[Enemy]) -> Option<usize> {
    let player_point = player.screen_position();
    enemies
        .iter()
        .position(|enemy| points_overlap(player_point, enemy.screen_position()))
}

/// True if any enemy touches the player
pub fn check_collision(player: &Player, enemies: &[Enemy]) -> bool {
    first_collision(player, enemies).is_some()
}
