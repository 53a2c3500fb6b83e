//! Per-frame key polling

use macroquad::prelude::*;
use super::Direction;

/// Directions whose key was released since the last frame.
///
/// Released keys come from an unordered set, so the result is sorted into
/// `Direction::ALL` order to keep simultaneous releases deterministic.
pub fn released_directions() -> Vec<Direction> {
    let released = get_keys_released();
    directions_from_keys(released.iter().copied())
}

/// Map keys to directions, dropping unbound keys
pub fn directions_from_keys(keys: impl IntoIterator<Item = KeyCode>) -> Vec<Direction> {
    let mut out: Vec<Direction> = keys.into_iter().filter_map(Direction::from_key).collect();
    out.sort_by_key(|d| Direction::ALL.iter().position(|a| a == d));
    out.dedup();
    out
}
