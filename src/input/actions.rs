//! Movement directions and their key bindings

use macroquad::prelude::KeyCode;

/// A one-cell move on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Map a key to a direction. Only the four arrow keys are bound.
    pub fn from_key(key: KeyCode) -> Option<Direction> {
        match key {
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Down => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_directions() {
        assert_eq!(Direction::from_key(KeyCode::Left), Some(Direction::Left));
        assert_eq!(Direction::from_key(KeyCode::Up), Some(Direction::Up));
        assert_eq!(Direction::from_key(KeyCode::Right), Some(Direction::Right));
        assert_eq!(Direction::from_key(KeyCode::Down), Some(Direction::Down));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        for key in [KeyCode::W, KeyCode::A, KeyCode::Space, KeyCode::Enter, KeyCode::Escape] {
            assert_eq!(Direction::from_key(key), None);
        }
    }
}
