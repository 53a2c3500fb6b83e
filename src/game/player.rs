//! Player
//!
//! The player hops one grid cell per key release. Columns clamp to the board.
//! Rows clamp at the bottom; moving up from the top stone lane wraps back to
//! the starting row instead of entering the water.

use crate::input::Direction;
use super::board::{TILE_HEIGHT, TILE_WIDTH};

/// Starting column
pub const START_COL: i32 = 3;

/// Starting row
pub const START_ROW: i32 = 4;

/// Rightmost column
pub const MAX_COL: i32 = 4;

/// Topmost row the player can stand on
pub const MIN_ROW: i32 = 1;

/// Bottom row
pub const MAX_ROW: i32 = 5;

/// Upward shift applied to the character sprite so it stands on its tile
pub const SPRITE_Y_ADJUST: f32 = 30.0;

/// The player character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub col: i32,
    pub row: i32,
    /// Sprite path, relative to the asset root
    pub sprite: String,
}

impl Player {
    /// Create a player on the starting cell
    pub fn new(sprite: impl Into<String>) -> Self {
        Self {
            col: START_COL,
            row: START_ROW,
            sprite: sprite.into(),
        }
    }

    /// Move one cell in `direction`
    pub fn handle_input(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.col > 0 {
                    self.col -= 1;
                }
            }
            Direction::Right => {
                if self.col < MAX_COL {
                    self.col += 1;
                }
            }
            Direction::Down => {
                if self.row < MAX_ROW {
                    self.row += 1;
                }
            }
            Direction::Up => {
                if self.row > MIN_ROW {
                    self.row -= 1;
                } else {
                    self.row = START_ROW;
                }
            }
        }
    }

    /// Put the player back on the starting cell
    pub fn reset(&mut self) {
        self.col = START_COL;
        self.row = START_ROW;
    }

    /// Grid cell as (column, row)
    pub fn cell(&self) -> (i32, i32) {
        (self.col, self.row)
    }

    /// Screen-space draw origin; also the collision reference point
    pub fn screen_position(&self) -> (f32, f32) {
        (
            self.col as f32 * TILE_WIDTH,
            self.row as f32 * TILE_HEIGHT - SPRITE_Y_ADJUST,
        )
    }
}
