//! Board Layout
//!
//! The playfield is a fixed 5x6 grid of 101x83 tiles: one water row at the
//! top, three stone rows the bugs run along, and two grass rows where the
//! player starts. Tile art is taller than a grid cell (the sprites overlap
//! vertically), so only the cell origin matters for placement.

/// Width of one grid cell in screen units
pub const TILE_WIDTH: f32 = 101.0;

/// Height of one grid cell in screen units
pub const TILE_HEIGHT: f32 = 83.0;

/// Number of tile rows
pub const NUM_ROWS: usize = 6;

/// Number of tile columns
pub const NUM_COLS: usize = 5;

/// Window width that exactly fits the grid
pub const CANVAS_WIDTH: i32 = 505;

/// Window height (grid rows plus room for the tall bottom tiles)
pub const CANVAS_HEIGHT: i32 = 606;

/// Sprite paths, relative to the asset root
pub mod sprites {
    pub const WATER: &str = "images/water-block.png";
    pub const STONE: &str = "images/stone-block.png";
    pub const GRASS: &str = "images/grass-block.png";
    pub const ENEMY_BUG: &str = "images/enemy-bug.png";
    pub const CHAR_BOY: &str = "images/char-boy.png";
    pub const CHAR_HORN_GIRL: &str = "images/char-horn-girl.png";

    /// Every playable character sprite
    pub const CHARACTERS: [&str; 2] = [CHAR_BOY, CHAR_HORN_GIRL];
}

/// Ground type of a board row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Water,
    Stone,
    Grass,
}

impl Tile {
    /// Sprite path used to draw this tile
    pub fn sprite(&self) -> &'static str {
        match self {
            Tile::Water => sprites::WATER,
            Tile::Stone => sprites::STONE,
            Tile::Grass => sprites::GRASS,
        }
    }
}

/// Static board description. Only the renderer reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Tile; NUM_ROWS],
}

impl Board {
    /// The standard crossing: water, three stone lanes, two grass rows
    pub fn standard() -> Self {
        Self {
            rows: [
                Tile::Water,
                Tile::Stone,
                Tile::Stone,
                Tile::Stone,
                Tile::Grass,
                Tile::Grass,
            ],
        }
    }

    /// Tile type of a row, `None` past the bottom edge
    #[cfg(test)]
    pub fn row_tile(&self, row: usize) -> Option<Tile> {
        self.rows.get(row).copied()
    }

    /// Screen-space top-left corner of a grid cell
    pub fn cell_origin(row: usize, col: usize) -> (f32, f32) {
        (col as f32 * TILE_WIDTH, row as f32 * TILE_HEIGHT)
    }

    /// Iterate every cell in draw order (row-major, top to bottom)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, &tile)| (0..NUM_COLS).map(move |col| (row, col, tile)))
    }

    /// Distinct sprite paths the board needs, in first-use order
    pub fn sprites(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for tile in &self.rows {
            let sprite = tile.sprite();
            if !out.contains(&sprite) {
                out.push(sprite);
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_fits_grid_width() {
        assert_eq!(CANVAS_WIDTH as f32, NUM_COLS as f32 * TILE_WIDTH);
    }

    #[test]
    fn test_standard_row_mapping() {
        let board = Board::standard();
        assert_eq!(board.row_tile(0), Some(Tile::Water));
        for row in 1..=3 {
            assert_eq!(board.row_tile(row), Some(Tile::Stone));
        }
        assert_eq!(board.row_tile(4), Some(Tile::Grass));
        assert_eq!(board.row_tile(5), Some(Tile::Grass));
        assert_eq!(board.row_tile(6), None);
    }

    #[test]
    fn test_cells_cover_whole_grid_in_row_major_order() {
        let board = Board::standard();
        let cells: Vec<_> = board.cells().collect();
        assert_eq!(cells.len(), NUM_ROWS * NUM_COLS);
        assert_eq!(cells[0], (0, 0, Tile::Water));
        assert_eq!(cells[NUM_COLS], (1, 0, Tile::Stone));
        assert_eq!(cells.last(), Some(&(5, 4, Tile::Grass)));
    }

    #[test]
    fn test_cell_origin() {
        assert_eq!(Board::cell_origin(0, 0), (0.0, 0.0));
        assert_eq!(Board::cell_origin(2, 3), (303.0, 166.0));
    }

    #[test]
    fn test_sprites_are_deduplicated() {
        let board = Board::standard();
        assert_eq!(board.sprites(), vec![sprites::WATER, sprites::STONE, sprites::GRASS]);
    }
}
