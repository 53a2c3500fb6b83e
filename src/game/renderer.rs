//! Game Renderer
//!
//! Draws one frame: every board tile, then every bug, then the player.
//! Drawing goes through the [`Surface`] trait; the macroquad implementation
//! draws textures to the window. Images that have not finished loading are
//! skipped for that frame.

use macroquad::prelude::{draw_texture, Texture2D, WHITE};

use crate::resources::ResourceCache;
use super::board::Board;
use super::runtime::GameState;

/// Something images can be drawn onto
pub trait Surface {
    type Image;

    /// Draw `image` with its top-left corner at (x, y)
    fn draw_image(&mut self, image: &Self::Image, x: f32, y: f32);
}

/// Image lookup by URL
pub trait Images<H> {
    /// The image for `url`, or `None` if it is not ready
    fn image(&self, url: &str) -> Option<&H>;
}

impl<H> Images<H> for ResourceCache<H> {
    fn image(&self, url: &str) -> Option<&H> {
        self.get(url)
    }
}

/// The macroquad window
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenSurface;

impl Surface for ScreenSurface {
    type Image = Texture2D;

    fn draw_image(&mut self, image: &Texture2D, x: f32, y: f32) {
        draw_texture(image, x, y, WHITE);
    }
}

/// Draw `url` at (x, y) if it is loaded. Returns whether anything was drawn.
fn draw_sprite<S: Surface>(
    images: &impl Images<S::Image>,
    surface: &mut S,
    url: &str,
    (x, y): (f32, f32),
) -> bool {
    match images.image(url) {
        Some(image) => {
            surface.draw_image(image, x, y);
            true
        }
        None => false,
    }
}

/// Draw the board tiles, row by row
pub fn render_board<S: Surface>(board: &Board, images: &impl Images<S::Image>, surface: &mut S) {
    for (row, col, tile) in board.cells() {
        draw_sprite(images, surface, tile.sprite(), Board::cell_origin(row, col));
    }
}

/// Draw bugs in slot order, then the player on top
pub fn render_entities<S: Surface>(game: &GameState, images: &impl Images<S::Image>, surface: &mut S) {
    for (_, enemy) in game.enemies.iter() {
        draw_sprite(images, surface, super::board::sprites::ENEMY_BUG, enemy.screen_position());
    }
    draw_sprite(images, surface, &game.player.sprite, game.player.screen_position());
}

/// Draw a whole frame
pub fn render<S: Surface>(game: &GameState, images: &impl Images<S::Image>, surface: &mut S) {
    render_board(&game.board, images, surface);
    render_entities(game, images, surface);
}
