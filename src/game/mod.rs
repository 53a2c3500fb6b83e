//! Game Module
//!
//! A small arcade game: cross a 6x5 tile board from the grass to the water
//! while bugs run across the stone lanes.
//!
//! Key concepts:
//! - Board: fixed tile layout and grid to pixel mapping
//! - EnemyPool: fixed set of bugs, recycled in place when they leave the screen
//! - Player: grid-stepping character with clamped movement
//! - Events: collisions and recycles, drained by the host once per frame
//! - GameState: one tick = update every bug, check the player, render

pub mod board;
pub mod enemy;
pub mod player;
pub mod pool;
pub mod event;
pub mod collision;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use runtime::GameState;
pub use renderer::ScreenSurface;
