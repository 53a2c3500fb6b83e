//! Keyboard input
//!
//! Arrow key releases become one-cell moves. Every other key is ignored.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
