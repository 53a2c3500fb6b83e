//! Bug Crossing: a tiny arcade game
//!
//! Walk the player from the grass to the water with the arrow keys while
//! bugs run across the three stone lanes. A bug touching the player sends it
//! back to the start.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;
mod resources;

use macroquad::prelude::*;

use config::GameConfig;
use game::board::{CANVAS_HEIGHT, CANVAS_WIDTH};
use game::runtime::{FrameOutcome, LoadDeadline};
use game::{GameState, ScreenSurface};
use resources::texture::decode_texture;
use resources::{FileFetcher, ResourceCache};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Bug Crossing v{}", VERSION),
        window_width: CANVAS_WIDTH,
        window_height: CANVAS_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = GameConfig::resolve_path();
    let config = match GameConfig::load_or_default(&config_path) {
        Ok((config, true)) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        Ok((config, false)) => {
            log::info!("No config at {}, using defaults", config_path.display());
            config
        }
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    let mut images: ResourceCache<Texture2D> = ResourceCache::new(FileFetcher::new(&config.asset_root));
    images.load(config.required_sprites());
    log::info!(
        "Loading {} images from {}",
        images.progress().1,
        config.asset_root.display()
    );

    log::info!("FPS limit: {}", config.fps_limit.label());

    let mut game = GameState::new(&config);
    log::info!("{} bugs on the board", game.enemies.len());
    let mut surface = ScreenSurface;
    let deadline = LoadDeadline::new(get_time(), config.load_timeout_secs);

    loop {
        let frame_start = get_time();

        // Key releases apply in every phase
        for direction in input::released_directions() {
            log::trace!("Key released: {}", direction.label());
            game.handle_input(direction);
        }

        clear_background(BLACK);

        match game.frame(frame_start, &mut images, decode_texture, &deadline, &mut surface) {
            FrameOutcome::Ticked { .. } => {}
            FrameOutcome::Loading { completed, requested } => {
                draw_text(
                    &format!("Loading {}/{} images", completed, requested),
                    20.0,
                    CANVAS_HEIGHT as f32 / 2.0,
                    30.0,
                    WHITE,
                );
            }
            FrameOutcome::GaveUp { pending, failed } => {
                log::error!(
                    "Gave up waiting for images; still loading: [{}]",
                    pending.join(", ")
                );
                for (url, e) in failed {
                    log::error!("  {}: {}", url, e);
                }
                return;
            }
        }

        for hit in game.events.collision.drain() {
            log::debug!(
                "Bug in slot {} hit the player at {:?}",
                hit.enemy.index(),
                hit.cell
            );
        }
        for recycled in game.events.recycle.drain() {
            log::debug!(
                "Bug in slot {} recycled into lane {} (pass {})",
                recycled.enemy.index(),
                recycled.lane,
                recycled.pass
            );
        }

        // FPS limiting
        if let Some(target_frame_time) = config.fps_limit.frame_time() {
            let elapsed = get_time() - frame_start;
            let remaining = target_frame_time - elapsed;

            if remaining > 0.0 {
                // Sleep for bulk, then spin-wait for precision
                let spin_margin = 0.002; // 2ms
                while get_time() - frame_start + spin_margin < target_frame_time {
                    std::thread::sleep(std::time::Duration::from_millis(1));
                }
                while get_time() - frame_start < target_frame_time {
                    std::hint::spin_loop();
                }
            }
        }

        next_frame().await;
    }
}
