//! Game Runtime
//!
//! `GameState` owns everything that changes while playing: the bug pool,
//! the player, the RNG and the per-tick event queues. The host loop drives it
//! one tick per frame.
//!
//! The runtime has two phases. It starts `Uninitialized` and switches to
//! `Running` once, when the host reports every image loaded. Ticks before
//! that do nothing.
//!
//! [`GameState::frame`] is the whole per-frame step the host runs against
//! the image cache: drain finished loads, start on the ready signal, give up
//! past the load deadline, then tick.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::input::Direction;
use crate::resources::{ResourceCache, ResourceError};
use super::board::Board;
use super::collision::first_collision;
use super::enemy::SpeedRange;
use super::event::{CollisionEvent, Events};
use super::player::Player;
use super::pool::{EnemyPool, SlotId};
use super::renderer::{render, Images, Surface};

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    /// 60 FPS (smooth gameplay)
    #[default]
    Fps60,
    /// As fast as the display allows
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }
}

/// Loop phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Waiting for images
    Uninitialized,
    /// Ticking; `last_tick_ms` is the timestamp of the previous tick
    Running { last_tick_ms: f64 },
}

/// How long the host waits for the initial image load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadDeadline {
    /// When loading began, in seconds
    pub started_secs: f64,
    /// `None` waits forever
    pub timeout_secs: Option<f32>,
}

impl LoadDeadline {
    pub fn new(started_secs: f64, timeout_secs: Option<f32>) -> Self {
        Self { started_secs, timeout_secs }
    }

    pub fn expired(&self, now_secs: f64) -> bool {
        match self.timeout_secs {
            Some(timeout) => now_secs - self.started_secs > timeout as f64,
            None => false,
        }
    }
}

/// What one host frame did
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Still waiting for images; nothing was drawn
    Loading { completed: usize, requested: usize },
    /// The game ticked with this `dt`
    Ticked { dt: f32 },
    /// The load deadline passed before every image loaded
    GaveUp {
        pending: Vec<String>,
        failed: Vec<(String, ResourceError)>,
    },
}

/// All mutable game state
pub struct GameState {
    pub board: Board,
    pub enemies: EnemyPool,
    pub player: Player,
    pub events: Events,
    rng: StdRng,
    phase: Phase,
}

impl GameState {
    /// Build the game from config, seeding the RNG from `config.seed` when set
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(
            rng,
            config.enemy_count,
            &config.enemy_speed,
            Player::new(config.player_sprite.clone()),
        )
    }

    pub fn with_rng(mut rng: StdRng, enemy_count: usize, speeds: &SpeedRange, player: Player) -> Self {
        let enemies = EnemyPool::new(enemy_count, &mut rng, speeds);
        Self {
            board: Board::standard(),
            enemies,
            player,
            events: Events::new(),
            rng,
            phase: Phase::Uninitialized,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Switch to `Running` with `now_ms` as the first baseline.
    /// Returns false (and changes nothing) if already running.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = Phase::Running { last_tick_ms: now_ms };
        true
    }

    /// Apply one key release to the player
    pub fn handle_input(&mut self, direction: Direction) {
        self.player.handle_input(direction);
    }

    /// Update phase: move every bug, then check for a hit.
    ///
    /// A hit sends the player back to the start. Bugs keep moving, so a bug
    /// crossing the start cell can hit the player again next tick.
    pub fn update(&mut self, dt: f32) {
        self.enemies.update_all(dt, &mut self.rng, &mut self.events.recycle);

        if let Some(slot) = first_collision(&self.player, self.enemies.as_slice()) {
            self.events.collision.send(CollisionEvent {
                enemy: SlotId::new(slot as u32),
                cell: self.player.cell(),
            });
            self.player.reset();
        }
    }

    /// Run one tick: update with the elapsed time since the last tick, then
    /// render. Returns the `dt` used, or `None` if not running yet.
    pub fn tick<S: Surface>(
        &mut self,
        now_ms: f64,
        images: &impl Images<S::Image>,
        surface: &mut S,
    ) -> Option<f32> {
        let Phase::Running { last_tick_ms } = self.phase else {
            return None;
        };

        let dt = ((now_ms - last_tick_ms) / 1000.0) as f32;
        self.update(dt);
        render(self, images, surface);
        self.phase = Phase::Running { last_tick_ms: now_ms };
        Some(dt)
    }

    /// Run one host frame against the image cache.
    ///
    /// The frame that sees the ready signal starts the game and ticks with
    /// `dt = 0`. Once running, the deadline no longer applies.
    pub fn frame<S, F>(
        &mut self,
        now_secs: f64,
        images: &mut ResourceCache<S::Image>,
        decode: F,
        deadline: &LoadDeadline,
        surface: &mut S,
    ) -> FrameOutcome
    where
        S: Surface,
        F: FnMut(&str, &[u8]) -> Result<S::Image, ResourceError>,
    {
        for (url, e) in images.poll(decode) {
            log::error!("Failed to load {}: {}", url, e);
        }

        let now_ms = now_secs * 1000.0;
        if images.take_ready() && self.start(now_ms) {
            log::info!("All images loaded, starting game");
        }

        if !self.is_running() && deadline.expired(now_secs) {
            return FrameOutcome::GaveUp {
                pending: images.pending().into_iter().map(String::from).collect(),
                failed: images
                    .failures()
                    .into_iter()
                    .map(|(url, e)| (url.to_string(), e.clone()))
                    .collect(),
            };
        }

        match self.tick(now_ms, &*images, surface) {
            Some(dt) => FrameOutcome::Ticked { dt },
            None => {
                let (completed, requested) = images.progress();
                FrameOutcome::Loading { completed, requested }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::sprites;
    use crate::game::enemy::Enemy;
    use crate::game::renderer::tests::{RecordingSurface, SpriteSet};
    use crate::resources::tests::MemoryFetcher;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn game_with(enemies: Vec<Enemy>) -> GameState {
        let mut game = GameState::with_rng(
            StdRng::seed_from_u64(11),
            0,
            &SpeedRange::default(),
            Player::new(sprites::CHAR_HORN_GIRL),
        );
        game.enemies = EnemyPool::from_enemies(enemies);
        game
    }

    #[test]
    fn test_new_from_config() {
        let mut config = GameConfig::default();
        config.seed = Some(5);
        config.enemy_count = 4;
        let game = GameState::new(&config);
        assert_eq!(game.enemies.len(), 4);
        assert_eq!(game.player.cell(), (3, 4));
        assert_eq!(game.player.sprite, sprites::CHAR_HORN_GIRL);
        assert_eq!(game.phase(), Phase::Uninitialized);
    }

    #[test]
    fn test_same_seed_same_enemies() {
        let mut config = GameConfig::default();
        config.seed = Some(99);
        let a = GameState::new(&config);
        let b = GameState::new(&config);
        assert_eq!(a.enemies.as_slice(), b.enemies.as_slice());
    }

    #[test]
    fn test_tick_before_start_does_nothing() {
        let mut game = game_with(vec![Enemy::at(0, 0.0, 200.0)]);
        let mut surface = RecordingSurface::default();
        assert_eq!(game.tick(1000.0, &SpriteSet::all(), &mut surface), None);
        assert_eq!(game.enemies.as_slice()[0].x, 0.0);
        assert!(surface.draws.is_empty());
    }

    #[test]
    fn test_start_only_once() {
        let mut game = game_with(Vec::new());
        assert!(game.start(500.0));
        assert!(!game.start(900.0));
        assert_eq!(game.phase(), Phase::Running { last_tick_ms: 500.0 });
    }

    #[test]
    fn test_first_tick_after_start_has_zero_dt() {
        let mut game = game_with(vec![Enemy::at(0, 1.0, 300.0)]);
        let mut surface = RecordingSurface::default();
        game.start(2500.0);
        assert_eq!(game.tick(2500.0, &SpriteSet::all(), &mut surface), Some(0.0));
        assert_eq!(game.enemies.as_slice()[0].x, 1.0);
    }

    #[test]
    fn test_tick_uses_elapsed_seconds() {
        let mut game = game_with(vec![Enemy::at(1, 0.0, 101.0)]);
        let mut surface = RecordingSurface::default();
        game.start(0.0);

        assert_eq!(game.tick(500.0, &SpriteSet::all(), &mut surface), Some(0.5));
        assert!((game.enemies.as_slice()[0].x - 0.5).abs() < 1e-6);

        assert_eq!(game.tick(1500.0, &SpriteSet::all(), &mut surface), Some(1.0));
        assert!((game.enemies.as_slice()[0].x - 1.5).abs() < 1e-6);
        assert_eq!(game.phase(), Phase::Running { last_tick_ms: 1500.0 });
    }

    #[test]
    fn test_tick_renders_every_frame() {
        let mut game = game_with(vec![Enemy::at(1, 0.0, 101.0)]);
        let mut surface = RecordingSurface::default();
        game.start(0.0);
        game.tick(16.0, &SpriteSet::all(), &mut surface);
        // 30 tiles, 1 bug, 1 player
        assert_eq!(surface.draws.len(), 32);
    }

    #[test]
    fn test_collision_resets_player_to_start() {
        // Player at (2, 3) is at (202, 219); a lane 2 bug at column 2 is at (202, 230)
        let mut game = game_with(vec![Enemy::at(2, 2.0, 250.0)]);
        game.player.col = 2;
        game.player.row = 3;

        game.update(0.0);

        assert_eq!(game.player.cell(), (3, 4));
        let hits: Vec<_> = game.events.collision.drain().collect();
        assert_eq!(hits, vec![CollisionEvent { enemy: SlotId::new(0), cell: (2, 3) }]);
        // The bug is untouched
        assert_eq!(game.enemies.as_slice()[0], Enemy::at(2, 2.0, 250.0));
    }

    #[test]
    fn test_no_collision_leaves_player() {
        let mut game = game_with(vec![Enemy::at(0, 4.0, 250.0)]);
        game.player.col = 0;
        game.player.row = 3;
        game.update(0.0);
        assert_eq!(game.player.cell(), (0, 3));
        assert_eq!(game.events.collision.drain().count(), 0);
    }

    #[test]
    fn test_bug_moving_onto_player_hits_in_same_tick() {
        // Enemies update before the collision check
        let mut game = game_with(vec![Enemy::at(0, 0.0, 101.0)]);
        game.player.col = 1;
        game.player.row = 1;
        game.update(1.0);
        assert_eq!(game.player.cell(), (3, 4));
    }

    #[test]
    fn test_recycle_events_reported() {
        let mut game = game_with(vec![Enemy::at(0, 4.9, 101.0)]);
        game.update(1.0);
        let recycled: Vec<_> = game.events.recycle.drain().collect();
        assert_eq!(recycled.len(), 1);
        assert_eq!(recycled[0].pass, 1);
    }

    #[test]
    fn test_handle_input_moves_player() {
        let mut game = game_with(Vec::new());
        game.handle_input(Direction::Left);
        game.handle_input(Direction::Up);
        assert_eq!(game.player.cell(), (2, 3));
    }

    #[test]
    fn test_fps_limit_frame_time() {
        assert_eq!(FpsLimit::Fps30.frame_time(), Some(1.0 / 30.0));
        assert_eq!(FpsLimit::default(), FpsLimit::Fps60);
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
    }

    fn decode_url(url: &str, _bytes: &[u8]) -> Result<String, ResourceError> {
        Ok(url.to_string())
    }

    /// Fetcher serving every required sprite except `missing`
    fn fetcher_without(missing: &[&str]) -> Arc<MemoryFetcher> {
        let bytes: &[u8] = b"png";
        let urls = GameConfig::default().required_sprites();
        let files: Vec<(&str, &[u8])> = urls
            .iter()
            .map(String::as_str)
            .filter(|url| !missing.contains(url))
            .map(|url| (url, bytes))
            .collect();
        MemoryFetcher::with(&files)
    }

    fn cache_for(fetcher: &Arc<MemoryFetcher>) -> ResourceCache<String> {
        let mut cache = ResourceCache::with_fetcher(fetcher.clone());
        cache.load(GameConfig::default().required_sprites());
        cache
    }

    /// Repeat frames at a fixed time until one is not `Loading`
    fn frames_until_settled(
        game: &mut GameState,
        cache: &mut ResourceCache<String>,
        surface: &mut RecordingSurface,
        now_secs: f64,
        deadline: &LoadDeadline,
    ) -> FrameOutcome {
        let wall = Instant::now() + Duration::from_secs(5);
        loop {
            let outcome = game.frame(now_secs, cache, decode_url, deadline, surface);
            if !matches!(outcome, FrameOutcome::Loading { .. }) || Instant::now() > wall {
                return outcome;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_load_deadline() {
        let deadline = LoadDeadline::new(10.0, Some(2.0));
        assert!(!deadline.expired(12.0));
        assert!(deadline.expired(12.5));
        assert!(!LoadDeadline::new(0.0, None).expired(1.0e9));
    }

    #[test]
    fn test_frame_starts_once_when_images_arrive() {
        let fetcher = fetcher_without(&[]);
        fetcher.hold();
        let mut cache = cache_for(&fetcher);
        let mut game = game_with(vec![Enemy::at(1, 0.0, 101.0)]);
        let mut surface = RecordingSurface::default();
        let wait_forever = LoadDeadline::new(0.0, None);

        let outcome = game.frame(1.0, &mut cache, decode_url, &wait_forever, &mut surface);
        assert_eq!(outcome, FrameOutcome::Loading { completed: 0, requested: 6 });
        assert!(!game.is_running());
        assert!(surface.draws.is_empty());

        fetcher.release();
        let outcome = frames_until_settled(&mut game, &mut cache, &mut surface, 2.0, &wait_forever);
        assert_eq!(outcome, FrameOutcome::Ticked { dt: 0.0 });
        assert_eq!(game.phase(), Phase::Running { last_tick_ms: 2000.0 });
        // 30 tiles, 1 bug, 1 player
        assert_eq!(surface.draws.len(), 32);

        // The next frame measures from the previous one; nothing restarts
        let outcome = game.frame(3.0, &mut cache, decode_url, &wait_forever, &mut surface);
        assert_eq!(outcome, FrameOutcome::Ticked { dt: 1.0 });
        assert!((game.enemies.as_slice()[0].x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_gives_up_on_pending_images_past_deadline() {
        let fetcher = fetcher_without(&[]);
        fetcher.hold();
        let mut cache = cache_for(&fetcher);
        let mut game = game_with(Vec::new());
        let mut surface = RecordingSurface::default();
        let deadline = LoadDeadline::new(0.0, Some(2.0));

        let outcome = game.frame(1.0, &mut cache, decode_url, &deadline, &mut surface);
        assert!(matches!(outcome, FrameOutcome::Loading { .. }));

        let outcome = game.frame(3.0, &mut cache, decode_url, &deadline, &mut surface);
        let mut expected = GameConfig::default().required_sprites();
        expected.sort();
        assert_eq!(outcome, FrameOutcome::GaveUp { pending: expected, failed: Vec::new() });
        assert!(!game.is_running());
        assert!(surface.draws.is_empty());

        fetcher.release();
    }

    #[test]
    fn test_frame_reports_failed_image_when_giving_up() {
        let fetcher = fetcher_without(&[sprites::ENEMY_BUG]);
        let mut cache = cache_for(&fetcher);
        let mut game = game_with(Vec::new());
        let mut surface = RecordingSurface::default();
        let deadline = LoadDeadline::new(0.0, Some(5.0));

        // Let every fetch finish; the missing one keeps the game loading
        let wall = Instant::now() + Duration::from_secs(5);
        while !cache.pending().is_empty() && Instant::now() < wall {
            let outcome = game.frame(1.0, &mut cache, decode_url, &deadline, &mut surface);
            assert!(matches!(outcome, FrameOutcome::Loading { .. }));
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(
            game.frame(1.0, &mut cache, decode_url, &deadline, &mut surface),
            FrameOutcome::Loading { completed: 6, requested: 6 }
        );

        let outcome = game.frame(6.0, &mut cache, decode_url, &deadline, &mut surface);
        assert_eq!(
            outcome,
            FrameOutcome::GaveUp {
                pending: Vec::new(),
                failed: vec![(
                    sprites::ENEMY_BUG.to_string(),
                    ResourceError::NotFound(sprites::ENEMY_BUG.to_string())
                )],
            }
        );
    }

    #[test]
    fn test_deadline_ignored_once_running() {
        let fetcher = fetcher_without(&[]);
        let mut cache = cache_for(&fetcher);
        let mut game = game_with(Vec::new());
        let mut surface = RecordingSurface::default();
        let deadline = LoadDeadline::new(0.0, Some(1.0));

        let outcome = frames_until_settled(&mut game, &mut cache, &mut surface, 0.5, &deadline);
        assert_eq!(outcome, FrameOutcome::Ticked { dt: 0.0 });

        let outcome = game.frame(10.5, &mut cache, decode_url, &deadline, &mut surface);
        assert_eq!(outcome, FrameOutcome::Ticked { dt: 10.0 });
    }
}
