//! Enemy Bugs
//!
//! Bugs crawl left to right along one of the stone lanes. When a bug walks
//! off the right edge it is recycled in place: moved back behind the left
//! edge and given a fresh lane. Speed is drawn once when the bug is created.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::{TILE_HEIGHT, TILE_WIDTH};

/// Lanes a bug may occupy (lane 0 lines up with board row 1)
pub const ENEMY_LANES: [i32; 3] = [0, 1, 2];

/// Horizontal position bugs start from, one column left of the board
pub const OFFSCREEN_X: f32 = -1.0;

/// Bugs at or past this column are recycled
pub const RIGHT_BOUNDARY: f32 = 5.0;

/// Vertical offset from lane top to the bug sprite's draw origin
pub const LANE_Y_OFFSET: f32 = 64.0;

/// Half-open range `[min, max)` of bug speeds in screen units per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw a speed uniformly from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min..self.max)
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::new(100.0, 500.0)
    }
}

/// Draw a lane uniformly from [`ENEMY_LANES`]
pub fn random_lane<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    ENEMY_LANES[rng.gen_range(0..ENEMY_LANES.len())]
}

/// A single bug
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    /// Lane index, one of [`ENEMY_LANES`]
    pub lane: i32,
    /// Horizontal position in columns (continuous)
    pub x: f32,
    /// Speed in screen units per second
    pub speed: f32,
}

impl Enemy {
    /// Create a bug with a random speed and lane, parked off screen
    pub fn create<R: Rng + ?Sized>(rng: &mut R, speeds: &SpeedRange) -> Self {
        Self {
            lane: random_lane(rng),
            x: OFFSCREEN_X,
            speed: speeds.sample(rng),
        }
    }

    /// Create a bug at an exact spot
    #[cfg(test)]
    pub fn at(lane: i32, x: f32, speed: f32) -> Self {
        Self { lane, x, speed }
    }

    /// Advance by `dt` seconds. Returns true if the bug was recycled.
    ///
    /// `dt` must be non-negative.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        debug_assert!(dt >= 0.0, "negative frame delta: {}", dt);
        self.x += self.speed * dt / TILE_WIDTH;
        if self.x >= RIGHT_BOUNDARY {
            self.recycle(rng);
            return true;
        }
        false
    }

    /// Send the bug back behind the left edge on a fresh lane
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.x = OFFSCREEN_X;
        self.lane = random_lane(rng);
    }

    /// Screen-space draw origin; also the collision reference point
    pub fn screen_position(&self) -> (f32, f32) {
        (
            self.x * TILE_WIDTH,
            self.lane as f32 * TILE_HEIGHT + LANE_Y_OFFSET,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_create_draws_from_ranges() {
        let mut rng = rng();
        let speeds = SpeedRange::default();
        for _ in 0..200 {
            let enemy = Enemy::create(&mut rng, &speeds);
            assert!(ENEMY_LANES.contains(&enemy.lane));
            assert!(enemy.speed >= 100.0 && enemy.speed < 500.0);
            assert_eq!(enemy.x, OFFSCREEN_X);
        }
    }

    #[test]
    fn test_update_moves_by_speed_over_tile_width() {
        let mut rng = rng();
        let mut enemy = Enemy::at(1, 0.0, 202.0);
        assert!(!enemy.update(0.5, &mut rng));
        assert!((enemy.x - 1.0).abs() < 1e-6);
        assert_eq!(enemy.lane, 1);
    }

    #[test]
    fn test_zero_dt_is_stationary() {
        let mut rng = rng();
        let mut enemy = Enemy::at(2, 1.25, 300.0);
        assert!(!enemy.update(0.0, &mut rng));
        assert_eq!(enemy.x, 1.25);
    }

    #[test]
    fn test_update_is_monotonic_until_recycle() {
        let mut rng = rng();
        let mut enemy = Enemy::at(0, OFFSCREEN_X, 150.0);
        let mut last = enemy.x;
        let mut recycles = 0;
        for _ in 0..400 {
            let recycled = enemy.update(1.0 / 60.0, &mut rng);
            if recycled {
                recycles += 1;
                assert_eq!(enemy.x, OFFSCREEN_X);
                break;
            }
            assert!(enemy.x > last);
            last = enemy.x;
        }
        assert_eq!(recycles, 1);
    }

    #[test]
    fn test_reaching_boundary_exactly_recycles() {
        let mut rng = rng();
        let mut enemy = Enemy::at(0, 4.0, TILE_WIDTH);
        assert!(enemy.update(1.0, &mut rng));
        assert_eq!(enemy.x, OFFSCREEN_X);
        assert!(ENEMY_LANES.contains(&enemy.lane));
    }

    #[test]
    fn test_recycle_keeps_speed() {
        let mut rng = rng();
        let mut enemy = Enemy::at(2, 4.9, 400.0);
        assert!(enemy.update(1.0, &mut rng));
        assert_eq!(enemy.speed, 400.0);
    }

    #[test]
    fn test_recycling_covers_all_lanes() {
        let mut rng = rng();
        let mut enemy = Enemy::at(0, 0.0, 100.0);
        let mut seen = [false; 3];
        for _ in 0..300 {
            enemy.recycle(&mut rng);
            seen[enemy.lane as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_screen_position() {
        let enemy = Enemy::at(2, 3.0, 100.0);
        assert_eq!(enemy.screen_position(), (303.0, 230.0));
    }
}
