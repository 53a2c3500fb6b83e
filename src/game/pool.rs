//! Enemy Pool
//!
//! A fixed-capacity arena of enemy slots. The pool is filled once when the
//! game is created and never grows or shrinks: a bug that leaves the board is
//! recycled in its slot rather than freed and reallocated.
//!
//! Each slot keeps a pass counter that increments on every recycle, so a
//! `SlotId` plus a pass number names one specific trip across the board.

use rand::Rng;

use super::enemy::{Enemy, SpeedRange};
use super::event::{EventQueue, RecycleEvent};

/// Index of a slot in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u32);

impl SlotId {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position in the pool (for slice access)
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Fixed set of enemies, recycled in place
#[derive(Debug, Clone)]
pub struct EnemyPool {
    slots: Box<[Enemy]>,
    /// Recycle count per slot
    passes: Box<[u32]>,
}

impl EnemyPool {
    /// Fill `count` slots with freshly created enemies
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R, speeds: &SpeedRange) -> Self {
        let slots: Box<[Enemy]> = (0..count).map(|_| Enemy::create(rng, speeds)).collect();
        Self {
            passes: vec![0; slots.len()].into_boxed_slice(),
            slots,
        }
    }

    /// Build a pool from explicit enemies
    #[cfg(test)]
    pub fn from_enemies(enemies: Vec<Enemy>) -> Self {
        let slots = enemies.into_boxed_slice();
        Self {
            passes: vec![0; slots.len()].into_boxed_slice(),
            slots,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn get(&self, id: SlotId) -> Option<&Enemy> {
        self.slots.get(id.index())
    }

    #[cfg(test)]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Enemy> {
        self.slots.get_mut(id.index())
    }

    /// Iterate slots in pool order
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Enemy)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, enemy)| (SlotId::new(i as u32), enemy))
    }

    /// All enemies as a slice, in slot order
    pub fn as_slice(&self) -> &[Enemy] {
        &self.slots
    }

    /// Advance every enemy by `dt`, in slot order. Each recycle is reported
    /// to `recycled`.
    pub fn update_all<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        recycled: &mut EventQueue<RecycleEvent>,
    ) {
        for (i, enemy) in self.slots.iter_mut().enumerate() {
            if enemy.update(dt, rng) {
                self.passes[i] += 1;
                recycled.send(RecycleEvent {
                    enemy: SlotId::new(i as u32),
                    lane: enemy.lane,
                    pass: self.passes[i],
                });
            }
        }
    }
}
