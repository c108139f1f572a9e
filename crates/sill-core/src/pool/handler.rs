use std::collections::VecDeque;

use tracing::{debug, info};

use super::types::{PoolHandle, Poolable};

type Factory<T> = Box<dyn FnMut() -> T>;

struct Slot<T> {
    value: T,
    active: bool,
}

/// A pool that pre-creates `baseline` instances and grows on demand.
///
/// Inactive instances are handed out in the order they were retired.
/// [`cull_excess`](Self::cull_excess) shrinks the pool back toward the
/// baseline by destroying inactive instances only.
pub struct ObjectPool<T> {
    factory: Factory<T>,
    baseline: usize,
    slots: Vec<Option<Slot<T>>>,
    generations: Vec<u32>,
    vacant: Vec<usize>,
    inactive: VecDeque<usize>,
    active: Vec<usize>,
}

impl<T: Poolable> ObjectPool<T> {
    pub fn new(baseline: usize, factory: impl FnMut() -> T + 'static) -> Self {
        let mut pool = Self {
            factory: Box::new(factory),
            baseline,
            slots: Vec::with_capacity(baseline),
            generations: Vec::with_capacity(baseline),
            vacant: Vec::new(),
            inactive: VecDeque::with_capacity(baseline),
            active: Vec::new(),
        };
        for _ in 0..baseline {
            let index = pool.instantiate();
            pool.inactive.push_back(index);
        }
        debug!(event = "core.pool.created", baseline = baseline);
        pool
    }

    pub fn baseline(&self) -> usize {
        self.baseline
    }

    /// Check out an inactive instance, creating one if none is left.
    pub fn get_next(&mut self) -> PoolHandle {
        let index = match self.inactive.pop_front() {
            Some(index) => index,
            None => {
                let index = self.instantiate();
                debug!(
                    event = "core.pool.grown",
                    total = self.total_count()
                );
                index
            }
        };

        self.generations[index] = self.generations[index].wrapping_add(1);
        if let Some(slot) = self.slots[index].as_mut() {
            slot.active = true;
            slot.value.activate();
        }
        self.active.push(index);

        PoolHandle {
            index,
            generation: self.generations[index],
        }
    }

    /// Return an instance to the pool. Handles that are not currently
    /// checked out are ignored; returns whether anything was retired.
    pub fn retire(&mut self, handle: PoolHandle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        if let Some(slot) = self.slots[handle.index].as_mut() {
            slot.active = false;
            slot.value.deactivate();
        }
        self.active.retain(|&i| i != handle.index);
        self.inactive.push_back(handle.index);
        true
    }

    /// Destroy inactive instances until the pool is back at its baseline or
    /// nothing inactive is left. Returns how many were destroyed.
    pub fn cull_excess(&mut self) -> usize {
        let mut destroyed = 0;
        while self.total_count() > self.baseline {
            let Some(index) = self.inactive.pop_front() else {
                break;
            };
            self.slots[index] = None;
            self.vacant.push(index);
            destroyed += 1;
        }
        if destroyed > 0 {
            info!(
                event = "core.pool.cull_completed",
                destroyed = destroyed,
                remaining = self.total_count()
            );
        }
        destroyed
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        if !self.is_live(handle) {
            return None;
        }
        self.slots[handle.index].as_ref().map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        if !self.is_live(handle) {
            return None;
        }
        self.slots[handle.index].as_mut().map(|slot| &mut slot.value)
    }

    /// Handles of active instances in the order they were checked out.
    pub fn active_handles(&self) -> Vec<PoolHandle> {
        self.active
            .iter()
            .map(|&index| PoolHandle {
                index,
                generation: self.generations[index],
            })
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn inactive_count(&self) -> usize {
        self.inactive.len()
    }

    pub fn total_count(&self) -> usize {
        self.active.len() + self.inactive.len()
    }

    fn is_live(&self, handle: PoolHandle) -> bool {
        handle.index < self.slots.len()
            && self.generations[handle.index] == handle.generation
            && self.slots[handle.index]
                .as_ref()
                .is_some_and(|slot| slot.active)
    }

    fn instantiate(&mut self) -> usize {
        let mut value = (self.factory)();
        value.deactivate();
        let slot = Slot {
            value,
            active: false,
        };
        match self.vacant.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                index
            }
            None => {
                self.slots.push(Some(slot));
                self.generations.push(0);
                self.slots.len() - 1
            }
        }
    }
}

impl<T> std::fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectPool")
            .field("baseline", &self.baseline)
            .field("active", &self.active.len())
            .field("inactive", &self.inactive.len())
            .finish()
    }
}
