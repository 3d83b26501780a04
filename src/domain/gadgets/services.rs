use std::cell::Cell;

/// Source of unique, increasing suffixes for liveness markers.
pub trait IdGenerator {
    fn next_id(&self) -> u64;
}

/// Counter starting at 1. Never resets and never hands out a value twice.
#[derive(Debug)]
pub struct MonotonicIds {
    next: Cell<u64>,
}

impl MonotonicIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: Cell::new(first) }
    }
}

impl Default for MonotonicIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for MonotonicIds {
    fn next_id(&self) -> u64 {
        let id = self.next.get();
        self.next.set(id + 1);
        id
    }
}
