use crate::shapes::Point;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Pointer position and button state at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerSnapshot {
    pub position: Point,
    pub left: bool,
    pub right: bool,
}

/// Latest pointer state, written by one producer and read once per frame
///
/// Clones share the same state. Position and buttons live in one snapshot behind a
/// single lock, so a reader always sees them as the producer published them together.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    shared: Arc<Mutex<PointerSnapshot>>,
}

impl PointerState {
    pub fn new(start: Point) -> Self {
        let state = Self::default();
        state.set_position(start);
        state
    }

    // A panicking holder cannot leave a Copy snapshot half written
    fn lock(&self) -> MutexGuard<'_, PointerSnapshot> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn publish(&self, snapshot: PointerSnapshot) {
        *self.lock() = snapshot;
    }

    /// Read-modify-write under the lock; returns the published snapshot
    pub fn update(&self, f: impl FnOnce(&mut PointerSnapshot)) -> PointerSnapshot {
        let mut guard = self.lock();
        f(&mut *guard);
        *guard
    }

    pub fn set_position(&self, position: Point) {
        self.update(|snap| snap.position = position);
    }

    pub fn snapshot(&self) -> PointerSnapshot {
        *self.lock()
    }
}

/// Turns per-frame snapshots into press/release edges
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    current: PointerSnapshot,
    previous: PointerSnapshot,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the snapshot for this frame
    pub fn update(&mut self, snapshot: PointerSnapshot) {
        self.previous = self.current;
        self.current = snapshot;
    }

    pub fn position(&self) -> Point {
        self.current.position
    }

    pub fn is_left_clicked(&self) -> bool {
        self.current.left
    }

    pub fn is_right_clicked(&self) -> bool {
        self.current.right
    }

    pub fn is_left_click_pressed(&self) -> bool {
        self.current.left && !self.previous.left
    }

    pub fn is_left_click_released(&self) -> bool {
        !self.current.left && self.previous.left
    }

    pub fn is_right_click_pressed(&self) -> bool {
        self.current.right && !self.previous.right
    }

    pub fn is_right_click_released(&self) -> bool {
        !self.current.right && self.previous.right
    }
}
