//! Per-item memo of the last computed ordinal.

use std::cell::Cell;

/// Whether a list item's cached ordinal can be trusted.
///
/// Items start `Dirty`, become `Valid` when a query computes their value and
/// return to `Dirty` on any invalidation. There is no terminal state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CacheState {
    #[default]
    Dirty,
    Valid(i32),
}

/// Memoized ordinal for one list item.
///
/// Queries run through shared references during layout, so the state lives in
/// a `Cell`. That also keeps the cache `!Sync`: numbering is single-threaded.
#[derive(Debug, Default)]
pub struct ValueCache {
    state: Cell<CacheState>,
}

impl ValueCache {
    pub const fn new() -> Self {
        Self {
            state: Cell::new(CacheState::Dirty),
        }
    }

    #[inline]
    pub fn state(&self) -> CacheState {
        self.state.get()
    }

    /// The cached ordinal, if still valid.
    #[inline]
    pub fn get(&self) -> Option<i32> {
        match self.state.get() {
            CacheState::Valid(value) => Some(value),
            CacheState::Dirty => None,
        }
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.state.get() == CacheState::Dirty
    }

    /// Mark the ordinal stale. Never recomputes.
    ///
    /// Returns whether the cache held a valid value before the call. Crate
    /// private: forward invalidation relies on every item after a dirty one
    /// being dirty too.
    #[inline]
    pub(crate) fn invalidate(&self) -> bool {
        self.state.replace(CacheState::Dirty) != CacheState::Dirty
    }

    #[inline]
    pub(crate) fn store(&self, value: i32) {
        self.state.set(CacheState::Valid(value));
    }
}
