//! Bounded histories of sampled values
//!
//! A [`History`] keeps the most recent values read from a source, oldest
//! first. Its buffer sits behind a lock shared with any number of
//! [`HistoryReader`] handles, so charts can iterate a history while the
//! stepping path keeps appending to it.

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Limit used when a history is created without an explicit one
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug)]
struct Buffer<V> {
    values: VecDeque<V>,
    limit: usize,
}

/// Bounded, order-preserving buffer of values sampled from a source of type `S`
///
/// The history does not hold on to its source. It keeps an accessor instead
/// and is handed the source whenever a sample is taken, so it can move with
/// whatever owns it.
///
/// # Examples
///
/// ```
/// use galaxy::history::History;
///
/// struct Counter(u32);
///
/// let history: History<Counter, u32> = History::with_limit(|c: &Counter| c.0, 3);
/// for i in 0..5 {
///     history.add_current_value(&Counter(i));
/// }
///
/// assert_eq!(history.values(), vec![2, 3, 4]);
/// ```
pub struct History<S, V> {
    source: fn(&S) -> V,
    buffer: Arc<RwLock<Buffer<V>>>,
}

impl<S, V: Clone> History<S, V> {
    /// Creates an empty history holding up to [`DEFAULT_LIMIT`] values
    pub fn new(source: fn(&S) -> V) -> Self {
        Self::with_limit(source, DEFAULT_LIMIT)
    }

    pub fn with_limit(source: fn(&S) -> V, limit: usize) -> Self {
        Self {
            source,
            buffer: Arc::new(RwLock::new(Buffer {
                values: VecDeque::with_capacity(limit),
                limit,
            })),
        }
    }

    /// Samples the current value of `source` and appends it
    ///
    /// Values are evicted from the front until there is room for the new one,
    /// so a history whose limit was lowered shrinks back to the limit here.
    pub fn add_current_value(&self, source: &S) {
        let value = (self.source)(source);
        let mut buffer = self.buffer.write();
        if buffer.limit == 0 {
            buffer.values.clear();
            return;
        }
        while buffer.values.len() >= buffer.limit {
            buffer.values.pop_front();
        }
        buffer.values.push_back(value);
    }

    /// Changes the ceiling only; nothing is evicted until the next sample
    pub fn set_limit(&self, limit: usize) {
        self.buffer.write().limit = limit;
    }

    pub fn limit(&self) -> usize {
        self.buffer.read().limit
    }

    pub fn len(&self) -> usize {
        self.buffer.read().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the stored values, oldest first
    pub fn values(&self) -> Vec<V> {
        self.buffer.read().values.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<V> {
        self.buffer.read().values.back().cloned()
    }

    /// Read-only handle that stays valid while the history keeps recording
    pub fn reader(&self) -> HistoryReader<V> {
        HistoryReader {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl<S, V: fmt::Debug> fmt::Debug for History<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buffer = self.buffer.read();
        f.debug_struct("History")
            .field("limit", &buffer.limit)
            .field("values", &buffer.values)
            .finish()
    }
}

/// Shared read-only view of a [`History`]
#[derive(Debug)]
pub struct HistoryReader<V> {
    buffer: Arc<RwLock<Buffer<V>>>,
}

impl<V> Clone for HistoryReader<V> {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl<V: Clone> HistoryReader<V> {
    /// Copy of the stored values, oldest first
    pub fn values(&self) -> Vec<V> {
        self.buffer.read().values.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<V> {
        self.buffer.read().values.back().cloned()
    }

    pub fn len(&self) -> usize {
        self.buffer.read().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn limit(&self) -> usize {
        self.buffer.read().limit
    }
}
