use core::cell::Cell;
use core::time::Duration;

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Measures the wall-clock duration of a single table operation.
        pub(crate) struct Stopwatch(std::time::Instant);

        impl Stopwatch {
            #[inline(always)]
            pub(crate) fn start() -> Self {
                Self(std::time::Instant::now())
            }

            #[inline(always)]
            pub(crate) fn elapsed(&self) -> Duration {
                self.0.elapsed()
            }
        }
    } else {
        /// Without `std` there is no clock, so every operation takes zero time.
        pub(crate) struct Stopwatch;

        impl Stopwatch {
            #[inline(always)]
            pub(crate) fn start() -> Self {
                Self
            }

            #[inline(always)]
            pub(crate) fn elapsed(&self) -> Duration {
                Duration::ZERO
            }
        }
    }
}

/// Passive performance counters owned by a hash table.
///
/// The table reports each logical operation (insert, lookup, removal) and
/// each resize here. The collector never looks at live table state: load
/// factor and chain lengths are properties of the table, not of its
/// statistics.
///
/// Counters live in [`Cell`]s so that lookups through a shared reference can
/// still be counted. This makes the collector, and any table that owns one,
/// `!Sync`; share a table between threads behind a lock.
///
/// Callers only get a shared reference to the collector, through
/// [`HashMap::stats`] or [`HashTable::stats`], and nothing public mutates it.
///
/// [`HashMap::stats`]: crate::HashMap::stats
/// [`HashTable::stats`]: crate::HashTable::stats
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
///
/// let mut map: HashMap<u32, &str> = HashMap::new();
/// map.insert(1, "one");
/// assert_eq!(map.get(&1), Some(&"one"));
/// assert_eq!(map.get(&2), None);
///
/// let stats = map.stats();
/// assert_eq!(stats.total_operations(), 3);
/// assert_eq!(stats.resizes(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    total_operations: Cell<u64>,
    collisions: Cell<u64>,
    resizes: Cell<u64>,
    total_time: Cell<Duration>,
    max_capacity_seen: Cell<Option<usize>>,
    min_capacity_seen: Cell<Option<usize>>,
}

impl StatsCollector {
    /// Creates a collector with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed table operation.
    ///
    /// `had_collision` is a per-operation flag: the operation either stepped
    /// past at least one entry with a different key or it did not.
    pub(crate) fn record_operation(&self, duration: Duration, had_collision: bool) {
        self.total_operations.set(self.total_operations.get() + 1);
        self.total_time
            .set(self.total_time.get().saturating_add(duration));
        if had_collision {
            self.collisions.set(self.collisions.get() + 1);
        }
    }

    /// Records one completed resize of the bucket array.
    pub(crate) fn record_resize(&self, old_capacity: usize, new_capacity: usize) {
        debug_assert_ne!(old_capacity, new_capacity);

        self.resizes.set(self.resizes.get() + 1);
        self.max_capacity_seen.set(Some(
            self.max_capacity_seen
                .get()
                .map_or(new_capacity, |seen| seen.max(new_capacity)),
        ));
        self.min_capacity_seen.set(Some(
            self.min_capacity_seen
                .get()
                .map_or(new_capacity, |seen| seen.min(new_capacity)),
        ));
    }

    /// Number of insert, lookup and removal operations recorded.
    pub fn total_operations(&self) -> u64 {
        self.total_operations.get()
    }

    /// Number of operations that walked past a non-matching entry, or that
    /// appended to a non-empty chain.
    pub fn collisions(&self) -> u64 {
        self.collisions.get()
    }

    /// Number of times the bucket array was rebuilt.
    pub fn resizes(&self) -> u64 {
        self.resizes.get()
    }

    /// Cumulative time spent inside recorded operations.
    ///
    /// Always zero when the `std` feature is disabled.
    pub fn total_time(&self) -> Duration {
        self.total_time.get()
    }

    /// Largest bucket count a resize has produced, or `None` before the
    /// first resize.
    pub fn max_capacity_seen(&self) -> Option<usize> {
        self.max_capacity_seen.get()
    }

    /// Smallest bucket count a resize has produced, or `None` before the
    /// first resize.
    pub fn min_capacity_seen(&self) -> Option<usize> {
        self.min_capacity_seen.get()
    }

    /// Mean duration of a recorded operation, or zero if none were recorded.
    pub fn average_operation_time(&self) -> Duration {
        let operations = self.total_operations.get();
        if operations == 0 {
            return Duration::ZERO;
        }

        let nanos = self.total_time.get().as_nanos() / u128::from(operations);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Fraction of recorded operations that collided, in `0.0..=1.0`, or zero
    /// if none were recorded.
    pub fn collision_rate(&self) -> f64 {
        let operations = self.total_operations.get();
        if operations == 0 {
            return 0.0;
        }

        self.collisions.get() as f64 / operations as f64
    }

    /// Copies the current counters into a plain value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map: HashMap<u32, u32> = HashMap::new();
    /// for i in 0..13 {
    ///     map.insert(i, i);
    /// }
    ///
    /// let snapshot = map.stats().snapshot();
    /// assert_eq!(snapshot.total_operations, 13);
    /// assert_eq!(snapshot.resizes, 1);
    /// assert_eq!(snapshot.max_capacity_seen, Some(32));
    /// ```
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_operations: self.total_operations(),
            collisions: self.collisions(),
            resizes: self.resizes(),
            total_time: self.total_time(),
            max_capacity_seen: self.max_capacity_seen(),
            min_capacity_seen: self.min_capacity_seen(),
            average_operation_time: self.average_operation_time(),
            collision_rate: self.collision_rate(),
        }
    }
}

/// Point-in-time copy of a [`StatsCollector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    /// Insert, lookup and removal operations recorded
    pub total_operations: u64,
    /// Operations that collided
    pub collisions: u64,
    /// Bucket array rebuilds
    pub resizes: u64,
    /// Cumulative time inside recorded operations
    pub total_time: Duration,
    /// Largest capacity produced by a resize
    pub max_capacity_seen: Option<usize>,
    /// Smallest capacity produced by a resize
    pub min_capacity_seen: Option<usize>,
    /// `total_time / total_operations`
    pub average_operation_time: Duration,
    /// `collisions / total_operations`
    pub collision_rate: f64,
}
