//! A separately chained hash table driven by caller-supplied hashes.
//!
//! [`HashTable`] does not hash keys itself: every operation takes the key's
//! `u64` hash and a predicate recognizing the key. [`HashMap`] wraps it with a
//! [`BuildHasher`].
//!
//! [`HashMap`]: crate::HashMap
//! [`BuildHasher`]: core::hash::BuildHasher

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;

use crate::chain;
use crate::chain::Chain;
use crate::chain::Insertion;
use crate::error::TryReserveError;
use crate::stats::StatsCollector;
use crate::stats::Stopwatch;

/// Bucket count of a new or cleared table, and the floor for shrinking.
pub const INITIAL_CAPACITY: usize = 16;

/// Load factor above which an insertion first doubles the bucket array.
pub const GROW_THRESHOLD: f64 = 0.75;

/// Load factor below which a removal halves the bucket array.
pub const SHRINK_THRESHOLD: f64 = 0.25;

// The threshold checks are done in integers: `len / capacity > 3 / 4` and
// `len / capacity < 1 / 4`. Keep them in sync with the constants above.
#[inline(always)]
fn above_grow_threshold(len: usize, capacity: usize) -> bool {
    (len as u128) * 4 > (capacity as u128) * 3
}

#[inline(always)]
fn below_shrink_threshold(len: usize, capacity: usize) -> bool {
    (len as u128) * 4 < capacity as u128
}

#[inline(always)]
fn mix(hash: u64) -> u64 {
    let hash = hash ^ (hash >> 32);
    hash ^ (hash >> 16)
}

/// Maps a hash onto one of `capacity` buckets.
///
/// The hash is folded onto itself before the modulo so that entropy in the
/// high bits reaches the low bits the modulo keeps. Hashers that leave the
/// low bits clustered (identity-like integer hashes) still spread over the
/// buckets.
///
/// # Panics
///
/// Panics if `capacity` is zero.
///
/// # Examples
///
/// ```rust
/// use chain_hash::hash_table::bucket_index;
///
/// assert_eq!(bucket_index(3, 16), 3);
/// // Without mixing, both of these would land in bucket 0.
/// assert_eq!(bucket_index(1 << 16, 16), 1);
/// assert_eq!(bucket_index(1 << 33, 16), 2);
/// ```
#[inline(always)]
pub fn bucket_index(hash: u64, capacity: usize) -> usize {
    (mix(hash) % capacity as u64) as usize
}

fn empty_buckets<K, V>(capacity: usize) -> Box<[Chain<K, V>]> {
    core::iter::repeat_with(Chain::new).take(capacity).collect()
}

#[inline(always)]
fn max_buckets<K, V>() -> usize {
    isize::MAX as usize / mem::size_of::<Chain<K, V>>()
}

/// Bucket-chain distribution of a [`HashTable`] at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStats {
    /// Number of buckets (the table's capacity)
    pub buckets: usize,
    /// Buckets holding at least one entry
    pub used_buckets: usize,
    /// Buckets holding no entries
    pub empty_buckets: usize,
    /// Entries across all chains
    pub entries: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Mean length of the non-empty chains, or zero if every bucket is empty
    pub mean_chain_len: f64,
}

/// A hash table resolving collisions with per-bucket linked chains.
///
/// `HashTable<K, V>` keeps an array of buckets, each the head of a singly
/// linked chain of entries. It grows and shrinks to keep the load factor
/// (`len / capacity`) between [`SHRINK_THRESHOLD`] and [`GROW_THRESHOLD`]:
///
/// - An insertion that would push the load factor above 0.75 first doubles
///   the bucket count.
/// - A removal that leaves the load factor below 0.25 halves the bucket
///   count, never going below [`INITIAL_CAPACITY`].
///
/// Insertions never shrink. A table sized up front with
/// [`with_capacity`](Self::with_capacity), [`reserve`](Self::reserve) or
/// [`try_reserve`](Self::try_reserve) therefore sits below 0.25 until it
/// fills up or a removal halves it.
///
/// Every insert, lookup and removal is timed and reported to the table's
/// [`StatsCollector`], as is every resize.
///
/// The caller provides the hash of each key along with a predicate that
/// recognizes it. Entries remember their hash, so resizing never calls back
/// into a hasher.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use chain_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # fn hash_str(s: &str) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     s.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::new();
/// let hash = hash_str("alice");
///
/// assert_eq!(table.insert(hash, "alice".to_string(), 31), None);
/// assert_eq!(table.insert(hash, "alice".to_string(), 32), Some(31));
/// assert_eq!(table.find(hash, |k| k == "alice"), Some((&"alice".to_string(), &32)));
/// assert_eq!(table.remove(hash, |k| k == "alice"), Some(("alice".to_string(), 32)));
/// assert!(table.is_empty());
/// ```
#[derive(Clone)]
pub struct HashTable<K, V> {
    buckets: Box<[Chain<K, V>]>,
    populated: usize,
    stats: StatsCollector,
}

impl<K, V> Debug for HashTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.populated)
            .field("capacity", &self.capacity())
            .field(
                "chains",
                &self.buckets.iter().map(Chain::len).collect::<Vec<_>>(),
            )
            .field("stats", &self.stats)
            .finish()
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table with [`INITIAL_CAPACITY`] buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let table: HashTable<u64, String> = HashTable::new();
    /// assert_eq!(table.capacity(), 16);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty table with `capacity` buckets.
    ///
    /// Requests below [`INITIAL_CAPACITY`], including zero, are raised to it.
    /// Larger requests are used as given; they need not be powers of two.
    ///
    /// The requested bucket count is kept while entries are inserted, even
    /// when the load factor stays under [`SHRINK_THRESHOLD`]. The first
    /// removal that finds the table under the threshold halves it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let table: HashTable<u64, u64> = HashTable::with_capacity(0);
    /// assert_eq!(table.capacity(), 16);
    ///
    /// let table: HashTable<u64, u64> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(INITIAL_CAPACITY)),
            populated: 0,
            stats: StatsCollector::new(),
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of buckets.
    ///
    /// Unlike open-addressing tables, a chained table can hold more entries
    /// than it has buckets; the resize policy keeps it from doing so.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.populated as f64 / self.capacity() as f64
    }

    /// Returns the statistics recorded since the table was created or last
    /// cleared.
    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    #[inline(always)]
    fn bucket(&self, hash: u64) -> usize {
        bucket_index(hash, self.capacity())
    }

    /// Finds an entry by hash and key predicate.
    ///
    /// Returns the stored key and value, or `None` if no entry matches.
    /// The lookup is recorded in [`stats`](Self::stats) even though it only
    /// takes `&self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(hash_u64(42), 42u64, "answer");
    ///
    /// assert_eq!(table.find(hash_u64(42), |&k| k == 42), Some((&42, &"answer")));
    /// assert_eq!(table.find(hash_u64(99), |&k| k == 99), None);
    /// assert_eq!(table.stats().total_operations(), 3);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<(&K, &V)> {
        let timer = Stopwatch::start();

        let lookup = self.buckets[self.bucket(hash)].find(hash, eq);
        self.stats.record_operation(timer.elapsed(), lookup.collided);

        lookup.found.map(|node| (&node.key, &node.value))
    }

    /// Finds an entry by hash and key predicate, returning a mutable
    /// reference to its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(hash_u64(7), 7u64, 1);
    ///
    /// if let Some(value) = table.find_mut(hash_u64(7), |&k| k == 7) {
    ///     *value += 1;
    /// }
    /// assert_eq!(table.find(hash_u64(7), |&k| k == 7), Some((&7, &2)));
    /// ```
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<&mut V> {
        let timer = Stopwatch::start();

        let index = self.bucket(hash);
        let lookup = self.buckets[index].find_mut(hash, eq);
        self.stats.record_operation(timer.elapsed(), lookup.collided);

        lookup.found.map(|node| &mut node.value)
    }

    /// Inserts `key` and `value` under `hash`.
    ///
    /// If an entry with an equal key already exists, its value is replaced in
    /// place and the old value returned; the stored key is kept. Otherwise the
    /// entry is appended to the tail of its bucket's chain and `None` is
    /// returned.
    ///
    /// Before looking for the key, the table doubles its bucket count if one
    /// more entry would push the load factor above [`GROW_THRESHOLD`], so the
    /// entry is placed against the grown array.
    ///
    /// `hash` must be the hash of `key` under the same function used for every
    /// other operation on this table.
    ///
    /// Unlike [`find`](Self::find) and [`remove`](Self::remove), `insert` takes
    /// no predicate. It owns the key it stores, so it compares that key with
    /// `K`'s own [`Eq`]. The predicates passed to the other operations must
    /// agree with that equality, or inserted entries cannot be found again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// for key in 0..12u64 {
    ///     table.insert(key, key, ());
    /// }
    /// assert_eq!(table.capacity(), 16);
    ///
    /// // 13 / 16 > 0.75
    /// table.insert(12, 12, ());
    /// assert_eq!(table.capacity(), 32);
    /// assert_eq!(table.stats().resizes(), 1);
    /// ```
    pub fn insert(&mut self, hash: u64, key: K, value: V) -> Option<V>
    where
        K: Eq,
    {
        let timer = Stopwatch::start();

        self.maybe_grow();

        let index = self.bucket(hash);
        let (previous, collided) = match self.buckets[index].insert(hash, key, value) {
            Insertion::Replaced(previous) => (Some(previous), false),
            Insertion::Appended { collided } => {
                self.populated += 1;
                (None, collided)
            }
        };

        self.stats.record_operation(timer.elapsed(), collided);
        previous
    }

    /// Removes and returns the entry matching `hash` and `eq`.
    ///
    /// If the removal leaves the load factor below [`SHRINK_THRESHOLD`] and
    /// the table has more than [`INITIAL_CAPACITY`] buckets, the bucket count
    /// is halved. A miss changes nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(hash_u64(42), 42u64, 'x');
    ///
    /// assert_eq!(table.remove(hash_u64(42), |&k| k == 42), Some((42, 'x')));
    /// assert_eq!(table.remove(hash_u64(42), |&k| k == 42), None);
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&K) -> bool) -> Option<(K, V)> {
        let timer = Stopwatch::start();

        let index = self.bucket(hash);
        let lookup = self.buckets[index].remove(hash, eq);
        let removed = match lookup.found {
            Some(node) => {
                self.populated -= 1;
                self.maybe_shrink();
                Some(node.into_entry())
            }
            None => None,
        };

        self.stats.record_operation(timer.elapsed(), lookup.collided);
        removed
    }

    /// Removes every entry and resets the table to [`INITIAL_CAPACITY`]
    /// buckets with fresh statistics.
    ///
    /// This is the only operation that discards recorded statistics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// for key in 0..100u64 {
    ///     table.insert(key, key, key);
    /// }
    /// assert!(table.capacity() > 16);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// assert_eq!(table.stats().total_operations(), 0);
    /// ```
    pub fn clear(&mut self) {
        tracing::trace!(
            len = self.populated,
            capacity = self.capacity(),
            "clearing table"
        );

        self.buckets = empty_buckets(INITIAL_CAPACITY);
        self.populated = 0;
        self.stats = StatsCollector::new();
    }

    /// Returns an iterator over all entries.
    ///
    /// Entries are visited bucket by bucket, and within a bucket from the head
    /// of its chain to the tail. The order changes whenever the table resizes
    /// and must not be relied on.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: chain::Iter::default(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator over all entries with mutable references to the
    /// values, in the same order as [`iter`](Self::iter).
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            chain: chain::IterMut::default(),
            remaining: self.populated,
        }
    }

    /// Removes every entry, yielding them as owned pairs.
    ///
    /// The table is reset to [`INITIAL_CAPACITY`] buckets as soon as this is
    /// called, whether or not the iterator is consumed. Statistics are kept
    /// and no resize is recorded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// for key in 0..40u64 {
    ///     table.insert(key, key, key * 2);
    /// }
    ///
    /// let mut drained: Vec<(u64, u64)> = table.drain().collect();
    /// drained.sort();
    /// assert_eq!(drained.len(), 40);
    /// assert_eq!(drained[39], (39, 78));
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        let buckets = mem::replace(&mut self.buckets, empty_buckets(INITIAL_CAPACITY));
        let remaining = mem::replace(&mut self.populated, 0);

        Drain {
            inner: IntoIter::new(buckets, remaining),
            _table: PhantomData,
        }
    }

    /// Grows the bucket array so that `additional` more entries fit without
    /// crossing [`GROW_THRESHOLD`].
    ///
    /// The bucket count is doubled as many times as needed and the entries are
    /// rehashed once. Until enough entries arrive, the load factor may sit
    /// under [`SHRINK_THRESHOLD`]; insertions leave it there and the next
    /// removal halves the table.
    ///
    /// # Panics
    ///
    /// Panics if the required bucket count overflows. See
    /// [`try_reserve`](Self::try_reserve) for a fallible version.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let mut table: HashTable<u64, u64> = HashTable::new();
    /// table.reserve(100);
    /// assert_eq!(table.capacity(), 256);
    ///
    /// for key in 0..100 {
    ///     table.insert(key, key, key);
    /// }
    /// assert_eq!(table.stats().resizes(), 1);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            panic!("{err}");
        }
    }

    /// Fallible version of [`reserve`](Self::reserve).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::TryReserveError;
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let mut table: HashTable<u64, u64> = HashTable::new();
    /// assert_eq!(table.try_reserve(10), Ok(()));
    /// assert_eq!(
    ///     table.try_reserve(usize::MAX),
    ///     Err(TryReserveError::CapacityOverflow {
    ///         additional: usize::MAX
    ///     })
    /// );
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let Some(target) = self.reserve_target(additional) else {
            tracing::trace!(
                additional,
                len = self.populated,
                capacity = self.capacity(),
                "rejected reservation"
            );
            return Err(TryReserveError::CapacityOverflow { additional });
        };

        if target != self.capacity() {
            self.resize(target);
        }
        Ok(())
    }

    fn reserve_target(&self, additional: usize) -> Option<usize> {
        let required = self.populated.checked_add(additional)?;

        let mut target = self.capacity();
        while above_grow_threshold(required, target) {
            target = target
                .checked_mul(2)
                .filter(|&doubled| doubled <= max_buckets::<K, V>())?;
        }
        Some(target)
    }

    /// Halves the bucket count as far as possible while the current entries
    /// stay within [`GROW_THRESHOLD`] and the count stays at least
    /// [`INITIAL_CAPACITY`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(1024);
    /// for key in 0..30u64 {
    ///     table.insert(key, key, ());
    /// }
    ///
    /// table.shrink_to_fit();
    /// assert_eq!(table.capacity(), 64);
    /// assert_eq!(table.len(), 30);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let mut target = self.capacity();
        while target / 2 >= INITIAL_CAPACITY && !above_grow_threshold(self.populated, target / 2) {
            target /= 2;
        }

        if target != self.capacity() {
            self.resize(target);
        }
    }

    /// Summarizes how entries are spread over the buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::hash_table::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// // Hashes 1 and 17 share bucket 1 out of 16.
    /// table.insert(1, "a", ());
    /// table.insert(17, "b", ());
    /// table.insert(2, "c", ());
    ///
    /// let stats = table.chain_stats();
    /// assert_eq!(stats.used_buckets, 2);
    /// assert_eq!(stats.empty_buckets, 14);
    /// assert_eq!(stats.longest_chain, 2);
    /// assert_eq!(stats.mean_chain_len, 1.5);
    /// ```
    pub fn chain_stats(&self) -> ChainStats {
        let mut used_buckets = 0;
        let mut longest_chain = 0;
        for chain in self.buckets.iter() {
            let len = chain.len();
            if len > 0 {
                used_buckets += 1;
                longest_chain = longest_chain.max(len);
            }
        }

        ChainStats {
            buckets: self.capacity(),
            used_buckets,
            empty_buckets: self.capacity() - used_buckets,
            entries: self.populated,
            longest_chain,
            mean_chain_len: if used_buckets == 0 {
                0.0
            } else {
                self.populated as f64 / used_buckets as f64
            },
        }
    }

    /// Counts buckets by chain length.
    ///
    /// Index `n` of the result holds the number of buckets whose chain has
    /// exactly `n` entries; index 0 counts the empty buckets. The vector is as
    /// long as the longest chain plus one.
    pub fn chain_histogram(&self) -> Vec<usize> {
        let mut histogram = vec![0usize; 1];
        for chain in self.buckets.iter() {
            let len = chain.len();
            if len >= histogram.len() {
                histogram.resize(len + 1, 0);
            }
            histogram[len] += 1;
        }

        histogram
    }

    #[inline]
    fn maybe_grow(&mut self) {
        let capacity = self.capacity();
        if above_grow_threshold(self.populated.saturating_add(1), capacity) {
            if let Some(doubled) = capacity.checked_mul(2) {
                self.resize(doubled);
            }
        }
    }

    #[inline]
    fn maybe_shrink(&mut self) {
        let capacity = self.capacity();
        if capacity > INITIAL_CAPACITY && below_shrink_threshold(self.populated, capacity) {
            self.resize((capacity / 2).max(INITIAL_CAPACITY));
        }
    }

    /// Moves every entry into a fresh array of `new_capacity` buckets.
    ///
    /// Old buckets are visited in order and each chain head to tail; every
    /// node is appended to the tail of its new chain, so entries that share a
    /// bucket before and after keep their relative order. Nodes are moved, not
    /// reallocated, and the new array replaces the old one in a single
    /// assignment.
    #[cold]
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= INITIAL_CAPACITY);

        let old_capacity = self.capacity();
        let mut rebuilt = empty_buckets::<K, V>(new_capacity);

        for mut chain in mem::take(&mut self.buckets).into_vec() {
            while let Some(node) = chain.pop_front() {
                rebuilt[bucket_index(node.hash, new_capacity)].push_back(node);
            }
        }

        self.buckets = rebuilt;
        self.stats.record_resize(old_capacity, new_capacity);

        tracing::debug!(
            old_capacity,
            new_capacity,
            len = self.populated,
            "rehashed bucket chains"
        );
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut HashTable<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for HashTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buckets, self.populated)
    }
}

/// An iterator over the entries of a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<K, V>>,
    chain: chain::Iter<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.next() {
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`HashTable`].
///
/// This struct is created by the [`iter_mut`] method on [`HashTable`].
///
/// [`iter_mut`]: HashTable::iter_mut
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Chain<K, V>>,
    chain: chain::IterMut<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining -= 1;
                return Some(entry);
            }
            self.chain = self.buckets.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`HashTable`].
pub struct IntoIter<K, V> {
    buckets: vec::IntoIter<Chain<K, V>>,
    chain: Chain<K, V>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    fn new(buckets: Box<[Chain<K, V>]>, remaining: usize) -> Self {
        Self {
            buckets: buckets.into_vec().into_iter(),
            chain: Chain::new(),
            remaining,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.pop_front() {
                self.remaining -= 1;
                return Some(node.into_entry());
            }
            self.chain = self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// A draining iterator over the entries of a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`]. Entries
/// not yet yielded when it is dropped are dropped with it.
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, K, V> {
    inner: IntoIter<K, V>,
    _table: PhantomData<&'a mut HashTable<K, V>>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

impl<K, V> FusedIterator for Drain<'_, K, V> {}
