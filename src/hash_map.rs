use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;

use crate::error::TryReserveError;
use crate::hash_table::ChainStats;
use crate::hash_table::HashTable;
pub use crate::hash_table::Drain;
pub use crate::hash_table::IntoIter;
pub use crate::hash_table::Iter;
pub use crate::hash_table::IterMut;
use crate::stats::StatsCollector;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by [`HashMap::new`] and
        /// [`HashMap::with_capacity`].
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by [`HashMap::new`] and
        /// [`HashMap::with_capacity`].
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Placeholder for the default hasher when neither the `foldhash` nor
        /// the `std` feature is enabled. It cannot be constructed; build maps
        /// with [`HashMap::with_hasher`] instead.
        #[derive(Clone, Copy, Debug)]
        pub enum DefaultHashBuilder {}
    }
}

/// A hash map backed by a separately chained [`HashTable`].
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement `Hash + Eq`
/// and hashes them with the hasher builder `S`. The bucket array grows when
/// the load factor would exceed 0.75 and shrinks when a removal leaves it
/// below 0.25, never going under 16 buckets.
///
/// Every insert, lookup and removal is recorded in the map's
/// [`StatsCollector`], reachable through [`stats`](Self::stats). Lookups
/// record through a shared reference, so a map is `!Sync`.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
///
/// let mut ratings: HashMap<String, u8> = HashMap::new();
/// ratings.insert("espresso".to_string(), 9);
/// ratings.insert("decaf".to_string(), 2);
///
/// assert_eq!(ratings.get("espresso"), Some(&9));
/// assert!(!ratings.contains_key("tea"));
/// assert_eq!(ratings.remove("decaf"), Some(2));
/// assert_eq!(ratings.len(), 1);
/// assert_eq!(ratings.stats().total_operations(), 5);
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<K, V>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl<K, V> HashMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map with 16 buckets and the default hasher.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty map with `capacity` buckets and the default hasher.
    ///
    /// Requests below 16 are raised to 16.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let map: HashMap<i32, String> = HashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 100);
    ///
    /// let map: HashMap<i32, String> = HashMap::with_capacity(0);
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use chain_hash::HashMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut map = HashMap::with_hasher(SimpleHasher);
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty map with `capacity` buckets and the given hasher
    /// builder. Requests below 16 are raised to 16.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns `len / capacity`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// for i in 0..8 {
    ///     map.insert(i, i);
    /// }
    /// assert_eq!(map.load_factor(), 0.5);
    /// ```
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Returns the statistics recorded since the map was created or last
    /// cleared.
    pub fn stats(&self) -> &StatsCollector {
        self.table.stats()
    }

    /// Removes every entry and resets the map to 16 buckets with fresh
    /// statistics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// for i in 0..100 {
    ///     map.insert(i, i);
    /// }
    ///
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// assert_eq!(map.stats().total_operations(), 0);
    /// assert_eq!(map.stats().resizes(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Grows the bucket array so that `additional` more entries fit without
    /// a resize.
    ///
    /// # Panics
    ///
    /// Panics if the required bucket count overflows.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Fallible version of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.table.try_reserve(additional)
    }

    /// Halves the bucket array as far as the current entries allow.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Summarizes how entries are spread over the buckets.
    pub fn chain_stats(&self) -> ChainStats {
        self.table.chain_stats()
    }

    /// Counts buckets by chain length; index 0 counts empty buckets.
    pub fn chain_histogram(&self) -> alloc::vec::Vec<usize> {
        self.table.chain_histogram()
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    /// An iterator visiting all key-value pairs in arbitrary order, with
    /// mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.table.iter_mut()
    }

    /// An iterator visiting all keys in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// let mut keys: Vec<_> = map.keys().copied().collect();
    /// keys.sort();
    /// assert_eq!(keys, ["a", "b"]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values in arbitrary order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// An iterator visiting all values mutably in arbitrary order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes every entry, yielding them as owned pairs.
    ///
    /// Unlike [`clear`](Self::clear), the statistics are kept.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        self.table.drain()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present, its value is replaced and the old
    /// value returned; the stored key is not updated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        self.table.insert(hash, key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and its value.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, |k| key.eq(k.borrow()))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, 10);
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(map.get(&1), Some(&15));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.find_mut(hash, |k| key.eq(k.borrow()))
    }

    /// Returns `true` if the map contains a value for the key.
    ///
    /// This is a lookup like any other and is recorded in the statistics.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes a key from the map, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |k| key.eq(k.borrow()))
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    /// Compares contents only. Lookups made while comparing are recorded in
    /// `other`'s statistics.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k).is_some_and(|theirs| v == theirs))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

/// An iterator over the keys of a `HashMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a `HashMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a `HashMap`.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;
    use core::hash::BuildHasherDefault;
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    /// Hashes a `u64` key to itself, so tests can place keys in chosen
    /// buckets.
    #[derive(Default)]
    struct IdentityHasher(u64);

    impl Hasher for IdentityHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for &byte in bytes {
                self.0 = (self.0 << 8) | u64::from(byte);
            }
        }

        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
    }

    type IdentityState = BuildHasherDefault<IdentityHasher>;

    #[test]
    fn test_new_and_with_hasher() {
        let map: HashMap<i32, String> = HashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 16);

        let map2 = HashMap::<i32, String, _>::with_hasher(SipHashBuilder::default());
        assert!(map2.is_empty());
        assert_eq!(map2.capacity(), 16);
    }

    #[test]
    fn test_with_capacity() {
        let map: HashMap<i32, String> = HashMap::with_capacity(100);
        assert_eq!(map.capacity(), 100);
        assert!(map.is_empty());

        let map2 =
            HashMap::<i32, String, _>::with_capacity_and_hasher(8, SipHashBuilder::default());
        assert_eq!(map2.capacity(), 16);
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());

        assert_eq!(map.insert(1, "hello".to_string()), None);
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());

        assert_eq!(map.get(&1), Some(&"hello".to_string()));
        assert_eq!(map.get(&2), None);

        assert_eq!(
            map.insert(1, "world".to_string()),
            Some("hello".to_string())
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"world".to_string()));
    }

    #[test]
    fn test_get_on_empty_map() {
        let map: HashMap<u64, u64, SipHashBuilder> = HashMap::default();
        assert_eq!(map.get(&7), None);
        assert_eq!(map.stats().total_operations(), 1);
        assert_eq!(map.stats().collisions(), 0);
    }

    #[test]
    fn test_get_mut() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());

        if let Some(value) = map.get_mut(&1) {
            value.push_str(" world");
        }

        assert_eq!(map.get(&1), Some(&"hello world".to_string()));
        assert_eq!(map.get_mut(&2), None);
    }

    #[test]
    fn test_contains_key_is_recorded() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        assert!(!map.contains_key(&1));

        map.insert(1, "value".to_string());
        assert!(map.contains_key(&1));
        assert!(!map.contains_key(&2));
        assert_eq!(map.stats().total_operations(), 4);
    }

    #[test]
    fn test_remove() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());
        map.insert(2, "world".to_string());

        assert_eq!(map.remove(&1), Some("hello".to_string()));
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));

        assert_eq!(map.remove(&1), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_entry() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());

        assert_eq!(map.remove_entry(&1), Some((1, "hello".to_string())));
        assert_eq!(map.remove_entry(&1), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_growth_on_thirteenth_key() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..13u32 {
            map.insert(i, i * 10);
        }

        assert_eq!(map.capacity(), 32);
        assert_eq!(map.stats().resizes(), 1);
        for i in 0..13u32 {
            assert_eq!(map.get(&i), Some(&(i * 10)));
        }
    }

    #[test]
    fn test_no_shrink_at_initial_capacity() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..4u32 {
            map.insert(i, i);
        }

        assert_eq!(map.remove(&0), Some(0));
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.stats().resizes(), 0);
    }

    #[test]
    fn test_shrink_after_mass_removal() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..100u32 {
            map.insert(i, i);
        }
        assert_eq!(map.capacity(), 256);

        for i in 0..95u32 {
            assert_eq!(map.remove(&i), Some(i));
            assert!(map.capacity() == 16 || map.load_factor() >= 0.25);
        }

        assert_eq!(map.capacity(), 16);
        assert_eq!(map.stats().min_capacity_seen(), Some(16));
        assert_eq!(map.stats().max_capacity_seen(), Some(256));
        for i in 95..100u32 {
            assert_eq!(map.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_collision_handling() {
        let mut map: HashMap<u64, &str, IdentityState> = HashMap::default();
        // 1 and 17 share bucket 1 of 16.
        map.insert(1, "one");
        map.insert(17, "seventeen");
        assert_eq!(map.stats().collisions(), 1);

        assert_eq!(map.get(&1), Some(&"one"));
        assert_eq!(map.stats().collisions(), 1);
        assert_eq!(map.get(&17), Some(&"seventeen"));
        assert_eq!(map.stats().collisions(), 2);

        // A miss that walks the chain still collides.
        assert_eq!(map.get(&33), None);
        assert_eq!(map.stats().collisions(), 3);
        assert_eq!(map.stats().total_operations(), 5);
        assert_eq!(map.stats().collision_rate(), 0.6);

        assert_eq!(map.remove(&17), Some("seventeen"));
        assert_eq!(map.get(&1), Some(&"one"));
    }

    #[test]
    fn test_clear_resets_stats() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..50u32 {
            map.insert(i, i);
        }
        assert!(map.stats().resizes() > 0);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.stats().total_operations(), 0);
        assert_eq!(map.stats().resizes(), 0);
        assert_eq!(map.stats().max_capacity_seen(), None);
        assert_eq!(map.get(&1), None);
    }

    #[test]
    fn test_reserve() {
        let mut map: HashMap<i32, i32, SipHashBuilder> = HashMap::default();
        map.reserve(100);
        assert!(map.capacity() * 3 >= 100 * 4);

        let resizes = map.stats().resizes();
        for i in 0..100 {
            map.insert(i, i);
        }
        assert_eq!(map.stats().resizes(), resizes);

        assert_eq!(
            map.try_reserve(usize::MAX),
            Err(TryReserveError::CapacityOverflow {
                additional: usize::MAX
            })
        );
    }

    #[test]
    fn test_shrink_to_fit() {
        let mut map: HashMap<i32, i32, SipHashBuilder> = HashMap::default();
        map.reserve(500);
        for i in 0..10 {
            map.insert(i, i);
        }

        map.shrink_to_fit();
        assert_eq!(map.capacity(), 16);
        for i in 0..10 {
            assert_eq!(map.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_iterators() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "one".to_string());
        map.insert(2, "two".to_string());
        map.insert(3, "three".to_string());

        let mut keys: Vec<_> = map.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, [1, 2, 3]);
        assert_eq!(map.keys().len(), 3);

        let mut values: Vec<_> = map.values().cloned().collect();
        values.sort();
        assert_eq!(values, ["one", "three", "two"]);

        for value in map.values_mut() {
            value.push('!');
        }
        assert_eq!(map.get(&2), Some(&"two!".to_string()));

        for (_, value) in &mut map {
            value.pop();
        }
        let mut pairs: Vec<_> = map.iter().map(|(k, v)| (*k, v.clone())).collect();
        pairs.sort();
        assert_eq!(
            pairs,
            [
                (1, "one".to_string()),
                (2, "two".to_string()),
                (3, "three".to_string())
            ]
        );
    }

    #[test]
    fn test_drain_keeps_stats() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..30u32 {
            map.insert(i, i * 2);
        }
        let operations = map.stats().total_operations();

        let mut drained: Vec<_> = map.drain().collect();
        drained.sort();
        assert_eq!(drained.len(), 30);
        assert_eq!(drained[29], (29, 58));

        assert!(map.is_empty());
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.stats().total_operations(), operations);
    }

    #[test]
    fn test_into_iter() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);

        let mut entries: Vec<_> = map.into_iter().collect();
        entries.sort();
        assert_eq!(entries, [("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_string_keys_with_borrowed_lookup() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert("hello".to_string(), 1);
        map.insert("world".to_string(), 2);

        assert_eq!(map.get("hello"), Some(&1));
        assert_eq!(map.get_key_value("world"), Some((&"world".to_string(), &2)));
        assert!(map.contains_key("world"));
        assert!(!map.contains_key("foo"));
        assert_eq!(map.remove("hello"), Some(1));
        assert_eq!(map.get("hello"), None);
    }

    #[test]
    fn test_extend_and_from_iter() {
        let map: HashMap<u32, u32, SipHashBuilder> = (0..40).map(|i| (i, i + 1)).collect();
        assert_eq!(map.len(), 40);
        assert_eq!(map.capacity(), 64);
        assert_eq!(map.get(&39), Some(&40));

        let mut other = HashMap::with_hasher(SipHashBuilder::default());
        other.extend((0..40).map(|i| (i, i + 1)));
        assert_eq!(map, other);

        other.insert(0, 0);
        assert_ne!(map, other);
        other.remove(&0);
        assert_ne!(map, other);
    }

    #[test]
    fn test_debug_format() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "a");
        assert_eq!(format!("{:?}", map), r#"{1: "a"}"#);

        let empty: HashMap<u8, u8, SipHashBuilder> = HashMap::default();
        assert_eq!(format!("{:?}", empty), "{}");
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        for i in 0..20u32 {
            map.insert(i, i);
        }

        let mut cloned = map.clone();
        cloned.insert(100, 100);
        cloned.remove(&0);

        assert_eq!(map.len(), 20);
        assert_eq!(map.get(&0), Some(&0));
        assert_eq!(map.get(&100), None);
        assert_eq!(cloned.len(), 20);
    }

    #[test]
    fn test_chain_stats_with_identity_hasher() {
        let mut map: HashMap<u64, (), IdentityState> = HashMap::default();
        for key in [0, 16, 32, 5] {
            map.insert(key, ());
        }

        let stats = map.chain_stats();
        assert_eq!(stats.used_buckets, 2);
        assert_eq!(stats.longest_chain, 3);
        assert_eq!(stats.mean_chain_len, 2.0);
        assert_eq!(map.chain_histogram(), [14, 1, 0, 1]);
    }

    #[test]
    fn test_complex_values() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert("numbers".to_string(), alloc::vec![1, 2, 3]);
        map.insert("letters".to_string(), alloc::vec![4, 5]);

        if let Some(numbers) = map.get_mut("numbers") {
            numbers.push(4);
        }

        assert_eq!(map.get("numbers").map(Vec::len), Some(4));
        assert_eq!(map.get("letters").map(Vec::len), Some(2));
    }
}
