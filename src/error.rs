/// The error returned by [`HashTable::try_reserve`] and
/// [`HashMap::try_reserve`].
///
/// [`HashTable::try_reserve`]: crate::HashTable::try_reserve
/// [`HashMap::try_reserve`]: crate::HashMap::try_reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TryReserveError {
    /// The bucket count needed to hold the requested entries under the grow
    /// threshold does not fit in memory.
    #[error("capacity overflow while reserving room for {additional} more entries")]
    CapacityOverflow {
        /// The `additional` argument that was rejected
        additional: usize,
    },
}
