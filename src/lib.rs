#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod chain;

/// The error type for fallible capacity reservation.
pub mod error;

/// A key-value map over the chained table.
///
/// This module provides a `HashMap` that wraps the `HashTable`, hashing keys
/// with a configurable hasher builder.
pub mod hash_map;

pub mod hash_table;

/// Per-table operation counters.
pub mod stats;

pub use error::TryReserveError;
pub use hash_map::DefaultHashBuilder;
pub use hash_map::HashMap;
pub use hash_table::ChainStats;
pub use hash_table::HashTable;
pub use stats::StatsCollector;
pub use stats::StatsSnapshot;
