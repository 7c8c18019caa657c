#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod macros;

/// Generic subset, superset, overlap and equality tests over any
/// [`ReadOnlySet`].
pub mod algebra;

/// A small immutable set backed by an exact-length slice, and its builder.
pub mod array_set;

/// A small mutable insertion-ordered set using linear scans.
pub mod distinct_list;

/// The always-empty set.
pub mod empty_set;

/// Pluggable hashing and comparison of elements.
pub mod equality;

mod error;

/// An unordered open-addressing set without deletion.
pub mod hash_set;

pub mod index_table;

/// Key to many values maps, with and without per-key de-duplication.
pub mod lookup;

/// An insertion-ordered hash set with positional access.
///
/// This module provides [`OrderedHashSet`], the primary collection of the
/// crate. It combines an append-only value array with an open-addressing
/// [`IndexTable`] so that membership tests are O(1) amortized while iteration
/// and indexing follow insertion order.
pub mod ordered_hash_set;

pub mod set;

/// A set holding at most one element without allocating.
pub mod single_set;

pub use algebra::SetAlgebra;
pub use array_set::ArraySet;
pub use array_set::ArraySetBuilder;
pub use distinct_list::DistinctList;
pub use empty_set::EmptySet;
pub use equality::DefaultEquality;
pub use equality::Equality;
pub use error::Error;
pub use error::Result;
pub use hash_set::HashSet;
pub use index_table::IndexTable;
pub use lookup::Lookup;
pub use lookup::UniqueLookup;
pub use ordered_hash_set::OrderedHashSet;
pub use set::ReadOnlySet;
pub use single_set::SingleSet;
pub use single_set::SmallUnion;
pub use single_set::SmallUnionIter;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        compile_error!("either the `foldhash` or the `std` feature must be enabled");
    }
}
