//! Slab-backed associative containers with STL semantics.
//!
//! Every container stores its elements in a doubly linked list allocated in a
//! slab, and indexes the list slots either with a red-black tree (ordered
//! containers) or with a bucket table (hashed containers).
//! Elements are designated by stable [`Position`]s, which stay valid until
//! the element they designate is erased.
//!
//! The types exposed at the root of the crate use [`slab::Slab`] as storage.
//! The [`generic`] module defines the same containers over any
//! [`cc_traits`] slab.
pub mod compare;
pub mod error;
pub mod generic;
pub mod hash;

pub use compare::{Compare, Natural, Reverse};
pub use error::OutOfRange;
pub use generic::Position;
pub use hash::{FnvBuildHasher, FnvHasher};

#[cfg(feature = "std-slab")]
use slab::Slab;

#[cfg(feature = "std-slab")]
use generic::{list, tree};

/// Ordered map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type TreeMap<K, V, P = Natural> = generic::TreeMap<K, V, P, Slab<list::Node<(K, V)>>, Slab<tree::Node>>;

/// Ordered multi-map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type TreeMultiMap<K, V, P = Natural> =
	generic::TreeMultiMap<K, V, P, Slab<list::Node<(K, V)>>, Slab<tree::Node>>;

/// Ordered set based on `Slab`.
#[cfg(feature = "std-slab")]
pub type TreeSet<T, P = Natural> = generic::TreeSet<T, P, Slab<list::Node<T>>, Slab<tree::Node>>;

/// Ordered multi-set based on `Slab`.
#[cfg(feature = "std-slab")]
pub type TreeMultiSet<T, P = Natural> = generic::TreeMultiSet<T, P, Slab<list::Node<T>>, Slab<tree::Node>>;

/// Hashed map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type HashMap<K, V, S = FnvBuildHasher> = generic::HashMap<K, V, S, Slab<list::Node<(K, V)>>>;

/// Hashed multi-map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type HashMultiMap<K, V, S = FnvBuildHasher> = generic::HashMultiMap<K, V, S, Slab<list::Node<(K, V)>>>;

/// Hashed set based on `Slab`.
#[cfg(feature = "std-slab")]
pub type HashSet<T, S = FnvBuildHasher> = generic::HashSet<T, S, Slab<list::Node<T>>>;

/// Hashed multi-set based on `Slab`.
#[cfg(feature = "std-slab")]
pub type HashMultiSet<T, S = FnvBuildHasher> = generic::HashMultiSet<T, S, Slab<list::Node<T>>>;
