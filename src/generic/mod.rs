//! Generic associative containers.
//!
//! Types defined in this module are independent of the actual storage type:
//! list nodes are stored in a slab `C` and tree nodes in a slab `N`, both
//! accessed through the [`cc_traits`] slab traits.
pub mod adapter;
pub mod buckets;
pub mod iter;
pub mod list;
pub mod tree;

mod hash_container;
mod hash_map;
mod hash_set;
mod tree_container;
mod tree_map;
mod tree_set;

pub use adapter::{Atomic, KeyOf, Multi, Pair, Policy, Unique};
pub use hash_container::HashContainer;
pub use hash_map::{HashMap, HashMultiMap};
pub use hash_set::{HashMultiSet, HashSet};
pub use list::Position;
pub use tree_container::TreeContainer;
pub use tree_map::{TreeMap, TreeMultiMap};
pub use tree_set::{TreeMultiSet, TreeSet};
