//! Hashed sets.
use crate::generic::{
	adapter::{Atomic, Multi, Unique},
	hash_container::HashContainer,
	list::{self, Position},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, SlabMut};
use std::hash::{BuildHasher, Hash};

/// Hashed set.
pub type HashSet<T, S, C> = HashContainer<T, Atomic, Unique, S, C>;

/// Hashed set where a value may appear several times.
pub type HashMultiSet<T, S, C> = HashContainer<T, Atomic, Multi, S, C>;

impl<T: Hash + Eq, S: BuildHasher, C: SlabMut<list::Node<T>>> HashSet<T, S, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Insert a value, unless it is already present.
	///
	/// Returns the position of the value, and `true` if it was inserted.
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::HashSet;
	///
	/// let mut set = HashSet::new();
	/// let (pos, inserted) = set.insert("a");
	/// assert!(inserted);
	/// assert_eq!(set.insert("a"), (pos, false));
	/// ```
	#[inline]
	pub fn insert(&mut self, value: T) -> (Position, bool) {
		self.insert_value(value)
	}

	/// Same as [`insert`](HashSet::insert), the hint is ignored.
	#[inline]
	pub fn insert_hint(&mut self, _hint: Position, value: T) -> (Position, bool) {
		self.insert_value(value)
	}
}

impl<T: Hash + Eq, S: BuildHasher, C: SlabMut<list::Node<T>>> HashMultiSet<T, S, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Insert a value right after its last occurrence, or at the end if it is new.
	#[inline]
	pub fn insert(&mut self, value: T) -> Position {
		self.insert_value(value).0
	}

	/// Same as [`insert`](HashMultiSet::insert), the hint is ignored.
	#[inline]
	pub fn insert_hint(&mut self, _hint: Position, value: T) -> Position {
		self.insert_value(value).0
	}
}
