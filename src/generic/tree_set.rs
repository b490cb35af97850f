//! Ordered sets.
use crate::{
	compare::Compare,
	generic::{
		adapter::{Atomic, Multi, Unique},
		list::{self, Position},
		tree,
		tree_container::TreeContainer,
	},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, SlabMut};

/// Ordered set.
pub type TreeSet<T, P, C, N> = TreeContainer<T, Atomic, Unique, P, C, N>;

/// Ordered set where a value may appear several times.
pub type TreeMultiSet<T, P, C, N> = TreeContainer<T, Atomic, Multi, P, C, N>;

impl<T, P: Compare<T>, C: SlabMut<list::Node<T>>, N: SlabMut<tree::Node>> TreeSet<T, P, C, N>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
	N: SimpleCollectionRef,
	N: SimpleCollectionMut,
{
	/// Insert a value, unless an equivalent value is already present.
	///
	/// Returns the position of the value, and `true` if it was inserted.
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::TreeSet;
	///
	/// let mut set = TreeSet::new();
	/// assert!(set.insert(2).1);
	/// assert!(!set.insert(2).1);
	/// assert_eq!(set.len(), 1);
	/// ```
	#[inline]
	pub fn insert(&mut self, value: T) -> (Position, bool) {
		self.index.insert_unique(&mut self.list, value)
	}

	/// Insert a value, using `hint` as insertion point if it is the right one.
	#[inline]
	pub fn insert_hint(&mut self, hint: Position, value: T) -> (Position, bool) {
		self.index.insert_hint_unique(&mut self.list, hint, value)
	}
}

impl<T, P: Compare<T>, C: SlabMut<list::Node<T>>, N: SlabMut<tree::Node>> TreeMultiSet<T, P, C, N>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
	N: SimpleCollectionRef,
	N: SimpleCollectionMut,
{
	/// Insert a value after every equivalent value.
	#[inline]
	pub fn insert(&mut self, value: T) -> Position {
		self.index.insert_multi(&mut self.list, value)
	}

	/// Insert a value right before `hint` if this keeps the values ordered,
	/// otherwise after every equivalent value.
	#[inline]
	pub fn insert_hint(&mut self, hint: Position, value: T) -> Position {
		self.index.insert_hint_multi(&mut self.list, hint, value)
	}
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use crate::{TreeMultiSet, TreeSet};

	#[test]
	fn closure_comparator() {
		// order by length only: words of the same length are equivalent.
		let by_len = |a: &&str, b: &&str| a.len() < b.len();
		let mut set = TreeSet::with_compare(by_len);
		for word in ["ccc", "a", "bb", "dd", "e"] {
			set.insert(word);
		}

		set.validate();
		assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["a", "bb", "ccc"]);
		assert!(set.contains(&"zz"));
	}

	#[test]
	fn multiset_keeps_duplicates() {
		let mut set: TreeMultiSet<i32> = vec![3, 1, 3, 2, 3].into_iter().collect();
		set.insert(1);
		set.validate();

		assert_eq!(set.len(), 6);
		assert_eq!(set.count(&3), 3);
		assert_eq!(set.erase(&3), 3);
		assert_eq!(set.erase(&3), 0);
		assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 1, 2]);
		assert_eq!(format!("{:?}", set), "{1, 1, 2}");
	}

	#[test]
	fn pop_both_ends() {
		let mut set: TreeSet<i32> = (0..4).collect();
		assert_eq!(set.pop_first(), Some(0));
		assert_eq!(set.pop_last(), Some(3));
		set.validate();
		assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 2]);
	}

	#[test]
	fn multiset_hint() {
		let mut set: TreeMultiSet<i32> = vec![1, 2, 4].into_iter().collect();
		let two = set.find(&2);
		let four = set.find(&4);

		let pos = set.insert_hint(two, 2);
		assert_eq!(set.next(pos), two);
		let pos = set.insert_hint(four, 3);
		assert_eq!(set.next(pos), four);
		// wrong hint.
		let pos = set.insert_hint(four, 0);
		assert_eq!(pos, set.begin());

		set.validate();
		assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 2, 3, 4]);
	}
}
