//! Ordered maps.
use crate::{
	compare::Compare,
	error::OutOfRange,
	generic::{
		adapter::{Multi, Pair, Unique},
		iter::{Keys, Values, ValuesMut},
		list::{self, Position},
		tree,
		tree_container::TreeContainer,
	},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{borrow::Borrow, ops::Index};

/// Ordered map with unique keys.
pub type TreeMap<K, V, P, C, N> = TreeContainer<(K, V), Pair, Unique, P, C, N>;

/// Ordered map where several entries may share the same key.
pub type TreeMultiMap<K, V, P, C, N> = TreeContainer<(K, V), Pair, Multi, P, C, N>;

impl<K, V, U, P, C: Slab<list::Node<(K, V)>>, N: Slab<tree::Node>> TreeContainer<(K, V), Pair, U, P, C, N>
where
	C: SimpleCollectionRef,
	N: SimpleCollectionRef,
{
	/// Returns a reference to the value of the first entry with the given key.
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::TreeMap;
	///
	/// let mut map: TreeMap<i32, &str> = TreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.get(&1), Some(&"a"));
	/// assert_eq!(map.get(&2), None);
	/// ```
	#[inline]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		P: Compare<Q>,
	{
		self.get_key_value(key).map(|(_, value)| value)
	}

	#[inline]
	pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
	where
		K: Borrow<Q>,
		P: Compare<Q>,
	{
		self.get_at(self.find(key)).map(|(key, value)| (key, value))
	}

	/// Checked access to the value of the given key.
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::{OutOfRange, TreeMap};
	///
	/// let map: TreeMap<&str, i32> = vec![("one", 1)].into_iter().collect();
	/// assert_eq!(map.at("one"), Ok(&1));
	/// assert_eq!(map.at("two"), Err(OutOfRange));
	/// ```
	#[inline]
	pub fn at<Q: ?Sized>(&self, key: &Q) -> Result<&V, OutOfRange>
	where
		K: Borrow<Q>,
		P: Compare<Q>,
	{
		self.get(key).ok_or(OutOfRange)
	}

	#[inline]
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		P: Compare<Q>,
	{
		self.contains(key)
	}

	/// Iterate over the keys, in order.
	#[inline]
	pub fn keys(&self) -> Keys<K, V, C> {
		Keys {
			inner: self.list.iter(),
		}
	}

	/// Iterate over the values, in key order.
	#[inline]
	pub fn values(&self) -> Values<K, V, C> {
		Values {
			inner: self.list.iter(),
		}
	}
}

impl<K, V, U, P: Compare<K>, C: SlabMut<list::Node<(K, V)>>, N: SlabMut<tree::Node>>
	TreeContainer<(K, V), Pair, U, P, C, N>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
	N: SimpleCollectionRef,
	N: SimpleCollectionMut,
{
	#[inline]
	pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		P: Compare<Q>,
	{
		let pos = self.find(key);
		self.get_at_mut(pos)
	}

	#[inline]
	pub fn at_mut<Q: ?Sized>(&mut self, key: &Q) -> Result<&mut V, OutOfRange>
	where
		K: Borrow<Q>,
		P: Compare<Q>,
	{
		self.get_mut(key).ok_or(OutOfRange)
	}

	/// Mutable reference to the value of the entry at the given position.
	///
	/// Keys are never exposed mutably.
	#[inline]
	pub fn get_at_mut(&mut self, pos: Position) -> Option<&mut V> {
		self.list.get_mut(pos).map(|(_, value)| value)
	}

	#[inline]
	pub fn values_mut(&mut self) -> ValuesMut<K, V, C> {
		ValuesMut {
			inner: self.list.iter_mut(),
		}
	}

	/// Remove the first entry with the given key and return its value.
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		P: Compare<Q>,
	{
		let pos = self.find(key);
		self.take_at(pos).map(|(_, value)| value)
	}
}

impl<K, V, P: Compare<K>, C: SlabMut<list::Node<(K, V)>>, N: SlabMut<tree::Node>> TreeMap<K, V, P, C, N>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
	N: SimpleCollectionRef,
	N: SimpleCollectionMut,
{
	/// Insert an entry, unless the key is already present.
	///
	/// Returns the position of the entry with this key, and `true` if the
	/// entry was inserted. An existing entry is left untouched.
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::TreeMap;
	///
	/// let mut map = TreeMap::new();
	/// let (pos, inserted) = map.insert(37, "a");
	/// assert!(inserted);
	/// assert_eq!(map.insert(37, "b"), (pos, false));
	/// assert_eq!(map[&37], "a");
	/// ```
	#[inline]
	pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
		self.index.insert_unique(&mut self.list, (key, value))
	}

	/// Insert an entry, using `hint` as insertion point if it is the right one.
	///
	/// The key is compared against the neighbors of `hint` only; if the
	/// entry does not belong right before `hint`, this is the same as
	/// [`insert`](TreeMap::insert).
	/// Either way the index is searched, so a good hint saves comparisons
	/// but the cost stays logarithmic.
	#[inline]
	pub fn insert_hint(&mut self, hint: Position, key: K, value: V) -> (Position, bool) {
		self.index.insert_hint_unique(&mut self.list, hint, (key, value))
	}

	/// Insert an entry, or replace the value of the existing entry with the same key.
	///
	/// Returns the position of the entry and `true` if it is new.
	pub fn insert_or_assign(&mut self, key: K, value: V) -> (Position, bool) {
		let pos = self.find(&key);
		match self.list.get_mut(pos) {
			Some(entry) => {
				entry.1 = value;
				(pos, false)
			}
			None => self.index.insert_unique(&mut self.list, (key, value)),
		}
	}

	/// Returns a mutable reference to the value of the given key,
	/// inserting `f()` first if the key is not present.
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::TreeMap;
	///
	/// let mut counts: TreeMap<char, usize> = TreeMap::new();
	/// for c in "abracadabra".chars() {
	/// 	*counts.get_or_insert_with(c, || 0) += 1;
	/// }
	/// assert_eq!(counts[&'a'], 5);
	/// assert_eq!(counts.keys().collect::<String>(), "abcdr");
	/// ```
	pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &mut V
	where
		F: FnOnce() -> V,
	{
		let slot = match self.find(&key).slot() {
			Some(slot) => slot,
			None => {
				let (pos, _) = self.index.insert_unique(&mut self.list, (key, f()));
				pos.slot().expect("inserted entry has a slot")
			}
		};

		&mut self.list.value_mut(slot).1
	}
}

impl<K, V, P: Compare<K>, C: SlabMut<list::Node<(K, V)>>, N: SlabMut<tree::Node>> TreeMultiMap<K, V, P, C, N>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
	N: SimpleCollectionRef,
	N: SimpleCollectionMut,
{
	/// Insert an entry after every entry with an equivalent key.
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::TreeMultiMap;
	///
	/// let mut map = TreeMultiMap::new();
	/// map.insert(2, 'x');
	/// map.insert(1, 'a');
	/// map.insert(1, 'b');
	///
	/// let (first, last) = map.equal_range(&1);
	/// let ones: Vec<_> = map.range(first, last).map(|(_, c)| *c).collect();
	/// assert_eq!(ones, vec!['a', 'b']);
	/// ```
	#[inline]
	pub fn insert(&mut self, key: K, value: V) -> Position {
		self.index.insert_multi(&mut self.list, (key, value))
	}

	/// Insert an entry right before `hint` if `hint` is in the range of
	/// entries with an equivalent key, or right after this range.
	/// Otherwise this is the same as [`insert`](TreeMultiMap::insert).
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::TreeMultiMap;
	///
	/// let mut map = TreeMultiMap::new();
	/// let b = map.insert(1, 'b');
	/// map.insert_hint(b, 1, 'a');
	/// assert_eq!(map.values().collect::<String>(), "ab");
	/// ```
	#[inline]
	pub fn insert_hint(&mut self, hint: Position, key: K, value: V) -> Position {
		self.index.insert_hint_multi(&mut self.list, hint, (key, value))
	}
}

impl<K, V, U, P, C: Slab<list::Node<(K, V)>>, N: Slab<tree::Node>, Q: ?Sized> Index<&Q>
	for TreeContainer<(K, V), Pair, U, P, C, N>
where
	K: Borrow<Q>,
	P: Compare<Q>,
	C: SimpleCollectionRef,
	N: SimpleCollectionRef,
{
	type Output = V;

	/// Returns a reference to the value corresponding to the supplied key.
	///
	/// # Panics
	///
	/// Panics if the key is not present in the map.
	#[inline]
	fn index(&self, key: &Q) -> &V {
		self.get(key).expect("no entry found for key")
	}
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use crate::{compare::Reverse, OutOfRange, TreeMap, TreeMultiMap};

	#[test]
	fn values_are_mutable_in_place() {
		let mut map: TreeMap<&str, i32> = TreeMap::new();
		map.insert("b", 2);
		map.insert("a", 1);

		*map.get_mut("a").unwrap() += 10;
		for value in map.values_mut() {
			*value *= 2;
		}

		assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![22, 4]);
		assert_eq!(map.at_mut("c"), Err(OutOfRange));
		map.validate();
	}

	#[test]
	fn insert_or_assign_replaces_value() {
		let mut map: TreeMap<i32, &str> = TreeMap::new();
		let (pos, inserted) = map.insert_or_assign(1, "a");
		assert!(inserted);
		assert_eq!(map.insert_or_assign(1, "b"), (pos, false));
		assert_eq!(map.get(&1), Some(&"b"));
		assert_eq!(map.len(), 1);
	}

	#[test]
	fn hint_is_used_or_ignored() {
		let mut map: TreeMap<i32, ()> = TreeMap::new();
		let end = map.end();
		for key in 0..10 {
			// appending at the end is always the right place here.
			let (_, inserted) = map.insert_hint(end, key, ());
			assert!(inserted);
		}

		// wrong hint.
		let begin = map.begin();
		let (pos, inserted) = map.insert_hint(begin, 20, ());
		assert!(inserted);
		assert_eq!(map.get_at(pos), Some(&(20, ())));

		// duplicate.
		let (_, inserted) = map.insert_hint(begin, 5, ());
		assert!(!inserted);

		map.validate();
		assert_eq!(
			map.keys().copied().collect::<Vec<_>>(),
			vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 20]
		);
	}

	#[test]
	fn reverse_order() {
		let mut map = TreeMap::with_compare(Reverse);
		for key in 0..5 {
			map.insert(key, key * key);
		}

		map.validate();
		assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
		assert_eq!(map.first(), Some(&(4, 16)));
		assert_eq!(map.get_at(map.lower_bound(&2)), Some(&(2, 4)));
	}

	#[test]
	fn multimap_remove_takes_first() {
		let mut map = TreeMultiMap::new();
		map.insert(1, "a");
		map.insert(1, "b");
		map.insert(0, "z");

		assert_eq!(map.count(&1), 2);
		assert_eq!(map.remove(&1), Some("a"));
		assert_eq!(map.remove(&1), Some("b"));
		assert_eq!(map.remove(&1), None);
		map.validate();
		assert_eq!(format!("{:?}", map), "{0: \"z\"}");
	}

	#[test]
	fn multimap_hint_inside_equal_range() {
		let mut map = TreeMultiMap::new();
		for (key, value) in [(1, 'a'), (2, 'b'), (2, 'd'), (3, 'e')] {
			map.insert(key, value);
		}

		// inside the range of `2`.
		let d = map.next(map.find(&2));
		let c = map.insert_hint(d, 2, 'c');
		assert_eq!(map.next(c), d);

		// right after the range of `2`.
		let e = map.find(&3);
		map.insert_hint(e, 2, 'x');

		// outside of the range: falls back to the end of the range.
		let begin = map.begin();
		map.insert_hint(begin, 2, 'y');
		map.insert_hint(map.end(), 0, 'z');

		map.validate();
		assert_eq!(map.values().collect::<String>(), "zabcdxye");
	}
}
