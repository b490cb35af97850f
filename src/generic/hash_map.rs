//! Hashed maps.
use crate::{
	error::OutOfRange,
	generic::{
		adapter::{Multi, Pair, Unique},
		hash_container::HashContainer,
		iter::{Keys, Values, ValuesMut},
		list::{self, Position},
	},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	hash::{BuildHasher, Hash},
	ops::Index,
};

/// Hashed map with unique keys.
pub type HashMap<K, V, S, C> = HashContainer<(K, V), Pair, Unique, S, C>;

/// Hashed map where several entries may share the same key.
pub type HashMultiMap<K, V, S, C> = HashContainer<(K, V), Pair, Multi, S, C>;

impl<K: Hash + Eq, V, U, S: BuildHasher, C: Slab<list::Node<(K, V)>>> HashContainer<(K, V), Pair, U, S, C>
where
	C: SimpleCollectionRef,
{
	/// Returns a reference to the value of the first entry with the given key.
	#[inline]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.get_key_value(key).map(|(_, value)| value)
	}

	#[inline]
	pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.get_at(self.find(key)).map(|(key, value)| (key, value))
	}

	/// Checked access to the value of the given key.
	#[inline]
	pub fn at<Q: ?Sized>(&self, key: &Q) -> Result<&V, OutOfRange>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.get(key).ok_or(OutOfRange)
	}

	#[inline]
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.contains(key)
	}

	#[inline]
	pub fn keys(&self) -> Keys<K, V, C> {
		Keys {
			inner: self.list.iter(),
		}
	}

	#[inline]
	pub fn values(&self) -> Values<K, V, C> {
		Values {
			inner: self.list.iter(),
		}
	}
}

impl<K: Hash + Eq, V, U, S: BuildHasher, C: SlabMut<list::Node<(K, V)>>> HashContainer<(K, V), Pair, U, S, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		let pos = self.find(key);
		self.get_at_mut(pos)
	}

	#[inline]
	pub fn at_mut<Q: ?Sized>(&mut self, key: &Q) -> Result<&mut V, OutOfRange>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.get_mut(key).ok_or(OutOfRange)
	}

	/// Mutable reference to the value of the entry at the given position.
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

	/// Remove the first inserted entry with the given key and return its value.
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq,
	{
		let pos = self.find(key);
		self.take_at(pos).map(|(_, value)| value)
	}
}

impl<K: Hash + Eq, V, S: BuildHasher, C: SlabMut<list::Node<(K, V)>>> HashMap<K, V, S, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Insert an entry, unless the key is already present.
	///
	/// Returns the position of the entry with this key, and `true` if the
	/// entry was inserted. An existing entry is left untouched.
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::HashMap;
	///
	/// let mut map = HashMap::new();
	/// assert!(map.insert("a", 1).1);
	/// assert!(!map.insert("a", 2).1);
	/// assert_eq!(map["a"], 1);
	/// ```
	#[inline]
	pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
		self.insert_value((key, value))
	}

	/// Same as [`insert`](HashMap::insert): the placement of an entry only
	/// depends on its key, so the hint is ignored.
	#[inline]
	pub fn insert_hint(&mut self, _hint: Position, key: K, value: V) -> (Position, bool) {
		self.insert_value((key, value))
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
			None => self.insert_value((key, value)),
		}
	}

	/// Returns a mutable reference to the value of the given key,
	/// inserting `f()` first if the key is not present.
	pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &mut V
	where
		F: FnOnce() -> V,
	{
		let slot = match self.find(&key).slot() {
			Some(slot) => slot,
			None => {
				let (pos, _) = self.insert_value((key, f()));
				pos.slot().expect("inserted entry has a slot")
			}
		};

		&mut self.list.value_mut(slot).1
	}
}

impl<K: Hash + Eq, V, S: BuildHasher, C: SlabMut<list::Node<(K, V)>>> HashMultiMap<K, V, S, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Insert an entry right after the last entry with the same key,
	/// or at the end if the key is new.
	///
	/// # Example
	///
	/// ```
	/// use assoc_slab::HashMultiMap;
	///
	/// let mut map = HashMultiMap::new();
	/// map.insert(1, 'a');
	/// map.insert(2, 'x');
	/// map.insert(1, 'b');
	///
	/// let (first, last) = map.equal_range(&1);
	/// let ones: Vec<_> = map.range(first, last).map(|(_, c)| *c).collect();
	/// assert_eq!(ones, vec!['a', 'b']);
	/// ```
	#[inline]
	pub fn insert(&mut self, key: K, value: V) -> Position {
		self.insert_value((key, value)).0
	}

	/// Same as [`insert`](HashMultiMap::insert), the hint is ignored.
	#[inline]
	pub fn insert_hint(&mut self, _hint: Position, key: K, value: V) -> Position {
		self.insert_value((key, value)).0
	}
}

impl<K: Hash + Eq, V, U, S: BuildHasher, C: Slab<list::Node<(K, V)>>, Q: ?Sized> Index<&Q>
	for HashContainer<(K, V), Pair, U, S, C>
where
	K: Borrow<Q>,
	Q: Hash + Eq,
	C: SimpleCollectionRef,
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
