//! Hashed container core.
//!
//! [`HashContainer`] owns a [`List`] holding the elements and a [`HashIndex`]
//! over the list slots. The hashed maps and sets are aliases of this type;
//! their specific operations live in the `hash_map` and `hash_set` modules.
use crate::{
	generic::{
		adapter::{Atomic, HashIndex, KeyOf, Pair, Policy},
		buckets::MAX_RATIO,
		list::{self, List, Position},
	},
	hash::FnvBuildHasher,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	fmt,
	hash::{BuildHasher, Hash},
	iter::FromIterator,
	marker::PhantomData,
};

/// Hashed associative container over a bucket table index.
///
/// - `T` is the element type, `X` extracts the key of an element
///   ([`Atomic`] for sets, [`Pair`] for maps).
/// - `U` is the key uniqueness policy ([`Unique`](crate::generic::Unique) or
///   [`Multi`](crate::generic::Multi)).
/// - `S` builds the key hasher.
/// - `C` is the slab storage of the list nodes.
///
/// Elements are not ordered, except that elements with equal keys are stored
/// next to each other, in insertion order.
#[derive(Clone)]
pub struct HashContainer<T, X, U, S, C> {
	pub(crate) list: List<T, C>,
	pub(crate) index: HashIndex<T, X, S>,
	u: PhantomData<U>,
}

impl<T, X, U, C: Default> HashContainer<T, X, U, FnvBuildHasher, C> {
	/// Create a new empty container using the FNV-1a hash function.
	#[inline]
	pub fn new() -> Self {
		HashContainer::with_hasher(FnvBuildHasher::default())
	}

	/// Create a new empty container able to hold `capacity` elements
	/// without rehashing.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		HashContainer::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
	}
}

impl<T, X, U, S, C> HashContainer<T, X, U, S, C> {
	#[inline]
	pub fn with_hasher(hasher: S) -> Self
	where
		C: Default,
	{
		HashContainer {
			list: List::new(),
			index: HashIndex::new(hasher),
			u: PhantomData,
		}
	}

	#[inline]
	pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self
	where
		C: Default,
	{
		HashContainer {
			list: List::new(),
			index: HashIndex::with_capacity(capacity, hasher),
			u: PhantomData,
		}
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.list.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.list.is_empty()
	}

	#[inline]
	pub fn begin(&self) -> Position {
		self.list.begin()
	}

	#[inline]
	pub fn end(&self) -> Position {
		self.list.end()
	}

	#[inline]
	pub fn hasher(&self) -> &S {
		self.index.hasher()
	}

	#[inline]
	pub fn bucket_count(&self) -> usize {
		self.index.engine().bucket_count()
	}

	/// Number of elements in the bucket at the given index.
	///
	/// Panics if `index` is not less than [`bucket_count`](HashContainer::bucket_count).
	#[inline]
	pub fn bucket_size(&self, index: usize) -> usize {
		self.index.engine().bucket_size(index)
	}

	/// Average number of elements per bucket.
	#[inline]
	pub fn load_factor(&self) -> f64 {
		self.index.engine().load_factor()
	}

	/// Load factor above which the table grows.
	#[inline]
	pub fn max_load_factor(&self) -> f64 {
		MAX_RATIO
	}

	/// Exchange the content of two containers.
	#[inline]
	pub fn swap(&mut self, other: &mut Self) {
		std::mem::swap(self, other)
	}
}

impl<T, X: KeyOf<T>, U, S: BuildHasher, C: Slab<list::Node<T>>> HashContainer<T, X, U, S, C>
where
	X::Key: Hash + Eq,
	C: SimpleCollectionRef,
{
	#[inline]
	pub fn next(&self, pos: Position) -> Position {
		self.list.next(pos)
	}

	#[inline]
	pub fn prev(&self, pos: Position) -> Position {
		self.list.prev(pos)
	}

	/// Element at the given position, or `None` for `end()`.
	#[inline]
	pub fn get_at(&self, pos: Position) -> Option<&T> {
		self.list.get(pos)
	}

	/// Index of the bucket where elements with the given key are stored.
	#[inline]
	pub fn bucket<Q: ?Sized>(&self, key: &Q) -> usize
	where
		X::Key: Borrow<Q>,
		Q: Hash,
	{
		self.index.bucket(key)
	}

	/// Iterate over the elements of the bucket at the given index,
	/// in insertion order.
	///
	/// Panics if `index` is not less than [`bucket_count`](HashContainer::bucket_count).
	#[inline]
	pub fn bucket_iter(&self, index: usize) -> impl Iterator<Item = &T> + '_ {
		self.index
			.engine()
			.bucket(index)
			.iter()
			.map(move |slot| self.list.value(*slot))
	}

	/// Position of the first inserted element whose key equals `key`,
	/// or `end()` if there is none.
	///
	/// The supplied key may be any borrowed form of the key type, but
	/// [`Hash`] and [`Eq`] on the borrowed form must match those of the key type.
	#[inline]
	pub fn find<Q: ?Sized>(&self, key: &Q) -> Position
	where
		X::Key: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.index.find(&self.list, key)
	}

	#[inline]
	pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
	where
		X::Key: Borrow<Q>,
		Q: Hash + Eq,
	{
		!self.find(key).is_end()
	}

	/// Number of elements whose key equals `key`.
	#[inline]
	pub fn count<Q: ?Sized>(&self, key: &Q) -> usize
	where
		X::Key: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.index.matches(&self.list, key).count()
	}

	/// Range of the elements whose key equals `key`.
	#[inline]
	pub fn equal_range<Q: ?Sized>(&self, key: &Q) -> (Position, Position)
	where
		X::Key: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.index.equal_range(&self.list, key)
	}

	#[inline]
	pub fn iter(&self) -> list::Iter<T, C> {
		self.list.iter()
	}

	/// Iterate over the elements in `[first, last)`.
	#[inline]
	pub fn range(&self, first: Position, last: Position) -> list::Iter<T, C> {
		self.list.range(first, last)
	}

	/// Check the consistency of the container.
	///
	/// Panics if an element is not found in the bucket of its hash,
	/// if the load factor bound is exceeded, if elements with equal keys are not
	/// contiguous, or if a unique-key container holds duplicate keys.
	pub fn validate(&self)
	where
		U: Policy,
	{
		let buckets = self.index.engine();
		assert_eq!(buckets.len(), self.list.len(), "index and list sizes differ");
		assert!(self.load_factor() <= MAX_RATIO, "load factor exceeded");

		let mut pos = self.begin();
		while let Some(value) = self.get_at(pos) {
			let key = X::key_of(value);
			let slot = pos.slot().expect("valid position");
			assert!(
				buckets.bucket(self.bucket(key)).contains(&slot),
				"element missing from its bucket"
			);

			let (first, last) = self.equal_range(key);
			assert_eq!(first, pos, "equal keys are not contiguous");
			let group = self.list.distance(first, last);
			assert_eq!(group, self.count(key), "equal keys are not contiguous");
			if U::UNIQUE {
				assert_eq!(group, 1, "duplicate key");
			}

			pos = last;
		}
	}
}

impl<T, X: KeyOf<T>, U, S: BuildHasher, C: SlabMut<list::Node<T>>> HashContainer<T, X, U, S, C>
where
	X::Key: Hash + Eq,
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Insert according to the uniqueness policy.
	///
	/// A new key is appended at the end of the list; a key already present is
	/// inserted right after its last occurrence.
	/// The returned flag is `false` only when a unique-key container already
	/// holds an element with the same key.
	pub(crate) fn insert_value(&mut self, value: T) -> (Position, bool)
	where
		U: Policy,
	{
		let last = self.index.matches(&self.list, X::key_of(&value)).next_back();
		let pos = match last {
			Some(slot) if U::UNIQUE => return (Position::at(slot), false),
			Some(slot) => {
				let next = self.list.next(Position::at(slot));
				self.list.insert(next, value)
			}
			None => self.list.push_back(value),
		};

		let slot = pos.slot().expect("inserted element has a slot");
		self.index.insert(&self.list, slot);
		(pos, true)
	}

	fn unlink(&mut self, pos: Position) -> Option<(T, Position)> {
		let slot = pos.slot()?;
		self.index.erase_slot(&self.list, slot);
		self.list.erase(pos)
	}

	/// Erase the element at `pos`, and return the position that followed it.
	///
	/// Erasing `end()` does nothing and returns `end()`.
	#[inline]
	pub fn erase_at(&mut self, pos: Position) -> Position {
		match self.unlink(pos) {
			Some((_, next)) => next,
			None => Position::end(),
		}
	}

	/// Remove the element at `pos` and return it.
	#[inline]
	pub fn take_at(&mut self, pos: Position) -> Option<T> {
		self.unlink(pos).map(|(value, _)| value)
	}

	/// Erase the elements in `[first, last)` and return `last`.
	pub fn erase_range(&mut self, mut first: Position, last: Position) -> Position {
		while first != last && !first.is_end() {
			first = self.erase_at(first)
		}

		first
	}

	/// Erase every element whose key equals `key`.
	///
	/// Returns the number of erased elements.
	pub fn erase<Q: ?Sized>(&mut self, key: &Q) -> usize
	where
		X::Key: Borrow<Q>,
		Q: Hash + Eq,
	{
		let (first, last) = self.equal_range(key);
		let count = self.list.distance(first, last);
		self.erase_range(first, last);
		count
	}

	/// Move the elements of `source` into this container.
	///
	/// With unique keys, the elements whose key is already present are left
	/// in `source`. With multiple keys, `source` ends up empty.
	pub fn merge(&mut self, source: &mut Self)
	where
		U: Policy,
	{
		let mut pos = source.begin();
		while let Some(value) = source.get_at(pos) {
			let next = source.next(pos);
			if !U::UNIQUE || !self.contains(X::key_of(value)) {
				if let Some(value) = source.take_at(pos) {
					self.insert_value(value);
				}
			}

			pos = next;
		}
	}

	/// Grow the bucket table so that `additional` more elements can be
	/// inserted without rehashing.
	#[inline]
	pub fn reserve(&mut self, additional: usize) {
		let items = self.list.len() + additional;
		self.index.reserve(&self.list, items)
	}

	/// Set the number of buckets to at least `count`.
	///
	/// The table may shrink, but never below what its current size requires.
	#[inline]
	pub fn rehash(&mut self, count: usize) {
		self.index.rehash(&self.list, count)
	}

	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		self.list.clear();
		self.index.clear()
	}

	/// Replace the content of the container with the given elements.
	pub fn assign<I: IntoIterator<Item = T>>(&mut self, iter: I)
	where
		C: cc_traits::Clear,
		U: Policy,
	{
		self.clear();
		self.extend(iter)
	}
}

impl<T, X, U, S: Default, C: Default> Default for HashContainer<T, X, U, S, C> {
	#[inline]
	fn default() -> Self {
		HashContainer::with_hasher(S::default())
	}
}

impl<K: fmt::Debug, V: fmt::Debug, U, S, C: Slab<list::Node<(K, V)>>> fmt::Debug
	for HashContainer<(K, V), Pair, U, S, C>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_map()
			.entries(self.list.iter().map(|(key, value)| (key, value)))
			.finish()
	}
}

impl<T: fmt::Debug, U, S, C: Slab<list::Node<T>>> fmt::Debug for HashContainer<T, Atomic, U, S, C>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.list.iter()).finish()
	}
}

/// Whether `a` and `b` hold the same elements, in any order.
fn is_permutation<T: PartialEq>(a: &[&T], b: &[&T]) -> bool {
	a.len() == b.len()
		&& a.iter().all(|x| {
			let in_a = a.iter().filter(|y| x == *y).count();
			let in_b = b.iter().filter(|y| x == *y).count();
			in_a == in_b
		})
}

/// Two hashed containers are equal when they hold the same elements,
/// whatever their order.
impl<T: PartialEq, X: KeyOf<T>, U, S: BuildHasher, C: Slab<list::Node<T>>> PartialEq
	for HashContainer<T, X, U, S, C>
where
	X::Key: Hash + Eq,
	C: SimpleCollectionRef,
{
	fn eq(&self, other: &Self) -> bool {
		if self.len() != other.len() {
			return false;
		}

		let mut pos = self.begin();
		while let Some(value) = self.get_at(pos) {
			let key = X::key_of(value);
			let (first, last) = self.equal_range(key);
			let (other_first, other_last) = other.equal_range(key);

			let group: Vec<&T> = self.range(first, last).collect();
			let other_group: Vec<&T> = other.range(other_first, other_last).collect();
			if !is_permutation(&group, &other_group) {
				return false;
			}

			pos = last;
		}

		true
	}
}

impl<T: Eq, X: KeyOf<T>, U, S: BuildHasher, C: Slab<list::Node<T>>> Eq for HashContainer<T, X, U, S, C>
where
	X::Key: Hash + Eq,
	C: SimpleCollectionRef,
{
}

impl<T, X: KeyOf<T>, U: Policy, S: BuildHasher, C: SlabMut<list::Node<T>>> Extend<T>
	for HashContainer<T, X, U, S, C>
where
	X::Key: Hash + Eq,
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		let iter = iter.into_iter();
		self.reserve(iter.size_hint().0);
		for value in iter {
			self.insert_value(value);
		}
	}
}

impl<T, X: KeyOf<T>, U: Policy, S: BuildHasher + Default, C: SlabMut<list::Node<T>>> FromIterator<T>
	for HashContainer<T, X, U, S, C>
where
	X::Key: Hash + Eq,
	C: SimpleCollectionRef + Default,
	C: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut container = HashContainer::default();
		container.extend(iter);
		container
	}
}

impl<'a, T, X, U, S, C: Slab<list::Node<T>>> IntoIterator for &'a HashContainer<T, X, U, S, C>
where
	C: SimpleCollectionRef,
{
	type IntoIter = list::Iter<'a, T, C>;
	type Item = &'a T;

	#[inline]
	fn into_iter(self) -> list::Iter<'a, T, C> {
		self.list.iter()
	}
}

impl<T, X, U, S, C: SlabMut<list::Node<T>>> IntoIterator for HashContainer<T, X, U, S, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type IntoIter = list::IntoIter<T, C>;
	type Item = T;

	#[inline]
	fn into_iter(self) -> list::IntoIter<T, C> {
		self.list.into_iter()
	}
}
