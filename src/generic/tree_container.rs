//! Ordered container core.
//!
//! [`TreeContainer`] owns a [`List`] holding the elements in key order and a
//! [`TreeIndex`] over the list slots. The ordered maps and sets are aliases of
//! this type; their specific operations live in the `tree_map` and `tree_set`
//! modules.
use crate::{
	compare::{Compare, Natural},
	generic::{
		adapter::{Atomic, KeyOf, Pair, Policy, TreeIndex},
		list::{self, List, Position},
		tree,
	},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	fmt,
	iter::FromIterator,
	marker::PhantomData,
};

/// Ordered associative container over a red-black tree index.
///
/// - `T` is the element type, `X` extracts the key of an element
///   ([`Atomic`] for sets, [`Pair`] for maps).
/// - `U` is the key uniqueness policy ([`Unique`](crate::generic::Unique) or
///   [`Multi`](crate::generic::Multi)).
/// - `P` is the key comparator.
/// - `C` and `N` are the slab storages of the list nodes and tree nodes.
///
/// Elements with equivalent keys are stored next to each other, in insertion
/// order unless a hint placed them elsewhere in their range.
#[derive(Clone)]
pub struct TreeContainer<T, X, U, P, C, N> {
	pub(crate) list: List<T, C>,
	pub(crate) index: TreeIndex<T, X, P, N>,
	u: PhantomData<U>,
}

impl<T, X, U, C: Default, N: Default> TreeContainer<T, X, U, Natural, C, N> {
	/// Create a new empty container ordered by [`Ord`].
	#[inline]
	pub fn new() -> Self {
		TreeContainer::with_compare(Natural)
	}
}

impl<T, X, U, P, C, N> TreeContainer<T, X, U, P, C, N> {
	/// Create a new empty container ordered by the given comparator.
	#[inline]
	pub fn with_compare(compare: P) -> Self
	where
		C: Default,
		N: Default,
	{
		TreeContainer {
			list: List::new(),
			index: TreeIndex::new(compare),
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

	/// Position of the first element (in key order).
	#[inline]
	pub fn begin(&self) -> Position {
		self.list.begin()
	}

	/// The past-the-end position.
	#[inline]
	pub fn end(&self) -> Position {
		self.list.end()
	}

	#[inline]
	pub fn key_comp(&self) -> &P {
		self.index.key_comp()
	}

	/// Exchange the content of two containers.
	#[inline]
	pub fn swap(&mut self, other: &mut Self) {
		std::mem::swap(self, other)
	}
}

impl<T, X: KeyOf<T>, U, P, C: Slab<list::Node<T>>, N: Slab<tree::Node>> TreeContainer<T, X, U, P, C, N>
where
	C: SimpleCollectionRef,
	N: SimpleCollectionRef,
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

	/// Position of the first element whose key is equivalent to `key`,
	/// or `end()` if there is none.
	///
	/// The supplied key may be any borrowed form of the key type, but the
	/// comparator must order the borrowed form as it orders the key type.
	#[inline]
	pub fn find<Q: ?Sized>(&self, key: &Q) -> Position
	where
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		self.index.find(&self.list, key)
	}

	#[inline]
	pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
	where
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		!self.find(key).is_end()
	}

	/// Number of elements whose key is equivalent to `key`.
	pub fn count<Q: ?Sized>(&self, key: &Q) -> usize
	where
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		let (first, last) = self.equal_range(key);
		self.list.distance(first, last)
	}

	/// Position of the first element whose key is not ordered before `key`.
	#[inline]
	pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Position
	where
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		self.index.lower_bound(&self.list, key)
	}

	/// Position of the first element whose key is ordered after `key`.
	#[inline]
	pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Position
	where
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		self.index.upper_bound(&self.list, key)
	}

	/// Range `[lower_bound(key), upper_bound(key))` of the elements
	/// whose key is equivalent to `key`.
	#[inline]
	pub fn equal_range<Q: ?Sized>(&self, key: &Q) -> (Position, Position)
	where
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		self.index.equal_range(&self.list, key)
	}

	/// Element with the smallest key.
	#[inline]
	pub fn first(&self) -> Option<&T> {
		self.list.front()
	}

	/// Element with the greatest key.
	#[inline]
	pub fn last(&self) -> Option<&T> {
		self.list.back()
	}

	/// Iterate over the elements in key order.
	#[inline]
	pub fn iter(&self) -> list::Iter<T, C> {
		self.list.iter()
	}

	/// Iterate over the elements in `[first, last)`.
	#[inline]
	pub fn range(&self, first: Position, last: Position) -> list::Iter<T, C> {
		self.list.range(first, last)
	}

	/// Height of the red-black tree index.
	#[inline]
	pub fn height(&self) -> usize {
		self.index.engine().height()
	}

	/// Check the consistency of the container.
	///
	/// Panics if the tree is not a valid red-black tree, if it does not index
	/// the elements in list order or if keys are not sorted (or not unique
	/// for unique-key containers).
	pub fn validate(&self)
	where
		U: Policy,
		P: Compare<X::Key>,
	{
		self.index.validate(&self.list, U::UNIQUE)
	}
}

impl<T, X: KeyOf<T>, U, P, C: SlabMut<list::Node<T>>, N: SlabMut<tree::Node>>
	TreeContainer<T, X, U, P, C, N>
where
	P: Compare<X::Key>,
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
	N: SimpleCollectionRef,
	N: SimpleCollectionMut,
{
	/// Insert according to the uniqueness policy.
	///
	/// The returned flag is `false` only when a unique-key container already
	/// holds an element with the same key.
	pub(crate) fn insert_value(&mut self, value: T) -> (Position, bool)
	where
		U: Policy,
	{
		if U::UNIQUE {
			self.index.insert_unique(&mut self.list, value)
		} else {
			(self.index.insert_multi(&mut self.list, value), true)
		}
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

	/// Erase every element whose key is equivalent to `key`.
	///
	/// Returns the number of erased elements.
	pub fn erase<Q: ?Sized>(&mut self, key: &Q) -> usize
	where
		X::Key: Borrow<Q>,
		P: Compare<Q>,
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

	/// Remove the first element (smallest key).
	#[inline]
	pub fn pop_first(&mut self) -> Option<T> {
		let first = self.begin();
		self.take_at(first)
	}

	/// Remove the last element (greatest key).
	#[inline]
	pub fn pop_last(&mut self) -> Option<T> {
		let last = self.list.prev(self.end());
		self.take_at(last)
	}

	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
		N: cc_traits::Clear,
	{
		self.list.clear();
		self.index.clear()
	}

	/// Replace the content of the container with the given elements.
	pub fn assign<I: IntoIterator<Item = T>>(&mut self, iter: I)
	where
		C: cc_traits::Clear,
		N: cc_traits::Clear,
		U: Policy,
	{
		self.clear();
		for value in iter {
			self.insert_value(value);
		}
	}
}

impl<T, X, U, P: Default, C: Default, N: Default> Default for TreeContainer<T, X, U, P, C, N> {
	#[inline]
	fn default() -> Self {
		TreeContainer::with_compare(P::default())
	}
}

impl<K: fmt::Debug, V: fmt::Debug, U, P, C: Slab<list::Node<(K, V)>>, N> fmt::Debug
	for TreeContainer<(K, V), Pair, U, P, C, N>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_map()
			.entries(self.list.iter().map(|(key, value)| (key, value)))
			.finish()
	}
}

impl<T: fmt::Debug, U, P, C: Slab<list::Node<T>>, N> fmt::Debug for TreeContainer<T, Atomic, U, P, C, N>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.list.iter()).finish()
	}
}

impl<T: PartialEq, X, U, P, C: Slab<list::Node<T>>, N> PartialEq for TreeContainer<T, X, U, P, C, N>
where
	C: SimpleCollectionRef,
{
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.list.iter().eq(other.list.iter())
	}
}

impl<T: Eq, X, U, P, C: Slab<list::Node<T>>, N> Eq for TreeContainer<T, X, U, P, C, N> where
	C: SimpleCollectionRef
{
}

impl<T, X: KeyOf<T>, U: Policy, P, C: SlabMut<list::Node<T>>, N: SlabMut<tree::Node>> Extend<T>
	for TreeContainer<T, X, U, P, C, N>
where
	P: Compare<X::Key>,
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
	N: SimpleCollectionRef,
	N: SimpleCollectionMut,
{
	#[inline]
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.insert_value(value);
		}
	}
}

impl<T, X: KeyOf<T>, U: Policy, P, C: SlabMut<list::Node<T>>, N: SlabMut<tree::Node>> FromIterator<T>
	for TreeContainer<T, X, U, P, C, N>
where
	P: Compare<X::Key> + Default,
	C: SimpleCollectionRef + Default,
	C: SimpleCollectionMut,
	N: SimpleCollectionRef + Default,
	N: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut container = TreeContainer::default();
		container.extend(iter);
		container
	}
}

impl<'a, T, X, U, P, C: Slab<list::Node<T>>, N> IntoIterator for &'a TreeContainer<T, X, U, P, C, N>
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

impl<T, X, U, P, C: SlabMut<list::Node<T>>, N> IntoIterator for TreeContainer<T, X, U, P, C, N>
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
