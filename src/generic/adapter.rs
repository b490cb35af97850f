//! Key extraction and the indexes built on top of the engines.
//!
//! An index binds an engine to a key extractor ([`KeyOf`]):
//! [`Atomic`] for sets, where an element is its own key,
//! and [`Pair`] for maps, where only the first component of a `(key, value)`
//! pair is compared or hashed, leaving the mapped value free to mutate.
use crate::{
	compare::Compare,
	generic::{
		buckets::HashBuckets,
		list::{self, List, Position},
		tree::{self, RbTree},
	},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	cmp::Ordering,
	hash::{BuildHasher, Hash, Hasher},
	marker::PhantomData,
};

/// Key extraction from a stored element.
pub trait KeyOf<T> {
	type Key;

	fn key_of(value: &T) -> &Self::Key;
}

/// The element is the key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Atomic;

impl<T> KeyOf<T> for Atomic {
	type Key = T;

	#[inline]
	fn key_of(value: &T) -> &T {
		value
	}
}

/// The element is a `(key, value)` pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pair;

impl<K, V> KeyOf<(K, V)> for Pair {
	type Key = K;

	#[inline]
	fn key_of(value: &(K, V)) -> &K {
		&value.0
	}
}

/// Key uniqueness policy of a container.
pub trait Policy {
	/// Whether inserting an already present key is rejected.
	const UNIQUE: bool;
}

/// Each key appears at most once.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unique;

impl Policy for Unique {
	const UNIQUE: bool = true;
}

/// A key may appear several times.
#[derive(Clone, Copy, Debug, Default)]
pub struct Multi;

impl Policy for Multi {
	const UNIQUE: bool = false;
}

/// Red-black tree index of a list.
#[derive(Clone)]
pub struct TreeIndex<T, X, P, N> {
	tree: RbTree<N>,
	compare: P,
	t: PhantomData<T>,
	x: PhantomData<X>,
}

/// Tree index of a set.
pub type AtomicTree<T, P, N> = TreeIndex<T, Atomic, P, N>;

/// Tree index of a map.
pub type PairTree<K, V, P, N> = TreeIndex<(K, V), Pair, P, N>;

impl<T, X, P, N> TreeIndex<T, X, P, N> {
	#[inline]
	pub fn new(compare: P) -> Self
	where
		N: Default,
	{
		TreeIndex {
			tree: RbTree::new(),
			compare,
			t: PhantomData,
			x: PhantomData,
		}
	}

	#[inline]
	pub fn key_comp(&self) -> &P {
		&self.compare
	}

	/// Underlying engine.
	#[inline]
	pub fn engine(&self) -> &RbTree<N> {
		&self.tree
	}
}

impl<T, X: KeyOf<T>, P, N: Slab<tree::Node>> TreeIndex<T, X, P, N>
where
	N: SimpleCollectionRef,
{
	/// Position of the first element whose key is not ordered before `key`.
	pub fn lower_bound<C, Q: ?Sized>(&self, list: &List<T, C>, key: &Q) -> Position
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		let compare = &self.compare;
		let id = self
			.tree
			.lower_bound(|slot| compare.compare(key, X::key_of(list.value(slot)).borrow()));
		self.position(id)
	}

	/// Position of the first element whose key is ordered strictly after `key`.
	pub fn upper_bound<C, Q: ?Sized>(&self, list: &List<T, C>, key: &Q) -> Position
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		let compare = &self.compare;
		let id = self
			.tree
			.upper_bound(|slot| compare.compare(key, X::key_of(list.value(slot)).borrow()));
		self.position(id)
	}

	/// Positions delimiting the elements whose key is equivalent to `key`.
	pub fn equal_range<C, Q: ?Sized>(&self, list: &List<T, C>, key: &Q) -> (Position, Position)
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		(self.lower_bound(list, key), self.upper_bound(list, key))
	}

	/// Position of the first element whose key is equivalent to `key`.
	pub fn find<C, Q: ?Sized>(&self, list: &List<T, C>, key: &Q) -> Position
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
		X::Key: Borrow<Q>,
		P: Compare<Q>,
	{
		let pos = self.lower_bound(list, key);
		match list.get(pos) {
			Some(value) if self.compare.equals(key, X::key_of(value).borrow()) => pos,
			_ => Position::end(),
		}
	}

	#[inline]
	fn position(&self, id: Option<usize>) -> Position {
		id.map(|id| self.tree.node(id).value()).into()
	}

	/// Check that the tree is a valid red-black tree indexing every
	/// element of `list`, in list order.
	///
	/// Panics otherwise.
	pub fn validate<C>(&self, list: &List<T, C>, unique: bool)
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
		P: Compare<X::Key>,
	{
		self.tree.validate();
		assert_eq!(self.tree.len(), list.len(), "index and list sizes differ");

		let mut node = self.tree.first();
		let mut pos = list.begin();
		let mut previous: Option<&X::Key> = None;
		while let Some(id) = node {
			let slot = self.tree.node(id).value();
			assert_eq!(pos.slot(), Some(slot), "index order differs from list order");

			let key = X::key_of(list.value(slot));
			if let Some(previous) = previous {
				assert!(!self.compare.less(key, previous), "keys out of order");
				if unique {
					assert!(self.compare.less(previous, key), "duplicate key");
				}
			}

			previous = Some(key);
			node = self.tree.successor(id);
			pos = list.next(pos);
		}

		assert!(pos.is_end(), "unindexed list elements");
	}
}

impl<T, X: KeyOf<T>, P: Compare<X::Key>, N: SlabMut<tree::Node>> TreeIndex<T, X, P, N>
where
	N: SimpleCollectionRef,
	N: SimpleCollectionMut,
{
	/// Insert `value` in `list` and index it, unless its key is already present.
	///
	/// Returns the position of the element with the same key and `false`
	/// if the key was present.
	pub fn insert_unique<C>(&mut self, list: &mut List<T, C>, value: T) -> (Position, bool)
	where
		C: SlabMut<list::Node<T>> + SimpleCollectionRef + SimpleCollectionMut,
	{
		let pos = self.lower_bound(list, X::key_of(&value));
		if let Some(found) = list.get(pos) {
			if !self.compare.less(X::key_of(&value), X::key_of(found)) {
				return (pos, false);
			}
		}

		(self.link_before(list, pos, value, false), true)
	}

	/// Insert `value` in `list` after every element with an equivalent key, and index it.
	pub fn insert_multi<C>(&mut self, list: &mut List<T, C>, value: T) -> Position
	where
		C: SlabMut<list::Node<T>> + SimpleCollectionRef + SimpleCollectionMut,
	{
		let pos = self.upper_bound(list, X::key_of(&value));
		self.link_before(list, pos, value, true)
	}

	/// Insert `value` right before `hint` if this keeps the elements ordered
	/// (and keys unique), otherwise fall back to [`insert_unique`](TreeIndex::insert_unique).
	///
	/// Only the neighbors of `hint` are compared with the key, but the tree
	/// node of `hint` is still searched from the root.
	pub fn insert_hint_unique<C>(
		&mut self,
		list: &mut List<T, C>,
		hint: Position,
		value: T,
	) -> (Position, bool)
	where
		C: SlabMut<list::Node<T>> + SimpleCollectionRef + SimpleCollectionMut,
	{
		let key = X::key_of(&value);
		let after_prev = match list.get(list.prev(hint)) {
			Some(prev) => self.compare.less(X::key_of(prev), key),
			None => true,
		};
		let before_next = match list.get(hint) {
			Some(next) => self.compare.less(key, X::key_of(next)),
			None => true,
		};

		if after_prev && before_next {
			(self.link_at(list, hint, value), true)
		} else {
			self.insert_unique(list, value)
		}
	}

	/// Insert `value` right before `hint` if `hint` lies in the range of
	/// equivalent keys, or right after it, otherwise fall back to
	/// [`insert_multi`](TreeIndex::insert_multi).
	pub fn insert_hint_multi<C>(&mut self, list: &mut List<T, C>, hint: Position, value: T) -> Position
	where
		C: SlabMut<list::Node<T>> + SimpleCollectionRef + SimpleCollectionMut,
	{
		let key = X::key_of(&value);
		let after_prev = match list.get(list.prev(hint)) {
			Some(prev) => !self.compare.less(key, X::key_of(prev)),
			None => true,
		};
		let before_next = match list.get(hint) {
			Some(next) => !self.compare.less(X::key_of(next), key),
			None => true,
		};

		if after_prev && before_next {
			self.link_at(list, hint, value)
		} else {
			self.insert_multi(list, value)
		}
	}

	/// Insert `value` before `pos` in the list, and index the new slot at the
	/// same place in the tree, without comparing keys.
	fn link_at<C>(&mut self, list: &mut List<T, C>, pos: Position, value: T) -> Position
	where
		C: SlabMut<list::Node<T>> + SimpleCollectionRef + SimpleCollectionMut,
	{
		let next = pos.slot().map(|next| {
			let key = X::key_of(list.value(next));
			let compare = &self.compare;
			self.tree
				.locate(next, |other| compare.compare(key, X::key_of(list.value(other))))
				.expect("unindexed list slot")
		});

		let pos = list.insert(pos, value);
		let slot = pos.slot().expect("inserted element has a slot");
		self.tree.insert_before(slot, next);
		pos
	}

	/// Insert `value` before `pos` in the list, and index the new slot.
	fn link_before<C>(&mut self, list: &mut List<T, C>, pos: Position, value: T, after_equals: bool) -> Position
	where
		C: SlabMut<list::Node<T>> + SimpleCollectionRef + SimpleCollectionMut,
	{
		let pos = list.insert(pos, value);
		let slot = pos.slot().expect("inserted element has a slot");

		let list: &List<T, C> = list;
		let key = X::key_of(list.value(slot));
		let compare = &self.compare;
		self.tree.insert(slot, |other| {
			match compare.compare(key, X::key_of(list.value(other))) {
				Ordering::Equal if after_equals => Ordering::Greater,
				ordering => ordering,
			}
		});

		pos
	}

	/// Remove the element at `slot` from the index (it stays in the list).
	///
	/// Returns `false` if the slot was not indexed.
	pub fn erase_slot<C>(&mut self, list: &List<T, C>, slot: usize) -> bool
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
	{
		let key = X::key_of(list.value(slot));
		let compare = &self.compare;
		self.tree
			.erase_slot(slot, |other| compare.compare(key, X::key_of(list.value(other))))
	}

	#[inline]
	pub fn clear(&mut self)
	where
		N: cc_traits::Clear,
	{
		self.tree.clear()
	}
}

/// Hash a key with the given hasher builder.
#[inline]
pub fn make_hash<Q: Hash + ?Sized, S: BuildHasher>(hasher: &S, key: &Q) -> u64 {
	let mut state = hasher.build_hasher();
	key.hash(&mut state);
	state.finish()
}

/// Bucket table index of a list.
#[derive(Clone)]
pub struct HashIndex<T, X, S> {
	buckets: HashBuckets,
	hasher: S,
	t: PhantomData<T>,
	x: PhantomData<X>,
}

/// Hash index of a set.
pub type SetHashBuckets<T, S> = HashIndex<T, Atomic, S>;

/// Hash index of a map.
pub type MapHashBuckets<K, V, S> = HashIndex<(K, V), Pair, S>;

impl<T, X, S> HashIndex<T, X, S> {
	#[inline]
	pub fn new(hasher: S) -> Self {
		HashIndex {
			buckets: HashBuckets::new(),
			hasher,
			t: PhantomData,
			x: PhantomData,
		}
	}

	/// Create an index able to hold `capacity` elements without rehashing.
	#[inline]
	pub fn with_capacity(capacity: usize, hasher: S) -> Self {
		HashIndex {
			buckets: HashBuckets::with_capacity(capacity),
			hasher,
			t: PhantomData,
			x: PhantomData,
		}
	}

	#[inline]
	pub fn hasher(&self) -> &S {
		&self.hasher
	}

	/// Underlying engine.
	#[inline]
	pub fn engine(&self) -> &HashBuckets {
		&self.buckets
	}

	#[inline]
	pub fn clear(&mut self) {
		self.buckets.clear()
	}
}

impl<T, X: KeyOf<T>, S: BuildHasher> HashIndex<T, X, S>
where
	X::Key: Hash + Eq,
{
	/// Index of the bucket receiving `key`.
	#[inline]
	pub fn bucket<Q: ?Sized>(&self, key: &Q) -> usize
	where
		X::Key: Borrow<Q>,
		Q: Hash,
	{
		self.buckets.hash_index(make_hash(&self.hasher, key))
	}

	/// Slots of the elements whose key equals `key`, in insertion order.
	pub fn matches<'a, C, Q: ?Sized>(
		&'a self,
		list: &'a List<T, C>,
		key: &'a Q,
	) -> impl DoubleEndedIterator<Item = usize> + 'a
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
		X::Key: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.buckets
			.bucket_of(make_hash(&self.hasher, key))
			.iter()
			.copied()
			.filter(move |slot| X::key_of(list.value(*slot)).borrow() == key)
	}

	/// Position of the first inserted element whose key equals `key`.
	#[inline]
	pub fn find<C, Q: ?Sized>(&self, list: &List<T, C>, key: &Q) -> Position
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
		X::Key: Borrow<Q>,
		Q: Hash + Eq,
	{
		self.matches(list, key).next().into()
	}

	/// Positions delimiting the elements whose key equals `key`.
	///
	/// Elements with equal keys are contiguous in the list.
	pub fn equal_range<C, Q: ?Sized>(&self, list: &List<T, C>, key: &Q) -> (Position, Position)
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
		X::Key: Borrow<Q>,
		Q: Hash + Eq,
	{
		let mut matches = self.matches(list, key);
		match matches.next() {
			Some(first) => {
				let last = matches.next_back().unwrap_or(first);
				(Position::at(first), list.next(Position::at(last)))
			}
			None => (Position::end(), Position::end()),
		}
	}

	/// Index the element stored at `slot`.
	pub fn insert<C>(&mut self, list: &List<T, C>, slot: usize)
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
	{
		let hasher = &self.hasher;
		let hash = make_hash(hasher, X::key_of(list.value(slot)));
		self.buckets
			.insert(slot, hash, |other| make_hash(hasher, X::key_of(list.value(other))))
	}

	/// Remove the element at `slot` from the index (it stays in the list).
	#[inline]
	pub fn erase_slot<C>(&mut self, list: &List<T, C>, slot: usize) -> bool
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
	{
		let hash = make_hash(&self.hasher, X::key_of(list.value(slot)));
		self.buckets.erase(slot, hash)
	}

	/// Grow the table so that `items` elements fit at the target load factor.
	pub fn reserve<C>(&mut self, list: &List<T, C>, items: usize)
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
	{
		let hasher = &self.hasher;
		self.buckets
			.reserve(items, |slot| make_hash(hasher, X::key_of(list.value(slot))))
	}

	/// Set the number of buckets (never below what the current size requires).
	pub fn rehash<C>(&mut self, list: &List<T, C>, count: usize)
	where
		C: Slab<list::Node<T>> + SimpleCollectionRef,
	{
		let hasher = &self.hasher;
		self.buckets
			.rehash(count, |slot| make_hash(hasher, X::key_of(list.value(slot))))
	}
}
