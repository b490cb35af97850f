//! Iterators over the keys and values of map containers.
use crate::generic::list::{self, Node};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::iter::{DoubleEndedIterator, ExactSizeIterator, FusedIterator};

pub struct Keys<'a, K, V, C> {
	pub(crate) inner: list::Iter<'a, (K, V), C>,
}

impl<'a, K, V, C: Slab<Node<(K, V)>>> Iterator for Keys<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a K;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a K> {
		self.inner.next().map(|(key, _)| key)
	}
}

impl<'a, K, V, C: Slab<Node<(K, V)>>> DoubleEndedIterator for Keys<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a K> {
		self.inner.next_back().map(|(key, _)| key)
	}
}

impl<'a, K, V, C: Slab<Node<(K, V)>>> FusedIterator for Keys<'a, K, V, C> where C: SimpleCollectionRef {}
impl<'a, K, V, C: Slab<Node<(K, V)>>> ExactSizeIterator for Keys<'a, K, V, C> where C: SimpleCollectionRef {}

pub struct Values<'a, K, V, C> {
	pub(crate) inner: list::Iter<'a, (K, V), C>,
}

impl<'a, K, V, C: Slab<Node<(K, V)>>> Iterator for Values<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a V> {
		self.inner.next().map(|(_, value)| value)
	}
}

impl<'a, K, V, C: Slab<Node<(K, V)>>> DoubleEndedIterator for Values<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a V> {
		self.inner.next_back().map(|(_, value)| value)
	}
}

impl<'a, K, V, C: Slab<Node<(K, V)>>> FusedIterator for Values<'a, K, V, C> where C: SimpleCollectionRef {}
impl<'a, K, V, C: Slab<Node<(K, V)>>> ExactSizeIterator for Values<'a, K, V, C> where C: SimpleCollectionRef {}

/// Mutable iterator over the values of a map.
///
/// Keys stay immutable: changing them would corrupt the index.
pub struct ValuesMut<'a, K, V, C> {
	pub(crate) inner: list::IterMut<'a, (K, V), C>,
}

impl<'a, K, V, C: SlabMut<Node<(K, V)>>> Iterator for ValuesMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = &'a mut V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a mut V> {
		self.inner.next().map(|(_, value)| value)
	}
}

impl<'a, K, V, C: SlabMut<Node<(K, V)>>> FusedIterator for ValuesMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
