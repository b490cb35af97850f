use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	fmt,
	iter::{DoubleEndedIterator, ExactSizeIterator, FromIterator, FusedIterator},
	marker::PhantomData,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Element slot of a [`List`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Node<T> {
	value: T,
	prev: Option<usize>,
	next: Option<usize>,
}

impl<T> Node<T> {
	#[inline]
	pub fn value(&self) -> &T {
		&self.value
	}

	#[inline]
	pub fn prev(&self) -> Option<usize> {
		self.prev
	}

	#[inline]
	pub fn next(&self) -> Option<usize> {
		self.next
	}
}

/// Element location in a list-backed container.
///
/// A position either designates an element through the identifier of its slot,
/// or is the past-the-end position returned by `end()`.
/// Positions are stable: inserting or erasing other elements does not
/// invalidate them. Using the position of an erased element is a logic error.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Position(Option<usize>);

impl Position {
	/// The past-the-end position.
	#[inline]
	pub fn end() -> Position {
		Position(None)
	}

	#[inline]
	pub(crate) fn at(slot: usize) -> Position {
		Position(Some(slot))
	}

	#[inline]
	pub fn is_end(&self) -> bool {
		self.0.is_none()
	}

	/// Identifier of the designated slot, or `None` for the past-the-end position.
	#[inline]
	pub fn slot(&self) -> Option<usize> {
		self.0
	}
}

impl From<Option<usize>> for Position {
	#[inline]
	fn from(slot: Option<usize>) -> Position {
		Position(slot)
	}
}

/// Doubly linked list whose nodes are allocated in a slab `C`.
///
/// This is the backing store of every associative container of the crate:
/// elements live here, and the index structures only refer to slot identifiers.
#[derive(Clone)]
pub struct List<T, C> {
	/// Allocated and free nodes.
	nodes: C,

	head: Option<usize>,

	tail: Option<usize>,

	/// Number of elements in the list.
	len: usize,

	t: PhantomData<T>,
}

impl<T, C> List<T, C> {
	/// Create a new empty list.
	#[inline]
	pub fn new() -> List<T, C>
	where
		C: Default,
	{
		List {
			nodes: Default::default(),
			head: None,
			tail: None,
			len: 0,
			t: PhantomData,
		}
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Position of the first element, or `end()` if the list is empty.
	#[inline]
	pub fn begin(&self) -> Position {
		Position(self.head)
	}

	#[inline]
	pub fn end(&self) -> Position {
		Position::end()
	}
}

impl<T, C: Default> Default for List<T, C> {
	fn default() -> Self {
		List::new()
	}
}

impl<T, C: Slab<Node<T>>> List<T, C>
where
	C: SimpleCollectionRef,
{
	/// Get the node at the given slot.
	///
	/// Panics if the slot is vacant.
	#[inline]
	pub fn node(&self, slot: usize) -> &Node<T> {
		C::into_ref(self.nodes.get(slot).expect("vacant list slot"))
	}

	/// Value stored at the given slot.
	///
	/// Panics if the slot is vacant.
	#[inline]
	pub fn value(&self, slot: usize) -> &T {
		&self.node(slot).value
	}

	#[inline]
	pub fn get(&self, pos: Position) -> Option<&T> {
		pos.0.map(|slot| self.value(slot))
	}

	#[inline]
	pub fn front(&self) -> Option<&T> {
		self.head.map(|slot| self.value(slot))
	}

	#[inline]
	pub fn back(&self) -> Option<&T> {
		self.tail.map(|slot| self.value(slot))
	}

	/// Position following `pos`.
	///
	/// The position following the last element is `end()`,
	/// and `end()` is its own successor.
	#[inline]
	pub fn next(&self, pos: Position) -> Position {
		match pos.0 {
			Some(slot) => Position(self.node(slot).next),
			None => Position::end(),
		}
	}

	/// Position preceding `pos`.
	///
	/// The position preceding `end()` is the last element.
	/// The position preceding the first element is `end()`.
	#[inline]
	pub fn prev(&self, pos: Position) -> Position {
		match pos.0 {
			Some(slot) => Position(self.node(slot).prev),
			None => Position(self.tail),
		}
	}

	/// Number of elements in `[first, last)`.
	pub fn distance(&self, first: Position, last: Position) -> usize {
		let mut n = 0;
		let mut pos = first;
		while pos != last && !pos.is_end() {
			n += 1;
			pos = self.next(pos);
		}
		n
	}

	#[inline]
	pub fn iter(&self) -> Iter<T, C> {
		Iter {
			list: self,
			front: self.head,
			back: self.tail,
			len: self.len,
		}
	}

	/// Iterate over the elements in `[first, last)`.
	#[inline]
	pub fn range(&self, first: Position, last: Position) -> Iter<T, C> {
		let len = self.distance(first, last);
		let back = if len == 0 { None } else { self.prev(last).0 };
		Iter {
			list: self,
			front: first.0,
			back,
			len,
		}
	}
}

impl<T, C: SlabMut<Node<T>>> List<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
		C::into_mut(self.nodes.get_mut(slot).expect("vacant list slot"))
	}

	#[inline]
	pub fn value_mut(&mut self, slot: usize) -> &mut T {
		&mut self.node_mut(slot).value
	}

	#[inline]
	pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
		match pos.0 {
			Some(slot) => Some(self.value_mut(slot)),
			None => None,
		}
	}

	/// Insert `value` before `pos` and return its position.
	pub fn insert(&mut self, pos: Position, value: T) -> Position {
		let prev = match pos.0 {
			Some(slot) => self.node(slot).prev,
			None => self.tail,
		};

		let slot = self.nodes.insert(Node {
			value,
			prev,
			next: pos.0,
		});

		match prev {
			Some(prev) => self.node_mut(prev).next = Some(slot),
			None => self.head = Some(slot),
		}

		match pos.0 {
			Some(next) => self.node_mut(next).prev = Some(slot),
			None => self.tail = Some(slot),
		}

		self.len += 1;
		Position(Some(slot))
	}

	#[inline]
	pub fn push_back(&mut self, value: T) -> Position {
		self.insert(Position::end(), value)
	}

	#[inline]
	pub fn push_front(&mut self, value: T) -> Position {
		let head = self.begin();
		self.insert(head, value)
	}

	/// Unlink and return the element at `pos`, along with the position that followed it.
	///
	/// Returns `None` if `pos` is `end()`.
	pub fn erase(&mut self, pos: Position) -> Option<(T, Position)> {
		let slot = pos.0?;
		let node = self.nodes.remove(slot).expect("vacant list slot");

		match node.prev {
			Some(prev) => self.node_mut(prev).next = node.next,
			None => self.head = node.next,
		}

		match node.next {
			Some(next) => self.node_mut(next).prev = node.prev,
			None => self.tail = node.prev,
		}

		self.len -= 1;
		Some((node.value, Position(node.next)))
	}

	#[inline]
	pub fn pop_front(&mut self) -> Option<T> {
		let head = self.begin();
		self.erase(head).map(|(value, _)| value)
	}

	#[inline]
	pub fn pop_back(&mut self) -> Option<T> {
		let tail = Position(self.tail);
		self.erase(tail).map(|(value, _)| value)
	}

	#[inline]
	pub fn iter_mut(&mut self) -> IterMut<T, C> {
		IterMut {
			front: self.head,
			len: self.len,
			list: self,
		}
	}

	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		self.head = None;
		self.tail = None;
		self.len = 0;
		self.nodes.clear()
	}
}

impl<T: fmt::Debug, C: Slab<Node<T>>> fmt::Debug for List<T, C>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T, C: SlabMut<Node<T>> + Default> FromIterator<T> for List<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut list = List::new();
		for value in iter {
			list.push_back(value);
		}
		list
	}
}

pub struct Iter<'a, T, C> {
	list: &'a List<T, C>,

	/// Next slot from the front.
	front: Option<usize>,

	/// Next slot from the back.
	back: Option<usize>,

	/// Number of remaining elements.
	len: usize,
}

impl<'a, T, C: Slab<Node<T>>> Iterator for Iter<'a, T, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		if self.len == 0 {
			return None;
		}

		let node = self.list.node(self.front?);
		self.len -= 1;
		self.front = node.next;
		Some(&node.value)
	}
}

impl<'a, T, C: Slab<Node<T>>> DoubleEndedIterator for Iter<'a, T, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a T> {
		if self.len == 0 {
			return None;
		}

		let node = self.list.node(self.back?);
		self.len -= 1;
		self.back = node.prev;
		Some(&node.value)
	}
}

impl<'a, T, C: Slab<Node<T>>> FusedIterator for Iter<'a, T, C> where C: SimpleCollectionRef {}
impl<'a, T, C: Slab<Node<T>>> ExactSizeIterator for Iter<'a, T, C> where C: SimpleCollectionRef {}

impl<'a, T, C> Clone for Iter<'a, T, C> {
	fn clone(&self) -> Self {
		Iter {
			list: self.list,
			front: self.front,
			back: self.back,
			len: self.len,
		}
	}
}

impl<'a, T, C: Slab<Node<T>>> IntoIterator for &'a List<T, C>
where
	C: SimpleCollectionRef,
{
	type IntoIter = Iter<'a, T, C>;
	type Item = &'a T;

	#[inline]
	fn into_iter(self) -> Iter<'a, T, C> {
		self.iter()
	}
}

pub struct IterMut<'a, T, C> {
	list: &'a mut List<T, C>,
	front: Option<usize>,
	len: usize,
}

impl<'a, T, C: SlabMut<Node<T>>> Iterator for IterMut<'a, T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = &'a mut T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<&'a mut T> {
		if self.len == 0 {
			return None;
		}

		let slot = self.front?;
		let node = self.list.node_mut(slot);
		self.front = node.next;
		self.len -= 1;
		let value: *mut T = &mut node.value;
		Some(unsafe { &mut *value }) // this is safe because each slot is visited only once.
	}
}

impl<'a, T, C: SlabMut<Node<T>>> FusedIterator for IterMut<'a, T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

/// Owning iterator over the elements of a [`List`].
pub struct IntoIter<T, C> {
	list: List<T, C>,
}

impl<T, C: SlabMut<Node<T>>> Iterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.list.len, Some(self.list.len))
	}

	#[inline]
	fn next(&mut self) -> Option<T> {
		self.list.pop_front()
	}
}

impl<T, C: SlabMut<Node<T>>> DoubleEndedIterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<T> {
		self.list.pop_back()
	}
}

impl<T, C: SlabMut<Node<T>>> FusedIterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<T, C: SlabMut<Node<T>>> ExactSizeIterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<T, C: SlabMut<Node<T>>> IntoIterator for List<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type IntoIter = IntoIter<T, C>;
	type Item = T;

	#[inline]
	fn into_iter(self) -> IntoIter<T, C> {
		IntoIter { list: self }
	}
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use super::*;
	use slab::Slab as StdSlab;

	type TestList = List<i32, StdSlab<Node<i32>>>;

	#[test]
	fn insert_and_erase_keep_links() {
		let mut list = TestList::new();
		let b = list.push_back(2);
		list.push_front(0);
		list.insert(b, 1);
		list.push_back(3);
		assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
		assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1, 0]);

		let (value, next) = list.erase(b).unwrap();
		assert_eq!(value, 2);
		assert_eq!(list.get(next), Some(&3));
		assert_eq!(list.len(), 3);
		assert_eq!(list.erase(list.end()), None);
	}

	#[test]
	fn navigation_around_end() {
		let list: TestList = (0..3).collect();
		let last = list.prev(list.end());
		assert_eq!(list.get(last), Some(&2));
		assert_eq!(list.next(last), list.end());
		assert_eq!(list.prev(list.begin()), list.end());
		assert_eq!(list.distance(list.begin(), list.end()), 3);

		let second = list.next(list.begin());
		let middle: Vec<_> = list.range(second, list.end()).copied().collect();
		assert_eq!(middle, vec![1, 2]);
		assert_eq!(list.range(second, second).count(), 0);
	}

	#[test]
	fn owning_iteration() {
		let mut list: TestList = (0..5).collect();
		for v in list.iter_mut() {
			*v *= 10;
		}
		let mut it = list.into_iter();
		assert_eq!(it.next_back(), Some(40));
		assert_eq!(it.collect::<Vec<_>>(), vec![0, 10, 20, 30]);
	}
}
