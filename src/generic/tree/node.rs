#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Color {
	Red,
	Black,
}

/// Red-black tree node.
///
/// The node does not hold the element itself but the identifier of the list
/// slot where the element is stored.
/// Children are referred to by node identifiers; `parent` is a back-reference.
/// Sibling, uncle and grand parent are computed by the tree, never stored.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Node {
	value: usize,
	color: Color,
	parent: Option<usize>,
	left: Option<usize>,
	right: Option<usize>,
}

impl Node {
	/// Create a new red leaf.
	#[inline]
	pub fn new(value: usize, parent: Option<usize>) -> Node {
		Node {
			value,
			color: Color::Red,
			parent,
			left: None,
			right: None,
		}
	}

	/// List slot referenced by this node.
	#[inline]
	pub fn value(&self) -> usize {
		self.value
	}

	#[inline]
	pub fn set_value(&mut self, value: usize) {
		self.value = value
	}

	#[inline]
	pub fn color(&self) -> Color {
		self.color
	}

	#[inline]
	pub fn set_color(&mut self, color: Color) {
		self.color = color
	}

	#[inline]
	pub fn parent(&self) -> Option<usize> {
		self.parent
	}

	#[inline]
	pub fn set_parent(&mut self, parent: Option<usize>) {
		self.parent = parent
	}

	#[inline]
	pub fn left(&self) -> Option<usize> {
		self.left
	}

	#[inline]
	pub fn set_left(&mut self, left: Option<usize>) {
		self.left = left
	}

	#[inline]
	pub fn right(&self) -> Option<usize> {
		self.right
	}

	#[inline]
	pub fn set_right(&mut self, right: Option<usize>) {
		self.right = right
	}
}
