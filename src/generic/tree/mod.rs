//! Red-black tree engine.
//!
//! Reference: <https://en.wikipedia.org/wiki/Red%E2%80%93black_tree>
//!
//! The engine indexes list slots but never looks at the elements themselves.
//! Every search is driven by a *probe*, a closure called with the list slot
//! held by a node and returning how the searched key orders against the key
//! stored at that slot (`Less` means "go left").
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::cmp::Ordering;

mod node;

pub use node::{Color, Node};

/// Red-black tree over list slot identifiers, with nodes allocated in a slab `N`.
#[derive(Clone)]
pub struct RbTree<N> {
	/// Allocated and free nodes.
	nodes: N,

	/// Root node id.
	root: Option<usize>,

	/// Number of nodes in the tree.
	len: usize,
}

impl<N> RbTree<N> {
	/// Create a new empty tree.
	#[inline]
	pub fn new() -> RbTree<N>
	where
		N: Default,
	{
		RbTree {
			nodes: Default::default(),
			root: None,
			len: 0,
		}
	}

	#[inline]
	pub fn root(&self) -> Option<usize> {
		self.root
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}
}

impl<N: Default> Default for RbTree<N> {
	fn default() -> Self {
		RbTree::new()
	}
}

impl<N: Slab<Node>> RbTree<N>
where
	N: SimpleCollectionRef,
{
	/// Get the node associated to the given `id`.
	///
	/// Panics if `id` is not the identifier of a node of the tree.
	#[inline]
	pub fn node(&self, id: usize) -> &Node {
		N::into_ref(self.nodes.get(id).expect("unknown tree node"))
	}

	/// Color of an optional node. Null leaves are black.
	#[inline]
	fn color_of(&self, id: Option<usize>) -> Color {
		match id {
			Some(id) => self.node(id).color(),
			None => Color::Black,
		}
	}

	#[inline]
	fn is_left_child(&self, id: usize, parent: usize) -> bool {
		self.node(parent).left() == Some(id)
	}

	#[inline]
	pub fn grand_parent(&self, id: usize) -> Option<usize> {
		self.node(id).parent().and_then(|p| self.node(p).parent())
	}

	#[inline]
	pub fn sibling(&self, id: usize) -> Option<usize> {
		let parent = self.node(self.node(id).parent()?);
		if parent.left() == Some(id) {
			parent.right()
		} else {
			parent.left()
		}
	}

	#[inline]
	pub fn uncle(&self, id: usize) -> Option<usize> {
		self.sibling(self.node(id).parent()?)
	}

	/// Binary search descent.
	///
	/// Returns the node matching the probe if any, otherwise the node under
	/// which the probed key would be attached.
	/// Returns `None` only if the tree is empty.
	pub fn find<F>(&self, mut probe: F) -> Option<usize>
	where
		F: FnMut(usize) -> Ordering,
	{
		let mut id = self.root?;
		loop {
			let node = self.node(id);
			let child = match probe(node.value()) {
				Ordering::Equal => return Some(id),
				Ordering::Less => node.left(),
				Ordering::Greater => node.right(),
			};

			match child {
				Some(child) => id = child,
				None => return Some(id),
			}
		}
	}

	/// Returns the node matching the probe, if any.
	pub fn get<F>(&self, mut probe: F) -> Option<usize>
	where
		F: FnMut(usize) -> Ordering,
	{
		let mut current = self.root;
		while let Some(id) = current {
			let node = self.node(id);
			current = match probe(node.value()) {
				Ordering::Equal => return Some(id),
				Ordering::Less => node.left(),
				Ordering::Greater => node.right(),
			}
		}

		None
	}

	/// First node whose key is not ordered before the probed key.
	pub fn lower_bound<F>(&self, mut probe: F) -> Option<usize>
	where
		F: FnMut(usize) -> Ordering,
	{
		let mut result = None;
		let mut current = self.root;
		while let Some(id) = current {
			let node = self.node(id);
			if probe(node.value()) == Ordering::Greater {
				current = node.right()
			} else {
				result = Some(id);
				current = node.left()
			}
		}

		result
	}

	/// First node whose key is ordered strictly after the probed key.
	pub fn upper_bound<F>(&self, mut probe: F) -> Option<usize>
	where
		F: FnMut(usize) -> Ordering,
	{
		let mut result = None;
		let mut current = self.root;
		while let Some(id) = current {
			let node = self.node(id);
			if probe(node.value()) == Ordering::Less {
				result = Some(id);
				current = node.left()
			} else {
				current = node.right()
			}
		}

		result
	}

	/// Node referencing the given list slot.
	///
	/// The probe must locate the key stored at `slot`: the search starts at the
	/// first equivalent key and walks forward among the equivalent keys.
	pub fn locate<F>(&self, slot: usize, mut probe: F) -> Option<usize>
	where
		F: FnMut(usize) -> Ordering,
	{
		let mut current = self.lower_bound(&mut probe);
		while let Some(id) = current {
			let value = self.node(id).value();
			if value == slot {
				return Some(id);
			}

			if probe(value) != Ordering::Equal {
				break;
			}

			current = self.successor(id)
		}

		None
	}

	#[inline]
	pub fn fetch_minimum(&self, mut id: usize) -> usize {
		while let Some(left) = self.node(id).left() {
			id = left
		}
		id
	}

	#[inline]
	pub fn fetch_maximum(&self, mut id: usize) -> usize {
		while let Some(right) = self.node(id).right() {
			id = right
		}
		id
	}

	/// Left-most node.
	#[inline]
	pub fn first(&self) -> Option<usize> {
		self.root.map(|id| self.fetch_minimum(id))
	}

	/// Right-most node.
	#[inline]
	pub fn last(&self) -> Option<usize> {
		self.root.map(|id| self.fetch_maximum(id))
	}

	/// In-order successor.
	pub fn successor(&self, id: usize) -> Option<usize> {
		if let Some(right) = self.node(id).right() {
			return Some(self.fetch_minimum(right));
		}

		let mut child = id;
		let mut parent = self.node(id).parent();
		while let Some(p) = parent {
			if self.is_left_child(child, p) {
				break;
			}
			child = p;
			parent = self.node(p).parent();
		}

		parent
	}

	/// In-order predecessor.
	pub fn predecessor(&self, id: usize) -> Option<usize> {
		if let Some(left) = self.node(id).left() {
			return Some(self.fetch_maximum(left));
		}

		let mut child = id;
		let mut parent = self.node(id).parent();
		while let Some(p) = parent {
			if !self.is_left_child(child, p) {
				break;
			}
			child = p;
			parent = self.node(p).parent();
		}

		parent
	}

	/// Height of the tree (0 for an empty tree).
	pub fn height(&self) -> usize {
		fn height_of<N: Slab<Node>>(tree: &RbTree<N>, id: Option<usize>) -> usize
		where
			N: SimpleCollectionRef,
		{
			match id {
				Some(id) => {
					let node = tree.node(id);
					1 + height_of(tree, node.left()).max(height_of(tree, node.right()))
				}
				None => 0,
			}
		}

		height_of(self, self.root)
	}

	/// Check the red-black properties and the parent links.
	///
	/// Returns the black height of the tree.
	/// Panics if the tree is not a valid red-black tree.
	pub fn validate(&self) -> usize {
		if let Some(root) = self.root {
			assert!(self.node(root).parent().is_none(), "root has a parent");
			assert_eq!(self.node(root).color(), Color::Black, "root is red");
		}

		let (black_height, count) = self.validate_node(self.root, None);
		assert_eq!(count, self.len, "node count mismatch");
		black_height
	}

	/// Validate the given subtree and returns its black height and node count.
	fn validate_node(&self, id: Option<usize>, parent: Option<usize>) -> (usize, usize) {
		match id {
			Some(id) => {
				let node = self.node(id);
				assert_eq!(node.parent(), parent, "broken parent link");

				if node.color() == Color::Red {
					assert_eq!(self.color_of(node.left()), Color::Black, "red node with red child");
					assert_eq!(self.color_of(node.right()), Color::Black, "red node with red child");
				}

				let (left_height, left_count) = self.validate_node(node.left(), Some(id));
				let (right_height, right_count) = self.validate_node(node.right(), Some(id));
				assert_eq!(left_height, right_height, "unbalanced black height");

				let own = if node.color() == Color::Black { 1 } else { 0 };
				(left_height + own, left_count + right_count + 1)
			}
			None => (1, 0),
		}
	}
}

impl<N: SlabMut<Node>> RbTree<N>
where
	N: SimpleCollectionRef,
	N: SimpleCollectionMut,
{
	#[inline]
	pub fn node_mut(&mut self, id: usize) -> &mut Node {
		N::into_mut(self.nodes.get_mut(id).expect("unknown tree node"))
	}

	#[inline]
	fn set_color(&mut self, id: usize, color: Color) {
		self.node_mut(id).set_color(color)
	}

	/// Index the given list slot.
	///
	/// The probe locates the insertion point: the new node is attached as the
	/// left child of the node where the probe returns `Less`, and as the right
	/// child otherwise. Multi-key users map `Equal` to `Greater` so that a new
	/// key is placed after every equivalent key.
	///
	/// Returns the identifier of the new node.
	pub fn insert<F>(&mut self, value: usize, mut probe: F) -> usize
	where
		F: FnMut(usize) -> Ordering,
	{
		let parent = self.find(&mut probe);
		let id = self.nodes.insert(Node::new(value, parent));

		match parent {
			None => self.root = Some(id),
			Some(parent) => {
				if probe(self.node(parent).value()) == Ordering::Less {
					self.node_mut(parent).set_left(Some(id))
				} else {
					self.node_mut(parent).set_right(Some(id))
				}
			}
		}

		self.len += 1;
		self.insert_rebalance(id);
		id
	}

	/// Index the given list slot right before the node `next` in order,
	/// or after every node if `next` is `None`.
	///
	/// No key is compared: the caller is responsible for keeping the keys ordered.
	pub fn insert_before(&mut self, value: usize, next: Option<usize>) -> usize {
		// the new node becomes the left child of `next`, or the right child
		// of its in-order predecessor.
		let (parent, left) = match next {
			Some(next) => match self.node(next).left() {
				Some(left) => (Some(self.fetch_maximum(left)), false),
				None => (Some(next), true),
			},
			None => (self.last(), false),
		};

		let id = self.nodes.insert(Node::new(value, parent));
		match parent {
			None => self.root = Some(id),
			Some(parent) if left => self.node_mut(parent).set_left(Some(id)),
			Some(parent) => self.node_mut(parent).set_right(Some(id)),
		}

		self.len += 1;
		self.insert_rebalance(id);
		id
	}

	fn insert_rebalance(&mut self, mut n: usize) {
		loop {
			// case 1: root.
			let parent = match self.node(n).parent() {
				Some(parent) => parent,
				None => {
					self.set_color(n, Color::Black);
					return;
				}
			};

			// case 2: black parent.
			if self.node(parent).color() == Color::Black {
				return;
			}

			// a red node is never the root.
			let grand_parent = self.node(parent).parent().expect("red root");

			// case 3: red parent and red uncle.
			let uncle = self.uncle(n);
			if self.color_of(uncle) == Color::Red {
				self.set_color(parent, Color::Black);
				if let Some(uncle) = uncle {
					self.set_color(uncle, Color::Black);
				}
				self.set_color(grand_parent, Color::Red);
				n = grand_parent;
				continue;
			}

			// case 4: inner grandchild, rotate it to the outside.
			let mut parent = parent;
			if !self.is_left_child(n, parent) && self.is_left_child(parent, grand_parent) {
				self.rotate_left(parent);
				std::mem::swap(&mut n, &mut parent);
			} else if self.is_left_child(n, parent) && !self.is_left_child(parent, grand_parent) {
				self.rotate_right(parent);
				std::mem::swap(&mut n, &mut parent);
			}

			// case 5: outer grandchild.
			self.set_color(parent, Color::Black);
			self.set_color(grand_parent, Color::Red);
			if self.is_left_child(n, parent) && self.is_left_child(parent, grand_parent) {
				self.rotate_right(grand_parent);
			} else {
				self.rotate_left(grand_parent);
			}

			return;
		}
	}

	/// Remove the node matching the probe.
	///
	/// Returns the list slot it referenced, or `None` if no node matches.
	pub fn erase<F>(&mut self, probe: F) -> Option<usize>
	where
		F: FnMut(usize) -> Ordering,
	{
		let id = self.get(probe)?;
		Some(self.erase_node(id))
	}

	/// Remove the node referencing the given list slot.
	///
	/// See [`locate`](RbTree::locate) for the requirements on the probe.
	/// Returns `false` if no such node exists.
	pub fn erase_slot<F>(&mut self, slot: usize, probe: F) -> bool
	where
		F: FnMut(usize) -> Ordering,
	{
		match self.locate(slot, probe) {
			Some(id) => {
				self.erase_node(id);
				true
			}
			None => false,
		}
	}

	/// Remove the given node and return the list slot it referenced.
	///
	/// The identifiers of other nodes remain valid, but a node may end up
	/// referencing a different slot (the in-order predecessor is moved into
	/// the place of a node with two children).
	pub fn erase_node(&mut self, id: usize) -> usize {
		let removed = self.node(id).value();
		let mut target = id;

		if let (Some(left), Some(_)) = (self.node(id).left(), self.node(id).right()) {
			let pred = self.fetch_maximum(left);
			let pred_value = self.node(pred).value();
			self.node_mut(id).set_value(pred_value);
			target = pred;
		}

		let node = self.node(target);
		let child = node.right().or_else(|| node.left());

		if node.color() == Color::Black {
			match child {
				Some(child) if self.node(child).color() == Color::Red => {
					self.set_color(child, Color::Black)
				}
				_ => self.erase_rebalance(target),
			}
		}

		self.replace_node(target, child);
		self.nodes.remove(target);
		self.len -= 1;
		removed
	}

	/// Restore the black height around a black node about to be removed.
	///
	/// `n` is still linked in the tree, standing for its (black) replacement.
	fn erase_rebalance(&mut self, mut n: usize) {
		loop {
			// case 1: new root.
			let parent = match self.node(n).parent() {
				Some(parent) => parent,
				None => return,
			};

			// the removed path is black, hence the sibling is never null.
			let mut sibling = self.sibling(n).expect("black node without sibling");

			// case 2: red sibling.
			if self.node(sibling).color() == Color::Red {
				self.set_color(parent, Color::Red);
				self.set_color(sibling, Color::Black);
				if self.is_left_child(n, parent) {
					self.rotate_left(parent)
				} else {
					self.rotate_right(parent)
				}
				sibling = self.sibling(n).expect("black node without sibling");
			}

			let near_left = self.node(sibling).left();
			let far_right = self.node(sibling).right();
			let nephews_black = self.color_of(near_left) == Color::Black
				&& self.color_of(far_right) == Color::Black;

			// case 3: everything black, move the problem up.
			if self.node(parent).color() == Color::Black
				&& self.node(sibling).color() == Color::Black
				&& nephews_black
			{
				self.set_color(sibling, Color::Red);
				n = parent;
				continue;
			}

			// case 4: red parent, black sibling and nephews.
			if self.node(parent).color() == Color::Red
				&& self.node(sibling).color() == Color::Black
				&& nephews_black
			{
				self.set_color(sibling, Color::Red);
				self.set_color(parent, Color::Black);
				return;
			}

			// case 5: red near nephew, black far nephew.
			let n_is_left = self.is_left_child(n, parent);
			if n_is_left
				&& self.color_of(far_right) == Color::Black
				&& self.color_of(near_left) == Color::Red
			{
				self.set_color(sibling, Color::Red);
				if let Some(near) = near_left {
					self.set_color(near, Color::Black);
				}
				self.rotate_right(sibling);
			} else if !n_is_left
				&& self.color_of(near_left) == Color::Black
				&& self.color_of(far_right) == Color::Red
			{
				self.set_color(sibling, Color::Red);
				if let Some(near) = far_right {
					self.set_color(near, Color::Black);
				}
				self.rotate_left(sibling);
			}

			// case 6: red far nephew.
			let sibling = self.sibling(n).expect("black node without sibling");
			let parent_color = self.node(parent).color();
			self.set_color(sibling, parent_color);
			self.set_color(parent, Color::Black);
			if n_is_left {
				if let Some(far) = self.node(sibling).right() {
					self.set_color(far, Color::Black);
				}
				self.rotate_left(parent);
			} else {
				if let Some(far) = self.node(sibling).left() {
					self.set_color(far, Color::Black);
				}
				self.rotate_right(parent);
			}

			return;
		}
	}

	fn rotate_left(&mut self, id: usize) {
		tracing::trace!(node = id, "rotate left");
		let right = self.node(id).right().expect("left rotation without right child");
		self.replace_node(id, Some(right));

		let inner = self.node(right).left();
		self.node_mut(id).set_right(inner);
		if let Some(inner) = inner {
			self.node_mut(inner).set_parent(Some(id));
		}

		self.node_mut(right).set_left(Some(id));
		self.node_mut(id).set_parent(Some(right));
	}

	fn rotate_right(&mut self, id: usize) {
		tracing::trace!(node = id, "rotate right");
		let left = self.node(id).left().expect("right rotation without left child");
		self.replace_node(id, Some(left));

		let inner = self.node(left).right();
		self.node_mut(id).set_left(inner);
		if let Some(inner) = inner {
			self.node_mut(inner).set_parent(Some(id));
		}

		self.node_mut(left).set_right(Some(id));
		self.node_mut(id).set_parent(Some(left));
	}

	/// Put `new` in the place of `old` under `old`'s parent (or as root).
	fn replace_node(&mut self, old: usize, new: Option<usize>) {
		let parent = self.node(old).parent();
		match parent {
			None => self.root = new,
			Some(parent) => {
				if self.is_left_child(old, parent) {
					self.node_mut(parent).set_left(new)
				} else {
					self.node_mut(parent).set_right(new)
				}
			}
		}

		if let Some(new) = new {
			self.node_mut(new).set_parent(parent);
		}
	}

	#[inline]
	pub fn clear(&mut self)
	where
		N: cc_traits::Clear,
	{
		self.root = None;
		self.len = 0;
		self.nodes.clear()
	}
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use super::*;
	use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

	const SEED: u64 = 0x5eed_7ee5;

	// Slots are used as keys directly.
	type Tree = RbTree<slab::Slab<Node>>;

	fn in_order(tree: &Tree) -> Vec<usize> {
		let mut result = Vec::new();
		let mut current = tree.first();
		while let Some(id) = current {
			result.push(tree.node(id).value());
			current = tree.successor(id);
		}
		result
	}

	#[test]
	fn insert_keeps_invariants() {
		let mut tree = Tree::new();
		for key in 0..200 {
			tree.insert(key, |slot| key.cmp(&slot));
			tree.validate();
		}

		assert_eq!(tree.len(), 200);
		assert_eq!(in_order(&tree), (0..200).collect::<Vec<_>>());
		// 2 * log2(201)
		assert!(tree.height() <= 15);
	}

	#[test]
	fn erase_keeps_invariants() {
		let mut rng = SmallRng::seed_from_u64(SEED);
		let mut keys: Vec<usize> = (0..300).collect();
		keys.shuffle(&mut rng);

		let mut tree = Tree::new();
		for &key in &keys {
			tree.insert(key, |slot| key.cmp(&slot));
		}

		keys.shuffle(&mut rng);
		for (i, &key) in keys.iter().enumerate() {
			assert_eq!(tree.erase(|slot| key.cmp(&slot)), Some(key));
			assert_eq!(tree.erase(|slot| key.cmp(&slot)), None);
			tree.validate();
			assert_eq!(tree.len(), keys.len() - i - 1);
		}

		assert!(tree.is_empty());
	}

	#[test]
	fn find_returns_insertion_point() {
		let mut tree = Tree::new();
		assert_eq!(tree.find(|slot| 5.cmp(&slot)), None);

		for key in [10, 20, 30] {
			tree.insert(key, |slot| key.cmp(&slot));
		}

		let exact = tree.find(|slot| 20.cmp(&slot)).unwrap();
		assert_eq!(tree.node(exact).value(), 20);

		let parent = tree.find(|slot| 25.cmp(&slot)).unwrap();
		assert!(tree.node(parent).value() == 20 || tree.node(parent).value() == 30);
		assert_eq!(tree.get(|slot| 25.cmp(&slot)), None);
	}

	#[test]
	fn bounds() {
		let mut tree = Tree::new();
		for key in (0..10).map(|k| k * 2) {
			tree.insert(key, |slot| key.cmp(&slot));
		}

		let value = |id: Option<usize>| id.map(|id| tree.node(id).value());
		assert_eq!(value(tree.lower_bound(|slot| 4.cmp(&slot))), Some(4));
		assert_eq!(value(tree.upper_bound(|slot| 4.cmp(&slot))), Some(6));
		assert_eq!(value(tree.lower_bound(|slot| 5.cmp(&slot))), Some(6));
		assert_eq!(value(tree.upper_bound(|slot| 5.cmp(&slot))), Some(6));
		assert_eq!(value(tree.upper_bound(|slot| 18.cmp(&slot))), None);
		assert_eq!(value(tree.lower_bound(|slot| 0.cmp(&slot))), Some(0));
	}

	#[test]
	fn navigation() {
		let mut tree = Tree::new();
		for key in [5, 3, 8, 1, 4, 7, 9, 2, 6, 0] {
			tree.insert(key, |slot| key.cmp(&slot));
		}

		let last = tree.last().unwrap();
		assert_eq!(tree.node(last).value(), 9);
		assert_eq!(tree.successor(last), None);

		let mut reversed = Vec::new();
		let mut current = Some(last);
		while let Some(id) = current {
			reversed.push(tree.node(id).value());
			current = tree.predecessor(id);
		}
		assert_eq!(reversed, (0..10).rev().collect::<Vec<_>>());

		let root = tree.root().unwrap();
		assert_eq!(tree.grand_parent(root), None);
		assert_eq!(tree.sibling(root), None);
		assert_eq!(tree.uncle(root), None);
	}

	#[test]
	fn erase_slot_among_equivalent_keys() {
		// slots 0..12 all map to key `slot / 4`.
		let key = |slot: usize| slot / 4;
		let mut tree = Tree::new();
		for slot in 0..12 {
			tree.insert(slot, |other| match key(slot).cmp(&key(other)) {
				Ordering::Equal => Ordering::Greater,
				ordering => ordering,
			});
		}
		tree.validate();
		assert_eq!(in_order(&tree), (0..12).collect::<Vec<_>>());

		for slot in [6, 4, 7, 5] {
			assert!(tree.erase_slot(slot, |other| key(slot).cmp(&key(other))));
			assert!(!tree.erase_slot(slot, |other| key(slot).cmp(&key(other))));
			tree.validate();
		}

		assert_eq!(in_order(&tree), vec![0, 1, 2, 3, 8, 9, 10, 11]);
	}

	#[test]
	fn insert_before_node() {
		let mut rng = SmallRng::seed_from_u64(SEED);
		let mut tree = Tree::new();

		// slots are not ordered: the expected order is given by placement only.
		let mut order: Vec<usize> = Vec::new();
		fn rank(order: &[usize], slot: usize) -> usize {
			order.iter().position(|s| *s == slot).unwrap()
		}

		for slot in 0..300 {
			let index = rng.gen_range(0..=order.len());
			let next = order.get(index).map(|&next| {
				tree.locate(next, |other| rank(&order, next).cmp(&rank(&order, other)))
					.unwrap()
			});
			tree.insert_before(slot, next);
			order.insert(index, slot);
			tree.validate();
		}

		assert_eq!(in_order(&tree), order);
	}
}
