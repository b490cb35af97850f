//! Ordering protocol used by the ordered containers.
use std::cmp::Ordering;

/// Strict weak ordering over `T`.
///
/// Only [`less`](Compare::less) is required. Two values are *equivalent* when
/// neither is less than the other, which is what the ordered containers use as
/// key equality.
///
/// It is a logic error for an implementation to be inconsistent
/// (e.g. `less(a, b) && less(b, a)`), or for the ordering of a key to change
/// while it is stored in a container.
pub trait Compare<T: ?Sized> {
	fn less(&self, a: &T, b: &T) -> bool;

	#[inline]
	fn equals(&self, a: &T, b: &T) -> bool {
		!self.less(a, b) && !self.less(b, a)
	}

	/// Three-way comparison derived from [`less`](Compare::less).
	#[inline]
	fn compare(&self, a: &T, b: &T) -> Ordering {
		if self.less(a, b) {
			Ordering::Less
		} else if self.less(b, a) {
			Ordering::Greater
		} else {
			Ordering::Equal
		}
	}
}

/// Natural ordering given by [`Ord`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
	#[inline]
	fn less(&self, a: &T, b: &T) -> bool {
		a < b
	}

	#[inline]
	fn equals(&self, a: &T, b: &T) -> bool {
		a == b
	}

	#[inline]
	fn compare(&self, a: &T, b: &T) -> Ordering {
		a.cmp(b)
	}
}

/// Reversed natural ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reverse;

impl<T: Ord + ?Sized> Compare<T> for Reverse {
	#[inline]
	fn less(&self, a: &T, b: &T) -> bool {
		b < a
	}

	#[inline]
	fn compare(&self, a: &T, b: &T) -> Ordering {
		b.cmp(a)
	}
}

/// Any `less`-like closure is a comparator.
impl<T: ?Sized, F> Compare<T> for F
where
	F: Fn(&T, &T) -> bool,
{
	#[inline]
	fn less(&self, a: &T, b: &T) -> bool {
		self(a, b)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn natural_and_reverse() {
		assert!(Natural.less(&1, &2));
		assert!(Reverse.less(&2, &1));
		assert_eq!(Compare::<i32>::compare(&Natural, &3, &3), Ordering::Equal);
		assert_eq!(Compare::<i32>::compare(&Reverse, &1, &3), Ordering::Greater);
	}

	#[test]
	fn closure_equivalence() {
		// case-insensitive ordering: "a" and "A" are equivalent.
		let cmp = |a: &&str, b: &&str| a.to_lowercase() < b.to_lowercase();
		assert!(cmp.equals(&"a", &"A"));
		assert_eq!(cmp.compare(&"b", &"A"), Ordering::Greater);
	}
}
