//! Open hashing bucket table.
//!
//! Like the tree engine, the bucket table indexes list slots without looking
//! at the elements: callers provide the hash of each slot they insert or erase,
//! and a `rehash` callback computing the hash of an already indexed slot
//! when the table grows.
use smallvec::SmallVec;

/// Minimum number of buckets.
pub const MIN_SIZE: usize = 10;

/// Target load factor after the table grows.
pub const RATIO: f64 = 0.8;

/// Load factor above which the table grows.
pub const MAX_RATIO: f64 = 2.0;

/// A bucket: slots in insertion order.
pub type Bucket = SmallVec<[usize; 4]>;

/// Number of buckets needed to hold `items` slots at the target load factor.
#[inline]
pub fn target_bucket_count(items: usize) -> usize {
	let count = (items as f64 / RATIO).ceil() as usize;
	count.max(MIN_SIZE)
}

/// Bucket table over list slot identifiers.
#[derive(Clone, Debug)]
pub struct HashBuckets {
	buckets: Vec<Bucket>,

	/// Number of indexed slots.
	item_count: usize,
}

impl HashBuckets {
	/// Create an empty table with [`MIN_SIZE`] buckets.
	#[inline]
	pub fn new() -> HashBuckets {
		HashBuckets::with_bucket_count(MIN_SIZE)
	}

	/// Create an empty table able to receive `capacity` slots without growing.
	#[inline]
	pub fn with_capacity(capacity: usize) -> HashBuckets {
		HashBuckets::with_bucket_count(target_bucket_count(capacity))
	}

	fn with_bucket_count(count: usize) -> HashBuckets {
		HashBuckets {
			buckets: vec![Bucket::new(); count.max(MIN_SIZE)],
			item_count: 0,
		}
	}

	/// Number of indexed slots.
	#[inline]
	pub fn len(&self) -> usize {
		self.item_count
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.item_count == 0
	}

	#[inline]
	pub fn bucket_count(&self) -> usize {
		self.buckets.len()
	}

	#[inline]
	pub fn load_factor(&self) -> f64 {
		self.item_count as f64 / self.buckets.len() as f64
	}

	/// Index of the bucket receiving the given hash.
	#[inline]
	pub fn hash_index(&self, hash: u64) -> usize {
		(hash % self.buckets.len() as u64) as usize
	}

	/// Slots of the bucket at the given index.
	///
	/// Panics if `index` is not less than [`bucket_count`](HashBuckets::bucket_count).
	#[inline]
	pub fn bucket(&self, index: usize) -> &[usize] {
		&self.buckets[index]
	}

	#[inline]
	pub fn bucket_size(&self, index: usize) -> usize {
		self.buckets[index].len()
	}

	/// Slots sharing the bucket of the given hash.
	#[inline]
	pub fn bucket_of(&self, hash: u64) -> &[usize] {
		self.bucket(self.hash_index(hash))
	}

	/// Index a slot.
	///
	/// If the load factor exceeds [`MAX_RATIO`], the table grows to
	/// [`RATIO`] using `rehash` to recompute the hash of each slot.
	pub fn insert<F>(&mut self, slot: usize, hash: u64, rehash: F)
	where
		F: FnMut(usize) -> u64,
	{
		let index = self.hash_index(hash);
		self.buckets[index].push(slot);
		self.item_count += 1;

		if self.item_count as f64 > self.buckets.len() as f64 * MAX_RATIO {
			self.reserve(self.item_count, rehash)
		}
	}

	/// Remove a slot from the table.
	///
	/// Returns `false` if the slot was not indexed under this hash.
	pub fn erase(&mut self, slot: usize, hash: u64) -> bool {
		let index = self.hash_index(hash);
		let bucket = &mut self.buckets[index];
		match bucket.iter().position(|s| *s == slot) {
			Some(i) => {
				bucket.remove(i);
				self.item_count -= 1;
				true
			}
			None => false,
		}
	}

	/// Make room for at least `items` slots at the target load factor.
	///
	/// Never shrinks the table.
	pub fn reserve<F>(&mut self, items: usize, rehash: F)
	where
		F: FnMut(usize) -> u64,
	{
		let count = target_bucket_count(items);
		if count > self.buckets.len() {
			self.rebuild(count, rehash)
		}
	}

	/// Set the number of buckets to `count`, or the least number of buckets
	/// keeping the load factor under [`MAX_RATIO`] if greater.
	pub fn rehash<F>(&mut self, count: usize, rehash: F)
	where
		F: FnMut(usize) -> u64,
	{
		let least = (self.item_count as f64 / MAX_RATIO).ceil() as usize;
		let count = count.max(least).max(MIN_SIZE);
		if count != self.buckets.len() {
			self.rebuild(count, rehash)
		}
	}

	/// Redistribute every slot into `count` new buckets.
	///
	/// Buckets are visited in order, so slots sharing a bucket
	/// keep their relative order.
	fn rebuild<F>(&mut self, count: usize, mut rehash: F)
	where
		F: FnMut(usize) -> u64,
	{
		tracing::debug!(
			from = self.buckets.len(),
			to = count,
			items = self.item_count,
			"rehash buckets"
		);

		let old = std::mem::replace(&mut self.buckets, vec![Bucket::new(); count]);
		for slot in old.into_iter().flatten() {
			let index = (rehash(slot) % count as u64) as usize;
			self.buckets[index].push(slot);
		}
	}

	/// Remove every slot and go back to [`MIN_SIZE`] buckets.
	pub fn clear(&mut self) {
		tracing::debug!(items = self.item_count, "clear buckets");
		*self = HashBuckets::new()
	}
}

impl Default for HashBuckets {
	fn default() -> Self {
		HashBuckets::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::hash::hash;

	fn fill(table: &mut HashBuckets, range: std::ops::Range<usize>) {
		for slot in range {
			table.insert(slot, hash(&slot), |s| hash(&s));
			assert!(table.len() as f64 <= table.bucket_count() as f64 * MAX_RATIO);
		}
	}

	#[test]
	fn starts_with_min_size() {
		let table = HashBuckets::new();
		assert_eq!(table.bucket_count(), MIN_SIZE);
		assert!(table.is_empty());
		assert_eq!(HashBuckets::with_capacity(3).bucket_count(), MIN_SIZE);
	}

	#[test]
	fn grows_when_overloaded() {
		let mut table = HashBuckets::new();
		fill(&mut table, 0..20);
		assert_eq!(table.bucket_count(), MIN_SIZE);

		fill(&mut table, 20..21);
		// ceil(21 / 0.8)
		assert_eq!(table.bucket_count(), 27);

		for slot in 0..21 {
			assert!(table.bucket_of(hash(&slot)).contains(&slot));
		}
	}

	#[test]
	fn thousand_sequential_slots() {
		let mut table = HashBuckets::new();
		fill(&mut table, 0..1000);
		assert_eq!(table.len(), 1000);
		assert!(table.bucket_count() >= 500);

		for slot in 0..1000 {
			assert!(table.bucket_of(hash(&slot)).contains(&slot));
		}

		let total: usize = (0..table.bucket_count()).map(|i| table.bucket_size(i)).sum();
		assert_eq!(total, 1000);
	}

	#[test]
	fn reserve_and_rehash() {
		let mut table = HashBuckets::new();
		table.reserve(1000, |s| hash(&s));
		assert_eq!(table.bucket_count(), 1250);

		// reserve never shrinks.
		table.reserve(10, |s| hash(&s));
		assert_eq!(table.bucket_count(), 1250);

		fill(&mut table, 0..100);
		table.rehash(0, |s| hash(&s));
		assert_eq!(table.bucket_count(), 50);
		table.rehash(3, |s| hash(&s));
		assert_eq!(table.bucket_count(), 50);
		for slot in 0..100 {
			assert!(table.bucket_of(hash(&slot)).contains(&slot));
		}
	}

	#[test]
	fn erase_first_match_only() {
		let mut table = HashBuckets::new();
		table.insert(1, 7, |_| 7);
		table.insert(2, 7, |_| 7);
		assert_eq!(table.bucket_of(7), &[1, 2]);

		assert!(table.erase(1, 7));
		assert!(!table.erase(1, 7));
		assert!(!table.erase(2, 8));
		assert_eq!(table.bucket_of(7), &[2]);
		assert_eq!(table.len(), 1);

		table.clear();
		assert!(table.is_empty());
		assert_eq!(table.bucket_count(), MIN_SIZE);
	}
}
