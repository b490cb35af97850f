use assoc_slab::{hash::hash, HashMap, HashMultiMap, HashMultiSet, HashSet};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use std::hash::{BuildHasher, Hasher};

const SEED: u64 = 0x7ee5_eed5;

/// Every key in the same bucket.
#[derive(Clone, Copy, Default)]
struct ConstBuildHasher;

struct ConstHasher;

impl BuildHasher for ConstBuildHasher {
	type Hasher = ConstHasher;

	fn build_hasher(&self) -> ConstHasher {
		ConstHasher
	}
}

impl Hasher for ConstHasher {
	fn write(&mut self, _bytes: &[u8]) {}

	fn finish(&self) -> u64 {
		0
	}
}

#[test]
pub fn thousand_sequential_inserts() {
	let mut set = HashSet::new();
	for i in 0..1000u32 {
		let (_, inserted) = set.insert(i);
		assert!(inserted);
		assert!(set.load_factor() <= set.max_load_factor());
	}

	set.validate();
	assert_eq!(set.len(), 1000);
	assert!(set.bucket_count() >= 500);
	for i in 0..1000u32 {
		let pos = set.find(&i);
		assert_eq!(set.get_at(pos), Some(&i));
	}
}

#[test]
pub fn bulk_build_reserves_once() {
	let set: HashSet<u32> = (0..1000).collect();
	assert_eq!(set.bucket_count(), 1250);
	set.validate();

	let mut map: HashMap<u32, u32> = HashMap::new();
	map.extend((0..1000).map(|i| (i, i)));
	assert_eq!(map.bucket_count(), 1250);
}

#[test]
pub fn canonical_hash_is_used_by_default() {
	let set: HashSet<u64> = (0..100).collect();
	for i in 0..100u64 {
		assert_eq!(set.bucket(&i), (hash(&i) % set.bucket_count() as u64) as usize);
	}
}

#[test]
pub fn erase_random() {
	let mut rng = SmallRng::seed_from_u64(SEED);
	let mut keys: Vec<u64> = (0..300).collect();
	keys.shuffle(&mut rng);

	let mut map: HashMap<u64, String> = keys.iter().map(|k| (*k, k.to_string())).collect();
	keys.shuffle(&mut rng);

	for (i, key) in keys.iter().enumerate() {
		assert_eq!(map.remove(key), Some(key.to_string()));
		assert_eq!(map.erase(key), 0);
		assert!(!map.contains_key(key));
		map.validate();
		assert_eq!(map.len(), keys.len() - i - 1);
	}

	assert!(map.is_empty());
}

#[test]
pub fn collisions_resolve_by_equality() {
	let mut map: HashMap<String, usize, ConstBuildHasher> = HashMap::with_hasher(ConstBuildHasher);
	for i in 0..50 {
		map.insert(format!("k{}", i), i);
	}

	map.validate();
	for i in 0..50 {
		assert_eq!(map.get(format!("k{}", i).as_str()), Some(&i));
	}

	// every element lives in bucket 0.
	assert_eq!(map.bucket_size(0), 50);
	assert_eq!(map.erase("k10"), 1);
	assert_eq!(map.get("k10"), None);
	assert_eq!(map.get("k11"), Some(&11));
}

#[test]
pub fn multiset_collisions_stay_grouped() {
	let mut set: HashMultiSet<i32, ConstBuildHasher> = HashMultiSet::with_hasher(ConstBuildHasher);
	for value in [1, 2, 1, 3, 2, 1] {
		set.insert(value);
	}

	set.validate();
	assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 1, 1, 2, 2, 3]);
	assert_eq!(set.count(&1), 3);
	assert_eq!(set.erase(&1), 3);
	assert_eq!(set.count(&1), 0);
	set.validate();
}

#[test]
pub fn multimap_equal_range() {
	let mut map = HashMultiMap::new();
	for (i, key) in [1, 1, 1, 2, 2, 3].into_iter().enumerate() {
		map.insert(key, i);
	}
	map.validate();

	let (first, last) = map.equal_range(&1);
	let ones: Vec<_> = map.range(first, last).map(|(_, i)| *i).collect();
	assert_eq!(ones, vec![0, 1, 2]);

	let (first, last) = map.equal_range(&7);
	assert!(first.is_end() && last.is_end());
}

#[test]
pub fn unique_insert_is_idempotent() {
	let mut map = HashMap::new();
	let (pos, inserted) = map.insert(1, "a");
	assert!(inserted);
	assert_eq!(map.insert(1, "b"), (pos, false));
	assert_eq!(map.len(), 1);
	assert_eq!(map[&1], "a");
}

#[test]
pub fn bucket_iteration() {
	let mut set: HashSet<i32, ConstBuildHasher> = HashSet::with_hasher(ConstBuildHasher);
	for value in [3, 1, 2] {
		set.insert(value);
	}

	assert_eq!(set.bucket_iter(0).copied().collect::<Vec<_>>(), vec![3, 1, 2]);
	assert_eq!(set.bucket_iter(1).count(), 0);

	set.erase(&1);
	assert_eq!(set.bucket_iter(0).copied().collect::<Vec<_>>(), vec![3, 2]);

	let map: HashMap<u64, u64> = (0..100).map(|i| (i, i * i)).collect();
	let mut seen = 0;
	for index in 0..map.bucket_count() {
		assert_eq!(map.bucket_iter(index).count(), map.bucket_size(index));
		for (key, value) in map.bucket_iter(index) {
			assert_eq!(map.bucket(key), index);
			assert_eq!(*value, key * key);
			seen += 1;
		}
	}
	assert_eq!(seen, 100);
}

#[test]
pub fn merge_unique_keeps_duplicates_in_source() {
	let mut target: HashMap<i32, char> = vec![(1, 'a'), (3, 'c')].into_iter().collect();
	let mut source: HashMap<i32, char> = vec![(0, 'z'), (1, 'x'), (2, 'b'), (3, 'y')].into_iter().collect();

	target.merge(&mut source);
	target.validate();
	source.validate();

	assert_eq!(target.len(), 4);
	assert_eq!(target[&0], 'z');
	assert_eq!(target[&1], 'a');
	assert_eq!(target[&2], 'b');
	let mut left: Vec<_> = source.iter().copied().collect();
	left.sort_unstable();
	assert_eq!(left, vec![(1, 'x'), (3, 'y')]);
}

#[test]
pub fn merge_multi_moves_everything() {
	let mut target: HashMultiSet<i32, ConstBuildHasher> = HashMultiSet::with_hasher(ConstBuildHasher);
	let mut source: HashMultiSet<i32, ConstBuildHasher> = HashMultiSet::with_hasher(ConstBuildHasher);
	for value in [1, 2] {
		target.insert(value);
	}
	for value in [2, 3, 1, 2] {
		source.insert(value);
	}

	target.merge(&mut source);
	target.validate();
	source.validate();

	assert!(source.is_empty());
	assert_eq!(target.iter().copied().collect::<Vec<_>>(), vec![1, 1, 2, 2, 2, 3]);
}
