// Model-based property tests.
//
// Each container is driven by a random sequence of operations and compared
// after every step with a model built on `std::collections`:
//  - unique maps against `BTreeMap<K, V>`;
//  - multi-maps against `BTreeMap<K, Vec<V>>` (values in insertion order);
//  - hashed containers use the same models, compared up to element order.
use assoc_slab::{HashMap, HashMultiMap, TreeMap, TreeMultiMap};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
	Insert(u8, u16),
	Assign(u8, u16),
	Erase(u8),
	EraseFirst,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
	let op = prop_oneof![
		4 => (0u8..32, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
		1 => (0u8..32, any::<u16>()).prop_map(|(k, v)| Op::Assign(k, v)),
		2 => (0u8..32).prop_map(Op::Erase),
		1 => Just(Op::EraseFirst),
	];
	proptest::collection::vec(op, 1..200)
}

proptest! {
	#[test]
	fn prop_tree_map(ops in arb_ops()) {
		let mut sut: TreeMap<u8, u16> = TreeMap::new();
		let mut model: BTreeMap<u8, u16> = BTreeMap::new();

		for op in ops {
			match op {
				Op::Insert(k, v) => {
					let (pos, inserted) = sut.insert(k, v);
					prop_assert_eq!(inserted, !model.contains_key(&k));
					model.entry(k).or_insert(v);
					prop_assert_eq!(sut.get_at(pos).map(|(k, _)| *k), Some(k));
				}
				Op::Assign(k, v) => {
					let (_, inserted) = sut.insert_or_assign(k, v);
					prop_assert_eq!(inserted, model.insert(k, v).is_none());
				}
				Op::Erase(k) => {
					let expected = model.remove(&k).map_or(0, |_| 1);
					prop_assert_eq!(sut.erase(&k), expected);
				}
				Op::EraseFirst => {
					let first = model.keys().next().copied();
					if let Some(k) = first {
						model.remove(&k);
					}
					prop_assert_eq!(sut.pop_first().map(|(k, _)| k), first);
				}
			}

			sut.validate();
			prop_assert_eq!(sut.len(), model.len());
		}

		prop_assert!(sut.iter().copied().eq(model.into_iter()));
	}

	#[test]
	fn prop_tree_multimap(ops in arb_ops()) {
		let mut sut: TreeMultiMap<u8, u16> = TreeMultiMap::new();
		let mut model: BTreeMap<u8, Vec<u16>> = BTreeMap::new();

		for op in ops {
			match op {
				Op::Insert(k, v) | Op::Assign(k, v) => {
					sut.insert(k, v);
					model.entry(k).or_default().push(v);
				}
				Op::Erase(k) => {
					let expected = model.remove(&k).map_or(0, |values| values.len());
					prop_assert_eq!(sut.erase(&k), expected);
				}
				Op::EraseFirst => {
					let first = model.keys().next().copied();
					let expected = first.map(|k| {
						let values = model.get_mut(&k).unwrap();
						let v = values.remove(0);
						if values.is_empty() {
							model.remove(&k);
						}
						(k, v)
					});
					prop_assert_eq!(sut.pop_first(), expected);
				}
			}

			sut.validate();
		}

		let flattened: Vec<(u8, u16)> = model
			.into_iter()
			.flat_map(|(k, values)| values.into_iter().map(move |v| (k, v)))
			.collect();
		prop_assert_eq!(sut.iter().copied().collect::<Vec<_>>(), flattened);
	}

	#[test]
	fn prop_hash_map(ops in arb_ops()) {
		let mut sut: HashMap<u8, u16> = HashMap::new();
		let mut model: BTreeMap<u8, u16> = BTreeMap::new();

		for op in ops {
			match op {
				Op::Insert(k, v) => {
					let (_, inserted) = sut.insert(k, v);
					prop_assert_eq!(inserted, !model.contains_key(&k));
					model.entry(k).or_insert(v);
				}
				Op::Assign(k, v) => {
					let (_, inserted) = sut.insert_or_assign(k, v);
					prop_assert_eq!(inserted, model.insert(k, v).is_none());
				}
				Op::Erase(k) => {
					let expected = model.remove(&k).map_or(0, |_| 1);
					prop_assert_eq!(sut.erase(&k), expected);
				}
				Op::EraseFirst => {
					let pos = sut.begin();
					if let Some((k, v)) = sut.take_at(pos) {
						prop_assert_eq!(model.remove(&k), Some(v));
					}
				}
			}

			sut.validate();
			prop_assert_eq!(sut.len(), model.len());
		}

		let mut items: Vec<(u8, u16)> = sut.iter().copied().collect();
		items.sort_unstable();
		prop_assert_eq!(items, model.into_iter().collect::<Vec<_>>());
	}

	#[test]
	fn prop_hash_multimap(ops in arb_ops()) {
		let mut sut: HashMultiMap<u8, u16> = HashMultiMap::new();
		let mut model: BTreeMap<u8, Vec<u16>> = BTreeMap::new();

		for op in ops {
			match op {
				Op::Insert(k, v) | Op::Assign(k, v) => {
					sut.insert(k, v);
					model.entry(k).or_default().push(v);
				}
				Op::Erase(k) => {
					let expected = model.remove(&k).map_or(0, |values| values.len());
					prop_assert_eq!(sut.erase(&k), expected);
				}
				Op::EraseFirst => {
					let pos = sut.begin();
					if let Some((k, v)) = sut.take_at(pos) {
						// the first element of the list is the oldest of its key.
						let values = model.get_mut(&k).unwrap();
						prop_assert_eq!(values.remove(0), v);
						if values.is_empty() {
							model.remove(&k);
						}
					}
				}
			}

			sut.validate();
		}

		for (k, values) in model {
			let (first, last) = sut.equal_range(&k);
			let found: Vec<u16> = sut.range(first, last).map(|(_, v)| *v).collect();
			prop_assert_eq!(found, values);
		}
	}
}
