//! Canonical hash function of the hashed containers.
//!
//! Keys are hashed through their [`Hash`] implementation fed into a 64-bit
//! FNV-1a state: each byte is XOR-ed into the running hash which is then
//! multiplied by the FNV prime. Integers are fed in little-endian order so the
//! resulting hash does not depend on the target endianness.
//!
//! Floating point numbers are not [`Hash`]; hash their bit pattern
//! (`f64::to_bits`) instead.
use std::hash::{BuildHasherDefault, Hash, Hasher};

/// FNV-1a 64-bit offset basis.
pub const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
pub const PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hasher.
#[derive(Clone, Copy, Debug)]
pub struct FnvHasher(u64);

impl Default for FnvHasher {
	#[inline]
	fn default() -> FnvHasher {
		FnvHasher(OFFSET_BASIS)
	}
}

impl Hasher for FnvHasher {
	#[inline]
	fn finish(&self) -> u64 {
		self.0
	}

	#[inline]
	fn write(&mut self, bytes: &[u8]) {
		let FnvHasher(mut hash) = *self;

		for byte in bytes {
			hash ^= *byte as u64;
			hash = hash.wrapping_mul(PRIME);
		}

		*self = FnvHasher(hash);
	}

	#[inline]
	fn write_u16(&mut self, i: u16) {
		self.write(&i.to_le_bytes())
	}

	#[inline]
	fn write_u32(&mut self, i: u32) {
		self.write(&i.to_le_bytes())
	}

	#[inline]
	fn write_u64(&mut self, i: u64) {
		self.write(&i.to_le_bytes())
	}

	#[inline]
	fn write_u128(&mut self, i: u128) {
		self.write(&i.to_le_bytes())
	}

	#[inline]
	fn write_usize(&mut self, i: usize) {
		// always 8 bytes wide, whatever the pointer width.
		self.write_u64(i as u64)
	}

	#[inline]
	fn write_i16(&mut self, i: i16) {
		self.write_u16(i as u16)
	}

	#[inline]
	fn write_i32(&mut self, i: i32) {
		self.write_u32(i as u32)
	}

	#[inline]
	fn write_i64(&mut self, i: i64) {
		self.write_u64(i as u64)
	}

	#[inline]
	fn write_i128(&mut self, i: i128) {
		self.write_u128(i as u128)
	}

	#[inline]
	fn write_isize(&mut self, i: isize) {
		self.write_u64(i as u64)
	}
}

/// Default [`BuildHasher`](std::hash::BuildHasher) of the hashed containers.
pub type FnvBuildHasher = BuildHasherDefault<FnvHasher>;

/// Hash a value with the canonical hash function.
#[inline]
pub fn hash<T: Hash + ?Sized>(value: &T) -> u64 {
	let mut hasher = FnvHasher::default();
	value.hash(&mut hasher);
	hasher.finish()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fnv1a_reference_values() {
		let mut h = FnvHasher::default();
		h.write(b"");
		assert_eq!(h.finish(), 0xcbf2_9ce4_8422_2325);

		let mut h = FnvHasher::default();
		h.write(b"a");
		assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);

		let mut h = FnvHasher::default();
		h.write(b"foobar");
		assert_eq!(h.finish(), 0x8594_4171_f739_67e8);
	}

	#[test]
	fn order_sensitive() {
		assert_ne!(hash("ab"), hash("ba"));
		assert_eq!(hash(&42u32), hash(&42u32));
		assert_ne!(hash(&1i64), hash(&2i64));
	}
}
