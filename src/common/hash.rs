//! The `Hash` primitive: an opaque 32-byte SHA-256 digest.

use sha2::{Digest, Sha256};
use std::fmt;

use crate::constants::I2P_BASE64;
use crate::error::{I2pError, Result};

/// The SHA-256 hash of some data. Immutable once computed.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Hash(pub [u8; 32]);

impl Hash {
	pub const LEN: usize = 32;

	pub fn from_bytes(buf: &[u8; 32]) -> Self {
		Hash(*buf)
	}

	/// Parses a 32-byte hash at the front of `bytes`.
	pub fn read(bytes: &[u8]) -> Result<(Hash, &[u8])> {
		if bytes.len() < Self::LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: Self::LEN,
				available: bytes.len(),
			});
		}
		let mut buf = [0u8; 32];
		buf.copy_from_slice(&bytes[..Self::LEN]);
		Ok((Hash(buf), &bytes[Self::LEN..]))
	}

	/// Computes the SHA-256 digest of `data`.
	pub fn compute(data: &[u8]) -> Self {
		let mut hasher = Sha256::new();
		hasher.update(data);
		let digest = hasher.finalize();
		let mut buf = [0u8; 32];
		buf.copy_from_slice(&digest);
		Hash(buf)
	}

	/// XORs this hash in place with `other`, used by the Kademlia-distance
	/// metric in the NetDB resolver.
	pub fn xor(&mut self, other: &Hash) {
		for i in 0..32 {
			self.0[i] ^= other.0[i];
		}
	}
}

impl fmt::Display for Hash {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", I2P_BASE64.encode(&self.0))
	}
}

impl fmt::Debug for Hash {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "Hash({})", self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn xor_is_involutive() {
		let h0 = Hash::from_bytes(&[0u8; 32]);
		let h1 = Hash::from_bytes(&[1u8; 32]);
		let mut h = h0;
		h.xor(&h1);
		assert_eq!(h, h1);
		h.xor(&h1);
		assert_eq!(h, h0);
	}

	#[test]
	fn compute_is_deterministic() {
		assert_eq!(Hash::compute(b"hello"), Hash::compute(b"hello"));
		assert_ne!(Hash::compute(b"hello"), Hash::compute(b"world"));
	}

	#[test]
	fn too_short_is_fatal() {
		assert!(Hash::read(&[0u8; 31]).is_err());
	}
}
