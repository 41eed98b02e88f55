//! The `Integer` primitive: a 1-to-8-byte big-endian unsigned value.

use byteorder::{BigEndian, ByteOrder};

/// A big-endian unsigned integer of between 0 and 8 bytes.
///
/// An empty slice decodes to `0`: this is a documented quirk of the wire
/// format (several header fields are conditionally absent) and is relied
/// upon by callers, so it is not an error.
pub struct Integer;

impl Integer {
	/// Decodes `bytes` as a big-endian unsigned integer.
	///
	/// `bytes` must be no more than 8 bytes long; longer inputs are
	/// truncated to their trailing 8 bytes rather than rejected, since this
	/// primitive has no length field of its own to validate against.
	pub fn read(bytes: &[u8]) -> u64 {
		if bytes.is_empty() {
			return 0;
		}
		let tail = if bytes.len() > 8 {
			&bytes[bytes.len() - 8..]
		} else {
			bytes
		};
		BigEndian::read_uint(tail, tail.len())
	}

	/// Encodes `value` into exactly `width` big-endian bytes (1..=8).
	pub fn write(value: u64, width: usize) -> Vec<u8> {
		let mut buf = vec![0u8; width];
		BigEndian::write_uint(&mut buf, value, width);
		buf
	}
}

/// Reads a single byte as an unsigned integer. Panics if `bytes` is empty;
/// callers are expected to have already checked length (this is a
/// convenience for the common 1-byte-field case, not a parser in its own
/// right).
pub fn read_u8(bytes: &[u8]) -> u8 {
	bytes[0]
}

/// Reads the first two bytes as a big-endian `u16`.
pub fn read_u16_be(bytes: &[u8]) -> u16 {
	BigEndian::read_u16(bytes)
}

/// Reads the first four bytes as a big-endian `u32`.
pub fn read_u32_be(bytes: &[u8]) -> u32 {
	BigEndian::read_u32(bytes)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_is_zero() {
		assert_eq!(Integer::read(&[]), 0);
	}

	#[test]
	fn round_trip_all_widths() {
		for n in 1..=8usize {
			let max = if n == 8 { u64::MAX } else { (1u64 << (8 * n)) - 1 };
			for v in [0, 1, max / 2, max] {
				let bytes = Integer::write(v, n);
				assert_eq!(bytes.len(), n);
				assert_eq!(Integer::read(&bytes), v);
			}
		}
	}

	#[test]
	fn fixed_width_helpers() {
		assert_eq!(read_u8(&[0x7f]), 0x7f);
		assert_eq!(read_u16_be(&[0x01, 0x02]), 0x0102);
		assert_eq!(read_u32_be(&[0x01, 0x02, 0x03, 0x04]), 0x01020304);
	}
}
