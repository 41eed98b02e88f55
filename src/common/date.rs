//! The `Date` primitive: milliseconds since the Unix epoch, big-endian.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{I2pError, Result};

/// Milliseconds since midnight on January 1, 1970 UTC. A value of `0`
/// means the date is undefined or null.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct I2PDate(pub u64);

impl I2PDate {
	pub const LEN: usize = 8;

	/// Parses the 8-byte big-endian millisecond count at the front of `bytes`.
	pub fn read(bytes: &[u8]) -> Result<(I2PDate, &[u8])> {
		if bytes.len() < Self::LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: Self::LEN,
				available: bytes.len(),
			});
		}
		let millis = super::integer::Integer::read(&bytes[..Self::LEN]);
		Ok((I2PDate(millis), &bytes[Self::LEN..]))
	}

	pub fn to_bytes(self) -> [u8; 8] {
		let mut buf = [0u8; 8];
		buf.copy_from_slice(&super::integer::Integer::write(self.0, 8));
		buf
	}

	pub fn from_system_time(t: SystemTime) -> Self {
		let d = t.duration_since(UNIX_EPOCH).unwrap_or(Duration::new(0, 0));
		I2PDate(d.as_secs() * 1_000 + u64::from(d.subsec_millis()))
	}

	pub fn unix_seconds(self) -> u64 {
		self.0 / 1_000
	}

	pub fn instant(self) -> SystemTime {
		UNIX_EPOCH + Duration::from_millis(self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_published_date() {
		let bytes = [0x00, 0x00, 0x00, 0x00, 0x05, 0x26, 0x5c, 0x00];
		let (date, rest) = I2PDate::read(&bytes).unwrap();
		assert_eq!(date.0, 86_400_000);
		assert_eq!(date.unix_seconds(), 86_400);
		assert!(rest.is_empty());
	}

	#[test]
	fn round_trips() {
		let date = I2PDate(1_700_000_000_000);
		let bytes = date.to_bytes();
		let (decoded, _) = I2PDate::read(&bytes).unwrap();
		assert_eq!(decoded, date);
	}

	#[test]
	fn too_short_is_fatal() {
		assert!(I2PDate::read(&[0u8; 4]).is_err());
	}
}
