//! The `I2PString` primitive: a 1-byte length prefix followed by UTF-8 bytes.

use crate::error::{Diagnosed, I2pError};

/// A length-prefixed UTF-8 string, at most 255 bytes long.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct I2PString(pub String);

impl I2PString {
	pub fn new(s: &str) -> Self {
		I2PString(String::from(s))
	}

	/// Builds an `I2PString`, failing if `text` exceeds 255 bytes.
	pub fn encode(text: &str) -> Result<Vec<u8>, I2pError> {
		if text.len() > 255 {
			return Err(I2pError::SizeLimitExceeded {
				what: "I2PString",
				actual: text.len(),
				limit: 255,
			});
		}
		let mut buf = Vec::with_capacity(1 + text.len());
		buf.push(text.len() as u8);
		buf.extend_from_slice(text.as_bytes());
		Ok(buf)
	}

	/// Reads a length-prefixed string from `bytes`.
	///
	/// - Empty input is fatal (no length byte to read).
	/// - If fewer payload bytes are present than declared, returns a
	///   short-payload warning with whatever bytes exist.
	/// - If more bytes are present than declared, returns the string plus
	///   the trailing remainder, with no error.
	/// - Otherwise returns an exact match with an empty remainder.
	pub fn read(bytes: &[u8]) -> Result<Diagnosed<'_, I2PString>, I2pError> {
		if bytes.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let len = bytes[0] as usize;
		let payload = &bytes[1..];
		if payload.len() < len {
			let s = String::from_utf8_lossy(payload).into_owned();
			return Ok(Diagnosed::warn(
				I2PString(s),
				&payload[payload.len()..],
				I2pError::LengthDisagreement {
					declared: len,
					available: payload.len(),
				},
			));
		}
		let (text, rest) = payload.split_at(len);
		let s = std::str::from_utf8(text)
			.map_err(|_| I2pError::Utf8Invalid { offset: 1 })?
			.to_string();
		Ok(Diagnosed::ok(I2PString(s), rest))
	}

	pub fn to_csv(&self) -> Vec<Self> {
		self.0.split(',').map(Self::new).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trip_exact() {
		let encoded = I2PString::encode("hello").unwrap();
		let diag = I2PString::read(&encoded).unwrap();
		let (s, rest) = diag.into_strict().unwrap();
		assert_eq!(s.0, "hello");
		assert!(rest.is_empty());
	}

	#[test]
	fn overflow_rejected() {
		let long = "a".repeat(256);
		assert!(I2PString::encode(&long).is_err());
		let ok = "a".repeat(255);
		assert!(I2PString::encode(&ok).is_ok());
	}

	#[test]
	fn trailing_data_has_no_error() {
		let mut encoded = I2PString::encode("hi").unwrap();
		encoded.push(0xff);
		let diag = I2PString::read(&encoded).unwrap();
		assert!(diag.warning.is_none());
		let (s, rest) = diag.into_strict().unwrap();
		assert_eq!(s.0, "hi");
		assert_eq!(rest, &[0xff]);
	}

	#[test]
	fn short_payload_warns() {
		let diag = I2PString::read(&[5, b'h', b'i']).unwrap();
		assert!(diag.warning.is_some());
		assert_eq!(diag.value.0, "hi");
	}

	#[test]
	fn empty_is_fatal() {
		assert!(I2PString::read(&[]).is_err());
	}

	#[test]
	fn to_csv_splits() {
		let s = I2PString::new("a,b,c");
		assert_eq!(
			s.to_csv(),
			vec![I2PString::new("a"), I2PString::new("b"), I2PString::new("c")]
		);
	}
}
