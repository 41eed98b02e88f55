//! The `Certificate` TLV: 1-byte type, 2-byte length, length bytes payload.

use crate::error::{EnumKind, I2pError, Result};

/// The six certificate types defined by the common-structures specification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CertificateType {
	Null,
	HashCash,
	Hidden,
	Signed,
	Multiple,
	Key,
}

impl CertificateType {
	fn from_byte(b: u8) -> Result<Self> {
		match b {
			0 => Ok(CertificateType::Null),
			1 => Ok(CertificateType::HashCash),
			2 => Ok(CertificateType::Hidden),
			3 => Ok(CertificateType::Signed),
			4 => Ok(CertificateType::Multiple),
			5 => Ok(CertificateType::Key),
			other => Err(I2pError::UnknownEnum {
				kind: EnumKind::CertificateType,
				value: other as u64,
			}),
		}
	}

	fn to_byte(self) -> u8 {
		match self {
			CertificateType::Null => 0,
			CertificateType::HashCash => 1,
			CertificateType::Hidden => 2,
			CertificateType::Signed => 3,
			CertificateType::Multiple => 4,
			CertificateType::Key => 5,
		}
	}
}

/// A certificate: type byte, declared length, and its (possibly
/// short/overlong) payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Certificate {
	cert_type: CertificateType,
	/// The length declared in the wire header; may disagree with `data.len()`
	/// when the certificate was read from a short or overlong buffer.
	declared_len: usize,
	data: Vec<u8>,
}

impl Certificate {
	pub fn new(cert_type: CertificateType, data: Vec<u8>) -> Self {
		let declared_len = data.len();
		Certificate {
			cert_type,
			declared_len,
			data,
		}
	}

	pub fn cert_type(&self) -> CertificateType {
		self.cert_type
	}

	pub fn declared_len(&self) -> usize {
		self.declared_len
	}

	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// `3 + declared_len`: the number of bytes this certificate occupies on
	/// the wire when its length field is honored.
	pub fn wire_len(&self) -> usize {
		3 + self.declared_len
	}

	/// Reads a certificate from `bytes`, classifying into one of three
	/// outcomes: exact fit, short payload (warning, partial data), or
	/// trailing data (warning-free, remainder returned).
	///
	/// Fewer than 3 bytes total is fatal: there is no way to read the type
	/// and length fields at all.
	pub fn read(bytes: &[u8]) -> Result<(Certificate, &[u8], Option<I2pError>)> {
		if bytes.len() < 3 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 3,
				available: bytes.len(),
			});
		}
		let cert_type = CertificateType::from_byte(bytes[0])?;
		let declared_len = super::integer::read_u16_be(&bytes[1..3]) as usize;
		let payload = &bytes[3..];

		if payload.len() < declared_len {
			// Short payload: warn, return everything that is actually there.
			log::debug!(
				"certificate at offset 3 declares length {} but only {} bytes are available",
				declared_len,
				payload.len()
			);
			let cert = Certificate {
				cert_type,
				declared_len,
				data: payload.to_vec(),
			};
			let warning = I2pError::LengthDisagreement {
				declared: declared_len,
				available: payload.len(),
			};
			return Ok((cert, &payload[payload.len()..], Some(warning)));
		}

		if payload.len() > declared_len {
			// Trailing data: no error, just split at the declared length.
			let (data, remainder) = payload.split_at(declared_len);
			let cert = Certificate {
				cert_type,
				declared_len,
				data: data.to_vec(),
			};
			return Ok((cert, remainder, None));
		}

		// Exact fit.
		let cert = Certificate {
			cert_type,
			declared_len,
			data: payload.to_vec(),
		};
		Ok((cert, &payload[payload.len()..], None))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(3 + self.data.len());
		buf.push(self.cert_type.to_byte());
		buf.extend_from_slice(&super::integer::Integer::write(self.data.len() as u64, 2));
		buf.extend_from_slice(&self.data);
		buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_payload_case() {
		// type=3, length=2, but only one byte of payload present.
		let (cert, rest, warn) = Certificate::read(&[0x03, 0x00, 0x02, 0xFF]).unwrap();
		assert_eq!(cert.cert_type(), CertificateType::Signed);
		assert_eq!(cert.declared_len(), 2);
		assert_eq!(cert.data(), &[0xFF]);
		assert!(rest.is_empty());
		assert!(warn.is_some());
	}

	#[test]
	fn trailing_data_case() {
		let (cert, rest, warn) = Certificate::read(&[0x00, 0x00, 0x02, 0xFF, 0xFF, 0x01]).unwrap();
		assert_eq!(cert.cert_type(), CertificateType::Null);
		assert_eq!(cert.data(), &[0xFF, 0xFF]);
		assert_eq!(rest, &[0x01]);
		assert!(warn.is_none());
	}

	#[test]
	fn exact_fit_case() {
		let (cert, rest, warn) = Certificate::read(&[0x00, 0x00, 0x00]).unwrap();
		assert_eq!(cert.cert_type(), CertificateType::Null);
		assert_eq!(cert.data(), &[] as &[u8]);
		assert!(rest.is_empty());
		assert!(warn.is_none());
	}

	#[test]
	fn too_short_is_fatal() {
		assert!(Certificate::read(&[0x00, 0x00]).is_err());
	}

	#[test]
	fn round_trip_to_bytes() {
		let cert = Certificate::new(CertificateType::Key, vec![1, 2, 3, 4]);
		let bytes = cert.to_bytes();
		let (decoded, rest, warn) = Certificate::read(&bytes).unwrap();
		assert_eq!(decoded, cert);
		assert!(rest.is_empty());
		assert!(warn.is_none());
	}
}
