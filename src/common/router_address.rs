//! `RouterAddress`: a cost, an expiration `Date`, a transport-style string,
//! and an options `Mapping` describing how to reach a router over one
//! transport.

use crate::error::{I2pError, Result};

use super::date::I2PDate;
use super::integer::read_u8;
use super::mapping::Mapping;
use super::string::I2PString;

/// One way to reach a router: which transport, how expensive it is
/// relative to other addresses, when it expires, and transport-specific
/// options (host, port, NTCP2/SSU keys, ...).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouterAddress {
	pub cost: u8,
	pub expiration: I2PDate,
	pub transport_style: I2PString,
	pub options: Mapping,
}

impl RouterAddress {
	/// `cost(1) + expiration(8)`: the minimum an address can be, before its
	/// (mandatory) transport-style string.
	pub const MIN_LEN: usize = 9;

	pub fn option(&self, key: &str) -> Option<&I2PString> {
		self.options.get(key)
	}

	/// Reads a `RouterAddress` from the front of `bytes`.
	///
	/// The options `Mapping` is only present if at least 2 bytes remain
	/// after the transport-style string; an address with nothing left is
	/// read as carrying an empty mapping rather than erroring, matching the
	/// "options is optional" note in the common-structures specification.
	pub fn read(bytes: &[u8]) -> Result<(RouterAddress, &[u8], Option<I2pError>)> {
		if bytes.len() < Self::MIN_LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: Self::MIN_LEN,
				available: bytes.len(),
			});
		}
		let cost = read_u8(&bytes[0..1]);
		let (expiration, rest) = I2PDate::read(&bytes[1..])?;

		let (transport_style, rest) = I2PString::read(rest)?.into_strict()?;

		let (options, rest, warning) = if rest.len() >= 2 {
			Mapping::read(rest)?
		} else {
			(Mapping::new(Vec::new()), rest, None)
		};

		Ok((
			RouterAddress {
				cost,
				expiration,
				transport_style,
				options,
			},
			rest,
			warning,
		))
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut buf = Vec::with_capacity(Self::MIN_LEN);
		buf.push(self.cost);
		buf.extend_from_slice(&self.expiration.to_bytes());
		buf.extend_from_slice(&I2PString::encode(&self.transport_style.0)?);
		buf.extend_from_slice(&self.options.encode()?);
		Ok(buf)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> RouterAddress {
		RouterAddress {
			cost: 10,
			expiration: I2PDate(0),
			transport_style: I2PString::new("NTCP2"),
			options: Mapping::new(vec![(I2PString::new("host"), I2PString::new("127.0.0.1"))]),
		}
	}

	#[test]
	fn round_trips() {
		let addr = sample();
		let bytes = addr.to_bytes().unwrap();
		let (decoded, rest, warning) = RouterAddress::read(&bytes).unwrap();
		assert_eq!(decoded, addr);
		assert!(rest.is_empty());
		assert!(warning.is_none());
	}

	#[test]
	fn option_lookup() {
		let addr = sample();
		assert_eq!(addr.option("host").unwrap().0, "127.0.0.1");
		assert!(addr.option("port").is_none());
	}

	#[test]
	fn missing_options_reads_as_empty_mapping() {
		let mut buf = vec![0u8; 9];
		buf.extend_from_slice(&I2PString::encode("SSU").unwrap());
		// No trailing bytes at all for the options mapping.
		let (addr, rest, warning) = RouterAddress::read(&buf).unwrap();
		assert!(addr.options.0.is_empty());
		assert!(rest.is_empty());
		assert!(warning.is_none());
	}

	#[test]
	fn too_short_is_fatal() {
		assert!(RouterAddress::read(&[0u8; 8]).is_err());
	}
}
