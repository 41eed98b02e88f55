//! The `Lease`: a fixed 44-byte tunnel-gateway/tunnel-id/expiration triple.

use crate::error::{I2pError, Result};

use super::date::I2PDate;
use super::hash::Hash;
use super::integer::read_u32_be;

/// One entry in a `LeaseSet`: the gateway router and tunnel ID a message
/// can be sent through to reach a destination, plus when that tunnel
/// expires.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Lease {
	pub tunnel_gateway: Hash,
	pub tunnel_id: u32,
	pub end_date: I2PDate,
}

impl Lease {
	pub const LEN: usize = 32 + 4 + 8;

	pub fn read(bytes: &[u8]) -> Result<(Lease, &[u8])> {
		if bytes.len() < Self::LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: Self::LEN,
				available: bytes.len(),
			});
		}
		let (tunnel_gateway, rest) = Hash::read(bytes)?;
		let tunnel_id = read_u32_be(&rest[0..4]);
		let (end_date, rest) = I2PDate::read(&rest[4..])?;
		Ok((
			Lease {
				tunnel_gateway,
				tunnel_id,
				end_date,
			},
			rest,
		))
	}

	pub fn to_bytes(&self) -> [u8; Self::LEN] {
		let mut buf = [0u8; Self::LEN];
		buf[0..32].copy_from_slice(&self.tunnel_gateway.0);
		buf[32..36].copy_from_slice(&self.tunnel_id.to_be_bytes());
		buf[36..44].copy_from_slice(&self.end_date.to_bytes());
		buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips() {
		let lease = Lease {
			tunnel_gateway: Hash::compute(b"gateway"),
			tunnel_id: 0xdead_beef,
			end_date: I2PDate(1_700_000_000_000),
		};
		let bytes = lease.to_bytes();
		assert_eq!(bytes.len(), 44);
		let (decoded, rest) = Lease::read(&bytes).unwrap();
		assert_eq!(decoded, lease);
		assert!(rest.is_empty());
	}

	#[test]
	fn too_short_is_fatal() {
		assert!(Lease::read(&[0u8; 43]).is_err());
	}
}
