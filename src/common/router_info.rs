//! `RouterInfo`: everything a router publishes about itself to the NetDB —
//! its identity, addresses, publication date, and options, signed with its
//! own signing key.

use crate::error::{I2pError, Result};

use super::integer::read_u8;
use super::keys_and_cert::RouterIdentity;
use super::mapping::Mapping;
use super::router_address::RouterAddress;

/// A router's published record: identity, reachability, and options,
/// signed end-to-end.
///
/// `peer_size` is carried for wire fidelity even though the specification
/// fixes it at 0 (unused since the early network, kept so `to_bytes`
/// round-trips byte-for-byte with anything this crate reads).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouterInfo {
	pub router_identity: RouterIdentity,
	pub published: super::date::I2PDate,
	pub addresses: Vec<RouterAddress>,
	pub peer_size: u8,
	pub options: Mapping,
	pub signature: Vec<u8>,
}

impl RouterInfo {
	/// Reads a `RouterInfo` from the front of `bytes`.
	///
	/// The signature's length is derived from the `RouterIdentity`'s key
	/// certificate (legacy 40-byte DSA when no key certificate is present),
	/// per the common-structures specification's signature-size rule.
	pub fn read(bytes: &[u8]) -> Result<(RouterInfo, &[u8], Option<I2pError>)> {
		let (router_identity, rest, mut warning) = RouterIdentity::read(bytes)?;

		let (published, rest) = super::date::I2PDate::read(rest)?;

		if rest.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let address_count = read_u8(&rest[0..1]) as usize;
		let mut rest = &rest[1..];

		let mut addresses = Vec::with_capacity(address_count);
		for _ in 0..address_count {
			let (addr, remainder, addr_warning) = RouterAddress::read(rest)?;
			addresses.push(addr);
			rest = remainder;
			warning = warning.or(addr_warning);
		}

		if rest.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let peer_size = read_u8(&rest[0..1]);
		let rest = &rest[1..];

		let (options, rest, options_warning) = Mapping::read(rest)?;
		warning = warning.or(options_warning);

		let sig_type = router_identity.0.signing_public_key()?.sig_type;
		let sig_len = sig_type.signature_len();
		if rest.len() < sig_len {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: sig_len,
				available: rest.len(),
			});
		}
		let (signature, remainder) = rest.split_at(sig_len);

		Ok((
			RouterInfo {
				router_identity,
				published,
				addresses,
				peer_size,
				options,
				signature: signature.to_vec(),
			},
			remainder,
			warning,
		))
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut buf = self.signed_bytes()?;
		buf.extend_from_slice(&self.signature);
		Ok(buf)
	}

	/// The bytes a verifier checks `signature` against: everything up to
	/// but not including the signature itself.
	pub fn signed_bytes(&self) -> Result<Vec<u8>> {
		let mut buf = Vec::new();
		buf.extend_from_slice(&self.router_identity.to_bytes());
		buf.extend_from_slice(&self.published.to_bytes());
		buf.push(self.addresses.len() as u8);
		for addr in &self.addresses {
			buf.extend_from_slice(&addr.to_bytes()?);
		}
		buf.push(self.peer_size);
		buf.extend_from_slice(&self.options.encode()?);
		Ok(buf)
	}

	/// The router's hash: its NetDB key and the address embedded in its
	/// own `RouterIdentity`.
	pub fn hash(&self) -> super::hash::Hash {
		self.router_identity.hash()
	}

	/// Returns addresses whose transport-style string matches `style`.
	pub fn addresses_for_style(&self, style: &str) -> Vec<&RouterAddress> {
		self.addresses
			.iter()
			.filter(|a| a.transport_style.0 == style)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::common::certificate::{Certificate, CertificateType};
	use crate::common::date::I2PDate;
	use crate::common::keys_and_cert::KeysAndCert;
	use crate::common::string::I2PString;
	use crate::constants::{KEYS_AND_CERT_PUBLIC_KEY_LEN, KEYS_AND_CERT_SPK_LEN};
	use pretty_assertions::assert_eq;

	fn sample_identity() -> RouterIdentity {
		RouterIdentity(KeysAndCert::new(
			[3u8; KEYS_AND_CERT_PUBLIC_KEY_LEN],
			[4u8; KEYS_AND_CERT_SPK_LEN],
			Certificate::new(CertificateType::Null, vec![]),
		))
	}

	fn sample_router_info() -> RouterInfo {
		RouterInfo {
			router_identity: sample_identity(),
			published: I2PDate(86_400_000),
			addresses: vec![RouterAddress {
				cost: 10,
				expiration: I2PDate(0),
				transport_style: I2PString::new("NTCP2"),
				options: Mapping::new(vec![]),
			}],
			peer_size: 0,
			options: Mapping::new(vec![]),
			signature: vec![0xAB; 40],
		}
	}

	#[test]
	fn round_trips_with_legacy_dsa_signature() {
		let ri = sample_router_info();
		let bytes = ri.to_bytes().unwrap();
		let (decoded, rest, warning) = RouterInfo::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert!(warning.is_none());
		assert_eq!(decoded, ri);
	}

	#[test]
	fn published_date_matches_concrete_scenario() {
		// 00 00 00 00 05 26 5c 00 -> 86_400_000 ms -> 86_400 unix seconds.
		let ri = sample_router_info();
		assert_eq!(ri.published.unix_seconds(), 86_400);
	}

	#[test]
	fn peer_size_and_address_count_round_trip() {
		let ri = sample_router_info();
		let bytes = ri.to_bytes().unwrap();
		let (decoded, _, _) = RouterInfo::read(&bytes).unwrap();
		assert_eq!(decoded.addresses.len(), 1);
		assert_eq!(decoded.peer_size, 0);
	}

	#[test]
	fn addresses_for_style_filters() {
		let ri = sample_router_info();
		assert_eq!(ri.addresses_for_style("NTCP2").len(), 1);
		assert_eq!(ri.addresses_for_style("SSU").len(), 0);
	}
}
