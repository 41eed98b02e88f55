//! `LeaseSet`: the published binding between a `Destination` and the
//! tunnels currently willing to deliver to it.

use crate::constants::{KEYS_AND_CERT_PUBLIC_KEY_LEN, MAX_LEASES};
use crate::crypto::{CryptoType, PublicKey, SigningPublicKey};
use crate::error::{I2pError, Result};

use super::keys_and_cert::Destination;
use super::lease::Lease;

/// A destination's current tunnel leases, signed by the destination's
/// signing key.
///
/// The embedded `PublicKey`/`SigningPublicKey` are the encryption/signing
/// keys actually used to receive and authenticate end-to-end traffic for
/// this lease set; the signing key shares its algorithm with (but is not
/// necessarily identical in bytes to) the destination's own identity key.
/// Unlike `KeysAndCert`, there is no certificate here to carry overflow
/// bytes for wide signing keys: the signing-key field is simply as wide as
/// the algorithm requires.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaseSet {
	pub destination: Destination,
	pub public_key: PublicKey,
	pub signing_key: SigningPublicKey,
	pub leases: Vec<Lease>,
	pub signature: Vec<u8>,
}

impl LeaseSet {
	/// Reads a `LeaseSet` from the front of `bytes`.
	///
	/// More than [`MAX_LEASES`] leases declared is fatal; a short/overlong
	/// destination certificate is reported as a warning, matching
	/// `Destination::read`.
	pub fn read(bytes: &[u8]) -> Result<(LeaseSet, &[u8], Option<I2pError>)> {
		let (destination, rest, warning) = Destination::read(bytes)?;

		if rest.len() < KEYS_AND_CERT_PUBLIC_KEY_LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: KEYS_AND_CERT_PUBLIC_KEY_LEN,
				available: rest.len(),
			});
		}
		let (pk_bytes, rest) = rest.split_at(KEYS_AND_CERT_PUBLIC_KEY_LEN);
		let public_key = PublicKey {
			crypto_type: CryptoType::ElGamal2048,
			bytes: pk_bytes.to_vec(),
		};

		// The signing-key algorithm (but not the key material) matches the
		// destination's own certified signing key.
		let sig_type = destination.0.signing_public_key()?.sig_type;
		let spk_len = sig_type.public_key_len();
		if rest.len() < spk_len {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: spk_len,
				available: rest.len(),
			});
		}
		let (spk_bytes, rest) = rest.split_at(spk_len);
		let signing_key = SigningPublicKey {
			sig_type,
			bytes: spk_bytes.to_vec(),
		};

		if rest.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let num_leases = rest[0] as usize;
		if num_leases > MAX_LEASES {
			return Err(I2pError::SizeLimitExceeded {
				what: "LeaseSet lease count",
				actual: num_leases,
				limit: MAX_LEASES,
			});
		}
		let mut rest = &rest[1..];
		let mut leases = Vec::with_capacity(num_leases);
		for _ in 0..num_leases {
			let (lease, remainder) = Lease::read(rest)?;
			leases.push(lease);
			rest = remainder;
		}

		let sig_len = sig_type.signature_len();
		if rest.len() < sig_len {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: sig_len,
				available: rest.len(),
			});
		}
		let (sig_bytes, remainder) = rest.split_at(sig_len);

		Ok((
			LeaseSet {
				destination,
				public_key,
				signing_key,
				leases,
				signature: sig_bytes.to_vec(),
			},
			remainder,
			warning,
		))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::new();
		buf.extend_from_slice(&self.destination.to_bytes());
		buf.extend_from_slice(&self.public_key.bytes);
		buf.extend_from_slice(&self.signing_key.bytes);
		buf.push(self.leases.len() as u8);
		for lease in &self.leases {
			buf.extend_from_slice(&lease.to_bytes());
		}
		buf.extend_from_slice(&self.signature);
		buf
	}

	/// The bytes a verifier checks `signature` against: everything up to but
	/// not including the signature itself.
	pub fn signed_bytes(&self) -> Vec<u8> {
		let mut buf = self.to_bytes();
		let sig_len = self.signature.len();
		buf.truncate(buf.len() - sig_len);
		buf
	}

	pub fn newest_expiration(&self) -> Option<super::date::I2PDate> {
		self.leases.iter().map(|l| l.end_date).max()
	}

	pub fn oldest_expiration(&self) -> Option<super::date::I2PDate> {
		self.leases.iter().map(|l| l.end_date).min()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::common::certificate::{Certificate, CertificateType};
	use crate::common::date::I2PDate;
	use crate::common::hash::Hash;
	use crate::common::keys_and_cert::KeysAndCert;
	use pretty_assertions::assert_eq;

	fn sample_destination() -> Destination {
		Destination(KeysAndCert::new(
			[1u8; KEYS_AND_CERT_PUBLIC_KEY_LEN],
			[2u8; crate::constants::KEYS_AND_CERT_SPK_LEN],
			Certificate::new(CertificateType::Null, vec![]),
		))
	}

	fn sample_lease(seed: u8) -> Lease {
		Lease {
			tunnel_gateway: Hash::compute(&[seed]),
			tunnel_id: seed as u32,
			end_date: I2PDate(1_700_000_000_000 + seed as u64),
		}
	}

	#[test]
	fn round_trips_with_legacy_dsa_signing_key() {
		let destination = sample_destination();
		let leases = vec![sample_lease(1), sample_lease(2)];
		let leaseset = LeaseSet {
			destination: destination.clone(),
			public_key: PublicKey {
				crypto_type: CryptoType::ElGamal2048,
				bytes: vec![3u8; 256],
			},
			signing_key: SigningPublicKey {
				sig_type: crate::crypto::SigType::DsaSha1,
				bytes: vec![4u8; 128],
			},
			leases,
			signature: vec![5u8; 40],
		};
		let bytes = leaseset.to_bytes();
		let (decoded, rest, warning) = LeaseSet::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert!(warning.is_none());
		assert_eq!(decoded, leaseset);
	}

	#[test]
	fn too_many_leases_is_fatal() {
		let destination = sample_destination();
		let mut leases = Vec::new();
		for i in 0..(MAX_LEASES as u8 + 1) {
			leases.push(sample_lease(i));
		}
		let leaseset = LeaseSet {
			destination,
			public_key: PublicKey {
				crypto_type: CryptoType::ElGamal2048,
				bytes: vec![0u8; 256],
			},
			signing_key: SigningPublicKey {
				sig_type: crate::crypto::SigType::DsaSha1,
				bytes: vec![0u8; 128],
			},
			leases,
			signature: vec![0u8; 40],
		};
		// Hand-build wire bytes with the too-large count byte; `to_bytes` would
		// itself produce an unreadable count since it casts `len() as u8`.
		let mut buf = Vec::new();
		buf.extend_from_slice(&leaseset.destination.to_bytes());
		buf.extend_from_slice(&leaseset.public_key.bytes);
		buf.extend_from_slice(&leaseset.signing_key.bytes);
		buf.push(leaseset.leases.len() as u8); // wraps to MAX_LEASES+1 only if <256
		for lease in &leaseset.leases {
			buf.extend_from_slice(&lease.to_bytes());
		}
		buf.extend_from_slice(&leaseset.signature);
		assert!(LeaseSet::read(&buf).is_err());
	}

	#[test]
	fn newest_and_oldest_expiration() {
		let destination = sample_destination();
		let leaseset = LeaseSet {
			destination,
			public_key: PublicKey {
				crypto_type: CryptoType::ElGamal2048,
				bytes: vec![0u8; 256],
			},
			signing_key: SigningPublicKey {
				sig_type: crate::crypto::SigType::DsaSha1,
				bytes: vec![0u8; 128],
			},
			leases: vec![sample_lease(1), sample_lease(9), sample_lease(5)],
			signature: vec![0u8; 40],
		};
		assert_eq!(leaseset.oldest_expiration().unwrap().0, 1_700_000_000_001);
		assert_eq!(leaseset.newest_expiration().unwrap().0, 1_700_000_000_009);
	}
}
