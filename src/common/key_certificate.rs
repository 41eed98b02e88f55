//! `KeyCertificate`: the payload of a `Certificate` of type `Key`.
//!
//! Declares the real signing-key and crypto-key algorithms in play for a
//! `KeysAndCert`, and carries any key material that doesn't fit in the
//! fixed 256/128-byte areas.

use crate::crypto::{CryptoType, PublicKey, SigType, SigningPublicKey};
use crate::error::{I2pError, Result};

use super::certificate::{Certificate, CertificateType};
use super::integer::read_u16_be;

/// A parsed `KEY`-type certificate: signing-key type, crypto-key type, and
/// any key material beyond the standard areas.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyCertificate {
	pub sig_type: SigType,
	pub crypto_type: CryptoType,
	/// Extra bytes beyond the certificate's 4-byte type header, present when
	/// `sig_type`'s public key is larger than the legacy 128-byte SPK area.
	pub extra: Vec<u8>,
}

impl KeyCertificate {
	/// Parses a KeyCertificate from a `Certificate` known to be of type `Key`.
	pub fn from_certificate(cert: &Certificate) -> Result<Self> {
		debug_assert_eq!(cert.cert_type(), CertificateType::Key);
		let data = cert.data();
		if data.len() < 4 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 4,
				available: data.len(),
			});
		}
		let sig_type = SigType::from_code(read_u16_be(&data[0..2]))?;
		let crypto_type = CryptoType::from_code(read_u16_be(&data[2..4]))?;
		Ok(KeyCertificate {
			sig_type,
			crypto_type,
			extra: data[4..].to_vec(),
		})
	}

	/// How many bytes of `extra` this key certificate must supply to make up
	/// a full signing public key, beyond the legacy 128-byte SPK area.
	pub fn spk_overflow_len(&self) -> usize {
		self.sig_type
			.public_key_len()
			.saturating_sub(super::super::constants::KEYS_AND_CERT_SPK_LEN)
	}

	/// Assembles the public (encryption) key from the `KeysAndCert`'s
	/// 256-byte public-key area. ElGamal keys occupy the last 256 bytes of
	/// that area (i.e. the whole thing, since it's exactly 256 bytes); the
	/// construction mirrors the original's "copy the last N bytes" rule for
	/// forward-compatibility with any future crypto type that declares a
	/// public key shorter than the area.
	pub fn construct_public_key(&self, pubkey_area: &[u8]) -> PublicKey {
		let want = self.crypto_type.public_key_len();
		let start = pubkey_area.len().saturating_sub(want);
		PublicKey {
			crypto_type: self.crypto_type,
			bytes: pubkey_area[start..].to_vec(),
		}
	}

	/// Assembles the signing public key from the `KeysAndCert`'s 128-byte
	/// SPK area plus, for keys larger than 128 bytes, the certificate's
	/// trailing extra-key material.
	pub fn construct_signing_public_key(&self, spk_area: &[u8]) -> Result<SigningPublicKey> {
		let want = self.sig_type.public_key_len();
		if want <= spk_area.len() {
			let start = spk_area.len() - want;
			return Ok(SigningPublicKey {
				sig_type: self.sig_type,
				bytes: spk_area[start..].to_vec(),
			});
		}
		let overflow = want - spk_area.len();
		if self.extra.len() < overflow {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: overflow,
				available: self.extra.len(),
			});
		}
		let mut bytes = Vec::with_capacity(want);
		bytes.extend_from_slice(spk_area);
		bytes.extend_from_slice(&self.extra[..overflow]);
		Ok(SigningPublicKey {
			sig_type: self.sig_type,
			bytes,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn minimal_key_cert(sig_code: u16, crypto_code: u16, extra: &[u8]) -> Certificate {
		let mut data = vec![0u8; 4];
		data[0..2].copy_from_slice(&sig_code.to_be_bytes());
		data[2..4].copy_from_slice(&crypto_code.to_be_bytes());
		data.extend_from_slice(extra);
		Certificate::new(CertificateType::Key, data)
	}

	#[test]
	fn parses_ed25519_key_cert() {
		let cert = minimal_key_cert(7, 0, &[]);
		let kc = KeyCertificate::from_certificate(&cert).unwrap();
		assert_eq!(kc.sig_type, SigType::Ed25519);
		assert_eq!(kc.crypto_type, CryptoType::ElGamal2048);
		assert_eq!(kc.spk_overflow_len(), 0);
	}

	#[test]
	fn p521_overflows_spk_area() {
		let cert = minimal_key_cert(3, 0, &[0xAB; 4]);
		let kc = KeyCertificate::from_certificate(&cert).unwrap();
		assert_eq!(kc.spk_overflow_len(), 4); // 132 - 128
		let spk_area = vec![0u8; 128];
		let spk = kc.construct_signing_public_key(&spk_area).unwrap();
		assert_eq!(spk.bytes.len(), 132);
		assert_eq!(&spk.bytes[128..], &[0xAB; 4]);
	}

	#[test]
	fn construct_public_key_takes_tail() {
		let cert = minimal_key_cert(7, 0, &[]);
		let kc = KeyCertificate::from_certificate(&cert).unwrap();
		let area = vec![9u8; 256];
		let pk = kc.construct_public_key(&area);
		assert_eq!(pk.bytes.len(), 256);
	}
}
