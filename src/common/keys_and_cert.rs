//! `KeysAndCert`: the 256-byte public-key area, 128-byte SPK area, and
//! trailing `Certificate` shared by `RouterIdentity` and `Destination`.

use crate::crypto::{CryptoType, PublicKey, SigType, SigningPublicKey};
use crate::error::{I2pError, Result};

use super::certificate::{Certificate, CertificateType};
use super::hash::Hash;
use super::key_certificate::KeyCertificate;
use crate::constants::{
	B32_EXT, I2P_BASE32, I2P_BASE64, KEYS_AND_CERT_PUBLIC_KEY_LEN, KEYS_AND_CERT_SPK_LEN,
};

/// The public-key area, signing-key area, and certificate shared by every
/// identity structure on the wire.
///
/// When the trailing certificate is of type `Key`, the real key algorithms
/// (and any overflow key material for signing keys wider than 128 bytes)
/// come from the certificate rather than the legacy assumption of
/// DSA-SHA1/ElGamal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeysAndCert {
	public_key_area: [u8; KEYS_AND_CERT_PUBLIC_KEY_LEN],
	spk_area: [u8; KEYS_AND_CERT_SPK_LEN],
	certificate: Certificate,
}

impl KeysAndCert {
	pub fn new(
		public_key_area: [u8; KEYS_AND_CERT_PUBLIC_KEY_LEN],
		spk_area: [u8; KEYS_AND_CERT_SPK_LEN],
		certificate: Certificate,
	) -> Self {
		KeysAndCert {
			public_key_area,
			spk_area,
			certificate,
		}
	}

	pub fn certificate(&self) -> &Certificate {
		&self.certificate
	}

	fn key_certificate(&self) -> Result<Option<KeyCertificate>> {
		if self.certificate.cert_type() == CertificateType::Key {
			Ok(Some(KeyCertificate::from_certificate(&self.certificate)?))
		} else {
			Ok(None)
		}
	}

	/// The encryption public key, assembled from the 256-byte public-key area.
	/// Legacy (non-Key-certificate) identities are assumed to carry an
	/// ElGamal-2048 key filling the entire area.
	pub fn public_key(&self) -> Result<PublicKey> {
		match self.key_certificate()? {
			Some(kc) => Ok(kc.construct_public_key(&self.public_key_area)),
			None => Ok(PublicKey {
				crypto_type: CryptoType::ElGamal2048,
				bytes: self.public_key_area.to_vec(),
			}),
		}
	}

	/// The signing public key, assembled from the 128-byte SPK area plus, for
	/// algorithms with a public key wider than 128 bytes, the key
	/// certificate's overflow bytes. Legacy identities are assumed to carry a
	/// DSA-SHA1 key filling the entire area.
	pub fn signing_public_key(&self) -> Result<SigningPublicKey> {
		match self.key_certificate()? {
			Some(kc) => kc.construct_signing_public_key(&self.spk_area),
			None => Ok(SigningPublicKey {
				sig_type: SigType::DsaSha1,
				bytes: self.spk_area.to_vec(),
			}),
		}
	}

	/// Reads a `KeysAndCert` from the front of `bytes`: the two fixed-size
	/// areas followed by a `Certificate`. A short or overlong certificate
	/// payload is reported the same way `Certificate::read` reports it.
	pub fn read(bytes: &[u8]) -> Result<(KeysAndCert, &[u8], Option<I2pError>)> {
		let fixed_len = KEYS_AND_CERT_PUBLIC_KEY_LEN + KEYS_AND_CERT_SPK_LEN;
		if bytes.len() < fixed_len {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: fixed_len,
				available: bytes.len(),
			});
		}
		let mut public_key_area = [0u8; KEYS_AND_CERT_PUBLIC_KEY_LEN];
		public_key_area.copy_from_slice(&bytes[0..KEYS_AND_CERT_PUBLIC_KEY_LEN]);
		let mut spk_area = [0u8; KEYS_AND_CERT_SPK_LEN];
		spk_area.copy_from_slice(
			&bytes[KEYS_AND_CERT_PUBLIC_KEY_LEN..fixed_len],
		);

		let (certificate, remainder, warning) = Certificate::read(&bytes[fixed_len..])?;
		let keys_and_cert = KeysAndCert {
			public_key_area,
			spk_area,
			certificate,
		};
		Ok((keys_and_cert, remainder, warning))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(
			KEYS_AND_CERT_PUBLIC_KEY_LEN + KEYS_AND_CERT_SPK_LEN + self.certificate.wire_len(),
		);
		buf.extend_from_slice(&self.public_key_area);
		buf.extend_from_slice(&self.spk_area);
		buf.extend_from_slice(&self.certificate.to_bytes());
		buf
	}

	pub fn hash(&self) -> Hash {
		Hash::compute(&self.to_bytes())
	}
}

/// A router's long-term identity: its encryption and signing public keys,
/// certified by a `Certificate`. Identical on the wire to `Destination`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouterIdentity(pub KeysAndCert);

impl RouterIdentity {
	pub fn read(bytes: &[u8]) -> Result<(RouterIdentity, &[u8], Option<I2pError>)> {
		let (inner, rest, warning) = KeysAndCert::read(bytes)?;
		Ok((RouterIdentity(inner), rest, warning))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		self.0.to_bytes()
	}

	/// The router hash: `SHA256(RouterIdentity)`, used as the router's
	/// address on the network and its NetDB lookup key.
	pub fn hash(&self) -> Hash {
		self.0.hash()
	}
}

/// An endpoint's identity, identical in structure to `RouterIdentity` but
/// addressed by its Base32/Base64 forms rather than a raw `Hash`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Destination(pub KeysAndCert);

impl Destination {
	pub fn read(bytes: &[u8]) -> Result<(Destination, &[u8], Option<I2pError>)> {
		let (inner, rest, warning) = KeysAndCert::read(bytes)?;
		Ok((Destination(inner), rest, warning))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		self.0.to_bytes()
	}

	/// The `.b32.i2p` address: unpadded Base32 of `SHA256(Destination)`.
	pub fn base32_address(&self) -> String {
		let hash = Hash::compute(&self.to_bytes());
		format!("{}{}", I2P_BASE32.encode(&hash.0).to_lowercase(), B32_EXT)
	}

	/// The full Base64 "destkey" form, as used in `.b64` address books.
	pub fn base64(&self) -> String {
		I2P_BASE64.encode(&self.to_bytes())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_keys_and_cert() -> KeysAndCert {
		KeysAndCert::new(
			[7u8; KEYS_AND_CERT_PUBLIC_KEY_LEN],
			[9u8; KEYS_AND_CERT_SPK_LEN],
			Certificate::new(CertificateType::Null, vec![]),
		)
	}

	#[test]
	fn legacy_identity_reports_dsa_and_elgamal() {
		let kac = sample_keys_and_cert();
		assert_eq!(kac.public_key().unwrap().crypto_type, CryptoType::ElGamal2048);
		assert_eq!(kac.signing_public_key().unwrap().sig_type, SigType::DsaSha1);
	}

	#[test]
	fn round_trips_through_bytes() {
		let kac = sample_keys_and_cert();
		let bytes = kac.to_bytes();
		assert_eq!(bytes.len(), crate::constants::KEYS_AND_CERT_MIN_LEN);
		let (decoded, rest, warning) = KeysAndCert::read(&bytes).unwrap();
		assert_eq!(decoded, kac);
		assert!(rest.is_empty());
		assert!(warning.is_none());
	}

	#[test]
	fn key_certificate_identity_reports_ed25519() {
		let mut cert_data = vec![0u8; 4];
		cert_data[0..2].copy_from_slice(&7u16.to_be_bytes()); // Ed25519
		cert_data[2..4].copy_from_slice(&0u16.to_be_bytes()); // ElGamal2048
		let cert = Certificate::new(CertificateType::Key, cert_data);
		let kac = KeysAndCert::new(
			[1u8; KEYS_AND_CERT_PUBLIC_KEY_LEN],
			[2u8; KEYS_AND_CERT_SPK_LEN],
			cert,
		);
		let spk = kac.signing_public_key().unwrap();
		assert_eq!(spk.sig_type, SigType::Ed25519);
		assert_eq!(spk.bytes.len(), 32);
		assert_eq!(&spk.bytes, &[2u8; 32]);
	}

	#[test]
	fn destination_base32_has_expected_suffix() {
		let kac = sample_keys_and_cert();
		let dest = Destination(kac);
		assert!(dest.base32_address().ends_with(".b32.i2p"));
	}
}
