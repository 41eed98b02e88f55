//! Tagged-variant key types and the tunnel double-AES primitive.
//!
//! The wire format allows nine closed families of signing key and one
//! family of encryption key; rather than aliasing raw byte slices as the
//! original implementation does, each family is a variant of a sum type
//! with a `verify`/classification capability, per the common-structures
//! specification's key-certificate redesign note.

mod tunnel_cipher;

pub use tunnel_cipher::TunnelCipher;

use crate::error::{EnumKind, I2pError, Result};

/// The nine signing-key algorithms the wire format can name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SigType {
	DsaSha1,
	EcdsaSha256P256,
	EcdsaSha384P384,
	EcdsaSha512P521,
	RsaSha2562048,
	RsaSha3843072,
	RsaSha5124096,
	Ed25519,
	Ed25519ph,
}

impl SigType {
	pub fn from_code(code: u16) -> Result<Self> {
		match code {
			0 => Ok(SigType::DsaSha1),
			1 => Ok(SigType::EcdsaSha256P256),
			2 => Ok(SigType::EcdsaSha384P384),
			3 => Ok(SigType::EcdsaSha512P521),
			4 => Ok(SigType::RsaSha2562048),
			5 => Ok(SigType::RsaSha3843072),
			6 => Ok(SigType::RsaSha5124096),
			7 => Ok(SigType::Ed25519),
			8 => Ok(SigType::Ed25519ph),
			other => Err(I2pError::UnknownEnum {
				kind: EnumKind::SigningKeyType,
				value: other as u64,
			}),
		}
	}

	pub fn code(self) -> u16 {
		match self {
			SigType::DsaSha1 => 0,
			SigType::EcdsaSha256P256 => 1,
			SigType::EcdsaSha384P384 => 2,
			SigType::EcdsaSha512P521 => 3,
			SigType::RsaSha2562048 => 4,
			SigType::RsaSha3843072 => 5,
			SigType::RsaSha5124096 => 6,
			SigType::Ed25519 => 7,
			SigType::Ed25519ph => 8,
		}
	}

	/// Signature size in bytes, per the common-structures specification's
	/// signing-types table.
	pub fn signature_len(self) -> usize {
		match self {
			SigType::DsaSha1 => 40,
			SigType::EcdsaSha256P256 => 64,
			SigType::EcdsaSha384P384 => 96,
			SigType::EcdsaSha512P521 => 132,
			SigType::RsaSha2562048 => 256,
			SigType::RsaSha3843072 => 384,
			SigType::RsaSha5124096 => 512,
			SigType::Ed25519 => 64,
			SigType::Ed25519ph => 64,
		}
	}

	/// Public key size in bytes, per the same table.
	pub fn public_key_len(self) -> usize {
		match self {
			SigType::DsaSha1 => 128,
			SigType::EcdsaSha256P256 => 64,
			SigType::EcdsaSha384P384 => 96,
			SigType::EcdsaSha512P521 => 132,
			SigType::RsaSha2562048 => 256,
			SigType::RsaSha3843072 => 384,
			SigType::RsaSha5124096 => 512,
			SigType::Ed25519 => 32,
			SigType::Ed25519ph => 32,
		}
	}
}

/// The one encryption-key algorithm family the wire format currently names.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CryptoType {
	ElGamal2048,
}

impl CryptoType {
	pub fn from_code(code: u16) -> Result<Self> {
		match code {
			0 => Ok(CryptoType::ElGamal2048),
			other => Err(I2pError::UnknownEnum {
				kind: EnumKind::CryptoKeyType,
				value: other as u64,
			}),
		}
	}

	pub fn code(self) -> u16 {
		match self {
			CryptoType::ElGamal2048 => 0,
		}
	}

	pub fn public_key_len(self) -> usize {
		match self {
			CryptoType::ElGamal2048 => 256,
		}
	}
}

/// A signing public key, tagged by algorithm. The byte material is kept
/// opaque (this crate parses and sizes keys; it does not implement the
/// math for every algorithm).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SigningPublicKey {
	pub sig_type: SigType,
	pub bytes: Vec<u8>,
}

/// Error produced when verification is attempted through an algorithm
/// this crate does not (yet) wire a real verifier for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SigError {
	#[error("signature length mismatch")]
	LengthMismatch,
	#[error("signature verification failed")]
	Invalid,
	#[error("verification for this signing algorithm is not implemented")]
	UnsupportedAlgorithm,
}

impl SigningPublicKey {
	/// Verifies `signature` over `message`.
	///
	/// Only Ed25519/Ed25519ph are wired to a real verifier in this crate,
	/// matching the upstream reference implementation's own incomplete
	/// coverage (DSA/ECDSA/RSA classification and sizing is fully
	/// implemented for wire-parsing purposes, but no verifying crate is
	/// wired in for them yet).
	pub fn verify(&self, message: &[u8], signature: &[u8]) -> std::result::Result<(), SigError> {
		if signature.len() != self.sig_type.signature_len() {
			return Err(SigError::LengthMismatch);
		}
		match self.sig_type {
			SigType::Ed25519 | SigType::Ed25519ph => {
				use ed25519_dalek::{Signature, Verifier, VerifyingKey};
				let key_bytes: [u8; 32] = self
					.bytes
					.get(..32)
					.and_then(|s| s.try_into().ok())
					.ok_or(SigError::LengthMismatch)?;
				let verifying_key =
					VerifyingKey::from_bytes(&key_bytes).map_err(|_| SigError::Invalid)?;
				let sig_bytes: [u8; 64] =
					signature.try_into().map_err(|_| SigError::LengthMismatch)?;
				let signature = Signature::from_bytes(&sig_bytes);
				verifying_key
					.verify(message, &signature)
					.map_err(|_| SigError::Invalid)
			}
			_ => Err(SigError::UnsupportedAlgorithm),
		}
	}
}

/// The public-key half of the one supported encryption family (ElGamal-2048).
/// Other crypto types would be additional enum variants; none are currently
/// defined by the protocol.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
	pub crypto_type: CryptoType,
	pub bytes: Vec<u8>,
}
