//! Structured diagnostics shared by every parser in this crate.
//!
//! Wire parsers never log at error severity themselves; they return one of
//! these variants and let the caller decide severity. Callers that want a
//! trace of *why* a parse failed should log the `Display` output at `debug`
//! or `warn`, matching the kind's documented severity in the project's
//! common-structures specification.

use thiserror::Error as ThisError;

/// The kind of enumeration a caller was decoding when it hit an unknown value.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum EnumKind {
	CertificateType,
	SigningKeyType,
	CryptoKeyType,
	Su3SignatureType,
	Su3FileType,
	Su3ContentType,
	I2npMessageType,
}

impl std::fmt::Display for EnumKind {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let s = match self {
			EnumKind::CertificateType => "certificate type",
			EnumKind::SigningKeyType => "signing key type",
			EnumKind::CryptoKeyType => "crypto key type",
			EnumKind::Su3SignatureType => "SU3 signature type",
			EnumKind::Su3FileType => "SU3 file type",
			EnumKind::Su3ContentType => "SU3 content type",
			EnumKind::I2npMessageType => "I2NP message type",
		};
		f.write_str(s)
	}
}

/// Structured diagnostic / error taxonomy for the wire-format codec.
///
/// Variants map 1:1 onto the kinds named in the common-structures and I2NP
/// specifications; fatal-vs-warning is a property of *where* a variant is
/// returned (see each parser's doc comment), not of the variant itself.
#[derive(Clone, Eq, PartialEq, Debug, ThisError)]
pub enum I2pError {
	#[error("input too short at offset {offset}: need {needed} bytes, have {available}")]
	InputTooShort {
		offset: usize,
		needed: usize,
		available: usize,
	},

	#[error("length disagreement: declared {declared}, available {available}")]
	LengthDisagreement { declared: usize, available: usize },

	#[error("invalid magic bytes: expected {expected:?}, got {got:?}")]
	InvalidMagic { expected: Vec<u8>, got: Vec<u8> },

	#[error("reserved byte at offset {offset} was non-zero: {value:#04x}")]
	ReservedNonZero { offset: usize, value: u8 },

	#[error("unknown {kind}: {value}")]
	UnknownEnum { kind: EnumKind, value: u64 },

	#[error("invalid utf-8 at offset {offset}")]
	Utf8Invalid { offset: usize },

	#[error("format violation: expected {expected}")]
	FormatViolation { expected: &'static str },

	#[error("size limit exceeded: {what} is {actual}, limit is {limit}")]
	SizeLimitExceeded {
		what: &'static str,
		actual: usize,
		limit: usize,
	},

	#[error("crypto mismatch: {what}")]
	CryptoMismatch { what: &'static str },

	#[error("no transport available for peer")]
	TransportUnavailable,
}

pub type Result<T> = std::result::Result<T, I2pError>;

/// A value decoded alongside a non-fatal diagnostic and the unconsumed remainder.
///
/// Used for parses where a length field disagrees with the available data
/// but a best-effort value can still be produced (§4.1's "warning" path).
/// Upstream signed-data verifiers should treat `Some(_)` here as fatal;
/// casual readers may tolerate it.
#[derive(Clone, Debug)]
pub struct Diagnosed<'a, T> {
	pub value: T,
	pub remainder: &'a [u8],
	pub warning: Option<I2pError>,
}

impl<'a, T> Diagnosed<'a, T> {
	pub fn ok(value: T, remainder: &'a [u8]) -> Self {
		Diagnosed {
			value,
			remainder,
			warning: None,
		}
	}

	pub fn warn(value: T, remainder: &'a [u8], warning: I2pError) -> Self {
		Diagnosed {
			value,
			remainder,
			warning: Some(warning),
		}
	}

	/// Rejects any warning-grade diagnostic, for signed-data contexts.
	pub fn into_strict(self) -> Result<(T, &'a [u8])> {
		match self.warning {
			Some(e) => Err(e),
			None => Ok((self.value, self.remainder)),
		}
	}

	/// Accepts the best-effort value regardless of warnings, for casual readers.
	pub fn into_lenient(self) -> (T, &'a [u8], Option<I2pError>) {
		(self.value, self.remainder, self.warning)
	}
}
