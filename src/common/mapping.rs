//! `Mapping`: a canonically-ordered, canonically-encoded key/value bag.
//!
//! Used wherever a signed structure needs a stable byte representation of
//! an options bag (RouterAddress options, RouterInfo options, ...). The
//! canonical sort order (value ascending, then key ascending, both stable)
//! is part of the wire contract: two routers that build the same logical
//! mapping must produce identical bytes.

use nom::bytes::complete::tag;
use nom::IResult;

use crate::error::{I2pError, Result};

use super::integer::read_u16_be;
use super::string::I2PString;

/// An ordered bag of key/value pairs, as they appear (or will appear) on
/// the wire. Order matters here, unlike a `HashMap`: it is what
/// [`Mapping::canonicalize`] establishes and [`Mapping::encode`] relies on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mapping(pub Vec<(I2PString, I2PString)>);

impl Mapping {
	pub fn new(pairs: Vec<(I2PString, I2PString)>) -> Self {
		Mapping(pairs)
	}

	pub fn get(&self, key: &str) -> Option<&I2PString> {
		self.0.iter().find(|(k, _)| k.0 == key).map(|(_, v)| v)
	}

	/// Two-pass stable sort: by value ascending, then by key ascending. The
	/// second (stable) pass leaves same-key pairs ordered by value from the
	/// first pass, yielding a total order primary-by-key, secondary-by-value.
	pub fn canonicalize(&mut self) {
		self.0.sort_by(|a, b| a.1.cmp(&b.1));
		self.0.sort_by(|a, b| a.0.cmp(&b.0));
	}

	pub fn has_duplicate_keys(&self) -> bool {
		let mut keys: Vec<&str> = self.0.iter().map(|(k, _)| k.0.as_str()).collect();
		keys.sort_unstable();
		keys.windows(2).any(|w| w[0] == w[1])
	}

	/// Encodes the mapping in its current order: a 2-byte total length
	/// followed by `I2PString(key) "=" I2PString(value) ";"` for each pair.
	/// Callers that need the canonical wire form should call
	/// [`Mapping::canonicalize`] first.
	pub fn encode(&self) -> Result<Vec<u8>> {
		let mut body = Vec::new();
		for (key, value) in &self.0 {
			body.extend_from_slice(&I2PString::encode(&key.0)?);
			body.push(b'=');
			body.extend_from_slice(&I2PString::encode(&value.0)?);
			body.push(b';');
		}
		if body.len() > u16::MAX as usize {
			return Err(I2pError::SizeLimitExceeded {
				what: "Mapping",
				actual: body.len(),
				limit: u16::MAX as usize,
			});
		}
		let mut out = Vec::with_capacity(2 + body.len());
		out.extend_from_slice(&(body.len() as u16).to_be_bytes());
		out.extend_from_slice(&body);
		Ok(out)
	}

	/// Reads a `Mapping` from `bytes`: a 2-byte length prefix followed by
	/// that many bytes of `key=value;` pairs.
	///
	/// Tolerates the same short/overlong length disagreements as
	/// `Certificate`; a missing `=` or `;` between fields is fatal for the
	/// mapping (but not for whatever structure embeds it).
	pub fn read(bytes: &[u8]) -> Result<(Mapping, &[u8], Option<I2pError>)> {
		if bytes.len() < 2 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 2,
				available: bytes.len(),
			});
		}
		let declared_len = read_u16_be(&bytes[0..2]) as usize;
		let rest = &bytes[2..];

		let (body, remainder, warning) = if rest.len() < declared_len {
			log::debug!(
				"mapping at offset 2 declares length {} but only {} bytes are available",
				declared_len,
				rest.len()
			);
			(
				rest,
				&rest[rest.len()..],
				Some(I2pError::LengthDisagreement {
					declared: declared_len,
					available: rest.len(),
				}),
			)
		} else {
			let (body, remainder) = rest.split_at(declared_len);
			(body, remainder, None)
		};

		let pairs = parse_pairs(body)?;
		Ok((Mapping(pairs), remainder, warning))
	}
}

fn semicolon(input: &[u8]) -> IResult<&[u8], &[u8]> {
	tag(b";".as_slice())(input)
}

fn equals(input: &[u8]) -> IResult<&[u8], &[u8]> {
	tag(b"=".as_slice())(input)
}

fn parse_pairs(mut body: &[u8]) -> Result<Vec<(I2PString, I2PString)>> {
	let mut pairs = Vec::new();
	while !body.is_empty() {
		let (key, rest) = I2PString::read(body)?.into_strict()?;
		let rest = equals(rest)
			.map_err(|_| I2pError::FormatViolation { expected: "'='" })?
			.0;
		let (value, rest) = I2PString::read(rest)?.into_strict()?;
		let rest = semicolon(rest)
			.map_err(|_| I2pError::FormatViolation { expected: "';'" })?
			.0;
		pairs.push((key, value));
		body = rest;
	}
	Ok(pairs)
}
