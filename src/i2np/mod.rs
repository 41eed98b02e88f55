//! I2NP: the Inter-Network Protocol carried inside tunnels. Covers the two
//! message-framing variants (NTCP's 16-byte header, SSU's 5-byte header)
//! and the twelve message payload types.
//!
//! [I2NP specification](https://geti2p.net/spec/i2np)

pub mod build_request_record;
pub mod payload;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use crate::common::{read_u16_be, read_u32_be, read_u8, I2PDate, Integer};
use crate::error::{I2pError, Result};

pub use build_request_record::BuildRequestRecord;
pub use payload::MessagePayload;

/// The twelve (plus unknown/experimental/reserved) I2NP message type codes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageType {
	DatabaseStore,
	DatabaseLookup,
	DatabaseSearchReply,
	DeliveryStatus,
	Garlic,
	TunnelData,
	TunnelGateway,
	Data,
	TunnelBuild,
	TunnelBuildReply,
	VariableTunnelBuild,
	VariableTunnelBuildReply,
	/// Type codes 4-9 and 12-17: not assigned by any released spec version.
	/// Accepted (not rejected) per the I2NP spec's forward-compatibility
	/// stance, but callers are expected to drop the message.
	Unknown(u8),
	/// Type codes 224-254: reserved for local experimentation, never sent
	/// on the wire between routers that don't share an understanding.
	Experimental(u8),
	/// Type code 255: reserved.
	Reserved,
}

impl MessageType {
	pub fn from_code(code: u8) -> MessageType {
		match code {
			1 => MessageType::DatabaseStore,
			2 => MessageType::DatabaseLookup,
			3 => MessageType::DatabaseSearchReply,
			10 => MessageType::DeliveryStatus,
			11 => MessageType::Garlic,
			18 => MessageType::TunnelData,
			19 => MessageType::TunnelGateway,
			20 => MessageType::Data,
			21 => MessageType::TunnelBuild,
			22 => MessageType::TunnelBuildReply,
			23 => MessageType::VariableTunnelBuild,
			24 => MessageType::VariableTunnelBuildReply,
			255 => MessageType::Reserved,
			224..=254 => {
				log::debug!("I2NP message type {} is experimental, not fatal", code);
				MessageType::Experimental(code)
			}
			other => {
				log::debug!("I2NP message type {} is unassigned, not fatal", other);
				MessageType::Unknown(other)
			}
		}
	}

	pub fn code(self) -> u8 {
		match self {
			MessageType::DatabaseStore => 1,
			MessageType::DatabaseLookup => 2,
			MessageType::DatabaseSearchReply => 3,
			MessageType::DeliveryStatus => 10,
			MessageType::Garlic => 11,
			MessageType::TunnelData => 18,
			MessageType::TunnelGateway => 19,
			MessageType::Data => 20,
			MessageType::TunnelBuild => 21,
			MessageType::TunnelBuildReply => 22,
			MessageType::VariableTunnelBuild => 23,
			MessageType::VariableTunnelBuildReply => 24,
			MessageType::Unknown(c) | MessageType::Experimental(c) => c,
			MessageType::Reserved => 255,
		}
	}

	/// Whether this type code should be treated as a warning-grade decode
	/// (unknown/experimental/reserved), rather than rejected outright. The
	/// I2NP spec's own guidance is to log and drop, not to tear down the
	/// connection.
	pub fn is_recognized(self) -> bool {
		!matches!(
			self,
			MessageType::Unknown(_) | MessageType::Experimental(_) | MessageType::Reserved
		)
	}
}

/// The standard 16-byte NTCP framing header plus its payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NtcpHeader {
	pub message_type: MessageType,
	pub message_id: u32,
	pub expiration: I2PDate,
	pub payload: Vec<u8>,
}

impl NtcpHeader {
	/// Reads a full NTCP-framed I2NP message: 16-byte header, then `size`
	/// bytes of payload. Validates the checksum (`SHA-256(payload)[0]`)
	/// matches the header's declared checksum byte.
	pub fn read(bytes: &[u8]) -> Result<(NtcpHeader, &[u8])> {
		if bytes.len() < 16 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 16,
				available: bytes.len(),
			});
		}
		let message_type = MessageType::from_code(read_u8(&bytes[0..1]));
		let message_id = read_u32_be(&bytes[1..5]);
		let expiration = I2PDate(Integer::read(&bytes[5..13]));
		let size = read_u16_be(&bytes[13..15]) as usize;
		let declared_checksum = read_u8(&bytes[15..16]);

		if bytes.len() < 16 + size {
			return Err(I2pError::InputTooShort {
				offset: 16,
				needed: size,
				available: bytes.len() - 16,
			});
		}
		let payload = &bytes[16..16 + size];
		let actual_checksum = Sha256::digest(payload)[0];
		if actual_checksum != declared_checksum {
			return Err(I2pError::CryptoMismatch {
				what: "I2NP NTCP header checksum",
			});
		}

		Ok((
			NtcpHeader {
				message_type,
				message_id,
				expiration,
				payload: payload.to_vec(),
			},
			&bytes[16 + size..],
		))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(16 + self.payload.len());
		buf.push(self.message_type.code());
		buf.extend_from_slice(&self.message_id.to_be_bytes());
		buf.extend_from_slice(&self.expiration.to_bytes());
		buf.extend_from_slice(&(self.payload.len() as u16).to_be_bytes());
		buf.push(Sha256::digest(&self.payload)[0]);
		buf.extend_from_slice(&self.payload);
		buf
	}
}

/// The compact 5-byte SSU framing header (no message ID, 4-byte seconds
/// expiration rather than the 8-byte millisecond `Date`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SsuHeader {
	pub message_type: MessageType,
	pub expiration: I2PDate,
}

impl SsuHeader {
	pub fn read(bytes: &[u8]) -> Result<(SsuHeader, &[u8])> {
		if bytes.len() < 5 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 5,
				available: bytes.len(),
			});
		}
		let message_type = MessageType::from_code(read_u8(&bytes[0..1]));
		let seconds = read_u32_be(&bytes[1..5]) as u64;
		Ok((
			SsuHeader {
				message_type,
				expiration: I2PDate(seconds * 1_000),
			},
			&bytes[5..],
		))
	}

	pub fn to_bytes(self) -> [u8; 5] {
		let mut buf = [0u8; 5];
		buf[0] = self.message_type.code();
		buf[1..5].copy_from_slice(&(self.expiration.unix_seconds() as u32).to_be_bytes());
		buf
	}
}

/// An "hours since the epoch" timestamp, as used by `BuildRequestRecord`'s
/// `request_hour` field.
pub fn hour_of(instant: SystemTime) -> u32 {
	let secs = instant
		.duration_since(UNIX_EPOCH)
		.unwrap_or(Duration::new(0, 0))
		.as_secs();
	(secs / 3600) as u32
}

pub fn hour_to_instant(hour: u32) -> SystemTime {
	UNIX_EPOCH + Duration::from_secs(hour as u64 * 3600)
}
