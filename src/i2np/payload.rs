//! Payload bodies for the twelve recognized I2NP message types.
//!
//! Each variant's `read`/`to_bytes` pair is grounded in the payload
//! structures named in the I2NP specification; unrecognized message types
//! are handled one level up, in [`super::MessageType`], and never reach
//! this module.

use crate::common::{read_u16_be, read_u32_be, read_u8, Hash, I2PDate, LeaseSet, RouterInfo};
use crate::error::{I2pError, Result};

use super::build_request_record;

/// `DatabaseStore`'s payload is one of a `RouterInfo` (optionally gzipped)
/// or a `LeaseSet`, selected by the store-type byte. This enum is a
/// deliberate departure from treating the stored bytes as opaque: the
/// distilled wire-format core leaves `DatabaseStore` unexpanded, but a
/// router that cannot tell which it received cannot act on it, so this
/// module decodes both arms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DatabaseStoreData {
	RouterInfo(RouterInfo),
	LeaseSet(LeaseSet),
}

/// A full `DatabaseStore` message: the NetDB key, what kind of reply (if
/// any) is wanted, and the stored record itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatabaseStore {
	pub key: Hash,
	pub reply_token: u32,
	/// Present only when `reply_token != 0`.
	pub reply_tunnel_id: Option<u32>,
	pub reply_gateway: Option<Hash>,
	pub data: DatabaseStoreData,
}

impl DatabaseStore {
	pub fn read(bytes: &[u8]) -> Result<(DatabaseStore, &[u8])> {
		let (key, rest) = Hash::read(bytes)?;
		if rest.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let store_type = rest[0];
		let rest = &rest[1..];

		if rest.len() < 4 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 4,
				available: rest.len(),
			});
		}
		let reply_token = read_u32_be(&rest[0..4]);
		let mut rest = &rest[4..];

		let (reply_tunnel_id, reply_gateway) = if reply_token != 0 {
			if rest.len() < 4 {
				return Err(I2pError::InputTooShort {
					offset: 0,
					needed: 4,
					available: rest.len(),
				});
			}
			let tunnel_id = read_u32_be(&rest[0..4]);
			rest = &rest[4..];
			let (gateway, remainder) = Hash::read(rest)?;
			rest = remainder;
			(Some(tunnel_id), Some(gateway))
		} else {
			(None, None)
		};

		let (data, rest) = match store_type {
			0 => {
				let (ri, remainder, warning) = RouterInfo::read(rest)?;
				if let Some(w) = warning {
					return Err(w);
				}
				(DatabaseStoreData::RouterInfo(ri), remainder)
			}
			1 => {
				let (ls, remainder, warning) = LeaseSet::read(rest)?;
				if let Some(w) = warning {
					return Err(w);
				}
				(DatabaseStoreData::LeaseSet(ls), remainder)
			}
			_ => {
				return Err(I2pError::FormatViolation {
					expected: "DatabaseStore type byte 0 (RouterInfo) or 1 (LeaseSet)",
				})
			}
		};

		Ok((
			DatabaseStore {
				key,
				reply_token,
				reply_tunnel_id,
				reply_gateway,
				data,
			},
			rest,
		))
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut buf = Vec::new();
		buf.extend_from_slice(&self.key.0);
		buf.push(match self.data {
			DatabaseStoreData::RouterInfo(_) => 0,
			DatabaseStoreData::LeaseSet(_) => 1,
		});
		buf.extend_from_slice(&self.reply_token.to_be_bytes());
		if self.reply_token != 0 {
			let tunnel_id = self.reply_tunnel_id.ok_or(I2pError::FormatViolation {
				expected: "reply_tunnel_id present when reply_token is non-zero",
			})?;
			let gateway = self.reply_gateway.ok_or(I2pError::FormatViolation {
				expected: "reply_gateway present when reply_token is non-zero",
			})?;
			buf.extend_from_slice(&tunnel_id.to_be_bytes());
			buf.extend_from_slice(&gateway.0);
		}
		match &self.data {
			DatabaseStoreData::RouterInfo(ri) => buf.extend_from_slice(&ri.to_bytes()?),
			DatabaseStoreData::LeaseSet(ls) => buf.extend_from_slice(&ls.to_bytes()),
		}
		Ok(buf)
	}
}

/// `DatabaseLookup`: a request for a `RouterInfo` or `LeaseSet` by key,
/// with an exclusion set of peers that have already failed to answer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatabaseLookup {
	pub key: Hash,
	pub from: Hash,
	pub flags: u8,
	pub reply_tunnel_id: Option<u32>,
	pub excluded_peers: Vec<Hash>,
}

impl DatabaseLookup {
	pub fn read(bytes: &[u8]) -> Result<(DatabaseLookup, &[u8])> {
		let (key, rest) = Hash::read(bytes)?;
		let (from, rest) = Hash::read(rest)?;
		if rest.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let flags = rest[0];
		let mut rest = &rest[1..];

		let reply_tunnel_id = if flags & 0x01 != 0 {
			if rest.len() < 4 {
				return Err(I2pError::InputTooShort {
					offset: 0,
					needed: 4,
					available: rest.len(),
				});
			}
			let id = read_u32_be(&rest[0..4]);
			rest = &rest[4..];
			Some(id)
		} else {
			None
		};

		if rest.len() < 2 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 2,
				available: rest.len(),
			});
		}
		let excluded_count = read_u16_be(&rest[0..2]) as usize;
		let mut rest = &rest[2..];
		let mut excluded_peers = Vec::with_capacity(excluded_count);
		for _ in 0..excluded_count {
			let (peer, remainder) = Hash::read(rest)?;
			excluded_peers.push(peer);
			rest = remainder;
		}

		Ok((
			DatabaseLookup {
				key,
				from,
				flags,
				reply_tunnel_id,
				excluded_peers,
			},
			rest,
		))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::new();
		buf.extend_from_slice(&self.key.0);
		buf.extend_from_slice(&self.from.0);
		buf.push(self.flags);
		if let Some(id) = self.reply_tunnel_id {
			buf.extend_from_slice(&id.to_be_bytes());
		}
		buf.extend_from_slice(&(self.excluded_peers.len() as u16).to_be_bytes());
		for peer in &self.excluded_peers {
			buf.extend_from_slice(&peer.0);
		}
		buf
	}
}

/// `DatabaseSearchReply`: "I don't have it, but here are peers closer to
/// the key than me."
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatabaseSearchReply {
	pub key: Hash,
	pub peers: Vec<Hash>,
	pub from: Hash,
}

impl DatabaseSearchReply {
	pub fn read(bytes: &[u8]) -> Result<(DatabaseSearchReply, &[u8])> {
		let (key, rest) = Hash::read(bytes)?;
		if rest.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let peer_count = read_u8(&rest[0..1]) as usize;
		let mut rest = &rest[1..];
		let mut peers = Vec::with_capacity(peer_count);
		for _ in 0..peer_count {
			let (peer, remainder) = Hash::read(rest)?;
			peers.push(peer);
			rest = remainder;
		}
		let (from, rest) = Hash::read(rest)?;
		Ok((DatabaseSearchReply { key, peers, from }, rest))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::new();
		buf.extend_from_slice(&self.key.0);
		buf.push(self.peers.len() as u8);
		for peer in &self.peers {
			buf.extend_from_slice(&peer.0);
		}
		buf.extend_from_slice(&self.from.0);
		buf
	}
}

/// `DeliveryStatus`: a plain message-id/timestamp acknowledgment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DeliveryStatus {
	pub message_id: u32,
	pub timestamp: I2PDate,
}

impl DeliveryStatus {
	pub const LEN: usize = 4 + 8;

	pub fn read(bytes: &[u8]) -> Result<(DeliveryStatus, &[u8])> {
		if bytes.len() < Self::LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: Self::LEN,
				available: bytes.len(),
			});
		}
		let message_id = read_u32_be(&bytes[0..4]);
		let (timestamp, rest) = I2PDate::read(&bytes[4..])?;
		Ok((
			DeliveryStatus {
				message_id,
				timestamp,
			},
			rest,
		))
	}

	pub fn to_bytes(&self) -> [u8; Self::LEN] {
		let mut buf = [0u8; Self::LEN];
		buf[0..4].copy_from_slice(&self.message_id.to_be_bytes());
		buf[4..12].copy_from_slice(&self.timestamp.to_bytes());
		buf
	}
}

/// Delivery modes a garlic clove's own delivery instructions can select,
/// distinct from (but similarly shaped to) a tunnel message's.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GarlicDeliveryType {
	Local,
	Destination,
	Router,
	Tunnel,
}

impl GarlicDeliveryType {
	fn from_bits(bits: u8) -> Result<Self> {
		match bits {
			0 => Ok(GarlicDeliveryType::Local),
			1 => Ok(GarlicDeliveryType::Destination),
			2 => Ok(GarlicDeliveryType::Router),
			3 => Ok(GarlicDeliveryType::Tunnel),
			_ => Err(I2pError::FormatViolation {
				expected: "garlic clove delivery type in 0..=3",
			}),
		}
	}

	fn to_bits(self) -> u8 {
		match self {
			GarlicDeliveryType::Local => 0,
			GarlicDeliveryType::Destination => 1,
			GarlicDeliveryType::Router => 2,
			GarlicDeliveryType::Tunnel => 3,
		}
	}
}

/// One encrypted clove inside a `Garlic` message. The clove's own
/// plaintext (another I2NP message) is carried opaquely, since decrypting
/// it requires session keys this codec layer does not hold.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GarlicClove {
	pub delivery_type: GarlicDeliveryType,
	pub to_hash: Option<Hash>,
	pub tunnel_id: Option<u32>,
	pub encrypted_payload: Vec<u8>,
	pub clove_id: u32,
	pub expiration: I2PDate,
	pub certificate: Vec<u8>,
}

/// `Garlic`: an encrypted bundle of cloves, each independently routable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Garlic {
	pub cloves: Vec<GarlicClove>,
	pub certificate: Vec<u8>,
	pub message_id: u32,
	pub expiration: I2PDate,
}

impl Garlic {
	/// Reads the clove count and each clove's delivery-instructions flag
	/// byte and routing fields, treating each clove's encrypted payload as
	/// an opaque length-prefixed blob (this codec has no ElGamal/AES
	/// session-key material to decrypt it with).
	///
	/// A clove's own I2NP message has no length field preceding it — the
	/// only way to find its end is to decrypt and parse that message,
	/// which this codec layer has no key material to do. This reader
	/// therefore only supports the single-clove case, reserving the
	/// trailing certificate/message-id/expiration bytes before treating
	/// everything else as the clove's opaque payload; a multi-clove
	/// `Garlic` needs a caller that can decrypt cloves as it walks them.
	pub fn read(bytes: &[u8]) -> Result<(Garlic, &[u8])> {
		if bytes.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let clove_count = bytes[0] as usize;
		if clove_count != 1 {
			return Err(I2pError::FormatViolation {
				expected: "exactly one garlic clove (multi-clove payloads need clove decryption to frame)",
			});
		}
		let mut rest = &bytes[1..];

		if rest.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let flag = rest[0];
		rest = &rest[1..];
		let delivery_type = GarlicDeliveryType::from_bits((flag >> 5) & 0x03)?;

		let to_hash = match delivery_type {
			GarlicDeliveryType::Destination
			| GarlicDeliveryType::Router
			| GarlicDeliveryType::Tunnel => {
				let (hash, remainder) = Hash::read(rest)?;
				rest = remainder;
				Some(hash)
			}
			GarlicDeliveryType::Local => None,
		};

		let tunnel_id = if matches!(delivery_type, GarlicDeliveryType::Tunnel) {
			if rest.len() < 4 {
				return Err(I2pError::InputTooShort {
					offset: 0,
					needed: 4,
					available: rest.len(),
				});
			}
			let id = read_u32_be(&rest[0..4]);
			rest = &rest[4..];
			Some(id)
		} else {
			None
		};

		if rest.len() < 4 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 4,
				available: rest.len(),
			});
		}
		let clove_id = read_u32_be(&rest[0..4]);
		rest = &rest[4..];

		let (clove_expiration, rest_after_clove_expiration) = I2PDate::read(rest)?;
		rest = rest_after_clove_expiration;

		// Reserve the clove's own trailing certificate (3) plus the
		// message-level certificate (3) + message_id (4) + expiration (8).
		const TAIL: usize = 3 + 3 + 4 + 8;
		if rest.len() < TAIL {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: TAIL,
				available: rest.len(),
			});
		}
		let payload_end = rest.len() - TAIL;
		let encrypted_payload = rest[..payload_end].to_vec();
		let clove_certificate = rest[payload_end..payload_end + 3].to_vec();
		let rest = &rest[payload_end + 3..];

		let clove = GarlicClove {
			delivery_type,
			to_hash,
			tunnel_id,
			encrypted_payload,
			clove_id,
			expiration: clove_expiration,
			certificate: clove_certificate,
		};

		let certificate = rest[..3].to_vec();
		let rest = &rest[3..];
		let message_id = read_u32_be(&rest[0..4]);
		let rest = &rest[4..];
		let (expiration, rest) = I2PDate::read(rest)?;

		Ok((
			Garlic {
				cloves: vec![clove],
				certificate,
				message_id,
				expiration,
			},
			rest,
		))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::new();
		buf.push(self.cloves.len() as u8);
		for clove in &self.cloves {
			let flag = clove.delivery_type.to_bits() << 5;
			buf.push(flag);
			if let Some(hash) = &clove.to_hash {
				buf.extend_from_slice(&hash.0);
			}
			if let Some(tunnel_id) = clove.tunnel_id {
				buf.extend_from_slice(&tunnel_id.to_be_bytes());
			}
			buf.extend_from_slice(&clove.clove_id.to_be_bytes());
			buf.extend_from_slice(&clove.expiration.to_bytes());
			buf.extend_from_slice(&clove.encrypted_payload);
			buf.extend_from_slice(&clove.certificate);
		}
		buf.extend_from_slice(&self.certificate);
		buf.extend_from_slice(&self.message_id.to_be_bytes());
		buf.extend_from_slice(&self.expiration.to_bytes());
		buf
	}
}

/// `TunnelData`: one 1028-byte encrypted tunnel-message frame, handled in
/// full by [`crate::tunnel`]; here it is carried as an opaque fixed-size
/// blob since decrypting it is outside the I2NP header/payload framing
/// layer's job.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TunnelData {
	pub tunnel_id: u32,
	pub data: [u8; crate::constants::TUNNEL_MESSAGE_LEN],
}

impl TunnelData {
	pub const LEN: usize = 4 + crate::constants::TUNNEL_MESSAGE_LEN;

	pub fn read(bytes: &[u8]) -> Result<(TunnelData, &[u8])> {
		if bytes.len() < Self::LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: Self::LEN,
				available: bytes.len(),
			});
		}
		let tunnel_id = read_u32_be(&bytes[0..4]);
		let mut data = [0u8; crate::constants::TUNNEL_MESSAGE_LEN];
		data.copy_from_slice(&bytes[4..Self::LEN]);
		Ok((TunnelData { tunnel_id, data }, &bytes[Self::LEN..]))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(Self::LEN);
		buf.extend_from_slice(&self.tunnel_id.to_be_bytes());
		buf.extend_from_slice(&self.data);
		buf
	}
}

/// `TunnelGateway`: hands a length-prefixed blob of data to a tunnel
/// gateway for fragmenting into `TunnelData` messages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TunnelGateway {
	pub tunnel_id: u32,
	pub data: Vec<u8>,
}

impl TunnelGateway {
	pub fn read(bytes: &[u8]) -> Result<(TunnelGateway, &[u8])> {
		if bytes.len() < 6 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 6,
				available: bytes.len(),
			});
		}
		let tunnel_id = read_u32_be(&bytes[0..4]);
		let length = read_u16_be(&bytes[4..6]) as usize;
		let rest = &bytes[6..];
		if rest.len() < length {
			return Err(I2pError::InputTooShort {
				offset: 6,
				needed: length,
				available: rest.len(),
			});
		}
		let (data, rest) = rest.split_at(length);
		Ok((
			TunnelGateway {
				tunnel_id,
				data: data.to_vec(),
			},
			rest,
		))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(6 + self.data.len());
		buf.extend_from_slice(&self.tunnel_id.to_be_bytes());
		buf.extend_from_slice(&(self.data.len() as u16).to_be_bytes());
		buf.extend_from_slice(&self.data);
		buf
	}
}

/// `Data`: the simplest payload, a length-prefixed opaque blob.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataMessage(pub Vec<u8>);

impl DataMessage {
	pub fn read(bytes: &[u8]) -> Result<(DataMessage, &[u8])> {
		if bytes.len() < 4 {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 4,
				available: bytes.len(),
			});
		}
		let length = read_u32_be(&bytes[0..4]) as usize;
		let rest = &bytes[4..];
		if rest.len() < length {
			return Err(I2pError::InputTooShort {
				offset: 4,
				needed: length,
				available: rest.len(),
			});
		}
		let (data, rest) = rest.split_at(length);
		Ok((DataMessage(data.to_vec()), rest))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(4 + self.0.len());
		buf.extend_from_slice(&(self.0.len() as u32).to_be_bytes());
		buf.extend_from_slice(&self.0);
		buf
	}
}

/// One reply record in a `TunnelBuildReply`/`VariableTunnelBuildReply`:
/// opaque once encrypted, so only its fixed 528-byte span is framed here.
pub const BUILD_RESPONSE_RECORD_LEN: usize = 528;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildResponseRecord(pub [u8; BUILD_RESPONSE_RECORD_LEN]);

impl BuildResponseRecord {
	pub fn read(bytes: &[u8]) -> Result<(BuildResponseRecord, &[u8])> {
		if bytes.len() < BUILD_RESPONSE_RECORD_LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: BUILD_RESPONSE_RECORD_LEN,
				available: bytes.len(),
			});
		}
		let mut buf = [0u8; BUILD_RESPONSE_RECORD_LEN];
		buf.copy_from_slice(&bytes[..BUILD_RESPONSE_RECORD_LEN]);
		Ok((BuildResponseRecord(buf), &bytes[BUILD_RESPONSE_RECORD_LEN..]))
	}

	/// The record's reply byte: `0x00` means the hop accepted the tunnel.
	/// Only meaningful once decrypted; reading it from still-encrypted
	/// bytes is meaningless but not this type's concern to prevent.
	pub fn reply_byte(&self) -> u8 {
		self.0[BUILD_RESPONSE_RECORD_LEN - 1]
	}
}

/// `TunnelBuild`: always exactly eight fixed-size encrypted build records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TunnelBuild(pub [build_request_record::EncryptedBuildRecord; 8]);

/// `TunnelBuildReply`: always exactly eight fixed-size response records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TunnelBuildReply(pub [BuildResponseRecord; 8]);

/// `VariableTunnelBuild`: 1 to 8 encrypted build records, count-prefixed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariableTunnelBuild(pub Vec<build_request_record::EncryptedBuildRecord>);

impl VariableTunnelBuild {
	pub fn read(bytes: &[u8]) -> Result<(VariableTunnelBuild, &[u8])> {
		if bytes.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let count = bytes[0] as usize;
		if count == 0 || count > 8 {
			return Err(I2pError::SizeLimitExceeded {
				what: "VariableTunnelBuild record count",
				actual: count,
				limit: 8,
			});
		}
		let mut rest = &bytes[1..];
		let mut records = Vec::with_capacity(count);
		for _ in 0..count {
			let (record, remainder) = build_request_record::EncryptedBuildRecord::read(rest)?;
			records.push(record);
			rest = remainder;
		}
		Ok((VariableTunnelBuild(records), rest))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(1 + self.0.len() * build_request_record::EncryptedBuildRecord::LEN);
		buf.push(self.0.len() as u8);
		for record in &self.0 {
			buf.extend_from_slice(&record.to_bytes());
		}
		buf
	}
}

/// `VariableTunnelBuildReply`: 1 to 8 response records, count-prefixed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariableTunnelBuildReply(pub Vec<BuildResponseRecord>);

impl VariableTunnelBuildReply {
	pub fn read(bytes: &[u8]) -> Result<(VariableTunnelBuildReply, &[u8])> {
		if bytes.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let count = bytes[0] as usize;
		if count == 0 || count > 8 {
			return Err(I2pError::SizeLimitExceeded {
				what: "VariableTunnelBuildReply record count",
				actual: count,
				limit: 8,
			});
		}
		let mut rest = &bytes[1..];
		let mut records = Vec::with_capacity(count);
		for _ in 0..count {
			let (record, remainder) = BuildResponseRecord::read(rest)?;
			records.push(record);
			rest = remainder;
		}
		Ok((VariableTunnelBuildReply(records), rest))
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(1 + self.0.len() * BUILD_RESPONSE_RECORD_LEN);
		buf.push(self.0.len() as u8);
		for record in &self.0 {
			buf.extend_from_slice(&record.0);
		}
		buf
	}
}

/// The decoded payload of a fully framed I2NP message, keyed by
/// [`super::MessageType`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MessagePayload {
	DatabaseStore(DatabaseStore),
	DatabaseLookup(DatabaseLookup),
	DatabaseSearchReply(DatabaseSearchReply),
	DeliveryStatus(DeliveryStatus),
	Garlic(Garlic),
	TunnelData(TunnelData),
	TunnelGateway(TunnelGateway),
	Data(DataMessage),
	TunnelBuild(TunnelBuild),
	TunnelBuildReply(TunnelBuildReply),
	VariableTunnelBuild(VariableTunnelBuild),
	VariableTunnelBuildReply(VariableTunnelBuildReply),
}

impl MessagePayload {
	pub fn read(message_type: super::MessageType, bytes: &[u8]) -> Result<MessagePayload> {
		use super::MessageType::*;
		let payload = match message_type {
			DatabaseStore => MessagePayload::DatabaseStore(self::DatabaseStore::read(bytes)?.0),
			DatabaseLookup => MessagePayload::DatabaseLookup(self::DatabaseLookup::read(bytes)?.0),
			DatabaseSearchReply => {
				MessagePayload::DatabaseSearchReply(self::DatabaseSearchReply::read(bytes)?.0)
			}
			DeliveryStatus => MessagePayload::DeliveryStatus(self::DeliveryStatus::read(bytes)?.0),
			Garlic => MessagePayload::Garlic(self::Garlic::read(bytes)?.0),
			TunnelData => MessagePayload::TunnelData(self::TunnelData::read(bytes)?.0),
			TunnelGateway => MessagePayload::TunnelGateway(self::TunnelGateway::read(bytes)?.0),
			Data => MessagePayload::Data(self::DataMessage::read(bytes)?.0),
			TunnelBuild => {
				if bytes.len() < 8 * build_request_record::EncryptedBuildRecord::LEN {
					return Err(I2pError::InputTooShort {
						offset: 0,
						needed: 8 * build_request_record::EncryptedBuildRecord::LEN,
						available: bytes.len(),
					});
				}
				let mut records = Vec::with_capacity(8);
				let mut rest = bytes;
				for _ in 0..8 {
					let (record, remainder) = build_request_record::EncryptedBuildRecord::read(rest)?;
					records.push(record);
					rest = remainder;
				}
				let array: [build_request_record::EncryptedBuildRecord; 8] =
					records.try_into().map_err(|_| I2pError::FormatViolation {
						expected: "exactly eight TunnelBuild records",
					})?;
				MessagePayload::TunnelBuild(TunnelBuild(array))
			}
			TunnelBuildReply => {
				if bytes.len() < 8 * BUILD_RESPONSE_RECORD_LEN {
					return Err(I2pError::InputTooShort {
						offset: 0,
						needed: 8 * BUILD_RESPONSE_RECORD_LEN,
						available: bytes.len(),
					});
				}
				let mut records = Vec::with_capacity(8);
				let mut rest = bytes;
				for _ in 0..8 {
					let (record, remainder) = BuildResponseRecord::read(rest)?;
					records.push(record);
					rest = remainder;
				}
				let array: [BuildResponseRecord; 8] =
					records.try_into().map_err(|_| I2pError::FormatViolation {
						expected: "exactly eight TunnelBuildReply records",
					})?;
				MessagePayload::TunnelBuildReply(TunnelBuildReply(array))
			}
			VariableTunnelBuild => {
				MessagePayload::VariableTunnelBuild(self::VariableTunnelBuild::read(bytes)?.0)
			}
			VariableTunnelBuildReply => MessagePayload::VariableTunnelBuildReply(
				self::VariableTunnelBuildReply::read(bytes)?.0,
			),
			Unknown(_) | Experimental(_) | Reserved => {
				return Err(I2pError::FormatViolation {
					expected: "a recognized I2NP message type",
				})
			}
		};
		Ok(payload)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::common::{Certificate, CertificateType, KeysAndCert};
	use crate::constants::{KEYS_AND_CERT_PUBLIC_KEY_LEN, KEYS_AND_CERT_SPK_LEN};

	fn sample_router_info() -> RouterInfo {
		let identity = crate::common::RouterIdentity(KeysAndCert::new(
			[1u8; KEYS_AND_CERT_PUBLIC_KEY_LEN],
			[2u8; KEYS_AND_CERT_SPK_LEN],
			Certificate::new(CertificateType::Null, vec![]),
		));
		RouterInfo {
			router_identity: identity,
			published: I2PDate(0),
			addresses: vec![],
			peer_size: 0,
			options: crate::common::Mapping::new(vec![]),
			signature: vec![0xAB; 40],
		}
	}

	#[test]
	fn database_store_router_info_round_trips_without_reply() {
		let store = DatabaseStore {
			key: Hash::compute(b"key"),
			reply_token: 0,
			reply_tunnel_id: None,
			reply_gateway: None,
			data: DatabaseStoreData::RouterInfo(sample_router_info()),
		};
		let bytes = store.to_bytes().unwrap();
		let (decoded, rest) = DatabaseStore::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert_eq!(decoded, store);
	}

	#[test]
	fn database_store_with_reply_round_trips() {
		let store = DatabaseStore {
			key: Hash::compute(b"key"),
			reply_token: 7,
			reply_tunnel_id: Some(99),
			reply_gateway: Some(Hash::compute(b"gw")),
			data: DatabaseStoreData::RouterInfo(sample_router_info()),
		};
		let bytes = store.to_bytes().unwrap();
		let (decoded, _) = DatabaseStore::read(&bytes).unwrap();
		assert_eq!(decoded, store);
	}

	#[test]
	fn database_lookup_round_trips_with_exclusions() {
		let lookup = DatabaseLookup {
			key: Hash::compute(b"k"),
			from: Hash::compute(b"f"),
			flags: 0x01,
			reply_tunnel_id: Some(5),
			excluded_peers: vec![Hash::compute(b"p1"), Hash::compute(b"p2")],
		};
		let bytes = lookup.to_bytes();
		let (decoded, rest) = DatabaseLookup::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert_eq!(decoded, lookup);
	}

	#[test]
	fn database_search_reply_round_trips() {
		let reply = DatabaseSearchReply {
			key: Hash::compute(b"k"),
			peers: vec![Hash::compute(b"a"), Hash::compute(b"b")],
			from: Hash::compute(b"from"),
		};
		let bytes = reply.to_bytes();
		let (decoded, rest) = DatabaseSearchReply::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert_eq!(decoded, reply);
	}

	#[test]
	fn delivery_status_round_trips() {
		let status = DeliveryStatus {
			message_id: 42,
			timestamp: I2PDate(1_700_000_000_000),
		};
		let bytes = status.to_bytes();
		let (decoded, rest) = DeliveryStatus::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert_eq!(decoded, status);
	}

	#[test]
	fn garlic_round_trips_single_clove() {
		let garlic = Garlic {
			cloves: vec![GarlicClove {
				delivery_type: GarlicDeliveryType::Local,
				to_hash: None,
				tunnel_id: None,
				encrypted_payload: vec![0xCD; 32],
				clove_id: 1,
				expiration: I2PDate(1_700_000_000_000),
				certificate: vec![0, 0, 0],
			}],
			certificate: vec![0, 0, 0],
			message_id: 77,
			expiration: I2PDate(1_700_000_001_000),
		};
		let bytes = garlic.to_bytes();
		let (decoded, rest) = Garlic::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert_eq!(decoded, garlic);
	}

	#[test]
	fn garlic_rejects_multi_clove_count() {
		assert!(Garlic::read(&[2u8]).is_err());
	}

	#[test]
	fn tunnel_data_round_trips() {
		let data = TunnelData {
			tunnel_id: 1,
			data: [0xAB; crate::constants::TUNNEL_MESSAGE_LEN],
		};
		let bytes = data.to_bytes();
		let (decoded, rest) = TunnelData::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert_eq!(decoded, data);
	}

	#[test]
	fn tunnel_gateway_round_trips() {
		let gw = TunnelGateway {
			tunnel_id: 2,
			data: b"hello".to_vec(),
		};
		let bytes = gw.to_bytes();
		let (decoded, rest) = TunnelGateway::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert_eq!(decoded, gw);
	}

	#[test]
	fn data_message_round_trips() {
		let msg = DataMessage(b"payload".to_vec());
		let bytes = msg.to_bytes();
		let (decoded, rest) = DataMessage::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert_eq!(decoded, msg);
	}

	#[test]
	fn variable_tunnel_build_round_trips() {
		let record = build_request_record::EncryptedBuildRecord([7u8; build_request_record::EncryptedBuildRecord::LEN]);
		let vtb = VariableTunnelBuild(vec![record.clone(), record]);
		let bytes = vtb.to_bytes();
		let (decoded, rest) = VariableTunnelBuild::read(&bytes).unwrap();
		assert!(rest.is_empty());
		assert_eq!(decoded, vtb);
	}

	#[test]
	fn variable_tunnel_build_rejects_zero_records() {
		assert!(VariableTunnelBuild::read(&[0u8]).is_err());
	}

	#[test]
	fn build_response_record_reply_byte() {
		let mut buf = [0u8; BUILD_RESPONSE_RECORD_LEN];
		buf[BUILD_RESPONSE_RECORD_LEN - 1] = 0x00;
		let (record, rest) = BuildResponseRecord::read(&buf).unwrap();
		assert!(rest.is_empty());
		assert_eq!(record.reply_byte(), 0x00);
	}
}
