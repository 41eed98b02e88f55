//! `BuildRequestRecord`: the 222-byte cleartext record that proposes one
//! hop of a new tunnel. In transit it is ElGamal/AES-encrypted to 528
//! bytes; this module only handles the cleartext fixed-offset layout, per
//! the wire-format core's scope.

use crate::common::{read_u32_be, read_u8, Hash};
use crate::error::{I2pError, Result};

use super::hour_of;

/// Byte offsets of each field in the 222-byte cleartext record, per the
/// I2NP specification.
mod offset {
	pub const RECV_TUNNEL: usize = 0;
	pub const OUR_IDENT: usize = 4;
	pub const NEXT_TUNNEL: usize = 36;
	pub const NEXT_IDENT: usize = 40;
	pub const LAYER_KEY: usize = 72;
	pub const IV_KEY: usize = 104;
	pub const REPLY_KEY: usize = 136;
	pub const REPLY_IV: usize = 168;
	pub const FLAG: usize = 184;
	pub const REQUEST_HOUR: usize = 185;
	pub const SEND_MSG_ID: usize = 189;
	pub const PADDING: usize = 193;
}

/// Total size of the cleartext `BuildRequestRecord`.
pub const LEN: usize = 222;

/// One hop's proposed role in a tunnel under construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildRequestRecord {
	pub receive_tunnel: u32,
	pub our_ident: Hash,
	pub next_tunnel: u32,
	pub next_ident: Hash,
	pub layer_key: [u8; 32],
	pub iv_key: [u8; 32],
	pub reply_key: [u8; 32],
	pub reply_iv: [u8; 16],
	pub flag: u8,
	/// Hours since the Unix epoch; reconstruct wall-clock with
	/// [`super::hour_to_instant`].
	pub request_hour: u32,
	pub send_message_id: u32,
	/// Cryptographically random padding, opaque to this parser.
	pub padding: [u8; 29],
}

fn read_hash(bytes: &[u8], at: usize) -> Result<Hash> {
	if bytes.len() < at + 32 {
		return Err(I2pError::InputTooShort {
			offset: at,
			needed: 32,
			available: bytes.len().saturating_sub(at),
		});
	}
	let mut buf = [0u8; 32];
	buf.copy_from_slice(&bytes[at..at + 32]);
	Ok(Hash(buf))
}

fn read_32(bytes: &[u8], at: usize) -> Result<[u8; 32]> {
	if bytes.len() < at + 32 {
		return Err(I2pError::InputTooShort {
			offset: at,
			needed: 32,
			available: bytes.len().saturating_sub(at),
		});
	}
	let mut buf = [0u8; 32];
	buf.copy_from_slice(&bytes[at..at + 32]);
	Ok(buf)
}

impl BuildRequestRecord {
	/// Reads a `BuildRequestRecord` at its fixed offsets. Any shortfall at
	/// any offset is fatal, per the I2NP specification's "fixed offset
	/// table" note — there is no length field to recover from.
	pub fn read(bytes: &[u8]) -> Result<BuildRequestRecord> {
		if bytes.len() < LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: LEN,
				available: bytes.len(),
			});
		}

		let receive_tunnel = read_u32_be(&bytes[offset::RECV_TUNNEL..offset::RECV_TUNNEL + 4]);
		let our_ident = read_hash(bytes, offset::OUR_IDENT)?;
		let next_tunnel = read_u32_be(&bytes[offset::NEXT_TUNNEL..offset::NEXT_TUNNEL + 4]);
		let next_ident = read_hash(bytes, offset::NEXT_IDENT)?;
		let layer_key = read_32(bytes, offset::LAYER_KEY)?;
		let iv_key = read_32(bytes, offset::IV_KEY)?;
		let reply_key = read_32(bytes, offset::REPLY_KEY)?;

		let mut reply_iv = [0u8; 16];
		reply_iv.copy_from_slice(&bytes[offset::REPLY_IV..offset::REPLY_IV + 16]);

		let flag = read_u8(&bytes[offset::FLAG..offset::FLAG + 1]);
		let request_hour = read_u32_be(&bytes[offset::REQUEST_HOUR..offset::REQUEST_HOUR + 4]);
		let send_message_id = read_u32_be(&bytes[offset::SEND_MSG_ID..offset::SEND_MSG_ID + 4]);

		let mut padding = [0u8; 29];
		padding.copy_from_slice(&bytes[offset::PADDING..offset::PADDING + 29]);

		Ok(BuildRequestRecord {
			receive_tunnel,
			our_ident,
			next_tunnel,
			next_ident,
			layer_key,
			iv_key,
			reply_key,
			reply_iv,
			flag,
			request_hour,
			send_message_id,
			padding,
		})
	}

	pub fn to_bytes(&self) -> [u8; LEN] {
		let mut buf = [0u8; LEN];
		buf[offset::RECV_TUNNEL..offset::RECV_TUNNEL + 4]
			.copy_from_slice(&self.receive_tunnel.to_be_bytes());
		buf[offset::OUR_IDENT..offset::OUR_IDENT + 32].copy_from_slice(&self.our_ident.0);
		buf[offset::NEXT_TUNNEL..offset::NEXT_TUNNEL + 4]
			.copy_from_slice(&self.next_tunnel.to_be_bytes());
		buf[offset::NEXT_IDENT..offset::NEXT_IDENT + 32].copy_from_slice(&self.next_ident.0);
		buf[offset::LAYER_KEY..offset::LAYER_KEY + 32].copy_from_slice(&self.layer_key);
		buf[offset::IV_KEY..offset::IV_KEY + 32].copy_from_slice(&self.iv_key);
		buf[offset::REPLY_KEY..offset::REPLY_KEY + 32].copy_from_slice(&self.reply_key);
		buf[offset::REPLY_IV..offset::REPLY_IV + 16].copy_from_slice(&self.reply_iv);
		buf[offset::FLAG] = self.flag;
		buf[offset::REQUEST_HOUR..offset::REQUEST_HOUR + 4]
			.copy_from_slice(&self.request_hour.to_be_bytes());
		buf[offset::SEND_MSG_ID..offset::SEND_MSG_ID + 4]
			.copy_from_slice(&self.send_message_id.to_be_bytes());
		buf[offset::PADDING..offset::PADDING + 29].copy_from_slice(&self.padding);
		buf
	}

	pub fn request_time(&self) -> std::time::SystemTime {
		super::hour_to_instant(self.request_hour)
	}

	pub fn for_hour(&self, now: std::time::SystemTime) -> bool {
		self.request_hour == hour_of(now)
	}
}

/// The 528-byte ElGamal/AES-encrypted form of a `BuildRequestRecord` (and,
/// reused bit-for-bit, of a `BuildResponseRecord`) as it actually appears
/// inside `TunnelBuild`/`VariableTunnelBuild` messages: 16 bytes of
/// receiving-tunnel/router identification hash prefix followed by the
/// encrypted record body. Decrypting it needs the recipient's ElGamal
/// private key, which this codec layer does not hold, so it is kept
/// opaque here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptedBuildRecord(pub [u8; EncryptedBuildRecord::LEN]);

impl EncryptedBuildRecord {
	pub const LEN: usize = 528;

	pub fn read(bytes: &[u8]) -> Result<(EncryptedBuildRecord, &[u8])> {
		if bytes.len() < Self::LEN {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: Self::LEN,
				available: bytes.len(),
			});
		}
		let mut buf = [0u8; Self::LEN];
		buf.copy_from_slice(&bytes[..Self::LEN]);
		Ok((EncryptedBuildRecord(buf), &bytes[Self::LEN..]))
	}

	pub fn to_bytes(&self) -> [u8; Self::LEN] {
		self.0
	}
}
