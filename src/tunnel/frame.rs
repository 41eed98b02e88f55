//! The 1028-byte tunnel message frame: encrypted on the wire, decrypted
//! (and checksum-verified) at each hop before its delivery instructions
//! and I2NP fragments are read out.
//!
//! [Tunnel message specification](https://geti2p.net/spec/tunnel-message)

use sha2::{Digest, Sha256};

use crate::common::read_u32_be;
use crate::constants::TUNNEL_MESSAGE_LEN;
use crate::crypto::TunnelCipher;
use crate::error::{I2pError, Result};

use super::delivery::DeliveryInstructions;

const HEADER_LEN: usize = 4 + 16; // tunnel ID + IV
const CHECKSUM_LEN: usize = 4;
const DATA_AREA_LEN: usize = TUNNEL_MESSAGE_LEN - HEADER_LEN - CHECKSUM_LEN;

/// A still-encrypted tunnel message frame as it crosses the wire between
/// two hops: tunnel ID and IV in the clear, the rest opaque until this
/// hop's [`TunnelCipher`] decrypts it.
#[derive(Clone, Copy)]
pub struct EncryptedTunnelMessage(pub [u8; TUNNEL_MESSAGE_LEN]);

impl EncryptedTunnelMessage {
	pub fn tunnel_id(&self) -> u32 {
		read_u32_be(&self.0[0..4])
	}

	pub fn iv(&self) -> &[u8] {
		&self.0[4..20]
	}

	/// Decrypts this frame with `cipher`, returning the plaintext frame.
	/// Checksum verification happens separately, in
	/// [`DecryptedTunnelMessage::verify_checksum`].
	pub fn decrypt(&self, cipher: &TunnelCipher) -> Result<DecryptedTunnelMessage> {
		let mut frame = self.0;
		cipher.decrypt(&mut frame)?;
		Ok(DecryptedTunnelMessage(frame))
	}
}

/// A decrypted tunnel message frame: tunnel ID, IV, checksum, and the
/// 1004-byte data area holding nonzero padding, a zero delimiter, and
/// then back-to-back (delivery instructions, fragment) pairs.
#[derive(Clone, Copy)]
pub struct DecryptedTunnelMessage(pub [u8; TUNNEL_MESSAGE_LEN]);

impl DecryptedTunnelMessage {
	pub fn tunnel_id(&self) -> u32 {
		read_u32_be(&self.0[0..4])
	}

	pub fn iv(&self) -> &[u8] {
		&self.0[4..20]
	}

	pub fn checksum(&self) -> &[u8] {
		&self.0[20..24]
	}

	fn data_area(&self) -> &[u8] {
		&self.0[24..TUNNEL_MESSAGE_LEN]
	}

	/// The data area with its leading nonzero padding and zero delimiter
	/// stripped, i.e. the back-to-back delivery-instructions/fragment
	/// pairs. `None` if no zero delimiter is present (malformed frame).
	fn content_after_delimiter(&self) -> Option<&[u8]> {
		let area = self.data_area();
		let zero_at = area.iter().position(|&b| b == 0x00)?;
		Some(&area[zero_at + 1..])
	}

	/// Verifies `checksum` matches `SHA256(content_after_delimiter || iv)[0..4]`.
	pub fn verify_checksum(&self) -> Result<()> {
		let content = self.content_after_delimiter().ok_or(I2pError::FormatViolation {
			expected: "a zero byte delimiting padding from delivery instructions",
		})?;
		let mut hasher = Sha256::new();
		hasher.update(content);
		hasher.update(self.iv());
		let digest = hasher.finalize();
		if &digest[0..CHECKSUM_LEN] != self.checksum() {
			return Err(I2pError::CryptoMismatch {
				what: "tunnel message checksum",
			});
		}
		Ok(())
	}

	/// Walks the data area, yielding each (delivery instructions, fragment
	/// bytes) pair in order. Stops (without error) at the first point the
	/// remaining bytes can no longer be parsed as a delivery instructions
	/// header plus its declared fragment length — this is the trailing
	/// edge of the frame, not a malformed message.
	pub fn fragments(&self) -> Result<Vec<(DeliveryInstructions, Vec<u8>)>> {
		let mut data = self
			.content_after_delimiter()
			.ok_or(I2pError::FormatViolation {
				expected: "a zero byte delimiting padding from delivery instructions",
			})?;
		let mut out = Vec::new();
		while !data.is_empty() {
			let (instructions, remainder) = match DeliveryInstructions::read(data) {
				Ok(pair) => pair,
				Err(_) => break,
			};
			let size = instructions.fragment_size();
			if remainder.len() < size {
				break;
			}
			let (fragment, remainder) = remainder.split_at(size);
			out.push((instructions, fragment.to_vec()));
			data = remainder;
		}
		Ok(out)
	}

	/// Encrypts this frame with `cipher`, for forwarding to the next hop.
	pub fn encrypt(&self, cipher: &TunnelCipher) -> Result<EncryptedTunnelMessage> {
		let mut frame = self.0;
		cipher.encrypt(&mut frame)?;
		Ok(EncryptedTunnelMessage(frame))
	}
}

/// Builds a [`DecryptedTunnelMessage`] from its parts: a tunnel ID, an IV,
/// the already-serialized (delivery instructions + fragment) byte stream,
/// and caller-supplied nonzero padding bytes to fill out the frame.
///
/// Returns `Err` if `content` plus one delimiter byte plus `padding`
/// overflows the fixed [`DATA_AREA_LEN`]-byte data area.
pub fn build(tunnel_id: u32, iv: [u8; 16], content: &[u8], padding: &[u8]) -> Result<DecryptedTunnelMessage> {
	if padding.iter().any(|&b| b == 0) {
		return Err(I2pError::FormatViolation {
			expected: "padding bytes are all nonzero",
		});
	}
	let used = padding.len() + 1 + content.len();
	if used > DATA_AREA_LEN {
		return Err(I2pError::SizeLimitExceeded {
			what: "tunnel message data area",
			actual: used,
			limit: DATA_AREA_LEN,
		});
	}

	let mut frame = [0u8; TUNNEL_MESSAGE_LEN];
	frame[0..4].copy_from_slice(&tunnel_id.to_be_bytes());
	frame[4..20].copy_from_slice(&iv);

	let mut hasher = Sha256::new();
	hasher.update(content);
	hasher.update(&iv);
	let digest = hasher.finalize();
	frame[20..24].copy_from_slice(&digest[0..CHECKSUM_LEN]);

	let data_area = &mut frame[24..TUNNEL_MESSAGE_LEN];
	data_area[..padding.len()].copy_from_slice(padding);
	data_area[padding.len()] = 0x00;
	data_area[padding.len() + 1..padding.len() + 1 + content.len()].copy_from_slice(content);

	Ok(DecryptedTunnelMessage(frame))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tunnel::delivery::{DeliveryType, FirstFragment};

	fn sample_content() -> Vec<u8> {
		let di = DeliveryInstructions::First(FirstFragment {
			delivery_type: DeliveryType::Local,
			tunnel_id: None,
			to_hash: None,
			delay: None,
			extended_options: vec![],
			message_id: None,
			size: 5,
		});
		let mut buf = di.to_bytes();
		buf.extend_from_slice(b"hello");
		buf
	}

	#[test]
	fn checksum_verifies_after_build() {
		let frame = build(1, [0x42; 16], &sample_content(), &[0xAB; 8]).unwrap();
		frame.verify_checksum().unwrap();
	}

	#[test]
	fn tampered_checksum_is_detected() {
		let mut frame = build(1, [0x42; 16], &sample_content(), &[0xAB; 8]).unwrap();
		frame.0[20] ^= 0xFF;
		assert!(matches!(
			frame.verify_checksum(),
			Err(I2pError::CryptoMismatch { .. })
		));
	}

	#[test]
	fn fragments_round_trip() {
		let frame = build(1, [0x42; 16], &sample_content(), &[0xAB; 8]).unwrap();
		let fragments = frame.fragments().unwrap();
		assert_eq!(fragments.len(), 1);
		assert_eq!(fragments[0].1, b"hello");
	}

	#[test]
	fn encrypt_then_decrypt_round_trips_and_checksum_holds() {
		let plain = build(7, [0x11; 16], &sample_content(), &[0xCD; 4]).unwrap();
		let cipher = TunnelCipher::new([0x22; 32], [0x33; 32]);
		let encrypted = plain.encrypt(&cipher).unwrap();
		assert_eq!(encrypted.tunnel_id(), 7);
		let decrypted = encrypted.decrypt(&cipher).unwrap();
		decrypted.verify_checksum().unwrap();
		assert_eq!(decrypted.fragments().unwrap()[0].1, b"hello");
	}

	#[test]
	fn content_too_large_is_rejected() {
		let huge = vec![1u8; DATA_AREA_LEN];
		assert!(build(1, [0u8; 16], &huge, &[0xFF; 8]).is_err());
	}

	#[test]
	fn zero_byte_in_padding_is_rejected() {
		assert!(build(1, [0u8; 16], &sample_content(), &[0x00]).is_err());
	}
}
