//! Delivery Instructions: the per-fragment routing header that precedes
//! each I2NP message fragment packed into a tunnel message's data area.
//!
//! [Tunnel message specification](https://geti2p.net/spec/tunnel-message)

use crate::common::{read_u16_be, read_u32_be, Hash};
use crate::error::{I2pError, Result};

/// Where a first-fragment delivery instructions block routes its message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeliveryType {
	Local,
	Tunnel,
	Router,
	Unused,
}

impl DeliveryType {
	fn from_bits(bits: u8) -> DeliveryType {
		match bits {
			0 => DeliveryType::Local,
			1 => DeliveryType::Tunnel,
			2 => DeliveryType::Router,
			_ => DeliveryType::Unused,
		}
	}

	fn to_bits(self) -> u8 {
		match self {
			DeliveryType::Local => 0,
			DeliveryType::Tunnel => 1,
			DeliveryType::Router => 2,
			DeliveryType::Unused => 3,
		}
	}
}

/// A first-fragment (or unfragmented single-message) delivery instructions
/// block: the full routing header, carrying a destination and, for
/// multi-fragment messages, a message ID later fragments reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FirstFragment {
	pub delivery_type: DeliveryType,
	pub tunnel_id: Option<u32>,
	pub to_hash: Option<Hash>,
	pub delay: Option<u8>,
	pub extended_options: Vec<u8>,
	/// Present only when this is the first of several fragments.
	pub message_id: Option<u32>,
	pub size: u16,
}

/// A follow-on fragment: the compact header used by every fragment after
/// the first of a multi-fragment message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FollowOnFragment {
	pub fragment_number: u8,
	pub is_last: bool,
	pub message_id: u32,
	pub size: u16,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeliveryInstructions {
	First(FirstFragment),
	FollowOn(FollowOnFragment),
}

impl DeliveryInstructions {
	/// Reads one delivery instructions block. Bit 7 of the flag byte
	/// selects between the two formats; everything else is read
	/// positionally from there, per the tunnel message specification.
	pub fn read(bytes: &[u8]) -> Result<(DeliveryInstructions, &[u8])> {
		if bytes.is_empty() {
			return Err(I2pError::InputTooShort {
				offset: 0,
				needed: 1,
				available: 0,
			});
		}
		let flag = bytes[0];
		let rest = &bytes[1..];

		if flag & 0x80 != 0 {
			let fragment_number = (flag >> 1) & 0x3F;
			let is_last = flag & 0x01 != 0;

			if rest.len() < 6 {
				return Err(I2pError::InputTooShort {
					offset: 1,
					needed: 6,
					available: rest.len(),
				});
			}
			let message_id = read_u32_be(&rest[0..4]);
			let size = read_u16_be(&rest[4..6]);

			Ok((
				DeliveryInstructions::FollowOn(FollowOnFragment {
					fragment_number,
					is_last,
					message_id,
					size,
				}),
				&rest[6..],
			))
		} else {
			let delivery_type = DeliveryType::from_bits((flag >> 5) & 0x03);
			let has_delay = flag & 0x10 != 0;
			let fragmented = flag & 0x08 != 0;
			let has_extended_options = flag & 0x04 != 0;

			let mut rest = rest;
			let tunnel_id = if matches!(delivery_type, DeliveryType::Tunnel) {
				if rest.len() < 4 {
					return Err(I2pError::InputTooShort {
						offset: 1,
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

			let to_hash = if matches!(delivery_type, DeliveryType::Tunnel | DeliveryType::Router) {
				let (hash, remainder) = Hash::read(rest)?;
				rest = remainder;
				Some(hash)
			} else {
				None
			};

			let delay = if has_delay {
				if rest.is_empty() {
					return Err(I2pError::InputTooShort {
						offset: 1,
						needed: 1,
						available: 0,
					});
				}
				let d = rest[0];
				rest = &rest[1..];
				Some(d)
			} else {
				None
			};

			let extended_options = if has_extended_options {
				if rest.is_empty() {
					return Err(I2pError::InputTooShort {
						offset: 1,
						needed: 1,
						available: 0,
					});
				}
				let len = rest[0] as usize;
				rest = &rest[1..];
				if rest.len() < len {
					return Err(I2pError::InputTooShort {
						offset: 1,
						needed: len,
						available: rest.len(),
					});
				}
				let (opts, remainder) = rest.split_at(len);
				rest = remainder;
				opts.to_vec()
			} else {
				Vec::new()
			};

			let message_id = if fragmented {
				if rest.len() < 4 {
					return Err(I2pError::InputTooShort {
						offset: 1,
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
					offset: 1,
					needed: 2,
					available: rest.len(),
				});
			}
			let size = read_u16_be(&rest[0..2]);
			let rest = &rest[2..];

			Ok((
				DeliveryInstructions::First(FirstFragment {
					delivery_type,
					tunnel_id,
					to_hash,
					delay,
					extended_options,
					message_id,
					size,
				}),
				rest,
			))
		}
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		match self {
			DeliveryInstructions::FollowOn(f) => {
				let mut flag = 0x80;
				flag |= (f.fragment_number & 0x3F) << 1;
				if f.is_last {
					flag |= 0x01;
				}
				let mut buf = vec![flag];
				buf.extend_from_slice(&f.message_id.to_be_bytes());
				buf.extend_from_slice(&f.size.to_be_bytes());
				buf
			}
			DeliveryInstructions::First(f) => {
				let mut flag = f.delivery_type.to_bits() << 5;
				if f.delay.is_some() {
					flag |= 0x10;
				}
				if f.message_id.is_some() {
					flag |= 0x08;
				}
				if !f.extended_options.is_empty() {
					flag |= 0x04;
				}
				let mut buf = vec![flag];
				if let Some(id) = f.tunnel_id {
					buf.extend_from_slice(&id.to_be_bytes());
				}
				if let Some(hash) = &f.to_hash {
					buf.extend_from_slice(&hash.0);
				}
				if let Some(delay) = f.delay {
					buf.push(delay);
				}
				if !f.extended_options.is_empty() {
					buf.push(f.extended_options.len() as u8);
					buf.extend_from_slice(&f.extended_options);
				}
				if let Some(id) = f.message_id {
					buf.extend_from_slice(&id.to_be_bytes());
				}
				buf.extend_from_slice(&f.size.to_be_bytes());
				buf
			}
		}
	}

	/// The number of bytes of I2NP message fragment this instructions
	/// block declares follows it.
	pub fn fragment_size(&self) -> usize {
		match self {
			DeliveryInstructions::First(f) => f.size as usize,
			DeliveryInstructions::FollowOn(f) => f.size as usize,
		}
	}

	pub fn message_id(&self) -> Option<u32> {
		match self {
			DeliveryInstructions::First(f) => f.message_id,
			DeliveryInstructions::FollowOn(f) => Some(f.message_id),
		}
	}
}
