//! The tunnel message's symmetric double-AES scheme.
//!
//! Mirrors the reference router's `crypto.Tunnel` type: a layer key used in
//! CBC mode over the 1008-byte body, and an IV key used to ECB-encrypt the
//! 16-byte IV both before and after the body step.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{I2pError, Result};

type CbcEnc = cbc::Encryptor<Aes256>;
type CbcDec = cbc::Decryptor<Aes256>;

/// Per-hop AES key schedule for tunnel message encryption/decryption.
///
/// Constructed once when a tunnel hop is set up and reused for every frame
/// that crosses it.
pub struct TunnelCipher {
	layer_key: [u8; 32],
	iv_key: Aes256,
}

impl TunnelCipher {
	pub fn new(layer_key: [u8; 32], iv_key: [u8; 32]) -> Self {
		TunnelCipher {
			layer_key,
			iv_key: Aes256::new(GenericArray::from_slice(&iv_key)),
		}
	}

	fn ecb_encrypt_iv(&self, iv: &mut [u8; 16]) {
		let mut block = GenericArray::clone_from_slice(iv);
		self.iv_key.encrypt_block(&mut block);
		iv.copy_from_slice(&block);
	}

	fn ecb_decrypt_iv(&self, iv: &mut [u8; 16]) {
		let mut block = GenericArray::clone_from_slice(iv);
		self.iv_key.decrypt_block(&mut block);
		iv.copy_from_slice(&block);
	}

	/// Encrypts `frame` in place: `frame[4..20]` is the IV, `frame[20..1028]`
	/// is the 1008-byte body. Order: ECB-encrypt IV, CBC-encrypt body with
	/// that IV, ECB-encrypt IV again.
	pub fn encrypt(&self, frame: &mut [u8; 1028]) -> Result<()> {
		let mut iv = [0u8; 16];
		iv.copy_from_slice(&frame[4..20]);

		self.ecb_encrypt_iv(&mut iv);

		let cbc = CbcEnc::new(GenericArray::from_slice(&self.layer_key), GenericArray::from_slice(&iv));
		cbc.encrypt_padded_mut::<cbc::cipher::block_padding::NoPadding>(&mut frame[20..1028], 1008)
			.map_err(|_| I2pError::CryptoMismatch {
				what: "tunnel body is not a multiple of the AES block size",
			})?;

		self.ecb_encrypt_iv(&mut iv);
		frame[4..20].copy_from_slice(&iv);
		Ok(())
	}

	/// Decrypts `frame` in place, the exact inverse sequence of `encrypt`.
	pub fn decrypt(&self, frame: &mut [u8; 1028]) -> Result<()> {
		let mut iv = [0u8; 16];
		iv.copy_from_slice(&frame[4..20]);

		self.ecb_decrypt_iv(&mut iv);

		let cbc = CbcDec::new(GenericArray::from_slice(&self.layer_key), GenericArray::from_slice(&iv));
		cbc.decrypt_padded_mut::<cbc::cipher::block_padding::NoPadding>(&mut frame[20..1028])
			.map_err(|_| I2pError::CryptoMismatch {
				what: "tunnel body is not a multiple of the AES block size",
			})?;

		self.ecb_decrypt_iv(&mut iv);
		frame[4..20].copy_from_slice(&iv);
		Ok(())
	}
}
