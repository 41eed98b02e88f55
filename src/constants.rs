//! Shared wire-format constants: I2P's Base32/Base64 alphabets and the
//! handful of magic numbers referenced by more than one module.

use data_encoding::{Encoding, Specification};
use lazy_static::lazy_static;

/// Suffix appended to a destination's Base32 address.
pub const B32_EXT: &str = ".b32.i2p";

lazy_static! {
	/// I2P's Base64 alphabet: standard Base64 with `+` and `/` swapped for
	/// `-` and `~`, so destinations can appear unescaped in filenames and URLs.
	pub static ref I2P_BASE64: Encoding = {
		let mut spec = Specification::new();
		spec.symbols
			.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-~");
		spec.padding = Some('=');
		spec.encoding().unwrap()
	};

	/// I2P's Base32 alphabet, used for `.b32.i2p` addresses and the NetDB
	/// skiplist's per-hash file names. Unpadded.
	pub static ref I2P_BASE32: Encoding = {
		let mut spec = Specification::new();
		spec.symbols.push_str("abcdefghijklmnopqrstuvwxyz234567");
		spec.padding = None;
		spec.encoding().unwrap()
	};
}

/// Fixed size of the public-key area inside a KeysAndCert.
pub const KEYS_AND_CERT_PUBLIC_KEY_LEN: usize = 256;
/// Fixed size of the legacy signing-key area inside a KeysAndCert.
pub const KEYS_AND_CERT_SPK_LEN: usize = 128;
/// Minimum total size of a KeysAndCert (256 + 128 + 3-byte minimal certificate).
pub const KEYS_AND_CERT_MIN_LEN: usize =
	KEYS_AND_CERT_PUBLIC_KEY_LEN + KEYS_AND_CERT_SPK_LEN + 3;

/// Size of a single encrypted tunnel message frame.
pub const TUNNEL_MESSAGE_LEN: usize = 1028;
/// Maximum number of Leases a LeaseSet may carry.
pub const MAX_LEASES: usize = 16;
