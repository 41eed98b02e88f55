//! The configuration contract this crate consumes but never loads itself.
//!
//! Parsing a config file (TOML, JSON, whatever the CLI collaborator
//! prefers) is explicitly out of this crate's scope; `Config` only models
//! the shape of the values the NetDB and bootstrap code need, so a CLI can
//! build one from whatever file format it likes and hand it in.

use serde::{Deserialize, Serialize};

/// One configured reseed server: where to fetch an SU3 bundle from, and
/// the fingerprint its signature is expected to verify against.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct ReseedServer {
	pub url: String,
	pub su3_fingerprint: String,
}

/// The subset of router configuration this crate's NetDB and bootstrap
/// logic needs: where the on-disk NetDB lives, when to trigger a reseed,
/// and which servers to reseed from.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
	pub net_db_path: std::path::PathBuf,
	#[serde(default = "default_low_peer_threshold")]
	pub low_peer_threshold: usize,
	#[serde(default)]
	pub reseed_servers: Vec<ReseedServer>,
}

fn default_low_peer_threshold() -> usize {
	10
}

impl Default for Config {
	fn default() -> Self {
		Config {
			net_db_path: std::path::PathBuf::from("./netDb"),
			low_peer_threshold: default_low_peer_threshold(),
			reseed_servers: Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_matches_documented_defaults() {
		let config = Config::default();
		assert_eq!(config.net_db_path, std::path::PathBuf::from("./netDb"));
		assert_eq!(config.low_peer_threshold, 10);
		assert!(config.reseed_servers.is_empty());
	}

	#[test]
	fn reseed_servers_are_plain_data() {
		let server = ReseedServer {
			url: "https://reseed.example/".to_string(),
			su3_fingerprint: "deadbeef".to_string(),
		};
		let config = Config {
			reseed_servers: vec![server.clone()],
			..Config::default()
		};
		assert_eq!(config.reseed_servers[0], server);
	}
}
