//! Bootstrap and reseed: populating an empty or low-peer `NetworkDatabase`
//! from known reseed servers.
//!
//! Grounded in `go-i2p`'s `lib/bootstrap.Bootstrap`/`Reseed`
//! (`lib/bootstrap/bootstrap.go`, `lib/netdb/bootstrap.go`) and
//! `lib/netdb.StdNetDB.Reseed`/`Ensure` (`lib/netdb/std.go`). The
//! originals hardcode a single reseed URL (`GetRandomReseed` returns a
//! fixed `https://i2p.rocks:445/`); this crate's `Config`
//! (`reseed_servers`) is what supplies that list instead, so trait
//! implementors choose among configured servers rather than a compiled-in
//! default, matching the expanded specification's external `Config`
//! contract in full.
//!
//! HTTPS fetching and SU3-file decoding into a stream of entries are
//! external collaborators per this crate's scope (§1); only the
//! interfaces are defined here.

use std::sync::mpsc::SyncSender;

use crate::common::RouterInfo;

use super::NetworkDatabase;

/// Fetches unknown peers to seed an empty or under-populated
/// `NetworkDatabase`.
///
/// Mirrors the original's `Bootstrap.GetPeers(n int) (chan []RouterInfo, error)`; this
/// crate's redesign returns a single `Future` of a batch rather than a
/// channel a caller must drain, per §9's channel-as-future note — there is
/// exactly one result (a batch), not a stream, so a future is the more
/// precise fit than the `Reseed` trait below (which genuinely streams).
pub trait Bootstrap: Send + Sync {
	/// Asks for up to `n` routers; `n == 0` means "as many as possible."
	/// Fails if zero routers were obtained.
	fn get_peers(
		&self,
		n: usize,
	) -> futures::future::BoxFuture<'_, anyhow::Result<Vec<RouterInfo>>>;
}

/// Streams SU3-decoded `RouterInfo`s from a reseed source.
///
/// Mirrors the original's `Reseed.Reseed(chnl chan *Entry) error` /
/// `Reseed(chnl chan *stdi2p.SU3) error` drafts directly: a bounded channel is the
/// right shape here (an unbounded number of entries, produced and
/// consumed concurrently), so unlike `Bootstrap` this trait keeps the
/// channel rather than collapsing it into a future, per §9's note that the
/// redesign should encapsulate the *discipline* a channel-based API
/// leaked (cancellation, backpressure) without necessarily discarding
/// channels where they're the right tool.
pub trait Reseed: Send + Sync {
	/// Streams decoded `RouterInfo`s down `sink` as SU3 files are fetched
	/// and parsed, blocking the reseed thread only as long as the consumer
	/// keeps draining the channel. Returns the number of entries sent on
	/// success.
	fn reseed(&self, sink: SyncSender<RouterInfo>) -> anyhow::Result<usize>;
}

/// Reseeds `netdb` from `bootstrap` if it currently knows fewer than
/// `threshold` routers, matching `go-i2p`'s `StdNetDB.Reseed(minRouters)` /
/// `Ensure(minRouters)` behavior: below-threshold triggers a fetch, and a
/// fetch that comes back empty is treated as failure (the original: "if
/// zero routers were obtained").
pub async fn reseed_if_below_threshold<D: NetworkDatabase>(
	netdb: &D,
	bootstrap: &dyn Bootstrap,
	threshold: usize,
) -> anyhow::Result<()> {
	let current = netdb.size();
	if current >= threshold {
		log::debug!(
			"netdb: have {} routers (threshold {}), skipping reseed",
			current,
			threshold
		);
		return Ok(());
	}

	log::info!(
		"netdb: only {} routers known (threshold {}), reseeding",
		current,
		threshold
	);
	let peers = bootstrap.get_peers(0).await?;
	if peers.is_empty() {
		anyhow::bail!("reseed bootstrap returned zero routers");
	}
	for ri in peers {
		let hash = ri.hash();
		netdb.store_router_info(hash, ri)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::common::{Certificate, CertificateType, I2PDate, I2PString, KeysAndCert, Mapping, RouterAddress, RouterIdentity};
	use crate::constants::{KEYS_AND_CERT_PUBLIC_KEY_LEN, KEYS_AND_CERT_SPK_LEN};
	use crate::netdb::StdNetDb;
	use futures::FutureExt;

	fn sample_router_info(tag: u8) -> RouterInfo {
		let identity = RouterIdentity(KeysAndCert::new(
			[tag; KEYS_AND_CERT_PUBLIC_KEY_LEN],
			[tag; KEYS_AND_CERT_SPK_LEN],
			Certificate::new(CertificateType::Null, vec![]),
		));
		RouterInfo {
			router_identity: identity,
			published: I2PDate(0),
			addresses: vec![RouterAddress {
				cost: 10,
				expiration: I2PDate(0),
				transport_style: I2PString::new("NTCP2"),
				options: Mapping::new(vec![]),
			}],
			peer_size: 0,
			options: Mapping::new(vec![]),
			signature: vec![0u8; 40],
		}
	}

	struct FakeBootstrap(Vec<RouterInfo>);

	impl Bootstrap for FakeBootstrap {
		fn get_peers(
			&self,
			_n: usize,
		) -> futures::future::BoxFuture<'_, anyhow::Result<Vec<RouterInfo>>> {
			let peers = self.0.clone();
			async move { Ok(peers) }.boxed()
		}
	}

	struct EmptyBootstrap;

	impl Bootstrap for EmptyBootstrap {
		fn get_peers(
			&self,
			_n: usize,
		) -> futures::future::BoxFuture<'_, anyhow::Result<Vec<RouterInfo>>> {
			async move { Ok(Vec::new()) }.boxed()
		}
	}

	#[test]
	fn below_threshold_triggers_reseed_and_stores_peers() {
		let dir = tempfile::tempdir().unwrap();
		let db = StdNetDb::new(dir.path());
		db.ensure().unwrap();

		let bootstrap = FakeBootstrap(vec![sample_router_info(1), sample_router_info(2)]);
		futures::executor::block_on(reseed_if_below_threshold(&db, &bootstrap, 10)).unwrap();

		assert_eq!(db.size(), 2);
	}

	#[test]
	fn at_or_above_threshold_skips_reseed() {
		let dir = tempfile::tempdir().unwrap();
		let db = StdNetDb::new(dir.path());
		db.ensure().unwrap();
		db.store_router_info(sample_router_info(9).hash(), sample_router_info(9))
			.unwrap();

		let bootstrap = FakeBootstrap(vec![sample_router_info(1)]);
		futures::executor::block_on(reseed_if_below_threshold(&db, &bootstrap, 1)).unwrap();

		// Only the one router stored before the call; the bootstrap's peer
		// was never fetched because we were already at threshold.
		assert_eq!(db.size(), 1);
	}

	#[test]
	fn empty_bootstrap_result_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let db = StdNetDb::new(dir.path());
		db.ensure().unwrap();

		let result = futures::executor::block_on(reseed_if_below_threshold(
			&db,
			&EmptyBootstrap,
			10,
		));
		assert!(result.is_err());
	}
}
