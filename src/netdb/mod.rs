//! NetDB: local storage and network-wide resolution of `RouterInfo`s and
//! `LeaseSet`s.
//!
//! [Network database specification](https://geti2p.net/spec/netdb)

pub mod bootstrap;
pub mod resolver;
pub mod storage;

pub use bootstrap::{reseed_if_below_threshold, Bootstrap, Reseed};
pub use resolver::{DirectResolver, KademliaResolver, ResolveOutcome, Resolver};
pub use storage::StdNetDb;

use crate::common::{Hash, LeaseSet, RouterInfo};

/// The local and network-wide key-value store of `RouterInfo`s and
/// `LeaseSet`s.
///
/// Mirrors `go-i2p`'s `lib/netdb.NetworkDatabase` interface, widened to
/// also carry `LeaseSet`s — both an inbound `DatabaseStore` message's
/// handler and `DatabaseStoreData` handle both record kinds, so the
/// storage contract needs to as well — and to return `anyhow::Result`
/// rather than panicking on I/O failure, per this crate's NetDB/Bootstrap/
/// Resolver boundary convention (heterogeneous I/O + parsing failures
/// compose under
/// `anyhow` rather than the codec's own `I2pError`).
pub trait NetworkDatabase: Send + Sync {
	/// Looks up a `RouterInfo` by its identity hash, locally only.
	fn get_router_info(&self, hash: &Hash) -> anyhow::Result<Option<RouterInfo>>;

	/// Stores a `RouterInfo` locally. Last-writer-wins: callers are
	/// expected to have already decided this entry supersedes any prior
	/// one (the `published` Date is advisory only, per §5).
	fn store_router_info(&self, hash: Hash, ri: RouterInfo) -> anyhow::Result<()>;

	/// Looks up a `LeaseSet` by its destination hash, locally only.
	fn get_lease_set(&self, hash: &Hash) -> anyhow::Result<Option<LeaseSet>>;

	/// Stores a `LeaseSet` locally.
	fn store_lease_set(&self, hash: Hash, ls: LeaseSet) -> anyhow::Result<()>;

	/// How many `RouterInfo`s are known locally.
	fn size(&self) -> usize;

	/// Ensures the underlying storage (directories, files) exists, creating
	/// it if necessary.
	fn ensure(&self) -> anyhow::Result<()>;
}
