//! Transport interface contract: consumed by this crate's core, provided
//! by collaborators outside it.
//!
//! Grounded in §6's "Transport interface" and the teacher's own
//! `transport` module (`transport::ntcp2::handshake`, a concrete
//! Noise-protocol NTCP2 handshake state machine over `tokio`/`snow`). That
//! concrete socket plumbing is exactly the kind of implementor this crate
//! excludes from its own scope; what belongs here is only the contract a
//! concrete transport (NTCP2, SSU, or a test double) must satisfy so the
//! core can send and receive I2NP messages without knowing which wire
//! transport carried them.

use futures::future::BoxFuture;

use crate::common::{RouterIdentity, RouterInfo};
use crate::error::Result;
use crate::i2np::MessagePayload;

/// An established, bidirectional channel to a single peer.
///
/// `queue_send`/`read_next` are the two ends of the channel; `close` tears
/// it down without necessarily flushing whatever is still queued.
pub trait Session: Send + Sync {
	/// Enqueues `message` for delivery. Returns once the message is
	/// accepted into the session's outgoing queue, not once it is
	/// acknowledged by the peer.
	fn queue_send(&self, message: MessagePayload) -> Result<()>;

	/// Number of messages currently queued for send but not yet flushed
	/// to the wire.
	fn send_queue_size(&self) -> usize;

	/// Waits for the next inbound message. Dropping the returned future
	/// before it resolves abandons the wait without closing the session.
	fn read_next(&self) -> BoxFuture<'_, Result<MessagePayload>>;

	/// Clean shutdown; idempotent.
	fn close(&self);
}

/// A transport binds a local identity and produces [`Session`]s to peers
/// it can reach.
pub trait Transport: Send + Sync {
	/// Binds the local `RouterIdentity` this transport advertises and
	/// authenticates with. Concrete transports typically derive their
	/// static handshake key material from it.
	fn set_identity(&self, identity: RouterIdentity);

	/// Returns an established or newly-established session to the peer
	/// described by `router_info`, blocking (via the returned future)
	/// until one is available. Resolves to
	/// [`crate::error::I2pError::TransportUnavailable`] when this
	/// transport cannot reach that peer at all; callers should try a
	/// different transport or peer rather than retry the same one.
	fn get_session(&self, router_info: &RouterInfo) -> BoxFuture<'_, Result<std::sync::Arc<dyn Session>>>;

	/// Reports whether this transport could, in principle, reach the peer
	/// described by `router_info` (e.g. it advertises a compatible
	/// `RouterAddress` style). Does not attempt a connection.
	fn compatible(&self, router_info: &RouterInfo) -> bool;

	/// Clean shutdown of every session this transport holds; idempotent.
	fn close(&self);
}
