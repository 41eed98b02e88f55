//! Tunnel message processing: the encrypted 1028-byte frame format,
//! per-fragment delivery instructions, and reassembly of messages split
//! across several fragments.
//!
//! [Tunnel message specification](https://geti2p.net/spec/tunnel-message)

pub mod delivery;
pub mod frame;
pub mod reassembly;

pub use delivery::{DeliveryInstructions, DeliveryType, FirstFragment, FollowOnFragment};
pub use frame::{build as build_frame, DecryptedTunnelMessage, EncryptedTunnelMessage};
pub use reassembly::{Reassembler, ReassemblyLimits};
