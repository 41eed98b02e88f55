//! Reassembles I2NP messages that were split across multiple tunnel
//! message fragments.
//!
//! A multi-fragment message's first fragment carries a message ID that
//! every follow-on fragment repeats; fragments for the same message can
//! arrive out of order (or not at all, if a hop drops a frame), so
//! reassembly is keyed by message ID rather than assumed to be strictly
//! sequential, and bounded so an endpoint can't be made to hold onto
//! partial messages indefinitely.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::delivery::DeliveryInstructions;

/// One in-progress reassembly: fragments received so far, keyed by
/// fragment number, plus enough bookkeeping to know when it's complete
/// and when it's gone stale.
struct Pending {
	fragments: std::collections::BTreeMap<u8, Vec<u8>>,
	total_declared_size: usize,
	received_size: usize,
	last_fragment_number: Option<u8>,
	created_at: Instant,
}

impl Pending {
	fn new(size_hint: usize) -> Self {
		Pending {
			fragments: std::collections::BTreeMap::new(),
			total_declared_size: size_hint,
			received_size: 0,
			last_fragment_number: None,
			created_at: Instant::now(),
		}
	}

	fn is_complete(&self) -> bool {
		match self.last_fragment_number {
			Some(last) => (0..=last).all(|n| self.fragments.contains_key(&n)),
			None => false,
		}
	}

	fn assemble(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.received_size);
		for bytes in self.fragments.values() {
			out.extend_from_slice(bytes);
		}
		out
	}
}

/// Bounds on how much partial-message state a [`Reassembler`] will hold
/// before it starts dropping the oldest pending messages.
pub struct ReassemblyLimits {
	pub max_pending_messages: usize,
	pub max_total_bytes: usize,
	pub max_age: Duration,
}

impl Default for ReassemblyLimits {
	fn default() -> Self {
		ReassemblyLimits {
			max_pending_messages: 256,
			max_total_bytes: 4 * 1024 * 1024,
			max_age: Duration::from_secs(60),
		}
	}
}

/// Accumulates tunnel message fragments by message ID and hands complete
/// I2NP messages to a caller-supplied sink as soon as every fragment has
/// arrived.
pub struct Reassembler {
	pending: DashMap<u32, Pending>,
	limits: ReassemblyLimits,
}

impl Reassembler {
	pub fn new(limits: ReassemblyLimits) -> Self {
		Reassembler {
			pending: DashMap::new(),
			limits,
		}
	}

	fn total_bytes(&self) -> usize {
		self.pending.iter().map(|entry| entry.value().received_size).sum()
	}

	/// Drops pending reassemblies older than `max_age`. Call this
	/// periodically; fragment submission itself never blocks on it.
	pub fn evict_expired(&self) {
		let cutoff = self.limits.max_age;
		self.pending
			.retain(|_, pending| pending.created_at.elapsed() < cutoff);
	}

	/// Feeds one (delivery instructions, fragment bytes) pair into the
	/// reassembler. Returns the fully reassembled message the instant the
	/// last fragment arrives; returns `None` while a message is still
	/// incomplete, and silently drops fragments for messages with no
	/// message ID (unfragmented, complete-in-one messages should be
	/// handled by the caller directly rather than through this path).
	pub fn submit(&self, instructions: &DeliveryInstructions, fragment: &[u8], sink: impl FnOnce(Vec<u8>)) {
		let Some(message_id) = instructions.message_id() else {
			return;
		};

		if self.pending.len() >= self.limits.max_pending_messages && !self.pending.contains_key(&message_id) {
			return;
		}
		if self.total_bytes() + fragment.len() > self.limits.max_total_bytes {
			return;
		}

		let (fragment_number, is_last) = match instructions {
			DeliveryInstructions::First(_) => (0u8, false),
			DeliveryInstructions::FollowOn(f) => (f.fragment_number, f.is_last),
		};

		let complete = {
			let mut entry = self
				.pending
				.entry(message_id)
				.or_insert_with(|| Pending::new(fragment.len()));
			entry.fragments.insert(fragment_number, fragment.to_vec());
			entry.received_size += fragment.len();
			if is_last {
				entry.last_fragment_number = Some(fragment_number);
			}
			entry.is_complete()
		};

		if complete {
			if let Some((_, pending)) = self.pending.remove(&message_id) {
				sink(pending.assemble());
			}
		}
	}

	pub fn pending_count(&self) -> usize {
		self.pending.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tunnel::delivery::{DeliveryType, FirstFragment, FollowOnFragment};

	#[test]
	fn reassembles_out_of_order_fragments() {
		let reassembler = Reassembler::new(ReassemblyLimits::default());
		let first = DeliveryInstructions::First(FirstFragment {
			delivery_type: DeliveryType::Local,
			tunnel_id: None,
			to_hash: None,
			delay: None,
			extended_options: vec![],
			message_id: Some(7),
			size: 5,
		});
		let second = DeliveryInstructions::FollowOn(FollowOnFragment {
			fragment_number: 1,
			is_last: true,
			message_id: 7,
			size: 5,
		});

		let mut assembled = None;
		reassembler.submit(&second, b"world", |_| panic!("should not complete yet"));
		assert_eq!(reassembler.pending_count(), 1);
		reassembler.submit(&first, b"hello", |msg| assembled = Some(msg));

		assert_eq!(assembled, Some(b"helloworld".to_vec()));
		assert_eq!(reassembler.pending_count(), 0);
	}

	#[test]
	fn unfragmented_message_id_is_ignored() {
		let reassembler = Reassembler::new(ReassemblyLimits::default());
		let di = DeliveryInstructions::First(FirstFragment {
			delivery_type: DeliveryType::Local,
			tunnel_id: None,
			to_hash: None,
			delay: None,
			extended_options: vec![],
			message_id: None,
			size: 5,
		});
		reassembler.submit(&di, b"hello", |_| panic!("unfragmented should never complete here"));
		assert_eq!(reassembler.pending_count(), 0);
	}

	#[test]
	fn over_capacity_messages_are_dropped() {
		let limits = ReassemblyLimits {
			max_pending_messages: 1,
			..ReassemblyLimits::default()
		};
		let reassembler = Reassembler::new(limits);
		let first = DeliveryInstructions::First(FirstFragment {
			delivery_type: DeliveryType::Local,
			tunnel_id: None,
			to_hash: None,
			delay: None,
			extended_options: vec![],
			message_id: Some(1),
			size: 1,
		});
		let second = DeliveryInstructions::First(FirstFragment {
			delivery_type: DeliveryType::Local,
			tunnel_id: None,
			to_hash: None,
			delay: None,
			extended_options: vec![],
			message_id: Some(2),
			size: 1,
		});
		reassembler.submit(&first, b"a", |_| {});
		reassembler.submit(&second, b"b", |_| panic!("second message should be dropped"));
		assert_eq!(reassembler.pending_count(), 1);
	}
}
