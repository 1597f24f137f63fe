use std::collections::HashMap;

use crate::address::Address;
use crate::error::WalletError;

/// In-memory nonce cache, one counter per address.
///
/// A counter holds the last nonce issued (or the chain's nonce right after
/// seeding). [`next`](Self::next) pre-increments, so after `seed(a, n)` the
/// first issued nonce is `n + 1`. Only [`resync`](Self::resync) may move a
/// counter backwards.
///
/// The tracker itself is not synchronised; callers that share it wrap it
/// in a mutex held across "issue nonce, sign, submit".
#[derive(Debug, Default)]
pub struct SequenceTracker {
	last: HashMap<Address, u64>,
}

impl SequenceTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start tracking `address` from the chain's current nonce.
	pub fn seed(&mut self, address: &Address, remote_sequence: u64) {
		self.last.insert(address.clone(), remote_sequence);
	}

	/// Issue the next nonce for `address`.
	pub fn next(&mut self, address: &Address) -> Result<u64, WalletError> {
		let last = self
			.last
			.get_mut(address)
			.ok_or_else(|| WalletError::NotSeeded(address.clone()))?;
		*last = last
			.checked_add(1)
			.ok_or_else(|| WalletError::SequenceExhausted(address.clone()))?;
		Ok(*last)
	}

	/// The most recently issued nonce, without issuing a new one.
	pub fn last_issued(&self, address: &Address) -> Result<u64, WalletError> {
		self.last
			.get(address)
			.copied()
			.ok_or_else(|| WalletError::NotSeeded(address.clone()))
	}

	/// Overwrite the counter with the chain's authoritative nonce.
	///
	/// Returns the previous value, if the address was tracked.
	pub fn resync(&mut self, address: &Address, remote_sequence: u64) -> Option<u64> {
		self.last.insert(address.clone(), remote_sequence)
	}
}
