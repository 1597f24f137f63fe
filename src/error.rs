//! Error types for the token wallet.

use thiserror::Error;

use crate::address::Address;

/// Failure to decode an arbitrary-precision value from its wire object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
	#[error("expected a JSON object")]
	NotAnObject,

	#[error("field _bignum is required")]
	MissingField,

	#[error("malformed number: {0:?}")]
	MalformedNumber(String),
}

/// Failure reported by a [`ChainClient`](crate::rpc::ChainClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
	/// The node could not be reached or did not answer in time.
	#[error("node unavailable: {0}")]
	Unavailable(String),

	/// The node rejected the transaction nonce as stale or out of order.
	#[error("invalid nonce: {0}")]
	InvalidSequence(String),

	/// The node answered with any other error.
	#[error("rejected: {0}")]
	Rejected(String),
}

/// Errors surfaced by the wallet core.
#[derive(Debug, Error)]
pub enum WalletError {
	#[error("sequence tracker not seeded for {0}")]
	NotSeeded(Address),

	#[error("nonce counter for {0} is exhausted")]
	SequenceExhausted(Address),

	#[error("{operation}: node unavailable: {reason}")]
	RemoteUnavailable { operation: String, reason: String },

	#[error("{operation}: nonce {sequence} rejected: {reason}")]
	InvalidSequence {
		operation: String,
		sequence: u64,
		reason: String,
	},

	#[error("{operation}: rejected by node: {reason}")]
	Rejected { operation: String, reason: String },

	#[error("contract {contract} has no function {function}")]
	UnknownFunction { contract: Address, function: String },

	#[error("invalid address {0}")]
	InvalidAddress(String),

	#[error("invalid amount {0}")]
	InvalidAmount(String),

	#[error("invalid credential: {0}")]
	InvalidCredential(String),

	#[error("{operation}: failed to decode result")]
	Decode {
		operation: String,
		#[source]
		source: DecodeError,
	},
}

impl WalletError {
	/// Attach the failing operation to a remote error.
	///
	/// `sequence` is the nonce carried by the failed submission, if any.
	pub fn remote(operation: &str, sequence: Option<u64>, err: RemoteError) -> Self {
		let operation = operation.to_owned();
		match err {
			RemoteError::Unavailable(reason) => Self::RemoteUnavailable { operation, reason },
			RemoteError::InvalidSequence(reason) => Self::InvalidSequence {
				operation,
				sequence: sequence.unwrap_or_default(),
				reason,
			},
			RemoteError::Rejected(reason) => Self::Rejected { operation, reason },
		}
	}

	/// True when local and remote nonces may have diverged, so the caller
	/// should reset the wallet's sequence before retrying.
	pub fn is_sequence_related(&self) -> bool {
		matches!(
			self,
			Self::RemoteUnavailable { .. } | Self::InvalidSequence { .. } | Self::Rejected { .. }
		)
	}
}
