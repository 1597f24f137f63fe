//! Transaction-signing wallet for a single token contract.
//!
//! # Concurrency
//! `transfer` and `reset_sequence` run inside one critical section guarded
//! by the wallet's sequence mutex: issuing the nonce, signing and submitting
//! happen while the lock is held, so concurrent transfers on one wallet are
//! serialised and never share or reorder nonces. `get_balance` does not
//! take the lock. Nothing here coordinates with other processes using the
//! same key.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::address::Address;
use crate::bignum::BigNum;
use crate::error::WalletError;
use crate::invocation::{Fee, TokenContract, Transaction, TxId, FN_BALANCE_OF, FN_TRANSFER};
use crate::rpc::ChainClient;
use crate::sequence::SequenceTracker;
use crate::signer::Signer;

const OP_GET_STATE: &str = "getState";

pub struct TransactionWallet {
	signer: Box<dyn Signer>,
	client: Arc<dyn ChainClient>,
	contract: Arc<TokenContract>,
	sequences: Mutex<SequenceTracker>,
}

impl TransactionWallet {
	/// Build a wallet and seed its nonce from the signer's on-chain state.
	///
	/// Fails if the account state cannot be fetched.
	pub async fn connect(
		signer: Box<dyn Signer>,
		client: Arc<dyn ChainClient>,
		contract: Arc<TokenContract>,
	) -> Result<Self, WalletError> {
		let address = signer.address().clone();
		tracing::info!(
			signer = %address,
			contract = %contract.address(),
			"initializing token wallet"
		);

		let state = client
			.account_state(&address)
			.await
			.map_err(|e| WalletError::remote(OP_GET_STATE, None, e))?;

		let mut tracker = SequenceTracker::new();
		tracker.seed(&address, state.nonce);
		tracing::debug!(signer = %address, nonce = state.nonce, "seeded nonce");

		Ok(Self {
			signer,
			client,
			contract,
			sequences: Mutex::new(tracker),
		})
	}

	pub fn signer_address(&self) -> &Address {
		self.signer.address()
	}

	pub fn contract(&self) -> &TokenContract {
		&self.contract
	}

	/// The nonce most recently issued by this wallet.
	pub async fn last_sequence(&self) -> Result<u64, WalletError> {
		self.sequences.lock().await.last_issued(self.signer.address())
	}

	/// Transfer `amount` tokens to `to`.
	///
	/// A failed submission keeps its nonce consumed locally; call
	/// [`reset_sequence`](Self::reset_sequence) before retrying.
	pub async fn transfer(&self, to: &str, amount: &str) -> Result<TxId, WalletError> {
		let to: Address = to.parse()?;
		let amount: BigNum = amount
			.parse()
			.map_err(|_| WalletError::InvalidAmount(amount.to_owned()))?;

		let invocation = self.contract.invocation(
			FN_TRANSFER,
			vec![Value::String(to.to_string()), Value::String(amount.to_string())],
		)?;

		let from = self.signer.address().clone();
		let mut sequences = self.sequences.lock().await;
		let nonce = sequences.next(&from)?;
		tracing::trace!(signer = %from, nonce, args = ?invocation.args, "signing invocation");

		let tx = Transaction {
			nonce,
			from,
			invocation,
			fee: Fee::ZERO,
		};
		let signed = self.signer.sign_transaction(tx).await?;

		match self.client.send_transaction(&signed).await {
			Ok(id) => {
				tracing::debug!(function = FN_TRANSFER, nonce, tx = %id, "submitted transaction");
				Ok(id)
			}
			Err(e) => {
				tracing::warn!(function = FN_TRANSFER, nonce, error = %e, "failed to execute");
				Err(WalletError::remote(FN_TRANSFER, Some(nonce), e))
			}
		}
	}

	/// The wallet's own token balance.
	pub async fn get_balance(&self) -> Result<BigNum, WalletError> {
		query_balance(self.client.as_ref(), &self.contract, self.signer.address()).await
	}

	/// Realign the local nonce with the chain after a failed transfer.
	pub async fn reset_sequence(&self) -> Result<(), WalletError> {
		let address = self.signer.address();
		let mut sequences = self.sequences.lock().await;

		let state = self
			.client
			.account_state(address)
			.await
			.map_err(|e| WalletError::remote(OP_GET_STATE, None, e))?;
		let used = sequences.resync(address, state.nonce);

		tracing::info!(
			signer = %address,
			previous = ?used,
			current = state.nonce,
			"reset nonce"
		);
		Ok(())
	}
}

/// Query `owner`'s balance on `contract`. Needs no signer and issues no nonce.
pub async fn query_balance(
	client: &dyn ChainClient,
	contract: &TokenContract,
	owner: &Address,
) -> Result<BigNum, WalletError> {
	let query = contract.balance_of(owner)?;
	let result = client
		.query(&query)
		.await
		.map_err(|e| WalletError::remote(FN_BALANCE_OF, None, e))?;
	tracing::debug!(function = FN_BALANCE_OF, owner = %owner, %result, "query result");

	BigNum::decode(&result).map_err(|source| WalletError::Decode {
		operation: FN_BALANCE_OF.to_owned(),
		source,
	})
}

impl std::fmt::Debug for TransactionWallet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TransactionWallet")
			.field("signer", self.signer.address())
			.field("contract", self.contract.address())
			.finish_non_exhaustive()
	}
}
