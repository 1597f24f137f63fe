pub mod local;

pub use local::LocalSigner;

use crate::address::Address;
use crate::error::WalletError;
use crate::invocation::{SignedTransaction, Transaction};

/// The credential that authorises transactions for one address.
#[async_trait::async_trait]
pub trait Signer: Send + Sync {
	/// The address this signer controls.
	fn address(&self) -> &Address;

	/// Hash and sign a fully-built transaction.
	async fn sign_transaction(&self, tx: Transaction) -> Result<SignedTransaction, WalletError>;
}

/// Build a signer from the secret key stored in environment variable `var`.
pub fn from_env(var: &str) -> Result<Box<dyn Signer>, WalletError> {
	Ok(Box::new(LocalSigner::from_env(var)?))
}
