use std::fmt;

use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};

use crate::address::Address;
use crate::crypto;
use crate::error::WalletError;
use crate::invocation::{SignedTransaction, Transaction};

/// Signs with a secp256k1 key held in process memory.
///
/// The key is never logged; `Debug` shows the address only.
pub struct LocalSigner {
	secp: Secp256k1<All>,
	secret: SecretKey,
	public: PublicKey,
	address: Address,
}

impl LocalSigner {
	/// Load the signer from a hex-encoded secret key.
	pub fn from_hex(key_hex: &str) -> Result<Self, WalletError> {
		let raw = crypto::parse_secret_key(key_hex)?;
		let secret = SecretKey::from_slice(&raw)
			.map_err(|e| WalletError::InvalidCredential(format!("invalid private key: {e}")))?;
		let secp = Secp256k1::new();
		let public = PublicKey::from_secret_key(&secp, &secret);
		let address = Address::from_public_key(&public.serialize());
		Ok(Self {
			secp,
			secret,
			public,
			address,
		})
	}

	/// Load the signer from the environment variable `var`.
	pub fn from_env(var: &str) -> Result<Self, WalletError> {
		let key_hex = std::env::var(var).map_err(|_| {
			WalletError::InvalidCredential(format!("environment variable {var} is not set"))
		})?;
		Self::from_hex(&key_hex)
	}

	pub fn public_key(&self) -> &PublicKey {
		&self.public
	}

	/// Check a DER signature over `digest` against this signer's key.
	pub fn verify(&self, digest: [u8; 32], der: &[u8]) -> bool {
		let Ok(sig) = secp256k1::ecdsa::Signature::from_der(der) else {
			return false;
		};
		self.secp
			.verify_ecdsa(&Message::from_digest(digest), &sig, &self.public)
			.is_ok()
	}
}

#[async_trait::async_trait]
impl super::Signer for LocalSigner {
	fn address(&self) -> &Address {
		&self.address
	}

	async fn sign_transaction(&self, tx: Transaction) -> Result<SignedTransaction, WalletError> {
		if tx.from != self.address {
			return Err(WalletError::InvalidCredential(format!(
				"signer {} cannot sign for {}",
				self.address, tx.from
			)));
		}
		let digest = crypto::transaction_digest(&tx);
		let sig = self
			.secp
			.sign_ecdsa(&Message::from_digest(digest), &self.secret);
		let hash = crypto::encode_tx_id(&digest);
		Ok(SignedTransaction::new(tx, hash, sig.serialize_der().to_vec()))
	}
}

impl fmt::Debug for LocalSigner {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LocalSigner")
			.field("address", &self.address)
			.finish_non_exhaustive()
	}
}
