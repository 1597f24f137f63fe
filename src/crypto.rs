use sha2::{Digest, Sha256};

use crate::error::WalletError;
use crate::invocation::{Transaction, TxId, TX_TYPE_CALL};

// -- Transaction digest --

/// Compute the digest a signer commits to:
/// `SHA256(nonce || sender || recipient || amount || payload || gas_limit ||
/// gas_price || type)`. Integers are little-endian; `amount` and
/// `gas_price` are minimal big-endian byte strings (empty for zero).
///
/// This is the wallet's own canonical layout. It does not include a
/// chain-id hash, so it is not the digest an Aergo node verifies.
pub fn transaction_digest(tx: &Transaction) -> [u8; 32] {
	let mut h = Sha256::new();
	h.update(tx.nonce.to_le_bytes());
	h.update(tx.from.payload());
	h.update(tx.invocation.contract.payload());
	// Contract calls from this wallet never carry native value.
	h.update(minimal_be_bytes(0));
	h.update(tx.invocation.payload_bytes());
	h.update(tx.fee.limit.to_le_bytes());
	h.update(minimal_be_bytes(tx.fee.price));
	h.update(TX_TYPE_CALL.to_le_bytes());
	h.finalize().into()
}

/// Transaction ids are the base58 form of the digest.
pub fn encode_tx_id(digest: &[u8; 32]) -> TxId {
	TxId(bs58::encode(digest).into_string())
}

// -- Keys --

/// Parse a 32-byte hex secret key, with or without a `0x` prefix.
pub fn parse_secret_key(hex_str: &str) -> Result<[u8; 32], WalletError> {
	let clean = hex_str.trim();
	let clean = clean.strip_prefix("0x").unwrap_or(clean);
	let raw = hex::decode(clean)
		.map_err(|e| WalletError::InvalidCredential(format!("cannot decode hex private key: {e}")))?;
	raw.try_into().map_err(|v: Vec<u8>| {
		WalletError::InvalidCredential(format!("private key must be 32 bytes, got {}", v.len()))
	})
}

// -- Utility --

fn minimal_be_bytes(n: u128) -> Vec<u8> {
	let bytes = n.to_be_bytes();
	let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
	bytes[first..].to_vec()
}
