use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::address::Address;
use crate::error::WalletError;

/// Contract function that moves tokens.
pub const FN_TRANSFER: &str = "transfer";
/// Read-only contract function that returns a holder's balance.
pub const FN_BALANCE_OF: &str = "balanceOf";

/// Transaction type for contract calls.
pub const TX_TYPE_CALL: u32 = 5;

// -- ABI --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiFunction {
	pub name: String,
	#[serde(default)]
	pub view: bool,
}

/// The interface a deployed contract publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAbi {
	pub address: Address,
	#[serde(default)]
	pub functions: Vec<AbiFunction>,
}

/// A token contract resolved from its ABI.
///
/// Invocations can only be built for functions the ABI declares.
#[derive(Debug, Clone)]
pub struct TokenContract {
	abi: ContractAbi,
}

impl TokenContract {
	pub fn new(abi: ContractAbi) -> Self {
		Self { abi }
	}

	pub fn address(&self) -> &Address {
		&self.abi.address
	}

	pub fn has_function(&self, name: &str) -> bool {
		self.abi.functions.iter().any(|f| f.name == name)
	}

	/// Build a call to `function` with the given ordered arguments.
	pub fn invocation(&self, function: &str, args: Vec<Value>) -> Result<Invocation, WalletError> {
		if !self.has_function(function) {
			return Err(WalletError::UnknownFunction {
				contract: self.abi.address.clone(),
				function: function.to_owned(),
			});
		}
		Ok(Invocation {
			contract: self.abi.address.clone(),
			function: function.to_owned(),
			args,
		})
	}

	/// Read-only `balanceOf(owner)` query.
	pub fn balance_of(&self, owner: &Address) -> Result<Invocation, WalletError> {
		self.invocation(FN_BALANCE_OF, vec![Value::String(owner.to_string())])
	}
}

// -- Invocation --

/// A named contract call with its ordered arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
	pub contract: Address,
	pub function: String,
	pub args: Vec<Value>,
}

impl Invocation {
	/// The call payload as carried in a transaction or query:
	/// `{"Name": function, "Args": [...]}`.
	pub fn payload(&self) -> Value {
		json!({
			"Name": self.function,
			"Args": self.args,
		})
	}

	pub fn payload_bytes(&self) -> Vec<u8> {
		self.payload().to_string().into_bytes()
	}
}

// -- Transactions --

/// Fee attached to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fee {
	pub limit: u64,
	pub price: u128,
}

impl Fee {
	pub const ZERO: Fee = Fee { limit: 0, price: 0 };
}

/// An unsigned contract call bound to a sender and nonce.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
	pub nonce: u64,
	pub from: Address,
	pub invocation: Invocation,
	pub fee: Fee,
}

/// Transaction hash, base58-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxId(pub String);

impl fmt::Display for TxId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A transaction with its hash and the sender's signature. Built once by a
/// [`Signer`](crate::signer::Signer) and submitted once.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
	tx: Transaction,
	hash: TxId,
	signature: Vec<u8>,
}

impl SignedTransaction {
	pub(crate) fn new(tx: Transaction, hash: TxId, signature: Vec<u8>) -> Self {
		Self { tx, hash, signature }
	}

	pub fn transaction(&self) -> &Transaction {
		&self.tx
	}

	pub fn nonce(&self) -> u64 {
		self.tx.nonce
	}

	pub fn hash(&self) -> &TxId {
		&self.hash
	}

	pub fn signature(&self) -> &[u8] {
		&self.signature
	}

	/// Wire form for `sendTX`.
	pub fn to_json(&self) -> Value {
		json!({
			"hash": self.hash.0,
			"body": {
				"nonce": self.tx.nonce,
				"account": self.tx.from,
				"recipient": self.tx.invocation.contract,
				"amount": "0",
				"payload": hex::encode(self.tx.invocation.payload_bytes()),
				"gasLimit": self.tx.fee.limit,
				"gasPrice": self.tx.fee.price.to_string(),
				"type": TX_TYPE_CALL,
				"sign": hex::encode(&self.signature),
			}
		})
	}
}
