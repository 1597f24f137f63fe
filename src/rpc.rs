use std::time::Duration;

use serde_json::{json as json_val, Value};

use crate::address::Address;
use crate::error::RemoteError;
use crate::invocation::{ContractAbi, Invocation, SignedTransaction, TxId};

/// Account state as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountState {
	/// Nonce of the account's last confirmed transaction.
	pub nonce: u64,
}

/// Operations the wallet needs from a chain node.
///
/// Implementations own their transport, including any timeouts; the wallet
/// passes calls through without retrying.
///
/// Signatures are made over [`transaction_digest`](crate::crypto::transaction_digest),
/// which omits the chain-id hash. A node that checks Aergo's native
/// transaction hash will reject them.
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
	async fn account_state(&self, address: &Address) -> Result<AccountState, RemoteError>;

	async fn contract_abi(&self, contract: &Address) -> Result<ContractAbi, RemoteError>;

	/// Submit a signed transaction and return its id.
	async fn send_transaction(&self, tx: &SignedTransaction) -> Result<TxId, RemoteError>;

	/// Run a read-only invocation and return the raw result payload.
	async fn query(&self, query: &Invocation) -> Result<Value, RemoteError>;
}

/// JSON-RPC 2.0 client for a node's HTTP endpoint.
///
/// Speaks a simplified JSON-RPC dialect (`getState`, `getABI`, `sendTX`,
/// `queryContract` with JSON params). This is not Aergo's gRPC or
/// JSON-RPC wire format; the request and response shapes are the ones
/// parsed below.
pub struct RpcClient {
	url: String,
	http: reqwest::Client,
}

impl RpcClient {
	pub fn new(url: &str, timeout: Duration) -> Result<Self, RemoteError> {
		let http = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| RemoteError::Unavailable(format!("cannot build HTTP client: {e}")))?;
		Ok(Self {
			url: url.to_owned(),
			http,
		})
	}

	/// Run a single JSON-RPC call and return its `result`.
	async fn call(&self, method: &str, params: Value) -> Result<Value, RemoteError> {
		let body = json_val!({
			"id": 1,
			"jsonrpc": "2.0",
			"method": method,
			"params": params,
		});

		let resp = self
			.http
			.post(&self.url)
			.json(&body)
			.send()
			.await
			.map_err(|e| RemoteError::Unavailable(format!("{method}: {e}")))?;

		let status = resp.status();
		if status.is_server_error() {
			return Err(RemoteError::Unavailable(format!("{method}: HTTP {status}")));
		}

		let resp: Value = resp
			.json()
			.await
			.map_err(|e| RemoteError::Unavailable(format!("{method}: unreadable response: {e}")))?;

		if let Some(err) = resp.get("error").filter(|e| !e.is_null()) {
			return Err(classify_node_error(err));
		}
		resp.get("result")
			.cloned()
			.ok_or_else(|| RemoteError::Rejected(format!("{method}: response has no result")))
	}
}

#[async_trait::async_trait]
impl ChainClient for RpcClient {
	async fn account_state(&self, address: &Address) -> Result<AccountState, RemoteError> {
		let result = self.call("getState", json_val!([address])).await?;
		parse_account_state(&result)
	}

	async fn contract_abi(&self, contract: &Address) -> Result<ContractAbi, RemoteError> {
		let mut result = self.call("getABI", json_val!([contract])).await?;
		// Nodes omit the address from the ABI body.
		if let Some(obj) = result.as_object_mut() {
			obj.insert("address".into(), Value::String(contract.to_string()));
		}
		serde_json::from_value(result)
			.map_err(|e| RemoteError::Rejected(format!("getABI: malformed ABI: {e}")))
	}

	async fn send_transaction(&self, tx: &SignedTransaction) -> Result<TxId, RemoteError> {
		let result = self.call("sendTX", json_val!([tx.to_json()])).await?;
		let hash = result
			.get("hash")
			.and_then(Value::as_str)
			.or_else(|| result.as_str())
			.ok_or_else(|| RemoteError::Rejected("sendTX: response has no hash".into()))?;
		Ok(TxId(hash.to_owned()))
	}

	async fn query(&self, query: &Invocation) -> Result<Value, RemoteError> {
		let params = json_val!([{
			"address": query.contract,
			"name": query.function,
			"args": query.args,
		}]);
		let result = self.call("queryContract", params).await?;
		Ok(unwrap_encoded_result(result))
	}
}

// -- Private helpers --

/// Map a JSON-RPC error object onto a [`RemoteError`].
fn classify_node_error(err: &Value) -> RemoteError {
	let message = err
		.get("message")
		.and_then(Value::as_str)
		.map(str::to_owned)
		.unwrap_or_else(|| err.to_string());

	if message.to_ascii_lowercase().contains("nonce") {
		RemoteError::InvalidSequence(message)
	} else {
		RemoteError::Rejected(message)
	}
}

fn parse_account_state(result: &Value) -> Result<AccountState, RemoteError> {
	// Fresh accounts come back without a nonce.
	let nonce = match result.get("nonce") {
		None | Some(Value::Null) => Some(0),
		Some(Value::Number(n)) => n.as_u64(),
		Some(Value::String(s)) => s.parse().ok(),
		Some(_) => None,
	}
	.ok_or_else(|| RemoteError::Rejected(format!("getState: malformed nonce in {result}")))?;
	Ok(AccountState { nonce })
}

/// Contract results may arrive as a JSON document encoded in a string.
fn unwrap_encoded_result(result: Value) -> Value {
	if let Value::String(s) = &result {
		if let Ok(decoded) = serde_json::from_str(s) {
			return decoded;
		}
	}
	result
}
