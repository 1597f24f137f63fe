//! End-to-end wallet scenarios against an in-memory chain.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use tokencli::invocation::{
	AbiFunction, ContractAbi, Invocation, SignedTransaction, TokenContract, TxId,
};
use tokencli::rpc::{AccountState, ChainClient};
use tokencli::signer::{LocalSigner, Signer};
use tokencli::{Address, RemoteError, TransactionWallet, WalletError};

const KEY: &str = "b71c71a67e1177ad4e901695e1b4b9ee17ae16c6668d313eac2f96dbcda3f291";

struct Chain {
	nonce: Mutex<u64>,
	fail_next: Mutex<Option<RemoteError>>,
	sent: Mutex<Vec<SignedTransaction>>,
	balance: Value,
	abi_functions: Vec<&'static str>,
}

impl Chain {
	fn new(nonce: u64) -> Arc<Self> {
		Arc::new(Self {
			nonce: Mutex::new(nonce),
			fail_next: Mutex::new(None),
			sent: Mutex::new(Vec::new()),
			balance: json!({"_bignum": "500000000000000000000"}),
			abi_functions: vec!["transfer", "balanceOf"],
		})
	}
}

#[async_trait::async_trait]
impl ChainClient for Chain {
	async fn account_state(&self, _address: &Address) -> Result<AccountState, RemoteError> {
		Ok(AccountState {
			nonce: *self.nonce.lock().unwrap(),
		})
	}

	async fn contract_abi(&self, contract: &Address) -> Result<ContractAbi, RemoteError> {
		Ok(ContractAbi {
			address: contract.clone(),
			functions: self
				.abi_functions
				.iter()
				.map(|name| AbiFunction {
					name: (*name).to_owned(),
					view: *name == "balanceOf",
				})
				.collect(),
		})
	}

	async fn send_transaction(&self, tx: &SignedTransaction) -> Result<TxId, RemoteError> {
		if let Some(err) = self.fail_next.lock().unwrap().take() {
			return Err(err);
		}
		self.sent.lock().unwrap().push(tx.clone());
		// Confirmed transactions advance the on-chain nonce.
		*self.nonce.lock().unwrap() = tx.nonce();
		Ok(tx.hash().clone())
	}

	async fn query(&self, _query: &Invocation) -> Result<Value, RemoteError> {
		Ok(self.balance.clone())
	}
}

fn token_address() -> Address {
	let mut key = [0x2au8; 33];
	key[0] = 0x02;
	Address::from_public_key(&key)
}

fn recipient() -> String {
	let mut key = [0x3bu8; 33];
	key[0] = 0x03;
	Address::from_public_key(&key).to_string()
}

async fn open(chain: &Arc<Chain>) -> TransactionWallet {
	let client: Arc<dyn ChainClient> = chain.clone();
	let abi = client.contract_abi(&token_address()).await.unwrap();
	let signer = Box::new(LocalSigner::from_hex(KEY).unwrap());
	TransactionWallet::connect(signer, client, Arc::new(TokenContract::new(abi)))
		.await
		.unwrap()
}

#[tokio::test]
async fn sequential_transfers_follow_chain_nonce() {
	let chain = Chain::new(5);
	let wallet = open(&chain).await;

	for amount in ["1", "2", "3"] {
		wallet.transfer(&recipient(), amount).await.unwrap();
	}

	let sent = chain.sent.lock().unwrap();
	let nonces: Vec<u64> = sent.iter().map(|t| t.nonce()).collect();
	assert_eq!(nonces, vec![6, 7, 8]);
	assert!(sent.iter().all(|t| t.transaction().invocation.contract == token_address()));
}

#[tokio::test]
async fn recovery_after_unavailable_node() {
	let chain = Chain::new(5);
	let wallet = open(&chain).await;

	*chain.fail_next.lock().unwrap() = Some(RemoteError::Unavailable("timed out".into()));
	let err = wallet.transfer(&recipient(), "10").await.unwrap_err();
	assert!(err.is_sequence_related());

	// The node reports the failed attempt as included.
	*chain.nonce.lock().unwrap() = 6;
	wallet.reset_sequence().await.unwrap();

	wallet.transfer(&recipient(), "10").await.unwrap();
	assert_eq!(chain.sent.lock().unwrap()[0].nonce(), 7);
}

#[tokio::test]
async fn signatures_verify_for_submitted_transactions() {
	let chain = Chain::new(0);
	let wallet = open(&chain).await;
	wallet.transfer(&recipient(), "42").await.unwrap();

	let signer = LocalSigner::from_hex(KEY).unwrap();
	let sent = chain.sent.lock().unwrap();
	let tx = &sent[0];
	let digest = tokencli::crypto::transaction_digest(tx.transaction());
	assert!(signer.verify(digest, tx.signature()));
	assert_eq!(signer.address(), wallet.signer_address());
}

#[tokio::test]
async fn balance_is_returned_unchanged() {
	let chain = Chain::new(0);
	let wallet = open(&chain).await;
	assert_eq!(
		wallet.get_balance().await.unwrap().to_string(),
		"500000000000000000000"
	);
}

#[tokio::test]
async fn contract_without_transfer_cannot_transfer() {
	let chain = Arc::new(Chain {
		nonce: Mutex::new(0),
		fail_next: Mutex::new(None),
		sent: Mutex::new(Vec::new()),
		balance: json!({"_bignum": "0"}),
		abi_functions: vec!["balanceOf"],
	});
	let wallet = open(&chain).await;

	let err = wallet.transfer(&recipient(), "1").await.unwrap_err();
	assert!(matches!(err, WalletError::UnknownFunction { .. }));
	assert!(chain.sent.lock().unwrap().is_empty());
}
