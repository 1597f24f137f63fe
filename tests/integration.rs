//! Integration tests that hit the Aergo testnet node and explorer.
//!
//! These are marked `#[ignore]` by default because they require network
//! access. Run them explicitly with:
//!
//!   cargo test --test integration -- --ignored

use std::time::Duration;

use tokencli::config::Config;
use tokencli::rpc::{ChainClient, RpcClient};
use tokencli::scan::{self, ScanClient};
use tokencli::Address;

const WALLET: &str = "AmNQ6skDfZEF6F47eoMYdFPvupyZcGWag2D1jHxkW9iPdiaAv4LB";

fn testnet() -> Config {
	Config::default()
}

#[tokio::test]
#[ignore]
async fn account_state_is_readable() {
	let config = testnet();
	let network = config.network("test").unwrap();
	let rpc = RpcClient::new(&network.rpc_url, Duration::from_secs(10)).unwrap();

	let address: Address = WALLET.parse().unwrap();
	let state = rpc
		.account_state(&address)
		.await
		.expect("getState failed");
	println!("nonce of {WALLET} is {}", state.nonce);
}

#[tokio::test]
#[ignore]
async fn history_endpoint_answers() {
	let config = testnet();
	let network = config.network("test").unwrap();
	let client = ScanClient::new(&network.scan_url, Duration::from_secs(10)).unwrap();

	let body = client
		.token_transfers(WALLET)
		.await
		.expect("tokenTransfers failed");

	// The explorer answers with a `hits` array, even if empty.
	assert!(
		scan::parse_transfers(&body).is_some(),
		"unexpected history body: {body}"
	);
}
