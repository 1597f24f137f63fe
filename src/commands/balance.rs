use anyhow::Result;

use crate::address::Address;
use crate::cli::Cli;
use crate::commands::{connect, resolve_contract};
use crate::config::{Config, NetworkConfig};
use crate::wallet::query_balance;

/// Print the token balance of `wallet_address`. Read-only; no key needed.
pub async fn run(cli: &Cli, config: &Config, network: &NetworkConfig, wallet_address: &str) -> Result<()> {
	let owner: Address = wallet_address.parse()?;
	let client = connect(cli, config, network)?;
	let contract = resolve_contract(client.as_ref(), &cli.token_address).await?;

	let balance = query_balance(client.as_ref(), &contract, &owner).await?;
	println!("balance of wallet {owner} is {balance}");
	Ok(())
}
