use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use crate::commands::{connect, resolve_contract};
use crate::config::{Config, NetworkConfig};
use crate::signer;
use crate::wallet::TransactionWallet;

pub async fn run(
	cli: &Cli,
	config: &Config,
	network: &NetworkConfig,
	to: &str,
	amount: &str,
) -> Result<()> {
	let client = connect(cli, config, network)?;
	let contract = resolve_contract(client.as_ref(), &cli.token_address).await?;
	let signer = signer::from_env(&config.signer.key_env)?;

	let wallet = TransactionWallet::connect(signer, client, Arc::new(contract)).await?;
	let tx = wallet.transfer(to, amount).await?;

	println!(
		"transfer from {} to {to} was committed : hash {tx}",
		wallet.signer_address()
	);
	Ok(())
}
