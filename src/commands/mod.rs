pub mod balance;
pub mod history;
pub mod transfer;

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::address::Address;
use crate::cli::{Cli, CommandKind};
use crate::config::{Config, NetworkConfig};
use crate::error::WalletError;
use crate::invocation::TokenContract;
use crate::rpc::{ChainClient, RpcClient};

/// Resolve config, check the argument count and run the selected command.
pub async fn run(cli: &Cli) -> Result<()> {
	let config = Config::load(cli.config.as_deref())?;
	let network = config.network(&cli.network)?;
	let args = command_args(cli.command, &cli.args)?;

	match cli.command {
		CommandKind::History => history::run(&config, network, &args[0]).await,
		CommandKind::Balance => balance::run(cli, &config, network, &args[0]).await,
		CommandKind::Transfer => transfer::run(cli, &config, network, &args[0], &args[1]).await,
	}
}

/// Return the command's arguments, failing with its usage line when too few
/// were given.
pub fn command_args(kind: CommandKind, args: &[String]) -> Result<&[String]> {
	let spec = kind.spec();
	if args.len() < spec.arg_count {
		bail!("{}", kind.usage());
	}
	Ok(args)
}

/// Resolve the RPC URL from CLI flag or network config.
pub fn resolve_rpc(cli: &Cli, network: &NetworkConfig) -> String {
	cli.rpc_url
		.clone()
		.unwrap_or_else(|| network.rpc_url.clone())
}

/// Connect to the node for the selected network.
pub fn connect(cli: &Cli, config: &Config, network: &NetworkConfig) -> Result<Arc<dyn ChainClient>> {
	let url = resolve_rpc(cli, network);
	let client = RpcClient::new(&url, config.rpc_timeout())
		.with_context(|| format!("connecting to {url}"))?;
	Ok(Arc::new(client))
}

/// Fetch the token contract's ABI.
pub async fn resolve_contract(client: &dyn ChainClient, token_address: &str) -> Result<TokenContract> {
	let address: Address = token_address.parse()?;
	let abi = client
		.contract_abi(&address)
		.await
		.map_err(|e| WalletError::remote("getABI", None, e))?;
	Ok(TokenContract::new(abi))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn too_few_args_yield_usage() {
		let err = command_args(CommandKind::Transfer, &["AmTo".to_owned()]).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Usage: tokencli <network> <tokenAddress> transfer <toAddress> <amount>"
		);
		assert!(command_args(CommandKind::Balance, &[]).is_err());
	}

	#[test]
	fn extra_args_are_tolerated() {
		let args = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
		assert_eq!(command_args(CommandKind::Transfer, &args).unwrap().len(), 3);
	}

	#[test]
	fn rpc_flag_overrides_network() {
		let cli = <Cli as clap::Parser>::try_parse_from([
			"tokencli", "--rpc-url", "http://localhost:7845", "test", "AmToken", "balance", "AmW",
		])
		.unwrap();
		let config = Config::default();
		let network = config.network("test").unwrap();
		assert_eq!(resolve_rpc(&cli, network), "http://localhost:7845");
	}
}
