use anyhow::Result;

use crate::config::{Config, NetworkConfig};
use crate::scan::{self, ScanClient};

pub async fn run(config: &Config, network: &NetworkConfig, wallet_address: &str) -> Result<()> {
	let client = ScanClient::new(&network.scan_url, config.rpc_timeout())?;
	let body = client.token_transfers(wallet_address).await?;

	println!("history result");
	match scan::parse_transfers(&body) {
		Some(entries) if !entries.is_empty() => {
			for (i, e) in entries.iter().enumerate() {
				println!(
					"#{}  {}  {} -> {}  amount={}  tx={}",
					i + 1,
					e.ts,
					e.from,
					e.to,
					e.amount,
					e.tx
				);
			}
			println!("\n{} transfer(s).", entries.len());
		}
		Some(_) => println!("No transfers found for {wallet_address}."),
		None => println!("{body}"),
	}
	Ok(())
}
