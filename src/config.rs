use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	pub networks: BTreeMap<String, NetworkConfig>,
	pub rpc: RpcConfig,
	pub signer: SignerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
	/// Node JSON-RPC endpoint.
	pub rpc_url: String,
	/// Block explorer API used for transfer history.
	pub scan_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
	pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfig {
	/// Environment variable holding the hex-encoded private key.
	pub key_env: String,
}

impl Default for Config {
	fn default() -> Self {
		let mut networks = BTreeMap::new();
		networks.insert(
			"main".into(),
			NetworkConfig {
				rpc_url: "https://mainnet-api.aergo.io:7845".into(),
				scan_url: "https://api.aergoscan.io/mainnet/v2".into(),
			},
		);
		networks.insert(
			"test".into(),
			NetworkConfig {
				rpc_url: "https://testnet-api.aergo.io:7845".into(),
				scan_url: "https://api.aergoscan.io/testnet/v2".into(),
			},
		);
		Self {
			networks,
			rpc: RpcConfig { timeout_secs: 10 },
			signer: SignerConfig {
				key_env: "TOKENCLI_PRIVATE_KEY".into(),
			},
		}
	}
}

impl Config {
	/// Directory where CLI state is stored (~/.tokencli/).
	pub fn dir() -> anyhow::Result<PathBuf> {
		dirs::home_dir()
			.map(|home| home.join(".tokencli"))
			.ok_or_else(|| anyhow!("could not determine home directory"))
	}

	/// Path to the default config file.
	pub fn path() -> anyhow::Result<PathBuf> {
		Ok(Self::dir()?.join("config.toml"))
	}

	/// Load config from `path` (or the default location), falling back to
	/// defaults if no file exists.
	pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
		let path = match path {
			Some(p) => p.to_path_buf(),
			None => Self::path()?,
		};
		if path.exists() {
			let content = std::fs::read_to_string(&path)
				.with_context(|| format!("reading {}", path.display()))?;
			toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
		} else {
			Ok(Self::default())
		}
	}

	/// Look up a network by name.
	pub fn network(&self, name: &str) -> anyhow::Result<&NetworkConfig> {
		self.networks.get(name).ok_or_else(|| {
			let known: Vec<&str> = self.networks.keys().map(String::as_str).collect();
			anyhow!("invalid network {name:?} (known: {})", known.join(", "))
		})
	}

	pub fn rpc_timeout(&self) -> Duration {
		Duration::from_secs(self.rpc.timeout_secs)
	}
}
