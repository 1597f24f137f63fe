use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

/// Client for the block explorer's token-transfer index.
pub struct ScanClient {
	base_url: String,
	http: reqwest::Client,
}

impl ScanClient {
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
		let http = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self {
			base_url: base_url.trim_end_matches('/').to_owned(),
			http,
		})
	}

	/// Fetch token transfers sent or received by `wallet`, excluding those
	/// where the wallet is itself the token contract.
	pub async fn token_transfers(&self, wallet: &str) -> Result<String> {
		let url = format!("{}/tokenTransfers", self.base_url);
		let q = transfer_query(wallet);
		tracing::debug!(%url, %q, "requesting transfer history");

		let resp = self
			.http
			.get(&url)
			.query(&[("q", q.as_str())])
			.send()
			.await
			.context("failed to get history")?
			.error_for_status()
			.context("failed to get history")?;
		Ok(resp.text().await?)
	}
}

/// Explorer search expression for transfers touching `wallet`.
pub fn transfer_query(wallet: &str) -> String {
	format!("(to:{wallet} OR from:{wallet}) AND NOT (address:{wallet})")
}

/// A single transfer pulled out of an explorer response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferEntry {
	pub ts: String,
	pub from: String,
	pub to: String,
	pub amount: String,
	pub tx: String,
}

/// Extract transfers from a response body. Returns `None` when the body has
/// no `hits` array.
pub fn parse_transfers(body: &str) -> Option<Vec<TransferEntry>> {
	let json: Value = serde_json::from_str(body).ok()?;
	let hits = json.get("hits")?.as_array()?;

	let field = |hit: &Value, name: &str| -> String {
		let v = hit
			.pointer(&format!("/meta/{name}"))
			.or_else(|| hit.get(name));
		match v {
			Some(Value::String(s)) => s.clone(),
			Some(Value::Null) | None => "unknown".into(),
			Some(other) => other.to_string(),
		}
	};

	Some(
		hits.iter()
			.map(|hit| TransferEntry {
				ts: format_ts(&field(hit, "ts")),
				from: field(hit, "from"),
				to: field(hit, "to"),
				amount: field(hit, "amount"),
				tx: hit
					.get("hash")
					.and_then(Value::as_str)
					.map(str::to_owned)
					.unwrap_or_else(|| field(hit, "tx_id")),
			})
			.collect(),
	)
}

/// Render millisecond epoch timestamps as RFC 3339; anything else verbatim.
fn format_ts(raw: &str) -> String {
	raw.parse::<i64>()
		.ok()
		.and_then(chrono::DateTime::from_timestamp_millis)
		.map(|dt| dt.to_rfc3339())
		.unwrap_or_else(|| raw.to_owned())
}
