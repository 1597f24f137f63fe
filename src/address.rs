use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WalletError;

/// Version byte prepended to every account and contract address.
pub const ADDRESS_VERSION: u8 = 0x42;

/// Length of the address payload: a compressed secp256k1 public key.
pub const ADDRESS_PAYLOAD_LEN: usize = 33;

/// An encoded account or contract address.
///
/// Addresses are base58check strings over `0x42 || compressed_pubkey`.
/// Two addresses are equal when their encoded strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(String);

impl Address {
	/// Encode a compressed public key as an address.
	pub fn from_public_key(public_key: &[u8; ADDRESS_PAYLOAD_LEN]) -> Self {
		Self(
			bs58::encode(public_key)
				.with_check_version(ADDRESS_VERSION)
				.into_string(),
		)
	}

	/// The encoded form.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The raw payload without the version byte.
	pub fn payload(&self) -> Vec<u8> {
		// Construction guarantees the string decodes.
		bs58::decode(&self.0)
			.with_check(Some(ADDRESS_VERSION))
			.into_vec()
			.map(|mut v| v.split_off(1))
			.unwrap_or_default()
	}
}

impl FromStr for Address {
	type Err = WalletError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let decoded = bs58::decode(s)
			.with_check(Some(ADDRESS_VERSION))
			.into_vec()
			.map_err(|e| WalletError::InvalidAddress(format!("{s}: {e}")))?;

		// Decoded bytes still carry the version prefix.
		if decoded.len() != ADDRESS_PAYLOAD_LEN + 1 {
			return Err(WalletError::InvalidAddress(format!(
				"{s}: expected {ADDRESS_PAYLOAD_LEN}-byte payload, got {}",
				decoded.len().saturating_sub(1)
			)));
		}

		Ok(Self(s.to_owned()))
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Serialize for Address {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_key() -> [u8; ADDRESS_PAYLOAD_LEN] {
		let mut key = [0x11u8; ADDRESS_PAYLOAD_LEN];
		key[0] = 0x02;
		key
	}

	#[test]
	fn encoded_address_parses_back() {
		let addr = Address::from_public_key(&sample_key());
		let parsed: Address = addr.as_str().parse().unwrap();
		assert_eq!(parsed, addr);
		assert_eq!(parsed.payload(), sample_key().to_vec());
	}

	#[test]
	fn known_account_address_is_accepted() {
		let addr: Address = "AmNQ6skDfZEF6F47eoMYdFPvupyZcGWag2D1jHxkW9iPdiaAv4LB"
			.parse()
			.unwrap();
		assert_eq!(addr.payload().len(), ADDRESS_PAYLOAD_LEN);
	}

	#[test]
	fn rejects_garbage() {
		assert!("".parse::<Address>().is_err());
		assert!("not-an-address".parse::<Address>().is_err());
		// Valid base58 but no checksum.
		assert!("AmNQ6skDfZEF6F47eoMYdFPvupyZcGWag2D1jHxkW9iPdiaAv4LC"
			.parse::<Address>()
			.is_err());
	}

	#[test]
	fn rejects_wrong_version_or_length() {
		let wrong_version = bs58::encode(sample_key()).with_check_version(0x43).into_string();
		assert!(wrong_version.parse::<Address>().is_err());

		let short = bs58::encode([0x02u8; 20])
			.with_check_version(ADDRESS_VERSION)
			.into_string();
		assert!(matches!(
			short.parse::<Address>(),
			Err(WalletError::InvalidAddress(_))
		));
	}

	#[test]
	fn serde_uses_the_encoded_string() {
		let addr = Address::from_public_key(&sample_key());
		let json = serde_json::to_value(&addr).unwrap();
		assert_eq!(json, serde_json::Value::String(addr.to_string()));
		let back: Address = serde_json::from_value(json).unwrap();
		assert_eq!(back, addr);
	}
}
