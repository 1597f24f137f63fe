//! Arbitrary-precision integers as exchanged with token contracts.
//!
//! Contracts return large numbers wrapped in a single-field object,
//! `{"_bignum": "<decimal>"}`. Values are kept in canonical decimal form:
//! a leading `+` is dropped, leading zeros are stripped and `-0` is `0`.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Name of the field carrying the decimal string.
pub const BIGNUM_FIELD: &str = "_bignum";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigNum(BigInt);

impl BigNum {
	/// Decode the wire object.
	pub fn decode(value: &Value) -> Result<Self, DecodeError> {
		let obj = value.as_object().ok_or(DecodeError::NotAnObject)?;
		match obj.get(BIGNUM_FIELD) {
			None | Some(Value::Null) => Err(DecodeError::MissingField),
			Some(Value::String(s)) => s.parse(),
			Some(other) => Err(DecodeError::MalformedNumber(other.to_string())),
		}
	}

	/// Encode as the wire object.
	pub fn encode(&self) -> Value {
		let mut obj = Map::with_capacity(1);
		obj.insert(BIGNUM_FIELD.to_owned(), Value::String(self.to_string()));
		Value::Object(obj)
	}
}

impl FromStr for BigNum {
	type Err = DecodeError;

	/// Accepts `[+-]?[0-9]+` and nothing else.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
		if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
			return Err(DecodeError::MalformedNumber(s.to_owned()));
		}
		BigInt::from_str(s)
			.map(Self)
			.map_err(|_| DecodeError::MalformedNumber(s.to_owned()))
	}
}

impl fmt::Display for BigNum {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for BigNum {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.encode().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for BigNum {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = Value::deserialize(deserializer)?;
		Self::decode(&value).map_err(serde::de::Error::custom)
	}
}
