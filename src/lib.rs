pub mod address;
pub mod bignum;
pub mod cli;
pub mod commands;
pub mod config;
pub mod crypto;
pub mod error;
pub mod invocation;
pub mod rpc;
pub mod scan;
pub mod sequence;
pub mod signer;
pub mod wallet;

pub use address::Address;
pub use bignum::BigNum;
pub use error::{DecodeError, RemoteError, WalletError};
pub use sequence::SequenceTracker;
pub use wallet::TransactionWallet;
