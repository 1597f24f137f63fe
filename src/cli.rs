use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
	name = "tokencli",
	about = "Check balances, transfer tokens and list transfer history for a token contract.",
	version
)]
pub struct Cli {
	/// Path to the config file (default: ~/.tokencli/config.toml).
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Override RPC endpoint URL.
	#[arg(long)]
	pub rpc_url: Option<String>,

	/// Log debug output to stderr.
	#[arg(short, long)]
	pub verbose: bool,

	/// Network name as configured (e.g. main, test).
	pub network: String,

	/// Address of the token contract.
	pub token_address: String,

	/// Command to run.
	pub command: CommandKind,

	/// Command arguments.
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	pub args: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CommandKind {
	History,
	Balance,
	Transfer,
}

/// Static facts about a command.
#[derive(Debug)]
pub struct CommandSpec {
	pub kind: CommandKind,
	pub name: &'static str,
	pub arg_count: usize,
	pub usage: &'static str,
}

/// Indexed by `CommandKind` discriminant.
pub static COMMANDS: [CommandSpec; 3] = [
	CommandSpec {
		kind: CommandKind::History,
		name: "history",
		arg_count: 1,
		usage: "<walletAddress>",
	},
	CommandSpec {
		kind: CommandKind::Balance,
		name: "balance",
		arg_count: 1,
		usage: "<walletAddress>",
	},
	CommandSpec {
		kind: CommandKind::Transfer,
		name: "transfer",
		arg_count: 2,
		usage: "<toAddress> <amount>",
	},
];

impl CommandKind {
	pub fn spec(self) -> &'static CommandSpec {
		&COMMANDS[self as usize]
	}

	/// Usage line for this command.
	pub fn usage(self) -> String {
		let spec = self.spec();
		format!("Usage: tokencli <network> <tokenAddress> {} {}", spec.name, spec.usage)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn table_is_indexed_by_kind() {
		for kind in CommandKind::value_variants() {
			assert_eq!(kind.spec().kind, *kind);
		}
	}

	#[test]
	fn arg_counts() {
		assert_eq!(CommandKind::History.spec().arg_count, 1);
		assert_eq!(CommandKind::Balance.spec().arg_count, 1);
		assert_eq!(CommandKind::Transfer.spec().arg_count, 2);
	}

	#[test]
	fn usage_names_command_and_args() {
		assert_eq!(
			CommandKind::Transfer.usage(),
			"Usage: tokencli <network> <tokenAddress> transfer <toAddress> <amount>"
		);
	}

	#[test]
	fn parses_positional_layout() {
		let cli = Cli::try_parse_from(["tokencli", "test", "AmToken", "transfer", "AmTo", "100"]).unwrap();
		assert_eq!(cli.network, "test");
		assert_eq!(cli.token_address, "AmToken");
		assert_eq!(cli.command, CommandKind::Transfer);
		assert_eq!(cli.args, vec!["AmTo", "100"]);
	}

	#[test]
	fn parses_balance_command() {
		let cli = Cli::try_parse_from(["tokencli", "main", "AmToken", "balance", "AmW"]).unwrap();
		assert_eq!(cli.command, CommandKind::Balance);
	}

	#[test]
	fn unknown_command_is_rejected() {
		assert!(Cli::try_parse_from(["tokencli", "main", "AmToken", "mint", "x"]).is_err());
	}

	#[test]
	fn negative_amounts_reach_the_command() {
		let cli = Cli::try_parse_from(["tokencli", "test", "AmToken", "transfer", "AmTo", "-5"]).unwrap();
		assert_eq!(cli.args, vec!["AmTo", "-5"]);
	}

	#[test]
	fn flags_precede_positionals() {
		let cli = Cli::try_parse_from([
			"tokencli", "--rpc-url", "http://localhost:7845", "-v", "test", "AmToken", "history", "AmW",
		])
		.unwrap();
		assert_eq!(cli.rpc_url.as_deref(), Some("http://localhost:7845"));
		assert!(cli.verbose);
	}
}
