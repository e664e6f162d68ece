use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cookiejar",
    about = "Bake, eat and count cookies in a CookieJar ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Processor configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// State file, overriding the configured `state_path`
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Bake cookies into your jar
    Bake(AmountArgs),
    /// Eat cookies from your jar
    Eat(AmountArgs),
    /// Empty your jar
    Clear(KeyArgs),
    /// Show how many cookies are in your jar
    Count(KeyArgs),
    /// Print the state address of a public key
    Address(AddressArgs),
    /// Show family registration and configuration
    Info,
}

#[derive(Args)]
pub struct AmountArgs {
    pub amount: u64,
    #[command(flatten)]
    pub key: KeyArgs,
}

#[derive(Args)]
pub struct KeyArgs {
    /// Signer public key (hex)
    #[arg(short, long)]
    pub key: String,
}

#[derive(Args)]
pub struct AddressArgs {
    pub public_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bake() {
        let cli = Cli::try_parse_from(["cookiejar", "bake", "5", "--key", "02ab"]).unwrap();
        if let Command::Bake(args) = cli.command {
            assert_eq!(args.amount, 5);
            assert_eq!(args.key.key, "02ab");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_eat_short_key() {
        let cli = Cli::try_parse_from(["cookiejar", "eat", "2", "-k", "02ab"]).unwrap();
        assert!(matches!(cli.command, Command::Eat(ref a) if a.amount == 2));
    }

    #[test]
    fn negative_amount_rejected() {
        assert!(Cli::try_parse_from(["cookiejar", "eat", "-1", "--key", "02ab"]).is_err());
        assert!(Cli::try_parse_from(["cookiejar", "bake", "x", "--key", "02ab"]).is_err());
    }

    #[test]
    fn key_is_required() {
        assert!(Cli::try_parse_from(["cookiejar", "clear"]).is_err());
        assert!(Cli::try_parse_from(["cookiejar", "count"]).is_err());
    }

    #[test]
    fn parse_address() {
        let cli = Cli::try_parse_from(["cookiejar", "address", "alice"]).unwrap();
        if let Command::Address(args) = cli.command {
            assert_eq!(args.public_key, "alice");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from([
            "cookiejar", "info", "--verbose", "--state", "jar.json", "--config", "cj.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.state, Some(PathBuf::from("jar.json")));
        assert_eq!(cli.config, Some(PathBuf::from("cj.toml")));
        assert!(matches!(cli.command, Command::Info));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["cookiejar", "--format", "json", "count", "-k", "02ab"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
