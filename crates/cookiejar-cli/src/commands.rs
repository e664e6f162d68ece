use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use cookiejar_handler::{CookieJarHandler, HandlerConfig};
use cookiejar_processor::TransactionProcessor;
use cookiejar_sdk::{CookieJarClient, JsonFileState, Operation, ProcessorConfig, StateMutation};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.state.as_deref())?;
    let format = &cli.format;
    match cli.command {
        Command::Bake(args) => {
            let operation = Operation::Bake { amount: args.amount };
            cmd_submit(&config, &args.key.key, operation, format)
        }
        Command::Eat(args) => {
            let operation = Operation::Eat { amount: args.amount };
            cmd_submit(&config, &args.key.key, operation, format)
        }
        Command::Clear(args) => cmd_submit(&config, &args.key, Operation::Clear, format),
        Command::Count(args) => cmd_count(&config, &args.key, format),
        Command::Address(args) => cmd_address(&args.public_key, format),
        Command::Info => cmd_info(config, format),
    }
}

/// Defaults, then the config file, then the environment, then `--state`.
fn load_config(file: Option<&Path>, state: Option<&Path>) -> anyhow::Result<ProcessorConfig> {
    let config = match file {
        Some(path) => ProcessorConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ProcessorConfig::default(),
    };
    let mut config = config.apply_env_overrides()?;
    if let Some(path) = state {
        config.state_path = path.to_path_buf();
    }
    Ok(config)
}

fn open_client(config: &ProcessorConfig, key: &str) -> anyhow::Result<CookieJarClient<JsonFileState>> {
    let store = JsonFileState::open(&config.state_path)
        .with_context(|| format!("opening state file {}", config.state_path.display()))?;
    Ok(CookieJarClient::with_config(key, store, config.clone())?)
}

fn cmd_submit(config: &ProcessorConfig, key: &str, operation: Operation, format: &OutputFormat) -> anyhow::Result<()> {
    let client = open_client(config, key)?;
    let mutation = client.submit(&operation)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&mutation)?),
        OutputFormat::Text => print_mutation(&mutation),
    }
    Ok(())
}

fn print_mutation(mutation: &StateMutation) {
    let verb = match mutation.operation {
        Operation::Bake { amount } => format!("Baked {amount} cookie(s)"),
        Operation::Eat { amount } => format!("Ate {amount} cookie(s)"),
        Operation::Clear => "Cleared the jar".to_string(),
    };
    println!("{} {}", "✓".green().bold(), verb);
    if mutation.created() {
        println!("  Jar: {} {}", mutation.address.short().cyan(), "(new)".dimmed());
    } else {
        println!("  Jar: {}", mutation.address.short().cyan());
    }
    println!("  Count: {}", mutation.balance.to_string().bold());
}

fn cmd_count(config: &ProcessorConfig, key: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let client = open_client(config, key)?;
    let count = client.count()?;
    let address = client.builder().address();
    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "address": address.to_string(), "count": count })
        ),
        OutputFormat::Text => match count {
            Some(n) => println!("{} cookie(s) in jar {}", n.to_string().bold(), address.short().cyan()),
            None => println!("No jar yet for {}. Bake some cookies first.", key.yellow()),
        },
    }
    Ok(())
}

fn cmd_address(public_key: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let address = HandlerConfig::cookiejar().deriver().derive_address(public_key);
    match format {
        OutputFormat::Json => println!("{}", json!({ "public_key": public_key, "address": address.to_string() })),
        OutputFormat::Text => println!("{address}"),
    }
    Ok(())
}

fn cmd_info(config: ProcessorConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let mut processor = TransactionProcessor::new(config);
    processor.add_handler(Box::new(CookieJarHandler::default()))?;
    let config = processor.config();
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "registrations": processor.registrations(),
                "config": config,
            }))?
        ),
        OutputFormat::Text => {
            for reg in processor.registrations() {
                let namespaces: Vec<&str> = reg.namespaces.iter().map(|n| n.as_str()).collect();
                println!("Family: {} {}", reg.family_name.bold(), reg.family_versions.join(", ").yellow());
                println!("  Namespaces: {}", namespaces.join(", ").cyan());
            }
            println!("Validator: {}", config.validator_url);
            println!("State file: {}", config.state_path.display());
            println!("Payload hash check: {}", on_off(config.verify_payload_hash));
            println!("Header address check: {}", on_off(config.enforce_header_addresses));
        }
    }
    Ok(())
}

fn on_off(flag: bool) -> colored::ColoredString {
    if flag { "on".green() } else { "off".red() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn state_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cookiejar.toml");
        std::fs::write(&file, "validator_url = \"tcp://localhost:4004\"\nstate_path = \"from-file.json\"\n").unwrap();

        let config = load_config(Some(file.as_path()), None).unwrap();
        assert_eq!(config.validator_url, "tcp://localhost:4004");

        let config = load_config(Some(file.as_path()), Some(Path::new("flag.json"))).unwrap();
        assert_eq!(config.state_path, PathBuf::from("flag.json"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("absent.toml").as_path()), None).is_err());
    }

    #[test]
    fn submit_persists_to_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("jar.json");
        let config = load_config(None, Some(state.as_path())).unwrap();

        cmd_submit(&config, "alice", Operation::Bake { amount: 4 }, &OutputFormat::Json).unwrap();
        assert!(cmd_submit(&config, "alice", Operation::Eat { amount: 5 }, &OutputFormat::Text).is_err());
        cmd_submit(&config, "alice", Operation::Eat { amount: 1 }, &OutputFormat::Text).unwrap();

        let client = open_client(&config, "alice").unwrap();
        assert_eq!(client.count().unwrap(), Some(3));
    }
}
