//! PQ Ledger CLI
//!
//! Command-line interface for decoding, validating and verifying hybrid
//! transactions.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pqledger_core::{
    decode_hybrid, LedgerConfig, LedgerError, LoggingConfig, PqValidator, Transaction,
};
use pqledger_crypto::{get_instance, registered_algorithms};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pqledger")]
#[command(version)]
#[command(about = "PQ Ledger - hybrid classical + post-quantum transaction tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PQLEDGER_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered post-quantum signature algorithms
    Algorithms,

    /// Decode a hybrid transaction
    Decode {
        /// Encoded transaction (hex, optional 0x prefix)
        encoded: String,

        /// Print the transaction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode and validate a hybrid transaction
    Validate {
        /// Encoded transaction (hex, optional 0x prefix)
        encoded: String,

        /// Signed message (hex); verifies the PQ signature when given
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Verify a detached post-quantum signature
    Verify {
        /// Algorithm id
        #[arg(short, long, default_value = "1")]
        algorithm: u8,

        /// Public key (hex)
        #[arg(long)]
        public_key: String,

        /// Signature (hex)
        #[arg(long)]
        signature: String,

        /// Signed message (hex)
        #[arg(long)]
        message: String,
    },
}

fn init_logging(config: &LoggingConfig, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn parse_hex(label: &str, input: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).with_context(|| format!("Invalid hex in {}", label))
}

fn ledger_error(err: impl Into<LedgerError>) -> anyhow::Error {
    let err = err.into();
    anyhow::anyhow!("[{}] {}", err.code(), err)
}

fn print_transaction(tx: &Transaction) {
    println!("Type: {:?}", tx.transaction_type());
    println!("Chain ID: {}", tx.chain_id());
    println!("Nonce: {}", tx.nonce());
    println!("Max priority fee per gas: {}", tx.max_priority_fee_per_gas());
    println!("Max fee per gas: {}", tx.max_fee_per_gas());
    println!("Gas limit: {}", tx.gas_limit());
    match tx.to() {
        Some(to) => println!("To: {:?}", to),
        None => println!("To: (contract creation)"),
    }
    println!("Value: {}", tx.value());
    println!("Payload: 0x{}", hex::encode(tx.payload()));
    println!("Access list entries: {}", tx.access_list().len());
    for entry in tx.access_list() {
        println!("  {:?} ({} storage keys)", entry.address, entry.storage_keys.len());
    }
    if let Some(id) = tx.pq_algorithm_id() {
        let name = get_instance(id).map(|alg| alg.name()).unwrap_or("unregistered");
        println!("PQ algorithm: 0x{:02x} ({})", id, name);
    }
    if let Some(key) = tx.pq_public_key() {
        println!("PQ public key: {} bytes", key.len());
    }
    println!("Signature: {:?}", tx.signature());
    if let Some(sig) = tx.pq_signature() {
        println!("PQ signature: {} bytes", sig.len());
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LedgerConfig::load(path).map_err(ledger_error)?,
        None => LedgerConfig::default(),
    };
    init_logging(&config.logging, cli.verbose);

    match cli.command {
        Commands::Algorithms => {
            println!(
                "{:<6} {:<12} {:>11} {:>10} {:>9}",
                "ID", "NAME", "PUBLIC KEY", "SIGNATURE", "ACCEPTED"
            );
            for alg in registered_algorithms() {
                let accepted = config.validation.accepts(alg.algorithm_id());
                println!(
                    "0x{:02x}   {:<12} {:>11} {:>10} {:>9}",
                    alg.algorithm_id(),
                    alg.name(),
                    alg.public_key_length(),
                    alg.signature_length(),
                    if accepted { "yes" } else { "no" }
                );
            }
        }

        Commands::Decode { encoded, json } => {
            let bytes = parse_hex("transaction", &encoded)?;
            let tx = decode_hybrid(&bytes).map_err(ledger_error)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&tx)?);
            } else {
                print_transaction(&tx);
            }
        }

        Commands::Validate { encoded, message } => {
            let bytes = parse_hex("transaction", &encoded)?;
            let tx = decode_hybrid(&bytes).map_err(ledger_error)?;

            let validator = PqValidator::new(config.validation);
            let validated = validator.validate(&tx).map_err(ledger_error)?;
            println!(
                "PQ material valid for {} ({} byte key, {} byte signature)",
                validated.algorithm.name(),
                validated.public_key.size(),
                validated.signature.size()
            );

            if let Some(message) = message {
                let message = parse_hex("message", &message)?;
                if !validated.verify(&message) {
                    bail!("PQ signature verification failed");
                }
                println!("PQ signature: valid");
            }
        }

        Commands::Verify {
            algorithm,
            public_key,
            signature,
            message,
        } => {
            let alg = get_instance(algorithm)?;
            let public_key = alg.create_public_key(&parse_hex("public key", &public_key)?)?;
            let signature = alg.create_signature(&parse_hex("signature", &signature)?)?;
            let message = parse_hex("message", &message)?;

            tracing::debug!(algorithm = alg.name(), message_len = message.len(), "verifying");
            if !alg.verify(&message, &signature, &public_key) {
                bail!("{} signature verification failed", alg.name());
            }
            println!("{} signature: valid", alg.name());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("x", "0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(parse_hex("x", "0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert!(parse_hex("x", "").unwrap().is_empty());
        assert!(parse_hex("x", "0xzz").is_err());
        assert!(parse_hex("x", "abc").is_err());
    }

    #[test]
    fn test_parse_verify_command() {
        let cli = Cli::try_parse_from([
            "pqledger",
            "verify",
            "--public-key",
            "00",
            "--signature",
            "01",
            "--message",
            "02",
        ])
        .unwrap();

        match cli.command {
            Commands::Verify { algorithm, .. } => assert_eq!(algorithm, 1),
            _ => panic!("expected verify command"),
        }
    }

    #[test]
    fn test_ledger_error_carries_code() {
        let err = ledger_error(pqledger_core::ValidationError::AlgorithmNotAccepted(1));
        assert!(err.to_string().starts_with("[3004]"));
    }
}
