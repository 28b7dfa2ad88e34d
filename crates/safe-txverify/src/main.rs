//! safe-txverify: verify a Safe transaction record offline
//!
//! Reads one JSON transaction record from the file given as the only
//! argument, or from stdin, and prints the verification result as JSON.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use eyre::WrapErr;
use safe_txverify_core::Verifier;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("BUILD_TIME"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "safe-txverify", version = VERSION, about)]
struct Cli {
    /// Transaction record to verify; reads stdin when omitted or `-`
    record: Option<PathBuf>,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let record = match cli.record.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .wrap_err("failed to read transaction record from stdin")?;
            buf
        }
    };

    let verifier = Verifier::builtin().wrap_err("failed to build registries")?;
    let result = verifier
        .verify_json(&record)
        .wrap_err("transaction verification failed")?;

    tracing::info!(
        approval_hash = %result.approval_hash,
        nested = result.nested_result.is_some(),
        "verified transaction"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
