use anyhow::Result;
use clap::{Parser, Subcommand};
use ledger_core::{constants::GENESIS_PREVIOUS_HASH, hash_block, Chain};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Build, tamper with and verify a small hash-linked ledger")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append three blocks, tamper with the second one and verify
    Demo {
        /// Dump the chain as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the content hash of a single block
    Hash {
        /// Transaction payload
        #[arg(long)]
        transaction: String,
        /// Caller-supplied nonce
        #[arg(long, allow_negative_numbers = true)]
        nonce: i64,
        /// Hash of the preceding block (empty for the first block)
        #[arg(long)]
        previous_hash: Option<String>,
    },
}

fn run_demo(json: bool) -> Result<()> {
    let mut chain = Chain::new();
    chain.append("Alice to Bob", 123);
    chain.append("Bob to Carol", 456);
    chain.append("Carol to Dave", 789);

    if json {
        println!("{}", serde_json::to_string_pretty(&chain)?);
    } else {
        print!("{chain}");
    }

    info!("changing transaction of block 1");
    chain.mutate(1, "New transaction");

    if chain.verify() {
        println!("Blockchain is valid.");
    } else {
        println!("Blockchain is not valid.");
    }
    Ok(())
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .pretty()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo { json } => run_demo(json)?,
        Command::Hash {
            transaction,
            nonce,
            previous_hash,
        } => {
            let previous_hash = previous_hash.as_deref().unwrap_or(GENESIS_PREVIOUS_HASH);
            println!("{}", hash_block(&transaction, nonce, previous_hash));
        }
    }
    Ok(())
}
