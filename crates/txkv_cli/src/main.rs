//! txkv CLI
//!
//! Command-line front end for the txkv store.
//!
//! # Commands
//!
//! - `demo` - Walk the transaction lifecycle and print each outcome
//! - `version` - Show version information

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use txkv_core::{Store, StoreResult};

/// txkv command-line tools.
#[derive(Parser)]
#[command(name = "txkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the transaction lifecycle and print each outcome
    Demo,

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Version => {
            println!("txkv CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("txkv Core v{}", txkv_core::VERSION);
        }
    }
}

/// Runs the scripted walkthrough of the store's transaction lifecycle.
fn run_demo() {
    let store = Store::new();

    println!("-- reads and writes outside a transaction --");
    println!("get(\"A\")            -> {}", outcome(store.get("A")));
    println!("put(\"A\", 5)         -> {}", status(store.put("A", 5)));

    println!();
    println!("-- stage, overwrite, commit --");
    println!("begin_transaction() -> {}", status(store.begin_transaction()));
    println!("put(\"A\", 5)         -> {}", status(store.put("A", 5)));
    println!("get(\"A\")            -> {} (staged, visible to this transaction)", outcome(store.get("A")));
    println!("committed entries   -> {} (nothing committed yet)", store.len());
    println!("put(\"A\", 6)         -> {}", status(store.put("A", 6)));
    println!("commit_transaction()-> {}", status(store.commit_transaction()));
    println!("get(\"A\")            -> {}", outcome(store.get("A")));

    println!();
    println!("-- lifecycle calls with no open transaction --");
    println!("commit_transaction()-> {}", status(store.commit_transaction()));
    println!("rollback_transaction() -> {}", status(store.rollback_transaction()));

    println!();
    println!("-- rollback discards staged writes --");
    println!("get(\"B\")            -> {}", outcome(store.get("B")));
    println!("begin_transaction() -> {}", status(store.begin_transaction()));
    println!("put(\"B\", 10)        -> {}", status(store.put("B", 10)));
    println!("rollback_transaction() -> {}", status(store.rollback_transaction()));
    println!("get(\"B\")            -> {}", outcome(store.get("B")));

    println!();
    println!("-- multi-key commit, then a rolled-back update --");
    println!("begin_transaction() -> {}", status(store.begin_transaction()));
    println!("put(\"balance\", 100) -> {}", status(store.put("balance", 100)));
    println!("put(\"savings\", 500) -> {}", status(store.put("savings", 500)));
    println!("commit_transaction()-> {}", status(store.commit_transaction()));
    println!("get(\"balance\")      -> {}", outcome(store.get("balance")));
    println!("get(\"savings\")      -> {}", outcome(store.get("savings")));
    println!("begin_transaction() -> {}", status(store.begin_transaction()));
    println!("put(\"balance\", 200) -> {}", status(store.put("balance", 200)));
    println!("rollback_transaction() -> {}", status(store.rollback_transaction()));
    println!("get(\"balance\")      -> {} (pre-transaction value preserved)", outcome(store.get("balance")));

    println!();
    let stats = store.stats();
    println!(
        "stats: {} reads, {} writes, {} transactions begun, {} committed, {} rolled back",
        stats.reads,
        stats.writes,
        stats.transactions_begun,
        stats.transactions_committed,
        stats.transactions_rolled_back
    );
}

/// Formats a value-bearing result for display.
fn outcome(result: StoreResult<i64>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(e) => format!("error: {e}"),
    }
}

/// Formats a unit result for display.
fn status(result: StoreResult<()>) -> String {
    match result {
        Ok(()) => "ok".to_owned(),
        Err(e) => format!("error: {e}"),
    }
}
