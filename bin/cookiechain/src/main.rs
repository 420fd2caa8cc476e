//! # Cookiechain
//!
//! `cookiechain` is a binary crate for a command line application that bootstraps a session with
//! the Cookiechain registry contract: connect, derive the account, load the contract and query
//! it.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod args;

mod run;
use run::Run;

mod account;
use account::Account;

mod functions;
use functions::Functions;

mod query;
use query::Query;

#[derive(Debug, Parser)]
#[clap(about, version)]
struct Cli {
    #[clap(subcommand)]
    command: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Connect to the node, load the account and the contract, then run the bootstrap query.
    Run(Run),
    /// Derive the account from the configured secret without touching the network.
    Account(Account),
    /// List the read-only functions declared by a contract ABI.
    Functions(Functions),
    /// Call any read-only function of the contract.
    Query(Query),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,cookiechain=debug,cookiechain_core=debug");
    }
    env_logger::init();

    match cli.command {
        Subcommands::Run(cmd) => cmd.run().await,
        Subcommands::Account(cmd) => cmd.run(),
        Subcommands::Functions(cmd) => cmd.run(),
        Subcommands::Query(cmd) => cmd.run().await,
    }
}
