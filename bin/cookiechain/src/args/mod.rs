//! Cookiechain binary options.
use std::path::PathBuf;

use clap::Args;
use starknet::core::types::Felt;
use url::Url;

mod account;
mod secret;

pub use account::AccountOptions;
pub use secret::SecretOptions;

#[derive(Debug, Args, Clone)]
pub struct NetworkOptions {
    #[arg(long, env = "COOKIECHAIN_RPC_URL")]
    #[arg(value_name = "URL")]
    #[arg(help = "Node endpoint. ws:// and wss:// URLs are served over HTTP JSON-RPC.")]
    #[arg(default_value = "http://localhost:5050")]
    pub rpc_url: Url,
}

#[derive(Debug, Args, Clone)]
pub struct ContractOptions {
    #[arg(long, env = "COOKIECHAIN_ABI")]
    #[arg(value_name = "PATH")]
    #[arg(help = "Path to the contract ABI or artifact JSON file.")]
    #[arg(default_value = "./build/cookie_chain.json")]
    pub abi: PathBuf,

    #[arg(long, env = "COOKIECHAIN_CONTRACT_ADDRESS")]
    #[arg(help = "Address of the deployed contract. Defaults to the artifact's `networks` entry \
                  for the connected chain.")]
    pub contract_address: Option<Felt>,
}
