use anyhow::Result;
use clap::Parser;
use cookiechain_core::{
    config::{BootstrapConfig, Secret, DEFAULT_QUERY_FUNCTION},
    network::StarknetConnector,
    sequencer::{BootstrapSequencer, Outcome},
};
use log::{info, warn};

use crate::args::{AccountOptions, ContractOptions, NetworkOptions, SecretOptions};

#[derive(Debug, Parser)]
pub struct Run {
    #[clap(flatten)]
    network: NetworkOptions,
    #[clap(flatten)]
    secret: SecretOptions,
    #[clap(flatten)]
    account: AccountOptions,
    #[clap(flatten)]
    contract: ContractOptions,
    /// Read-only function queried once the contract is loaded.
    #[clap(long, env = "COOKIECHAIN_QUERY")]
    #[clap(default_value = DEFAULT_QUERY_FUNCTION)]
    query: String,
}

impl Run {
    pub async fn run(self) -> Result<()> {
        let config = BootstrapConfig::try_from(self)?;
        let connector = StarknetConnector::new(config.endpoint.clone())?;

        let report = BootstrapSequencer::new(connector, config).run().await?;
        match report.outcome {
            Outcome::Succeeded(_) => info!("Bootstrap completed"),
            Outcome::SucceededWithWarning(_) => warn!("Bootstrap completed with a failed query"),
        }

        Ok(())
    }
}

impl TryFrom<Run> for BootstrapConfig {
    type Error = anyhow::Error;

    fn try_from(args: Run) -> Result<Self> {
        Ok(BootstrapConfig {
            endpoint: args.network.rpc_url,
            secret: Secret::try_from(args.secret)?,
            account: args.account.into(),
            abi_path: args.contract.abi,
            contract_address: args.contract.contract_address,
            query_function: args.query,
        })
    }
}
