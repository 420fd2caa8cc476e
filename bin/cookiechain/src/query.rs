use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cookiechain_core::{
    contract::ContractHandle,
    format_chain_id,
    network::{Connection, NetworkConnector, StarknetConnector},
};
use log::info;
use starknet::core::types::Felt;

use crate::args::{ContractOptions, NetworkOptions};

#[derive(Debug, Parser)]
pub struct Query {
    #[clap(flatten)]
    network: NetworkOptions,
    #[clap(flatten)]
    contract: ContractOptions,
    /// Name of the read-only function to call.
    function: String,
    /// Calldata felts, hex or decimal.
    #[clap(long = "calldata", value_delimiter = ',')]
    calldata: Vec<Felt>,
}

impl Query {
    pub async fn run(self) -> Result<()> {
        let connector = StarknetConnector::new(self.network.rpc_url)?;
        let connection = connector.connect().await?;
        info!(
            "Connected to {} (chain {})",
            connector.endpoint(),
            format_chain_id(connection.chain_id())
        );

        let contract = ContractHandle::load(
            &self.contract.abi,
            self.contract.contract_address,
            Arc::new(connection),
        )?;
        let result = contract.call(&self.function, self.calldata).await?;
        info!("{} returned {}", result.function, result);

        Ok(())
    }
}
