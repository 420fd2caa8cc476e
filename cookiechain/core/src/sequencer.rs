use std::{fmt, sync::Arc};

use log::{error, info, warn};

use crate::{
    config::{BootstrapConfig, DEFAULT_QUERY_FUNCTION},
    contract::{ContractHandle, QueryResult},
    format_chain_id,
    identity::SigningIdentity,
    network::{Connection, NetworkConnector},
    Error, Result,
};

/// Steps of the bootstrap, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Connect,
    DeriveIdentity,
    LoadContract,
    Query,
}

impl Step {
    /// Whether a failure at this step aborts the bootstrap. A failed query only downgrades the
    /// outcome to [`Outcome::SucceededWithWarning`].
    pub fn is_fatal(self) -> bool {
        !matches!(self, Self::Query)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => f.write_str("connect"),
            Self::DeriveIdentity => f.write_str("derive identity"),
            Self::LoadContract => f.write_str("load contract"),
            Self::Query => f.write_str("query"),
        }
    }
}

/// Terminal state of a bootstrap that got past every fatal step.
#[derive(Debug)]
pub enum Outcome {
    Succeeded(QueryResult),
    SucceededWithWarning(Error),
}

impl Outcome {
    pub fn result(&self) -> Option<&QueryResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            Self::SucceededWithWarning(_) => None,
        }
    }

    pub fn warning(&self) -> Option<&Error> {
        match self {
            Self::Succeeded(_) => None,
            Self::SucceededWithWarning(err) => Some(err),
        }
    }
}

/// Handles accumulated by a completed bootstrap.
#[derive(Debug)]
pub struct BootstrapReport<C> {
    pub connection: Arc<C>,
    pub identity: SigningIdentity,
    pub contract: ContractHandle<C>,
    pub outcome: Outcome,
}

/// Runs connect, identity derivation and contract load/query strictly in order.
#[derive(Debug)]
pub struct BootstrapSequencer<N> {
    connector: N,
    config: BootstrapConfig,
}

impl<N> BootstrapSequencer<N>
where
    N: NetworkConnector,
{
    pub fn new(connector: N, config: BootstrapConfig) -> Self {
        Self { connector, config }
    }

    pub async fn run(&self) -> Result<BootstrapReport<N::Connection>> {
        let connection = Arc::new(self.connect().await.map_err(halt)?);
        let identity = self.derive_identity().map_err(halt)?;
        let contract = self.load_contract(connection.clone()).map_err(halt)?;

        let outcome = match contract
            .query(&self.config.query_function, &identity)
            .await
        {
            Ok(result) => {
                if result.function == DEFAULT_QUERY_FUNCTION {
                    info!("Cookies count: {result}");
                } else {
                    info!("{}: {}", result.function, result);
                }
                Outcome::Succeeded(result)
            }
            Err(err) if !err.step().is_fatal() => {
                warn!("{err}");
                Outcome::SucceededWithWarning(err)
            }
            Err(err) => return Err(halt(err)),
        };

        Ok(BootstrapReport {
            connection,
            identity,
            contract,
            outcome,
        })
    }

    pub async fn connect(&self) -> Result<N::Connection> {
        let connection = self.connector.connect().await?;
        info!(
            "Connected to {} (chain {})",
            self.connector.endpoint(),
            format_chain_id(connection.chain_id())
        );

        Ok(connection)
    }

    pub fn derive_identity(&self) -> Result<SigningIdentity> {
        let identity = SigningIdentity::derive(&self.config.secret, &self.config.account)?;
        info!(
            "Account loaded: {:#x} (scheme: {})",
            identity.address(),
            identity.scheme()
        );

        Ok(identity)
    }

    pub fn load_contract(
        &self,
        connection: Arc<N::Connection>,
    ) -> Result<ContractHandle<N::Connection>> {
        let contract = ContractHandle::load(
            &self.config.abi_path,
            self.config.contract_address,
            connection,
        )?;
        info!("Contract loaded: {:#x}", contract.address());

        Ok(contract)
    }
}

fn halt(err: Error) -> Error {
    error!("Bootstrap halted at step `{}`: {}", err.step(), err);
    err
}
