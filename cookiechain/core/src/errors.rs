use std::path::PathBuf;

use crate::sequencer::Step;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed transport or provider failure carried as the source of an [`Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to connect to {endpoint}: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: BoxError,
    },
    #[error("unsupported endpoint scheme `{0}`, expected one of http, https, ws, wss")]
    UnsupportedScheme(String),
    #[error("invalid secret: {0}")]
    InvalidSecret(String),
    #[error("failed to load ABI from {}: {reason}", .path.display())]
    AbiLoad { path: PathBuf, reason: String },
    #[error("contract is not deployed on chain {0} and no address was configured")]
    ContractNotDeployed(String),
    #[error("query `{function}` failed: {source}")]
    Query {
        function: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// The bootstrap step this error belongs to.
    pub fn step(&self) -> Step {
        match self {
            Self::Connection { .. } | Self::UnsupportedScheme(_) => Step::Connect,
            Self::InvalidSecret(_) => Step::DeriveIdentity,
            Self::AbiLoad { .. } | Self::ContractNotDeployed(_) => Step::LoadContract,
            Self::Query { .. } => Step::Query,
        }
    }

    pub(crate) fn abi_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::AbiLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn query(function: &str, source: impl Into<BoxError>) -> Self {
        Self::Query {
            function: function.to_string(),
            source: source.into(),
        }
    }
}
