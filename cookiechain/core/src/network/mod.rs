use std::future::Future;

use starknet::core::types::{Felt, FunctionCall};

use crate::{BoxError, Result};

mod starknet_rpc;
pub use starknet_rpc::{StarknetConnection, StarknetConnector};

/// Opens connections to a remote network endpoint.
pub trait NetworkConnector {
    type Connection: Connection;

    /// Human-readable endpoint, used in logs and errors.
    fn endpoint(&self) -> &str;

    /// Performs the handshake with the endpoint and returns a live connection.
    ///
    /// Failures surface as [`Error::Connection`](crate::Error::Connection).
    fn connect(&self) -> impl Future<Output = Result<Self::Connection>> + Send;
}

/// A live link to a network node.
pub trait Connection: Send + Sync {
    /// Chain id reported by the node during the handshake.
    fn chain_id(&self) -> Felt;

    /// Executes a read-only call against the latest block and returns the raw result felts.
    fn call(
        &self,
        call: FunctionCall,
    ) -> impl Future<Output = Result<Vec<Felt>, BoxError>> + Send;
}
