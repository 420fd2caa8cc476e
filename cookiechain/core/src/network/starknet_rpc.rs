use std::sync::Arc;

use log::debug;
use starknet::{
    core::types::{BlockId, BlockTag, Felt, FunctionCall},
    providers::{jsonrpc::HttpTransport, JsonRpcClient, Provider},
};
use url::Url;

use crate::{
    network::{Connection, NetworkConnector},
    BoxError, Error, Result,
};

/// Connects to a Starknet node over JSON-RPC.
#[derive(Debug, Clone)]
pub struct StarknetConnector {
    endpoint: Url,
    rpc_url: Url,
}

/// Connection produced by [`StarknetConnector`]. The chain id is fetched once during the
/// handshake.
#[derive(Debug, Clone)]
pub struct StarknetConnection {
    provider: Arc<JsonRpcClient<HttpTransport>>,
    chain_id: Felt,
}

impl StarknetConnector {
    pub fn new(endpoint: Url) -> Result<Self> {
        let rpc_url = rpc_url_for(&endpoint)?;
        Ok(Self { endpoint, rpc_url })
    }

    /// URL the HTTP transport actually talks to.
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }
}

impl NetworkConnector for StarknetConnector {
    type Connection = StarknetConnection;

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn connect(&self) -> Result<StarknetConnection> {
        debug!("Opening JSON-RPC connection to {}", self.rpc_url);
        let provider = JsonRpcClient::new(HttpTransport::new(self.rpc_url.clone()));

        let chain_id = provider
            .chain_id()
            .await
            .map_err(|err| Error::Connection {
                endpoint: self.endpoint.to_string(),
                source: Box::new(err),
            })?;

        Ok(StarknetConnection {
            provider: Arc::new(provider),
            chain_id,
        })
    }
}

impl Connection for StarknetConnection {
    fn chain_id(&self) -> Felt {
        self.chain_id
    }

    async fn call(&self, call: FunctionCall) -> Result<Vec<Felt>, BoxError> {
        Ok(self
            .provider
            .call(call, BlockId::Tag(BlockTag::Latest))
            .await?)
    }
}

/// The JSON-RPC transport is HTTP only, so WebSocket-style endpoints are mapped onto their HTTP
/// counterparts.
fn rpc_url_for(endpoint: &Url) -> Result<Url> {
    let scheme = match endpoint.scheme() {
        "http" | "https" => return Ok(endpoint.clone()),
        "ws" => "http",
        "wss" => "https",
        other => return Err(Error::UnsupportedScheme(other.to_string())),
    };

    let mut rpc_url = endpoint.clone();
    rpc_url
        .set_scheme(scheme)
        .map_err(|_| Error::UnsupportedScheme(endpoint.scheme().to_string()))?;
    Ok(rpc_url)
}
