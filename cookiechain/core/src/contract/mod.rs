use std::{fmt, path::Path, sync::Arc};

use log::debug;
use starknet::core::types::{Felt, FunctionCall};
use starknet::core::utils::get_selector_from_name;

use crate::{format_chain_id, identity::SigningIdentity, network::Connection, Error, Result};

mod abi;
pub use abi::{AbiFunction, AbiOutput, AbiParam, ContractAbi, StateMutability};

/// A deployed contract bound to a live connection.
#[derive(Debug)]
pub struct ContractHandle<C> {
    address: Felt,
    abi: Arc<ContractAbi>,
    connection: Arc<C>,
}

/// Raw felts returned by a read-only call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub function: String,
    pub values: Vec<Felt>,
}

impl<C> Clone for ContractHandle<C> {
    fn clone(&self) -> Self {
        Self {
            address: self.address,
            abi: self.abi.clone(),
            connection: self.connection.clone(),
        }
    }
}

impl<C> ContractHandle<C>
where
    C: Connection,
{
    pub fn new(abi: ContractAbi, address: Felt, connection: Arc<C>) -> Self {
        Self {
            address,
            abi: Arc::new(abi),
            connection,
        }
    }

    /// Loads the ABI at `abi_path` and binds it to `address`, or to the deployment the artifact
    /// records for the connected chain.
    pub fn load(
        abi_path: impl AsRef<Path>,
        address: Option<Felt>,
        connection: Arc<C>,
    ) -> Result<Self> {
        let abi = ContractAbi::load(abi_path)?;

        let chain_id = connection.chain_id();
        let address = address
            .or_else(|| abi.deployment(chain_id))
            .ok_or_else(|| Error::ContractNotDeployed(format_chain_id(chain_id)))?;

        Ok(Self::new(abi, address, connection))
    }

    pub fn address(&self) -> Felt {
        self.address
    }

    pub fn abi(&self) -> &ContractAbi {
        &self.abi
    }

    /// Calls the read-only function `name` with the identity as caller context.
    ///
    /// View calls carry no caller on Starknet, so the identity address is passed as the argument
    /// of functions whose only input is an account address.
    pub async fn query(&self, name: &str, identity: &SigningIdentity) -> Result<QueryResult> {
        let function = self.view_function(name)?;
        let calldata = if function.takes_caller_address() {
            vec![identity.address()]
        } else {
            vec![]
        };

        self.call(name, calldata).await
    }

    /// Calls the read-only function `name` with explicit calldata.
    pub async fn call(&self, name: &str, calldata: Vec<Felt>) -> Result<QueryResult> {
        self.view_function(name)?;
        let entry_point_selector =
            get_selector_from_name(name).map_err(|err| Error::query(name, err))?;

        debug!(
            "Calling {} on {:#x} with {} calldata felt(s)",
            name,
            self.address,
            calldata.len()
        );
        let values = self
            .connection
            .call(FunctionCall {
                contract_address: self.address,
                entry_point_selector,
                calldata,
            })
            .await
            .map_err(|source| Error::Query {
                function: name.to_string(),
                source,
            })?;

        Ok(QueryResult {
            function: name.to_string(),
            values,
        })
    }

    fn view_function(&self, name: &str) -> Result<&AbiFunction> {
        match self.abi.function(name) {
            Some(function) if function.is_view() => Ok(function),
            Some(_) => Err(Error::query(name, "function is not read-only")),
            None => Err(Error::query(name, "function is not declared in the ABI")),
        }
    }
}

impl fmt::Display for QueryResult {
    /// Single-felt results print as a decimal integer, longer results as a bracketed list.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values.as_slice() {
            [value] => write!(f, "{value}"),
            values => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}
