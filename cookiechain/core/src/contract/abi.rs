use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_json::{Map, Value};
use starknet::core::types::Felt;

use crate::{format_chain_id, parse_felt, Error, Result};

/// Interface definition of a deployed contract, loaded from a JSON file.
///
/// Three layouts are understood:
///
/// - a Starknet ABI array, where functions may be nested in `interface` entries;
/// - a contract artifact object carrying the ABI under `abi` (as an array or as a JSON-encoded
///   string), optionally with a `networks` map of per-chain deployments;
/// - an object keyed by function name, e.g. `{"cookiesCount": {"outputs": [...]}}`.
///
/// Entries of the array layouts that omit their mutability are external, as Cairo 0 ABIs only tag
/// view functions. Descriptors of the name-keyed layout default to view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractAbi {
    functions: BTreeMap<String, AbiFunction>,
    deployments: BTreeMap<String, Felt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiOutput>,
    #[serde(default, alias = "stateMutability")]
    pub state_mutability: StateMutability,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbiOutput {
    #[serde(rename = "type")]
    pub ty: String,
}

/// EVM mutabilities found in artifact ABIs fold into the two Starknet kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateMutability {
    #[serde(alias = "pure")]
    View,
    #[default]
    #[serde(alias = "nonpayable", alias = "payable")]
    External,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AbiEntry {
    Function(AbiFunction),
    Interface {
        #[serde(default)]
        items: Vec<AbiEntry>,
    },
    #[serde(other)]
    Other,
}

/// Function descriptor of the name-keyed layout, where the name is the key.
#[derive(Debug, Deserialize)]
struct NamedFunction {
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiOutput>,
    #[serde(default = "read_only", alias = "stateMutability")]
    state_mutability: StateMutability,
}

fn read_only() -> StateMutability {
    StateMutability::View
}

#[derive(Debug, Deserialize)]
struct NetworkDeployment {
    address: String,
}

impl AbiFunction {
    /// Whether the function can be queried without sending a transaction.
    pub fn is_view(&self) -> bool {
        self.state_mutability == StateMutability::View
    }

    /// Whether the only argument of the function is an account address, in which case the caller
    /// address is passed as calldata.
    pub fn takes_caller_address(&self) -> bool {
        matches!(self.inputs.as_slice(), [input] if input.ty.ends_with("ContractAddress"))
    }
}

impl ContractAbi {
    /// Reads and parses the ABI file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| Error::abi_load(path, err))?;

        Self::from_json_str(&raw).map_err(|reason| Error::abi_load(path, reason))
    }

    fn from_json_str(raw: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| format!("malformed JSON: {err}"))?;

        let mut abi = Self::default();
        match value {
            Value::Array(entries) => abi.collect_entries(entries)?,
            Value::Object(mut artifact) if artifact.contains_key("abi") => {
                let entries = match artifact.remove("abi") {
                    Some(Value::Array(entries)) => entries,
                    Some(Value::String(encoded)) => serde_json::from_str(&encoded)
                        .map_err(|err| format!("malformed embedded ABI: {err}"))?,
                    _ => return Err("`abi` must be an array or a JSON string".to_string()),
                };
                abi.collect_entries(entries)?;

                if let Some(networks) = artifact.remove("networks") {
                    abi.deployments = parse_networks(networks)?;
                }
            }
            Value::Object(functions) => abi.collect_named(functions)?,
            _ => return Err("expected a JSON array or object".to_string()),
        }

        if abi.functions.is_empty() {
            return Err("ABI declares no functions".to_string());
        }

        Ok(abi)
    }

    fn collect_entries(&mut self, entries: Vec<Value>) -> Result<(), String> {
        let entries: Vec<AbiEntry> = serde_json::from_value(Value::Array(entries))
            .map_err(|err| format!("malformed ABI entry: {err}"))?;

        let mut pending = entries;
        while let Some(entry) = pending.pop() {
            match entry {
                AbiEntry::Function(function) => {
                    self.functions.insert(function.name.clone(), function);
                }
                AbiEntry::Interface { items } => pending.extend(items),
                AbiEntry::Other => {}
            }
        }

        Ok(())
    }

    fn collect_named(&mut self, functions: Map<String, Value>) -> Result<(), String> {
        for (name, descriptor) in functions {
            let descriptor: NamedFunction = match descriptor {
                Value::Object(_) => serde_json::from_value(descriptor)
                    .map_err(|err| format!("malformed descriptor for `{name}`: {err}"))?,
                _ => return Err(format!("descriptor for `{name}` must be an object")),
            };

            self.functions.insert(
                name.clone(),
                AbiFunction {
                    name,
                    inputs: descriptor.inputs,
                    outputs: descriptor.outputs,
                    state_mutability: descriptor.state_mutability,
                },
            );
        }

        Ok(())
    }

    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.functions.get(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &AbiFunction> {
        self.functions.values()
    }

    /// Names of the functions that can be queried read-only.
    pub fn view_function_names(&self) -> Vec<&str> {
        self.functions
            .values()
            .filter(|function| function.is_view())
            .map(|function| function.name.as_str())
            .collect()
    }

    /// Deployed address recorded in the artifact for `chain_id`.
    ///
    /// Network keys may be the chain id short string, its hex form or its decimal form.
    pub fn deployment(&self, chain_id: Felt) -> Option<Felt> {
        [
            format_chain_id(chain_id),
            format!("{chain_id:#x}"),
            chain_id.to_string(),
        ]
        .iter()
        .find_map(|key| self.deployments.get(key).copied())
    }
}

fn parse_networks(networks: Value) -> Result<BTreeMap<String, Felt>, String> {
    let networks: BTreeMap<String, NetworkDeployment> =
        serde_json::from_value(networks).map_err(|err| format!("malformed `networks`: {err}"))?;

    networks
        .into_iter()
        .map(|(network, deployment)| Ok((network, parse_felt(&deployment.address)?)))
        .collect()
}
