use std::fmt;
use std::path::PathBuf;

use starknet::core::types::Felt;
use starknet::macros::felt;
use url::Url;

/// Read-only function queried by the bootstrap when none is configured.
pub const DEFAULT_QUERY_FUNCTION: &str = "cookiesCount";

/// Class hash of the OpenZeppelin account contract (v0.8.1) used to compute the counterfactual
/// address of a derived identity.
pub const OZ_ACCOUNT_CLASS_HASH: Felt =
    felt!("0x061dac032f228abef9c6626f995015233097ae253a7f72d68552db02f2971b8f");

/// Everything the bootstrap needs, passed explicitly into
/// [`BootstrapSequencer`](crate::sequencer::BootstrapSequencer).
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Node endpoint. `ws`/`wss` URLs are mapped onto the HTTP transport.
    pub endpoint: Url,
    pub secret: Secret,
    pub account: AccountConfig,
    pub abi_path: PathBuf,
    /// Deployed contract address. When absent the address is resolved from the `networks` map of
    /// the contract artifact.
    pub contract_address: Option<Felt>,
    pub query_function: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// Account class the identity address is computed against.
    pub class_hash: Felt,
    /// Explicit account address, for accounts deployed with a non-default salt or class.
    pub address: Option<Felt>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            class_hash: OZ_ACCOUNT_CLASS_HASH,
            address: None,
        }
    }
}

/// Key derivation input. Always injected at runtime, never compiled in.
#[derive(Clone, PartialEq, Eq)]
pub enum Secret {
    Mnemonic {
        phrase: String,
        passphrase: String,
    },
    PrivateKey(Felt),
}

impl Secret {
    pub fn mnemonic(phrase: impl Into<String>) -> Self {
        Self::Mnemonic {
            phrase: phrase.into(),
            passphrase: String::new(),
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mnemonic { .. } => f.write_str("Secret::Mnemonic(<redacted>)"),
            Self::PrivateKey(_) => f.write_str("Secret::PrivateKey(<redacted>)"),
        }
    }
}
