//! Account options.

use clap::Args;
use cookiechain_core::config::{AccountConfig, OZ_ACCOUNT_CLASS_HASH};
use starknet::core::types::Felt;

#[derive(Debug, Args, Clone)]
pub struct AccountOptions {
    #[arg(long, env = "COOKIECHAIN_ACCOUNT_CLASS_HASH")]
    #[arg(help = "Account class hash used to compute the account address.")]
    #[arg(default_value = OZ_ACCOUNT_CLASS_HASH.to_hex_string())]
    pub account_class_hash: Felt,

    #[arg(long, env = "COOKIECHAIN_ACCOUNT_ADDRESS")]
    #[arg(help = "Use this account address instead of computing it from the public key.")]
    pub account_address: Option<Felt>,
}

impl From<AccountOptions> for AccountConfig {
    fn from(options: AccountOptions) -> Self {
        Self {
            class_hash: options.account_class_hash,
            address: options.account_address,
        }
    }
}
