//! Secret injection options.

use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;
use cookiechain_core::config::Secret;
use starknet::core::types::Felt;

#[derive(Debug, Args, Clone)]
pub struct SecretOptions {
    #[arg(long, env = "COOKIECHAIN_MNEMONIC", hide_env_values = true)]
    #[arg(value_name = "PHRASE")]
    #[arg(conflicts_with_all = ["mnemonic_file", "private_key"])]
    #[arg(help = "BIP-39 mnemonic the account is derived from.")]
    pub mnemonic: Option<String>,

    #[arg(long, env = "COOKIECHAIN_MNEMONIC_FILE")]
    #[arg(value_name = "PATH")]
    #[arg(conflicts_with = "private_key")]
    #[arg(help = "File holding the BIP-39 mnemonic.")]
    pub mnemonic_file: Option<PathBuf>,

    #[arg(long, env = "COOKIECHAIN_PASSPHRASE", hide_env_values = true)]
    #[arg(help = "Optional BIP-39 passphrase.")]
    #[arg(default_value = "")]
    pub passphrase: String,

    #[arg(long, env = "COOKIECHAIN_PRIVATE_KEY", hide_env_values = true)]
    #[arg(help = "Raw private key of the account.")]
    pub private_key: Option<Felt>,
}

impl TryFrom<SecretOptions> for Secret {
    type Error = anyhow::Error;

    fn try_from(options: SecretOptions) -> Result<Self> {
        let phrase = if let Some(phrase) = options.mnemonic {
            Some(phrase)
        } else if let Some(path) = options.mnemonic_file {
            let phrase = fs::read_to_string(&path)
                .with_context(|| format!("failed to read mnemonic file {}", path.display()))?;
            Some(phrase.trim().to_string())
        } else {
            None
        };

        match (phrase, options.private_key) {
            (Some(phrase), None) => Ok(Secret::Mnemonic {
                phrase,
                passphrase: options.passphrase,
            }),
            (None, Some(private_key)) => Ok(Secret::PrivateKey(private_key)),
            (Some(_), Some(_)) => Err(anyhow!(
                "A mnemonic and a private key were both given. Please specify only one secret."
            )),
            (None, None) => Err(anyhow!(
                "Could not find a secret. Please specify a mnemonic, a mnemonic file or a private \
                 key."
            )),
        }
    }
}
