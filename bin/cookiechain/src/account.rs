use anyhow::Result;
use clap::Parser;
use cookiechain_core::{config::Secret, identity::SigningIdentity};
use log::info;

use crate::args::{AccountOptions, SecretOptions};

#[derive(Debug, Parser)]
pub struct Account {
    #[clap(flatten)]
    secret: SecretOptions,
    #[clap(flatten)]
    account: AccountOptions,
}

impl Account {
    pub fn run(self) -> Result<()> {
        let identity = self.derive()?;

        info!("Account address: {:#064x}", identity.address());
        info!("Public key: {:#064x}", identity.public_key());
        info!("Derivation scheme: {}", identity.scheme());

        Ok(())
    }

    fn derive(self) -> Result<SigningIdentity> {
        let secret = Secret::try_from(self.secret)?;
        Ok(SigningIdentity::derive(&secret, &self.account.into())?)
    }
}
