use std::fmt;

use bip39::{Language, Mnemonic};
use sha2::{Digest, Sha256};
use starknet::core::types::Felt;
use starknet::core::utils::get_contract_address;
use starknet::macros::felt;
use starknet::signers::SigningKey;

use crate::config::{AccountConfig, Secret};
use crate::{Error, Result};

/// Order of the STARK curve. Private keys must be in `[1, EC_ORDER)`.
const EC_ORDER: Felt =
    felt!("0x0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f");

/// How the private key of a [`SigningIdentity`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationScheme {
    /// BIP-39 seed of the mnemonic and passphrase, compressed with SHA-256 and masked to 251
    /// bits.
    Bip39Sha256,
    /// Private key supplied directly.
    RawKey,
}

impl fmt::Display for DerivationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bip39Sha256 => f.write_str("bip39-sha256"),
            Self::RawKey => f.write_str("raw-key"),
        }
    }
}

/// Account derived from the injected secret.
///
/// The address defaults to the counterfactual address of the configured account class, deployed
/// by the zero address with the public key as both salt and sole constructor argument.
#[derive(Clone)]
pub struct SigningIdentity {
    address: Felt,
    public_key: Felt,
    scheme: DerivationScheme,
}

impl SigningIdentity {
    pub fn derive(secret: &Secret, account: &AccountConfig) -> Result<Self> {
        let (signing_key, scheme) = match secret {
            Secret::Mnemonic { phrase, passphrase } => (
                signing_key_from_mnemonic(phrase, passphrase)?,
                DerivationScheme::Bip39Sha256,
            ),
            Secret::PrivateKey(scalar) => {
                (signing_key_from_scalar(*scalar)?, DerivationScheme::RawKey)
            }
        };

        let public_key = signing_key.verifying_key().scalar();
        let address = account.address.unwrap_or_else(|| {
            get_contract_address(public_key, account.class_hash, &[public_key], Felt::ZERO)
        });

        Ok(Self {
            address,
            public_key,
            scheme,
        })
    }

    pub fn address(&self) -> Felt {
        self.address
    }

    pub fn public_key(&self) -> Felt {
        self.public_key
    }

    pub fn scheme(&self) -> DerivationScheme {
        self.scheme
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("address", &format_args!("{:#x}", self.address))
            .field("public_key", &format_args!("{:#x}", self.public_key))
            .field("scheme", &self.scheme)
            .finish()
    }
}

fn signing_key_from_mnemonic(phrase: &str, passphrase: &str) -> Result<SigningKey> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|err| Error::InvalidSecret(format!("malformed mnemonic: {err}")))?;
    let seed = mnemonic.to_seed_normalized(passphrase);

    let mut scalar: [u8; 32] = Sha256::digest(seed).into();
    // 251 bits keep the scalar below the curve order.
    scalar[0] &= 0x07;

    signing_key_from_scalar(Felt::from_bytes_be(&scalar))
}

fn signing_key_from_scalar(scalar: Felt) -> Result<SigningKey> {
    if scalar == Felt::ZERO || scalar >= EC_ORDER {
        return Err(Error::InvalidSecret(
            "private key must be in range [1, curve order)".to_string(),
        ));
    }

    Ok(SigningKey::from_secret_scalar(scalar))
}
