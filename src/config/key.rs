use cosmrs::bip32;
use cosmrs::crypto::secp256k1;
use cosmrs::crypto::PublicKey;
use cosmrs::AccountId;
use serde::{Deserialize, Serialize};

use crate::client::error::ClientError;

// https://github.com/confio/cosmos-hd-key-derivation-spec#the-cosmos-hub-path
const DERIVATION_PATH: &str = "m/44'/118'/0'/0/0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningKey {
    /// human readable key name
    pub name: String,
    /// private key associated with `name`
    pub key: Key,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Key {
    /// Mnemonic allows you to pass the private key mnemonic words
    /// to configure a transaction signing key.
    /// DO NOT USE FOR MAINNET
    Mnemonic(String),
}

/// Chain identity derived from a [SigningKey] under a given address prefix.
///
/// Derivation is deterministic: the same credential and prefix always yield
/// the same address.
#[derive(Debug, Clone)]
pub struct Account {
    pub address: AccountId,
    pub public_key: PublicKey,
}

impl SigningKey {
    pub fn to_account(&self, prefix: &str) -> Result<Account, ClientError> {
        let key: secp256k1::SigningKey = self.try_into()?;
        let public_key = key.public_key();
        let address = public_key
            .account_id(prefix)
            .map_err(|_| ClientError::Prefix {
                prefix: prefix.to_string(),
            })?;

        Ok(Account {
            address,
            public_key,
        })
    }
}

impl TryFrom<&SigningKey> for secp256k1::SigningKey {
    type Error = ClientError;
    fn try_from(signer: &SigningKey) -> Result<secp256k1::SigningKey, ClientError> {
        match &signer.key {
            Key::Mnemonic(phrase) => {
                let seed = bip32::Mnemonic::new(phrase, bip32::Language::English)
                    .map_err(|_| ClientError::Mnemonic)?
                    .to_seed("");
                Ok(
                    bip32::XPrv::derive_from_path(seed, &DERIVATION_PATH.parse().unwrap())
                        .map_err(|_| ClientError::DerivationPath)?
                        .into(),
                )
            }
        }
    }
}
