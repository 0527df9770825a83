use config::Config as _Config;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tendermint_rpc::error::ErrorDetail::UnsupportedScheme;
use tendermint_rpc::{Error, Url};

use super::error::ConfigError;
use super::key::SigningKey;
use crate::client::error::ClientError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub chain_cfg: ChainCfg,
    // optional default signing credential for sessions bootstrapped from this file
    #[serde(default)]
    pub signer: Option<SigningKey>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainCfg {
    pub denom: String,
    pub prefix: String,
    pub chain_id: String,
    pub rpc_endpoint: String,
    /// price of one unit of gas in micro `denom`
    pub gas_price: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn from_yaml(file: &str) -> Result<Config, ConfigError> {
        let settings = _Config::builder()
            .add_source(config::File::with_name(file))
            .build()?;

        let mut cfg = settings.try_deserialize::<Config>()?;
        cfg.chain_cfg.validate()?;
        cfg.chain_cfg.rpc_endpoint = parse_url(&cfg.chain_cfg.rpc_endpoint)?;

        Ok(cfg)
    }

    /// Returns the signing credential configured in the file, if any
    pub fn signer_key(&self) -> Result<SigningKey, ConfigError> {
        self.signer.clone().ok_or(ConfigError::MissingSigner)
    }
}

impl ChainCfg {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("denom", &self.denom),
            ("prefix", &self.prefix),
            ("chain_id", &self.chain_id),
            ("rpc_endpoint", &self.rpc_endpoint),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(ConfigError::MissingField {
                    name: name.to_string(),
                });
            }
        }

        if self.gas_price <= 0.0 {
            return Err(ConfigError::GasPrice {
                price: self.gas_price,
            });
        }

        Ok(())
    }
}

// Attempt to parse the configured url to ensure that it is valid.
// If url is missing the Scheme then default to https.
pub(crate) fn parse_url(url: &str) -> Result<String, Error> {
    let u = Url::from_str(url);

    if let Err(Error(UnsupportedScheme(detail), report)) = u {
        // if url is missing the scheme, then we will default to https:
        if !url.contains("://") {
            return Ok(format!("https://{}", url));
        }

        return Err(Error(UnsupportedScheme(detail), report));
    }

    Ok(u?.to_string())
}

/// Native token amount attached to an instantiate or execute call
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: u64,
}

impl TryFrom<Coin> for cosmrs::Coin {
    type Error = ClientError;
    fn try_from(coin: Coin) -> Result<cosmrs::Coin, ClientError> {
        Ok(cosmrs::Coin {
            denom: coin.denom.parse().map_err(|_| ClientError::Denom {
                name: coin.denom.clone(),
            })?,
            amount: coin.amount.into(),
        })
    }
}
