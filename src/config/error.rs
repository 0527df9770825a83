use config::ConfigError as _ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing or empty required field: {name:?}")]
    MissingField { name: String },

    #[error("gas price must be positive: {price:?}")]
    GasPrice { price: f64 },

    #[error("no signer credential configured")]
    MissingSigner,

    #[error("Error parsing url")]
    UrlParse(#[from] tendermint_rpc::Error),

    #[error(transparent)]
    Config(#[from] _ConfigError),
}
