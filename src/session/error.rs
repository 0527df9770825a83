use thiserror::Error;

use crate::client::error::ClientError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("wasm bytecode payload is empty")]
    EmptyBytecode,

    #[error(transparent)]
    ClientError(#[from] ClientError),
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("serde json serialization error")]
    JsonSerialize { source: serde_json::Error },

    #[error(transparent)]
    ClientError(#[from] ClientError),
}

impl ProcessError {
    pub fn json(e: serde_json::Error) -> ProcessError {
        ProcessError::JsonSerialize { source: e }
    }
}
