use cosmrs::ErrorReport;
use prost::{DecodeError, EncodeError};
use thiserror::Error;

use super::chain_res::ChainResponse;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid mnemonic")]
    Mnemonic,

    #[error("invalid derivation path")]
    DerivationPath,

    #[error("invalid address prefix: {prefix:?}")]
    Prefix { prefix: String },

    #[error("cryptographic error")]
    Crypto { source: ErrorReport },

    #[error("invalid account ID: {id:?}")]
    AccountId { id: String },

    #[error("invalid admin address")]
    AdminAddress,

    #[error("invalid denomination: {name:?}")]
    Denom { name: String },

    #[error("invalid chainId: {chain_id:?}")]
    ChainId { chain_id: String },

    #[error("proto encoding error")]
    ProtoEncoding { source: ErrorReport },

    #[error("proto decoding error")]
    ProtoDecoding { source: ErrorReport },

    #[error("connection failure during tx broadcast")]
    BroadcastSend { source: ErrorReport },

    #[error("tx rejected by node: {}", res.log)]
    BroadcastRejected { res: ChainResponse },

    #[error("contract instantiation rejected: {}", res.log)]
    Instantiation { res: ChainResponse },

    #[error("contract execution rejected: {}", res.log)]
    Execution { res: ChainResponse },

    #[error("CosmosSDK error: {}", res.log)]
    CosmosSdk { res: ChainResponse },

    #[error("tx result is missing event: {name:?}")]
    MissingEvent { name: String },

    #[error("malformed attribute {attr:?} on tx event {event:?}")]
    EventAttribute { event: String, attr: String },

    #[error("rpc request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error(transparent)]
    Rpc(#[from] tendermint_rpc::Error),
}

impl ClientError {
    pub fn crypto(e: ErrorReport) -> ClientError {
        ClientError::Crypto { source: e }
    }

    pub fn proto_encoding(e: ErrorReport) -> ClientError {
        ClientError::ProtoEncoding { source: e }
    }

    pub fn prost_proto_en(e: EncodeError) -> ClientError {
        ClientError::ProtoEncoding { source: e.into() }
    }

    pub fn prost_proto_de(e: DecodeError) -> ClientError {
        ClientError::ProtoDecoding { source: e.into() }
    }

    pub fn broadcast_send(e: ErrorReport) -> ClientError {
        ClientError::BroadcastSend { source: e }
    }
}

#[derive(Error, Debug)]
pub enum DeserializeError {
    #[error("response does not contain any data to deserialize")]
    EmptyResponse,

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
