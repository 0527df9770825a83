use super::error::ClientError;
use crate::config::cfg::ChainCfg;
use cosmos_sdk_proto::cosmos::auth::v1beta1::{
    BaseAccount, QueryAccountRequest, QueryAccountResponse,
};
use cosmrs::crypto::secp256k1;
use cosmrs::rpc::endpoint::broadcast::tx_commit::Response;
use cosmrs::rpc::Client;
use cosmrs::tendermint::abci::tag::Key;
use cosmrs::tendermint::abci::{Code, Event};
use cosmrs::tx::{Fee, SignDoc, SignerInfo};
use cosmrs::{
    rpc::HttpClient,
    tx::{self},
};
use cosmrs::{AccountId, Any};
use prost::Message;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tendermint_rpc::endpoint::abci_query::AbciQuery;
use tokio::time;

const TX_MEMO: &str = "cosm-pilot";

/// Signs `msg` with `key` and broadcasts it, blocking until the node has
/// included the tx or rejected it at the mempool check stage. `deliver_tx`
/// is left for the caller to interpret per operation.
pub async fn send_tx(
    client: &HttpClient,
    msg: Any,
    key: &secp256k1::SigningKey,
    account_id: AccountId,
    fee: Fee,
    cfg: &ChainCfg,
) -> Result<Response, ClientError> {
    let timeout_height = 0u16;
    let account = account(client, account_id, cfg).await?;

    let tx_body = tx::Body::new(vec![msg], TX_MEMO, timeout_height);

    // NOTE: if we are making requests in parallel with the same key, we need to serialize `account.sequence` to avoid errors
    let auth_info =
        SignerInfo::single_direct(Some(key.public_key()), account.sequence).auth_info(fee);

    let sign_doc = SignDoc::new(
        &tx_body,
        &auth_info,
        &cfg.chain_id.parse().map_err(|_| ClientError::ChainId {
            chain_id: cfg.chain_id.to_string(),
        })?,
        account.account_number,
    )
    .map_err(ClientError::proto_encoding)?;

    let tx_raw = sign_doc.sign(key).map_err(ClientError::crypto)?;

    let tx_commit_response = with_timeout(cfg.timeout_secs, tx_raw.broadcast_commit(client))
        .await?
        .map_err(ClientError::broadcast_send)?;

    if tx_commit_response.check_tx.code.is_err() {
        return Err(ClientError::BroadcastRejected {
            res: tx_commit_response.check_tx.into(),
        });
    }

    Ok(tx_commit_response)
}

pub async fn abci_query<T: Message>(
    client: &HttpClient,
    req: T,
    path: &str,
    timeout_secs: u64,
) -> Result<AbciQuery, ClientError> {
    let mut buf = Vec::with_capacity(req.encoded_len());
    req.encode(&mut buf).map_err(ClientError::prost_proto_en)?;

    let res = with_timeout(
        timeout_secs,
        client.abci_query(Some(path.parse().unwrap()), buf, None, false),
    )
    .await??;

    if res.code != Code::Ok {
        return Err(ClientError::CosmosSdk { res: res.into() });
    }

    Ok(res)
}

async fn account(
    client: &HttpClient,
    account_id: AccountId,
    cfg: &ChainCfg,
) -> Result<BaseAccount, ClientError> {
    let res = abci_query(
        client,
        QueryAccountRequest {
            address: account_id.as_ref().into(),
        },
        "/cosmos.auth.v1beta1.Query/Account",
        cfg.timeout_secs,
    )
    .await?;

    let res = QueryAccountResponse::decode(res.value.as_slice())
        .map_err(ClientError::prost_proto_de)?
        .account
        .ok_or(ClientError::AccountId {
            id: account_id.to_string(),
        })?;

    let base_account =
        BaseAccount::decode(res.value.as_slice()).map_err(ClientError::prost_proto_de)?;

    Ok(base_account)
}

/// Bounds `f` by `secs`. Expiry means the operation's outcome on chain is
/// indeterminate, so the error is distinct from every failure variant.
pub(crate) async fn with_timeout<F: Future>(secs: u64, f: F) -> Result<F::Output, ClientError> {
    time::timeout(Duration::from_secs(secs), f)
        .await
        .map_err(|_| ClientError::Timeout { secs })
}

pub fn find_event<'a>(events: &'a [Event], key_name: &str) -> Option<&'a Event> {
    events.iter().find(|e| e.type_str == key_name)
}

pub fn event_attr(event: &Event, attr: &str) -> Result<String, ClientError> {
    event
        .attributes
        .iter()
        .find(|a| a.key == Key::from_str(attr).unwrap())
        .map(|a| a.value.to_string())
        .ok_or_else(|| ClientError::EventAttribute {
            event: event.type_str.clone(),
            attr: attr.to_string(),
        })
}
