use cosmos_sdk_proto::cosmwasm::wasm::v1::{
    QuerySmartContractStateRequest, QuerySmartContractStateResponse,
};
use cosmrs::cosmwasm::{MsgExecuteContract, MsgInstantiateContract, MsgStoreCode};
use cosmrs::crypto::secp256k1;
use cosmrs::rpc::HttpClient;
use cosmrs::tx::Msg;
use cosmrs::AccountId;
use prost::Message;

use super::chain_res::{
    ExecResponse, InstantiateResponse, QueryResponse, StoreCodeResponse,
};
use super::cosmos::{abci_query, event_attr, find_event, send_tx};
use super::error::ClientError;
use super::fee::{
    estimate_fee, EXECUTE_GAS_LIMIT, INSTANTIATE_GAS_LIMIT, STORE_CODE_GAS_LIMIT,
};
use crate::config::cfg::{ChainCfg, Coin};
use crate::config::key::SigningKey;

/// Byte-level Cosmwasm operation client. Owns the RPC connection and the
/// signing credential for the lifetime of a session; payload serialization
/// and input validation live a layer up in [crate::session::Session].
#[cfg_attr(test, faux::create)]
#[derive(Clone, Debug)]
pub struct ContractClient {
    rpc_client: HttpClient,
    cfg: ChainCfg,
    key: SigningKey,
}

#[cfg_attr(test, faux::methods)]
impl ContractClient {
    // HACK: faux doesn't support mocking a struct wrapped in a Result
    // so we are just ignoring the constructor for this crate's tests
    #[cfg(not(test))]
    pub fn new(cfg: ChainCfg, key: SigningKey) -> Result<Self, ClientError> {
        Ok(Self {
            rpc_client: HttpClient::new(cfg.rpc_endpoint.as_str())?,
            cfg,
            key,
        })
    }

    pub async fn store(
        &self,
        payload: Vec<u8>,
        gas_limit: Option<u64>,
    ) -> Result<StoreCodeResponse, ClientError> {
        let signing_key: secp256k1::SigningKey = (&self.key).try_into()?;
        let account_id = self.key.to_account(&self.cfg.prefix)?.address;

        let msg = MsgStoreCode {
            sender: account_id.clone(),
            wasm_byte_code: payload,
            instantiate_permission: None,
        }
        .to_any()
        .map_err(ClientError::proto_encoding)?;

        let fee = estimate_fee(
            gas_limit.unwrap_or(STORE_CODE_GAS_LIMIT),
            self.cfg.gas_price,
            &self.cfg.denom,
        )?;

        let tx_res = send_tx(
            &self.rpc_client,
            msg,
            &signing_key,
            account_id,
            fee,
            &self.cfg,
        )
        .await?;

        if tx_res.deliver_tx.code.is_err() {
            return Err(ClientError::BroadcastRejected {
                res: tx_res.deliver_tx.into(),
            });
        }

        let event = find_event(&tx_res.deliver_tx.events, "store_code").ok_or(
            ClientError::MissingEvent {
                name: "store_code".to_string(),
            },
        )?;

        let code_id = event_attr(event, "code_id")?
            .parse::<u64>()
            .map_err(|_| ClientError::EventAttribute {
                event: "store_code".to_string(),
                attr: "code_id".to_string(),
            })?;

        Ok(StoreCodeResponse {
            code_id,
            tx_hash: tx_res.hash.to_string(),
            height: tx_res.height.into(),
            res: tx_res.deliver_tx.into(),
        })
    }

    pub async fn instantiate(
        &self,
        code_id: u64,
        payload: Vec<u8>,
        label: String,
        admin: Option<String>,
        funds: Vec<Coin>,
        gas_limit: Option<u64>,
    ) -> Result<InstantiateResponse, ClientError> {
        let signing_key: secp256k1::SigningKey = (&self.key).try_into()?;
        let account_id = self.key.to_account(&self.cfg.prefix)?.address;

        let mut cosm_funds = vec![];
        for fund in funds {
            cosm_funds.push(fund.try_into()?);
        }

        let msg = MsgInstantiateContract {
            sender: account_id.clone(),
            admin: admin
                .map(|s| s.parse())
                .transpose()
                .map_err(|_| ClientError::AdminAddress)?,
            code_id,
            label: Some(label),
            msg: payload,
            funds: cosm_funds,
        }
        .to_any()
        .map_err(ClientError::proto_encoding)?;

        let fee = estimate_fee(
            gas_limit.unwrap_or(INSTANTIATE_GAS_LIMIT),
            self.cfg.gas_price,
            &self.cfg.denom,
        )?;

        let tx_res = send_tx(
            &self.rpc_client,
            msg,
            &signing_key,
            account_id,
            fee,
            &self.cfg,
        )
        .await?;

        if tx_res.deliver_tx.code.is_err() {
            return Err(ClientError::Instantiation {
                res: tx_res.deliver_tx.into(),
            });
        }

        let event = find_event(&tx_res.deliver_tx.events, "instantiate").ok_or(
            ClientError::MissingEvent {
                name: "instantiate".to_string(),
            },
        )?;

        let address = event_attr(event, "_contract_address")?;

        Ok(InstantiateResponse {
            address,
            tx_hash: tx_res.hash.to_string(),
            height: tx_res.height.into(),
            res: tx_res.deliver_tx.into(),
        })
    }

    pub async fn execute(
        &self,
        address: String,
        payload: Vec<u8>,
        funds: Vec<Coin>,
        gas_limit: Option<u64>,
    ) -> Result<ExecResponse, ClientError> {
        let signing_key: secp256k1::SigningKey = (&self.key).try_into()?;
        let account_id = self.key.to_account(&self.cfg.prefix)?.address;

        let contract: AccountId = address.parse().map_err(|_| ClientError::AccountId {
            id: address.clone(),
        })?;

        let mut cosm_funds = vec![];
        for fund in funds {
            cosm_funds.push(fund.try_into()?);
        }

        let msg = MsgExecuteContract {
            sender: account_id.clone(),
            contract,
            msg: payload,
            funds: cosm_funds,
        }
        .to_any()
        .map_err(ClientError::proto_encoding)?;

        let fee = estimate_fee(
            gas_limit.unwrap_or(EXECUTE_GAS_LIMIT),
            self.cfg.gas_price,
            &self.cfg.denom,
        )?;

        let tx_res = send_tx(
            &self.rpc_client,
            msg,
            &signing_key,
            account_id,
            fee,
            &self.cfg,
        )
        .await?;

        if tx_res.deliver_tx.code.is_err() {
            return Err(ClientError::Execution {
                res: tx_res.deliver_tx.into(),
            });
        }

        Ok(ExecResponse {
            tx_hash: tx_res.hash.to_string(),
            height: tx_res.height.into(),
            res: tx_res.deliver_tx.into(),
        })
    }

    pub async fn query(
        &self,
        address: String,
        payload: Vec<u8>,
    ) -> Result<QueryResponse, ClientError> {
        let res = abci_query(
            &self.rpc_client,
            QuerySmartContractStateRequest {
                address,
                query_data: payload,
            },
            "/cosmwasm.wasm.v1.Query/SmartContractState",
            self.cfg.timeout_secs,
        )
        .await?;

        let res = QuerySmartContractStateResponse::decode(res.value.as_slice())
            .map_err(ClientError::prost_proto_de)?;

        Ok(QueryResponse { res: res.into() })
    }
}
