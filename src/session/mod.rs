//! Public orchestration surface for the contract lifecycle.
//!
//! A [Session] owns the values that the underlying operations share: the
//! chain configuration, the account derived from the signing credential, and
//! the RPC client. Operations take `&self` and hold no interior mutable
//! state, so independent calls may be issued concurrently; callers that need
//! "execute, then observe the effect" must await the execute before querying.

pub mod error;

use log::{debug, info};
use serde::Serialize;

use crate::client::chain_res::{
    ExecResponse, InstantiateResponse, QueryResponse, StoreCodeResponse,
};
use crate::client::cosmwasm::ContractClient;
use crate::config::cfg::{ChainCfg, Coin};
use crate::config::key::Account;
use error::{ProcessError, StoreError};

#[cfg(not(test))]
use crate::client::error::ClientError;
#[cfg(not(test))]
use crate::config::cfg::Config;
#[cfg(not(test))]
use crate::config::key::SigningKey;

/// Stores, instantiates, executes, and queries Cosmwasm smart contracts
/// against the configured chain.
#[derive(Clone)]
pub struct Session {
    cfg: ChainCfg,
    account: Account,
    client: ContractClient,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Session({})", self.account.address)
    }
}

impl Session {
    /// Creates a Session from the supplied Config, deriving the account
    /// identity from `key` once for the session's lifetime.
    #[cfg(not(test))]
    pub fn new(cfg: Config, key: SigningKey) -> Result<Self, ClientError> {
        let account = key.to_account(&cfg.chain_cfg.prefix)?;

        Ok(Self {
            account,
            client: ContractClient::new(cfg.chain_cfg.clone(), key)?,
            cfg: cfg.chain_cfg,
        })
    }

    /// The account identity this session signs with.
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn chain_cfg(&self) -> &ChainCfg {
        &self.cfg
    }

    /// Uploads compiled contract bytecode to the chain, returning the
    /// resulting code id.
    ///
    /// The bytecode is sent byte-for-byte. `gas_limit` defaults to
    /// [crate::client::fee::STORE_CODE_GAS_LIMIT].
    ///
    /// # Errors
    /// * [StoreError::EmptyBytecode] if `wasm` is empty; nothing is sent.
    /// * A broadcast rejection is not retried here. Re-invoking after a
    ///   failure may store a duplicate code id, so callers should check
    ///   whether an earlier attempt already produced one.
    pub async fn store_code(
        &self,
        wasm: Vec<u8>,
        gas_limit: Option<u64>,
    ) -> Result<StoreCodeResponse, StoreError> {
        if wasm.is_empty() {
            return Err(StoreError::EmptyBytecode);
        }

        info!("storing {} bytes of wasm bytecode", wasm.len());

        let res = self.client.store(wasm, gas_limit).await?;

        debug!("{:?}", res.res);

        Ok(res)
    }

    /// Initializes a smart contract from a stored code id, returning the new
    /// contract address.
    ///
    /// # Arguments
    /// * `code_id` - Code id returned by [Self::store_code].
    /// * `msg` - InstantiateMsg that the contract supports, passed through
    ///   opaquely as JSON.
    /// * `label` - Human readable label for the new instance.
    /// * `admin` - Optional admin address for future contract migrations.
    /// * `funds` - Optional native tokens transferred to the new instance.
    pub async fn instantiate<S, T>(
        &self,
        code_id: u64,
        msg: &T,
        label: S,
        admin: Option<String>,
        funds: Option<Coin>,
        gas_limit: Option<u64>,
    ) -> Result<InstantiateResponse, ProcessError>
    where
        S: Into<String>,
        T: Serialize,
    {
        let payload = serde_json::to_vec(msg).map_err(ProcessError::json)?;

        info!("instantiating contract from code id {}", code_id);

        let res = self
            .client
            .instantiate(
                code_id,
                payload,
                label.into(),
                admin,
                normalize_funds(funds),
                gas_limit,
            )
            .await?;

        debug!("{:?}", res.res);

        Ok(res)
    }

    /// Executes a state-changing entry point on a live contract.
    ///
    /// `funds` attaches native tokens to the call: a coin with a non-zero
    /// amount is sent as a single entry, while `None` or a zero amount
    /// attaches nothing at all.
    pub async fn execute<T: Serialize>(
        &self,
        address: String,
        msg: &T,
        funds: Option<Coin>,
        gas_limit: Option<u64>,
    ) -> Result<ExecResponse, ProcessError> {
        let payload = serde_json::to_vec(msg).map_err(ProcessError::json)?;

        info!("executing contract {}", address);

        let res = self
            .client
            .execute(address, payload, normalize_funds(funds), gas_limit)
            .await?;

        debug!("{:?}", res.res);

        Ok(res)
    }

    /// Queries a live contract's read path. No signing, no fee, no
    /// transaction; the result reflects committed state as of the node's
    /// current view and carries no freshness guarantee.
    pub async fn query<T: Serialize>(
        &self,
        address: String,
        msg: &T,
    ) -> Result<QueryResponse, ProcessError> {
        let payload = serde_json::to_vec(msg).map_err(ProcessError::json)?;

        let res = self.client.query(address, payload).await?;

        debug!("{:?}", res.res);

        Ok(res)
    }
}

// A zero-value coin must never go out on the wire: zero means "no funds".
fn normalize_funds(funds: Option<Coin>) -> Vec<Coin> {
    match funds {
        Some(coin) if coin.amount > 0 => vec![coin],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_funds, Session};
    use crate::client::chain_res::{
        ChainResponse, ExecResponse, InstantiateResponse, QueryResponse, StoreCodeResponse,
    };
    use crate::client::cosmwasm::ContractClient;
    use crate::client::error::ClientError;
    use crate::config::cfg::{ChainCfg, Coin};
    use crate::config::key::{Key, SigningKey};
    use crate::session::error::{ProcessError, StoreError};
    use assert_matches::assert_matches;
    use serde_json::{json, Value};

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_session(client: ContractClient) -> Session {
        let key = SigningKey {
            name: "tester".to_string(),
            key: Key::Mnemonic(TEST_MNEMONIC.to_string()),
        };
        let cfg = ChainCfg {
            denom: "uaura".to_string(),
            prefix: "aura".to_string(),
            chain_id: "aura-testnet-2".to_string(),
            rpc_endpoint: "https://localhost:26657".to_string(),
            gas_price: 0.025,
            timeout_secs: 30,
        };
        let account = key.to_account(&cfg.prefix).unwrap();

        Session {
            cfg,
            account,
            client,
        }
    }

    fn ok_exec_response(tx_hash: &str) -> ExecResponse {
        ExecResponse {
            tx_hash: tx_hash.to_string(),
            height: 12,
            res: ChainResponse::default(),
        }
    }

    #[test]
    fn zero_funds_are_never_sent() {
        assert!(normalize_funds(None).is_empty());
        assert!(normalize_funds(Some(Coin {
            denom: "uaura".to_string(),
            amount: 0,
        }))
        .is_empty());
    }

    #[test]
    fn non_zero_funds_are_a_single_coin() {
        let coin = Coin {
            denom: "uaura".to_string(),
            amount: 1_000_000,
        };

        assert_eq!(normalize_funds(Some(coin.clone())), vec![coin]);
    }

    #[tokio::test]
    async fn empty_bytecode_fails_before_any_network_io() {
        // unmocked client: the test would panic if store were reached
        let client = ContractClient::faux();
        let session = test_session(client);

        let err = session.store_code(vec![], None).await.unwrap_err();

        assert_matches!(err, StoreError::EmptyBytecode);
    }

    #[tokio::test]
    async fn store_instantiate_execute_round_trip() {
        let mut client = ContractClient::faux();

        faux::when!(client.store).then(|(payload, _gas)| {
            assert_eq!(payload.len(), 10);
            Ok(StoreCodeResponse {
                code_id: 7,
                tx_hash: "6E41".to_string(),
                height: 10,
                res: ChainResponse::default(),
            })
        });
        faux::when!(client.instantiate).then(|(code_id, _payload, label, _admin, funds, _gas)| {
            assert_eq!(code_id, 7);
            assert_eq!(label, "launchpad");
            assert!(funds.is_empty());
            Ok(InstantiateResponse {
                address: "aura1launchpad".to_string(),
                tx_hash: "8F2C".to_string(),
                height: 11,
                res: ChainResponse::default(),
            })
        });
        faux::when!(client.execute).then(|(address, _payload, funds, _gas)| {
            assert_eq!(address, "aura1launchpad");
            assert!(funds.is_empty());
            Ok(ok_exec_response("A3D9"))
        });

        let session = test_session(client);

        let stored = session.store_code(vec![0; 10], None).await.unwrap();
        assert_eq!(stored.code_id, 7);
        assert!(!stored.tx_hash.is_empty());

        let contract = session
            .instantiate(stored.code_id, &json!({}), "launchpad", None, None, None)
            .await
            .unwrap();
        assert_eq!(contract.address, "aura1launchpad");

        let exec = session
            .execute(
                contract.address,
                &json!({"burn": {"token_id": "x"}}),
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(exec.tx_hash, "A3D9");
    }

    #[tokio::test]
    async fn execute_attaches_exactly_one_coin() {
        let mut client = ContractClient::faux();

        faux::when!(client.execute).then(|(_address, _payload, funds, _gas)| {
            assert_eq!(
                funds,
                vec![Coin {
                    denom: "uaura".to_string(),
                    amount: 1_000_000,
                }]
            );
            Ok(ok_exec_response("B7E0"))
        });

        let session = test_session(client);

        session
            .execute(
                "aura1launchpad".to_string(),
                &json!({"deposit": {}}),
                Some(Coin {
                    denom: "uaura".to_string(),
                    amount: 1_000_000,
                }),
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn execute_drops_zero_value_coin() {
        let mut client = ContractClient::faux();

        faux::when!(client.execute).then(|(_address, _payload, funds, _gas)| {
            assert!(funds.is_empty());
            Ok(ok_exec_response("C1F2"))
        });

        let session = test_session(client);

        session
            .execute(
                "aura1launchpad".to_string(),
                &json!({"burn": {"token_id": "x"}}),
                Some(Coin {
                    denom: "uaura".to_string(),
                    amount: 0,
                }),
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn query_returns_contract_data() {
        let mut client = ContractClient::faux();

        faux::when!(client.query).then(|(_address, payload)| {
            let msg: Value = serde_json::from_slice(&payload).unwrap();
            assert_eq!(msg, json!({"owner_of": {"token_id": "x"}}));
            Ok(QueryResponse {
                res: ChainResponse {
                    data: Some(br#"{"owner": "aura1y"}"#.to_vec()),
                    ..Default::default()
                },
            })
        });

        let session = test_session(client);

        let res = session
            .query(
                "aura1launchpad".to_string(),
                &json!({"owner_of": {"token_id": "x"}}),
            )
            .await
            .unwrap();

        let v: Value = res.data().unwrap();
        assert_eq!(v["owner"], "aura1y");
    }

    #[tokio::test]
    async fn timeouts_surface_as_their_own_variant() {
        let mut client = ContractClient::faux();

        faux::when!(client.execute).then(|_| Err(ClientError::Timeout { secs: 30 }));

        let session = test_session(client);

        let err = session
            .execute(
                "aura1launchpad".to_string(),
                &json!({"burn": {"token_id": "x"}}),
                None,
                None,
            )
            .await
            .unwrap_err();

        assert_matches!(
            err,
            ProcessError::ClientError(ClientError::Timeout { secs: 30 })
        );
    }
}
