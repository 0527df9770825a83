//! Cosmwasm smart contract transaction lifecycle client
//!
//! Drives the full lifecycle of a [Cosmwasm] smart contract against a
//! configured [Cosmos] based chain: upload compiled bytecode, instantiate a
//! contract instance, execute state-changing entry points, and query contract
//! state over Tendermint RPC.
//!
//! Every state-changing operation is fee'd with a deterministic gas policy,
//! signed with the session's mnemonic-derived key, broadcast, and awaited
//! until the node returns an inclusion result, which is normalized into a
//! typed response carrying the transaction hash and gas usage.
//!
//! [cosmwasm]: https://github.com/CosmWasm/cosmwasm
//! [Cosmos]: https://github.com/cosmos/cosmos-sdk
//!
//! # Quick Start
//!
//! ```no_run
//! use cosm_pilot::config::cfg::Config;
//! use cosm_pilot::session::Session;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = Config::from_yaml("config.yaml")?;
//! let key = cfg.signer_key()?;
//! let session = Session::new(cfg, key)?;
//!
//! let stored = session
//!     .store_code(std::fs::read("artifacts/cw721_launchpad.wasm")?, None)
//!     .await?;
//!
//! let contract = session
//!     .instantiate(stored.code_id, &json!({}), "launchpad", None, None, None)
//!     .await?;
//!
//! session
//!     .execute(
//!         contract.address.clone(),
//!         &json!({"burn": {"token_id": "dragonite"}}),
//!         None,
//!         None,
//!     )
//!     .await?;
//!
//! let owner = session
//!     .query(contract.address, &json!({"owner_of": {"token_id": "dragonite"}}))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub mod config;

pub mod session;
