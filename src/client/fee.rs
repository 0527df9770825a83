use cosmrs::tx::Fee;
use cosmrs::{Coin, Denom};

use super::error::ClientError;

/// Default gas limit for storing contract bytecode. Uploads are by far the
/// most gas-heavy operation, so this sits well above the other defaults.
pub const STORE_CODE_GAS_LIMIT: u64 = 2_600_000;

/// Default gas limit for instantiating a stored contract.
pub const INSTANTIATE_GAS_LIMIT: u64 = 500_000;

/// Default gas limit for executing a contract entry point.
pub const EXECUTE_GAS_LIMIT: u64 = 500_000;

/// Converts a gas limit and a gas price into a concrete fee:
/// `ceil(gas_limit * gas_price)` units of `denom`.
///
/// The policy is deterministic. There is no simulation, no retry, and no
/// adjustment; an out-of-gas rejection surfaces to the caller as an error.
pub fn estimate_fee(gas_limit: u64, gas_price: f64, denom: &str) -> Result<Fee, ClientError> {
    let denom: Denom = denom.parse().map_err(|_| ClientError::Denom {
        name: denom.to_string(),
    })?;

    let amount = Coin {
        denom,
        amount: ((gas_limit as f64 * gas_price).ceil() as u64).into(),
    };

    Ok(Fee::from_amount_and_gas(amount, gas_limit))
}

#[cfg(test)]
mod tests {
    use super::{
        estimate_fee, EXECUTE_GAS_LIMIT, INSTANTIATE_GAS_LIMIT, STORE_CODE_GAS_LIMIT,
    };
    use crate::client::error::ClientError;
    use assert_matches::assert_matches;

    #[test]
    fn fee_is_gas_limit_times_price() {
        let fee = estimate_fee(100, 0.25, "uaura").unwrap();

        assert_eq!(fee.amount.len(), 1);
        assert_eq!(fee.amount[0].amount, 25u64.into());
        assert_eq!(fee.amount[0].denom.to_string(), "uaura");
        assert_eq!(fee.gas_limit, 100u64.into());
    }

    #[test]
    fn fractional_fees_round_up() {
        let fee = estimate_fee(3, 0.5, "uaura").unwrap();
        assert_eq!(fee.amount[0].amount, 2u64.into());

        let fee = estimate_fee(1_000, 1.0, "ujuno").unwrap();
        assert_eq!(fee.amount[0].amount, 1_000u64.into());
        assert_eq!(fee.amount[0].denom.to_string(), "ujuno");
    }

    #[test]
    fn invalid_denom_is_rejected() {
        assert_matches!(estimate_fee(100, 0.25, ""), Err(ClientError::Denom { .. }));
    }

    #[test]
    fn store_default_exceeds_other_defaults() {
        assert!(STORE_CODE_GAS_LIMIT > INSTANTIATE_GAS_LIMIT);
        assert!(STORE_CODE_GAS_LIMIT > EXECUTE_GAS_LIMIT);
    }
}
