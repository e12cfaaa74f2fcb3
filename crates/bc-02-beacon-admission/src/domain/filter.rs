//! # Beacon Fee Decorator
//!
//! The admission filter. A linear guard sequence, short-circuiting on the
//! first failure:
//!
//! ```text
//! classify ──(no beacon msgs)──→ pass
//!    │
//!    ↓
//! exact fee        (Check/ReCheck only)
//!    ↓
//! solvency         (every phase, with locked-funds look-ahead)
//!    ↓
//! capacity         (every phase, against committed limits)
//!    ↓
//! pass
//! ```
//!
//! Capacity is checked after solvency and before any later fee deduction,
//! so a transaction the handler would reject is never charged.

use crate::domain::errors::AdmissionError;
use crate::domain::fees::BeaconMsgSummary;
use crate::ports::inbound::AnteHandler;
use crate::ports::outbound::{AccountOracle, BeaconView, LockedFundsOracle};
use bc_01_beacon_ledger::Params;
use shared_types::{format_coin_list, Coins, ExecContext, Tx};
use tracing::debug;

/// Pipeline stage enforcing the beacon fee schedule and capacity cap.
pub struct BeaconFeeDecorator<'a> {
    beacons: &'a dyn BeaconView,
    accounts: &'a dyn AccountOracle,
    locked_funds: &'a dyn LockedFundsOracle,
}

impl<'a> BeaconFeeDecorator<'a> {
    pub fn new(
        beacons: &'a dyn BeaconView,
        accounts: &'a dyn AccountOracle,
        locked_funds: &'a dyn LockedFundsOracle,
    ) -> Self {
        Self {
            beacons,
            accounts,
            locked_funds,
        }
    }

    fn check(&self, ctx: &ExecContext, tx: &Tx) -> Result<(), AdmissionError> {
        let summary = BeaconMsgSummary::classify(tx);
        if summary.is_empty() {
            return Ok(());
        }

        let params = self.beacons.params()?;
        if ctx.mode.is_check() {
            check_exact_fee(&params, &summary, tx)?;
        }
        self.check_solvency(tx)?;
        self.check_capacity(&summary)
    }

    fn check_solvency(&self, tx: &Tx) -> Result<(), AdmissionError> {
        let payer = tx.fee_payer().ok_or(AdmissionError::UnknownFeePayer)?;
        let account = self
            .accounts
            .account(&payer)?
            .ok_or(AdmissionError::UnknownFeePayer)?;
        let fee = Coins::from_coins(&tx.fee).map_err(AdmissionError::InvalidFee)?;

        let unlocking = match self.locked_funds.locked_for(&payer)? {
            Some(coin) => Coins::from_coin(coin),
            None => Coins::new(),
        };
        let total = account.balances.add(&unlocking);
        let spendable = account.spendable().add(&unlocking);

        if total.checked_sub(&fee).is_none() || spendable.checked_sub(&fee).is_none() {
            return Err(AdmissionError::InsufficientFunds {
                payer,
                required: fee.to_string(),
                spendable: spendable.to_string(),
                total: total.to_string(),
            });
        }
        Ok(())
    }

    fn check_capacity(&self, summary: &BeaconMsgSummary<'_>) -> Result<(), AdmissionError> {
        for (&beacon_id, &requested) in &summary.purchases {
            if requested == 0 {
                continue;
            }
            let max_purchasable = self.beacons.max_purchasable(beacon_id)?;
            if requested > max_purchasable {
                return Err(AdmissionError::ExceedsMaxStorage {
                    beacon_id,
                    requested,
                    max_purchasable,
                });
            }
        }
        Ok(())
    }
}

/// The submitted amount in the params denom must equal the expected fee.
/// Other denominations alongside it are tolerated.
fn check_exact_fee(
    params: &Params,
    summary: &BeaconMsgSummary<'_>,
    tx: &Tx,
) -> Result<(), AdmissionError> {
    let submitted = tx
        .fee
        .iter()
        .find(|coin| coin.denom == params.denom)
        .map(|coin| coin.amount)
        .ok_or_else(|| AdmissionError::IncorrectFeeDenomination {
            required: params.denom.clone(),
            submitted: format_coin_list(&tx.fee),
        })?;

    let expected = summary.expected_fee(params);
    if submitted < expected {
        return Err(AdmissionError::InsufficientFee {
            denom: params.denom.clone(),
            expected,
            submitted,
        });
    }
    if submitted > expected {
        return Err(AdmissionError::ExcessiveFee {
            denom: params.denom.clone(),
            expected,
            submitted,
        });
    }
    Ok(())
}

impl AnteHandler for BeaconFeeDecorator<'_> {
    fn ante_handle(&self, ctx: &ExecContext, tx: &Tx) -> Result<(), AdmissionError> {
        self.check(ctx, tx).map_err(|err| {
            debug!("[bc-02] rejected {:?} tx: {}", ctx.mode, err);
            err
        })
    }
}
