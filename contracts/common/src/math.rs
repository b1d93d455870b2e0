//! Mathematical Utilities for the Staker Protocol
//!
//! Safe integer math for reward splitting and per-checkpoint accrual.
//! All intermediates widen to u128 and every step is checked.

use crate::errors::{StakerError, StakerResult};

/// Split an era's release amount into a fixed per-interval reward
///
/// `interval_reward = release_amount / num_intervals`, truncating. The
/// remainder is returned explicitly so the caller can record it instead
/// of dropping it.
///
/// # Returns
/// `(interval_reward, num_intervals, dust)`
pub fn split_release(
    release_amount: u64,
    duration_secs: u64,
    interval_secs: u64,
) -> StakerResult<(u64, u64, u64)> {
    if interval_secs == 0 {
        return Err(StakerError::DivisionByZero);
    }
    let num_intervals = duration_secs / interval_secs;
    if num_intervals == 0 {
        return Err(StakerError::DivisionByZero);
    }

    let interval_reward = release_amount / num_intervals;
    let dust = release_amount - interval_reward * num_intervals;
    Ok((interval_reward, num_intervals, dust))
}

/// Whole reward intervals elapsed between two timestamps
///
/// Saturates to zero if `to < from` - the clock source is monotonic, so
/// that only happens with a stale caller timestamp.
pub fn intervals_elapsed(from: u64, to: u64, interval_secs: u64) -> StakerResult<u64> {
    if interval_secs == 0 {
        return Err(StakerError::DivisionByZero);
    }
    Ok(to.saturating_sub(from) / interval_secs)
}

/// Reward owed to one participant for one checkpoint
///
/// `interval_reward * stake / total_staked`, scaled by the number of
/// intervals the checkpoint covers. A zero stake earns nothing; a zero
/// total with a positive stake is a ledger corruption and surfaces as
/// `DivisionByZero` rather than being papered over.
pub fn checkpoint_reward(
    interval_reward: u64,
    stake: u64,
    total_staked: u64,
    intervals: u64,
) -> StakerResult<u64> {
    if stake == 0 || intervals == 0 || interval_reward == 0 {
        return Ok(0);
    }
    if total_staked == 0 {
        return Err(StakerError::DivisionByZero);
    }

    let reward = (interval_reward as u128)
        .checked_mul(stake as u128)
        .ok_or(StakerError::Overflow)?
        .checked_mul(intervals as u128)
        .ok_or(StakerError::Overflow)?
        .checked_div(total_staked as u128)
        .ok_or(StakerError::DivisionByZero)?;

    u64::try_from(reward).map_err(|_| StakerError::Overflow)
}
