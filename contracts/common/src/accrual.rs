//! Reward Accrual
//!
//! The read side of the engine: walk the unprocessed slice of one
//! participant's stake history against the checkpoint segment it
//! overlaps and compute newly accrued reward.
//!
//! ## Segment partition
//!
//! Consecutive entries `(a, b)` bound the half-open checkpoint range
//! `[a.checkpoint_index, b.checkpoint_index)`, charged at `a`'s stake.
//! Ranges of consecutive pairs tile the log exactly, so a checkpoint is
//! charged to a participant at most once and every checkpoint is charged
//! to precisely the participants staked while it was live.
//!
//! The segment past the newest entry stays open - it is paid only when a
//! later entry bounds it. Mutating operations pass the entry they are
//! about to append as `closing`, which pays the open segment through the
//! present; a standalone settlement walks existing pairs only, making it
//! idempotent.
//!
//! The walk is bounded by the participant's own entry count plus the
//! checkpoints their stake spans; it never scans other participants or
//! per-granule time.

use crate::errors::{StakerError, StakerResult};
use crate::checkpoint::CheckPoint;
use crate::math::{checkpoint_reward, intervals_elapsed};
use crate::user_ledger::{UserStakeEntry, UserState};

/// Outcome of a settlement computation
///
/// Pure data: committed to the participant's [`UserState`] only after
/// the surrounding operation clears its custody calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// New value for `last_settled_entry`
    pub cursor: u64,
    /// Reward accrued by this settlement, to be added to the bank
    pub accrued: u64,
}

/// Walk unsettled history and compute newly accrued reward
///
/// * `entries` - the participant's full recorded history
/// * `closing` - the entry the in-flight operation is about to append,
///   if any; it bounds (and thereby pays) the open segment
/// * `checkpoints` - the checkpoint view the walk runs against; for a
///   mutating operation this is the post-delta preview
/// * `from` - the participant's current settlement cursor
pub fn compute_settlement(
    entries: &[UserStakeEntry],
    closing: Option<&UserStakeEntry>,
    checkpoints: &[CheckPoint],
    from: u64,
    interval_reward: u64,
) -> StakerResult<Settlement> {
    let cursor = match closing {
        // the closing entry will land at index `entries.len()`
        Some(_) => entries.len() as u64,
        None => (entries.len() as u64).saturating_sub(1),
    };

    let mut accrued: u64 = 0;
    let start = (from as usize).min(entries.len());

    for i in start..entries.len() {
        let entry = &entries[i];
        let upper = if i + 1 < entries.len() {
            entries[i + 1].checkpoint_index
        } else {
            match closing {
                Some(c) => c.checkpoint_index,
                // newest entry's segment stays open
                None => break,
            }
        };

        accrued = accrued
            .checked_add(segment_reward(entry, upper, checkpoints, interval_reward)?)
            .ok_or(StakerError::Overflow)?;
    }

    Ok(Settlement { cursor, accrued })
}

/// Reward for one entry's segment `[entry.checkpoint_index, upper)`
fn segment_reward(
    entry: &UserStakeEntry,
    upper: u64,
    checkpoints: &[CheckPoint],
    interval_reward: u64,
) -> StakerResult<u64> {
    let mut reward: u64 = 0;
    for j in entry.checkpoint_index..upper {
        let checkpoint = checkpoints
            .get(j as usize)
            .ok_or(StakerError::CheckpointOutOfRange {
                index: j,
                len: checkpoints.len() as u64,
            })?;
        let term = checkpoint_reward(
            interval_reward,
            entry.total_staked,
            checkpoint.total_staked,
            checkpoint.intervals_to_next,
        )?;
        reward = reward.checked_add(term).ok_or(StakerError::Overflow)?;
    }
    Ok(reward)
}

/// Bank value after applying a settlement
pub fn banked_after(state: &UserState, settlement: &Settlement) -> StakerResult<u64> {
    state
        .banked_reward
        .checked_add(settlement.accrued)
        .ok_or(StakerError::Overflow)
}

/// Read-only estimate of everything accrued but not yet banked or paid
///
/// Backs the client's "reward since last action" display: banked reward
/// plus unsettled closed segments plus the whole intervals of the open
/// checkpoint that have already elapsed at `now`. The caller clamps
/// `now` to the era's accrual deadline.
pub fn estimate_pending(
    entries: &[UserStakeEntry],
    state: &UserState,
    checkpoints: &[CheckPoint],
    interval_reward: u64,
    interval_secs: u64,
    now: u64,
) -> StakerResult<u64> {
    let mut total = state.banked_reward;
    let last_entry = match entries.last() {
        Some(last) => last,
        None => return Ok(total),
    };
    let open_checkpoint = match checkpoints.last() {
        Some(last) => last,
        None => return Ok(total),
    };

    // settled-cursor onward, closed pairs only
    let pairs = compute_settlement(
        entries,
        None,
        checkpoints,
        state.last_settled_entry,
        interval_reward,
    )?;
    total = total.checked_add(pairs.accrued).ok_or(StakerError::Overflow)?;

    // open segment: closed checkpoints past the newest entry
    let closed_len = (checkpoints.len() as u64).saturating_sub(1);
    if last_entry.checkpoint_index < closed_len {
        let tail = segment_reward(last_entry, closed_len, checkpoints, interval_reward)?;
        total = total.checked_add(tail).ok_or(StakerError::Overflow)?;
    }

    // elapsed part of the open checkpoint
    let elapsed = intervals_elapsed(open_checkpoint.blocktime, now, interval_secs)?;
    let open = checkpoint_reward(
        interval_reward,
        last_entry.total_staked,
        open_checkpoint.total_staked,
        elapsed,
    )?;
    total.checked_add(open).ok_or(StakerError::Overflow)
}
