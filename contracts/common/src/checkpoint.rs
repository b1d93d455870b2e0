//! Checkpoint Log
//!
//! The globally shared, append-only sequence of total-stake snapshots,
//! run-length compressed over idle reward intervals.
//!
//! ## Compression invariant
//!
//! If no participant changes stake for `k` intervals, the log gains one
//! checkpoint, not `k`: the gap is folded backward onto the checkpoint
//! that was live during it via `intervals_to_next`. The sum of
//! `intervals_to_next` over all closed checkpoints therefore equals the
//! number of whole intervals elapsed since era start.
//!
//! Mutations are planned as a pure [`CheckpointDelta`] first and applied
//! only after external custody calls succeed, so a failed transfer never
//! leaves the log inconsistent with actual balances.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::errors::StakerResult;
use crate::math::intervals_elapsed;

/// A global snapshot of total staked collateral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct CheckPoint {
    /// Timestamp at which this snapshot's interval began
    pub blocktime: u64,
    /// Cumulative collateral staked across all participants
    pub total_staked: u64,
    /// Reward intervals this snapshot covers before the next recorded
    /// change (>= 1; the final checkpoint's value is provisional until a
    /// later change closes it)
    pub intervals_to_next: u64,
}

/// Planned mutation of the checkpoint log
///
/// Computed without touching the log, committed with
/// [`CheckpointLog::apply`] once the operation is past its fallible
/// custody calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckpointDelta {
    /// First checkpoint of a freshly activated era
    Seed { checkpoint: CheckPoint },
    /// Change within the same interval as the latest checkpoint: collapse
    /// to one snapshot of the interval's ending state
    Overwrite { total_staked: u64 },
    /// One or more intervals elapsed: append a new checkpoint and, for a
    /// multi-interval gap, fold the gap onto the previous checkpoint
    Append {
        checkpoint: CheckPoint,
        extend_prev_to: Option<u64>,
    },
}

/// Append-only, index-addressed sequence of checkpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct CheckpointLog {
    entries: Vec<CheckPoint>,
}

impl CheckpointLog {
    /// Create an empty log (seeded on era activation)
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Read-only ordered view of all checkpoints
    pub fn entries(&self) -> &[CheckPoint] {
        &self.entries
    }

    /// Number of checkpoints recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the log has been seeded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest checkpoint, if any
    pub fn last(&self) -> Option<&CheckPoint> {
        self.entries.last()
    }

    /// Current global total staked (0 before the first stake)
    pub fn total_staked(&self) -> u64 {
        self.entries.last().map(|c| c.total_staked).unwrap_or(0)
    }

    /// Plan the log mutation for a stake change at `now`
    ///
    /// Pure: inspects the latest checkpoint and classifies the change as
    /// seed, same-interval overwrite, or append-with-gap-fold.
    pub fn plan(
        &self,
        now: u64,
        new_total_staked: u64,
        interval_secs: u64,
    ) -> StakerResult<CheckpointDelta> {
        let last = match self.entries.last() {
            Some(last) => last,
            None => {
                return Ok(CheckpointDelta::Seed {
                    checkpoint: CheckPoint {
                        blocktime: now,
                        total_staked: new_total_staked,
                        intervals_to_next: 1,
                    },
                })
            }
        };

        let elapsed = intervals_elapsed(last.blocktime, now, interval_secs)?;
        if elapsed == 0 {
            return Ok(CheckpointDelta::Overwrite {
                total_staked: new_total_staked,
            });
        }

        // New checkpoint lands on the interval boundary, not on `now`
        let blocktime = last.blocktime + elapsed * interval_secs;
        Ok(CheckpointDelta::Append {
            checkpoint: CheckPoint {
                blocktime,
                total_staked: new_total_staked,
                intervals_to_next: 1,
            },
            extend_prev_to: if elapsed > 1 { Some(elapsed) } else { None },
        })
    }

    /// Index of the checkpoint that will be current once `delta` applies
    pub fn planned_index(&self, delta: &CheckpointDelta) -> u64 {
        match delta {
            CheckpointDelta::Seed { .. } => 0,
            CheckpointDelta::Overwrite { .. } => (self.entries.len() as u64).saturating_sub(1),
            CheckpointDelta::Append { .. } => self.entries.len() as u64,
        }
    }

    /// The log as it will look once `delta` applies
    ///
    /// Used to run settlement against the post-change view before any
    /// state is committed.
    pub fn preview(&self, delta: &CheckpointDelta) -> Vec<CheckPoint> {
        let mut view = self.entries.clone();
        Self::apply_to(&mut view, delta);
        view
    }

    /// Commit a planned mutation
    pub fn apply(&mut self, delta: &CheckpointDelta) {
        Self::apply_to(&mut self.entries, delta);
    }

    fn apply_to(entries: &mut Vec<CheckPoint>, delta: &CheckpointDelta) {
        match delta {
            CheckpointDelta::Seed { checkpoint } => entries.push(*checkpoint),
            CheckpointDelta::Overwrite { total_staked } => {
                if let Some(last) = entries.last_mut() {
                    last.total_staked = *total_staked;
                }
            }
            CheckpointDelta::Append {
                checkpoint,
                extend_prev_to,
            } => {
                if let Some(k) = extend_prev_to {
                    if let Some(last) = entries.last_mut() {
                        last.intervals_to_next = *k;
                    }
                }
                entries.push(*checkpoint);
            }
        }
    }

    /// Sum of `intervals_to_next` over all closed checkpoints
    ///
    /// Excludes the final checkpoint, whose count is provisional until a
    /// later stake change closes it.
    pub fn closed_intervals(&self) -> u64 {
        if self.entries.len() < 2 {
            return 0;
        }
        self.entries[..self.entries.len() - 1]
            .iter()
            .map(|c| c.intervals_to_next)
            .sum()
    }
}
