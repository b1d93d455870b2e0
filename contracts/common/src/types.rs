//! Core Types for the Staker Protocol
//!
//! The era is the top-level object: one complete run of the staking
//! program, from configuration to reward exhaustion. Checkpoint and
//! user-ledger types live next to their logic modules.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for addresses (32-byte hash)
pub type Address = [u8; 32];

/// Type alias for era identifiers
pub type EraId = [u8; 32];

// ============ Era Types ============

/// Lifecycle status of the emission era
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum EmissionStatus {
    /// No era has been created yet
    #[default]
    NotStarted,
    /// Era created and funded, waiting for the first stake
    Initialized,
    /// Clock is running, rewards accrue per interval
    EraActive,
    /// Era duration has elapsed - only unstake/claim remain
    EraEnded,
}

/// One complete run of the staking program
///
/// `start_time` and `end_time` stay zero until the first stake anchors
/// the era to the wall clock (Initialized -> EraActive).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Era {
    /// Unique identifier for this era
    pub id: EraId,
    /// Current lifecycle status
    pub status: EmissionStatus,
    /// Total era length in seconds, fixed at creation
    pub era_duration: u64,
    /// Total reward pool committed at creation
    pub release_amount: u64,
    /// Length of one reward interval in seconds
    pub reward_interval_secs: u64,
    /// Reward released per interval, fixed at creation
    pub interval_reward: u64,
    /// Remainder of `release_amount` that integer division left
    /// undistributable - tracked so it is never silently dropped
    pub reward_dust: u64,
    /// Timestamp of the first stake (0 until activation)
    pub start_time: u64,
    /// `start_time + era_duration` (0 until activation)
    pub end_time: u64,
    /// Timestamp when the era was created
    pub created_at: u64,
}

impl Era {
    /// Returns true if the era is currently accruing rewards
    pub fn is_active(&self) -> bool {
        self.status == EmissionStatus::EraActive
    }

    /// Total number of whole reward intervals in the era
    pub fn num_intervals(&self) -> u64 {
        if self.reward_interval_secs == 0 {
            return 0;
        }
        self.era_duration / self.reward_interval_secs
    }

    /// Clamp a timestamp to the accrual window
    ///
    /// Activity after `end_time` must not extend reward accrual past the
    /// end of the era.
    pub fn accrual_deadline(&self, now: u64) -> u64 {
        if self.end_time > 0 {
            now.min(self.end_time)
        } else {
            now
        }
    }
}

/// Generate a deterministic era ID
pub fn generate_era_id(admin: &Address, created_at: u64, release_amount: u64) -> EraId {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(admin);
    hasher.update(created_at.to_le_bytes());
    hasher.update(release_amount.to_le_bytes());
    let result = hasher.finalize();
    let mut id = [0u8; 32];
    id.copy_from_slice(&result);
    id
}
