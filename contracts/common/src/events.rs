//! Protocol Events
//!
//! Events are emitted during entry-point execution and can be indexed
//! off-chain for building UIs, analytics, and notifications.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::types::{Address, EraId};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Era Events (0x01 - 0x0F)
    EraCreated = 0x01,
    EraActivated = 0x02,
    EraEnded = 0x03,

    // Staking Events (0x10 - 0x1F)
    Staked = 0x10,
    Unstaked = 0x11,
    RewardPaid = 0x12,
}

/// Main event enum containing all protocol events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum StakerEvent {
    // ============ Era Events ============

    /// Emitted when the admin creates and funds a new era
    EraCreated {
        era_id: EraId,
        era_duration: u64,
        release_amount: u64,
        interval_reward: u64,
        reward_interval_secs: u64,
        created_at: u64,
    },

    /// Emitted when the first stake anchors the era to the clock
    EraActivated {
        era_id: EraId,
        start_time: u64,
        end_time: u64,
    },

    /// Emitted when activity discovers the era duration has elapsed
    EraEnded {
        era_id: EraId,
        block_time: u64,
    },

    // ============ Staking Events ============

    /// Emitted when a user locks collateral
    Staked {
        owner: Address,
        amount: u64,
        new_stake: u64,
        total_staked: u64,
        block_time: u64,
    },

    /// Emitted when a user withdraws collateral
    Unstaked {
        owner: Address,
        amount: u64,
        new_stake: u64,
        total_staked: u64,
        block_time: u64,
    },

    /// Emitted when accrued reward is transferred out
    RewardPaid {
        owner: Address,
        amount: u64,
        block_time: u64,
    },
}

impl StakerEvent {
    /// Returns the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::EraCreated { .. } => EventType::EraCreated,
            Self::EraActivated { .. } => EventType::EraActivated,
            Self::EraEnded { .. } => EventType::EraEnded,
            Self::Staked { .. } => EventType::Staked,
            Self::Unstaked { .. } => EventType::Unstaked,
            Self::RewardPaid { .. } => EventType::RewardPaid,
        }
    }
}

/// Accumulator for events emitted during one entry-point execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct EventLog {
    events: Vec<StakerEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: StakerEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[StakerEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<StakerEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&StakerEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_and_filter() {
        let mut log = EventLog::new();
        assert!(!log.has_events());

        log.emit(StakerEvent::Staked {
            owner: [1u8; 32],
            amount: 100,
            new_stake: 100,
            total_staked: 100,
            block_time: 1_000,
        });
        log.emit(StakerEvent::RewardPaid {
            owner: [1u8; 32],
            amount: 5,
            block_time: 2_000,
        });

        assert_eq!(log.len(), 2);
        assert_eq!(log.filter_by_type(EventType::Staked).len(), 1);
        assert_eq!(log.filter_by_type(EventType::Unstaked).len(), 0);
    }
}
