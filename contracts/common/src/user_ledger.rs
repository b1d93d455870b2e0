//! User Ledger
//!
//! Per-participant append-only stake history plus the single mutable
//! settlement cursor. Entries are never edited or removed once written;
//! all reward accounting derives from replaying them against the
//! checkpoint log.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::types::Address;

/// One stake-change event in a participant's history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct UserStakeEntry {
    /// Index into the checkpoint log that was current when this entry
    /// was written
    pub checkpoint_index: u64,
    /// Participant's cumulative stake after the change that produced
    /// this entry
    pub total_staked: u64,
}

/// Per-participant settlement cursor
///
/// Created lazily on first stake, mutated only by that participant's own
/// operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct UserState {
    /// Index into this participant's own entry list marking the oldest
    /// entry not yet fully paid out
    pub last_settled_entry: u64,
    /// Reward computed but not yet transferred, carried across partial
    /// settlements; zeroed only on actual payout
    pub banked_reward: u64,
}

/// One participant's account: history plus cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct UserAccount {
    /// Participant address
    pub owner: Address,
    /// Append-only stake-change history
    pub entries: Vec<UserStakeEntry>,
    /// Settlement cursor and banked reward
    pub state: UserState,
}

impl UserAccount {
    fn new(owner: Address) -> Self {
        Self {
            owner,
            entries: Vec::new(),
            state: UserState::default(),
        }
    }

    /// Participant's current stake (the newest entry's total)
    pub fn current_stake(&self) -> u64 {
        self.entries.last().map(|e| e.total_staked).unwrap_or(0)
    }
}

/// All participant accounts
///
/// Held as a flat list; lookups scan by owner. Operations only ever touch
/// one account, and the accrual walk is bounded by that account's own
/// entry count, never by the participant set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct UserLedger {
    accounts: Vec<UserAccount>,
}

impl UserLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self { accounts: Vec::new() }
    }

    /// Look up a participant's account
    pub fn account(&self, owner: &Address) -> Option<&UserAccount> {
        self.accounts.iter().find(|a| &a.owner == owner)
    }

    /// Mutable account lookup
    pub fn account_mut(&mut self, owner: &Address) -> Option<&mut UserAccount> {
        self.accounts.iter_mut().find(|a| &a.owner == owner)
    }

    /// Account lookup, creating an empty account on first touch
    pub fn account_or_create(&mut self, owner: &Address) -> &mut UserAccount {
        let idx = match self.accounts.iter().position(|a| &a.owner == owner) {
            Some(idx) => idx,
            None => {
                self.accounts.push(UserAccount::new(*owner));
                self.accounts.len() - 1
            }
        };
        &mut self.accounts[idx]
    }

    /// Append one stake-change entry for `owner`
    pub fn append(&mut self, owner: &Address, checkpoint_index: u64, new_total_staked: u64) {
        self.account_or_create(owner).entries.push(UserStakeEntry {
            checkpoint_index,
            total_staked: new_total_staked,
        });
    }

    /// Restartable view of a participant's history from `from` onward
    ///
    /// Empty if the participant has no record or the cursor is past the
    /// end.
    pub fn segment(&self, owner: &Address, from: u64) -> &[UserStakeEntry] {
        match self.account(owner) {
            Some(account) => {
                let from = (from as usize).min(account.entries.len());
                &account.entries[from..]
            }
            None => &[],
        }
    }

    /// Participant's current stake (0 without a record)
    pub fn current_stake(&self, owner: &Address) -> u64 {
        self.account(owner).map(|a| a.current_stake()).unwrap_or(0)
    }

    /// Number of participants with a record
    pub fn participant_count(&self) -> usize {
        self.accounts.len()
    }

    /// All accounts (read-only, for invariant checks and stats)
    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Address {
        [1u8; 32]
    }

    fn bob() -> Address {
        [2u8; 32]
    }

    #[test]
    fn test_lazy_account_creation() {
        let mut ledger = UserLedger::new();
        assert!(ledger.account(&alice()).is_none());
        assert_eq!(ledger.current_stake(&alice()), 0);

        ledger.append(&alice(), 0, 100);
        assert_eq!(ledger.participant_count(), 1);
        assert_eq!(ledger.current_stake(&alice()), 100);
        assert_eq!(ledger.account(&alice()).unwrap().state, UserState::default());
    }

    #[test]
    fn test_entries_are_append_only_history() {
        let mut ledger = UserLedger::new();
        ledger.append(&alice(), 0, 100);
        ledger.append(&alice(), 2, 250);
        ledger.append(&alice(), 5, 50);

        let entries = &ledger.account(&alice()).unwrap().entries;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].checkpoint_index, 2);
        assert_eq!(entries[1].total_staked, 250);
        assert_eq!(ledger.current_stake(&alice()), 50);
    }

    #[test]
    fn test_segment_is_restartable() {
        let mut ledger = UserLedger::new();
        ledger.append(&alice(), 0, 100);
        ledger.append(&alice(), 3, 200);

        assert_eq!(ledger.segment(&alice(), 0).len(), 2);
        assert_eq!(ledger.segment(&alice(), 1).len(), 1);
        assert_eq!(ledger.segment(&alice(), 1)[0].checkpoint_index, 3);
        // repeat reads see the same data
        assert_eq!(ledger.segment(&alice(), 1), ledger.segment(&alice(), 1));
        // out-of-range cursor and unknown owner are both empty
        assert!(ledger.segment(&alice(), 9).is_empty());
        assert!(ledger.segment(&bob(), 0).is_empty());
    }

    #[test]
    fn test_accounts_are_isolated() {
        let mut ledger = UserLedger::new();
        ledger.append(&alice(), 0, 100);
        ledger.append(&bob(), 1, 40);

        assert_eq!(ledger.participant_count(), 2);
        assert_eq!(ledger.current_stake(&alice()), 100);
        assert_eq!(ledger.current_stake(&bob()), 40);
    }
}
