//! Staker Contract Surface
//!
//! Wires the era state machine, checkpoint log, user ledger and accrual
//! walk to the external token custody adapters, and exposes the mutating
//! entry points and read queries.
//!
//! ## Commit discipline
//!
//! Every entry point runs in three phases: classify and compute (pure,
//! against previews of the post-change state), call custody (fallible),
//! then commit ledger state. A failed transfer therefore aborts with no
//! checkpoint, user-ledger or cursor mutation. Two exceptions: the lazy
//! EraActive -> EraEnded transition commits as soon as any activity
//! discovers it, even when that activity itself is rejected; and unstake
//! commits its settlement (bank zeroed, cursor advanced) the moment the
//! reward transfer succeeds, so a failure of the later collateral return
//! can never pay the same bank twice.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use staker_common::{
    accrual::{banked_after, compute_settlement, estimate_pending, Settlement},
    checkpoint::{CheckPoint, CheckpointLog},
    era::{apply_tick, create_era, tick_era, CreateEraRequest, EraTick},
    events::{EventLog, StakerEvent},
    user_ledger::{UserLedger, UserStakeEntry, UserState},
    Address, EmissionStatus, Era, EraId, StakerError, StakerResult,
};

use crate::adapter::TokenLedger;

/// Static configuration of one staker deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct StakerConfig {
    /// Admin address - the only caller allowed to create an era
    pub admin: Address,
    /// The engine's own custody account on both token ledgers
    pub custody: Address,
    /// Collateral (LP) token identifier
    pub collateral_token: Address,
    /// Reward token identifier
    pub reward_token: Address,
}

/// The staking engine
///
/// Single-writer: the host platform serializes calls, so every entry
/// point sees and mutates state alone.
#[derive(Debug)]
pub struct Staker<C: TokenLedger, R: TokenLedger> {
    config: StakerConfig,
    era: Era,
    checkpoints: CheckpointLog,
    users: UserLedger,
    events: EventLog,
    collateral: C,
    reward: R,
}

impl<C: TokenLedger, R: TokenLedger> Staker<C, R> {
    /// Create an engine with no era configured
    pub fn new(config: StakerConfig, collateral: C, reward: R) -> Self {
        Self {
            config,
            era: Era::default(),
            checkpoints: CheckpointLog::new(),
            users: UserLedger::new(),
            events: EventLog::new(),
            collateral,
            reward,
        }
    }

    // ========================================================================
    // Mutating Entry Points
    // ========================================================================

    /// Create and fund a new era (admin only)
    ///
    /// Pulls `release_amount` of the reward token from the caller into
    /// custody; the clock does not start until the first stake.
    pub fn create_era(
        &mut self,
        caller: &Address,
        duration_days: u64,
        release_amount: u64,
        interval_hours: u64,
        now: u64,
    ) -> StakerResult<EraId> {
        if caller != &self.config.admin {
            return Err(StakerError::AdminOnly);
        }

        let request = CreateEraRequest {
            admin: *caller,
            duration_days,
            release_amount,
            interval_hours,
            now,
        };
        let era = create_era(&request, self.era.status)?;

        self.reward
            .transfer_from(caller, &self.config.custody, release_amount)?;

        self.events.emit(StakerEvent::EraCreated {
            era_id: era.id,
            era_duration: era.era_duration,
            release_amount: era.release_amount,
            interval_reward: era.interval_reward,
            reward_interval_secs: era.reward_interval_secs,
            created_at: now,
        });
        self.era = era;
        Ok(self.era.id)
    }

    /// Lock `amount` of collateral for `owner`
    ///
    /// The first stake after era creation anchors the era to the clock.
    pub fn stake(&mut self, owner: &Address, amount: u64, now: u64) -> StakerResult<()> {
        if amount == 0 {
            return Err(StakerError::ZeroAmount);
        }

        let tick = tick_era(&self.era, now)?;
        if tick == EraTick::Ended {
            // the transition commits; the stake that discovered it does not
            self.commit_era_end(now);
            return Err(StakerError::EraEnded);
        }

        let new_global = self
            .checkpoints
            .total_staked()
            .checked_add(amount)
            .ok_or(StakerError::Overflow)?;
        let new_stake = self
            .users
            .current_stake(owner)
            .checked_add(amount)
            .ok_or(StakerError::Overflow)?;

        let (closing, delta, settlement, new_banked) =
            self.prepare_change(owner, new_global, new_stake, now)?;

        // custody before any ledger commit
        self.collateral
            .transfer_from(owner, &self.config.custody, amount)?;

        if tick == EraTick::Activated {
            apply_tick(&mut self.era, tick, now);
            self.events.emit(StakerEvent::EraActivated {
                era_id: self.era.id,
                start_time: self.era.start_time,
                end_time: self.era.end_time,
            });
        }
        self.commit_change(owner, &closing, &delta, &settlement, new_banked);
        self.events.emit(StakerEvent::Staked {
            owner: *owner,
            amount,
            new_stake,
            total_staked: new_global,
            block_time: now,
        });
        Ok(())
    }

    /// Return `amount` of collateral to `owner` and pay out all accrued
    /// reward
    ///
    /// Allowed after the era has ended (that is how positions exit);
    /// accrual is clamped to `end_time`. Returns the reward paid.
    ///
    /// The payout is recorded against the bank as soon as the reward
    /// transfer succeeds; if the collateral return then fails, the stake
    /// stays intact and a retry pays only reward accrued since.
    pub fn unstake(&mut self, owner: &Address, amount: u64, now: u64) -> StakerResult<u64> {
        if amount == 0 {
            return Err(StakerError::ZeroAmount);
        }
        let current = match self.users.account(owner) {
            Some(account) => account.current_stake(),
            None => return Err(StakerError::NoStakeRecord { owner: *owner }),
        };
        if amount > current {
            return Err(StakerError::InsufficientStake {
                available: current,
                requested: amount,
            });
        }

        let now = self.tick_for_exit(now)?;

        let new_global = self
            .checkpoints
            .total_staked()
            .checked_sub(amount)
            .ok_or(StakerError::Underflow)?;
        let new_stake = current - amount;

        let (closing, delta, settlement, payout) =
            self.prepare_change(owner, new_global, new_stake, now)?;

        if payout > 0 {
            self.reward.transfer(owner, payout)?;
            // the reward has left custody: zero the bank and advance the
            // cursor now, so an abort of the collateral return below
            // cannot pay the same bank twice on retry
            if let Some(account) = self.users.account_mut(owner) {
                account.state = UserState {
                    last_settled_entry: settlement.cursor,
                    banked_reward: 0,
                };
            }
            self.events.emit(StakerEvent::RewardPaid {
                owner: *owner,
                amount: payout,
                block_time: now,
            });
        }
        self.collateral.transfer(owner, amount)?;

        self.commit_change(owner, &closing, &delta, &settlement, 0);
        self.events.emit(StakerEvent::Unstaked {
            owner: *owner,
            amount,
            new_stake,
            total_staked: new_global,
            block_time: now,
        });
        Ok(payout)
    }

    /// Pay out all accrued reward without touching the stake
    pub fn claim(&mut self, owner: &Address, now: u64) -> StakerResult<u64> {
        let current = match self.users.account(owner) {
            Some(account) => account.current_stake(),
            None => return Err(StakerError::NoStakeRecord { owner: *owner }),
        };

        let now = self.tick_for_exit(now)?;

        let global = self.checkpoints.total_staked();
        let (closing, delta, settlement, payout) =
            self.prepare_change(owner, global, current, now)?;
        if payout == 0 {
            return Err(StakerError::NoRewardsToClaim);
        }

        self.reward.transfer(owner, payout)?;

        self.commit_change(owner, &closing, &delta, &settlement, 0);
        self.events.emit(StakerEvent::RewardPaid {
            owner: *owner,
            amount: payout,
            block_time: now,
        });
        Ok(payout)
    }

    /// Advance the settlement cursor and bank newly closed history
    ///
    /// Side effects are limited to the caller's own cursor and bank; the
    /// bank is not zeroed, so repeated calls are idempotent. Returns the
    /// banked reward after settlement.
    pub fn settle(&mut self, owner: &Address, now: u64) -> StakerResult<u64> {
        let state = match self.users.account(owner) {
            Some(account) => account.state,
            None => return Err(StakerError::NoStakeRecord { owner: *owner }),
        };

        let _ = self.tick_for_exit(now)?;

        let settlement = compute_settlement(
            self.users.segment(owner, 0),
            None,
            self.checkpoints.entries(),
            state.last_settled_entry,
            self.era.interval_reward,
        )?;
        let new_banked = banked_after(&state, &settlement)?;

        if let Some(account) = self.users.account_mut(owner) {
            account.state = UserState {
                last_settled_entry: settlement.cursor,
                banked_reward: new_banked,
            };
        }
        Ok(new_banked)
    }

    // ========================================================================
    // Read Queries
    // ========================================================================

    /// A participant's full stake-change history
    pub fn user_record(&self, owner: &Address) -> &[UserStakeEntry] {
        self.users.segment(owner, 0)
    }

    /// The full checkpoint log
    pub fn checkpoint_record(&self) -> &[CheckPoint] {
        self.checkpoints.entries()
    }

    /// A participant's settlement cursor and banked reward
    pub fn state_of(&self, owner: &Address) -> Option<UserState> {
        self.users.account(owner).map(|a| a.state)
    }

    /// A participant's current stake
    pub fn current_stake(&self, owner: &Address) -> u64 {
        self.users.current_stake(owner)
    }

    /// Everything accrued but not yet paid out, estimated at `now`
    ///
    /// Read-only; includes whole intervals already elapsed inside the
    /// open checkpoint. Zero for unknown participants.
    pub fn pending_reward(&self, owner: &Address, now: u64) -> StakerResult<u64> {
        let account = match self.users.account(owner) {
            Some(account) => account,
            None => return Ok(0),
        };
        estimate_pending(
            &account.entries,
            &account.state,
            self.checkpoints.entries(),
            self.era.interval_reward,
            self.era.reward_interval_secs,
            self.era.accrual_deadline(now),
        )
    }

    /// Current global total staked
    pub fn total_staked(&self) -> u64 {
        self.checkpoints.total_staked()
    }

    /// Reward released per interval
    pub fn interval_reward(&self) -> u64 {
        self.era.interval_reward
    }

    /// Current era lifecycle status
    pub fn emission_status(&self) -> EmissionStatus {
        self.era.status
    }

    /// Era length in seconds
    pub fn era_duration(&self) -> u64 {
        self.era.era_duration
    }

    /// Timestamp of the first stake (0 until activation)
    pub fn start_time(&self) -> u64 {
        self.era.start_time
    }

    /// Timestamp the era stops accruing (0 until activation)
    pub fn end_time(&self) -> u64 {
        self.era.end_time
    }

    /// Total reward pool committed at creation
    pub fn release_amount(&self) -> u64 {
        self.era.release_amount
    }

    /// Release remainder that integer division made undistributable
    pub fn reward_dust(&self) -> u64 {
        self.era.reward_dust
    }

    /// Identifier of the current era
    pub fn era_id(&self) -> EraId {
        self.era.id
    }

    /// Engine configuration
    pub fn config(&self) -> &StakerConfig {
        &self.config
    }

    /// Events emitted so far
    pub fn events(&self) -> &[StakerEvent] {
        self.events.events()
    }

    /// Number of participants with a stake record
    pub fn participant_count(&self) -> usize {
        self.users.participant_count()
    }

    /// Collateral ledger adapter
    pub fn collateral(&self) -> &C {
        &self.collateral
    }

    /// Mutable collateral ledger adapter (host wiring and tests)
    pub fn collateral_mut(&mut self) -> &mut C {
        &mut self.collateral
    }

    /// Reward ledger adapter
    pub fn reward(&self) -> &R {
        &self.reward
    }

    /// Mutable reward ledger adapter (host wiring and tests)
    pub fn reward_mut(&mut self) -> &mut R {
        &mut self.reward
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Compute the full pure change set for a stake-total change
    ///
    /// Returns the entry about to be appended, the checkpoint delta, the
    /// settlement (run against the post-delta view, so it pays through
    /// the closing entry) and the resulting bank value.
    fn prepare_change(
        &self,
        owner: &Address,
        new_global: u64,
        new_stake: u64,
        now: u64,
    ) -> StakerResult<(UserStakeEntry, staker_common::CheckpointDelta, Settlement, u64)> {
        let delta = self
            .checkpoints
            .plan(now, new_global, self.era.reward_interval_secs)?;
        let view = self.checkpoints.preview(&delta);
        let closing = UserStakeEntry {
            checkpoint_index: self.checkpoints.planned_index(&delta),
            total_staked: new_stake,
        };

        let state = self
            .users
            .account(owner)
            .map(|a| a.state)
            .unwrap_or_default();
        let settlement = compute_settlement(
            self.users.segment(owner, 0),
            Some(&closing),
            &view,
            state.last_settled_entry,
            self.era.interval_reward,
        )?;
        let new_banked = banked_after(&state, &settlement)?;

        Ok((closing, delta, settlement, new_banked))
    }

    /// Commit a prepared change set after custody has succeeded
    fn commit_change(
        &mut self,
        owner: &Address,
        closing: &UserStakeEntry,
        delta: &staker_common::CheckpointDelta,
        settlement: &Settlement,
        banked_reward: u64,
    ) {
        self.checkpoints.apply(delta);
        self.users
            .append(owner, closing.checkpoint_index, closing.total_staked);
        if let Some(account) = self.users.account_mut(owner) {
            account.state = UserState {
                last_settled_entry: settlement.cursor,
                banked_reward,
            };
        }
    }

    /// Era tick for operations that survive the era's end
    ///
    /// Commits a discovered end transition and returns the timestamp
    /// clamped to the accrual deadline. Rejects eras that never started;
    /// a stake record cannot predate activation, so `Activated` here
    /// means the ledgers are out of sync and is rejected too.
    fn tick_for_exit(&mut self, now: u64) -> StakerResult<u64> {
        match tick_era(&self.era, now)? {
            EraTick::Activated => Err(StakerError::EraNotStarted),
            EraTick::Active => Ok(now),
            EraTick::Ended => {
                self.commit_era_end(now);
                Ok(self.era.accrual_deadline(now))
            }
        }
    }

    /// Flip to EraEnded once, emitting the event on the first discovery
    fn commit_era_end(&mut self, now: u64) {
        if self.era.status != EmissionStatus::EraEnded {
            apply_tick(&mut self.era, EraTick::Ended, now);
            self.events.emit(StakerEvent::EraEnded {
                era_id: self.era.id,
                block_time: now,
            });
        }
    }
}
