//! Era Lifecycle
//!
//! Owns the NotStarted -> Initialized -> EraActive -> EraEnded state
//! machine and the era's time/reward parameters.
//!
//! Activation is lazy: `create_era` funds and configures the era but the
//! wall clock only starts with the first stake. Ending is lazy too: the
//! first activity past `end_time` commits the EraEnded transition even
//! though that activity itself may be rejected, so the next caller
//! observes the ended state.
//!
//! Transitions are split into a pure classification ([`tick_era`]) and a
//! commit ([`apply_tick`]): a stake whose custody transfer fails must not
//! leave a half-activated era behind.

use crate::constants::era as era_config;
use crate::errors::{StakerError, StakerResult};
use crate::math::split_release;
use crate::types::{generate_era_id, Address, EmissionStatus, Era};

/// Request to create and fund a new era
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEraRequest {
    /// Creating admin (reward pool is pulled from this address)
    pub admin: Address,
    /// Era length in whole days; must exceed one day
    pub duration_days: u64,
    /// Total reward pool committed for the era
    pub release_amount: u64,
    /// Reward interval in hours; must divide evenly into 24
    pub interval_hours: u64,
    /// Current timestamp
    pub now: u64,
}

/// Classification of era activity at a given timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraTick {
    /// First stake after creation: this activity starts the clock
    Activated,
    /// Era is running normally
    Active,
    /// Era duration has elapsed (possibly discovered by this activity)
    Ended,
}

/// Validate a create request and build the configured era
///
/// Pure: the caller commits the returned era only after the reward pool
/// transfer succeeds. Rejects any status other than `NotStarted` - the
/// engine runs one era at a time.
pub fn create_era(request: &CreateEraRequest, current_status: EmissionStatus) -> StakerResult<Era> {
    if current_status != EmissionStatus::NotStarted {
        return Err(StakerError::EraAlreadyCreated);
    }
    if request.duration_days <= era_config::MIN_DURATION_DAYS {
        return Err(StakerError::DurationTooShort {
            days: request.duration_days,
        });
    }
    if request.interval_hours > era_config::MAX_INTERVAL_HOURS {
        return Err(StakerError::IntervalTooLong {
            hours: request.interval_hours,
        });
    }
    if request.interval_hours == 0 || era_config::HOURS_PER_DAY % request.interval_hours != 0 {
        return Err(StakerError::IntervalNotFactorOfDay {
            hours: request.interval_hours,
        });
    }
    if request.release_amount == 0 {
        return Err(StakerError::ZeroAmount);
    }

    let era_duration = request
        .duration_days
        .checked_mul(era_config::SECONDS_PER_DAY)
        .ok_or(StakerError::Overflow)?;
    let reward_interval_secs = request.interval_hours * era_config::SECONDS_PER_HOUR;
    let (interval_reward, _num_intervals, reward_dust) =
        split_release(request.release_amount, era_duration, reward_interval_secs)?;

    Ok(Era {
        id: generate_era_id(&request.admin, request.now, request.release_amount),
        status: EmissionStatus::Initialized,
        era_duration,
        release_amount: request.release_amount,
        reward_interval_secs,
        interval_reward,
        reward_dust,
        start_time: 0,
        end_time: 0,
        created_at: request.now,
    })
}

/// Classify activity at `now` without mutating the era
///
/// `NotStarted` is an error - there is nothing to tick. All other states
/// map to an [`EraTick`] the caller decides how to handle: stake rejects
/// `Ended`, unstake and claim proceed with accrual clamped to `end_time`.
pub fn tick_era(era: &Era, now: u64) -> StakerResult<EraTick> {
    match era.status {
        EmissionStatus::NotStarted => Err(StakerError::EraNotStarted),
        EmissionStatus::Initialized => Ok(EraTick::Activated),
        EmissionStatus::EraActive => {
            if now > era.end_time {
                Ok(EraTick::Ended)
            } else {
                Ok(EraTick::Active)
            }
        }
        EmissionStatus::EraEnded => Ok(EraTick::Ended),
    }
}

/// Commit a classified transition
///
/// `Activated` anchors the era to the clock; `Ended` flips the status
/// (idempotent); `Active` is a no-op.
pub fn apply_tick(era: &mut Era, tick: EraTick, now: u64) {
    match tick {
        EraTick::Activated => {
            era.start_time = now;
            era.end_time = now.saturating_add(era.era_duration);
            era.status = EmissionStatus::EraActive;
        }
        EraTick::Ended => {
            era.status = EmissionStatus::EraEnded;
        }
        EraTick::Active => {}
    }
}
