//! Error Types for the Staker Protocol
//!
//! Typed errors with a stable error-code table. Every failure is reported
//! synchronously to the caller; nothing is swallowed or retried inside
//! the engine - retry is always a caller decision.

/// Result type alias for staker operations
pub type StakerResult<T> = Result<T, StakerError>;

/// Main error enum for all staker protocol errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakerError {
    // ============ Era Configuration Errors ============
    /// Era duration must be greater than one day
    DurationTooShort { days: u64 },

    /// Reward interval must be at most one day
    IntervalTooLong { hours: u64 },

    /// Reward interval must divide evenly into 24 hours
    IntervalNotFactorOfDay { hours: u64 },

    /// An era has already been created for this staker
    EraAlreadyCreated,

    // ============ Era Lifecycle Errors ============
    /// Emission era has not started
    EraNotStarted,

    /// Emission era has ended - unstake and claim instead
    EraEnded,

    // ============ Balance Errors ============
    /// Caller has no stake record
    NoStakeRecord { owner: [u8; 32] },

    /// Unstake request exceeds the recorded stake
    InsufficientStake { available: u64, requested: u64 },

    /// Insufficient token balance for a transfer
    InsufficientBalance { available: u64, requested: u64 },

    /// Zero amount not allowed
    ZeroAmount,

    /// No accrued reward to claim
    NoRewardsToClaim,

    // ============ Authorization Errors ============
    /// Only the staker admin can perform this action
    AdminOnly,

    // ============ Custody Errors ============
    /// External token transfer failed - whole operation aborted
    TransferFailed { from: [u8; 32], to: [u8; 32], amount: u64 },

    // ============ Accounting Errors ============
    /// A user entry referenced a checkpoint outside the log
    CheckpointOutOfRange { index: u64, len: u64 },

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Arithmetic underflow occurred
    Underflow,

    /// Division by zero
    DivisionByZero,
}

impl StakerError {
    /// Returns a stable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::DurationTooShort { .. } => "E001_DURATION_TOO_SHORT",
            Self::IntervalTooLong { .. } => "E002_INTERVAL_TOO_LONG",
            Self::IntervalNotFactorOfDay { .. } => "E003_INTERVAL_NOT_FACTOR",
            Self::EraAlreadyCreated => "E004_ERA_ALREADY_CREATED",
            Self::EraNotStarted => "E010_ERA_NOT_STARTED",
            Self::EraEnded => "E011_ERA_ENDED",
            Self::NoStakeRecord { .. } => "E020_NO_STAKE_RECORD",
            Self::InsufficientStake { .. } => "E021_INSUFFICIENT_STAKE",
            Self::InsufficientBalance { .. } => "E022_INSUFFICIENT_BALANCE",
            Self::ZeroAmount => "E023_ZERO_AMOUNT",
            Self::NoRewardsToClaim => "E024_NO_REWARDS",
            Self::AdminOnly => "E030_ADMIN_ONLY",
            Self::TransferFailed { .. } => "E040_TRANSFER_FAILED",
            Self::CheckpointOutOfRange { .. } => "E050_CHECKPOINT_RANGE",
            Self::Overflow => "E060_OVERFLOW",
            Self::Underflow => "E061_UNDERFLOW",
            Self::DivisionByZero => "E062_DIV_ZERO",
        }
    }

    /// Returns true if this error is recoverable (caller can fix the
    /// input and retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::DurationTooShort { .. } => true,
            Self::IntervalTooLong { .. } => true,
            Self::IntervalNotFactorOfDay { .. } => true,
            Self::InsufficientStake { .. } => true,
            Self::InsufficientBalance { .. } => true,
            Self::ZeroAmount => true,
            _ => false,
        }
    }
}
