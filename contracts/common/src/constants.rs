//! Protocol Constants
//!
//! All magic numbers and configuration values for the staker protocol.
//! Era parameters themselves (duration, release amount, reward interval)
//! are chosen per era at creation time; everything here is fixed at
//! compile time.

/// Token Metadata
///
/// The engine moves two assets: the collateral (LP) token users lock and
/// the reward token the era releases. Both use the same base unit
/// precision.
pub mod token {
    /// Collateral (LP) token symbol
    pub const COLLATERAL_SYMBOL: &str = "LP";
    /// Reward token symbol
    pub const REWARD_SYMBOL: &str = "RWD";
    /// Decimal places
    pub const DECIMALS: u8 = 8;
    /// One unit with decimals (1 token = 100_000_000 base units)
    pub const ONE: u64 = 100_000_000;
}

/// Era Timing
pub mod era {
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: u64 = 3_600;
    /// Seconds in one day
    pub const SECONDS_PER_DAY: u64 = 86_400;
    /// Hours in one day - reward intervals must divide this evenly
    pub const HOURS_PER_DAY: u64 = 24;

    /// Minimum era duration in days (exclusive - an era must run longer
    /// than one day)
    pub const MIN_DURATION_DAYS: u64 = 1;

    /// Maximum reward interval in hours (one full day)
    pub const MAX_INTERVAL_HOURS: u64 = 24;
}
