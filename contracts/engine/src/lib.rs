//! Staker Engine
//!
//! Hosts the staking contract surface: entry points, read queries and the
//! token-custody adapters. All accounting logic lives in `staker-common`;
//! this crate decides when custody moves and when ledger state commits.

pub mod adapter;
pub mod staker;

pub use adapter::{MockTokenLedger, TokenLedger};
pub use staker::{Staker, StakerConfig};
