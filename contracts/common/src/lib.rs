//! Staker Common Library
//!
//! Shared types and the checkpoint-indexed reward-accrual engine for the
//! staker protocol. This crate is pure accounting logic: custody of the
//! collateral and reward tokens, and the clock, live behind adapters in
//! the engine crate.
//!
//! ## Core pieces
//!
//! - **Era**: lifecycle state machine with lazy activation (the first
//!   stake starts the clock) and lazy ending
//! - **CheckpointLog**: append-only total-stake snapshots, run-length
//!   compressed over idle reward intervals
//! - **UserLedger**: per-participant append-only stake history plus a
//!   settlement cursor
//! - **Accrual**: the bounded walk that turns unprocessed history into
//!   owed reward, without scanning other participants or elapsed time
//!
//! This crate is `no_std` compatible for embedded/WASM targets when
//! built without the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export Vec for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;
#[cfg(feature = "std")]
pub use std::vec::Vec;

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod events;
pub mod checkpoint;
pub mod user_ledger;
pub mod era;
pub mod accrual;


// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use types::*;
pub use math::*;
pub use events::*;
pub use checkpoint::*;
pub use user_ledger::*;
pub use era::*;
pub use accrual::*;
