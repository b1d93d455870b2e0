//! Token Ledger Adapter
//!
//! The engine never holds tokens itself: collateral and reward custody
//! live on an external token ledger reached through this trait. Every
//! call is atomic and irreversible once it returns success; any failure
//! aborts the whole staking operation with no engine state committed.

use staker_common::{Address, StakerError, StakerResult};

/// External token ledger boundary
///
/// One implementor per asset: the engine holds one adapter for the
/// collateral (LP) token and one for the reward token.
pub trait TokenLedger {
    /// Move `amount` from `owner` to `to` on the owner's prior approval
    fn transfer_from(&mut self, owner: &Address, to: &Address, amount: u64) -> StakerResult<()>;

    /// Move `amount` from the engine's custody account to `to`
    fn transfer(&mut self, to: &Address, amount: u64) -> StakerResult<()>;

    /// Current balance of `owner`
    fn balance_of(&self, owner: &Address) -> u64;
}

/// In-memory token ledger for tests
///
/// Balances in a flat list, plus a failure switch to exercise the
/// all-or-nothing custody path.
#[derive(Debug, Clone, Default)]
pub struct MockTokenLedger {
    custody: Address,
    balances: Vec<(Address, u64)>,
    fail_next: bool,
}

impl MockTokenLedger {
    /// Create a ledger whose `transfer` debits the given custody account
    pub fn new(custody: Address) -> Self {
        Self {
            custody,
            balances: Vec::new(),
            fail_next: false,
        }
    }

    /// Credit an account out of thin air (test faucet)
    pub fn mint(&mut self, owner: &Address, amount: u64) {
        self.credit(owner, amount);
    }

    /// Make the next transfer call fail
    pub fn set_fail_next(&mut self, fail: bool) {
        self.fail_next = fail;
    }

    fn credit(&mut self, owner: &Address, amount: u64) {
        match self.balances.iter_mut().find(|(o, _)| o == owner) {
            Some((_, balance)) => *balance += amount,
            None => self.balances.push((*owner, amount)),
        }
    }

    fn debit(&mut self, owner: &Address, amount: u64) -> StakerResult<()> {
        let available = self.balance_of(owner);
        if available < amount {
            return Err(StakerError::InsufficientBalance {
                available,
                requested: amount,
            });
        }
        if let Some((_, balance)) = self.balances.iter_mut().find(|(o, _)| o == owner) {
            *balance -= amount;
        }
        Ok(())
    }

    fn take_failure(&mut self, from: &Address, to: &Address, amount: u64) -> StakerResult<()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(StakerError::TransferFailed {
                from: *from,
                to: *to,
                amount,
            });
        }
        Ok(())
    }
}

impl TokenLedger for MockTokenLedger {
    fn transfer_from(&mut self, owner: &Address, to: &Address, amount: u64) -> StakerResult<()> {
        self.take_failure(owner, to, amount)?;
        self.debit(owner, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    fn transfer(&mut self, to: &Address, amount: u64) -> StakerResult<()> {
        let custody = self.custody;
        self.take_failure(&custody, to, amount)?;
        self.debit(&custody, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    fn balance_of(&self, owner: &Address) -> u64 {
        self.balances
            .iter()
            .find(|(o, _)| o == owner)
            .map(|(_, b)| *b)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custody() -> Address {
        [9u8; 32]
    }

    fn user() -> Address {
        [1u8; 32]
    }

    #[test]
    fn test_transfer_from_moves_balance() {
        let mut ledger = MockTokenLedger::new(custody());
        ledger.mint(&user(), 500);

        ledger.transfer_from(&user(), &custody(), 200).unwrap();
        assert_eq!(ledger.balance_of(&user()), 300);
        assert_eq!(ledger.balance_of(&custody()), 200);
    }

    #[test]
    fn test_transfer_debits_custody() {
        let mut ledger = MockTokenLedger::new(custody());
        ledger.mint(&custody(), 100);

        ledger.transfer(&user(), 60).unwrap();
        assert_eq!(ledger.balance_of(&custody()), 40);
        assert_eq!(ledger.balance_of(&user()), 60);
    }

    #[test]
    fn test_insufficient_balance_rejected() {
        let mut ledger = MockTokenLedger::new(custody());
        ledger.mint(&user(), 10);

        assert_eq!(
            ledger.transfer_from(&user(), &custody(), 11),
            Err(StakerError::InsufficientBalance {
                available: 10,
                requested: 11
            })
        );
        // nothing moved
        assert_eq!(ledger.balance_of(&user()), 10);
    }

    #[test]
    fn test_failure_switch_fires_once() {
        let mut ledger = MockTokenLedger::new(custody());
        ledger.mint(&user(), 100);
        ledger.set_fail_next(true);

        assert!(matches!(
            ledger.transfer_from(&user(), &custody(), 50),
            Err(StakerError::TransferFailed { .. })
        ));
        // switch consumed, next call succeeds
        ledger.transfer_from(&user(), &custody(), 50).unwrap();
        assert_eq!(ledger.balance_of(&custody()), 50);
    }
}
