//! Agent Wallet

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A non-negative balance in whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wallet(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("insufficient funds: balance {balance}, needed {needed}")]
    InsufficientFunds { balance: u64, needed: u64 },
}

impl Wallet {
    pub const fn new(balance: u64) -> Self {
        Self(balance)
    }

    pub const fn balance(&self) -> u64 {
        self.0
    }

    pub const fn can_afford(&self, amount: u64) -> bool {
        self.0 >= amount
    }

    /// Whole units payable at `unit_price`, saturating at `u32::MAX`.
    pub fn affordable_units(&self, unit_price: u64) -> u32 {
        if unit_price == 0 {
            return u32::MAX;
        }
        u32::try_from(self.0 / unit_price).unwrap_or(u32::MAX)
    }

    /// Removes `amount`; the balance is untouched on failure.
    pub fn debit(&mut self, amount: u64) -> Result<(), WalletError> {
        self.0 = self
            .0
            .checked_sub(amount)
            .ok_or(WalletError::InsufficientFunds {
                balance: self.0,
                needed: amount,
            })?;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.0 = self.0.saturating_add(amount);
    }
}
