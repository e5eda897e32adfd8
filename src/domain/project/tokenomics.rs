//! Token valuation and vesting math for a project's issued token.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors from token valuation. These are "no answer" results, not faults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenomicsError {
    #[error("Total token supply is zero")]
    ZeroSupply,

    #[error("Token price is zero")]
    ZeroPrice,

    #[error("Token allocations total {total}%, exceeding 100%")]
    AllocationsExceedSupply { total: f64 },
}

impl From<TokenomicsError> for DomainError {
    fn from(err: TokenomicsError) -> Self {
        DomainError::new(ErrorCode::ComputationPrecondition, err.to_string())
    }
}

/// Share of supply reserved for a holder group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAllocation {
    pub holder: String,
    pub percentage: f64,
}

/// Release schedule of locked allocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingSchedule {
    /// Months before any linear release begins.
    pub cliff_months: u32,
    /// Months of linear release after the cliff.
    pub vesting_months: u32,
    /// Percent unlocked at token generation.
    pub tge_unlock_percent: f64,
}

impl Default for VestingSchedule {
    fn default() -> Self {
        Self {
            cliff_months: 0,
            vesting_months: 0,
            tge_unlock_percent: 100.0,
        }
    }
}

/// One point of an unlock schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockPoint {
    pub month: u32,
    pub unlocked_percent: f64,
    pub unlocked_tokens: f64,
}

/// Supply, allocation and vesting parameters of a project token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tokenomics {
    pub symbol: String,
    pub total_supply: u64,
    pub decimals: u8,
    /// Project valuation backing the token, in platform currency.
    pub valuation: f64,
    #[serde(default)]
    pub allocations: Vec<TokenAllocation>,
    #[serde(default)]
    pub vesting: VestingSchedule,
}

impl Tokenomics {
    pub fn new(symbol: impl Into<String>, total_supply: u64, valuation: f64) -> Self {
        Self {
            symbol: symbol.into(),
            total_supply,
            decimals: 2,
            valuation,
            allocations: Vec::new(),
            vesting: VestingSchedule::default(),
        }
    }

    pub fn with_allocation(mut self, holder: impl Into<String>, percentage: f64) -> Self {
        self.allocations.push(TokenAllocation {
            holder: holder.into(),
            percentage,
        });
        self
    }

    pub fn with_vesting(mut self, vesting: VestingSchedule) -> Self {
        self.vesting = vesting;
        self
    }

    /// Price of one token: valuation / total supply.
    pub fn price_per_token(&self) -> Result<f64, TokenomicsError> {
        if self.total_supply == 0 {
            return Err(TokenomicsError::ZeroSupply);
        }
        Ok(self.valuation / self.total_supply as f64)
    }

    /// Number of tokens an investment amount buys at the current price.
    pub fn units_for_amount(&self, amount: f64) -> Result<f64, TokenomicsError> {
        let price = self.price_per_token()?;
        if price <= 0.0 {
            return Err(TokenomicsError::ZeroPrice);
        }
        Ok(amount / price)
    }

    /// Percent of total supply represented by `units`.
    pub fn ownership_percent(&self, units: f64) -> Result<f64, TokenomicsError> {
        if self.total_supply == 0 {
            return Err(TokenomicsError::ZeroSupply);
        }
        Ok(units / self.total_supply as f64 * 100.0)
    }

    /// Checks that allocations fit inside the supply.
    pub fn validate_allocations(&self) -> Result<(), TokenomicsError> {
        let total: f64 = self.allocations.iter().map(|a| a.percentage).sum();
        if total > 100.0 + 1e-9 {
            return Err(TokenomicsError::AllocationsExceedSupply { total });
        }
        Ok(())
    }

    /// Percent of supply unlocked at `month` under the vesting schedule.
    pub fn unlocked_percent_at(&self, month: u32) -> f64 {
        let tge = self.vesting.tge_unlock_percent.clamp(0.0, 100.0);
        if month < self.vesting.cliff_months {
            return tge;
        }
        if self.vesting.vesting_months == 0 {
            return 100.0;
        }
        let elapsed = (month - self.vesting.cliff_months) as f64;
        let progress = (elapsed / self.vesting.vesting_months as f64).min(1.0);
        tge + (100.0 - tge) * progress
    }

    /// Month-by-month unlock schedule from month 0 through `months`.
    pub fn unlock_schedule(&self, months: u32) -> Vec<UnlockPoint> {
        (0..=months)
            .map(|month| {
                let unlocked_percent = self.unlocked_percent_at(month);
                UnlockPoint {
                    month,
                    unlocked_percent,
                    unlocked_tokens: self.total_supply as f64 * unlocked_percent / 100.0,
                }
            })
            .collect()
    }
}
