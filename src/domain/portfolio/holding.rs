//! A position in a single project.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProjectId;
use crate::domain::project::ProjectCategory;

/// Position held in one project. Unique per project within a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub project_id: ProjectId,
    pub category: ProjectCategory,
    /// Total amount invested.
    pub amount: f64,
    pub units: f64,
    /// Amount-weighted average price paid per unit.
    pub entry_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    /// True while every contribution to the position was simulated.
    #[serde(default)]
    pub simulated: bool,
}

impl Holding {
    /// Units valued at the current price, or the entry price when unpriced.
    pub fn market_value(&self) -> f64 {
        self.units * self.current_price.unwrap_or(self.entry_price)
    }

    /// Returns the position with another contribution folded in.
    pub(crate) fn accumulate(&self, amount: f64, units: f64, simulated: bool) -> Self {
        let total_amount = self.amount + amount;
        let total_units = self.units + units;
        let entry_price = if total_units > 0.0 {
            total_amount / total_units
        } else {
            self.entry_price
        };
        Self {
            amount: total_amount,
            units: total_units,
            entry_price,
            simulated: self.simulated && simulated,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding() -> Holding {
        Holding {
            project_id: ProjectId::new(),
            category: ProjectCategory::Energy,
            amount: 100.0,
            units: 100.0,
            entry_price: 1.0,
            current_price: None,
            simulated: true,
        }
    }

    #[test]
    fn market_value_falls_back_to_entry_price() {
        assert_eq!(holding().market_value(), 100.0);
        let priced = Holding {
            current_price: Some(1.5),
            ..holding()
        };
        assert_eq!(priced.market_value(), 150.0);
    }

    #[test]
    fn accumulate_averages_entry_price() {
        // 100 units at 1.0 then 50 units at 2.0
        let merged = holding().accumulate(100.0, 50.0, true);
        assert_eq!(merged.amount, 200.0);
        assert_eq!(merged.units, 150.0);
        assert!((merged.entry_price - 200.0 / 150.0).abs() < 1e-12);
        assert!(merged.simulated);
    }

    #[test]
    fn real_contribution_makes_position_real() {
        let merged = holding().accumulate(10.0, 10.0, false);
        assert!(!merged.simulated);
    }
}
