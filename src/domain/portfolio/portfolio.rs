//! Investor portfolio as a value: every change returns a new `Portfolio`.
//! Persisting the result is the caller's job.

use serde::{Deserialize, Serialize};

use super::Holding;
use crate::domain::foundation::{ProjectId, Timestamp, ValidationError};
use crate::domain::project::ProjectCategory;

/// A new contribution to a position.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentLine {
    pub project_id: ProjectId,
    pub category: ProjectCategory,
    pub amount: f64,
    pub unit_price: f64,
    pub simulated: bool,
}

/// Portfolio value at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub recorded_at: Timestamp,
    pub total_value: f64,
    pub simulated_value: f64,
    pub real_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub simulated_value: f64,
    #[serde(default)]
    pub real_value: f64,
    #[serde(default)]
    pub performance_history: Vec<PerformanceSnapshot>,
}

impl Portfolio {
    pub fn holding(&self, project_id: &ProjectId) -> Option<&Holding> {
        self.holdings.iter().find(|h| &h.project_id == project_id)
    }

    /// Whether any holding is in the given category.
    pub fn holds_category(&self, category: ProjectCategory) -> bool {
        self.holdings.iter().any(|h| h.category == category)
    }

    /// Returns the portfolio with the contribution added.
    ///
    /// Repeat investments in the same project accumulate into one holding.
    pub fn with_investment(&self, line: InvestmentLine) -> Result<Self, ValidationError> {
        if !line.amount.is_finite() || line.amount <= 0.0 {
            return Err(ValidationError::out_of_range(
                "amount",
                0.0,
                f64::MAX,
                line.amount,
            ));
        }
        if !line.unit_price.is_finite() || line.unit_price <= 0.0 {
            return Err(ValidationError::out_of_range(
                "unit_price",
                0.0,
                f64::MAX,
                line.unit_price,
            ));
        }

        let units = line.amount / line.unit_price;
        let mut next = self.clone();

        match next
            .holdings
            .iter()
            .position(|h| h.project_id == line.project_id)
        {
            Some(index) => {
                next.holdings[index] =
                    next.holdings[index].accumulate(line.amount, units, line.simulated);
            }
            None => next.holdings.push(Holding {
                project_id: line.project_id,
                category: line.category,
                amount: line.amount,
                units,
                entry_price: line.unit_price,
                current_price: None,
                simulated: line.simulated,
            }),
        }

        Ok(next)
    }

    /// Returns the portfolio with aggregates recomputed and a snapshot appended.
    pub fn revalued(&self, at: Timestamp) -> Self {
        let (simulated_value, real_value) =
            self.holdings
                .iter()
                .fold((0.0, 0.0), |(simulated, real), holding| {
                    if holding.simulated {
                        (simulated + holding.market_value(), real)
                    } else {
                        (simulated, real + holding.market_value())
                    }
                });

        let mut next = self.clone();
        next.simulated_value = simulated_value;
        next.real_value = real_value;
        next.total_value = simulated_value + real_value;
        next.performance_history.push(PerformanceSnapshot {
            recorded_at: at,
            total_value: next.total_value,
            simulated_value,
            real_value,
        });
        next
    }

    /// Current weight of each holding in percent of market value.
    pub fn allocation_percentages(&self) -> Vec<(ProjectId, f64)> {
        let total: f64 = self.holdings.iter().map(Holding::market_value).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        self.holdings
            .iter()
            .map(|h| (h.project_id, h.market_value() / total * 100.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(project_id: ProjectId, amount: f64, price: f64, simulated: bool) -> InvestmentLine {
        InvestmentLine {
            project_id,
            category: ProjectCategory::Water,
            amount,
            unit_price: price,
            simulated,
        }
    }

    #[test]
    fn first_investment_creates_holding() {
        let id = ProjectId::new();
        let portfolio = Portfolio::default()
            .with_investment(line(id, 500.0, 2.0, true))
            .unwrap();
        let holding = portfolio.holding(&id).unwrap();
        assert_eq!(holding.units, 250.0);
        assert_eq!(holding.entry_price, 2.0);
        assert!(portfolio.holds_category(ProjectCategory::Water));
    }

    #[test]
    fn repeat_investment_accumulates() {
        let id = ProjectId::new();
        let portfolio = Portfolio::default()
            .with_investment(line(id, 100.0, 1.0, true))
            .unwrap()
            .with_investment(line(id, 100.0, 2.0, true))
            .unwrap();
        assert_eq!(portfolio.holdings.len(), 1);
        let holding = portfolio.holding(&id).unwrap();
        assert_eq!(holding.amount, 200.0);
        assert_eq!(holding.units, 150.0);
    }

    #[test]
    fn with_investment_leaves_original_untouched() {
        let original = Portfolio::default();
        let _ = original
            .with_investment(line(ProjectId::new(), 10.0, 1.0, true))
            .unwrap();
        assert!(original.holdings.is_empty());
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        assert!(Portfolio::default()
            .with_investment(line(ProjectId::new(), 0.0, 1.0, true))
            .is_err());
        assert!(Portfolio::default()
            .with_investment(line(ProjectId::new(), 10.0, 0.0, true))
            .is_err());
    }

    #[test]
    fn revalue_splits_simulated_and_real() {
        let simulated = ProjectId::new();
        let real = ProjectId::new();
        let mut portfolio = Portfolio::default()
            .with_investment(line(simulated, 300.0, 1.0, true))
            .unwrap()
            .with_investment(line(real, 200.0, 1.0, false))
            .unwrap();
        portfolio.holdings[1].current_price = Some(1.5);

        let at = Timestamp::from_unix_secs(42);
        let revalued = portfolio.revalued(at);
        assert_eq!(revalued.simulated_value, 300.0);
        assert_eq!(revalued.real_value, 300.0);
        assert_eq!(revalued.total_value, 600.0);
        assert_eq!(revalued.performance_history.len(), 1);
        assert_eq!(revalued.performance_history[0].recorded_at, at);
    }

    #[test]
    fn each_revaluation_appends_a_snapshot() {
        let portfolio = Portfolio::default()
            .revalued(Timestamp::from_unix_secs(1))
            .revalued(Timestamp::from_unix_secs(2));
        assert_eq!(portfolio.performance_history.len(), 2);
    }

    #[test]
    fn allocation_percentages_follow_market_value() {
        let a = ProjectId::new();
        let b = ProjectId::new();
        let portfolio = Portfolio::default()
            .with_investment(line(a, 300.0, 1.0, true))
            .unwrap()
            .with_investment(line(b, 100.0, 1.0, true))
            .unwrap();
        let weights = portfolio.allocation_percentages();
        assert_eq!(weights, vec![(a, 75.0), (b, 25.0)]);
    }

    #[test]
    fn empty_portfolio_has_no_weights() {
        assert!(Portfolio::default().allocation_percentages().is_empty());
    }
}
