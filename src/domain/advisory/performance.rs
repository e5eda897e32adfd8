//! Portfolio Performance Simulator - Random-walk projection and rebalancing.
//!
//! Randomness is only reachable through `RandomSource`, so a seeded or
//! scripted source makes every simulation reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::{InvestmentSimulator, RiskScorer, MAX_SIMULATION_MONTHS};
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};
use crate::domain::project::{Project, RiskCategory};

/// Differences at or below this many percentage points are ignored.
pub const REBALANCE_TOLERANCE: f64 = 0.1;

/// Source of uniform draws in [-1, 1].
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// `StdRng`-backed source; equal seeds give equal sequences.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    position: usize,
}

impl ScriptedRandom {
    /// Values are clamped to [-1, 1]. An empty script always yields 0.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into_iter().map(|v| v.clamp(-1.0, 1.0)).collect(),
            position: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerformanceError {
    #[error("Total investment must be positive, got {0}")]
    NonPositiveInvestment(f64),

    #[error("Months must be between 1 and {max}, got {months}")]
    MonthsOutOfRange { months: u32, max: u32 },

    #[error("Portfolio has no allocations")]
    NoAllocations,

    #[error("Project {0} is not part of the simulated universe")]
    UnknownProject(ProjectId),
}

impl From<PerformanceError> for DomainError {
    fn from(err: PerformanceError) -> Self {
        match &err {
            PerformanceError::UnknownProject(id) => DomainError::project_not_found(id),
            PerformanceError::NonPositiveInvestment(_) => {
                DomainError::validation("total_investment", err.to_string())
            }
            PerformanceError::MonthsOutOfRange { .. } => {
                DomainError::validation("months", err.to_string())
            }
            PerformanceError::NoAllocations => {
                DomainError::new(ErrorCode::ComputationPrecondition, err.to_string())
            }
        }
    }
}

/// Share of capital assigned to one project, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetAllocation {
    pub project_id: ProjectId,
    pub allocation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInput {
    pub total_investment: f64,
    pub allocations: Vec<TargetAllocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub month: u32,
    pub total_value: f64,
    /// Change from the previous month in percent; 0 for month 0.
    pub change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPerformance {
    pub project_id: ProjectId,
    pub risk_category: RiskCategory,
    pub initial_value: f64,
    pub final_value: f64,
    pub return_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSimulation {
    pub months: u32,
    pub initial_value: f64,
    pub final_value: f64,
    pub total_return_percentage: f64,
    pub annualized_return: f64,
    pub timeline: Vec<PerformancePoint>,
    pub projects: Vec<ProjectPerformance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalanceDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceAction {
    pub project_id: ProjectId,
    pub current: f64,
    pub target: f64,
    /// target - current, in percentage points.
    pub difference: f64,
    pub action: RebalanceDirection,
}

struct Track {
    project_id: ProjectId,
    category: RiskCategory,
    monthly_rate: f64,
    initial: f64,
    value: f64,
}

/// Portfolio performance functions.
pub struct PerformanceSimulator;

impl PerformanceSimulator {
    /// Runs a month-by-month random walk over the allocated projects.
    ///
    /// # Algorithm
    /// For each month, for each allocation in input order:
    /// value *= 1 + expected_return/100/12 + u * volatility(risk bucket)
    /// where u is the next draw from `rng`.
    pub fn simulate(
        input: &PerformanceInput,
        projects: &[Project],
        months: u32,
        rng: &mut dyn RandomSource,
    ) -> Result<PerformanceSimulation, PerformanceError> {
        if !input.total_investment.is_finite() || input.total_investment <= 0.0 {
            return Err(PerformanceError::NonPositiveInvestment(input.total_investment));
        }
        if !(1..=MAX_SIMULATION_MONTHS).contains(&months) {
            return Err(PerformanceError::MonthsOutOfRange {
                months,
                max: MAX_SIMULATION_MONTHS,
            });
        }
        if input.allocations.is_empty() {
            return Err(PerformanceError::NoAllocations);
        }

        let by_id: HashMap<ProjectId, &Project> = projects.iter().map(|p| (p.id, p)).collect();
        let mut tracks = input
            .allocations
            .iter()
            .map(|allocation| {
                let project = by_id
                    .get(&allocation.project_id)
                    .ok_or(PerformanceError::UnknownProject(allocation.project_id))?;
                let initial = input.total_investment * allocation.allocation / 100.0;
                Ok(Track {
                    project_id: allocation.project_id,
                    category: RiskScorer::classify_project_risk(project),
                    monthly_rate: InvestmentSimulator::monthly_rate(
                        project.financials.expected_return,
                    ),
                    initial,
                    value: initial,
                })
            })
            .collect::<Result<Vec<_>, PerformanceError>>()?;

        let initial_value: f64 = tracks.iter().map(|t| t.initial).sum();
        if initial_value <= 0.0 {
            return Err(PerformanceError::NoAllocations);
        }

        let mut timeline = Vec::with_capacity(months as usize + 1);
        timeline.push(PerformancePoint {
            month: 0,
            total_value: initial_value,
            change_percent: 0.0,
        });

        let mut previous = initial_value;
        for month in 1..=months {
            for track in &mut tracks {
                let shock = rng.next_unit() * track.category.monthly_volatility();
                track.value *= 1.0 + track.monthly_rate + shock;
            }
            let total: f64 = tracks.iter().map(|t| t.value).sum();
            let change_percent = if previous != 0.0 {
                (total - previous) / previous * 100.0
            } else {
                0.0
            };
            timeline.push(PerformancePoint {
                month,
                total_value: total,
                change_percent,
            });
            previous = total;
        }

        let final_value = previous;
        let projects = tracks
            .iter()
            .map(|t| ProjectPerformance {
                project_id: t.project_id,
                risk_category: t.category,
                initial_value: t.initial,
                final_value: t.value,
                return_percentage: if t.initial > 0.0 {
                    (t.value - t.initial) / t.initial * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Ok(PerformanceSimulation {
            months,
            initial_value,
            final_value,
            total_return_percentage: (final_value - initial_value) / initial_value * 100.0,
            annualized_return: ((final_value / initial_value).powf(12.0 / months as f64) - 1.0)
                * 100.0,
            timeline,
            projects,
        })
    }

    /// Moves needed to get from `current` to `target`, largest first.
    ///
    /// Projects missing from one side count as 0% there.
    pub fn rebalance(
        current: &[TargetAllocation],
        target: &[TargetAllocation],
    ) -> Vec<RebalanceAction> {
        let mut order: Vec<ProjectId> = Vec::new();
        let mut seen: HashSet<ProjectId> = HashSet::new();
        let mut current_by_id: HashMap<ProjectId, f64> = HashMap::new();
        let mut target_by_id: HashMap<ProjectId, f64> = HashMap::new();

        for a in current {
            if seen.insert(a.project_id) {
                order.push(a.project_id);
            }
            *current_by_id.entry(a.project_id).or_insert(0.0) += a.allocation;
        }
        for a in target {
            if seen.insert(a.project_id) {
                order.push(a.project_id);
            }
            *target_by_id.entry(a.project_id).or_insert(0.0) += a.allocation;
        }

        let mut actions: Vec<RebalanceAction> = order
            .into_iter()
            .filter_map(|project_id| {
                let current = current_by_id.get(&project_id).copied().unwrap_or(0.0);
                let target = target_by_id.get(&project_id).copied().unwrap_or(0.0);
                let difference = target - current;
                if difference.abs() <= REBALANCE_TOLERANCE {
                    return None;
                }
                Some(RebalanceAction {
                    project_id,
                    current,
                    target,
                    difference,
                    action: if difference > 0.0 {
                        RebalanceDirection::Increase
                    } else {
                        RebalanceDirection::Decrease
                    },
                })
            })
            .collect();

        actions.sort_by(|a, b| b.difference.abs().total_cmp(&a.difference.abs()));
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::{ProjectRisk, RiskLevel};

    fn project(expected_return: f64, level: RiskLevel) -> Project {
        Project::new("P", "road")
            .unwrap()
            .with_expected_return(expected_return)
            .with_risk(ProjectRisk::uniform(level))
    }

    fn single(project: &Project, total: f64) -> PerformanceInput {
        PerformanceInput {
            total_investment: total,
            allocations: vec![TargetAllocation {
                project_id: project.id,
                allocation: 100.0,
            }],
        }
    }

    #[test]
    fn zero_draws_reduce_to_compounding() {
        let p = project(12.0, RiskLevel::High);
        let mut rng = ScriptedRandom::new(vec![0.0]);
        let sim = PerformanceSimulator::simulate(&single(&p, 1000.0), &[p.clone()], 12, &mut rng)
            .unwrap();
        assert!((sim.final_value - 1000.0 * 1.01f64.powi(12)).abs() < 1e-9);
        assert!((sim.annualized_return - sim.total_return_percentage).abs() < 1e-9);
        assert_eq!(sim.timeline.len(), 13);
        assert_eq!(sim.timeline[0].change_percent, 0.0);
        assert!((sim.timeline[1].change_percent - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scripted_draws_scale_by_bucket_volatility() {
        // low risk (25): volatility 0.01, 0% return
        let low = project(0.0, RiskLevel::Low);
        let mut rng = ScriptedRandom::new(vec![1.0, -1.0]);
        let sim = PerformanceSimulator::simulate(&single(&low, 100.0), &[low.clone()], 2, &mut rng)
            .unwrap();
        assert!((sim.timeline[1].total_value - 101.0).abs() < 1e-9);
        assert!((sim.timeline[2].total_value - 99.99).abs() < 1e-9);
        assert_eq!(sim.projects[0].risk_category, RiskCategory::LowRisk);
    }

    #[test]
    fn initial_values_follow_allocation_percent() {
        let a = project(0.0, RiskLevel::Medium);
        let b = project(0.0, RiskLevel::Medium);
        let input = PerformanceInput {
            total_investment: 1000.0,
            allocations: vec![
                TargetAllocation { project_id: a.id, allocation: 60.0 },
                TargetAllocation { project_id: b.id, allocation: 40.0 },
            ],
        };
        let sim = PerformanceSimulator::simulate(
            &input,
            &[a, b],
            1,
            &mut ScriptedRandom::new(vec![]),
        )
        .unwrap();
        assert_eq!(sim.projects[0].initial_value, 600.0);
        assert_eq!(sim.projects[1].initial_value, 400.0);
        assert_eq!(sim.initial_value, 1000.0);
    }

    #[test]
    fn same_seed_same_result() {
        let p = project(8.0, RiskLevel::High);
        let input = single(&p, 5000.0);
        let first =
            PerformanceSimulator::simulate(&input, &[p.clone()], 36, &mut SeededRandom::new(7))
                .unwrap();
        let second =
            PerformanceSimulator::simulate(&input, &[p.clone()], 36, &mut SeededRandom::new(7))
                .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn seeded_draws_stay_in_unit_range() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..1000 {
            let u = rng.next_unit();
            assert!((-1.0..=1.0).contains(&u));
        }
    }

    #[test]
    fn unknown_project_is_rejected() {
        let p = project(8.0, RiskLevel::High);
        let err = PerformanceSimulator::simulate(
            &single(&p, 100.0),
            &[],
            12,
            &mut ScriptedRandom::new(vec![0.0]),
        )
        .unwrap_err();
        assert_eq!(err, PerformanceError::UnknownProject(p.id));
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let p = project(8.0, RiskLevel::High);
        let mut rng = ScriptedRandom::new(vec![0.0]);
        assert_eq!(
            PerformanceSimulator::simulate(&single(&p, 0.0), &[p.clone()], 12, &mut rng),
            Err(PerformanceError::NonPositiveInvestment(0.0))
        );
        for months in [0, MAX_SIMULATION_MONTHS + 1, u32::MAX] {
            assert_eq!(
                PerformanceSimulator::simulate(&single(&p, 10.0), &[p.clone()], months, &mut rng),
                Err(PerformanceError::MonthsOutOfRange {
                    months,
                    max: MAX_SIMULATION_MONTHS
                })
            );
        }
        let empty = PerformanceInput {
            total_investment: 10.0,
            allocations: vec![],
        };
        assert_eq!(
            PerformanceSimulator::simulate(&empty, &[p], 12, &mut rng),
            Err(PerformanceError::NoAllocations)
        );
    }

    #[test]
    fn longest_horizon_is_accepted_and_maps_to_bad_request_beyond() {
        let p = project(6.0, RiskLevel::Low);
        let sim = PerformanceSimulator::simulate(
            &single(&p, 100.0),
            &[p.clone()],
            MAX_SIMULATION_MONTHS,
            &mut ScriptedRandom::new(vec![0.0]),
        )
        .unwrap();
        assert_eq!(sim.timeline.len(), MAX_SIMULATION_MONTHS as usize + 1);

        let domain: DomainError = PerformanceError::MonthsOutOfRange {
            months: 601,
            max: MAX_SIMULATION_MONTHS,
        }
        .into();
        assert_eq!(domain.code, ErrorCode::ValidationFailed);
        assert_eq!(domain.details.get("field").map(String::as_str), Some("months"));
    }

    #[test]
    fn rebalance_merges_repeated_entries_in_first_seen_order() {
        let a = ProjectId::new();
        let b = ProjectId::new();
        let actions = PerformanceSimulator::rebalance(
            &[
                TargetAllocation { project_id: a, allocation: 10.0 },
                TargetAllocation { project_id: a, allocation: 10.0 },
            ],
            &[
                TargetAllocation { project_id: b, allocation: 3.0 },
                TargetAllocation { project_id: a, allocation: 15.0 },
            ],
        );
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].project_id, a);
        assert_eq!(actions[0].current, 20.0);
        assert_eq!(actions[0].difference, -5.0);
        assert_eq!(actions[1].project_id, b);
    }

    #[test]
    fn rebalance_ignores_small_moves() {
        let id = ProjectId::new();
        let actions = PerformanceSimulator::rebalance(
            &[TargetAllocation { project_id: id, allocation: 40.0 }],
            &[TargetAllocation { project_id: id, allocation: 40.05 }],
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn rebalance_reports_increase() {
        let id = ProjectId::new();
        let actions = PerformanceSimulator::rebalance(
            &[TargetAllocation { project_id: id, allocation: 40.0 }],
            &[TargetAllocation { project_id: id, allocation: 45.0 }],
        );
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].difference, 5.0);
        assert_eq!(actions[0].action, RebalanceDirection::Increase);
    }

    #[test]
    fn rebalance_covers_both_sides_sorted_by_size() {
        let exit = ProjectId::new();
        let enter = ProjectId::new();
        let trim = ProjectId::new();
        let actions = PerformanceSimulator::rebalance(
            &[
                TargetAllocation { project_id: exit, allocation: 20.0 },
                TargetAllocation { project_id: trim, allocation: 80.0 },
            ],
            &[
                TargetAllocation { project_id: trim, allocation: 70.0 },
                TargetAllocation { project_id: enter, allocation: 30.0 },
            ],
        );
        let ids: Vec<_> = actions.iter().map(|a| a.project_id).collect();
        assert_eq!(ids, vec![enter, exit, trim]);
        assert_eq!(actions[1].action, RebalanceDirection::Decrease);
        assert_eq!(actions[1].target, 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every reported move exceeds the tolerance and moves come largest first.
        #[test]
        fn prop_rebalance_filters_and_orders(
            pairs in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 0..20),
        ) {
            let ids: Vec<ProjectId> = pairs.iter().map(|_| ProjectId::new()).collect();
            let current: Vec<_> = ids.iter().zip(&pairs)
                .map(|(id, (c, _))| TargetAllocation { project_id: *id, allocation: *c })
                .collect();
            let target: Vec<_> = ids.iter().zip(&pairs)
                .map(|(id, (_, t))| TargetAllocation { project_id: *id, allocation: *t })
                .collect();

            let actions = PerformanceSimulator::rebalance(&current, &target);
            prop_assert!(actions.iter().all(|a| a.difference.abs() > REBALANCE_TOLERANCE));
            prop_assert!(actions
                .windows(2)
                .all(|w| w[0].difference.abs() >= w[1].difference.abs()));
        }
    }
}
