//! Portfolio Allocator - Target allocation across risk buckets and projects.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::RiskScorer;
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};
use crate::domain::project::{Project, RiskCategory};
use crate::domain::user::RiskTolerance;

/// Leftover percentage above this is spread across all allocations.
pub const REMAINDER_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("No projects available for allocation")]
    NoProjects,
}

impl From<AllocationError> for DomainError {
    fn from(err: AllocationError) -> Self {
        DomainError::new(ErrorCode::NoProjectsAvailable, err.to_string())
    }
}

/// Fraction of capital per risk bucket; the three parts sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketSplit {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl BucketSplit {
    pub fn share(&self, category: RiskCategory) -> f64 {
        match category {
            RiskCategory::HighRisk => self.high,
            RiskCategory::MediumRisk => self.medium,
            RiskCategory::LowRisk => self.low,
        }
    }
}

/// Risk appetite tier driving the bucket split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationTier {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Default for AllocationTier {
    fn default() -> Self {
        AllocationTier::Moderate
    }
}

impl AllocationTier {
    pub fn split(&self) -> BucketSplit {
        let (high, medium, low) = match self {
            AllocationTier::VeryLow => (0.05, 0.25, 0.70),
            AllocationTier::Low => (0.15, 0.35, 0.50),
            AllocationTier::Moderate => (0.30, 0.50, 0.20),
            AllocationTier::High => (0.50, 0.35, 0.15),
            AllocationTier::VeryHigh => (0.70, 0.25, 0.05),
        };
        BucketSplit { high, medium, low }
    }

    /// Tier used for an investor's profile tolerance.
    pub fn from_tolerance(tolerance: RiskTolerance) -> Self {
        match tolerance {
            RiskTolerance::Conservative => AllocationTier::Low,
            RiskTolerance::Moderate => AllocationTier::Moderate,
            RiskTolerance::Aggressive => AllocationTier::High,
        }
    }
}

impl fmt::Display for AllocationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AllocationTier::VeryLow => "very_low",
            AllocationTier::Low => "low",
            AllocationTier::Moderate => "moderate",
            AllocationTier::High => "high",
            AllocationTier::VeryHigh => "very_high",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAllocation {
    pub project_id: ProjectId,
    /// Percent of capital.
    pub allocation: f64,
    pub risk_category: RiskCategory,
}

/// Percent of capital that ended up in each bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationByRisk {
    pub high_risk: f64,
    pub medium_risk: f64,
    pub low_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAllocationPlan {
    pub tier: AllocationTier,
    pub allocations: Vec<ProjectAllocation>,
    pub allocation_by_risk: AllocationByRisk,
}

impl PortfolioAllocationPlan {
    pub fn total(&self) -> f64 {
        self.allocations.iter().map(|a| a.allocation).sum()
    }
}

/// Allocation functions.
pub struct PortfolioAllocator;

impl PortfolioAllocator {
    /// Splits 100% of capital across `projects` for the given tier.
    ///
    /// # Algorithm
    /// 1. Bucket projects by risk classification
    /// 2. Split each bucket's share evenly, rounded to two decimals
    /// 3. Spread any remainder above 0.1 evenly across every allocation
    ///
    /// Allocations come out grouped high, medium, low; input order is kept
    /// within a bucket. Shares of empty buckets reach the other projects
    /// through step 3.
    pub fn allocate(
        tier: AllocationTier,
        projects: &[Project],
    ) -> Result<PortfolioAllocationPlan, AllocationError> {
        if projects.is_empty() {
            return Err(AllocationError::NoProjects);
        }

        let split = tier.split();
        let classified: Vec<(ProjectId, RiskCategory)> = projects
            .iter()
            .map(|p| (p.id, RiskScorer::classify_project_risk(p)))
            .collect();

        let mut allocations = Vec::with_capacity(projects.len());
        for category in [
            RiskCategory::HighRisk,
            RiskCategory::MediumRisk,
            RiskCategory::LowRisk,
        ] {
            let members: Vec<ProjectId> = classified
                .iter()
                .filter(|(_, c)| *c == category)
                .map(|(id, _)| *id)
                .collect();
            if members.is_empty() {
                continue;
            }

            let each = round2(split.share(category) * 100.0 / members.len() as f64);
            allocations.extend(members.into_iter().map(|project_id| ProjectAllocation {
                project_id,
                allocation: each,
                risk_category: category,
            }));
        }

        let assigned: f64 = allocations.iter().map(|a| a.allocation).sum();
        let remaining = 100.0 - assigned;
        if remaining > REMAINDER_THRESHOLD {
            let extra = remaining / allocations.len() as f64;
            for allocation in &mut allocations {
                allocation.allocation += extra;
            }
        }

        let allocation_by_risk =
            allocations
                .iter()
                .fold(AllocationByRisk::default(), |mut acc, a| {
                    match a.risk_category {
                        RiskCategory::HighRisk => acc.high_risk += a.allocation,
                        RiskCategory::MediumRisk => acc.medium_risk += a.allocation,
                        RiskCategory::LowRisk => acc.low_risk += a.allocation,
                    }
                    acc
                });

        Ok(PortfolioAllocationPlan {
            tier,
            allocations,
            allocation_by_risk,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
