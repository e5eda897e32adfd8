//! Investor risk profile.
//!
//! Two tolerance-to-score mappings coexist. Matching a project against a
//! profile that has no explicit score uses {30, 60, 90}; the explicit
//! risk-profile-update operation stamps {25, 50, 75}. Each mapping belongs
//! to its own call site.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Self-declared risk tolerance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Score used when matching against projects and no score is stored.
    pub fn matching_score(&self) -> f64 {
        match self {
            RiskTolerance::Conservative => 30.0,
            RiskTolerance::Moderate => 60.0,
            RiskTolerance::Aggressive => 90.0,
        }
    }

    /// Score stamped by the risk-profile-update operation.
    pub fn assessment_score(&self) -> f64 {
        match self {
            RiskTolerance::Conservative => 25.0,
            RiskTolerance::Moderate => 50.0,
            RiskTolerance::Aggressive => 75.0,
        }
    }
}

impl Default for RiskTolerance {
    fn default() -> Self {
        RiskTolerance::Moderate
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTolerance::Conservative => write!(f, "conservative"),
            RiskTolerance::Moderate => write!(f, "moderate"),
            RiskTolerance::Aggressive => write!(f, "aggressive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeHorizon {
    Short,
    Medium,
    Long,
}

impl Default for TimeHorizon {
    fn default() -> Self {
        TimeHorizon::Medium
    }
}

/// Answers from a risk questionnaire, applied by `UserRiskProfile::assessed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tolerance: RiskTolerance,
    #[serde(default)]
    pub investment_goals: Option<BTreeSet<String>>,
    #[serde(default)]
    pub time_horizon: Option<TimeHorizon>,
    #[serde(default)]
    pub max_investment_per_project: Option<f64>,
}

/// Risk profile of an investor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRiskProfile {
    pub tolerance: RiskTolerance,
    /// Explicit 0-100 score; absent until the first assessment.
    #[serde(default)]
    pub tolerance_score: Option<f64>,
    #[serde(default)]
    pub investment_goals: BTreeSet<String>,
    #[serde(default)]
    pub time_horizon: TimeHorizon,
    /// Cap per project; 0 means no cap was set.
    #[serde(default)]
    pub max_investment_per_project: f64,
    #[serde(default)]
    pub last_assessment_date: Option<Timestamp>,
}

impl Default for UserRiskProfile {
    fn default() -> Self {
        Self {
            tolerance: RiskTolerance::default(),
            tolerance_score: None,
            investment_goals: BTreeSet::new(),
            time_horizon: TimeHorizon::default(),
            max_investment_per_project: 0.0,
            last_assessment_date: None,
        }
    }
}

impl UserRiskProfile {
    /// Score compared against project risk scores.
    pub fn effective_tolerance_score(&self) -> f64 {
        self.tolerance_score
            .unwrap_or_else(|| self.tolerance.matching_score())
    }

    /// Whether a per-project investment cap is in force.
    pub fn has_investment_cap(&self) -> bool {
        self.max_investment_per_project > 0.0
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.investment_goals.insert(goal.into());
        self
    }

    /// Returns the profile after applying an assessment at `assessed_at`.
    ///
    /// Omitted answers keep their current values.
    pub fn assessed(
        &self,
        assessment: RiskAssessment,
        assessed_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if let Some(max) = assessment.max_investment_per_project {
            if !max.is_finite() || max < 0.0 {
                return Err(ValidationError::out_of_range(
                    "max_investment_per_project",
                    0.0,
                    f64::MAX,
                    max,
                ));
            }
        }

        Ok(Self {
            tolerance: assessment.tolerance,
            tolerance_score: Some(assessment.tolerance.assessment_score()),
            investment_goals: assessment
                .investment_goals
                .unwrap_or_else(|| self.investment_goals.clone()),
            time_horizon: assessment.time_horizon.unwrap_or(self.time_horizon),
            max_investment_per_project: assessment
                .max_investment_per_project
                .unwrap_or(self.max_investment_per_project),
            last_assessment_date: Some(assessed_at),
        })
    }
}
