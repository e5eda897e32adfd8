//! Risk Scorer - Risk matching and project risk classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::project::{
    Project, ProjectCategory, ProjectPhase, RegulatoryComplexity, RiskCategory,
};

/// How closely a project's risk matches an investor's tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchLevel {
    /// Level for an absolute risk difference. Boundaries go to the better tier.
    pub fn from_difference(difference: f64) -> Self {
        if difference <= 10.0 {
            MatchLevel::Excellent
        } else if difference <= 20.0 {
            MatchLevel::Good
        } else if difference <= 30.0 {
            MatchLevel::Fair
        } else {
            MatchLevel::Poor
        }
    }
}

impl fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchLevel::Excellent => write!(f, "excellent"),
            MatchLevel::Good => write!(f, "good"),
            MatchLevel::Fair => write!(f, "fair"),
            MatchLevel::Poor => write!(f, "poor"),
        }
    }
}

/// Direction of a risk mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAlignment {
    TooRisky,
    TooConservative,
    Aligned,
}

impl RiskAlignment {
    /// Project more than 15 points away from the investor in either direction
    /// is out of alignment.
    pub fn assess(user_value: f64, project_value: f64) -> Self {
        if project_value > user_value + 15.0 {
            RiskAlignment::TooRisky
        } else if project_value < user_value - 15.0 {
            RiskAlignment::TooConservative
        } else {
            RiskAlignment::Aligned
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskAlignment::TooRisky => "Project risk is too high for your risk profile",
            RiskAlignment::TooConservative => {
                "Project is too conservative for your risk profile"
            }
            RiskAlignment::Aligned => "Project risk aligns with your risk profile",
        }
    }
}

/// Result of comparing investor and project risk values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMatch {
    pub match_level: MatchLevel,
    pub difference: f64,
    pub risk_assessment: RiskAlignment,
}

/// Base score the classification heuristic adjusts from.
pub const HEURISTIC_BASE_SCORE: f64 = 50.0;

/// Risk scoring functions.
pub struct RiskScorer;

impl RiskScorer {
    /// Compares an investor risk value against a project risk value.
    pub fn match_risk(user_value: f64, project_value: f64) -> RiskMatch {
        let difference = (user_value - project_value).abs();
        RiskMatch {
            match_level: MatchLevel::from_difference(difference),
            difference,
            risk_assessment: RiskAlignment::assess(user_value, project_value),
        }
    }

    /// Buckets a project by its risk score.
    pub fn classify_project_risk(project: &Project) -> RiskCategory {
        RiskCategory::from_score(Self::project_risk_score(project))
    }

    /// Assessed overall score when present, otherwise the heuristic.
    pub fn project_risk_score(project: &Project) -> f64 {
        project
            .risk
            .as_ref()
            .map(|risk| risk.overall_score())
            .unwrap_or_else(|| Self::heuristic_score(project))
    }

    /// Derives a 0-100 score from category, phase, duration, budget and
    /// regulatory complexity. Each adjustment applies independently.
    pub fn heuristic_score(project: &Project) -> f64 {
        let mut score = HEURISTIC_BASE_SCORE;

        score += Self::category_adjustment(project.category);
        score += Self::phase_adjustment(project.phase);

        if project.duration_months > 60 {
            score += 10.0;
        } else if project.duration_months < 24 {
            score -= 5.0;
        }

        if project.budget > 100_000_000.0 {
            score += 10.0;
        } else if project.budget < 5_000_000.0 {
            score -= 5.0;
        }

        score += match project.regulatory_complexity {
            RegulatoryComplexity::High => 10.0,
            RegulatoryComplexity::Medium => 5.0,
            RegulatoryComplexity::Low => 0.0,
        };

        score.clamp(0.0, 100.0)
    }

    fn category_adjustment(category: ProjectCategory) -> f64 {
        match category {
            ProjectCategory::Energy => -5.0,
            ProjectCategory::Water => -5.0,
            ProjectCategory::Transport => 5.0,
            ProjectCategory::Telecommunications => 0.0,
            ProjectCategory::Healthcare => 5.0,
            ProjectCategory::Education => -5.0,
            ProjectCategory::Housing => 0.0,
            ProjectCategory::Agriculture => 10.0,
            ProjectCategory::WasteManagement => 5.0,
            ProjectCategory::Other => 10.0,
        }
    }

    fn phase_adjustment(phase: ProjectPhase) -> f64 {
        match phase {
            ProjectPhase::Planning => 15.0,
            ProjectPhase::Construction => 10.0,
            ProjectPhase::Operational => -10.0,
            ProjectPhase::Expansion => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::{ProjectRisk, RiskLevel};

    #[test]
    fn match_levels_follow_difference_bands() {
        assert_eq!(RiskScorer::match_risk(50.0, 50.0).match_level, MatchLevel::Excellent);
        assert_eq!(RiskScorer::match_risk(50.0, 60.0).match_level, MatchLevel::Excellent);
        assert_eq!(RiskScorer::match_risk(50.0, 70.0).match_level, MatchLevel::Good);
        assert_eq!(RiskScorer::match_risk(50.0, 80.0).match_level, MatchLevel::Fair);
        assert_eq!(RiskScorer::match_risk(50.0, 80.5).match_level, MatchLevel::Poor);
    }

    #[test]
    fn difference_is_absolute() {
        let m = RiskScorer::match_risk(60.0, 25.0);
        assert_eq!(m.difference, 35.0);
        assert_eq!(m.match_level, MatchLevel::Poor);
    }

    #[test]
    fn alignment_uses_fifteen_point_band() {
        assert_eq!(
            RiskScorer::match_risk(50.0, 66.0).risk_assessment,
            RiskAlignment::TooRisky
        );
        assert_eq!(
            RiskScorer::match_risk(50.0, 65.0).risk_assessment,
            RiskAlignment::Aligned
        );
        assert_eq!(
            RiskScorer::match_risk(50.0, 34.0).risk_assessment,
            RiskAlignment::TooConservative
        );
    }

    #[test]
    fn assessed_score_wins_over_heuristic() {
        let project = Project::new("Dam", "hydro power")
            .unwrap()
            .with_risk(ProjectRisk::uniform(RiskLevel::Low));
        assert_eq!(RiskScorer::project_risk_score(&project), 25.0);
        assert_eq!(
            RiskScorer::classify_project_risk(&project),
            RiskCategory::LowRisk
        );
    }

    #[test]
    fn heuristic_adds_independent_adjustments() {
        // energy -5, planning +15, duration 0 (<24) -5, budget 0 (<5M) -5, medium +5
        let project = Project::new("Solar farm", "solar").unwrap();
        assert_eq!(RiskScorer::heuristic_score(&project), 55.0);

        let operational = Project::new("Solar farm", "solar")
            .unwrap()
            .with_phase(ProjectPhase::Operational)
            .with_duration_months(36)
            .with_budget(20_000_000.0)
            .with_regulatory_complexity(RegulatoryComplexity::Low);
        assert_eq!(RiskScorer::heuristic_score(&operational), 35.0);
        assert_eq!(
            RiskScorer::classify_project_risk(&operational),
            RiskCategory::MediumRisk
        );
    }

    #[test]
    fn heuristic_high_risk_project() {
        // other +10, planning +15, long +10, large +10, high +10
        let project = Project::new("Spaceport", "experimental")
            .unwrap()
            .with_duration_months(120)
            .with_budget(500_000_000.0)
            .with_regulatory_complexity(RegulatoryComplexity::High);
        assert_eq!(RiskScorer::heuristic_score(&project), 100.0);
        assert_eq!(
            RiskScorer::classify_project_risk(&project),
            RiskCategory::HighRisk
        );
    }
}
