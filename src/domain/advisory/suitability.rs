//! Suitability Engine - Multi-factor fit of a project for an investor.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{MatchLevel, RiskScorer};
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};
use crate::domain::project::Project;
use crate::domain::user::Investor;

/// Score every assessment starts from.
pub const SUITABILITY_BASE_SCORE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SuitabilityError {
    #[error("Project {project_id} has no risk assessment")]
    MissingRiskAssessment { project_id: ProjectId },
}

impl From<SuitabilityError> for DomainError {
    fn from(err: SuitabilityError) -> Self {
        match &err {
            SuitabilityError::MissingRiskAssessment { project_id } => {
                DomainError::new(ErrorCode::MissingRiskAssessment, err.to_string())
                    .with_detail("project_id", project_id.to_string())
            }
        }
    }
}

/// One contribution to a suitability score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityFactor {
    pub factor: String,
    pub impact: f64,
    pub description: String,
}

impl SuitabilityFactor {
    fn new(factor: &str, impact: f64, description: impl Into<String>) -> Self {
        Self {
            factor: factor.to_string(),
            impact,
            description: description.into(),
        }
    }
}

/// Recommendation label derived from a suitability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitabilityLabel {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Consider with Caution")]
    ConsiderWithCaution,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
    #[serde(rename = "Strongly Not Recommended")]
    StronglyNotRecommended,
}

impl SuitabilityLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            SuitabilityLabel::HighlyRecommended
        } else if score >= 65.0 {
            SuitabilityLabel::Recommended
        } else if score >= 50.0 {
            SuitabilityLabel::ConsiderWithCaution
        } else if score >= 30.0 {
            SuitabilityLabel::NotRecommended
        } else {
            SuitabilityLabel::StronglyNotRecommended
        }
    }
}

impl fmt::Display for SuitabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SuitabilityLabel::HighlyRecommended => "Highly Recommended",
            SuitabilityLabel::Recommended => "Recommended",
            SuitabilityLabel::ConsiderWithCaution => "Consider with Caution",
            SuitabilityLabel::NotRecommended => "Not Recommended",
            SuitabilityLabel::StronglyNotRecommended => "Strongly Not Recommended",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityResult {
    /// Clamped to [0, 100].
    pub score: f64,
    /// Triggered factors in evaluation order.
    pub factors: Vec<SuitabilityFactor>,
    pub recommendation: SuitabilityLabel,
}

/// Suitability scoring functions.
pub struct SuitabilityEngine;

impl SuitabilityEngine {
    /// Scores how well `project` fits `investor`.
    ///
    /// # Algorithm
    /// Start at 50 and apply, in order, each factor that triggers:
    /// 1. Risk match: excellent +25, good +15, fair +5, poor -15
    /// 2. Goal alignment: +15
    /// 3. Minimum investment above the investor's cap: -20
    /// 4. Category not yet held: +10
    ///
    /// # Errors
    /// `MissingRiskAssessment` when the project was never risk-assessed.
    pub fn score(
        investor: &Investor,
        project: &Project,
    ) -> Result<SuitabilityResult, SuitabilityError> {
        let risk = project
            .risk
            .as_ref()
            .ok_or(SuitabilityError::MissingRiskAssessment {
                project_id: project.id,
            })?;

        let profile = &investor.risk_profile;
        let mut score = SUITABILITY_BASE_SCORE;
        let mut factors = Vec::new();

        let risk_match =
            RiskScorer::match_risk(profile.effective_tolerance_score(), risk.overall_score());
        let risk_impact = match risk_match.match_level {
            MatchLevel::Excellent => 25.0,
            MatchLevel::Good => 15.0,
            MatchLevel::Fair => 5.0,
            MatchLevel::Poor => -15.0,
        };
        score += risk_impact;
        factors.push(SuitabilityFactor::new(
            "Risk Match",
            risk_impact,
            format!(
                "{} risk match: {}",
                risk_match.match_level,
                risk_match.risk_assessment.description()
            ),
        ));

        if Self::goals_align(investor, project) {
            score += 15.0;
            factors.push(SuitabilityFactor::new(
                "Goal Alignment",
                15.0,
                format!("Project type '{}' matches your investment goals", project.project_type),
            ));
        }

        let minimum = project.investment_metrics.min_investment_amount;
        if profile.has_investment_cap() && minimum > profile.max_investment_per_project {
            score -= 20.0;
            factors.push(SuitabilityFactor::new(
                "Investment Threshold",
                -20.0,
                format!(
                    "Minimum investment {:.2} exceeds your per-project maximum {:.2}",
                    minimum, profile.max_investment_per_project
                ),
            ));
        }

        if !investor.holds_category(project.category) {
            score += 10.0;
            factors.push(SuitabilityFactor::new(
                "Diversification",
                10.0,
                format!(
                    "Adds {} exposure to your portfolio",
                    project.category.as_str()
                ),
            ));
        }

        let score = score.clamp(0.0, 100.0);
        Ok(SuitabilityResult {
            score,
            factors,
            recommendation: SuitabilityLabel::from_score(score),
        })
    }

    /// Case-insensitive substring match in either direction between any goal
    /// and the project's free-text type.
    pub fn goals_align(investor: &Investor, project: &Project) -> bool {
        let project_type = project.project_type.trim().to_lowercase();
        if project_type.is_empty() {
            return false;
        }

        investor
            .risk_profile
            .investment_goals
            .iter()
            .map(|goal| goal.trim().to_lowercase())
            .filter(|goal| !goal.is_empty())
            .any(|goal| project_type.contains(&goal) || goal.contains(project_type.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::portfolio::{InvestmentLine, Portfolio};
    use crate::domain::project::{ProjectRisk, RiskLevel};
    use crate::domain::user::{RiskTolerance, UserRiskProfile};

    fn investor(profile: UserRiskProfile) -> Investor {
        let at = Timestamp::from_unix_secs(0);
        Investor::register(UserId::new("u1").unwrap(), "u1@example.com", None, at)
            .unwrap()
            .with_risk_profile(profile, at)
    }

    fn project(kind: &str, level: RiskLevel) -> Project {
        Project::new("Project", kind)
            .unwrap()
            .with_risk(ProjectRisk::uniform(level))
    }

    #[test]
    fn excellent_match_new_category_scores_85() {
        // moderate 60 vs medium 50: difference 10 -> excellent
        let result =
            SuitabilityEngine::score(&investor(UserRiskProfile::default()), &project("solar", RiskLevel::Medium))
                .unwrap();
        assert_eq!(result.score, 85.0);
        assert_eq!(result.recommendation, SuitabilityLabel::HighlyRecommended);
        let names: Vec<_> = result.factors.iter().map(|f| f.factor.as_str()).collect();
        assert_eq!(names, vec!["Risk Match", "Diversification"]);
    }

    #[test]
    fn all_factors_apply_in_order() {
        let profile = UserRiskProfile {
            tolerance: RiskTolerance::Conservative,
            max_investment_per_project: 50.0,
            ..UserRiskProfile::default()
        }
        .with_goal("Solar");
        let project = project("solar farm", RiskLevel::Extreme).with_min_investment(100.0);

        let result = SuitabilityEngine::score(&investor(profile), &project).unwrap();
        // 50 - 15 + 15 - 20 + 10
        assert_eq!(result.score, 40.0);
        assert_eq!(result.recommendation, SuitabilityLabel::NotRecommended);
        let impacts: Vec<_> = result.factors.iter().map(|f| f.impact).collect();
        assert_eq!(impacts, vec![-15.0, 15.0, -20.0, 10.0]);
    }

    #[test]
    fn held_category_skips_diversification() {
        let at = Timestamp::from_unix_secs(1);
        let held = project("wind park", RiskLevel::Medium);
        let portfolio = Portfolio::default()
            .with_investment(InvestmentLine {
                project_id: held.id,
                category: held.category,
                amount: 10.0,
                unit_price: 1.0,
                simulated: true,
            })
            .unwrap();
        let investor = investor(UserRiskProfile::default()).with_portfolio(portfolio, at);

        let result = SuitabilityEngine::score(&investor, &project("solar", RiskLevel::Medium)).unwrap();
        assert_eq!(result.score, 75.0);
        assert!(result.factors.iter().all(|f| f.factor != "Diversification"));
    }

    #[test]
    fn goal_matches_in_either_direction() {
        let profile = UserRiskProfile::default().with_goal("renewable solar energy");
        let investor = investor(profile);
        assert!(SuitabilityEngine::goals_align(&investor, &project("Solar", RiskLevel::Low)));
        assert!(!SuitabilityEngine::goals_align(&investor, &project("hospital", RiskLevel::Low)));
    }

    #[test]
    fn category_tag_alone_does_not_align_goals() {
        // "solar" is tagged energy, but only the project type is matched
        let profile = UserRiskProfile::default().with_goal("energy");
        let investor = investor(profile);
        let project = project("solar", RiskLevel::Medium);
        assert!(!SuitabilityEngine::goals_align(&investor, &project));

        let result = SuitabilityEngine::score(&investor, &project).unwrap();
        assert_eq!(result.score, 85.0);
        assert!(result.factors.iter().all(|f| f.factor != "Goal Alignment"));
    }

    #[test]
    fn blank_goal_never_matches() {
        let investor = investor(UserRiskProfile::default().with_goal("  "));
        assert!(!SuitabilityEngine::goals_align(&investor, &project("solar", RiskLevel::Low)));
    }

    #[test]
    fn cap_of_zero_means_unset() {
        let project = project("solar", RiskLevel::Medium).with_min_investment(1_000_000.0);
        let result =
            SuitabilityEngine::score(&investor(UserRiskProfile::default()), &project).unwrap();
        assert!(result.factors.iter().all(|f| f.factor != "Investment Threshold"));
    }

    #[test]
    fn missing_risk_is_an_error() {
        let project = Project::new("Unassessed", "solar").unwrap();
        let err = SuitabilityEngine::score(&investor(UserRiskProfile::default()), &project)
            .unwrap_err();
        assert_eq!(
            err,
            SuitabilityError::MissingRiskAssessment {
                project_id: project.id
            }
        );
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::MissingRiskAssessment);
    }

    #[test]
    fn labels_follow_thresholds() {
        assert_eq!(SuitabilityLabel::from_score(80.0), SuitabilityLabel::HighlyRecommended);
        assert_eq!(SuitabilityLabel::from_score(65.0), SuitabilityLabel::Recommended);
        assert_eq!(SuitabilityLabel::from_score(50.0), SuitabilityLabel::ConsiderWithCaution);
        assert_eq!(SuitabilityLabel::from_score(30.0), SuitabilityLabel::NotRecommended);
        assert_eq!(
            SuitabilityLabel::from_score(29.9),
            SuitabilityLabel::StronglyNotRecommended
        );
        assert_eq!(
            serde_json::to_value(SuitabilityLabel::ConsiderWithCaution).unwrap(),
            "Consider with Caution"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::project::{ProjectRisk, RiskLevel, RiskLevels};
    use crate::domain::user::UserRiskProfile;
    use proptest::prelude::*;

    fn level() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::Low),
            Just(RiskLevel::Medium),
            Just(RiskLevel::High),
            Just(RiskLevel::Extreme),
        ]
    }

    proptest! {
        /// Scores stay in range and repeat exactly for identical inputs.
        #[test]
        fn prop_score_bounded_and_deterministic(
            tolerance_score in 0.0f64..=100.0,
            cap in 0.0f64..10_000.0,
            minimum in 0.0f64..10_000.0,
            levels in (level(), level(), level(), level(), level()),
        ) {
            let at = Timestamp::from_unix_secs(0);
            let profile = UserRiskProfile {
                tolerance_score: Some(tolerance_score),
                max_investment_per_project: cap,
                ..UserRiskProfile::default()
            }
            .with_goal("energy");
            let investor = Investor::register(UserId::new("p").unwrap(), "p@x.io", None, at)
                .unwrap()
                .with_risk_profile(profile, at);
            let project = Project::new("P", "solar energy")
                .unwrap()
                .with_min_investment(minimum)
                .with_risk(ProjectRisk::new(RiskLevels {
                    regulatory_risk: levels.0,
                    execution_risk: levels.1,
                    market_risk: levels.2,
                    political_risk: levels.3,
                    environmental_risk: levels.4,
                }));

            let first = SuitabilityEngine::score(&investor, &project).unwrap();
            let second = SuitabilityEngine::score(&investor, &project).unwrap();
            prop_assert!(first.score >= 0.0 && first.score <= 100.0);
            prop_assert_eq!(first, second);
        }
    }
}
