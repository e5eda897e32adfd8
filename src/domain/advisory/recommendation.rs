//! Recommendation Generator - Ranked project recommendations and advice.

use serde::{Deserialize, Serialize};

use super::{
    MatchLevel, RiskAlignment, RiskScorer, SuitabilityEngine, SuitabilityError,
    SuitabilityFactor, SuitabilityLabel,
};
use crate::domain::foundation::{ProjectId, Timestamp, UserId};
use crate::domain::project::{Project, ProjectCategory, SdgGoal};
use crate::domain::user::Investor;

/// Minimum investment above which a smaller position is suggested.
pub const LARGE_MINIMUM_THRESHOLD: f64 = 1000.0;

/// Knowledge score below which education is suggested.
pub const KNOWLEDGE_THRESHOLD: f64 = 50.0;

/// One scored project in a recommendation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecommendation {
    pub project_id: ProjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub category: ProjectCategory,
    pub location: String,
    pub expected_return: f64,
    pub min_investment: f64,
    pub suitability_score: f64,
    pub factors: Vec<SuitabilityFactor>,
    pub recommendation: SuitabilityLabel,
    pub sdg_goals: Vec<SdgGoal>,
}

/// Latest recommendations for an investor, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub user_id: UserId,
    pub timestamp: Timestamp,
    pub projects: Vec<ProjectRecommendation>,
}

impl RecommendationRecord {
    pub fn top(&self, limit: usize) -> &[ProjectRecommendation] {
        &self.projects[..limit.min(self.projects.len())]
    }
}

/// Recommendation functions.
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    /// Scores every project and orders the results by score, highest first.
    ///
    /// Ties keep input order. Project ids are not deduplicated.
    pub fn generate(
        investor: &Investor,
        projects: &[Project],
        at: Timestamp,
    ) -> Result<RecommendationRecord, SuitabilityError> {
        let mut entries = projects
            .iter()
            .map(|project| {
                let result = SuitabilityEngine::score(investor, project)?;
                Ok(ProjectRecommendation {
                    project_id: project.id,
                    name: project.name.clone(),
                    project_type: project.project_type.clone(),
                    category: project.category,
                    location: project.location.clone(),
                    expected_return: project.financials.expected_return,
                    min_investment: project.investment_metrics.min_investment_amount,
                    suitability_score: result.score,
                    factors: result.factors,
                    recommendation: result.recommendation,
                    sdg_goals: project.category.sdg_goals(),
                })
            })
            .collect::<Result<Vec<_>, SuitabilityError>>()?;

        // Vec::sort_by is stable
        entries.sort_by(|a, b| b.suitability_score.total_cmp(&a.suitability_score));

        Ok(RecommendationRecord {
            user_id: investor.id.clone(),
            timestamp: at,
            projects: entries,
        })
    }

    /// Advisory text for one project, independent of its score.
    pub fn personalized_recommendations(investor: &Investor, project: &Project) -> Vec<String> {
        let mut advice = Vec::new();

        let project_score = RiskScorer::project_risk_score(project);
        let risk_match = RiskScorer::match_risk(
            investor.risk_profile.effective_tolerance_score(),
            project_score,
        );
        if risk_match.match_level == MatchLevel::Poor {
            match risk_match.risk_assessment {
                RiskAlignment::TooRisky => advice.push(
                    "This project carries more risk than your profile suggests. Consider lower-risk projects or a smaller position.".to_string(),
                ),
                RiskAlignment::TooConservative => advice.push(
                    "This project is more conservative than your profile. Consider higher-return projects to match your risk appetite.".to_string(),
                ),
                RiskAlignment::Aligned => {}
            }
        }

        let minimum = project.investment_metrics.min_investment_amount;
        if minimum > LARGE_MINIMUM_THRESHOLD {
            advice.push(format!(
                "The minimum investment of {:.2} is significant. Start with a smaller position in a related project before committing more.",
                minimum
            ));
        }

        if investor.holds_category(project.category) {
            advice.push(format!(
                "You already hold {} projects. Consider diversifying into other sectors.",
                project.category.as_str()
            ));
        }

        let topic = project.category.as_str();
        if investor.knowledge_score(topic) < KNOWLEDGE_THRESHOLD {
            advice.push(format!(
                "Learn more about {} infrastructure before investing.",
                topic
            ));
        }

        advice
    }
}
