//! Investor - the user record the advisory engines read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::UserRiskProfile;
use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::portfolio::Portfolio;
use crate::domain::project::ProjectCategory;

/// A registered investor with risk profile, knowledge and portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub risk_profile: UserRiskProfile,
    /// Self-assessed knowledge per topic, 0-100.
    #[serde(default)]
    pub knowledge_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub portfolio: Portfolio,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Investor {
    /// Registers an investor with a default risk profile and empty portfolio.
    pub fn register(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing '@'"));
        }

        Ok(Self {
            id,
            email,
            display_name: display_name.filter(|n| !n.trim().is_empty()),
            risk_profile: UserRiskProfile::default(),
            knowledge_scores: BTreeMap::new(),
            portfolio: Portfolio::default(),
            created_at: at,
            updated_at: at,
        })
    }

    /// Knowledge score for a topic; unknown topics count as 0.
    pub fn knowledge_score(&self, topic: &str) -> f64 {
        self.knowledge_scores.get(topic).copied().unwrap_or(0.0)
    }

    pub fn with_knowledge_score(
        mut self,
        topic: impl Into<String>,
        score: f64,
    ) -> Result<Self, ValidationError> {
        if !(0.0..=100.0).contains(&score) {
            return Err(ValidationError::out_of_range(
                "knowledge_score",
                0.0,
                100.0,
                score,
            ));
        }
        self.knowledge_scores.insert(topic.into(), score);
        Ok(self)
    }

    pub fn with_risk_profile(mut self, profile: UserRiskProfile, at: Timestamp) -> Self {
        self.risk_profile = profile;
        self.updated_at = at;
        self
    }

    pub fn with_portfolio(mut self, portfolio: Portfolio, at: Timestamp) -> Self {
        self.portfolio = portfolio;
        self.updated_at = at;
        self
    }

    /// Whether the investor already holds a project of this category.
    pub fn holds_category(&self, category: ProjectCategory) -> bool {
        self.portfolio.holds_category(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProjectId;
    use crate::domain::portfolio::InvestmentLine;
    use crate::domain::user::RiskTolerance;

    fn investor() -> Investor {
        Investor::register(
            UserId::new("user-1").unwrap(),
            "ada@example.com",
            Some("Ada".to_string()),
            Timestamp::from_unix_secs(0),
        )
        .unwrap()
    }

    #[test]
    fn register_uses_profile_defaults() {
        let investor = investor();
        assert_eq!(investor.risk_profile.tolerance, RiskTolerance::Moderate);
        assert!(investor.risk_profile.investment_goals.is_empty());
        assert!(investor.portfolio.holdings.is_empty());
        assert_eq!(investor.created_at, investor.updated_at);
    }

    #[test]
    fn register_rejects_bad_email() {
        let id = UserId::new("user-1").unwrap();
        let at = Timestamp::from_unix_secs(0);
        assert!(Investor::register(id.clone(), "  ", None, at).is_err());
        assert!(Investor::register(id, "not-an-email", None, at).is_err());
    }

    #[test]
    fn blank_display_name_is_dropped() {
        let investor = Investor::register(
            UserId::new("user-1").unwrap(),
            "a@b.c",
            Some(" ".to_string()),
            Timestamp::from_unix_secs(0),
        )
        .unwrap();
        assert_eq!(investor.display_name, None);
    }

    #[test]
    fn missing_knowledge_counts_as_zero() {
        let investor = investor().with_knowledge_score("energy", 70.0).unwrap();
        assert_eq!(investor.knowledge_score("energy"), 70.0);
        assert_eq!(investor.knowledge_score("water"), 0.0);
    }

    #[test]
    fn knowledge_score_must_be_a_percentage() {
        assert!(investor().with_knowledge_score("energy", 101.0).is_err());
        assert!(investor().with_knowledge_score("energy", -1.0).is_err());
    }

    #[test]
    fn holds_category_reads_portfolio() {
        let at = Timestamp::from_unix_secs(10);
        let portfolio = Portfolio::default()
            .with_investment(InvestmentLine {
                project_id: ProjectId::new(),
                category: ProjectCategory::Energy,
                amount: 100.0,
                unit_price: 1.0,
                simulated: true,
            })
            .unwrap();
        let investor = investor().with_portfolio(portfolio, at);
        assert!(investor.holds_category(ProjectCategory::Energy));
        assert!(!investor.holds_category(ProjectCategory::Water));
        assert_eq!(investor.updated_at, at);
    }

    #[test]
    fn deserializes_minimal_record() {
        let json = r#"{
            "id": "user-9",
            "email": "x@y.z",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let investor: Investor = serde_json::from_str(json).unwrap();
        assert_eq!(investor.risk_profile, UserRiskProfile::default());
        assert!(investor.knowledge_scores.is_empty());
    }
}
