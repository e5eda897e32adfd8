//! Project record as read from persistence.

use serde::{Deserialize, Serialize};

use super::{ProjectCategory, ProjectRisk, Tokenomics, TokenomicsError};
use crate::domain::foundation::{ProjectId, ValidationError};

/// Development phase of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPhase {
    Planning,
    Construction,
    Operational,
    Expansion,
}

impl Default for ProjectPhase {
    fn default() -> Self {
        ProjectPhase::Planning
    }
}

/// How involved the permitting/regulatory process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulatoryComplexity {
    Low,
    Medium,
    High,
}

impl Default for RegulatoryComplexity {
    fn default() -> Self {
        RegulatoryComplexity::Medium
    }
}

/// Financial projections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    /// Expected annual return in percent (12.0 means 12%).
    pub expected_return: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payback_period_years: Option<f64>,
}

/// Investment constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub min_investment_amount: f64,
    /// Price of one token; when absent the token's tokenomics decide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_price: Option<f64>,
}

impl Default for InvestmentMetrics {
    fn default() -> Self {
        Self {
            min_investment_amount: 0.0,
            token_price: None,
        }
    }
}

/// An infrastructure project open for micro-investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Free-text type the project was created with.
    pub project_type: String,
    pub category: ProjectCategory,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phase: ProjectPhase,
    #[serde(default)]
    pub duration_months: u32,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub regulatory_complexity: RegulatoryComplexity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<ProjectRisk>,
    #[serde(default)]
    pub financials: Financials,
    #[serde(default)]
    pub investment_metrics: InvestmentMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenomics: Option<Tokenomics>,
    /// Token id assigned by the ledger once the token exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_token_id: Option<String>,
}

impl Project {
    /// Creates a project, deriving its category from the free-text type.
    pub fn new(
        name: impl Into<String>,
        project_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let project_type = project_type.into();
        let category = ProjectCategory::from_free_text(&project_type);

        Ok(Self {
            id: ProjectId::new(),
            name,
            project_type,
            category,
            location: String::new(),
            phase: ProjectPhase::default(),
            duration_months: 0,
            budget: 0.0,
            regulatory_complexity: RegulatoryComplexity::default(),
            risk: None,
            financials: Financials::default(),
            investment_metrics: InvestmentMetrics::default(),
            tokenomics: None,
            ledger_token_id: None,
        })
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_risk(mut self, risk: ProjectRisk) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn with_expected_return(mut self, percent: f64) -> Self {
        self.financials.expected_return = percent;
        self
    }

    pub fn with_min_investment(mut self, amount: f64) -> Self {
        self.investment_metrics.min_investment_amount = amount;
        self
    }

    pub fn with_phase(mut self, phase: ProjectPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_duration_months(mut self, months: u32) -> Self {
        self.duration_months = months;
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_regulatory_complexity(mut self, complexity: RegulatoryComplexity) -> Self {
        self.regulatory_complexity = complexity;
        self
    }

    pub fn with_tokenomics(mut self, tokenomics: Tokenomics) -> Self {
        self.tokenomics = Some(tokenomics);
        self
    }

    /// Price at which new units are issued.
    ///
    /// Explicit token price first, then tokenomics valuation, then 1.0 for
    /// projects that have not been tokenized yet.
    pub fn unit_price(&self) -> Result<f64, TokenomicsError> {
        if let Some(price) = self.investment_metrics.token_price {
            if price <= 0.0 {
                return Err(TokenomicsError::ZeroPrice);
            }
            return Ok(price);
        }
        match &self.tokenomics {
            Some(tokenomics) => tokenomics.price_per_token(),
            None => Ok(1.0),
        }
    }
}
