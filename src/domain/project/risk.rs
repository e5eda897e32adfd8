//! Project risk assessment.
//!
//! The overall score is a fixed weighted sum of five categorical risks. The
//! struct keeps its fields private so the score can never drift from its
//! constituents: every setter recomputes it, and deserialization ignores any
//! stored score and recomputes as well.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    /// Numeric value on the 0-100 scale.
    pub fn value(&self) -> f64 {
        match self {
            RiskLevel::Low => 25.0,
            RiskLevel::Medium => 50.0,
            RiskLevel::High => 75.0,
            RiskLevel::Extreme => 100.0,
        }
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        RiskLevel::Medium
    }
}

pub const REGULATORY_WEIGHT: f64 = 0.20;
pub const EXECUTION_WEIGHT: f64 = 0.30;
pub const MARKET_WEIGHT: f64 = 0.20;
pub const POLITICAL_WEIGHT: f64 = 0.15;
pub const ENVIRONMENTAL_WEIGHT: f64 = 0.15;

/// Risk bucket used for allocation and volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    HighRisk,
    MediumRisk,
    LowRisk,
}

impl RiskCategory {
    /// Bucket for a 0-100 risk score: >=65 high, >=35 medium, else low.
    pub fn from_score(score: f64) -> Self {
        if score >= 65.0 {
            RiskCategory::HighRisk
        } else if score >= 35.0 {
            RiskCategory::MediumRisk
        } else {
            RiskCategory::LowRisk
        }
    }

    /// Monthly volatility used by the performance random walk.
    pub fn monthly_volatility(&self) -> f64 {
        match self {
            RiskCategory::HighRisk => 0.04,
            RiskCategory::MediumRisk => 0.025,
            RiskCategory::LowRisk => 0.01,
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCategory::HighRisk => write!(f, "highRisk"),
            RiskCategory::MediumRisk => write!(f, "mediumRisk"),
            RiskCategory::LowRisk => write!(f, "lowRisk"),
        }
    }
}

/// The five categorical inputs of a project's risk assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub regulatory_risk: RiskLevel,
    pub execution_risk: RiskLevel,
    pub market_risk: RiskLevel,
    pub political_risk: RiskLevel,
    pub environmental_risk: RiskLevel,
}

/// Weighted risk assessment of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRisk")]
pub struct ProjectRisk {
    overall_score: f64,
    #[serde(flatten)]
    levels: RiskLevels,
}

/// Wire shape accepted on input; a stored `overall_score` is ignored.
#[derive(Deserialize)]
struct StoredRisk {
    #[serde(flatten)]
    levels: RiskLevels,
}

impl From<StoredRisk> for ProjectRisk {
    fn from(stored: StoredRisk) -> Self {
        ProjectRisk::new(stored.levels)
    }
}

impl ProjectRisk {
    pub fn new(levels: RiskLevels) -> Self {
        let mut risk = Self {
            overall_score: 0.0,
            levels,
        };
        risk.recompute();
        risk
    }

    /// Uniform assessment with every category at `level`.
    pub fn uniform(level: RiskLevel) -> Self {
        Self::new(RiskLevels {
            regulatory_risk: level,
            execution_risk: level,
            market_risk: level,
            political_risk: level,
            environmental_risk: level,
        })
    }

    /// Weighted score of the given levels.
    pub fn weighted_score(levels: &RiskLevels) -> f64 {
        levels.regulatory_risk.value() * REGULATORY_WEIGHT
            + levels.execution_risk.value() * EXECUTION_WEIGHT
            + levels.market_risk.value() * MARKET_WEIGHT
            + levels.political_risk.value() * POLITICAL_WEIGHT
            + levels.environmental_risk.value() * ENVIRONMENTAL_WEIGHT
    }

    /// Recomputes the overall score from the current levels.
    pub fn recompute(&mut self) -> f64 {
        self.overall_score = Self::weighted_score(&self.levels);
        self.overall_score
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn levels(&self) -> &RiskLevels {
        &self.levels
    }

    pub fn category(&self) -> RiskCategory {
        RiskCategory::from_score(self.overall_score)
    }

    pub fn set_regulatory(&mut self, level: RiskLevel) {
        self.levels.regulatory_risk = level;
        self.recompute();
    }

    pub fn set_execution(&mut self, level: RiskLevel) {
        self.levels.execution_risk = level;
        self.recompute();
    }

    pub fn set_market(&mut self, level: RiskLevel) {
        self.levels.market_risk = level;
        self.recompute();
    }

    pub fn set_political(&mut self, level: RiskLevel) {
        self.levels.political_risk = level;
        self.recompute();
    }

    pub fn set_environmental(&mut self, level: RiskLevel) {
        self.levels.environmental_risk = level;
        self.recompute();
    }
}
