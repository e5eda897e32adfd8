//! Advisory Module - Pure services behind recommendations and simulations.
//!
//! # Components
//!
//! - `RiskScorer` - Risk matching and project risk classification
//! - `SuitabilityEngine` - Multi-factor suitability score with factor breakdown
//! - `RecommendationGenerator` - Ranked recommendations plus narrative advice
//! - `InvestmentSimulator` - Monthly compounding projection
//! - `PortfolioAllocator` - Tier-driven allocation across risk buckets
//! - `PerformanceSimulator` - Random-walk projection and rebalancing deltas
//!
//! Everything here is synchronous and free of I/O. Handlers in the
//! application layer load inputs through ports and persist results.

mod allocator;
mod events;
mod investment_simulator;
mod performance;
mod recommendation;
mod risk_scorer;
mod suitability;

pub use allocator::{
    AllocationByRisk, AllocationError, AllocationTier, BucketSplit, PortfolioAllocationPlan,
    PortfolioAllocator, ProjectAllocation, REMAINDER_THRESHOLD,
};
pub use events::{InvestmentSimulated, RecommendationsGenerated};
pub use investment_simulator::{
    InvestmentSimulator, MonthlyProjection, SimulationError, SimulationResult,
    DEFAULT_SIMULATION_MONTHS, MAX_SIMULATION_MONTHS,
};
pub use performance::{
    PerformanceError, PerformanceInput, PerformancePoint, PerformanceSimulation,
    PerformanceSimulator, ProjectPerformance, RandomSource, RebalanceAction, RebalanceDirection,
    ScriptedRandom, SeededRandom, TargetAllocation, REBALANCE_TOLERANCE,
};
pub use recommendation::{
    ProjectRecommendation, RecommendationGenerator, RecommendationRecord, KNOWLEDGE_THRESHOLD,
    LARGE_MINIMUM_THRESHOLD,
};
pub use risk_scorer::{MatchLevel, RiskAlignment, RiskMatch, RiskScorer, HEURISTIC_BASE_SCORE};
pub use suitability::{
    SuitabilityEngine, SuitabilityError, SuitabilityFactor, SuitabilityLabel, SuitabilityResult,
    SUITABILITY_BASE_SCORE,
};
