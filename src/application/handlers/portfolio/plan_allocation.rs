//! PlanAllocation - Query handler building a tier-driven allocation plan.

use std::sync::Arc;

use crate::domain::advisory::{AllocationTier, PortfolioAllocationPlan, PortfolioAllocator};
use crate::domain::foundation::{DomainError, ProjectId, UserId};
use crate::ports::{ProjectRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct PlanAllocationQuery {
    pub user_id: UserId,
    /// Explicit tier; the investor's profile tolerance decides when absent.
    pub tier: Option<AllocationTier>,
    /// Projects to allocate across; every listed project when absent.
    pub project_ids: Option<Vec<ProjectId>>,
}

pub struct PlanAllocationHandler {
    users: Arc<dyn UserRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl PlanAllocationHandler {
    pub fn new(users: Arc<dyn UserRepository>, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { users, projects }
    }

    pub async fn handle(
        &self,
        query: PlanAllocationQuery,
    ) -> Result<PortfolioAllocationPlan, DomainError> {
        let tier = match query.tier {
            Some(tier) => tier,
            None => {
                let investor = self
                    .users
                    .find_by_id(&query.user_id)
                    .await?
                    .ok_or_else(|| DomainError::user_not_found(&query.user_id))?;
                AllocationTier::from_tolerance(investor.risk_profile.tolerance)
            }
        };

        let projects = match query.project_ids {
            Some(ids) => {
                let mut selected = Vec::with_capacity(ids.len());
                for id in ids {
                    let project = self
                        .projects
                        .find_by_id(&id)
                        .await?
                        .ok_or_else(|| DomainError::project_not_found(id))?;
                    selected.push(project);
                }
                selected
            }
            None => self.projects.list().await?,
        };

        let plan = PortfolioAllocator::allocate(tier, &projects)?;
        tracing::debug!(
            user_id = %query.user_id,
            %tier,
            projects = plan.allocations.len(),
            "Allocation planned"
        );
        Ok(plan)
    }
}
