//! End-to-end flows through the application handlers.
//!
//! Handlers are wired exactly as in `main.rs`, but against the in-memory
//! repositories, key-value store and ledger. Events are mirrored through the
//! ledger publisher so the tests can read them back from the topic.

use std::collections::BTreeSet;
use std::sync::Arc;

use infravest::adapters::events::LedgerEventPublisher;
use infravest::adapters::ledger::InMemoryLedger;
use infravest::adapters::storage::{
    InMemoryKeyValueStore, InMemoryProjectRepository, InMemoryUserRepository,
};
use infravest::application::handlers::advisory::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler,
    GetLatestRecommendationsHandler, GetLatestRecommendationsQuery, SimulateInvestmentCommand,
    SimulateInvestmentHandler,
};
use infravest::application::handlers::investor::{
    RegisterInvestorCommand, RegisterInvestorHandler, UpdateRiskProfileCommand,
    UpdateRiskProfileHandler,
};
use infravest::application::handlers::project::{
    CreateProjectTokenCommand, CreateProjectTokenHandler, GetTokenBalanceHandler,
    GetTokenBalanceQuery, InvestInProjectCommand, InvestInProjectHandler,
};
use infravest::domain::foundation::{CommandMetadata, ErrorCode, EventEnvelope, UserId};
use infravest::domain::project::{Project, ProjectRisk, RiskLevel, Tokenomics};
use infravest::domain::user::{RiskAssessment, RiskTolerance, TimeHorizon};
use infravest::ports::ProjectRepository;

const TOPIC: &str = "infravest-events";
const TREASURY: &str = "treasury";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct App {
    projects: Arc<InMemoryProjectRepository>,
    ledger: Arc<InMemoryLedger>,
    register: RegisterInvestorHandler,
    update_risk: UpdateRiskProfileHandler,
    generate: GenerateRecommendationsHandler,
    latest: GetLatestRecommendationsHandler,
    simulate: SimulateInvestmentHandler,
    create_token: CreateProjectTokenHandler,
    balance: GetTokenBalanceHandler,
    invest: InvestInProjectHandler,
}

impl App {
    fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let store = Arc::new(InMemoryKeyValueStore::new());
        let ledger = Arc::new(InMemoryLedger::new());
        let publisher = Arc::new(LedgerEventPublisher::new(ledger.clone(), TOPIC));

        Self {
            register: RegisterInvestorHandler::new(users.clone()),
            update_risk: UpdateRiskProfileHandler::new(users.clone(), publisher.clone()),
            generate: GenerateRecommendationsHandler::new(
                users.clone(),
                projects.clone(),
                store.clone(),
                publisher.clone(),
            ),
            latest: GetLatestRecommendationsHandler::new(store.clone()),
            simulate: SimulateInvestmentHandler::new(
                users.clone(),
                projects.clone(),
                publisher.clone(),
            ),
            create_token: CreateProjectTokenHandler::new(
                projects.clone(),
                ledger.clone(),
                publisher,
                TREASURY,
            ),
            balance: GetTokenBalanceHandler::new(projects.clone(), ledger.clone(), store.clone()),
            invest: InvestInProjectHandler::new(
                users,
                projects.clone(),
                ledger.clone(),
                store,
                TREASURY,
            ),
            projects,
            ledger,
        }
    }

    async fn add_project(&self, name: &str, project_type: &str, level: RiskLevel) -> Project {
        let project = Project::new(name, project_type)
            .unwrap()
            .with_risk(ProjectRisk::uniform(level))
            .with_expected_return(12.0)
            .with_min_investment(100.0)
            .with_tokenomics(Tokenomics::new("INF", 1_000_000, 500_000.0));
        self.projects.save(&project).await.unwrap();
        project
    }

    async fn onboard(&self, tolerance: RiskTolerance) {
        self.register
            .handle(
                RegisterInvestorCommand {
                    user_id: user_id(),
                    email: "ada@example.com".to_string(),
                    display_name: Some("Ada".to_string()),
                },
                metadata(),
            )
            .await
            .unwrap();

        self.update_risk
            .handle(
                UpdateRiskProfileCommand {
                    user_id: user_id(),
                    assessment: RiskAssessment {
                        tolerance,
                        investment_goals: Some(BTreeSet::from(["solar".to_string()])),
                        time_horizon: Some(TimeHorizon::Long),
                        max_investment_per_project: Some(5_000.0),
                    },
                },
                metadata(),
            )
            .await
            .unwrap();
    }

    async fn mirrored_event_types(&self) -> Vec<String> {
        self.ledger
            .messages(TOPIC)
            .await
            .iter()
            .map(|bytes| {
                serde_json::from_slice::<EventEnvelope>(bytes)
                    .unwrap()
                    .event_type
            })
            .collect()
    }
}

fn user_id() -> UserId {
    UserId::new("investor-ada").unwrap()
}

fn metadata() -> CommandMetadata {
    CommandMetadata::new(user_id()).with_correlation_id("flow-test")
}

// =============================================================================
// Recommendations
// =============================================================================

#[tokio::test]
async fn recommendations_are_ranked_stored_and_mirrored() {
    let app = App::new();
    app.add_project("Desert Array", "Solar farm", RiskLevel::Low).await;
    app.add_project("Coastal Wind", "Offshore wind", RiskLevel::Medium).await;
    app.add_project("Frontier Hydro", "Hydro dam", RiskLevel::Extreme).await;
    app.onboard(RiskTolerance::Moderate).await;

    let result = app
        .generate
        .handle(GenerateRecommendationsCommand { user_id: user_id() }, metadata())
        .await
        .unwrap();

    let scores: Vec<f64> = result
        .record
        .projects
        .iter()
        .map(|p| p.suitability_score)
        .collect();
    assert_eq!(scores.len(), 3);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "not sorted: {:?}", scores);
    assert!(scores.iter().all(|s| (0.0..=100.0).contains(s)));
    assert_eq!(result.mirror_error, None);

    let latest = app
        .latest
        .handle(GetLatestRecommendationsQuery { user_id: user_id() })
        .await
        .unwrap()
        .expect("record stored");
    assert_eq!(latest, result.record);

    let mirrored = app.mirrored_event_types().await;
    assert!(mirrored.contains(&"risk_profile.updated.v1".to_string()));
    assert!(mirrored.contains(&"recommendations.generated.v1".to_string()));
}

#[tokio::test]
async fn projects_without_risk_assessment_are_skipped() {
    let app = App::new();
    app.add_project("Desert Array", "Solar farm", RiskLevel::Low).await;
    let unassessed = Project::new("Grid Battery", "Battery storage").unwrap();
    app.projects.save(&unassessed).await.unwrap();
    app.onboard(RiskTolerance::Moderate).await;

    let result = app
        .generate
        .handle(GenerateRecommendationsCommand { user_id: user_id() }, metadata())
        .await
        .unwrap();

    assert_eq!(result.skipped_unassessed, 1);
    assert_eq!(result.record.projects.len(), 1);
    assert_eq!(result.record.projects[0].name, "Desert Array");
}

#[tokio::test]
async fn mirror_failure_keeps_the_computed_result() {
    let app = App::new();
    app.add_project("Desert Array", "Solar farm", RiskLevel::Low).await;
    app.onboard(RiskTolerance::Conservative).await;
    app.ledger.set_reject_messages(true);

    let result = app
        .generate
        .handle(GenerateRecommendationsCommand { user_id: user_id() }, metadata())
        .await
        .unwrap();

    assert!(result.mirror_error.is_some());
    let latest = app
        .latest
        .handle(GetLatestRecommendationsQuery { user_id: user_id() })
        .await
        .unwrap();
    assert_eq!(latest, Some(result.record));
}

// =============================================================================
// Simulation
// =============================================================================

#[tokio::test]
async fn simulation_compounds_monthly_and_updates_portfolio() {
    let app = App::new();
    let project = app.add_project("Desert Array", "Solar farm", RiskLevel::Low).await;
    app.onboard(RiskTolerance::Moderate).await;

    let result = app
        .simulate
        .handle(
            SimulateInvestmentCommand {
                user_id: user_id(),
                project_id: project.id,
                amount: 1_000.0,
                duration_months: Some(12),
            },
            metadata(),
        )
        .await
        .unwrap();

    assert!((result.simulation.final_value - 1_126.83).abs() < 0.01);
    assert_eq!(result.simulation.monthly_projections.len(), 13);
    assert!((result.portfolio.simulated_value - 1_000.0).abs() < 1e-9);
    assert!(app
        .mirrored_event_types()
        .await
        .contains(&"investment.simulated.v1".to_string()));
}

#[tokio::test]
async fn simulation_below_minimum_names_the_minimum() {
    let app = App::new();
    let project = app.add_project("Desert Array", "Solar farm", RiskLevel::Low).await;
    app.onboard(RiskTolerance::Moderate).await;

    let err = app
        .simulate
        .handle(
            SimulateInvestmentCommand {
                user_id: user_id(),
                project_id: project.id,
                amount: 50.0,
                duration_months: None,
            },
            metadata(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InsufficientAmount);
    assert_eq!(err.details.get("minimum").map(String::as_str), Some("100.00"));
}

// =============================================================================
// Tokenization and investment
// =============================================================================

#[tokio::test]
async fn tokenize_invest_and_read_balance() {
    let app = App::new();
    let project = app.add_project("Desert Array", "Solar farm", RiskLevel::Low).await;
    app.onboard(RiskTolerance::Moderate).await;

    let created = app
        .create_token
        .handle(CreateProjectTokenCommand { project_id: project.id }, metadata())
        .await
        .unwrap();
    assert_eq!(created.project.ledger_token_id.as_deref(), Some(created.token_id.as_str()));

    let treasury_before = app
        .balance
        .handle(GetTokenBalanceQuery {
            project_id: project.id,
            account_id: TREASURY.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(treasury_before.balance, 100_000_000);

    // 100 at 0.5 per unit buys 200 units, 20_000 in the smallest denomination.
    let invested = app
        .invest
        .handle(
            InvestInProjectCommand {
                user_id: user_id(),
                project_id: project.id,
                amount: 100.0,
                account_id: "0.0.4242".to_string(),
            },
            metadata(),
        )
        .await
        .unwrap();
    assert!((invested.units - 200.0).abs() < 1e-9);
    assert!((invested.portfolio.total_value - 100.0).abs() < 1e-9);

    let investor_balance = app
        .balance
        .handle(GetTokenBalanceQuery {
            project_id: project.id,
            account_id: "0.0.4242".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(investor_balance.balance, 20_000);

    // The cached treasury balance was evicted by the transfer.
    let treasury_after = app
        .balance
        .handle(GetTokenBalanceQuery {
            project_id: project.id,
            account_id: TREASURY.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(treasury_after.balance, 100_000_000 - 20_000);

    assert!(app
        .mirrored_event_types()
        .await
        .contains(&"project.token_created.v1".to_string()));
}

#[tokio::test]
async fn tokenizing_twice_conflicts() {
    let app = App::new();
    let project = app.add_project("Desert Array", "Solar farm", RiskLevel::Low).await;

    app.create_token
        .handle(CreateProjectTokenCommand { project_id: project.id }, metadata())
        .await
        .unwrap();
    let err = app
        .create_token
        .handle(CreateProjectTokenCommand { project_id: project.id }, metadata())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Conflict);
    assert_eq!(app.ledger.token_count().await, 1);
}
