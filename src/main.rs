//! Infravest API server.
//!
//! Loads configuration, wires adapters into application handlers and serves
//! the REST API until interrupted.

use std::error::Error;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use infravest::adapters::auth::{JwtConfig, JwtSessionAdapter};
use infravest::adapters::events::LedgerEventPublisher;
use infravest::adapters::http::{
    api_router, AdvisoryHandlers, ApiState, PortfolioHandlers, ProfileHandlers, ProjectHandlers,
    RouterOptions,
};
use infravest::adapters::ledger::{HttpLedgerConfig, HttpLedgerGateway, InMemoryLedger};
use infravest::adapters::postgres::{
    run_migrations, PostgresProjectRepository, PostgresUserRepository,
};
use infravest::adapters::storage::{
    InMemoryKeyValueStore, InMemoryProjectRepository, InMemoryUserRepository, RedisKeyValueStore,
};
use infravest::application::{
    CreateProjectTokenHandler, GenerateRecommendationsHandler, GetInvestorHandler,
    GetLatestRecommendationsHandler, GetProjectSuitabilityHandler, GetTokenBalanceHandler,
    InvestInProjectHandler, PlanAllocationHandler, RebalancePortfolioHandler,
    RecordKnowledgeScoreHandler, RegisterInvestorHandler, SimulateInvestmentHandler,
    SimulatePerformanceHandler, UpdateRiskProfileHandler,
};
use infravest::config::{AppConfig, DatabaseConfig, LedgerConfig, RedisConfig, ServerConfig};
use infravest::ports::{
    EventPublisher, KeyValueStore, LedgerGateway, ProjectRepository, SessionValidator,
    UserRepository,
};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        postgres = config.database.is_some(),
        redis = config.redis.is_some(),
        remote_ledger = config.ledger.is_remote(),
        "Starting infravest"
    );

    let (projects, users) = repositories(config.database.as_ref()).await?;
    let store = key_value_store(config.redis.as_ref()).await?;
    let ledger = ledger_gateway(&config.ledger)?;
    let publisher: Arc<dyn EventPublisher> = Arc::new(LedgerEventPublisher::new(
        ledger.clone(),
        config.ledger.topic_id.clone(),
    ));

    let sessions: Arc<dyn SessionValidator> = Arc::new(JwtSessionAdapter::new(
        JwtConfig::new(
            config.auth.jwt_secret.expose_secret().clone(),
            config.auth.issuer.clone(),
            config.auth.audience.clone(),
        )
        .with_token_ttl(config.auth.token_ttl()),
    ));

    let advisory = &config.advisory;
    let treasury = config.ledger.treasury_account.clone();

    let state = ApiState {
        advisory: AdvisoryHandlers::new(
            Arc::new(
                GenerateRecommendationsHandler::new(
                    users.clone(),
                    projects.clone(),
                    store.clone(),
                    publisher.clone(),
                )
                .with_max_recommendations(advisory.max_recommendations),
            ),
            Arc::new(GetLatestRecommendationsHandler::new(store.clone())),
            Arc::new(
                SimulateInvestmentHandler::new(users.clone(), projects.clone(), publisher.clone())
                    .with_default_months(advisory.default_simulation_months),
            ),
        ),
        projects: ProjectHandlers::new(
            Arc::new(GetProjectSuitabilityHandler::new(
                users.clone(),
                projects.clone(),
            )),
            Arc::new(CreateProjectTokenHandler::new(
                projects.clone(),
                ledger.clone(),
                publisher.clone(),
                treasury.clone(),
            )),
            Arc::new(
                GetTokenBalanceHandler::new(projects.clone(), ledger.clone(), store.clone())
                    .with_ttl(advisory.token_cache_ttl()),
            ),
            Arc::new(InvestInProjectHandler::new(
                users.clone(),
                projects.clone(),
                ledger.clone(),
                store.clone(),
                treasury,
            )),
        ),
        profile: ProfileHandlers::new(
            Arc::new(RegisterInvestorHandler::new(users.clone())),
            Arc::new(GetInvestorHandler::new(users.clone())),
            Arc::new(UpdateRiskProfileHandler::new(
                users.clone(),
                publisher.clone(),
            )),
            Arc::new(RecordKnowledgeScoreHandler::new(users.clone())),
        ),
        portfolio: PortfolioHandlers::new(
            Arc::new(PlanAllocationHandler::new(users.clone(), projects.clone())),
            Arc::new(
                SimulatePerformanceHandler::new(projects.clone())
                    .with_default_months(advisory.default_performance_months),
            ),
            Arc::new(RebalancePortfolioHandler::new()),
        ),
        auth: sessions,
    };

    let options = RouterOptions {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    };
    let app = api_router(state, &options);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));

    if server.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn repositories(
    database: Option<&DatabaseConfig>,
) -> Result<(Arc<dyn ProjectRepository>, Arc<dyn UserRepository>), BoxError> {
    let Some(database) = database else {
        tracing::warn!("No database configured, using in-memory repositories");
        return Ok((
            Arc::new(InMemoryProjectRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        ));
    };

    let pool = database.pool_options().connect(&database.url).await?;

    if database.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok((
        Arc::new(PostgresProjectRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool)),
    ))
}

async fn key_value_store(redis: Option<&RedisConfig>) -> Result<Arc<dyn KeyValueStore>, BoxError> {
    let Some(redis) = redis else {
        tracing::warn!("No Redis configured, using in-memory key-value store");
        return Ok(Arc::new(InMemoryKeyValueStore::new()));
    };

    let client = redis::Client::open(redis.url.as_str())?;
    let conn = tokio::time::timeout(redis.timeout(), client.get_multiplexed_tokio_connection())
        .await??;

    Ok(Arc::new(
        RedisKeyValueStore::new(conn).with_prefix(redis.key_prefix.clone()),
    ))
}

fn ledger_gateway(ledger: &LedgerConfig) -> Result<Arc<dyn LedgerGateway>, BoxError> {
    let (Some(base_url), Some(api_key)) = (&ledger.base_url, &ledger.api_key) else {
        tracing::warn!("No ledger gateway configured, using in-memory ledger");
        return Ok(Arc::new(InMemoryLedger::new()));
    };

    let gateway = HttpLedgerGateway::new(
        HttpLedgerConfig::new(
            base_url.clone(),
            ledger.operator_id.clone(),
            api_key.expose_secret().clone(),
        )
        .with_timeout(ledger.timeout())
        .with_max_retries(ledger.max_retries),
    )?;

    Ok(Arc::new(gateway))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
