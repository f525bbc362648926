use std::sync::Arc;

use actix_web::HttpServer;
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sb_api::app::{build_state, create_app, HttpOptions};
use sb_core::repositories::{RefreshTokenRepository, UserRepository};
use sb_core::services::{AuthServiceConfig, TokenServiceConfig};
use sb_infra::database::{DatabasePool, MySqlRefreshTokenRepository, MySqlUserRepository};
use sb_infra::memory::{InMemoryRefreshTokenRepository, InMemoryUserRepository};
use sb_shared::{AppConfig, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        in_memory_store = config.server.in_memory_store,
        trust_forwarded_headers = config.server.trust_forwarded_headers,
        "Starting Stockband API"
    );

    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)
        .context("Invalid JWT configuration")?;
    let auth_config = AuthServiceConfig::from(&config.auth);

    if config.server.in_memory_store {
        tracing::warn!("Using in-memory stores; users and tokens are lost on restart");
        serve(
            &config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryRefreshTokenRepository::new()),
            &token_config,
            auth_config,
        )
        .await
    } else {
        let pool = DatabasePool::new(&config.database)
            .await
            .context("Failed to connect to database")?;
        pool.health_check()
            .await
            .context("Database health check failed")?;

        let stats = pool.get_statistics();
        tracing::info!(
            connections = stats.connections,
            idle_connections = stats.idle_connections,
            max_connections = stats.max_connections,
            "Database ready"
        );

        let result = serve(
            &config,
            Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
            Arc::new(MySqlRefreshTokenRepository::new(pool.get_pool().clone())),
            &token_config,
            auth_config,
        )
        .await;
        pool.close().await;
        result
    }
}

async fn serve<U, R>(
    config: &AppConfig,
    users: Arc<U>,
    tokens: Arc<R>,
    token_config: &TokenServiceConfig,
    auth_config: AuthServiceConfig,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    R: RefreshTokenRepository + 'static,
{
    let app_state = build_state(
        users,
        tokens,
        token_config,
        auth_config,
        HttpOptions::from_config(config),
    )
        .context("Invalid token service configuration")?;

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("Failed to bind {}", config.server.bind_address()))?
        .run()
        .await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_file(logging.source_location)
                    .with_line_number(logging.source_location),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_file(logging.source_location)
                    .with_line_number(logging.source_location),
            )
            .init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init(),
    }
}
