use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::KeyMaterial;
use auth::StaticCredential;
use mews_service::config::Config;
use mews_service::config::SeedConfig;
use mews_service::domain::article::service::ArticleService;
use mews_service::domain::user::models::EmailAddress;
use mews_service::domain::user::models::PersonName;
use mews_service::domain::user::models::RegisterCommand;
use mews_service::domain::user::ports::UserServicePort;
use mews_service::domain::user::service::UserService;
use mews_service::inbound::http::router::create_router;
use mews_service::outbound::repositories::PostgresArticleRepository;
use mews_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mews_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "mews-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        application = %config.authentication.application,
        token_lifetime_hours = config.authentication.token_lifetime_hours,
        "Configuration loaded"
    );

    let keys = KeyMaterial::load(
        &config.authentication.private_key_source()?,
        &config.authentication.public_key_source()?,
    )?;
    tracing::info!(algorithm = "RS256", "Token key pair loaded");

    let jwt_handler = JwtHandler::new(keys, config.authentication.application.clone())
        .with_lifetime(config.authentication.token_lifetime()?);
    let authenticator = Arc::new(Authenticator::new(
        jwt_handler,
        StaticCredential::new(
            config.authentication.basic_username.clone(),
            config.authentication.basic_password.clone(),
        ),
    ));

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let article_repository = Arc::new(PostgresArticleRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let article_service = Arc::new(ArticleService::new(article_repository, user_repository));

    if let Some(seed) = &config.seed {
        seed_admin(user_service.as_ref(), seed).await?;
    }

    let http_address = format!("{}:{}", config.server.host, config.server.port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, article_service, authenticator);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

async fn seed_admin(
    user_service: &impl UserServicePort,
    seed: &SeedConfig,
) -> Result<(), anyhow::Error> {
    let command = RegisterCommand::new(
        EmailAddress::new(seed.email.clone())?,
        seed.password.clone(),
        PersonName::new(seed.first_name.clone())?,
        PersonName::new(seed.last_name.clone())?,
    );

    match user_service.ensure_admin(command).await? {
        Some(admin) => tracing::info!(user_id = %admin.id, email = %admin.email, "Admin user seeded"),
        None => tracing::debug!("Users already present, seeding skipped"),
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
