use anyhow::Context;
use rusty_library_lending::{
    adapters::{
        memory,
        postgres::{PostgresBookStore, PostgresCategoryStore, PostgresPersonStore},
    },
    api::{handlers::AppState, router::create_router},
    application::library::ServiceDependencies,
    config::{AppConfig, StorageBackend},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env があれば読み込む
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let service_deps = match config.storage.backend {
        StorageBackend::Postgres => {
            // Initialize database connection pool
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await
                .context("Failed to connect to database")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            tracing::info!("Connected to database and applied migrations");

            ServiceDependencies {
                books: Arc::new(PostgresBookStore::new(pool.clone())),
                persons: Arc::new(PostgresPersonStore::new(pool.clone())),
                categories: Arc::new(PostgresCategoryStore::new(pool)),
            }
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");

            let db = memory::Database::new();

            ServiceDependencies {
                books: Arc::new(memory::BookStore::new(&db)),
                persons: Arc::new(memory::PersonStore::new(&db)),
                categories: Arc::new(memory::CategoryStore::new(&db)),
            }
        }
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
