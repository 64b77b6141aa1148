//! Stockroom - per-user product catalog API
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│  Stores  │───▶│ Services │───▶│ Gateway  │
//! │  (YAML)  │    │(PG / mem)│    │(auth/cat)│    │  (axum)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `stockroom [--env dev|prod] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;
use stockroom::account::{IdentityStore, PgIdentityStore};
use stockroom::catalog::{PgProductStore, ProductStore};
use stockroom::config::{AppConfig, StorageBackend};
use stockroom::db::Database;
use stockroom::db::memory::{MemoryIdentityStore, MemoryProductStore};
use stockroom::gateway::{self, state::AppState};
use stockroom::logging::init_logging;
use stockroom::user_auth::{CredentialHasher, TokenCodec};

fn arg_value(names: &[&str]) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1).cloned())
}

fn get_env() -> String {
    arg_value(&["--env", "-e"]).unwrap_or_else(|| "dev".to_string())
}

/// Get port override from command line (--port argument)
fn get_port_override() -> anyhow::Result<Option<u16>> {
    arg_value(&["--port"])
        .map(|p| p.parse::<u16>().with_context(|| format!("invalid --port value: {p}")))
        .transpose()
}

type Stores = (
    Arc<dyn IdentityStore>,
    Arc<dyn ProductStore>,
    Option<Arc<Database>>,
);

async fn open_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Ok((
                Arc::new(MemoryIdentityStore::new()),
                Arc::new(MemoryProductStore::new()),
                None,
            ))
        }
        StorageBackend::Postgres => {
            let url = config
                .storage
                .postgres_url
                .as_deref()
                .context("storage.postgres_url is required for the postgres backend")?;
            let db = Database::connect(url, config.storage.max_connections)
                .await
                .context("connecting to PostgreSQL")?;
            tracing::info!("Connected to PostgreSQL");
            let pool = db.pool().clone();
            Ok((
                Arc::new(PgIdentityStore::new(pool.clone())),
                Arc::new(PgProductStore::new(pool)),
                Some(Arc::new(db)),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut config = AppConfig::load(&env).with_context(|| format!("loading config for env '{env}'"))?;
    if let Some(port) = get_port_override()? {
        config.gateway.port = port;
    }

    let _log_guard = init_logging(&config.logging);
    tracing::info!(
        env = %env,
        backend = ?config.storage.backend,
        port = config.gateway.port,
        "Starting stockroom"
    );

    let (identities, products, db) = open_stores(&config).await?;

    let tokens = Arc::new(TokenCodec::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.token_validity()?,
    ));
    let hasher = CredentialHasher::new(&config.auth.argon2).context("argon2 parameters")?;

    let state = AppState::new(tokens, identities, products, hasher, db)
        .context("initializing auth service")?;

    gateway::run_server(&config.gateway, Arc::new(state)).await
}
