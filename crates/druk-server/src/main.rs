use druk_core::{Registry, Store};
use druk_server::{app, AppState};
use druk_store_memory::MemoryStore;
use druk_store_sqlite::SqliteStore;

use anyhow::{bail, Context};
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "druk-server", about = "REST CRUD backend for the Druk travel platform")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:5000")]
    listen: SocketAddr,

    /// Store driver URL: `memory:` or `sqlite:PATH`.
    #[arg(long, default_value = "memory:")]
    database: String,

    /// Password accepted by `POST /api/admin/login`.
    #[arg(long, env = "DRUK_ADMIN_PASSWORD")]
    admin_password: String,
}

fn build_store(database: &str, registry: &Arc<Registry>) -> anyhow::Result<Arc<dyn Store>> {
    let url = Url::parse(database).context("invalid --database URL")?;
    match url.scheme() {
        "memory" => Ok(Arc::new(MemoryStore::new(registry.clone()))),
        "sqlite" => {
            if url.path() == ":memory:" {
                Ok(Arc::new(SqliteStore::in_memory(registry.clone())?))
            } else {
                Ok(Arc::new(SqliteStore::open(url.path(), registry.clone())?))
            }
        }
        other => bail!("unsupported store driver `{other}` (expected `memory` or `sqlite`)"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "druk_server=info,druk_core=info".into()),
        )
        .init();

    let args = Args::parse();
    let registry = Arc::new(Registry::builtin());
    let store = build_store(&args.database, &registry)?;
    let state = AppState::shared(registry, store, args.admin_password);

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    tracing::info!(listen = %args.listen, database = %args.database, "druk-server started");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
