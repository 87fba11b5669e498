use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use activities::config::AppConfig;
use activities::database::seed;
use activities::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    // 2. Config + seeded registry
    let config = AppConfig::from_env();
    let registry = seed::seeded_registry();
    if registry.is_empty() {
        warn!("activity registry seeded with no activities");
    } else {
        info!(activities = registry.len(), "activity registry seeded");
    }

    let app = web::app(registry, &config.static_dir);

    // 3. Bind, retrying once on the next port
    let listener = bind(&config).await?;
    let bound_addr = listener.local_addr()?;
    info!("server listening on http://{}", bound_addr);
    info!("landing page at http://{}{}", bound_addr, web::LANDING_PAGE);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

async fn bind(config: &AppConfig) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid HOST/PORT: {}", config.bind_addr()))?;

    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            let fallback = config
                .fallback_bind_addr()
                .with_context(|| format!("cannot bind {}: {}", addr, e))?;
            warn!("could not bind {}: {}. trying fallback {}", addr, e, fallback);
            let fallback_addr: SocketAddr = fallback
                .parse()
                .with_context(|| format!("invalid fallback address: {}", fallback))?;
            TcpListener::bind(fallback_addr)
                .await
                .with_context(|| format!("cannot bind fallback {}", fallback_addr))
        }
    }
}
