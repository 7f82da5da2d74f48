//! # Paperdesk — Trading Dashboard Backend
//!
//! ```text
//!  ┌─────────────┐  GET/POST/DELETE /api/positions   ┌──────────────────────┐
//!  │  Dashboard  │ ────────────────────────────────▶ │ AppState             │
//!  │             │  GET  /api/signals                │ ├─ ledger     📕     │
//!  │             │  GET/POST /api/settings/environment│ ├─ ranker     📡     │
//!  └─────────────┘                                   │ ├─ environment 🔀    │
//!  ┌─────────────┐  POST /api/webhooks/tradingview   │ └─ webhook_secret    │
//!  │ TradingView │ ────────────────────────────────▶ └──────────────────────┘
//!  └─────────────┘
//! ```
//!
//! Configuration is read from the environment (and an optional `.env`), see
//! [`config`].  `RUST_LOG` overrides the default tracing filter.

use std::net::SocketAddr;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod config;
mod engine;
mod error;
mod ledger;
mod models;
mod response;
mod routes;
mod state;

use config::AppConfig;
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("paperdesk=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════════════╗
  ║            PAPERDESK — Dashboard Backend              ║
  ║     Positions · Signals · Webhooks · Environment      ║
  ╚═══════════════════════════════════════════════════════╝"#);

    // ── 3. Config ─────────────────────────────────────────────────────────────
    let config = AppConfig::from_env();
    if config.webhook_secret_is_default {
        warn!("TRADINGVIEW_WEBHOOK_SECRET not set — using the insecure default secret");
    }
    info!(
        symbols          = ?config.signal_symbols,
        signal_ttl_secs  = config.signal_ttl.as_secs(),
        starting_balance = config.starting_balance,
        "⚙️ Config loaded"
    );

    // ── 4. Shared state ───────────────────────────────────────────────────────
    let state = build_state(&config)?;

    // ── 5. CORS ───────────────────────────────────────────────────────────────
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 6. Router ─────────────────────────────────────────────────────────────
    let app = routes::api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // ── 7. Bind & Serve ───────────────────────────────────────────────────────
    let addr: SocketAddr = config.bind_addr.parse()?;

    info!(?addr, "🚀 Paperdesk server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
