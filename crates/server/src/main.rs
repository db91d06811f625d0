// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod pages;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use ekip_api::{FixtureSummary, load_fixtures};
use ekip_domain::format_timestamp;
use ekip_persistence::Persistence;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::handlers::{
    handle_index, handle_login, handle_login_page, handle_logout, handle_redeem,
    handle_redeem_page, handle_sites, handle_statistics, handle_statistics_export,
};

/// EKIP Server - voucher redemption for federal recreation sites
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Directory holding `federalsites.json` and `tickets.json`, loaded into an empty database
    #[arg(short, long)]
    fixtures: Option<PathBuf>,

    /// Login name of an operator to create at startup if it does not exist
    #[arg(long, requires = "operator_password")]
    operator_login: Option<String>,

    /// Password for `--operator-login`
    #[arg(long, requires = "operator_login")]
    operator_password: Option<String>,

    /// Email address for `--operator-login`
    #[arg(long, default_value = "")]
    operator_email: String,

    /// Days a session stays valid after sign-in
    #[arg(long, default_value_t = 14, value_parser = clap::value_parser!(i64).range(1..))]
    session_days: i64,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer, one connection behind a lock.
    pub persistence: Arc<Mutex<Persistence>>,
    /// How long a new session stays valid.
    pub session_lifetime: Duration,
}

impl AppState {
    pub fn new(persistence: Persistence, session_lifetime: Duration) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            session_lifetime,
        }
    }
}

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/accounts/login/", get(handle_login_page))
        .route("/accounts/login/", post(handle_login))
        .route("/accounts/logout/", post(handle_logout))
        .route("/redeem/", get(handle_redeem_page))
        .route("/redeem/", post(handle_redeem))
        .route("/redeem/sites/", get(handle_sites))
        .route("/redeem/statistics/", get(handle_statistics))
        .route("/redeem/statistics/export/", get(handle_statistics_export))
        .with_state(app_state)
}

/// Readies the database: prunes stale sessions, loads fixtures and
/// bootstraps the operator named on the command line.
fn prepare_persistence(
    persistence: &mut Persistence,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let now: String = format_timestamp(OffsetDateTime::now_utc())?;
    let pruned: usize = persistence.delete_expired_sessions(&now)?;
    if pruned > 0 {
        info!(pruned, "Removed expired sessions");
    }

    if let Some(dir) = &args.fixtures {
        if persistence.count_sites()? == 0 {
            let summary: FixtureSummary = load_fixtures(persistence, dir)?;
            info!(
                sites = summary.sites,
                tickets = summary.tickets,
                "Loaded fixtures"
            );
        } else {
            info!("Federal sites already present, skipping fixtures");
        }
    }

    if let (Some(login), Some(password)) = (&args.operator_login, &args.operator_password) {
        if persistence.get_operator_by_login(login)?.is_some() {
            info!(login_name = %login, "Operator already exists");
        } else {
            let operator_id: i64 =
                persistence.create_operator(login, &args.operator_email, password)?;
            info!(operator_id, login_name = %login, "Created operator");
        }
    }

    if persistence.count_operators()? == 0 {
        warn!("No operators exist; start with --operator-login and --operator-password to create one");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing EKIP Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    prepare_persistence(&mut persistence, &args)?;

    let session_lifetime: Duration = Duration::days(args.session_days);

    let app: Router = build_router(AppState::new(persistence, session_lifetime));

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
