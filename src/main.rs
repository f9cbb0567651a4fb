mod config;
mod controller;
mod errors;
mod logging;
mod models;
mod routes;
mod security;
mod session;
mod validation;
mod views;

use std::time::Duration;

use axum::{Router, serve};
use chrono::Utc;
use config::Config;
use logging::RegistrationEvent;
use routes::create_router;
use session::SessionStore;
use tokio::net::TcpListener;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let store = SessionStore::new(config.session_idle_timeout());

    tokio::spawn(sweep_idle_sessions(store.clone()));

    let router: Router = create_router(store, config.secure_cookie);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Student registration service listening");

    serve(listener, router).await?;

    Ok(())
}

async fn sweep_idle_sessions(store: SessionStore) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        let removed = store.purge_idle(Utc::now());
        if removed > 0 {
            crate::log_registration_event!(
                RegistrationEvent::SessionExpired,
                expired_sessions = removed,
                active_sessions = store.len(),
                idle_timeout_secs = store.idle_timeout().num_seconds(),
                "Discarded idle sessions and their rosters"
            );
        }
    }
}
