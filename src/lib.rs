//! Backend of a personal portfolio site.
//!
//! The site itself is a single scrollable page; everything server-side lives
//! behind one endpoint. `POST /api/contact` takes the contact form's JSON
//! payload, filters out bots and abuse, and forwards the submission to the
//! site owner's mailbox over SMTP with Reply-To pointing back at the
//! submitter.
//!
//!
//!
//! # Request Pipeline
//!
//! - Fail fast when no SMTP credentials were configured
//! - Per-address rate limit: 3 submissions per rolling hour, table bounded
//!   at 500 addresses
//! - Honeypot field silently swallows automated submissions
//! - Name, email, subject and message are all required
//! - Notification mail goes out as plain text + HTML
//!
//! Counters are process-local and reset on restart. A horizontally scaled
//! deployment would need a shared store for the counts; a single instance is
//! assumed here.
//!
//!
//!
//! # Environment
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | `PORT` | `3000` | Listen port |
//! | `SMTP_HOST` | `smtp.gmail.com` | Mail relay |
//! | `SMTP_USER` | — | Owner mailbox, sender and recipient |
//! | `SMTP_PASSWORD` | — | App password for the relay |
//!
//! Without `SMTP_USER`/`SMTP_PASSWORD` the server still starts, but every
//! submission is answered with a configuration error.
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod contact;
pub mod error;
pub mod mail;
pub mod rate_limit;
pub mod routes;
pub mod state;

use routes::contact_handler;
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/api/contact", post(contact_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
