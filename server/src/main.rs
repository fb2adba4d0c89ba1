//! Server entry point: configuration, router, listener.
//!
//! Startup order matters: `.env` loading and config validation happen before
//! the listener binds, so a missing required value is a fatal, descriptive
//! startup failure rather than a half-started server.

mod config;
mod graphql;
mod routes;
mod ssr;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid server configuration");
            std::process::exit(1);
        }
    };

    let state = state::AppState::new(config);
    let app = routes::app(state.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", state.config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = state.config.port, "server running on {}", state.config.public_base_uri);
    tracing::info!("graphql endpoint at {}", state.config.graphql_endpoint());
    axum::serve(listener, app).await.expect("server failed");
}
