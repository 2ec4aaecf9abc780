mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(lexpert_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = lexpert_db::PoolConfig::from_app_config(&config);
    let pool = lexpert_db::connect_pool(&config.database_url, pool_config).await?;
    lexpert_db::run_migrations(&pool).await?;

    let analyzer = match &config.anthropic_api_key {
        Some(key) => Some(Arc::new(lexpert_analyzer::AnalyzerClient::new(
            key,
            &config.anthropic_model,
            config.provider_timeout_secs,
        )?)),
        None => {
            tracing::warn!("ANTHROPIC_API_KEY not set; case analysis disabled, searches run filter-only");
            None
        }
    };

    let exa = match &config.exa_api_key {
        Some(key) => Some(Arc::new(lexpert_exa::ExaClient::new(
            key,
            config.provider_timeout_secs,
        )?)),
        None => {
            tracing::warn!("EXA_API_KEY not set; web search requests will return a configuration error");
            None
        }
    };

    let auth = AuthState::from_env(matches!(
        config.env,
        lexpert_core::Environment::Development
    ))?;
    let app = build_app(
        AppState {
            pool,
            analyzer,
            exa,
        },
        auth,
        default_rate_limit_state(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "lexpert-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
