mod api;
mod middleware;

use std::sync::Arc;

use axum::http::HeaderValue;
use tracing_subscriber::EnvFilter;

use tubesense_analysis::{
    Analyzer, Classifiers, HfKeywordModel, HfSentimentModel, HfToxicityModel, InferenceClient,
    Limited,
};
use tubesense_core::AppConfig;
use tubesense_youtube::YoutubeClient;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = tubesense_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, ?config, "starting tubesense-server");

    let analyzer = build_analyzer(&config)?;
    let cors_origin = HeaderValue::from_str(&config.cors_origin)?;
    let app = build_app(
        AppState {
            analyzer: Arc::new(analyzer),
        },
        cors_origin,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_analyzer(config: &AppConfig) -> anyhow::Result<Analyzer> {
    let youtube = YoutubeClient::with_base_url(
        &config.youtube_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.youtube_base_url,
    )?;

    let inference = |url: &str| {
        InferenceClient::new(
            url,
            config.hf_api_token.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
        )
    };
    let permits = config.classifier_max_in_flight;

    let classifiers = Classifiers {
        keywords: Arc::new(Limited::new(
            HfKeywordModel::new(inference(&config.keyword_model_url)?),
            permits,
        )),
        sentiment: Arc::new(Limited::new(
            HfSentimentModel::new(inference(&config.sentiment_model_url)?),
            permits,
        )),
        toxicity: Arc::new(Limited::new(
            HfToxicityModel::new(inference(&config.toxicity_model_url)?, &config.toxic_label),
            permits,
        )),
    };

    Ok(Analyzer::new(youtube, config.max_comments, classifiers))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
