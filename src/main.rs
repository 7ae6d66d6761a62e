use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::Request;
use clap::Parser;
use dotenvy::dotenv;
use sentry::integrations::tower::{NewSentryLayer, SentryHttpLayer};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use code_explainer::app::{self, AppState};
use code_explainer::config::Config;
use code_explainer::ollama::{ChatClient, HttpOllamaClient};

/// HTTP service that asks a local Ollama model to explain code snippets.
#[derive(Parser, Debug)]
#[command(name = "code-explainer", version)]
struct Cli {
    /// Interface to bind (overrides HOST). Use 0.0.0.0 to accept remote clients.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Ollama model name (overrides OLLAMA_MODEL).
    #[arg(long)]
    model: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(model) = self.model.filter(|m| !m.is_empty()) {
            config.model = model;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    cli.apply(&mut config);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("code_explainer=info,tower_http=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(false),
        )
        .with(sentry::integrations::tracing::layer().event_filter(
            |metadata| match *metadata.level() {
                tracing::Level::ERROR => sentry::integrations::tracing::EventFilter::Event,
                tracing::Level::WARN | tracing::Level::INFO => {
                    sentry::integrations::tracing::EventFilter::Breadcrumb
                }
                _ => sentry::integrations::tracing::EventFilter::Ignore,
            },
        ))
        .init();

    let _guard = sentry::init((
        config.sentry_dsn.clone(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment.clone().into()),
            traces_sample_rate: 0.2,
            enable_logs: true,
            ..Default::default()
        },
    ));

    // Inference can take minutes; only the connect phase is bounded.
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .context("failed to build HTTP client")?;

    let chat_client: Arc<dyn ChatClient> =
        Arc::new(HttpOllamaClient::new(http_client, config.ollama_url.clone()));

    let config = Arc::new(config);

    let app_state = AppState {
        config: config.clone(),
        chat_client,
    };

    let app = app::create_app(app_state)
        .layer(SentryHttpLayer::new().enable_transaction())
        .layer(NewSentryLayer::<Request<Body>>::new_from_top());

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        model = %config.model,
        ollama = %config.ollama_url,
        "Listening on http://{addr}"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
