use {
    bharatx_relay::{
        AppState,
        adapters::{bharatx_client::BharatXClient, sqs::SqsDispatcher},
        config::Config,
        services::{
            authenticator::Authenticator, retry::RetryPolicy, webhook_pipeline::WebhookPipeline,
        },
    },
    std::{sync::Arc, time::Duration},
    tokio::signal,
    tracing_subscriber::EnvFilter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::from_env()?;
    tracing::info!(config = ?cfg, "configuration loaded");

    let resolver = BharatXClient::new(
        &cfg.base_url,
        &cfg.partner_id,
        &cfg.private_api_key,
        cfg.http_timeout,
    )?;
    let dispatcher = SqsDispatcher::connect(
        &cfg.queue_url,
        &cfg.aws_region,
        cfg.sqs_endpoint_url.as_deref(),
        cfg.http_timeout,
    )
    .await;

    let retry = RetryPolicy {
        max_attempts: cfg.retry_max_attempts,
        base_delay: cfg.retry_base_delay,
        max_delay: cfg.retry_max_delay,
    };

    let pipeline = WebhookPipeline::new(
        Authenticator::new(&cfg.private_api_key, &cfg.partner_id, cfg.auth_policy),
        Arc::new(resolver),
        Arc::new(dispatcher),
        retry,
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    // Two network calls, each with its full retry budget, plus slack.
    let attempts = cfg.retry_max_attempts.max(1);
    let per_call = cfg
        .http_timeout
        .saturating_mul(attempts)
        .saturating_add(cfg.retry_max_delay.saturating_mul(attempts));
    let request_timeout = per_call
        .saturating_mul(2)
        .saturating_add(Duration::from_secs(1));

    let app = bharatx_relay::router(state, request_timeout);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(
        addr = %cfg.bind_addr,
        auth_policy = %cfg.auth_policy,
        "listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
        }
    };

    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
