use std::{future::Future, net, sync::Arc};

use axum::{http, routing};
use common_utils::consts;
use connector_integration::connectors::Phonepe;
use interfaces::{api::ConnectorCommon, connector_types::BoxedConnector};
use shared_metrics as metrics;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::oneshot,
};
use tower_http::{request_id::MakeRequestUuid, trace as tower_trace};

use crate::{configs, error::ConfigurationError, logger, server, utils};

/// Shared by every route. The adapter is immutable, so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub adapter: BoxedConnector,
}

impl AppState {
    pub fn new(adapter: BoxedConnector) -> Self {
        Self { adapter }
    }

    /// Builds the PhonePe adapter from configuration, failing on missing credentials.
    pub fn from_config(config: &configs::Config) -> Result<Self, ConfigurationError> {
        let adapter = Phonepe::new(config.connectors.phonepe.clone(), config.proxy.clone())
            .map_err(|error| {
                logger::error!(?error, "invalid connector configuration");
                ConfigurationError::InvalidConnectorConfig(error.current_context().to_string())
            })?;

        logger::info!(
            connector = adapter.id(),
            base_url = adapter.base_url(),
            "payment gateway adapter ready"
        );

        Ok(Self::new(Arc::new(adapter)))
    }
}

/// # Panics
///
/// Will panic if signal handling fails
pub async fn server_builder(config: configs::Config) -> Result<(), ConfigurationError> {
    let server_config = config.server.clone();
    let socket_addr = net::SocketAddr::new(server_config.host.parse()?, server_config.port);

    let state = AppState::from_config(&config)?;

    // Signal handler
    let (tx, rx) = oneshot::channel();

    #[allow(clippy::expect_used)]
    tokio::spawn(async move {
        let mut sig_int =
            signal(SignalKind::interrupt()).expect("Failed to initialize SIGINT signal handler");
        let mut sig_term =
            signal(SignalKind::terminate()).expect("Failed to initialize SIGTERM signal handler");
        let mut sig_quit =
            signal(SignalKind::quit()).expect("Failed to initialize QUIT signal handler");
        let mut sig_hup =
            signal(SignalKind::hangup()).expect("Failed to initialize SIGHUP signal handler");

        tokio::select! {
            _ = sig_int.recv() => {
                logger::info!("Received SIGINT");
            }
            _ = sig_term.recv() => {
                logger::info!("Received SIGTERM");
            }
            _ = sig_quit.recv() => {
                logger::info!("Received QUIT");
            }
            _ = sig_hup.recv() => {
                logger::info!("Received SIGHUP");
            }
        }
        // The receiver is only gone once the server has already stopped.
        let _ = tx.send(());
    });

    let shutdown_signal = async {
        if rx.await.is_err() {
            logger::warn!("Shutdown signal handler exited early");
        }
        logger::info!("Shutdown signal received");
    };

    logger::info!(host = %server_config.host, port = %server_config.port, "starting payment server");

    http_server(router(state), socket_addr, shutdown_signal).await
}

/// Payment, status and webhook routes with request id, tracing and metrics layers.
pub fn router(state: AppState) -> axum::Router {
    let logging_layer = tower_trace::TraceLayer::new_for_http()
        .make_span_with(|request: &axum::extract::Request<_>| {
            utils::record_fields_from_header(request)
        })
        .on_request(tower_trace::DefaultOnRequest::new().level(tracing::Level::INFO))
        .on_response(
            tower_trace::DefaultOnResponse::new()
                .level(tracing::Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Micros),
        )
        .on_failure(
            tower_trace::DefaultOnFailure::new()
                .latency_unit(tower_http::LatencyUnit::Micros)
                .level(tracing::Level::ERROR),
        );

    let request_id_layer = tower_http::request_id::SetRequestIdLayer::new(
        http::HeaderName::from_static(consts::X_REQUEST_ID),
        MakeRequestUuid,
    );

    let propagate_request_id_layer = tower_http::request_id::PropagateRequestIdLayer::new(
        http::HeaderName::from_static(consts::X_REQUEST_ID),
    );

    axum::Router::new()
        .route("/health", routing::get(|| async { "health is good" }))
        .route("/payments", routing::post(server::payments::create_payment))
        .route(
            "/payments/{merchant_transaction_id}/status",
            routing::get(server::payments::payment_status),
        )
        .route(
            "/webhooks/phonepe",
            routing::post(server::webhooks::phonepe_webhook),
        )
        .route_layer(axum::middleware::from_fn(crate::metrics::track_http_metrics))
        .with_state(state)
        .layer(logging_layer)
        .layer(propagate_request_id_layer)
        .layer(request_id_layer)
}

async fn http_server(
    router: axum::Router,
    socket: net::SocketAddr,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ConfigurationError> {
    let listener = tokio::net::TcpListener::bind(socket).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

pub async fn metrics_server_builder(config: configs::Config) -> Result<(), ConfigurationError> {
    let listener = config.metrics.tcp_listener().await?;

    axum::serve(listener, metrics_router().into_make_service())
        .with_graceful_shutdown(async {
            let output = tokio::signal::ctrl_c().await;
            tracing::error!(?output, "shutting down");
        })
        .await?;

    Ok(())
}

pub fn metrics_router() -> axum::Router {
    axum::Router::new().route(
        "/metrics",
        routing::get(|| async {
            let output = metrics::metrics_handler().await;
            match output {
                Ok(metrics) => Ok(metrics),
                Err(error) => {
                    tracing::error!(?error, "Error fetching metrics");

                    Err((
                        http::StatusCode::INTERNAL_SERVER_ERROR,
                        "Error fetching metrics".to_string(),
                    ))
                }
            }
        }),
    )
}
