//! ServerBuilder for fluent API to build the HTTP server

use super::exposure::{RestExposure, RpcExposure};
use super::host::ServerHost;
use crate::core::service::InvoiceService;
use crate::core::store::InvoiceStore;
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builder for the invoice tracker's HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_store(InMemoryInvoiceStore::new())
///     .serve("127.0.0.1:3000")
///     .await?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    service: Option<InvoiceService>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the store backing every operation (required unless
    /// [`with_service`](Self::with_service) is used)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.service = Some(InvoiceService::new(store));
        self
    }

    /// Use an existing service, e.g. one sharing its store with other code
    pub fn with_service(mut self, service: InvoiceService) -> Self {
        self.service = Some(service);
        self
    }

    /// Add routes outside the invoice surface
    ///
    /// ```ignore
    /// let admin = Router::new().route("/admin/ping", get(|| async { "pong" }));
    ///
    /// ServerBuilder::new()
    ///     .with_store(store)
    ///     .with_custom_routes(admin)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let service = self
            .service
            .take()
            .ok_or_else(|| anyhow!("an invoice store is required; call with_store()"))?;
        Ok(ServerHost::new(service))
    }

    /// Build the router: procedures, REST, health and custom routes, with
    /// request tracing and permissive CORS.
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        tracing::debug!(backend = host.backend_name(), "building router");

        let mut app = RestExposure::build_router(host.clone()).merge(RpcExposure::build_router(host));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve with graceful shutdown on Ctrl+C or SIGTERM
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
