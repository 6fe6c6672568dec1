//! Server execution logic.

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use tower_http::trace::TraceLayer;

use crate::domain::MessagePusher;
use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, FetchHistoryUseCase, LogInUseCase,
    SendMessageUseCase, SignUpUseCase,
};

use super::{
    handler::{health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// TLS certificate and key paths; both must be supplied together.
#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Listener configuration.
///
/// Absence of TLS paths selects the plaintext transport. An unreadable
/// certificate or key file is a startup-fatal error, not a fallback.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub tls: Option<TlsPaths>,
}

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     message_pusher,
///     sign_up_usecase,
///     log_in_usecase,
///     send_message_usecase,
///     fetch_history_usecase,
///     connect_client_usecase,
///     disconnect_client_usecase,
/// );
/// server.run(config).await?;
/// ```
pub struct Server {
    message_pusher: Arc<dyn MessagePusher>,
    sign_up_usecase: Arc<SignUpUseCase>,
    log_in_usecase: Arc<LogInUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    fetch_history_usecase: Arc<FetchHistoryUseCase>,
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        sign_up_usecase: Arc<SignUpUseCase>,
        log_in_usecase: Arc<LogInUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        fetch_history_usecase: Arc<FetchHistoryUseCase>,
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    ) -> Self {
        Self {
            message_pusher,
            sign_up_usecase,
            log_in_usecase,
            send_message_usecase,
            fetch_history_usecase,
            connect_client_usecase,
            disconnect_client_usecase,
        }
    }

    /// Run the relay server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind, if the TLS material
    /// cannot be loaded, or if the server fails while serving.
    pub async fn run(
        self,
        config: ServerConfig,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app_state = Arc::new(AppState {
            message_pusher: self.message_pusher,
            sign_up_usecase: self.sign_up_usecase,
            log_in_usecase: self.log_in_usecase,
            send_message_usecase: self.send_message_usecase,
            fetch_history_usecase: self.fetch_history_usecase,
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
        });

        // Define handlers
        let app = Router::new()
            .route("/ws", get(websocket_handler))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let bind_addr = format!("{}:{}", config.host, config.port);

        match config.tls {
            None => {
                let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
                tracing::info!("Relay server listening on {}", listener.local_addr()?);
                tracing::info!("Connect to: ws://{}/ws", bind_addr);
                tracing::info!("Press Ctrl+C to shutdown gracefully");

                axum::serve(listener, app)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;
            }
            Some(tls) => {
                // Startup-fatal when the cert or key cannot be read
                let rustls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
                let addr: SocketAddr = bind_addr.parse()?;

                let handle = Handle::new();
                let shutdown_handle = handle.clone();
                tokio::spawn(async move {
                    shutdown_signal().await;
                    shutdown_handle.graceful_shutdown(Some(Duration::from_secs(5)));
                });

                tracing::info!("Relay server listening on {} (TLS)", addr);
                tracing::info!("Connect to: wss://{}/ws", bind_addr);
                tracing::info!("Press Ctrl+C to shutdown gracefully");

                axum_server::bind_rustls(addr, rustls_config)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await?;
            }
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
