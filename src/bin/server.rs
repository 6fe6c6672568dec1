//! Token-authenticated WebSocket broadcast chat relay server.
//!
//! Clients sign up for a word token, then exchange messages that are fanned
//! out to every connected client. History is replayed on (re)connect.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --port 8081
//! cargo run --bin server -- --tls-cert cert.pem --tls-key key.pem
//! ```

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use idobata::{
    common::logger::setup_logger,
    domain::WordList,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRelayRepository},
    ui::{Server, ServerConfig, TlsPaths},
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, FetchHistoryUseCase, LogInUseCase,
        SendMessageUseCase, SignUpUseCase,
    },
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Token-authenticated WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8081)]
    port: u16,

    /// TLS certificate path (requires --tls-key)
    #[arg(long, env = "TLS_CERT_PATH")]
    tls_cert: Option<PathBuf>,

    /// TLS private key path (requires --tls-cert)
    #[arg(long, env = "TLS_KEY_PATH")]
    tls_key: Option<PathBuf>,

    /// Token word list path (one word per line; falls back to the embedded list)
    #[arg(long, env = "WORDS_PATH")]
    words: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Startup configuration errors are fatal: no partial startup
    let tls = match (args.tls_cert, args.tls_key) {
        (Some(cert), Some(key)) => Some(TlsPaths { cert, key }),
        (None, None) => None,
        _ => {
            tracing::error!("--tls-cert and --tls-key must be supplied together");
            std::process::exit(1);
        }
    };

    let words = match args.words {
        Some(path) => match WordList::load(&path) {
            Ok(words) => words,
            Err(e) => {
                tracing::error!("Failed to load word list from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => WordList::embedded(),
    };
    tracing::info!("Loaded {} token words", words.len());

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory registry + message log)
    let repository = Arc::new(InMemoryRelayRepository::new(words));

    // 2. Create MessagePusher (WebSocket implementation)
    let clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(clients));

    // 3. Create UseCases
    let sign_up_usecase = Arc::new(SignUpUseCase::new(repository.clone()));
    let log_in_usecase = Arc::new(LogInUseCase::new(repository.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let fetch_history_usecase = Arc::new(FetchHistoryUseCase::new(repository.clone()));
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(message_pusher.clone()));

    // 4. Create and run the server
    let server = Server::new(
        message_pusher,
        sign_up_usecase,
        log_in_usecase,
        send_message_usecase,
        fetch_history_usecase,
        connect_client_usecase,
        disconnect_client_usecase,
    );
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        tls,
    };
    if let Err(e) = server.run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
