use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd_relay_core::DEFAULT_SESSION_TOKEN;
use cmd_relay_http::{create_router, AppState};
use cmd_relay_service::{HistoryService, RelayService};
use cmd_relay_storage::Storage;
use cmd_relay_upstream::UpstreamClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cmd-relay")]
#[command(about = "Session-scoped relay for a third-party command-execution API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Execute one command through the relay and print the result
    Exec {
        command: String,
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Print the session's history page
    History {
        #[arg(short, long, default_value = DEFAULT_SESSION_TOKEN)]
        session: String,
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },
    /// Print the session's aggregate analytics
    Analytics {
        #[arg(short, long, default_value = DEFAULT_SESSION_TOKEN)]
        session: String,
    },
    /// Delete the session's history
    ClearHistory {
        #[arg(short, long, default_value = DEFAULT_SESSION_TOKEN)]
        session: String,
    },
}

fn get_db_path() -> PathBuf {
    std::env::var("CMD_RELAY_DB_PATH").map(PathBuf::from).unwrap_or_else(|_| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cmd-relay")
            .join("relay.db")
    })
}

fn get_api_key() -> Result<String> {
    std::env::var("CMD_RELAY_API_KEY")
        .map_err(|_| anyhow::anyhow!("CMD_RELAY_API_KEY environment variable must be set"))
}

fn get_api_url() -> Result<String> {
    std::env::var("CMD_RELAY_API_URL")
        .map_err(|_| anyhow::anyhow!("CMD_RELAY_API_URL environment variable must be set"))
}

fn build_upstream() -> Result<Arc<UpstreamClient>> {
    Ok(Arc::new(UpstreamClient::new(get_api_key()?, get_api_url()?)?))
}

/// Client-style session token: `session_<millis>_<suffix>`, the same scheme
/// browser clients generate and persist in local storage.
fn generate_session_token() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", chrono::Utc::now().timestamp_millis(), &suffix[..8])
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {err}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let db_path = get_db_path();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let storage = Storage::new(&db_path)?;

    match cli.command {
        Commands::Serve { port, host } => {
            let upstream = build_upstream()?;
            let state = Arc::new(AppState {
                storage: storage.clone(),
                relay_service: Arc::new(RelayService::new(storage.clone(), upstream)),
                history_service: Arc::new(HistoryService::new(storage.clone())),
            });
            let router = create_router(state);
            let addr = format!("{}:{}", host, port);
            tracing::info!("Starting HTTP server on {}", addr);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
        },
        Commands::Exec { command, session } => {
            let upstream = build_upstream()?;
            let relay = RelayService::new(storage.clone(), upstream);
            let token = session.unwrap_or_else(generate_session_token);
            eprintln!("session: {token}");
            let execution = relay.execute(&token, &command).await?;
            println!("{}", serde_json::to_string_pretty(&execution.payload)?);
        },
        Commands::History { session, limit } => {
            let history = HistoryService::new(storage.clone());
            let entries = history.list_history(&session, limit).await?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        },
        Commands::Analytics { session } => {
            let history = HistoryService::new(storage.clone());
            let analytics = history.analytics(&session).await?;
            println!("{}", serde_json::to_string_pretty(&analytics)?);
        },
        Commands::ClearHistory { session } => {
            let history = HistoryService::new(storage.clone());
            let removed = history.clear_history(&session).await?;
            println!("Cleared {removed} entries for session '{session}'");
        },
    }

    Ok(())
}
