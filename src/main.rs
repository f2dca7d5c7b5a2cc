use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_orchestrator::application::orchestrator::PaymentOrchestrator;
use payment_orchestrator::config::AppConfig;
use payment_orchestrator::domain::ports::{PaymentRepositoryBox, SharedHttpClient};
use payment_orchestrator::infrastructure::http::ReqwestHttpClient;
use payment_orchestrator::infrastructure::in_memory::InMemoryPaymentRepository;
use payment_orchestrator::infrastructure::mercado_pago::MercadoPagoBroker;
use payment_orchestrator::infrastructure::order_client::HttpOrderNotifier;
use payment_orchestrator::interfaces::http;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding `{environment}.yaml` config files
    #[arg(long, env = "CONFIG_DIR_PATH", default_value = "./configs")]
    config_dir: PathBuf,

    /// Name of the config file to load, without extension
    #[arg(long, env = "ENVIRONMENT", default_value = "local")]
    environment: String,

    /// Port to listen on (overrides `server.port`)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn init_tracing() {
    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,payment_orchestrator=debug")),
        )
        .init();
}

fn build_repository(config: &AppConfig) -> Result<PaymentRepositoryBox> {
    match &config.payment_repository.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => {
            use payment_orchestrator::infrastructure::rocksdb::RocksDbPaymentRepository;
            tracing::info!(path = %db_path.display(), "using RocksDB payment repository");
            let store = RocksDbPaymentRepository::open(db_path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "Persistent storage requested via db_path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryPaymentRepository::new()))
        }
        None => Ok(Box::new(InMemoryPaymentRepository::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    tracing::info!(environment = %cli.environment, "starting payment orchestrator");
    let mut config = AppConfig::load(&cli.config_dir, &cli.environment).into_diagnostic()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.db_path.is_some() {
        config.payment_repository.db_path = cli.db_path;
    }

    let repository = build_repository(&config)?;

    let http_client: SharedHttpClient =
        Arc::new(ReqwestHttpClient::new(config.http.timeout()).into_diagnostic()?);
    let broker = MercadoPagoBroker::new(http_client.clone(), config.payment_broker.clone());
    let notifier = HttpOrderNotifier::new(http_client, config.order_api.url.clone());

    let orchestrator = Arc::new(PaymentOrchestrator::new(
        Box::new(broker),
        repository,
        Box::new(notifier),
    ));

    let listener = TcpListener::bind(("0.0.0.0", config.server.port))
        .await
        .into_diagnostic()?;
    http::serve(listener, orchestrator, shutdown_signal())
        .await
        .into_diagnostic()?;

    tracing::info!("payment orchestrator stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
