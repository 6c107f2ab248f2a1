use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use veil_dns_application::ports::CacheMaintenancePort;
use veil_dns_cli::{bootstrap, remote};
use veil_dns_domain::{RemoteConfig, RemoteOverrides};
use veil_dns_infrastructure::crypto::EnvelopeCipher;
use veil_dns_jobs::{CacheSweepJob, JobRunner};

#[derive(Parser)]
#[command(name = "veil-dns-remote")]
#[command(version = "0.1.0")]
#[command(about = "Veil DNS - remote resolution service recursing against public resolvers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind host
    #[arg(long)]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print a fresh envelope encryption key and exit
    #[arg(long)]
    generate_key: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.generate_key {
        println!("{}", EnvelopeCipher::generate_key());
        return Ok(());
    }

    let overrides = RemoteOverrides {
        port: cli.port,
        host: cli.host.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = RemoteConfig::load(cli.config.as_deref(), overrides)?;

    bootstrap::init_logging(&config.logging.level);
    info!(
        "Starting Veil DNS resolution service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let services = remote::di::RemoteServices::new(&config)?;
    let shutdown = CancellationToken::new();

    let mut jobs = JobRunner::new().with_shutdown_token(shutdown.clone());
    if let Some(cache) = &services.cache {
        let cache: Arc<dyn CacheMaintenancePort> = cache.clone();
        jobs = jobs.with_cache_sweep(CacheSweepJob::new(cache));
    }
    jobs.start().await;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    let bind_addr: SocketAddr = config.server.bind_address().parse()?;
    remote::server::start_web_server(bind_addr, services.state.clone(), shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
