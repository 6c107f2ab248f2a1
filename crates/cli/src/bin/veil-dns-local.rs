use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use veil_dns_application::ports::{CacheMaintenancePort, EndpointProbePort};
use veil_dns_cli::{bootstrap, local};
use veil_dns_domain::{LocalConfig, LocalOverrides};
use veil_dns_infrastructure::crypto::EnvelopeCipher;
use veil_dns_infrastructure::rpc::HealthProber;
use veil_dns_jobs::{CacheSweepJob, EndpointHealthJob, JobRunner};

#[derive(Parser)]
#[command(name = "veil-dns-local")]
#[command(version = "0.1.0")]
#[command(about = "Veil DNS - local resolver that bypasses in-path DNS interception")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS listener port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'l', long)]
    listen: Option<String>,

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

    let overrides = LocalOverrides {
        port: cli.port,
        listen_addr: cli.listen.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = LocalConfig::load(cli.config.as_deref(), overrides)?;

    bootstrap::init_logging(&config.logging.level);
    info!(
        "Starting Veil DNS local resolver v{}",
        env!("CARGO_PKG_VERSION")
    );

    let services = local::di::LocalServices::new(&config)?;
    let shutdown = CancellationToken::new();

    let mut jobs = JobRunner::new().with_shutdown_token(shutdown.clone());
    if let Some(cache) = &services.cache {
        let cache: Arc<dyn CacheMaintenancePort> = cache.clone();
        jobs = jobs.with_cache_sweep(CacheSweepJob::new(cache));
    }
    let prober: Arc<dyn EndpointProbePort> = Arc::new(HealthProber::new(
        services.client.endpoints(),
        services.client.http_client(),
    ));
    jobs = jobs.with_endpoint_health(
        EndpointHealthJob::new(prober).with_interval(config.api.health_check_freq_secs),
    );
    jobs.start().await;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    local::server::start_dns_server(&config.server, services.handler.clone(), shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
