use anyhow::Result;
use clap::Parser;
use hubpools::application::{report, PoolMonitor};
use hubpools::domain::resolver::{PoolResolver, ResolverConfig};
use hubpools::infrastructure::chain::{HttpChainClient, HttpChainConfig};
use hubpools::shared::config::{AppCfg, Config};

#[derive(Parser, Debug)]
#[command(version, about = "Asset Hub pool resolver with live price derivation")]
struct Args {
    /// Chain gateway base URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Per-call timeout in milliseconds
    #[arg(long)]
    call_timeout_ms: Option<u64>,

    /// Bounded fan-out for per-pool lookups
    #[arg(long)]
    concurrency: Option<usize>,

    /// Poll interval in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Resolve once, print the table and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    // Load base configuration from file if provided
    let file_cfg = match &args.config {
        Some(path) => Some(Config::from_file(path)?),
        None => None,
    };

    // Priority: CLI args > config file > defaults
    let cfg = AppCfg::build(
        file_cfg,
        args.endpoint,
        args.call_timeout_ms,
        args.concurrency,
        args.poll_interval_ms,
    );

    let resolver = PoolResolver::new(ResolverConfig {
        concurrency: cfg.concurrency,
        call_timeout: cfg.call_timeout,
    });
    let gateway = HttpChainConfig {
        base_url: cfg.endpoint.clone(),
        request_timeout: cfg.call_timeout,
    };
    let monitor = PoolMonitor::new(
        resolver,
        move || HttpChainClient::new(&gateway),
        cfg.poll_interval,
    );

    if args.once {
        let pools = monitor.refresh_once().await?;
        println!("{}", report::render(&pools));
        return Ok(());
    }

    let rx = monitor.subscribe();
    tokio::spawn({
        let mut rx = rx;
        async move {
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                if !snapshot.loading && snapshot.error.is_none() {
                    println!("{}", report::render(&snapshot.pools));
                }
            }
        }
    });
    monitor.run().await;
    Ok(())
}
