use clap::{Args, Parser, Subcommand};
use geostay::{Config, IndexBuilder, NearbyService, SearchService};
use geostay_server::refresh::spawn_refresh;
use geostay_server::{RemoteGeo, RemoteRate, run_geo_server, run_search_server};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve nearest-hotel queries from a dataset file
    Geo(GeoArgs),
    /// Serve nearby searches backed by remote geo and rate services
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct Listen {
    #[arg(short, long, default_value_t = 8083)]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GeoArgs {
    #[command(flatten)]
    listen: Listen,

    /// JSON array of {"hotelId", "lat", "lon"} records
    #[arg(short, long)]
    data: PathBuf,

    /// Reload the dataset every N seconds
    #[arg(long)]
    refresh_secs: Option<u64>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[command(flatten)]
    listen: Listen,

    #[arg(long)]
    geo_addr: SocketAddr,

    #[arg(long)]
    rate_addr: SocketAddr,
}

impl Listen {
    fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Ok(Config::from_json(&std::fs::read_to_string(path)?)?)
            }
            None => Ok(Config::default()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geostay_server=info,geostay=info,info".into()),
        )
        .init();

    let cli = Cli::parse();
    let shutdown = Box::pin(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl_c signal: {}", e);
            futures::future::pending::<()>().await;
        }
    });

    match cli.command {
        Command::Geo(args) => {
            let config = args.listen.load_config()?;
            let handle = Arc::new(
                IndexBuilder::new()
                    .config(config.index)
                    .load_file(&args.data)?
                    .build_handle()?,
            );
            let stats = handle.snapshot().stats().clone();
            info!(
                "Indexed {} hotels from {} in {} leaves",
                stats.point_count,
                args.data.display(),
                stats.leaf_count
            );

            let refresh = args.refresh_secs.map(|secs| {
                spawn_refresh(
                    Arc::clone(&handle),
                    args.data.clone(),
                    config.index,
                    Duration::from_secs(secs.max(1)),
                )
            });

            let listener = tokio::net::TcpListener::bind(args.listen.addr()?).await?;
            run_geo_server(listener, NearbyService::new(handle, config.query), shutdown).await?;

            if let Some(task) = refresh {
                task.abort();
            }
        }
        Command::Search(args) => {
            let config = args.listen.load_config()?;
            let geo = RemoteGeo::connect(args.geo_addr, config.upstream.geo_timeout()).await?;
            let rate = RemoteRate::connect(args.rate_addr, config.upstream.rate_timeout()).await?;
            let search = Arc::new(SearchService::new(geo, rate, config.upstream));

            let listener = tokio::net::TcpListener::bind(args.listen.addr()?).await?;
            run_search_server(listener, search, shutdown).await?;
        }
    }

    Ok(())
}
