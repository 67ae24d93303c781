use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lockroute_core::BoundingBox;
use lockroute_server::ServerConfig;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "HTTP API for planning river routes through navigation locks")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides `bind`
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Overpass API endpoint, overrides `overpass.url`
    #[arg(long)]
    overpass_url: Option<String>,

    /// Overpass fetch timeout in seconds, overrides `overpass.timeout_secs`
    #[arg(long)]
    fetch_timeout_secs: Option<u64>,

    /// Load locks for this area at startup (south,west,north,east)
    #[arg(long, value_name = "S,W,N,E", allow_hyphen_values = true)]
    initial_bbox: Option<BoundingBox>,

    /// Per-request timeout in seconds, overrides `request_timeout_secs`
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Maximum concurrent requests, overrides `concurrency_limit`
    #[arg(long)]
    concurrency_limit: Option<usize>,
}

impl Args {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(url) = self.overpass_url {
            config.overpass.url = url;
        }
        if let Some(secs) = self.fetch_timeout_secs {
            config.overpass.timeout_secs = secs;
        }
        if self.initial_bbox.is_some() {
            config.overpass.initial_bbox = self.initial_bbox;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(limit) = self.concurrency_limit {
            config.concurrency_limit = limit;
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();
    let config = match ServerConfig::load(args.config.as_deref()) {
        Ok(config) => args.apply(config),
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match lockroute_server::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let args = Args::try_parse_from([
            "lockroute-server",
            "--bind",
            "0.0.0.0:9090",
            "--fetch-timeout-secs",
            "5",
            "--initial-bbox",
            "48.8,1.1,49.5,2.4",
        ])
        .unwrap();

        let config = args.apply(ServerConfig::default());
        assert_eq!(config.bind.port(), 9090);
        assert_eq!(config.overpass.timeout_secs, 5);
        assert_eq!(config.overpass.initial_bbox.map(|b| b.west), Some(1.1));
        assert_eq!(config.request_timeout_secs, 30);
    }
}
