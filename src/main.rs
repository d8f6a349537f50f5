use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use reserve_offset_engine::api::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "offset-server",
    about = "HTTP server estimating the VA offset for reserve drill and active duty pay"
)]
struct Cli {
    #[arg(
        long,
        env = "OFFSET_TABLE_DIR",
        default_value = "./config/rc_drill_pay",
        help = "Directory holding table.yaml, buckets.yaml and rates/"
    )]
    config_dir: PathBuf,
    #[arg(long, env = "OFFSET_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    info!(config_dir = %cli.config_dir.display(), "Loading pay table");
    let state = AppState::load(cli.config_dir)?;
    {
        let table = state.table();
        info!(
            table = %table.metadata().code,
            schedules = table.schedules().len(),
            "Pay table loaded"
        );
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!("Listening on {}", cli.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
