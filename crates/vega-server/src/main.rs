use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use vega_server::{create_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "vega-server", version, about = "Admin and content backend for VEGA")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory holding config.json and the data files
    #[arg(long, env = "VEGA_DATA_DIR", default_value = "public/data")]
    data_dir: PathBuf,

    /// Static files served at the root path
    #[arg(long, env = "VEGA_PUBLIC_DIR", default_value = "public")]
    public_dir: PathBuf,

    /// Shared admin secret for /api/login
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "change-me", hide_env_values = true)]
    admin_password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let state = AppState::new(args.data_dir, args.admin_password);
    let app = create_router(state, Some(args.public_dir));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("vega server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
