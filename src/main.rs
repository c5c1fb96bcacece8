use clap::Parser;
use setlist_admin_api::{app, config::AppConfig, state::AppState};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "setlist-admin-api")]
#[command(about = "User administration API for the setlist manager")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env()?;
    tracing::info!("Starting setlist admin API in {:?} mode", config.environment);

    let port = args.port.unwrap_or(config.api.port);
    let state = AppState::from_config(config)?;

    let bind_addr = format!("{}:{}", args.bind, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
