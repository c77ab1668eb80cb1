//! fpsmeter — frame-time overlay driven by a simulated render loop.
//!
//! Run with:  `RUST_LOG=info fpsmeter`

mod demo;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("fpsmeter v{} starting", env!("CARGO_PKG_VERSION"));

    let config = fps_config::load(fps_config::default_path())?;
    demo::run(config).await
}
