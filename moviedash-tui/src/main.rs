mod app;
mod config;
mod ui;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;

/// 日志写入缓存目录，避免破坏终端画面
fn init_logging() -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config::paths::log_file()?)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("moviedash=info".parse()?)
                .add_directive("moviedash_core=info".parse()?),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let mut app = app::App::new()?;
    app.run().await
}
