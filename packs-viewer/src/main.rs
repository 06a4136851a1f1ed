//! packs-viewer binary

use anyhow::Result;
use clap::Parser;
use packs_viewer::{
    config::{ConfigOverrides, ViewerConfig},
    observability,
    server::PreviewServer,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packs-viewer")]
#[command(version)]
#[command(about = "Preview server for Shuffle HTML component packs", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./packs-viewer.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the category folders of HTML components
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Directory served for every path the viewer does not handle
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Listening port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Don't open a browser on startup
    #[arg(long)]
    no_open: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            content_dir: self.content_dir.clone(),
            static_dir: self.static_dir.clone(),
            open_browser: self.no_open.then_some(false),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    observability::init()?;

    let config = ViewerConfig::load(cli.config.as_deref(), &cli.overrides())?;
    PreviewServer::new(config)?.run().await
}
