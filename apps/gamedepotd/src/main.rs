//! Game Depot daemon entry point.

mod config;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gamedepot_manifest::{ScanOptions, TreeManifest, write_manifest};
use gamedepot_server::{DownloadServer, ServerConfig};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "gamedepotd", version, about = "Minimal game-distribution server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TCP download server and the HTTP route layer
    Serve {
        /// Repository root containing one directory per game
        #[arg(long)]
        repo: Option<PathBuf>,
        /// TCP port for the download protocol
        #[arg(long)]
        tcp_port: Option<u16>,
        /// Port for the HTTP route layer
        #[arg(long)]
        http_port: Option<u16>,
    },
    /// Generate a manifest for a directory tree
    Scan {
        /// Directory to scan
        dir: PathBuf,
        /// Output manifest path (defaults to the manifest name inside the
        /// scanned directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Include hidden files and directories
        #[arg(long)]
        hidden: bool,
    },
    /// Print a manifest summary and its file list
    Show {
        /// Manifest file to read
        manifest: PathBuf,
        /// Only list files from this entry onward
        #[arg(long)]
        from: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            repo,
            tcp_port,
            http_port,
        } => serve(repo, tcp_port, http_port),
        Commands::Scan {
            dir,
            output,
            hidden,
        } => scan(&dir, output, hidden),
        Commands::Show { manifest, from } => show(&manifest, from.as_deref()),
    }
}

fn serve(
    repo: Option<PathBuf>,
    tcp_port: Option<u16>,
    http_port: Option<u16>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(repo) = repo {
        config.games_repo = repo;
    }
    if let Some(port) = tcp_port {
        config.tcp_port = port;
    }
    if let Some(port) = http_port {
        config.http_port = port;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        repo = %config.games_repo.display(),
        "starting gamedepotd"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_servers(config))?;

    tracing::info!("daemon shut down cleanly");
    Ok(())
}

async fn run_servers(config: Config) -> anyhow::Result<()> {
    let server = DownloadServer::new(ServerConfig {
        port: config.tcp_port,
        repo_root: config.games_repo.clone(),
        manifest_name: config.manifest_name.clone(),
    });

    let mut tcp = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.run().await })
    };

    let http_addr: SocketAddr = ([0, 0, 0, 0], config.http_port).into();
    let http_listener = tokio::net::TcpListener::bind(http_addr).await?;
    tracing::info!(%http_addr, "HTTP route layer listening");
    let http = tokio::spawn(async move {
        axum::serve(http_listener, gamedepot_http::router()).await
    });

    tokio::select! {
        // Bind failure (or any accept-loop exit) is fatal at startup.
        result = &mut tcp => result??,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested");
            server.shutdown();
            tcp.await??;
        }
    }

    http.abort();
    Ok(())
}

fn scan(dir: &Path, output: Option<PathBuf>, hidden: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let out = output.unwrap_or_else(|| dir.join(&config.manifest_name));
    let options = ScanOptions {
        include_hidden: hidden,
    };

    let scan = write_manifest(dir, &out, &options)?;

    println!("Manifest written to {}", out.display());
    println!("  Root: {}", scan.root_name);
    println!("  Directories: {} (created first by clients)", scan.dirs.len());
    println!("  Files: {}", scan.files.len());
    Ok(())
}

fn show(path: &Path, from: Option<&str>) -> anyhow::Result<()> {
    let manifest = TreeManifest::from_file(path)?;

    println!("root: {}", manifest.root_name());
    println!("protocol version: {}", manifest.protocol_version());
    println!("generated: {}", manifest.generated());
    println!(
        "dirs: {} declared, {} listed",
        manifest.total_dirs(),
        manifest.dirs().len()
    );
    println!(
        "files: {} declared, {} listed",
        manifest.total_files(),
        manifest.files().len()
    );

    let files = match from {
        Some(name) => manifest.files_from(name)?,
        None => manifest.files(),
    };
    for file in files {
        println!("{file}");
    }
    Ok(())
}
