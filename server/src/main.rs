use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use engine::{build_index, corpus};
use server::build_app;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Directory of documents to index at startup
    #[arg(long, default_value = "./data")]
    root: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let start = std::time::Instant::now();
    let index = build_index(corpus::walk(&args.root)).with_context(|| format!("indexing {}", args.root))?;
    tracing::info!(num_docs = index.num_docs(), num_terms = index.num_terms(), took_s = start.elapsed().as_secs_f64(), "index built");
    let app: Router = build_app(Arc::new(index));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
