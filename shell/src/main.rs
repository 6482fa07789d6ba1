use anyhow::{Context, Result};
use clap::Parser;
use engine::{build_index, corpus, Strategy};
use shell::{run, Options};
use std::io;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "shell")]
#[command(about = "Index a directory of text files and query it interactively", long_about = None)]
struct Args {
    /// Top-level directory of the dataset; every file below it is indexed
    root: String,
    /// Initial query strategy (boolean or tfidf)
    #[arg(long, default_value_t = Strategy::Boolean)]
    strategy: Strategy,
    /// Initial maximum number of results per query
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    max_results: u64,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    tracing::info!(root = %args.root, "building the index");
    let start = Instant::now();
    let index = build_index(corpus::walk(&args.root)).with_context(|| format!("indexing {}", args.root))?;
    tracing::info!(
        num_docs = index.num_docs(),
        num_terms = index.num_terms(),
        took_s = start.elapsed().as_secs_f64(),
        "finished indexing"
    );

    let options = Options { strategy: args.strategy, max_results: args.max_results as usize };
    run(&index, options, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
