//! PaperCite - Entry Point
//!
//! Resolves paper titles via Crossref and appends formatted references to a file.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use papercite::pipeline::{BatchConfig, DEFAULT_OUTPUT};
use papercite::{CitationPipeline, Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "papercite")]
#[command(about = "Build a reference list from paper titles using Crossref")]
#[command(version)]
struct Cli {
    /// Paper titles to cite
    titles: Vec<String>,

    /// File with one title per line (blank lines and # comments are ignored)
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// File the citations are appended to
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Cjc)]
    format: OutputFormat,

    /// Contact e-mail announced to Crossref
    #[arg(long, env = "PAPERCITE_MAILTO")]
    mailto: Option<String>,

    /// Crossref API base URL
    #[arg(long, env = "CROSSREF_API_URL")]
    api_url: Option<String>,

    /// Do not warn about fields missing from fetched records
    #[arg(long)]
    quiet_missing: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::new(cli.mailto);
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    config.warn_missing_fields = !cli.quiet_missing;
    config.validate()?;

    let mut titles = cli.titles;
    if let Some(path) = &cli.input {
        titles.extend(BatchConfig::read_titles(path).await?);
    }
    if titles.is_empty() {
        anyhow::bail!("no titles given; pass titles as arguments or use --input");
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        titles = titles.len(),
        output = %cli.output.display(),
        format = ?cli.format,
        "Starting PaperCite"
    );

    let pipeline = CitationPipeline::new(&config)?;
    let batch = BatchConfig::new(titles, cli.output, cli.format);
    let summary = pipeline.run_batch(&batch).await?;

    if summary.skipped > 0 {
        tracing::warn!(skipped = summary.skipped, "Some titles could not be cited");
    }

    Ok(())
}
