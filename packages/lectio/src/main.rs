// CLI entry point: one-shot generation or the web server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectio::config::Config;
use lectio::pdf::Wkhtmltopdf;
use lectio::pipeline;
use lectio::providers;
use lectio::scrape::{FetchReadings, FileSource, UsccbClient};
use lectio::server::{build_app, today, AppState};

#[derive(Debug, Parser)]
#[command(name = "lectio", about = "Daily-readings curation pipeline")]
struct Cli {
    /// Run the web server
    #[arg(long)]
    serve: bool,

    /// ISO date (YYYY-MM-DD) to generate for; defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Port for --serve (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Read readings HTML from a local file instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,

    /// Use the legacy LLM-generated page layout
    #[arg(long)]
    llm_layout: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lectio=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    let provider = providers::from_config(&config).context("failed to select LLM provider")?;

    let fetcher: Arc<dyn FetchReadings> = match &cli.input {
        Some(path) => Arc::new(FileSource::new(path)),
        None => Arc::new(
            UsccbClient::new(&config.usccb_base_url, &config.usccb_daily_url)
                .context("failed to build readings client")?,
        ),
    };

    if cli.serve {
        let port = cli.port.unwrap_or(config.port);
        let state = AppState {
            provider,
            fetcher,
            pdf: Arc::new(Wkhtmltopdf::default()),
            config: Arc::new(config),
            default_date: cli.date,
        };
        let app = build_app(state);

        let addr = format!("127.0.0.1:{port}");
        tracing::info!("listening on http://{addr}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        axum::serve(listener, app).await.context("server error")?;
        return Ok(());
    }

    let date = cli.date.unwrap_or_else(today);
    let fetched = fetcher
        .fetch(&date)
        .await
        .with_context(|| format!("failed to load readings for {date}"))?;

    let html = if cli.llm_layout {
        pipeline::run_llm_layout(&fetched.html, &date, provider.as_ref(), &config).await?
    } else {
        pipeline::run(
            &fetched.html,
            &date,
            Some(&fetched.url),
            provider.as_ref(),
            &config,
        )
        .await?
    };

    println!("{html}");
    Ok(())
}
