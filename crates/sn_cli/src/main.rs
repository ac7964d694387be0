use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use sn_core::CompletionModel;
use sn_inference::{create_model, BatchSummarizer, Config, StockNewsSummarizer};
use sn_market::YahooFinanceLookup;
use sn_news::GoogleNewsSource;
use sn_web::{create_app, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about = "Stock news summarizer", long_about = None)]
struct Cli {
    /// Completion backend to use
    #[arg(long, default_value = "groq")]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize recent news for a ticker and print the result
    Summarize {
        ticker: String,
        /// Window start, YYYY-MM-DD (default: 30 days ago)
        #[arg(long)]
        start: Option<String>,
        /// Window end, YYYY-MM-DD (default: today)
        #[arg(long)]
        end: Option<String>,
    },
    /// Serve the password-gated form UI
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

fn build_model(name: &str) -> anyhow::Result<Arc<dyn CompletionModel>> {
    let config = Config {
        api_key: std::env::var("GROQ_API_KEY").ok(),
        ..Config::default()
    };
    if name == "groq" && config.api_key.as_deref().unwrap_or("").is_empty() {
        bail!("GROQ_API_KEY not found. Please add it to the .env file.");
    }
    create_model(name, &config).context("failed to create completion model")
}

fn build_summarizer(model: Arc<dyn CompletionModel>) -> anyhow::Result<StockNewsSummarizer> {
    Ok(StockNewsSummarizer::new(
        Arc::new(YahooFinanceLookup::new()?),
        Arc::new(GoogleNewsSource::new()),
        BatchSummarizer::new(model),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let model = build_model(&cli.model)?;
    info!(model = model.name(), "completion backend ready");

    match cli.command {
        Commands::Summarize { ticker, start, end } => {
            let summarizer = build_summarizer(model)?;
            let summary = summarizer
                .summarize_stock_news(&ticker, start.as_deref(), end.as_deref())
                .await;
            println!("{summary}");
        }
        Commands::Serve { addr } => {
            let summarizer = build_summarizer(model)?;
            let password = std::env::var("APP_PASSWORD").ok();
            if password.as_deref().unwrap_or("").is_empty() {
                // an unset password locks the gate; say so up front
                tracing::warn!("APP_PASSWORD is not set, all requests will be rejected");
            }
            let app = create_app(AppState::new(Arc::new(summarizer), password));
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            info!(%addr, "serving stock news summarizer UI");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
