use clap::Parser;
use prodsim_api::{ApiState, RestApi};
use prodsim_assist::{AssistantConfig, Recommender};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Content-based product recommendations over a CSV catalog
#[derive(Parser, Debug)]
#[command(name = "prodsim")]
#[command(about = "Similar-product recommendations with optional AI search", long_about = None)]
struct Args {
    /// Path to the product catalog CSV
    #[arg(short, long, env = "PRODSIM_DATA", default_value = "clean_data.csv")]
    data: PathBuf,

    /// HTTP API port
    #[arg(long, env = "PRODSIM_HTTP_PORT", default_value_t = 5000)]
    http_port: u16,

    /// Recommendations returned per query
    #[arg(long, env = "PRODSIM_TOP_N", default_value_t = 5)]
    top_n: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Chat-completions API key; AI features are disabled without one
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Chat-completions API base URL
    #[arg(long, env = "PRODSIM_API_BASE", default_value = prodsim_assist::DEFAULT_API_BASE)]
    api_base: String,

    /// Model used for search resolution and insights
    #[arg(long, env = "PRODSIM_MODEL", default_value = prodsim_assist::DEFAULT_MODEL)]
    model: String,

    /// Timeout for each language-model call, in seconds
    #[arg(long, env = "PRODSIM_LLM_TIMEOUT", default_value_t = 10)]
    llm_timeout_secs: u64,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting prodsim v{}", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }
    info!("Catalog: {:?}", args.data);
    info!("HTTP API port: {}", args.http_port);

    let assistant = AssistantConfig {
        api_key: args.api_key,
        api_base: args.api_base,
        model: args.model,
        timeout: Duration::from_secs(args.llm_timeout_secs),
    }
    .build();

    let recommender = Arc::new(Recommender::from_csv_path(&args.data, assistant)?);
    info!("Index ready: {} products", recommender.catalog().len());

    let state = ApiState::new(recommender, args.top_n.max(1));
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        res = RestApi::start(state, args.http_port) => {
            res?;
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
