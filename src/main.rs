use anyhow::Result;
use clap::Parser;
use image_book_finder::image::{ImageDetail, ImagePayload};
use image_book_finder::models::{Config, PipelineResult};
use image_book_finder::pipeline::Pipeline;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "image-book-finder")]
#[command(about = "Find books related to the contents of an image")]
struct CliArgs {
    /// Image file to analyze.
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Maximum number of books to return (overrides BOOK_LIMIT).
    #[arg(long)]
    limit: Option<NonZeroUsize>,

    /// Image fidelity sent to the inference service: low, high or auto.
    #[arg(long, value_parser = parse_detail_arg)]
    detail: Option<ImageDetail>,

    /// Print the full result as JSON instead of the summary text.
    #[arg(long)]
    json: bool,
}

fn parse_detail_arg(input: &str) -> std::result::Result<ImageDetail, String> {
    input.parse().map_err(|e| format!("{}", e))
}

fn render_output(result: &PipelineResult, json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string_pretty(result)
    } else {
        Ok(result.summary_text.clone())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_book_finder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(limit) = args.limit {
        config.book_limit = limit;
    }
    if let Some(detail) = args.detail {
        config.image_detail = detail;
    }

    let pipeline = match Pipeline::from_config(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("Failed to initialize pipeline: {}", e);
            std::process::exit(1);
        }
    };

    let payload = match &args.image {
        Some(path) => {
            info!("Loading image from {}", path.display());
            match ImagePayload::from_path(path).await {
                Ok(payload) => Some(payload),
                Err(e) => {
                    error!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        None => None,
    };

    let result = match pipeline.run(payload).await {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    match render_output(&result, args.json) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Failed to serialize result: {}", e);
            std::process::exit(1);
        }
    }
}
