use std::{env, sync::Arc, time::Duration};

use clap::Parser;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use memeforge::adapter::{
    claude::{self, TextGenerator},
    image::{self, ImageGenerator},
    news::NewsSource,
    reddit::RedditSource,
};
use memeforge::components::{
    generator::MemeGenerator,
    trending::TrendingAggregator,
    web::{self, WebState},
};

#[derive(Error, Debug)]
enum ApplicationError {
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
    #[error("text adapter error: {0}")]
    Text(#[from] claude::Error),
    #[error("image adapter error: {0}")]
    Image(#[from] image::Error),
    #[error("web error: {0}")]
    Web(#[from] web::Error),
}

#[derive(Parser, Debug, Serialize)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 8787u16)]
    port: u16,
    #[arg(long, default_value = "claude-3-sonnet-20240229")]
    text_model: String,
    #[arg(long, default_value = "gpt-image-1")]
    image_model: String,
    #[arg(long, default_value = "https://api.anthropic.com")]
    anthropic_endpoint: String,
    #[arg(long, default_value = "https://api.openai.com")]
    openai_endpoint: String,
    #[arg(long, default_value = "https://www.reddit.com")]
    reddit_auth_endpoint: String,
    #[arg(long, default_value = "https://oauth.reddit.com")]
    reddit_endpoint: String,
    #[arg(long, default_value = "https://newsapi.org")]
    news_endpoint: String,
    #[arg(long, default_value_t = 120u64)]
    trending_cache_secs: u64,
}

fn required_env(name: &'static str) -> Result<String, ApplicationError> {
    env::var(name).map_err(|_| ApplicationError::MissingEnv(name))
}

async fn app() -> Result<(), ApplicationError> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let args_json = serde_json::to_value(&args).unwrap();

    let anthropic_key = required_env("ANTHROPIC_API_KEY")?;
    let openai_key = required_env("OPENAI_API_KEY")?;

    let mut trending = TrendingAggregator::new(Duration::from_secs(args.trending_cache_secs));
    match (env::var("REDDIT_CLIENT_ID"), env::var("REDDIT_CLIENT_SECRET")) {
        (Ok(client_id), Ok(client_secret)) => {
            trending.register_source(RedditSource::new(
                &args.reddit_auth_endpoint,
                &args.reddit_endpoint,
                &client_id,
                &client_secret,
            ));
        }
        _ => warn!("reddit credentials not configured, skipping reddit source"),
    }
    match env::var("NEWSAPI_KEY") {
        Ok(api_key) => trending.register_source(NewsSource::new(&args.news_endpoint, &api_key)),
        Err(_) => warn!("news api key not configured, skipping news source"),
    }
    let trending = Arc::new(trending);

    let text = TextGenerator::new(&args.anthropic_endpoint, &anthropic_key, &args.text_model)?;
    let image = ImageGenerator::new(&args.openai_endpoint, &openai_key, &args.image_model)?;
    let generator = MemeGenerator::new(text, image, trending.clone());

    let state = Arc::new(WebState {
        generator,
        trending,
        app_args: args_json,
    });

    web::serve(state, args.port).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    match app().await {
        Ok(_) => (),
        Err(e) => panic!("Error: {}", e),
    }
}
