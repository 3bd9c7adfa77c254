use anyhow::{Context, Result};
use clap::Parser;
use deskvoice::skills::{OpenWeatherMap, SystemLauncher, WikipediaClient};
use deskvoice::speech::{RecognizerFactory, SpeakerHandle, SynthesizerFactory};
use deskvoice::{create_router, AppState, CommandRouter, Config, SessionConfig};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "deskvoice", about = "Voice/text command assistant server")]
struct Args {
    /// Configuration file (TOML, extension optional)
    #[arg(long, default_value = "config/deskvoice")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let recognizer = RecognizerFactory::create(&cfg.speech)?;
    let synthesizer = SynthesizerFactory::create(&cfg.speech)?;
    let speaker = SpeakerHandle::new(synthesizer);

    let router = Arc::new(CommandRouter::new(
        Arc::new(OpenWeatherMap::new(&cfg.weather)),
        Arc::new(WikipediaClient::new()),
        Arc::new(SystemLauncher),
        cfg.weather.default_city.clone(),
    ));

    let state = AppState::new(
        SessionConfig::from_speech(&cfg.speech),
        recognizer,
        router,
        speaker,
    );

    let app = create_router(state);
    let addr = format!("{}:{}", cfg.service.bind, cfg.service.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server started at ws://{}/ws", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
