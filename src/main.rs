use anyhow::{Context, Result};
use clap::Parser;
use neon_serpent::commentary::{CommentaryHandle, GeminiProvider, OfflineProvider};
use neon_serpent::config::AppConfig;
use neon_serpent::game::{Difficulty, GameEngine};
use neon_serpent::modes::HumanMode;
use neon_serpent::persistence::{HighScoreStore, default_high_score_path};
use neon_serpent::session::GameSession;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "neon_serpent")]
#[command(version, about = "Cyberpunk Snake with AI commentary")]
struct Cli {
    /// Skip the menu and start at this difficulty
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// High score file (defaults to the platform data directory)
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Commentary lines to keep on screen, 0 keeps all of them
    #[arg(long)]
    log_retention: Option<usize>,

    /// Never contact the commentary service
    #[arg(long)]
    offline: bool,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model name
    #[arg(long)]
    model: Option<String>,

    /// Write diagnostics here (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<(AppConfig, Option<Difficulty>)> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(width) = self.width {
            config.game.grid_width = width;
        }
        if let Some(height) = self.height {
            config.game.grid_height = height;
        }
        if let Some(path) = self.high_score_file {
            config.high_score_file = Some(path);
        }
        if let Some(retention) = self.log_retention {
            config.commentary.log_retention = (retention > 0).then_some(retention);
        }
        if self.offline {
            config.commentary.enabled = false;
        }
        if let Some(model) = self.model {
            config.commentary.model = model;
        }
        config.commentary.api_key = self
            .api_key
            .or_else(|| std::env::var("API_KEY").ok())
            .or(config.commentary.api_key);

        config.validate()?;
        Ok((config, self.difficulty))
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "neon_serpent=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn open_high_scores(config: &AppConfig) -> HighScoreStore {
    match config.high_score_file.clone().or_else(default_high_score_path) {
        Some(path) => HighScoreStore::open(path),
        None => {
            warn!("no data directory available, high score kept in memory");
            HighScoreStore::in_memory()
        }
    }
}

fn spawn_commentary(config: &AppConfig) -> CommentaryHandle {
    let retention = config.commentary.log_retention;
    if config.commentary.credential().is_none() {
        info!("commentary offline");
        return CommentaryHandle::spawn(OfflineProvider, retention);
    }

    match GeminiProvider::new(&config.commentary) {
        Ok(provider) => {
            info!(model = %config.commentary.model, "commentary online");
            CommentaryHandle::spawn(provider, retention)
        }
        Err(err) => {
            warn!(error = %err, "commentary client unavailable");
            CommentaryHandle::spawn(OfflineProvider, retention)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // The terminal belongs to the UI, so diagnostics only go to a file
    if let Some(path) = cli.log_file.take() {
        init_logging(&path)?;
    }

    let (config, difficulty) = cli.into_config()?;
    info!(
        width = config.game.grid_width,
        height = config.game.grid_height,
        "starting"
    );

    let session = GameSession::new(
        GameEngine::new(config.game.clone()),
        open_high_scores(&config),
        spawn_commentary(&config),
    );

    let mut human_mode = HumanMode::new(session);
    if let Some(difficulty) = difficulty {
        human_mode = human_mode.with_difficulty(difficulty);
    }
    human_mode.run().await?;

    Ok(())
}
