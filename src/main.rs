use anyhow::{Context, Result};
use clap::Parser;
use snake3d::game::GameConfig;
use snake3d::modes::PlayMode;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snake3d")]
#[command(version, about = "Snake on a 3D arena, in your terminal")]
struct Cli {
    /// TOML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Half-width of the arena
    #[arg(long)]
    arena_size: Option<f32>,

    /// Number of obstacles to try to place
    #[arg(long)]
    obstacles: Option<usize>,

    /// Seed for apple and obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => GameConfig::default(),
        };

        if let Some(arena_size) = self.arena_size {
            config.arena_size = arena_size;
        }
        if let Some(obstacles) = self.obstacles {
            config.max_obstacles = obstacles;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;
    let config = cli.game_config()?;
    log::info!("starting with {:?}", config);

    let mut play_mode = PlayMode::new(config);
    play_mode.run().await?;

    Ok(())
}
