use anyhow::{Context, Result};
use clap::Parser;
use galaxy_conquest::game::config::{ConfigOverrides, GameConfig, DEFAULT_CONFIG_PATH};
use galaxy_conquest::game::geometry::Point;
use galaxy_conquest::game::persistence::SaveStore;
use galaxy_conquest::game::render::DrawList;
use galaxy_conquest::game::system::galaxy_report;
use galaxy_conquest::game::Game;
use std::path::PathBuf;

/// Headless run: generate a galaxy, print it, render one frame and quick save.
#[derive(Debug, Parser)]
#[command(name = "galaxy-conquest", version)]
struct Cli {
    /// JSON config file; missing files fall back to defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    fps: Option<u32>,

    /// Number of star systems to place.
    #[arg(long)]
    systems: Option<usize>,

    #[arg(long)]
    background_stars: Option<usize>,

    #[arg(long)]
    nebulae: Option<usize>,

    /// Start with the debug overlay on.
    #[arg(long)]
    debug: bool,

    /// Log filter, e.g. `info` or `galaxy_conquest=debug`.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            screen_width: self.width,
            screen_height: self.height,
            fps: self.fps,
            num_star_systems: self.systems,
            num_background_stars: self.background_stars,
            num_nebulae: self.nebulae,
            debug_enabled: self.debug.then_some(true),
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig::load(&cli.config, &cli.overrides())
        .with_context(|| format!("loading {}", cli.config.display()))?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    log::info!("Starting Galaxy Conquest (seed {})", cli.seed);

    let mut game = Game::new(cli.seed, config, SaveStore::default());
    game.new_game();
    print!("{}", galaxy_report(game.galaxy()));

    let mut frame = DrawList::default();
    game.update(0, Point::default());
    game.render(&mut frame);
    log::debug!("First frame: {} draw commands", frame.commands.len());

    let path = game.save_game().context("writing quick save")?;
    println!("Saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_become_config_overrides() {
        let cli = Cli::try_parse_from([
            "galaxy-conquest",
            "--seed",
            "9",
            "--systems",
            "12",
            "--width",
            "1600",
            "--debug",
        ])
        .unwrap();
        assert_eq!(cli.seed, 9);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));

        let overrides = cli.overrides();
        assert_eq!(overrides.num_star_systems, Some(12));
        assert_eq!(overrides.screen_width, Some(1600));
        assert_eq!(overrides.screen_height, None);
        assert_eq!(overrides.debug_enabled, Some(true));
        assert_eq!(overrides.log_level, None);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let cli = Cli::try_parse_from(["galaxy-conquest", "--config", "missing.json", "--fps", "30"])
            .unwrap();
        let config = GameConfig::load(&cli.config, &cli.overrides()).unwrap();
        assert_eq!(config.fps, 30);
        assert!(!config.debug_enabled);
    }

    #[test]
    fn rejects_a_non_numeric_seed() {
        assert!(Cli::try_parse_from(["galaxy-conquest", "--seed", "abc"]).is_err());
    }
}
