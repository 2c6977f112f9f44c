//! Command line front-end for the Life simulation engine

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use life_engine::{
    config::{CliOverrides, Settings},
    game_of_life::{save_live_cells, Pattern, Rule},
    utils::{ColorOutput, GridFormatter, OutputFormat, ProgressIndicator, RunSummary},
    Game, RunState,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_engine")]
#[command(about = "Life-like cellular automaton simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the simulation commands
#[derive(Args, Debug)]
struct BoardArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Board width (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Board height (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Rule name, notation or index, e.g. conway, 34/3, 2 (overrides config)
    #[arg(short, long)]
    rule: Option<Rule>,

    /// Seed pattern placed at the board centre: glider, glider-gun, pentomino or random
    #[arg(short, long)]
    pattern: Option<String>,

    /// Live-cell file to import before running
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the final live cells to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// RNG seed for random fills (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final board
    #[arg(long)]
    show: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timed scheduler for a fixed wall-clock duration
    Run {
        #[command(flatten)]
        board: BoardArgs,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        speed: Option<u64>,

        /// How long to keep the scheduler running
        #[arg(short, long, default_value_t = 3000)]
        duration_ms: u64,
    },

    /// Apply a number of generations synchronously
    Step {
        #[command(flatten)]
        board: BoardArgs,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,
    },

    /// Create an example configuration and live-cell file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { board, speed, duration_ms } => {
            let overrides = CliOverrides { speed_ms: speed, ..board.overrides() };
            run_command(&board, overrides, duration_ms)
        }
        Commands::Step { board, generations } => {
            let overrides = CliOverrides { generations, ..board.overrides() };
            step_command(&board, overrides)
        }
        Commands::Setup { directory, force } => {
            init_tracing("info");
            setup_command(directory, force)
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

impl BoardArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            width: self.width,
            height: self.height,
            rule: self.rule,
            seed: self.seed,
            ..CliOverrides::default()
        }
    }

    /// Resolve settings: config file (or defaults) with CLI overrides applied
    fn settings(&self, overrides: &CliOverrides) -> Result<Settings> {
        let mut settings = if self.config.exists() {
            Settings::from_file(&self.config)
                .with_context(|| format!("Failed to load config from {}", self.config.display()))?
        } else {
            Settings::default()
        };
        settings.merge_with_cli(overrides);
        settings.validate().context("Configuration validation failed")?;
        Ok(settings)
    }
}

/// Build and seed a paused game from the resolved settings
fn prepare_game(board: &BoardArgs, settings: &Settings) -> Result<Game> {
    if !board.config.exists() {
        tracing::warn!(config = %board.config.display(), "config file not found, using defaults");
    }

    let mut game = life_engine::load_game(settings, board.input.as_deref())?;

    match board.pattern.as_deref() {
        None => {}
        Some("random") => {
            let alive = game.random_fill(None, RunState::Paused);
            tracing::info!(alive, "random fill seeded");
        }
        Some(name) => {
            let pattern: Pattern = name.parse()?;
            game.add_pattern(pattern, None, RunState::Paused);
        }
    }

    tracing::info!(
        width = settings.grid.width,
        height = settings.grid.height,
        rule = %settings.simulation.rule,
        population = game.live_count(),
        "board prepared"
    );
    Ok(game)
}

fn report(board: &BoardArgs, game: &Game, elapsed: Duration) -> Result<()> {
    let (summary, rendered) = game.with_grid(|grid| {
        let rendered = board.show.then(|| GridFormatter::format_grid_compact(grid));
        (RunSummary::from_grid(grid, elapsed), rendered)
    });

    if let Some(rendered) = rendered {
        println!("{}", rendered);
    }
    println!("{}", summary.render(board.format).context("Failed to render summary")?);

    if let Some(output) = &board.output {
        save_output(game, output)?;
    }
    Ok(())
}

fn save_output(game: &Game, path: &Path) -> Result<()> {
    game.with_grid(|grid| save_live_cells(grid, path))?;
    println!("{}", ColorOutput::success(&format!("Live cells saved to {}", path.display())));
    Ok(())
}

fn run_command(board: &BoardArgs, overrides: CliOverrides, duration_ms: u64) -> Result<()> {
    let settings = board.settings(&overrides)?;
    init_tracing(&settings.logging.level);

    let mut game = prepare_game(board, &settings)?;

    println!("{}", ColorOutput::info(&format!(
        "Running {} for {} ms at {} ms per generation",
        settings.simulation.rule, duration_ms, game.speed()
    )));

    let start_time = Instant::now();
    game.start();
    std::thread::sleep(Duration::from_millis(duration_ms));
    game.stop();

    report(board, &game, start_time.elapsed())
}

fn step_command(board: &BoardArgs, overrides: CliOverrides) -> Result<()> {
    let settings = board.settings(&overrides)?;
    init_tracing(&settings.logging.level);

    let mut game = prepare_game(board, &settings)?;
    let generations = settings.simulation.generations;

    let start_time = Instant::now();
    let mut progress = ProgressIndicator::new(generations);
    for _ in 0..generations {
        let step = game.step_once();
        progress.record(&step);
        if step.population == 0 {
            tracing::info!(generation = step.generation, "population died out");
            break;
        }
    }
    progress.finish();

    report(board, &game, start_time.elapsed())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // A glider gun on a board small enough to print
    let mut example = Game::new(64, 48);
    example.add_glider_gun(Some((0, 0)), RunState::Paused);
    let example_path = patterns_dir.join("glider_gun.txt");
    if !example_path.exists() || force {
        save_output(&example, &example_path)?;
    } else {
        println!("Skipped: {} (already exists)", example_path.display());
    }

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: life_engine run --input {} --show", example_path.display());

    Ok(())
}
