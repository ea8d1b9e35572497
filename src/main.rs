//! Command-line entry point for surface-elo
//!
//! Loads the configured historical and live match files, replays them into
//! per-surface Elo ratings and answers a single query.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use surface_elo::config::{validate_config, AppConfig};
use surface_elo::ingest::{CsvRecordSource, PartitionMode, RecordNormalizer, RecordSource};
use surface_elo::types::{LeaderboardEntry, Prediction, COMBINED_PARTITION};
use surface_elo::RatingSession;
use tracing::{error, info, warn};

/// Surface Elo - per-surface tennis ratings from match results
#[derive(Parser)]
#[command(
    name = "surface-elo",
    version,
    about = "Per-surface Elo ratings, win probabilities and leaderboards from tennis match files",
    long_about = "surface-elo replays historical and live match result files in chronological \
                 order, keeps an independent Elo rating per player and surface, and answers \
                 head-to-head win probability and leaderboard queries."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Historical match files (replaces the configured list)
    #[arg(long, value_name = "FILE")]
    historical: Vec<PathBuf>,

    /// Live match files (replaces the configured list)
    #[arg(long, value_name = "FILE")]
    live: Vec<PathBuf>,

    /// K-factor override
    #[arg(long, value_name = "K")]
    k_factor: Option<f64>,

    /// Baseline rating override
    #[arg(long, value_name = "RATING")]
    baseline: Option<f64>,

    /// Rate every match on a single surface-agnostic scale
    #[arg(long)]
    combined: bool,

    /// Drop exact duplicate matches before replay
    #[arg(long)]
    dedup: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Win probability of one player against another
    Predict {
        #[arg(short = 'a', long)]
        player_a: String,
        #[arg(short = 'b', long)]
        player_b: String,
        /// Surface (defaults to the first configured surface)
        #[arg(short, long)]
        surface: Option<String>,
    },
    /// Top players on a surface
    Leaderboard {
        #[arg(short, long)]
        surface: Option<String>,
        /// Number of rows (defaults to the configured limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// List every rated player
    Players,
    /// List configured and observed surfaces
    Surfaces,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if args.debug {
        config.service.log_level = "debug".to_string();
    }
    if !args.historical.is_empty() {
        config.sources.historical = args.historical.clone();
    }
    if !args.live.is_empty() {
        config.sources.live = args.live.clone();
    }
    if let Some(k_factor) = args.k_factor {
        config.rating.k_factor = k_factor;
    }
    if let Some(baseline) = args.baseline {
        config.rating.baseline = baseline;
    }
    if args.combined {
        config.sources.partition_mode = PartitionMode::Combined;
    }
    if args.dedup {
        config.sources.deduplicate = true;
    }

    validate_config(&config)?;
    Ok(config)
}

fn build_session(config: &AppConfig) -> Result<RatingSession> {
    if config.sources.historical.is_empty() && config.sources.live.is_empty() {
        warn!("No match files configured, every rating will be the baseline");
    }

    let historical: Vec<CsvRecordSource> = config
        .sources
        .historical
        .iter()
        .map(|path| CsvRecordSource::from_path(path))
        .collect();
    let live: Vec<CsvRecordSource> = config
        .sources
        .live
        .iter()
        .map(|path| CsvRecordSource::from_path(path))
        .collect();

    let historical: Vec<&dyn RecordSource> =
        historical.iter().map(|s| s as &dyn RecordSource).collect();
    let live: Vec<&dyn RecordSource> = live.iter().map(|s| s as &dyn RecordSource).collect();

    let normalized = RecordNormalizer::from_settings(&config.sources).merge(&historical, &live)?;

    let mut session = RatingSession::new(config.rating.clone())?;
    let summary = session.rebuild(&normalized.records)?;

    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        info!("Ratings cover {} to {}", first, last);
    }

    Ok(session)
}

fn default_surface(config: &AppConfig) -> String {
    match config.sources.partition_mode {
        PartitionMode::Combined => COMBINED_PARTITION.to_string(),
        PartitionMode::Surface => config
            .rating
            .partitions
            .first()
            .cloned()
            .unwrap_or_else(|| COMBINED_PARTITION.to_string()),
    }
}

/// Names with no rated match, which predict at the baseline
fn unknown_players<'a>(session: &RatingSession, players: &[&'a str]) -> Vec<&'a str> {
    players
        .iter()
        .copied()
        .filter(|player| !session.is_known(player))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_prediction(prediction: &Prediction) {
    println!(
        "{} win probability vs {} on {}: {:.2}%",
        prediction.competitor_a,
        prediction.competitor_b,
        capitalize(&prediction.partition),
        prediction.probability * 100.0
    );
    println!(
        "  {}: {:.1}  {}: {:.1}",
        prediction.competitor_a,
        prediction.rating_a,
        prediction.competitor_b,
        prediction.rating_b
    );
}

fn print_leaderboard(surface: &str, entries: &[LeaderboardEntry]) {
    println!(
        "\nTop {} Players by Elo Rating on {}:",
        entries.len(),
        capitalize(surface)
    );
    println!("{:>4} {:>7} {:<30}", "Rank", "Elo", "Player");
    println!("{}", "-".repeat(43));
    for entry in entries {
        println!(
            "{:>4} {:>7.1} {:<30}",
            entry.rank, entry.rating, entry.competitor
        );
    }
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let session = build_session(config)?;

    match &args.command {
        Command::Predict {
            player_a,
            player_b,
            surface,
        } => {
            let surface = surface
                .as_deref()
                .map(surface_elo::types::normalize_partition)
                .unwrap_or_else(|| default_surface(config));
            for player in unknown_players(&session, &[player_a.as_str(), player_b.as_str()]) {
                warn!("No matches found for {}, using the baseline rating", player);
            }
            let prediction = session.predict(player_a, player_b, &surface)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                print_prediction(&prediction);
            }
        }
        Command::Leaderboard { surface, limit } => {
            let surface = surface
                .as_deref()
                .map(surface_elo::types::normalize_partition)
                .unwrap_or_else(|| default_surface(config));
            let limit = limit.unwrap_or(config.service.leaderboard_limit);
            let entries = session.leaderboard(&surface, limit);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_leaderboard(&surface, &entries);
            }
        }
        Command::Players => {
            let players = session.competitors();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&players)?);
            } else {
                for player in players {
                    println!("{}", player);
                }
            }
        }
        Command::Surfaces => {
            let surfaces = session.partitions();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&surfaces)?);
            } else {
                for surface in surfaces {
                    println!("{}", surface);
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&args, &config) {
        error!("{:#}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
