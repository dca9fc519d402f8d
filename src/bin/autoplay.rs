use anyhow::{Context, Result};
use clap::Parser;
use connect_plus::autoplay::{self, AutoplayConfig};
use connect_plus::core::GameConfig;
use env_logger::Env;
use log::info;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Play Connect Plus games with a random placement policy"
)]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Base seed for the run
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Frame limit per game
    #[arg(long, default_value_t = 100_000)]
    max_steps: usize,

    /// Starting board width and height
    #[arg(long, default_value_t = 5)]
    size: i32,

    /// Queue capacity
    #[arg(long, default_value_t = 4)]
    queue: usize,

    /// Distributor correction base
    #[arg(long, default_value_t = 8.0)]
    weight_base: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = GameConfig::new()
        .with_dimensions(cli.size, cli.size)
        .with_queue_capacity(cli.queue)
        .with_weight_base(cli.weight_base);
    config.validate().context("invalid game configuration")?;

    let run = AutoplayConfig::new()
        .with_games(cli.games)
        .with_seed(cli.seed)
        .with_max_steps(cli.max_steps);

    let summaries = autoplay::run(&run, &config);
    for s in &summaries {
        println!(
            "seed={} score={} placements={} upsizes={} board={} steps={} finished={}",
            s.seed, s.score, s.placements, s.upsizes, s.final_dimensions, s.steps, s.finished
        );
    }

    if !summaries.is_empty() {
        let total: u64 = summaries.iter().map(|s| u64::from(s.score)).sum();
        let best = summaries.iter().map(|s| s.score).max().unwrap_or(0);
        info!(
            "Completed {} games: mean score {:.1}, best {}",
            summaries.len(),
            total as f64 / summaries.len() as f64,
            best
        );
    }
    Ok(())
}
