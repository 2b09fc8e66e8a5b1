use clap::{Parser, Subcommand};

use crate::config::constants::DEFAULT_TURNS;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Play one greedy episode and print the action log
    Run(RunArgs),
    /// Train policy weights with Q-learning self-play
    Train(TrainArgs),
    /// Compare baseline and tuned weights on identical seeds
    Evaluate(EvaluateArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    #[arg(long, default_value_t = 0, help = "Random seed for the episode")]
    pub seed: u64,

    #[arg(long, default_value_t = DEFAULT_TURNS)]
    pub turns: u32,

    #[arg(long, help = "Weights file to play with (baseline when omitted)")]
    pub weights: Option<String>,
}

#[derive(clap::Args)]
pub struct TrainArgs {
    #[arg(short = 'n', long, default_value_t = 25)]
    pub episodes: usize,

    #[arg(long, default_value_t = DEFAULT_TURNS)]
    pub turns: u32,

    #[arg(long, default_value_t = 0, help = "Base seed; episode k plays seed + k")]
    pub seed: u64,

    #[arg(long, default_value_t = 0.05, help = "Learning rate")]
    pub alpha: f64,

    #[arg(long, default_value_t = 0.9, help = "Discount factor")]
    pub gamma: f64,

    #[arg(long, default_value_t = 0.15, help = "Exploration rate")]
    pub epsilon: f64,

    #[arg(long, default_value_t = 1.0, help = "Multiplicative epsilon decay per episode")]
    pub epsilon_decay: f64,

    #[arg(long, help = "Starting weights (baseline when omitted)")]
    pub weights_in: Option<String>,

    #[arg(long, default_value = "weights.json")]
    pub weights_out: String,

    #[arg(long, help = "Transition log to replay before online training")]
    pub transitions_in: Option<String>,

    #[arg(long, help = "Where to append this run's transitions")]
    pub transitions_out: Option<String>,

    #[arg(long, default_value_t = 1, help = "Replay passes over --transitions-in")]
    pub replay_epochs: usize,

    #[arg(long, help = "Per-episode training history CSV")]
    pub history_csv: Option<String>,
}

#[derive(clap::Args)]
pub struct EvaluateArgs {
    #[arg(long, value_delimiter = ',', required = true, help = "Episode seeds")]
    pub seeds: Vec<u64>,

    #[arg(long, help = "Tuned weights file")]
    pub weights: String,

    #[arg(long, default_value_t = DEFAULT_TURNS)]
    pub turns: u32,

    #[arg(long, help = "Per-seed comparison CSV")]
    pub csv: Option<String>,

    #[arg(long, default_value_t = false, help = "Disable parallel evaluation")]
    pub sequential: bool,
}
