use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use cardmind::ai::learning::reward::RewardConfig;
use cardmind::cli::cli::{Args, Command, EvaluateArgs, RunArgs, TrainArgs};
use cardmind::core::episode::run_policy_episode;
use cardmind::core::evaluation::compare;
use cardmind::utils::csv_export::{write_csv, EvaluationRecord, TrainingRecord};
use cardmind::utils::logging::init_logging;
use cardmind::{CardEngine, Policy, Trainer, TrainerConfig, TransitionStore};

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    match args.command() {
        Command::Run(run_args) => cmd_run(run_args),
        Command::Train(train_args) => cmd_train(train_args),
        Command::Evaluate(eval_args) => cmd_evaluate(eval_args),
    }
}

fn load_policy(weights: Option<&str>) -> Result<Policy> {
    match weights {
        Some(path) => Policy::load_from_file(Path::new(path))
            .with_context(|| format!("loading weights from {path}")),
        None => Ok(Policy::baseline()),
    }
}

fn cmd_run(args: &RunArgs) -> Result<()> {
    let policy = load_policy(args.weights.as_deref())?;
    let mut engine = CardEngine::new(args.seed, args.turns);
    let mut rng = StdRng::seed_from_u64(args.seed);

    let result = run_policy_episode(&policy, &mut engine, &mut rng, 0.0, true)
        .with_context(|| format!("running episode with seed {}", args.seed))?;

    println!(
        "seed {} | {} in {} turns | {} captures | class progress {:.2} | reward {:.2}",
        args.seed,
        if result.won { "WON" } else { "LOST" },
        result.turns_taken,
        result.monsters_captured,
        result.party_class_progress,
        result.total_reward,
    );
    Ok(())
}

fn cmd_train(args: &TrainArgs) -> Result<()> {
    let policy = load_policy(args.weights_in.as_deref())?;
    let config = TrainerConfig {
        episodes: args.episodes,
        turns: args.turns,
        learning_rate: args.alpha,
        discount_factor: args.gamma,
        exploration_rate: args.epsilon,
        exploration_decay: args.epsilon_decay,
        replay_epochs: args.replay_epochs,
    };
    let mut trainer = Trainer::new(policy, config, args.seed).with_reward(RewardConfig::default());

    if let Some(path) = &args.transitions_in {
        let replayed = TransitionStore::load_from_file(Path::new(path))
            .with_context(|| format!("loading transition log {path}"))?;
        if !replayed.is_empty() {
            info!(
                count = replayed.len(),
                epochs = config.replay_epochs,
                "replaying transition log before online training"
            );
            trainer
                .replay(replayed.as_slice(), config.replay_epochs)
                .context("replaying transition log")?;
        }
    }

    let bar = ProgressBar::new(args.episodes as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} episodes ({eta})",
        )?
        .progress_chars("#>-"),
    );

    let base_seed = args.seed;
    let turns = args.turns;
    let mut history: Vec<TrainingRecord> = Vec::with_capacity(args.episodes);
    let mut run_store = TransitionStore::new();
    let results = trainer.train(
        |episode| CardEngine::new(base_seed.wrapping_add(episode as u64), turns),
        &mut run_store,
        |episode, result| {
            let epsilon = args.epsilon * args.epsilon_decay.powi(episode as i32);
            history.push(TrainingRecord::new(episode, result, epsilon));
            bar.inc(1);
        },
    )?;
    bar.finish();

    let wins = results.iter().filter(|r| r.won).count();
    println!(
        "trained {} episodes | {} wins ({:.0}%) | {} transitions recorded",
        results.len(),
        wins,
        100.0 * wins as f64 / results.len().max(1) as f64,
        run_store.len(),
    );

    trainer
        .policy()
        .save_to_file(Path::new(&args.weights_out))
        .with_context(|| format!("saving weights to {}", args.weights_out))?;
    println!("weights written to {}", args.weights_out);

    if let Some(path) = &args.transitions_out {
        let mut combined = TransitionStore::load_from_file(Path::new(path))
            .with_context(|| format!("loading transition log {path}"))?;
        combined.extend(run_store.as_slice().iter().cloned());
        combined
            .save_to_file(Path::new(path))
            .with_context(|| format!("saving transition log {path}"))?;
        println!("{} transitions written to {}", combined.len(), path);
    }

    if let Some(path) = &args.history_csv {
        write_csv(Path::new(path), &history)
            .with_context(|| format!("writing training history {path}"))?;
        println!("training history written to {path}");
    }
    Ok(())
}

fn cmd_evaluate(args: &EvaluateArgs) -> Result<()> {
    let tuned = load_policy(Some(&args.weights))?;
    let baseline = Policy::baseline();

    let report = compare(&baseline, &tuned, &args.seeds, args.turns, !args.sequential)
        .context("evaluating policies")?;

    println!(
        "{:<10} {:>8} {:>10} {:>12} {:>12} {:>12}",
        "policy", "episodes", "win rate", "mean turns", "captures", "mean reward"
    );
    for (name, summary) in [("baseline", &report.baseline), ("tuned", &report.tuned)] {
        println!(
            "{:<10} {:>8} {:>9.0}% {:>12.2} {:>12.2} {:>12.2}",
            name,
            summary.episodes,
            100.0 * summary.win_rate,
            summary.mean_turns,
            summary.mean_captures,
            summary.mean_reward,
        );
    }

    if let Some(path) = &args.csv {
        let records: Vec<EvaluationRecord> = report
            .per_seed
            .iter()
            .map(|(&seed, (base, tuned))| EvaluationRecord {
                seed,
                baseline_won: base.won,
                baseline_captures: base.monsters_captured,
                baseline_reward: base.total_reward,
                tuned_won: tuned.won,
                tuned_captures: tuned.monsters_captured,
                tuned_reward: tuned.total_reward,
            })
            .collect();
        write_csv(Path::new(path), &records)
            .with_context(|| format!("writing evaluation results {path}"))?;
        println!("per-seed results written to {path}");
    }
    Ok(())
}
