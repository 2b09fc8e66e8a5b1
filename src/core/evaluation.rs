//! Frozen-weights evaluation over fixed seed sets.
//!
//! Every episode is greedy (epsilon 0) and fully determined by its seed,
//! so evaluation doubles as a regression check: same seeds plus same
//! weights always reproduce the same results.

use std::collections::BTreeMap;

use rayon::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::ai::learning::policy::Policy;
use crate::ai::metrics::episode_metrics::{EpisodeResult, EvaluationSummary};
use crate::core::episode::run_policy_episode;
use crate::core::simulation::CardEngine;
use crate::error::PolicyError;

/// Runs one greedy episode per seed. Seeds map to results so callers can
/// line up baseline and tuned runs of the same game.
pub fn evaluate(
    policy: &Policy,
    seeds: &[u64],
    turns: u32,
    parallel: bool,
) -> Result<BTreeMap<u64, EpisodeResult>, PolicyError> {
    let play = |&seed: &u64| -> Result<(u64, EpisodeResult), PolicyError> {
        let mut engine = CardEngine::new(seed, turns);
        let mut rng = StdRng::seed_from_u64(seed);
        let result = run_policy_episode(policy, &mut engine, &mut rng, 0.0, false)?;
        Ok((seed, result))
    };

    if parallel {
        seeds.par_iter().map(play).collect()
    } else {
        seeds.iter().map(play).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub baseline: EvaluationSummary,
    pub tuned: EvaluationSummary,
    /// Per-seed (baseline, tuned) results of the same game.
    pub per_seed: BTreeMap<u64, (EpisodeResult, EpisodeResult)>,
}

/// Evaluates two policies on identical seeds and summarizes both sides.
pub fn compare(
    baseline: &Policy,
    tuned: &Policy,
    seeds: &[u64],
    turns: u32,
    parallel: bool,
) -> Result<ComparisonReport, PolicyError> {
    let baseline_results = evaluate(baseline, seeds, turns, parallel)?;
    let mut tuned_results = evaluate(tuned, seeds, turns, parallel)?;

    let report = ComparisonReport {
        baseline: EvaluationSummary::from_results(baseline_results.values()),
        tuned: EvaluationSummary::from_results(tuned_results.values()),
        per_seed: baseline_results
            .into_iter()
            .filter_map(|(seed, base)| {
                tuned_results.remove(&seed).map(|tuned| (seed, (base, tuned)))
            })
            .collect(),
    };
    info!(
        seeds = seeds.len(),
        baseline_win_rate = report.baseline.win_rate,
        tuned_win_rate = report.tuned.win_rate,
        "evaluation complete"
    );
    Ok(report)
}
