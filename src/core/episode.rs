//! Single-episode rollout under a fixed policy, without weight updates.

use rand::rngs::StdRng;
use tracing::info;

use crate::ai::learning::policy::Policy;
use crate::ai::learning::reward::RewardConfig;
use crate::ai::metrics::episode_metrics::EpisodeResult;
use crate::core::engine::GameEngine;
use crate::error::PolicyError;

/// Plays one episode to completion with epsilon-greedy selection and
/// returns the engine's result with the shaped reward total filled in.
/// Pass `epsilon = 0.0` for a pure greedy rollout.
pub fn run_policy_episode<E: GameEngine>(
    policy: &Policy,
    engine: &mut E,
    rng: &mut StdRng,
    epsilon: f64,
    verbose: bool,
) -> Result<EpisodeResult, PolicyError> {
    let shaper = RewardConfig::default();
    let mut total_reward = 0.0;
    let mut step = 0u32;

    while !engine.is_over() {
        let pre = engine.view();
        let candidates = engine.candidates();
        if candidates.is_empty() {
            break;
        }
        let action = policy
            .choose_action(&pre, &candidates, epsilon, rng)?
            .clone();
        let events = engine.apply(&action)?;
        let post = engine.view();
        let reward = shaper.shape(&pre, &action, &post, &events);
        total_reward += reward;
        step += 1;

        if verbose {
            info!(
                step,
                turn = engine.turn(),
                action = %action,
                reward,
                captures = post.monsters_captured,
                "applied action"
            );
        }
        if events.done() {
            break;
        }
    }

    let mut result = engine.result();
    result.total_reward = total_reward;
    Ok(result)
}
