//! Semi-gradient TD(0) Q-learning on the linear policy.
//!
//! Online training rolls episodes with epsilon-greedy exploration and
//! updates the weights after every applied action. The same update rule
//! replays a recorded transition log offline, since each transition
//! carries both endpoint snapshots.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::ai::features::extractor;
use crate::ai::learning::constants::{
    DEFAULT_DISCOUNT_FACTOR, DEFAULT_EXPLORATION_DECAY, DEFAULT_EXPLORATION_RATE,
    DEFAULT_LEARNING_RATE, DEFAULT_TRAINING_EPISODES,
};
use crate::ai::learning::policy::Policy;
use crate::ai::learning::reward::RewardConfig;
use crate::ai::learning::transitions::{Transition, TransitionStore};
use crate::ai::metrics::episode_metrics::EpisodeResult;
use crate::core::engine::GameEngine;
use crate::error::PolicyError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainerConfig {
    pub episodes: usize,
    /// Turn budget handed to each constructed engine.
    pub turns: u32,
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub exploration_rate: f64,
    pub exploration_decay: f64,
    /// Full passes over a loaded transition log before online episodes.
    pub replay_epochs: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            episodes: DEFAULT_TRAINING_EPISODES,
            turns: crate::config::constants::DEFAULT_TURNS,
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            exploration_rate: DEFAULT_EXPLORATION_RATE,
            exploration_decay: DEFAULT_EXPLORATION_DECAY,
            replay_epochs: 1,
        }
    }
}

pub struct Trainer {
    policy: Policy,
    config: TrainerConfig,
    reward: RewardConfig,
    epsilon: f64,
    rng: StdRng,
}

impl Trainer {
    pub fn new(policy: Policy, config: TrainerConfig, seed: u64) -> Self {
        Trainer {
            epsilon: config.exploration_rate,
            policy,
            config,
            reward: RewardConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_reward(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn into_policy(self) -> Policy {
        self.policy
    }

    /// Current exploration rate, after any decay applied so far.
    pub fn exploration_rate(&self) -> f64 {
        self.epsilon
    }

    /// Runs the configured number of training episodes, appending every
    /// transition to `store`. An engine that errors mid-episode aborts
    /// that episode only; training continues with the next one.
    pub fn train<E, F, C>(
        &mut self,
        mut engine_factory: F,
        store: &mut TransitionStore,
        mut on_episode: C,
    ) -> Result<Vec<EpisodeResult>, PolicyError>
    where
        E: GameEngine,
        F: FnMut(usize) -> E,
        C: FnMut(usize, &EpisodeResult),
    {
        let mut results = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let mut engine = engine_factory(episode);
            match self.run_episode(&mut engine, store) {
                Ok(result) => {
                    debug!(
                        episode,
                        won = result.won,
                        captures = result.monsters_captured,
                        reward = result.total_reward,
                        "training episode finished"
                    );
                    on_episode(episode, &result);
                    results.push(result);
                }
                Err(err) => {
                    warn!(episode, error = %err, "episode aborted");
                }
            }
            self.epsilon *= self.config.exploration_decay;
        }
        info!(
            episodes = results.len(),
            wins = results.iter().filter(|r| r.won).count(),
            "training pass complete"
        );
        Ok(results)
    }

    fn run_episode<E: GameEngine>(
        &mut self,
        engine: &mut E,
        store: &mut TransitionStore,
    ) -> Result<EpisodeResult, PolicyError> {
        let mut total_reward = 0.0;
        while !engine.is_over() {
            let pre = engine.snapshot();
            if pre.candidates.is_empty() {
                break;
            }
            let action = self
                .policy
                .choose_action(&pre.view, &pre.candidates, self.epsilon, &mut self.rng)?
                .clone();
            let events = engine.apply(&action)?;
            let post = engine.snapshot();

            let reward = self.reward.shape(&pre.view, &action, &post.view, &events);
            total_reward += reward;
            let done = events.done();

            self.update(&Transition {
                state: pre.clone(),
                action: action.clone(),
                reward,
                next_state: post.clone(),
                done,
            })?;
            store.push(Transition {
                state: pre,
                action,
                reward,
                next_state: post,
                done,
            });

            if done {
                break;
            }
        }
        let mut result = engine.result();
        result.total_reward = total_reward;
        Ok(result)
    }

    /// Replays a recorded transition log for the given number of epochs,
    /// applying the same TD(0) update the online path uses.
    pub fn replay(&mut self, transitions: &[Transition], epochs: usize) -> Result<(), PolicyError> {
        for epoch in 0..epochs {
            for transition in transitions {
                self.update(transition)?;
            }
            debug!(epoch, count = transitions.len(), "replay epoch complete");
        }
        Ok(())
    }

    /// One TD(0) step: w[f] += alpha * delta * f, where
    /// delta = r + gamma * max_a' Q(s', a') - Q(s, a) and the successor
    /// term is dropped on terminal transitions.
    fn update(&mut self, transition: &Transition) -> Result<(), PolicyError> {
        let features = extractor::extract(&transition.state.view, &transition.action)?;
        let q = self.policy.weights().dot(&features);

        let next_value = if transition.done {
            0.0
        } else {
            self.policy.max_value(
                &transition.next_state.view,
                &transition.next_state.candidates,
            )?
        };
        let target = transition.reward + self.config.discount_factor * next_value;
        let delta = target - q;
        if !delta.is_finite() {
            warn!(delta, "skipping non-finite TD update");
            return Ok(());
        }

        let mut weights = self.policy.weights().to_array();
        for (weight, feature) in weights.iter_mut().zip(features.to_array()) {
            *weight += self.config.learning_rate * delta * feature;
        }
        *self.policy.weights_mut() =
            crate::ai::features::schema::FeatureVector::from_array(weights);
        Ok(())
    }
}
