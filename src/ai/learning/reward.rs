//! Reward shaping for one applied action.
//!
//! Terminal outcomes dominate; the remaining terms are small, bounded
//! nudges so the learner prefers productive actions long before it ever
//! sees a win.

use crate::ai::actions::game_action::GameAction;
use crate::ai::learning::constants::{
    CARD_PLAY_VALUE_RATE, HERO_ACTIVATION_VALUE_RATE, LOSS_PENALTY, MONSTER_ATTACK_VALUE_RATE,
    MONSTER_CAPTURE_REWARD, PARTY_CLASS_COMPLETION_REWARD, PARTY_CLASS_PROGRESS_REWARD,
    WASTED_ACTION_PENALTY, WIN_REWARD,
};
use crate::core::engine::{Outcome, StateView, StepEvents};

/// Shaping rates, defaulting to the hand-tuned constants. Kept as a
/// struct so experiments can rescale terms without touching the shaper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardConfig {
    pub win_reward: f64,
    pub loss_penalty: f64,
    pub capture_reward: f64,
    pub class_completion_reward: f64,
    pub class_progress_reward: f64,
    pub wasted_action_penalty: f64,
    pub play_value_rate: f64,
    pub attack_value_rate: f64,
    pub activation_value_rate: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            win_reward: WIN_REWARD,
            loss_penalty: LOSS_PENALTY,
            capture_reward: MONSTER_CAPTURE_REWARD,
            class_completion_reward: PARTY_CLASS_COMPLETION_REWARD,
            class_progress_reward: PARTY_CLASS_PROGRESS_REWARD,
            wasted_action_penalty: WASTED_ACTION_PENALTY,
            play_value_rate: CARD_PLAY_VALUE_RATE,
            attack_value_rate: MONSTER_ATTACK_VALUE_RATE,
            activation_value_rate: HERO_ACTIVATION_VALUE_RATE,
        }
    }
}

impl RewardConfig {
    /// Shaped reward for one step: action taken at `pre`, engine reported
    /// `events` and landed in `post`.
    pub fn shape(
        &self,
        pre: &StateView,
        action: &GameAction,
        post: &StateView,
        events: &StepEvents,
    ) -> f64 {
        let mut reward = 0.0;

        reward += match action {
            GameAction::Attack { .. } => self.attack_value_rate * action.tuning_value(),
            GameAction::Activate { .. } => self.activation_value_rate * action.tuning_value(),
            GameAction::Play { .. } => self.play_value_rate * action.tuning_value(),
            GameAction::Draw { .. } => 0.0,
        };

        reward += f64::from(events.captured) * self.capture_reward;
        if events.completed_party_class_set {
            reward += self.class_completion_reward;
        }
        let progress_delta = post.party_class_progress() - pre.party_class_progress();
        reward += self.class_progress_reward * progress_delta;

        if events.wasted {
            reward += self.wasted_action_penalty;
        }

        match events.outcome {
            Outcome::Won => reward += self.win_reward,
            Outcome::Lost => reward += self.loss_penalty,
            Outcome::Ongoing => {}
        }

        reward
    }
}
