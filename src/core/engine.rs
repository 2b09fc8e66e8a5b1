//! Engine seam: the abstract surface the policy and trainer consume.
//!
//! The real game rules live behind [`GameEngine`]; the learning stack only
//! sees read-only state views, candidate actions and per-step events.

use serde::{Deserialize, Serialize};

use crate::ai::actions::game_action::GameAction;
use crate::ai::metrics::episode_metrics::EpisodeResult;
use crate::error::PolicyError;

/// Read-only summary of the agent-visible state at one decision point.
/// Serializable so it can double as the transition log's state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateView {
    pub action_points: u32,
    pub actions_per_turn: u32,
    pub hand_size: u32,
    pub party_size: u32,
    pub monsters_captured: u32,
    pub unique_classes_collected: u32,
    pub total_required_classes: u32,
    pub captures_for_victory: u32,
    /// Heroes still activatable this turn, including the one about to act.
    pub remaining_activations: u32,
    pub draw_pile_size: u32,
}

impl StateView {
    /// Fraction of required hero classes represented in the party.
    /// Zero when no classes are required.
    pub fn party_class_progress(&self) -> f64 {
        if self.total_required_classes == 0 {
            0.0
        } else {
            f64::from(self.unique_classes_collected) / f64::from(self.total_required_classes)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    Ongoing,
}

/// What happened during one applied action, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepEvents {
    /// Monsters captured by this step (can exceed 1 if captures resolve
    /// atomically).
    pub captured: u32,
    /// True the first time the full required class set is assembled.
    pub completed_party_class_set: bool,
    /// True when the action had no state-changing effect.
    pub wasted: bool,
    pub outcome: Outcome,
}

impl StepEvents {
    pub fn done(&self) -> bool {
        self.outcome != Outcome::Ongoing
    }
}

/// Serializable snapshot stored in the transition log: enough to recompute
/// features of the recorded action and the legal candidate set of the
/// successor state, so replay never needs the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub view: StateView,
    pub candidates: Vec<GameAction>,
}

pub trait GameEngine {
    fn view(&self) -> StateView;

    /// Legal candidate actions at the current decision point. Empty only
    /// when the episode is over (or genuinely nothing is playable, in
    /// which case the rollout ends the episode).
    fn candidates(&self) -> Vec<GameAction>;

    /// Applies one action, advancing turns as needed, and reports the
    /// step's events. Rejects actions that are not currently legal.
    fn apply(&mut self, action: &GameAction) -> Result<StepEvents, PolicyError>;

    fn outcome(&self) -> Outcome;

    /// Elapsed turns (1-based during play).
    fn turn(&self) -> u32;

    fn is_over(&self) -> bool {
        self.outcome() != Outcome::Ongoing
    }

    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            view: self.view(),
            candidates: self.candidates(),
        }
    }

    /// Aggregate outcome for reporting once the episode has ended.
    fn result(&self) -> EpisodeResult {
        let view = self.view();
        EpisodeResult {
            won: self.outcome() == Outcome::Won,
            turns_taken: self.turn(),
            monsters_captured: view.monsters_captured,
            party_class_progress: view.party_class_progress(),
            total_reward: 0.0,
        }
    }
}
