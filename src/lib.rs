// Main module declarations for the cardmind policy tuner

// Core episode machinery: engine seam, reference engine, rollout, evaluation
pub mod core {
    pub mod engine;
    pub mod simulation;
    pub mod episode;
    pub mod evaluation;
}

// AI components: actions, features, policy, learning
pub mod ai;

// Configuration modules
pub mod config {
    pub mod constants;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Error taxonomy shared across the crate
pub mod error;

// Re-export commonly used types
pub use crate::ai::actions::game_action::{CardType, GameAction};
pub use crate::ai::features::schema::FeatureVector;
pub use crate::ai::learning::policy::Policy;
pub use crate::ai::learning::trainer::{Trainer, TrainerConfig};
pub use crate::ai::learning::transitions::{Transition, TransitionStore};
pub use crate::core::engine::{GameEngine, StateSnapshot, StateView};
pub use crate::core::simulation::CardEngine;
pub use crate::error::PolicyError;
