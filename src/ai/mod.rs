// AI module structure for the cardmind policy tuner
// Organized in sub-modules for better maintainability

// Actions module - candidate action definitions
pub mod actions {
    pub mod game_action;
}

// Features module - fixed feature schema and extraction
pub mod features {
    pub mod extractor;
    pub mod schema;
}

// Learning module - policy weights, reward shaping, Q-learning, replay
pub mod learning {
    pub mod constants;
    pub mod policy;
    pub mod reward;
    pub mod trainer;
    pub mod transitions;
}

// Metrics module - episode outcomes and evaluation aggregates
pub mod metrics {
    pub mod episode_metrics;
}

// Re-export common types for convenience
pub use actions::game_action::{CardType, GameAction};
pub use features::schema::FeatureVector;
pub use learning::policy::Policy;
pub use learning::reward::RewardConfig;
pub use metrics::episode_metrics::{EpisodeResult, EvaluationSummary};
