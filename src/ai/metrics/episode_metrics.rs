// Episode outcome metrics and evaluation aggregates

use serde::{Deserialize, Serialize};

/// Aggregate outcome of one episode; consumed read-only for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeResult {
    pub won: bool,
    pub turns_taken: u32,
    pub monsters_captured: u32,
    pub party_class_progress: f64,
    pub total_reward: f64,
}

/// Summary over a batch of evaluation episodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub episodes: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub mean_turns: f64,
    pub mean_captures: f64,
    pub mean_reward: f64,
}

impl EvaluationSummary {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a EpisodeResult>,
    {
        let mut episodes = 0usize;
        let mut wins = 0usize;
        let mut turns = 0.0;
        let mut captures = 0.0;
        let mut reward = 0.0;
        for result in results {
            episodes += 1;
            if result.won {
                wins += 1;
            }
            turns += f64::from(result.turns_taken);
            captures += f64::from(result.monsters_captured);
            reward += result.total_reward;
        }
        let denom = episodes.max(1) as f64;
        EvaluationSummary {
            episodes,
            wins,
            win_rate: wins as f64 / denom,
            mean_turns: turns / denom,
            mean_captures: captures / denom,
            mean_reward: reward / denom,
        }
    }
}
