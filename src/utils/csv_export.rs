//! CSV reports for training history and evaluation results.

use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::ai::metrics::episode_metrics::EpisodeResult;
use crate::error::PolicyError;

/// One row of training history, one record per episode.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingRecord {
    pub episode: usize,
    pub won: bool,
    pub turns_taken: u32,
    pub monsters_captured: u32,
    pub party_class_progress: f64,
    pub total_reward: f64,
    pub exploration_rate: f64,
    pub timestamp: String,
}

impl TrainingRecord {
    pub fn new(episode: usize, result: &EpisodeResult, exploration_rate: f64) -> Self {
        TrainingRecord {
            episode,
            won: result.won,
            turns_taken: result.turns_taken,
            monsters_captured: result.monsters_captured,
            party_class_progress: result.party_class_progress,
            total_reward: result.total_reward,
            exploration_rate,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// One row of evaluation output: the same seed under both policies.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    pub seed: u64,
    pub baseline_won: bool,
    pub baseline_captures: u32,
    pub baseline_reward: f64,
    pub tuned_won: bool,
    pub tuned_captures: u32,
    pub tuned_reward: f64,
}

pub fn write_csv<T: Serialize>(path: &Path, records: &[T]) -> Result<(), PolicyError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(path).map_err(io_from_csv)?;
    for record in records {
        writer.serialize(record).map_err(io_from_csv)?;
    }
    writer.flush()?;
    Ok(())
}

fn io_from_csv(err: csv::Error) -> PolicyError {
    PolicyError::Storage(std::io::Error::new(std::io::ErrorKind::Other, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn training_history_writes_a_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let result = EpisodeResult {
            won: true,
            turns_taken: 7,
            monsters_captured: 3,
            party_class_progress: 0.5,
            total_reward: 18.25,
        };
        let records = vec![
            TrainingRecord::new(0, &result, 0.15),
            TrainingRecord::new(1, &result, 0.15),
        ];
        write_csv(&path, &records).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("episode,won,turns_taken"));
        assert_eq!(lines.count(), 2);
    }
}
