//! Transition log for offline replay.
//!
//! Each transition carries full state snapshots (view plus candidate set)
//! for both endpoints, so replay can recompute the chosen action's
//! features and the successor's greedy value without re-running a game.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::actions::game_action::GameAction;
use crate::ai::learning::policy::FILE_MUTEX;
use crate::core::engine::StateSnapshot;
use crate::error::PolicyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: StateSnapshot,
    pub action: GameAction,
    pub reward: f64,
    pub next_state: StateSnapshot,
    pub done: bool,
}

/// Append-only in-memory transition store with JSON persistence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionStore {
    transitions: Vec<Transition>,
}

impl TransitionStore {
    pub fn new() -> Self {
        TransitionStore::default()
    }

    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub fn extend(&mut self, transitions: impl IntoIterator<Item = Transition>) {
        self.transitions.extend(transitions);
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn as_slice(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), PolicyError> {
        let _lock = FILE_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.transitions)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        debug!(path = %path.display(), count = self.transitions.len(), "saved transitions");
        Ok(())
    }

    /// Loads a transition log. A missing file is an empty store; anything
    /// unparsable is a format error naming the file.
    pub fn load_from_file(path: &Path) -> Result<Self, PolicyError> {
        let _lock = FILE_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no transition log yet, starting empty");
                return Ok(TransitionStore::new());
            }
            Err(err) => return Err(PolicyError::Storage(err)),
        };

        let transitions: Vec<Transition> =
            serde_json::from_str(&json).map_err(|source| PolicyError::TransitionFormat {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), count = transitions.len(), "loaded transitions");
        Ok(TransitionStore { transitions })
    }
}
