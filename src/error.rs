//! Error taxonomy for the policy and training components.
//!
//! Per-step errors (feature extraction, engine failures) abort only the
//! current episode; load-time errors (weights, transitions) abort the run
//! before any episode starts.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PolicyError {
    /// Malformed state/action pair during feature extraction.
    Feature(String),
    /// The engine offered an empty candidate set; the caller must guarantee
    /// at least a pass/no-op action exists.
    EmptyActionSet,
    /// A loaded weights file whose key set does not match the feature schema.
    WeightSchema {
        path: Option<PathBuf>,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    /// Corrupt persisted transition log.
    TransitionFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Underlying storage failure; surfaced to the caller, never retried.
    Storage(io::Error),
    /// Engine rejected or failed to apply an action.
    Engine(String),
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::Feature(msg) => write!(f, "feature extraction failed: {}", msg),
            PolicyError::EmptyActionSet => {
                write!(f, "cannot choose an action from an empty candidate set")
            }
            PolicyError::WeightSchema {
                path,
                missing,
                unexpected,
            } => {
                match path {
                    Some(p) => write!(f, "weights file {} does not match the feature schema", p.display())?,
                    None => write!(f, "weight map does not match the feature schema")?,
                }
                if !missing.is_empty() {
                    write!(f, "; missing: {}", missing.join(", "))?;
                }
                if !unexpected.is_empty() {
                    write!(f, "; unexpected: {}", unexpected.join(", "))?;
                }
                Ok(())
            }
            PolicyError::TransitionFormat { path, source } => {
                write!(f, "malformed transition log {}: {}", path.display(), source)
            }
            PolicyError::Storage(err) => write!(f, "storage error: {}", err),
            PolicyError::Engine(msg) => write!(f, "engine error: {}", msg),
        }
    }
}

impl std::error::Error for PolicyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PolicyError::TransitionFormat { source, .. } => Some(source),
            PolicyError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PolicyError {
    fn from(err: io::Error) -> Self {
        PolicyError::Storage(err)
    }
}
