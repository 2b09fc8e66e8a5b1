//! Persistence for policy weights.
//!
//! The on-disk form is a flat pretty-printed JSON map of feature name to
//! weight. Loading rejects any key-set mismatch so a stale or hand-edited
//! file cannot silently shift the schema. Saves go through a temp file
//! and rename, so a crash mid-write never leaves a truncated weights file.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use lazy_static::lazy_static;
use tracing::debug;

use crate::ai::features::schema::FeatureVector;
use crate::ai::learning::policy::Policy;
use crate::error::PolicyError;

lazy_static! {
    // Serializes weight/transition file operations across threads.
    pub(crate) static ref FILE_MUTEX: Mutex<()> = Mutex::new(());
}

impl Policy {
    pub fn save_to_file(&self, path: &Path) -> Result<(), PolicyError> {
        let _lock = FILE_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.weights().to_map())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        debug!(path = %path.display(), "saved policy weights");
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PolicyError> {
        let _lock = FILE_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let json = std::fs::read_to_string(path)?;
        let map: BTreeMap<String, f64> = serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let weights = FeatureVector::from_map(&map).map_err(|err| match err {
            PolicyError::WeightSchema {
                missing,
                unexpected,
                ..
            } => PolicyError::WeightSchema {
                path: Some(path.to_path_buf()),
                missing,
                unexpected,
            },
            other => other,
        })?;
        debug!(path = %path.display(), "loaded policy weights");
        Ok(Policy::new(weights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn weights_survive_a_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.json");

        let mut policy = Policy::baseline();
        policy.weights_mut().monster_value = 0.123;
        policy.save_to_file(&path).unwrap();

        let loaded = Policy::load_from_file(&path).unwrap();
        assert_eq!(loaded.weights(), policy.weights());
    }

    #[test]
    fn re_saving_over_an_existing_file_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.json");

        let policy = Policy::baseline();
        policy.save_to_file(&path).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        policy.save_to_file(&path).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            Policy::load_from_file(&path).unwrap().weights(),
            policy.weights()
        );
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/weights.json");
        Policy::baseline().save_to_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn load_reports_the_offending_path_on_schema_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.json");

        let mut map = Policy::baseline().weights().to_map();
        map.remove("bias");
        map.insert("not_a_feature".to_string(), 1.0);
        std::fs::write(&path, serde_json::to_string_pretty(&map).unwrap()).unwrap();

        let err = Policy::load_from_file(&path).unwrap_err();
        match err {
            PolicyError::WeightSchema {
                path: Some(p),
                missing,
                unexpected,
            } => {
                assert_eq!(p, path);
                assert_eq!(missing, vec!["bias".to_string()]);
                assert_eq!(unexpected, vec!["not_a_feature".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loading_a_missing_file_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let err = Policy::load_from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PolicyError::Storage(_)));
    }
}
