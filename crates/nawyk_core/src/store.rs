use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::habit::Habit;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize habit data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write habit data: {0}")]
    Io(#[from] std::io::Error),
}

/// Wire shape of one stored habit. Matches the original store entry:
/// camelCase fields, `doneDates` as a date-to-flag map, and `createdAt`
/// optional because early records predate the field.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHabit {
    name: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    done_dates: BTreeMap<String, bool>,
}

#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub habits: Vec<Habit>,
    /// True when any record was backfilled on load. The migrated shape is
    /// only written back by the next save.
    pub migrated: bool,
}

/// Flat JSON persistence for the habit collection: one file holding the
/// serialized array. Loading is fail-safe; unreadable data is discarded
/// with a diagnostic rather than surfaced as an error.
#[derive(Debug, Clone)]
pub struct HabitStore {
    path: PathBuf,
}

impl HabitStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self, today: &str) -> LoadOutcome {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no habit store yet, starting empty");
                return LoadOutcome::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to read habit store");
                return LoadOutcome::default();
            }
        };

        let stored: Vec<StoredHabit> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "discarding unreadable habit store");
                if let Err(err) = fs::remove_file(&self.path) {
                    warn!(path = %self.path.display(), %err, "failed to clear invalid habit store");
                }
                return LoadOutcome::default();
            }
        };

        let mut migrated = false;
        let habits = stored
            .into_iter()
            .map(|record| {
                let done_dates: BTreeSet<String> = record
                    .done_dates
                    .into_iter()
                    .filter(|(_, done)| *done)
                    .map(|(key, _)| key)
                    .collect();
                let created_at = match record.created_at {
                    Some(key) => key,
                    None => {
                        // Legacy record: derive creation from the earliest
                        // done day, or today when nothing was ever done.
                        migrated = true;
                        done_dates
                            .iter()
                            .next()
                            .cloned()
                            .unwrap_or_else(|| today.to_string())
                    }
                };
                Habit {
                    name: record.name,
                    created_at,
                    done_dates,
                }
            })
            .collect::<Vec<_>>();

        if migrated {
            debug!(path = %self.path.display(), "backfilled creation dates on legacy records");
        }
        LoadOutcome { habits, migrated }
    }

    pub fn save(&self, habits: &[Habit]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let stored: Vec<StoredHabit> = habits
            .iter()
            .map(|habit| StoredHabit {
                name: habit.name.clone(),
                created_at: Some(habit.created_at.clone()),
                done_dates: habit
                    .done_dates
                    .iter()
                    .map(|key| (key.clone(), true))
                    .collect(),
            })
            .collect();
        let payload = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}
