use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing::info;

use crate::date;
use crate::habit::Habit;
use crate::store::HabitStore;

/// Owns the habit collection and the store behind it. All mutation goes
/// through here and persists synchronously; the pure engine and the
/// calendar aggregator only ever see `&[Habit]`, so consumers re-request
/// fresh computations after each mutation instead of patching state.
pub struct HabitTracker {
    store: HabitStore,
    habits: Vec<Habit>,
    dirty: bool,
}

impl HabitTracker {
    /// Loads the collection from `path`. Never fails: missing or
    /// unreadable data yields an empty collection, and legacy records
    /// are backfilled in memory until the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = HabitStore::new(path);
        let outcome = store.load(&date::today_key());
        info!(
            path = %store.path().display(),
            habit_count = outcome.habits.len(),
            migrated = outcome.migrated,
            "habit store loaded"
        );
        Self {
            store,
            habits: outcome.habits,
            dirty: outcome.migrated,
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// True while an in-memory migration has not yet been persisted.
    pub fn needs_save(&self) -> bool {
        self.dirty
    }

    /// Appends a habit created today. Empty and whitespace-only names are
    /// silently rejected, mirroring the add form's behavior; `Ok(false)`
    /// reports the rejection without treating it as an error.
    pub fn add_habit(&mut self, name: &str, today: &str) -> Result<bool> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        self.habits.push(Habit::new(trimmed, today));
        self.persist()?;
        info!(name = trimmed, "habit added");
        Ok(true)
    }

    /// Flips one day's completion for the habit at `index` and persists.
    pub fn toggle_done(&mut self, index: usize, key: &str) -> Result<()> {
        let habit = self
            .habits
            .get_mut(index)
            .ok_or_else(|| anyhow!("no habit at index {index}"))?;
        habit.toggle(key);
        self.persist()
    }

    pub fn remove_habit(&mut self, index: usize) -> Result<()> {
        if index >= self.habits.len() {
            return Err(anyhow!("no habit at index {index}"));
        }
        let removed = self.habits.remove(index);
        self.persist()?;
        info!(name = %removed.name, "habit removed");
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.habits)?;
        self.dirty = false;
        Ok(())
    }
}
