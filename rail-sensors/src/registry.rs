//! Loaded config entries and their on-disk store.
//!
//! Setting up an entry builds its coordinator, runs the first refresh,
//! spawns the poll loop and creates the sensors. Unloading aborts the loop
//! and drops all of it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::coordinator::{CoordinatorSettings, CoordinatorState, JourneyCoordinator};
use crate::entry::{ConfigEntry, EntryConfig};
use crate::planner::{JourneyPlanner, PlannerCredentials, PlannerError};
use crate::sensor::{Sensor, SensorState, entry_sensors};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown entry: {0}")]
    UnknownEntry(String),

    #[error("entry store error: {message}")]
    Store { message: String },

    #[error("failed to build journey planner: {0}")]
    Planner(#[from] PlannerError),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredEntries {
    entries: Vec<ConfigEntry>,
}

/// JSON file holding accepted entries.
#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read stored entries. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<ConfigEntry>, RegistryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| RegistryError::Store {
            message: format!("failed to read entries file: {}", e),
        })?;
        let stored: StoredEntries =
            serde_json::from_str(&contents).map_err(|e| RegistryError::Store {
                message: format!("failed to parse entries file: {}", e),
            })?;
        Ok(stored.entries)
    }

    /// Replace the stored entries, creating parent directories if needed.
    pub fn save(&self, entries: &[ConfigEntry]) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| RegistryError::Store {
                message: format!("failed to create entries directory: {}", e),
            })?;
        }

        let stored = StoredEntries {
            entries: entries.to_vec(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| RegistryError::Store {
            message: format!("failed to serialize entries: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| RegistryError::Store {
            message: format!("failed to write entries file: {}", e),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One loaded entry with its sensors, for display.
#[derive(Debug, Clone)]
pub struct EntryOverview {
    pub entry: ConfigEntry,
    pub available: bool,
    pub sensors: Vec<SensorState>,
}

type PlannerFactory<P> = Arc<dyn Fn(PlannerCredentials) -> Result<P, PlannerError> + Send + Sync>;

struct LoadedEntry<P> {
    entry: ConfigEntry,
    coordinator: Arc<JourneyCoordinator<P>>,
    sensors: Vec<Box<dyn Sensor>>,
    task: JoinHandle<()>,
}

/// All set-up entries, keyed by entry id.
pub struct EntryRegistry<P> {
    entries: RwLock<BTreeMap<String, LoadedEntry<P>>>,
    store: EntryStore,
    settings: CoordinatorSettings,
    make_planner: PlannerFactory<P>,
}

impl<P> EntryRegistry<P>
where
    P: JourneyPlanner + Send + Sync + 'static,
{
    pub fn new<F>(store: EntryStore, settings: CoordinatorSettings, make_planner: F) -> Self
    where
        F: Fn(PlannerCredentials) -> Result<P, PlannerError> + Send + Sync + 'static,
    {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            store,
            settings,
            make_planner: Arc::new(make_planner),
        }
    }

    /// Set up every stored entry. Returns how many were loaded.
    pub async fn restore(&self) -> Result<usize, RegistryError> {
        let stored = self.store.load()?;
        let mut loaded = 0;
        for entry in stored {
            let entry_id = entry.entry_id.clone();
            match self.setup_entry(entry).await {
                Ok(()) => loaded += 1,
                Err(e) => warn!(entry_id = %entry_id, error = %e, "failed to restore entry"),
            }
        }
        info!(count = loaded, path = %self.store.path().display(), "restored entries");
        Ok(loaded)
    }

    /// Create, set up and persist a new entry.
    ///
    /// If the store cannot be written the entry is unloaded again, so a
    /// loaded entry is always one that survives a restart.
    pub async fn add_entry(
        &self,
        title: String,
        data: EntryConfig,
    ) -> Result<ConfigEntry, RegistryError> {
        let entry = ConfigEntry::new(title, data);
        self.setup_entry(entry.clone()).await?;
        if let Err(e) = self.persist().await {
            warn!(entry_id = %entry.entry_id, error = %e, "failed to save entry; unloading it");
            self.unload_entry(&entry.entry_id).await;
            return Err(e);
        }
        Ok(entry)
    }

    /// Build the coordinator, run the first refresh and start polling.
    ///
    /// A failing first refresh leaves the entry loaded but unavailable;
    /// the poll loop keeps retrying.
    pub async fn setup_entry(&self, entry: ConfigEntry) -> Result<(), RegistryError> {
        let factory = self.make_planner.clone();
        let coordinator = Arc::new(JourneyCoordinator::new(
            Arc::new(entry.data.clone()),
            self.settings.clone(),
            move |creds| factory(creds),
        )?);

        if let Err(e) = coordinator.refresh().await {
            warn!(entry_id = %entry.entry_id, error = %e, "first refresh failed");
        }

        let sensors = entry_sensors(&entry.entry_id, &entry.data, coordinator.subscribe());
        let task = tokio::spawn(coordinator.clone().run());

        info!(entry_id = %entry.entry_id, title = %entry.title, "entry set up");

        let previous = self.entries.write().await.insert(
            entry.entry_id.clone(),
            LoadedEntry {
                entry,
                coordinator,
                sensors,
                task,
            },
        );
        if let Some(previous) = previous {
            previous.task.abort();
        }
        Ok(())
    }

    /// Stop polling and forget the entry. Returns false if it was not loaded.
    pub async fn unload_entry(&self, entry_id: &str) -> bool {
        match self.entries.write().await.remove(entry_id) {
            Some(loaded) => {
                loaded.task.abort();
                info!(entry_id = %entry_id, "entry unloaded");
                true
            }
            None => false,
        }
    }

    /// Unload the entry and drop it from the store.
    pub async fn remove_entry(&self, entry_id: &str) -> Result<(), RegistryError> {
        if !self.unload_entry(entry_id).await {
            return Err(RegistryError::UnknownEntry(entry_id.to_string()));
        }
        self.persist().await
    }

    /// Unload everything, leaving the store untouched.
    pub async fn unload_all(&self) {
        let mut entries = self.entries.write().await;
        for loaded in entries.values() {
            loaded.task.abort();
        }
        entries.clear();
    }

    pub async fn entries(&self) -> Vec<ConfigEntry> {
        self.entries
            .read()
            .await
            .values()
            .map(|loaded| loaded.entry.clone())
            .collect()
    }

    pub async fn state(&self, entry_id: &str) -> Result<CoordinatorState, RegistryError> {
        let entries = self.entries.read().await;
        let loaded = entries
            .get(entry_id)
            .ok_or_else(|| RegistryError::UnknownEntry(entry_id.to_string()))?;
        Ok(loaded.coordinator.subscribe().state())
    }

    pub async fn request_refresh(&self, entry_id: &str) -> Result<(), RegistryError> {
        let entries = self.entries.read().await;
        let loaded = entries
            .get(entry_id)
            .ok_or_else(|| RegistryError::UnknownEntry(entry_id.to_string()))?;
        loaded.coordinator.request_refresh();
        Ok(())
    }

    /// Current state of every sensor across all entries.
    pub async fn sensor_states(&self) -> Vec<SensorState> {
        self.entries
            .read()
            .await
            .values()
            .flat_map(|loaded| loaded.sensors.iter().map(|s| s.state()))
            .collect()
    }

    pub async fn overview(&self) -> Vec<EntryOverview> {
        self.entries
            .read()
            .await
            .values()
            .map(|loaded| EntryOverview {
                entry: loaded.entry.clone(),
                available: loaded.coordinator.subscribe().available(),
                sensors: loaded.sensors.iter().map(|s| s.state()).collect(),
            })
            .collect()
    }

    async fn persist(&self) -> Result<(), RegistryError> {
        let entries = self.entries().await;
        self.store.save(&entries)
    }
}
