//! Polling coordinator for one config entry.
//!
//! Each coordinator owns a `watch` channel holding the latest
//! `CoordinatorState`. A poll either publishes a new snapshot (replacing
//! the old one) or, when the planner call fails, keeps the old snapshot
//! and marks the state unavailable. Fetches never overlap.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local};
use tokio::sync::{Mutex, Notify, watch};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::domain::{
    JourneyRequest, MAX_ITINERARIES, Snapshot, SnapshotError, truncate_itineraries,
};
use crate::entry::EntryConfig;
use crate::planner::{
    JourneyPlanner, PlannerCredentials, PlannerError, PlannerProvider, to_simple_itineraries,
};

/// Default poll period.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(90);

/// Shortest poll period the run loop accepts; shorter ones are raised to it.
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Errors a poll can raise. Missing configuration is not one of them;
/// it produces an error snapshot instead.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("journey planner failed: {0}")]
    Planner(#[from] PlannerError),
}

/// Coordinator tuning.
#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub update_interval: Duration,
    /// Keep the provider payload on each snapshot (debugging aid).
    pub include_raw: bool,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            include_raw: false,
        }
    }
}

/// What subscribers see.
#[derive(Debug, Clone)]
pub struct CoordinatorState {
    /// Last published snapshot; `None` until the first successful poll.
    pub data: Option<Arc<Snapshot>>,
    /// False after a failed poll, until the next successful one.
    pub last_update_success: bool,
    pub last_updated: Option<DateTime<FixedOffset>>,
    pub last_error: Option<String>,
}

impl Default for CoordinatorState {
    fn default() -> Self {
        Self {
            data: None,
            last_update_success: true,
            last_updated: None,
            last_error: None,
        }
    }
}

/// Read access to a coordinator's published state.
#[derive(Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<CoordinatorState>,
}

impl SnapshotReader {
    /// The last published snapshot.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.rx.borrow().data.clone()
    }

    pub fn available(&self) -> bool {
        self.rx.borrow().last_update_success
    }

    pub fn state(&self) -> CoordinatorState {
        self.rx.borrow().clone()
    }

    /// Wait for the next publish. Returns false once the coordinator is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Polls the journey planner for one entry.
pub struct JourneyCoordinator<P> {
    entry: Arc<EntryConfig>,
    planner: Option<P>,
    settings: CoordinatorSettings,
    state: watch::Sender<CoordinatorState>,
    refresh_requested: Notify,
    fetch_lock: Mutex<()>,
}

impl<P: JourneyPlanner> JourneyCoordinator<P> {
    /// Build a coordinator; `make_planner` runs only when the entry has
    /// planner credentials.
    pub fn new<F>(
        entry: Arc<EntryConfig>,
        settings: CoordinatorSettings,
        make_planner: F,
    ) -> Result<Self, PlannerError>
    where
        F: FnOnce(PlannerCredentials) -> Result<P, PlannerError>,
    {
        if entry.planner_provider != PlannerProvider::TransportApi {
            warn!(
                provider = entry.planner_provider.as_str(),
                "only 'transportapi' is implemented; using it instead"
            );
        }

        let planner = match entry.planner_credentials() {
            Some(credentials) => Some(make_planner(credentials)?),
            None => {
                warn!(
                    station = %entry.station,
                    "TransportAPI credentials are missing; planner will be disabled"
                );
                None
            }
        };

        let (state, _) = watch::channel(CoordinatorState::default());

        Ok(Self {
            entry,
            planner,
            settings,
            state,
            refresh_requested: Notify::new(),
            fetch_lock: Mutex::new(()),
        })
    }

    pub fn entry(&self) -> &EntryConfig {
        &self.entry
    }

    pub fn subscribe(&self) -> SnapshotReader {
        SnapshotReader {
            rx: self.state.subscribe(),
        }
    }

    /// Ask the run loop for an out-of-schedule poll.
    pub fn request_refresh(&self) {
        self.refresh_requested.notify_one();
    }

    /// Compute a fresh snapshot without publishing it.
    pub async fn update(&self) -> Result<Snapshot, CoordinatorError> {
        let entry = &self.entry;
        let when = Local::now().fixed_offset();
        let origin = entry.station;
        let destination = entry.primary_destination().copied();

        let Some(planner) = &self.planner else {
            return Ok(Snapshot::failed(
                SnapshotError::MissingCredentials,
                Some(origin),
                destination,
                entry.via,
                when,
            ));
        };

        let Some(destination) = destination else {
            return Ok(Snapshot::failed(
                SnapshotError::MissingRoute,
                Some(origin),
                None,
                entry.via,
                when,
            ));
        };

        let request = JourneyRequest::new(
            origin,
            destination,
            entry.via,
            entry.avoid,
            when,
            entry.max_changes,
            entry.min_interchange_mins,
        );

        let payload = planner.plan(&request).await?;
        let itineraries = truncate_itineraries(to_simple_itineraries(&payload)?, MAX_ITINERARIES);

        Ok(Snapshot::planned(
            origin,
            destination,
            entry.via,
            when,
            itineraries,
            self.settings.include_raw.then_some(payload),
        ))
    }

    /// Poll once and publish the outcome.
    pub async fn refresh(&self) -> Result<(), CoordinatorError> {
        let _guard = self.fetch_lock.lock().await;

        match self.update().await {
            Ok(snapshot) => {
                info!(
                    station = %self.entry.station,
                    itineraries = snapshot.itineraries().len(),
                    error = snapshot.error().map(|e| e.as_str()),
                    "journey snapshot updated"
                );
                let updated = snapshot.when();
                self.state.send_replace(CoordinatorState {
                    data: Some(Arc::new(snapshot)),
                    last_update_success: true,
                    last_updated: Some(updated),
                    last_error: None,
                });
                Ok(())
            }
            Err(e) => {
                warn!(station = %self.entry.station, error = %e, "journey update failed");
                self.state.send_modify(|state| {
                    state.last_update_success = false;
                    state.last_error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    /// Poll on the fixed interval and on request, forever.
    ///
    /// The first tick is skipped: set-up performs the first refresh.
    pub async fn run(self: Arc<Self>)
    where
        P: Send + Sync + 'static,
    {
        let period = self.settings.update_interval.max(MIN_UPDATE_INTERVAL);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = self.refresh_requested.notified() => {
                    interval.reset();
                }
            }
            // Failures are already recorded in the published state.
            let _ = self.refresh().await;
        }
    }
}
