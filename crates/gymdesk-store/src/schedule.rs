//! The authoritative client-side schedule cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::{Mutex, watch};
use tracing::debug;

use gymdesk_core::config::store::StoreConfig;
use gymdesk_core::result::AppResult;
use gymdesk_core::types::id::{SessionId, TrainerId};
use gymdesk_entity::session::TrainingSession;
use gymdesk_gateway::ScheduleGateway;

/// Cached schedule state for one trainer.
#[derive(Debug)]
struct TrainerSchedule {
    /// Sessions in backend list order; local applies append or replace
    /// in place.
    sessions: Vec<TrainingSession>,
    /// When the snapshot was last fetched. `None` means invalidated.
    fetched_at: Option<Instant>,
    /// Fan-out to live views.
    tx: watch::Sender<Vec<TrainingSession>>,
}

impl TrainerSchedule {
    fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            sessions: Vec::new(),
            fetched_at: None,
            tx,
        }
    }

    fn publish(&self) {
        self.tx.send_replace(self.sessions.clone());
    }
}

/// Single source of truth for "what does this trainer's calendar
/// currently contain", keyed by trainer identity.
///
/// Only confirmed backend responses and push-driven refreshes write to
/// the store; callers never mutate it speculatively. Readers subscribe
/// through [`ScheduleStore::subscribe`] so they always observe the most
/// recently resolved state.
#[derive(Debug)]
pub struct ScheduleStore {
    /// Backend used for fetches.
    gateway: Arc<dyn ScheduleGateway>,
    /// How long a fetched snapshot stays fresh without a push event.
    freshness: Duration,
    /// Per-trainer schedule entries.
    schedules: DashMap<TrainerId, Arc<Mutex<TrainerSchedule>>>,
}

impl ScheduleStore {
    /// Create a store backed by the given gateway.
    pub fn new(gateway: Arc<dyn ScheduleGateway>, config: &StoreConfig) -> Self {
        Self {
            gateway,
            freshness: Duration::from_secs(config.freshness_seconds),
            schedules: DashMap::new(),
        }
    }

    fn entry(&self, trainer_id: TrainerId) -> Arc<Mutex<TrainerSchedule>> {
        self.schedules
            .entry(trainer_id)
            .or_insert_with(|| Arc::new(Mutex::new(TrainerSchedule::new())))
            .clone()
    }

    /// Return the trainer's sessions, fetching from the backend when the
    /// cached snapshot is missing, invalidated, or past its freshness
    /// window.
    ///
    /// Holding the entry lock across the fetch also collapses concurrent
    /// readers into a single backend round-trip.
    pub async fn snapshot(&self, trainer_id: TrainerId) -> AppResult<Vec<TrainingSession>> {
        let entry = self.entry(trainer_id);
        let mut schedule = entry.lock().await;

        if let Some(fetched_at) = schedule.fetched_at {
            if fetched_at.elapsed() < self.freshness {
                return Ok(schedule.sessions.clone());
            }
        }

        debug!(%trainer_id, "Schedule snapshot stale, refetching");
        let sessions = self.gateway.list_sessions_for_trainer(trainer_id).await?;
        schedule.sessions = sessions.clone();
        schedule.fetched_at = Some(Instant::now());
        schedule.publish();
        Ok(sessions)
    }

    /// Unconditionally refetch the trainer's schedule from the backend.
    pub async fn refresh(&self, trainer_id: TrainerId) -> AppResult<Vec<TrainingSession>> {
        let entry = self.entry(trainer_id);
        let mut schedule = entry.lock().await;

        let sessions = self.gateway.list_sessions_for_trainer(trainer_id).await?;
        schedule.sessions = sessions.clone();
        schedule.fetched_at = Some(Instant::now());
        schedule.publish();
        Ok(sessions)
    }

    /// Mark the trainer's snapshot stale; the next read refetches.
    pub async fn invalidate(&self, trainer_id: TrainerId) {
        let entry = self.entry(trainer_id);
        entry.lock().await.fetched_at = None;
    }

    /// Apply a confirmed creation response.
    pub async fn apply_created(&self, session: TrainingSession) {
        self.upsert(session).await;
    }

    /// Apply a confirmed update response. Idempotent: applying the same
    /// session twice leaves the store unchanged.
    pub async fn apply_updated(&self, session: TrainingSession) {
        self.upsert(session).await;
    }

    async fn upsert(&self, session: TrainingSession) {
        let entry = self.entry(session.trainer_id());
        let mut schedule = entry.lock().await;
        match schedule.sessions.iter().position(|s| s.id == session.id) {
            Some(position) => schedule.sessions[position] = session,
            None => schedule.sessions.push(session),
        }
        schedule.publish();
    }

    /// Remove a session record after a confirmed deletion.
    pub async fn remove(&self, trainer_id: TrainerId, session_id: SessionId) {
        let entry = self.entry(trainer_id);
        let mut schedule = entry.lock().await;
        let before = schedule.sessions.len();
        schedule.sessions.retain(|s| s.id != session_id);
        if schedule.sessions.len() != before {
            schedule.publish();
        }
    }

    /// Subscribe to the trainer's live schedule.
    ///
    /// The receiver's current value is the latest resolved snapshot and
    /// changes on every store write, so views never cache across a
    /// mutation boundary.
    pub async fn subscribe(&self, trainer_id: TrainerId) -> watch::Receiver<Vec<TrainingSession>> {
        let entry = self.entry(trainer_id);
        let schedule = entry.lock().await;
        schedule.tx.subscribe()
    }
}
