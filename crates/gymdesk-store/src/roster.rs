//! TTL-bounded cache of the member + subscription join.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use gymdesk_core::config::store::StoreConfig;
use gymdesk_core::result::AppResult;
use gymdesk_core::types::id::TrainerId;
use gymdesk_entity::member::MemberProfile;
use gymdesk_gateway::ScheduleGateway;

/// Cache of the bookable-member roster per trainer.
///
/// Balances change on the backend when sessions complete, so entries
/// expire on a short TTL; eligibility filtering over the roster stays a
/// pure function in the scheduler crate.
#[derive(Debug)]
pub struct RosterCache {
    /// Backend used for roster fetches.
    gateway: Arc<dyn ScheduleGateway>,
    /// Trainer id → member profiles.
    cache: Cache<TrainerId, Arc<Vec<MemberProfile>>>,
}

impl RosterCache {
    /// Create a roster cache backed by the given gateway.
    pub fn new(gateway: Arc<dyn ScheduleGateway>, config: &StoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.roster_max_capacity)
            .time_to_live(Duration::from_secs(config.roster_ttl_seconds))
            .build();
        Self { gateway, cache }
    }

    /// Return the trainer's member + subscription join, fetching on a miss.
    pub async fn profiles_for(&self, trainer_id: TrainerId) -> AppResult<Arc<Vec<MemberProfile>>> {
        self.cache
            .try_get_with(trainer_id, async {
                debug!(%trainer_id, "Fetching bookable-member roster");
                self.gateway
                    .list_eligible_members(trainer_id)
                    .await
                    .map(Arc::new)
            })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Drop the cached roster for a trainer.
    pub async fn invalidate(&self, trainer_id: TrainerId) {
        self.cache.invalidate(&trainer_id).await;
    }
}
