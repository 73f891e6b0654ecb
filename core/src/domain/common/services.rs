use std::sync::atomic::AtomicU64;

use tokio::sync::{Mutex, RwLock};

use crate::domain::{
    authentication::{entities::Session, ports::AuthClient},
    common::SearchConfig,
    favorite::entities::FavoriteSet,
    food::ports::FoodRepository,
    preference::ports::PreferenceStore,
    profile::ports::ProfileRepository,
    scan::entities::ScanGate,
    search_history::entities::RecentSearchList,
};

/// Aggregate every flow is implemented on. One instance corresponds to one
/// logical user session: it owns the in-memory mirrors of the local
/// preference data and serializes writes to them.
pub struct Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    pub food_repository: F,
    pub preference_store: P,
    pub auth_client: A,
    pub profile_repository: PR,
    pub(crate) search_config: SearchConfig,
    pub(crate) favorites: Mutex<Option<FavoriteSet>>,
    pub(crate) recent_searches: Mutex<Option<RecentSearchList>>,
    pub(crate) session: RwLock<Option<Session>>,
    pub(crate) scan_gate: ScanGate,
    pub(crate) search_sequence: AtomicU64,
}

impl<F, P, A, PR> Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    pub fn new(
        food_repository: F,
        preference_store: P,
        auth_client: A,
        profile_repository: PR,
        search_config: SearchConfig,
    ) -> Self {
        Self {
            food_repository,
            preference_store,
            auth_client,
            profile_repository,
            search_config,
            favorites: Mutex::new(None),
            recent_searches: Mutex::new(None),
            session: RwLock::new(None),
            scan_gate: ScanGate::default(),
            search_sequence: AtomicU64::new(0),
        }
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search_config
    }
}
