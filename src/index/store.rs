//! Build-once cache of site indexes keyed by site set.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::loader::load_sites;
use super::site::SiteSet;
use super::SiteIndexes;
use crate::error::Result;
use crate::ports::http::HttpClient;

type Slot = Arc<OnceCell<Arc<SiteIndexes>>>;

/// Shared cache of built indexes, one entry per distinct [`SiteSet`].
///
/// Hosts that initialize the resolver repeatedly (once per rendered page or
/// build pass) get the same tables back without refetching. Concurrent
/// requests for the same site set wait for a single build. A failed build
/// leaves nothing behind, so a later request starts over.
pub struct IndexStore {
    http: Arc<dyn HttpClient>,
    slots: Mutex<HashMap<SiteSet, Slot>>,
}

impl IndexStore {
    /// Creates an empty store that fetches through `http`.
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http, slots: Mutex::new(HashMap::new()) }
    }

    /// Returns the indexes for `sites`, building them on first request.
    ///
    /// # Errors
    ///
    /// Returns the configuration, fetch or parse error of the first failing site.
    pub async fn get_or_build(&self, sites: &SiteSet) -> Result<Arc<SiteIndexes>> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(sites.clone()).or_default())
        };

        if let Some(built) = slot.get() {
            debug!(sites = sites.len(), "reusing cached site indexes");
            return Ok(Arc::clone(built));
        }

        let built = slot
            .get_or_try_init(|| async {
                info!(sites = sites.len(), "building site indexes");
                let indexes = load_sites(self.http.as_ref(), sites).await?;
                info!(
                    members = indexes.member_count(),
                    packages = indexes.package_count(),
                    "site indexes ready"
                );
                Ok::<_, crate::error::Error>(Arc::new(indexes))
            })
            .await;

        match built {
            Ok(built) => Ok(Arc::clone(built)),
            Err(e) => {
                self.discard_empty(sites, &slot);
                Err(e)
            }
        }
    }

    /// Drops the slot for `sites` if it is still `slot` and nothing was built into it.
    fn discard_empty(&self, sites: &SiteSet, slot: &Slot) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots.get(sites).is_some_and(|s| Arc::ptr_eq(s, slot) && !s.initialized()) {
            slots.remove(sites);
        }
    }

    /// Returns already-built indexes for `sites` without fetching.
    #[must_use]
    pub fn cached(&self, sites: &SiteSet) -> Option<Arc<SiteIndexes>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(sites).and_then(|slot| slot.get().cloned())
    }
}
