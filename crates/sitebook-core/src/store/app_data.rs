use std::sync::Arc;
use tracing::{debug, info};

use crate::api::EntityApi;
use crate::config::CoreConfig;
use crate::models::{Client, Inspection, Invoice, Payment, Permit, Project, SiteVisit};
use crate::store::{CacheError, CacheStore, EntityFetcher};

/// One loaded snapshot of every collection, ready for joins and aggregates.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub clients: Arc<Vec<Client>>,
    pub projects: Arc<Vec<Project>>,
    pub permits: Arc<Vec<Permit>>,
    pub inspections: Arc<Vec<Inspection>>,
    pub invoices: Arc<Vec<Invoice>>,
    pub payments: Arc<Vec<Payment>>,
    pub site_visits: Arc<Vec<SiteVisit>>,
}

/// Application data scope: one cache store per entity kind, sharing one
/// REST client. Constructed and injected; there is no global instance.
pub struct AppData {
    pub clients: CacheStore<Client>,
    pub projects: CacheStore<Project>,
    pub permits: CacheStore<Permit>,
    pub inspections: CacheStore<Inspection>,
    pub invoices: CacheStore<Invoice>,
    pub payments: CacheStore<Payment>,
    pub site_visits: CacheStore<SiteVisit>,
}

impl AppData {
    pub fn new(api: Arc<dyn EntityApi>, config: &CoreConfig) -> Self {
        let fetcher = EntityFetcher::new(api);
        let ttl = config.cache_ttl;
        debug!("creating app data scope with ttl {:?}", ttl);

        Self {
            clients: CacheStore::new(fetcher.clone(), ttl),
            projects: CacheStore::new(fetcher.clone(), ttl),
            permits: CacheStore::new(fetcher.clone(), ttl),
            inspections: CacheStore::new(fetcher.clone(), ttl),
            invoices: CacheStore::new(fetcher.clone(), ttl),
            payments: CacheStore::new(fetcher.clone(), ttl),
            site_visits: CacheStore::new(fetcher, ttl),
        }
    }

    /// Bring every collection up to date with one combined wait.
    /// Fails if any collection fails with nothing cached to fall back on.
    pub async fn load_all(&self, force_refresh: bool) -> Result<Collections, CacheError> {
        let (clients, projects, permits, inspections, invoices, payments, site_visits) =
            futures::try_join!(
                self.clients.get_all(force_refresh),
                self.projects.get_all(force_refresh),
                self.permits.get_all(force_refresh),
                self.inspections.get_all(force_refresh),
                self.invoices.get_all(force_refresh),
                self.payments.get_all(force_refresh),
                self.site_visits.get_all(force_refresh),
            )?;

        Ok(Collections {
            clients,
            projects,
            permits,
            inspections,
            invoices,
            payments,
            site_visits,
        })
    }

    /// Whatever each store holds right now, without fetching.
    /// Collections never fetched come back empty.
    pub fn cached(&self) -> Collections {
        Collections {
            clients: self.clients.records(),
            projects: self.projects.records(),
            permits: self.permits.records(),
            inspections: self.inspections.records(),
            invoices: self.invoices.records(),
            payments: self.payments.records(),
            site_visits: self.site_visits.records(),
        }
    }

    pub fn invalidate_all(&self) {
        self.clients.invalidate();
        self.projects.invalidate();
        self.permits.invalidate();
        self.inspections.invalidate();
        self.invoices.invalidate();
        self.payments.invalidate();
        self.site_visits.invalidate();
    }

    /// Close the scope. Fetches still in flight are discarded.
    pub fn close(&self) {
        self.clients.close();
        self.projects.close();
        self.permits.close();
        self.inspections.close();
        self.invoices.close();
        self.payments.close();
        self.site_visits.close();
        info!("app data scope closed");
    }
}
