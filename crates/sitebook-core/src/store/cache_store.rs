//! Per-entity collection cache.
//!
//! A `CacheStore<T>` holds the last collection fetched for one entity kind,
//! when it was fetched, and an optional filter predicate. Reads go through a
//! small state machine:
//!
//! ```text
//! Empty -> Loading -> Ready -> Stale -> Loading -> Ready ...
//!             \
//!              -> Error (last good snapshot kept)
//! ```
//!
//! # Single-flight
//! While a fetch is in flight every reader awaits the same shared future, so
//! concurrent `get_all` calls produce exactly one network call.
//!
//! # Cancellation
//! Each fetch remembers the store generation it started under. `close` and
//! `invalidate` bump the generation; a fetch that finishes under an older
//! generation hands its result to whoever was waiting but never writes it
//! into the store.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::models::{Entity, RecordId};
use crate::store::{CacheError, EntityFetcher};

pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

type FetchResult<T> = Result<Arc<Vec<T>>, CacheError>;
type SharedFetch<T> = Shared<BoxFuture<'static, FetchResult<T>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing fetched yet
    Empty,
    /// A fetch is in flight
    Loading,
    /// Data present and within TTL
    Ready,
    /// TTL elapsed or invalidated; next read refetches
    Stale,
    /// Last fetch failed; reads serve the last good snapshot until retried
    Error,
}

struct Inner<T> {
    snapshot: Option<Arc<Vec<T>>>,
    fetched_at: Option<Instant>,
    in_flight: Option<SharedFetch<T>>,
    last_error: Option<CacheError>,
    filter: Option<Predicate<T>>,
    generation: u64,
    closed: bool,
}

impl<T> Inner<T> {
    fn new() -> Self {
        Self {
            snapshot: None,
            fetched_at: None,
            in_flight: None,
            last_error: None,
            filter: None,
            generation: 0,
            closed: false,
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.is_some_and(|at| at.elapsed() < ttl)
    }
}

pub struct CacheStore<T: Entity> {
    fetcher: EntityFetcher,
    ttl: Duration,
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T: Entity> CacheStore<T> {
    pub fn new(fetcher: EntityFetcher, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            inner: Arc::new(Mutex::new(Inner::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // ===== State =====

    pub fn state(&self) -> CacheState {
        let inner = self.inner.lock();
        if inner.in_flight.is_some() {
            CacheState::Loading
        } else if inner.last_error.is_some() {
            CacheState::Error
        } else if inner.snapshot.is_none() {
            CacheState::Empty
        } else if inner.is_fresh(self.ttl) {
            CacheState::Ready
        } else {
            CacheState::Stale
        }
    }

    /// `now - last_fetched_at < ttl`; false before the first successful fetch
    pub fn is_cache_valid(&self) -> bool {
        self.inner.lock().is_fresh(self.ttl)
    }

    pub fn last_fetched_at(&self) -> Option<Instant> {
        self.inner.lock().fetched_at
    }

    pub fn last_error(&self) -> Option<CacheError> {
        self.inner.lock().last_error.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Whatever is cached right now, fresh or not. Never fetches.
    pub fn snapshot(&self) -> Option<Arc<Vec<T>>> {
        self.inner.lock().snapshot.clone()
    }

    /// Cached records, or an empty list before the first fetch.
    /// For joins, which must not block on a collection that was never loaded.
    pub fn records(&self) -> Arc<Vec<T>> {
        self.snapshot().unwrap_or_default()
    }

    // ===== Reads =====

    /// Current collection, fetching first when empty, stale, invalidated or
    /// forced. A failed refetch falls back to the last good snapshot and
    /// records the error; with no snapshot the error is returned.
    pub async fn get_all(&self, force_refresh: bool) -> Result<Arc<Vec<T>>, CacheError> {
        let fetch = {
            let mut inner = self.inner.lock();
            if inner.closed {
                return Err(CacheError::Closed { kind: T::KIND });
            }

            if let Some(in_flight) = inner.in_flight.clone() {
                trace!("{}: joining in-flight fetch", T::KIND);
                in_flight
            } else {
                if !force_refresh {
                    if let Some(err) = inner.last_error.clone() {
                        return inner.snapshot.clone().ok_or(err);
                    }
                    if inner.is_fresh(self.ttl) {
                        if let Some(snapshot) = inner.snapshot.clone() {
                            trace!("{}: cache hit ({} records)", T::KIND, snapshot.len());
                            return Ok(snapshot);
                        }
                    }
                }
                self.start_fetch(&mut inner)
            }
        };

        fetch.await
    }

    /// Leave the error state by refetching
    pub async fn retry(&self) -> Result<Arc<Vec<T>>, CacheError> {
        self.get_all(true).await
    }

    /// `get_all` passed through the current filter
    pub async fn get_filtered(&self) -> Result<Vec<T>, CacheError> {
        let records = self.get_all(false).await?;
        let filter = self.inner.lock().filter.clone();

        Ok(match filter {
            Some(predicate) => records.iter().filter(|r| predicate(r)).cloned().collect(),
            None => records.as_ref().clone(),
        })
    }

    /// Find one record by id: the cached collection while it is fresh, else
    /// a by-id call. A 404 is a soft miss.
    pub async fn get_one(&self, id: &RecordId) -> Result<Option<T>, CacheError> {
        let fresh = {
            let inner = self.inner.lock();
            if inner.is_fresh(self.ttl) {
                inner.snapshot.clone()
            } else {
                None
            }
        };
        if let Some(snapshot) = fresh {
            if let Some(found) = snapshot.iter().find(|r| r.id() == Some(id)) {
                return Ok(Some(found.clone()));
            }
        }

        match self.fetcher.fetch_one(T::KIND, id).await {
            Ok(value) => Ok(T::from_value(&value)),
            Err(err) if err.is_not_found() => {
                debug!("{} {} not found; treating as missing", T::KIND, id);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    // ===== Filter =====

    /// Replace the filter. Never fetches and never touches the fetch timestamp.
    pub fn set_filter<F>(&self, predicate: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.inner.lock().filter = Some(Arc::new(predicate));
    }

    /// Keep records whose status equals `status`, ignoring ASCII case
    pub fn set_status_filter(&self, status: &str) {
        let wanted = status.trim().to_string();
        self.set_filter(move |record: &T| {
            record
                .status()
                .is_some_and(|s| s.trim().eq_ignore_ascii_case(&wanted))
        });
    }

    pub fn clear_filter(&self) {
        self.inner.lock().filter = None;
    }

    pub fn has_filter(&self) -> bool {
        self.inner.lock().filter.is_some()
    }

    // ===== Invalidation =====

    /// Force the next read to refetch regardless of TTL. A fetch already in
    /// flight still answers its current waiters but is not committed.
    pub fn invalidate(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.fetched_at = None;
        inner.in_flight = None;
        inner.last_error = None;
        debug!("{}: invalidated", T::KIND);
    }

    /// Tear the store down. In-flight results are discarded and later reads
    /// fail with `CacheError::Closed`.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.closed = true;
        inner.snapshot = None;
        inner.fetched_at = None;
        inner.in_flight = None;
        inner.last_error = None;
        inner.filter = None;
    }

    // ===== Mutations =====
    // Each successful mutation invalidates this store only. Stores holding
    // dependent entities are left alone.

    pub async fn create(&self, body: Value) -> Result<Option<T>, CacheError> {
        let created = self
            .fetcher
            .api()
            .create(T::KIND, body)
            .await
            .map_err(|err| CacheError::from_api(T::KIND, err))?;

        info!("{}: created record", T::KIND);
        self.invalidate();
        Ok(T::from_value(&created))
    }

    pub async fn update(&self, id: &RecordId, patch: Value) -> Result<Option<T>, CacheError> {
        let updated = self
            .fetcher
            .api()
            .update(T::KIND, id, patch)
            .await
            .map_err(|err| CacheError::from_lookup(T::KIND, id, err))?;

        info!("{}: updated {}", T::KIND, id);
        self.invalidate();
        Ok(T::from_value(&updated))
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), CacheError> {
        self.fetcher
            .api()
            .delete(T::KIND, id)
            .await
            .map_err(|err| CacheError::from_lookup(T::KIND, id, err))?;

        info!("{}: deleted {}", T::KIND, id);
        self.invalidate();
        Ok(())
    }

    // ===== Fetching =====

    fn start_fetch(&self, inner: &mut Inner<T>) -> SharedFetch<T> {
        let fetcher = self.fetcher.clone();
        let state = Arc::downgrade(&self.inner);
        let generation = inner.generation;

        debug!("{}: fetching collection", T::KIND);
        let fetch = async move {
            let result = fetcher.fetch_all::<T>().await;
            commit(&state, generation, result)
        }
        .boxed()
        .shared();

        inner.in_flight = Some(fetch.clone());
        fetch
    }
}

/// Write a finished fetch into the store, unless the store moved on.
fn commit<T: Entity>(
    state: &Weak<Mutex<Inner<T>>>,
    generation: u64,
    result: Result<Vec<T>, CacheError>,
) -> FetchResult<T> {
    let Some(state) = state.upgrade() else {
        debug!("{}: store dropped; discarding fetch result", T::KIND);
        return Err(CacheError::Closed { kind: T::KIND });
    };
    let mut inner = state.lock();

    if inner.closed {
        debug!("{}: store closed; discarding fetch result", T::KIND);
        return Err(CacheError::Closed { kind: T::KIND });
    }
    if inner.generation != generation {
        debug!("{}: invalidated during fetch; not caching result", T::KIND);
        return result.map(Arc::new);
    }

    inner.in_flight = None;
    match result {
        Ok(records) => {
            debug!("{}: cached {} records", T::KIND, records.len());
            let snapshot = Arc::new(records);
            inner.snapshot = Some(snapshot.clone());
            inner.fetched_at = Some(Instant::now());
            inner.last_error = None;
            Ok(snapshot)
        }
        Err(err) => {
            warn!("{}: fetch failed: {}", T::KIND, err);
            inner.last_error = Some(err.clone());
            inner.snapshot.clone().ok_or(err)
        }
    }
}
