//! Collection Store
//!
//! Holds one collection's list, load phase, last error and pagination.
//! Views read snapshots or subscribe; every change goes through the async
//! operations below, which talk to the backend via `ApiClient`.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use super::error::StoreError;
use super::query::FetchQuery;
use super::schema::{CollectionSchema, GallerySchema, ProjectSchema};
use super::state::{CollectionState, LoadPhase, Pagination};
use crate::api::{decode_list, decode_one, ApiCall, ApiClient, ApiError, ListPage};
use crate::domain::{Entity, RecordDraft, RecordPatch, ValidationError};
use crate::retry::{Delay, RetryPolicy};

/// Characters left as-is in an id path segment
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

const DEFAULT_PAGE_LIMIT: u32 = 20;

type Listener<T> = Arc<dyn Fn(&CollectionState<T>) + Send + Sync>;

pub type ProjectStore = CollectionStore<ProjectSchema>;
pub type GalleryStore = CollectionStore<GallerySchema>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct CollectionStore<S: CollectionSchema> {
    client: Arc<ApiClient>,
    retry: RetryPolicy,
    delay: Arc<dyn Delay>,
    state: Mutex<CollectionState<S::Record>>,
    last_query: Mutex<FetchQuery>,
    listeners: Mutex<Vec<(usize, Listener<S::Record>)>>,
    next_listener: Mutex<usize>,
    _schema: PhantomData<fn() -> S>,
}

impl<S: CollectionSchema> CollectionStore<S> {
    /// Retry behaviour comes from the client's configuration
    pub fn new(client: Arc<ApiClient>, delay: Arc<dyn Delay>) -> Self {
        let retry = client.config().retry;
        Self {
            client,
            retry,
            delay,
            state: Mutex::new(CollectionState::default()),
            last_query: Mutex::new(FetchQuery::default()),
            listeners: Mutex::new(Vec::new()),
            next_listener: Mutex::new(0),
            _schema: PhantomData,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn label(&self) -> &'static str {
        S::LABEL
    }

    pub fn snapshot(&self) -> CollectionState<S::Record> {
        lock(&self.state).clone()
    }

    pub fn items(&self) -> Vec<S::Record> {
        lock(&self.state).items.clone()
    }

    pub fn get(&self, id: &str) -> Option<S::Record> {
        lock(&self.state).items.iter().find(|item| item.id() == id).cloned()
    }

    /// Records whose section matches, ignoring case
    pub fn by_section(&self, section: &str) -> Vec<S::Record> {
        let section = section.trim();
        lock(&self.state)
            .items
            .iter()
            .filter(|item| item.section_name().eq_ignore_ascii_case(section))
            .cloned()
            .collect()
    }

    pub fn last_query(&self) -> FetchQuery {
        lock(&self.last_query).clone()
    }

    /// Register a listener called with a snapshot after every change.
    /// Returns a handle for `unsubscribe`.
    pub fn subscribe(&self, listener: impl Fn(&CollectionState<S::Record>) + Send + Sync + 'static) -> usize {
        let id = {
            let mut next = lock(&self.next_listener);
            *next += 1;
            *next
        };
        lock(&self.listeners).push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: usize) {
        lock(&self.listeners).retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn clear_error(&self) {
        self.update_state(|state| {
            state.error = None;
            if state.phase == LoadPhase::Error {
                state.phase = if state.items.is_empty() {
                    LoadPhase::Idle
                } else {
                    LoadPhase::Ready
                };
            }
        });
    }

    /// Load the list, retrying transient failures. A terminal failure
    /// clears the list.
    pub async fn fetch(&self, query: FetchQuery) -> Result<Vec<S::Record>, StoreError> {
        *lock(&self.last_query) = query.clone();
        self.begin();

        match self.load_with_retry(&query).await {
            Ok(page) => Ok(self.apply_page(page)),
            Err(err) => {
                let err = StoreError::from_api(err, S::LABEL);
                log::error!("Failed to fetch {} list: {}", S::LABEL, err);
                self.update_state(|state| {
                    state.items.clear();
                    state.pagination = Pagination::single_page(0);
                    state.phase = LoadPhase::Error;
                    state.error = Some(err.user_message());
                });
                Err(err)
            }
        }
    }

    /// Fetch again with the last query
    pub async fn refresh(&self) -> Result<Vec<S::Record>, StoreError> {
        self.fetch(self.last_query()).await
    }

    /// Create a record. Returns it when the backend echoes it back.
    pub async fn add(&self, draft: RecordDraft) -> Result<Option<S::Record>, StoreError> {
        let form = S::build_create(&draft).map_err(|e| self.fail(e.into()))?;
        self.begin();

        let call = ApiCall::post(S::ENDPOINT).multipart(form).authenticated();
        let value = self.client.request(call).await.map_err(|e| self.fail_api(e))?;
        let created = self.decode_record(value);

        self.update_state(|state| {
            if let Some(record) = &created {
                state.items.insert(0, record.clone());
                state.pagination.total += 1;
            }
            state.phase = LoadPhase::Ready;
            state.error = None;
        });
        log::info!("{} created", S::LABEL);
        self.resync().await;
        Ok(created)
    }

    /// Apply a partial update. JSON unless the patch replaces the image.
    pub async fn update(&self, id: &str, patch: RecordPatch) -> Result<Option<S::Record>, StoreError> {
        let path = record_path::<S>(id).map_err(|e| self.fail(e.into()))?;
        let body = S::build_update(&patch).map_err(|e| self.fail(e.into()))?;
        self.begin();

        let call = ApiCall::put(path).body(body).authenticated();
        let value = self.client.request(call).await.map_err(|e| self.fail_api(e))?;
        let updated = self.decode_record(value);

        self.update_state(|state| {
            if let Some(record) = &updated {
                if let Some(slot) = state.items.iter_mut().find(|item| item.id() == record.id()) {
                    *slot = record.clone();
                }
            }
            state.phase = LoadPhase::Ready;
            state.error = None;
        });
        log::info!("{} {} updated", S::LABEL, id);
        if updated.is_none() {
            self.resync().await;
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = record_path::<S>(id).map_err(|e| self.fail(e.into()))?;
        self.begin();

        self.client
            .request(ApiCall::delete(path).authenticated())
            .await
            .map_err(|e| self.fail_api(e))?;

        self.update_state(|state| {
            let before = state.items.len();
            state.items.retain(|item| item.id() != id.trim());
            let removed = (before - state.items.len()) as u64;
            state.pagination.total = state.pagination.total.saturating_sub(removed);
            state.phase = LoadPhase::Ready;
            state.error = None;
        });
        log::info!("{} {} deleted", S::LABEL, id);
        Ok(())
    }

    /// Remove every record in the collection
    pub async fn delete_all(&self) -> Result<(), StoreError> {
        self.begin();

        let path = format!("{}/all", S::ENDPOINT);
        self.client
            .request(ApiCall::delete(path).authenticated())
            .await
            .map_err(|e| self.fail_api(e))?;

        self.update_state(|state| {
            state.items.clear();
            state.pagination = Pagination::single_page(0);
            state.phase = LoadPhase::Ready;
            state.error = None;
        });
        log::info!("All {} records deleted", S::LABEL);
        Ok(())
    }

    async fn load(&self, query: &FetchQuery) -> Result<ListPage<S::Record>, ApiError> {
        let value = self.client.request(ApiCall::get(S::ENDPOINT).query(list_pairs::<S>(query))).await?;
        decode_list(value)
    }

    async fn load_with_retry(&self, query: &FetchQuery) -> Result<ListPage<S::Record>, ApiError> {
        let mut failed = 0;
        loop {
            match self.load(query).await {
                Ok(page) => return Ok(page),
                Err(err) => {
                    failed += 1;
                    let wait = if err.is_transient() {
                        self.retry.delay_after(failed)
                    } else {
                        None
                    };
                    let Some(wait) = wait else {
                        return Err(err);
                    };
                    log::warn!(
                        "Fetching {} list failed (attempt {}/{}): {}; retrying in {:?}",
                        S::LABEL,
                        failed,
                        self.retry.max_attempts(),
                        err,
                        wait
                    );
                    self.delay.sleep(wait).await;
                }
            }
        }
    }

    /// Single-attempt reload after a mutation. Failure keeps the current list.
    async fn resync(&self) {
        let query = self.last_query();
        match self.load(&query).await {
            Ok(page) => {
                self.apply_page(page);
            }
            Err(err) => log::warn!("Refreshing {} list failed: {}", S::LABEL, err),
        }
    }

    fn apply_page(&self, page: ListPage<S::Record>) -> Vec<S::Record> {
        let mut items = page.items;
        for item in &mut items {
            self.normalize(item);
        }
        let pagination = page.pagination.unwrap_or_else(|| Pagination::single_page(items.len()));
        log::debug!("Loaded {} {} records", items.len(), S::LABEL);
        self.update_state(|state| {
            state.items = items.clone();
            state.pagination = pagination;
            state.phase = LoadPhase::Ready;
            state.error = None;
        });
        items
    }

    fn normalize(&self, record: &mut S::Record) {
        let url = record.image().and_then(|raw| self.client.resolver().normalize(raw));
        record.set_image_url(url);
    }

    /// `None` when the response carries no record, e.g. an empty body
    fn decode_record(&self, value: Value) -> Option<S::Record> {
        if value.is_null() {
            return None;
        }
        match decode_one::<S::Record>(value) {
            Ok(mut record) => {
                self.normalize(&mut record);
                Some(record)
            }
            Err(err) => {
                log::warn!("Ignoring {} in response: {}", S::LABEL, err);
                None
            }
        }
    }

    fn begin(&self) {
        self.update_state(|state| {
            state.phase = LoadPhase::Loading;
            state.error = None;
        });
    }

    /// Record a failure without touching the list
    fn fail(&self, err: StoreError) -> StoreError {
        log::warn!("{} operation failed: {}", S::LABEL, err);
        self.update_state(|state| {
            state.phase = LoadPhase::Error;
            state.error = Some(err.user_message());
        });
        err
    }

    fn fail_api(&self, err: ApiError) -> StoreError {
        self.fail(StoreError::from_api(err, S::LABEL))
    }

    /// Mutate under the lock, then notify listeners outside it
    fn update_state(&self, change: impl FnOnce(&mut CollectionState<S::Record>)) {
        let snapshot = {
            let mut state = lock(&self.state);
            change(&mut state);
            state.clone()
        };
        let listeners: Vec<Listener<S::Record>> =
            lock(&self.listeners).iter().map(|(_, listener)| listener.clone()).collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

fn record_path<S: CollectionSchema>(id: &str) -> Result<String, ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::required("id", &format!("{} id", S::LABEL)));
    }
    Ok(format!("{}/{}", S::ENDPOINT, utf8_percent_encode(id, ID_SEGMENT)))
}

/// Paginated collections always send `page` and `limit`
fn list_pairs<S: CollectionSchema>(query: &FetchQuery) -> Vec<(String, String)> {
    let mut query = query.clone();
    if S::PAGINATED {
        query.page.get_or_insert(1);
        query.limit.get_or_insert(DEFAULT_PAGE_LIMIT);
    }
    query.to_pairs()
}
