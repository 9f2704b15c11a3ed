//! # Scoped Collections
//!
//! [`GroupableResources<N>`] exposes a category whose resources live inside a resource
//! group (virtual networks, load balancers).
//!
//! ## Listing
//!
//! `list(Some(group))` and `list(None)` call two different remote endpoints and are not
//! assumed to be equally complete. A scoped listing is keyed by name (unique within a
//! group). An unscoped listing is keyed by id, since names repeat across groups.
//!
//! ## Addressing
//!
//! `get` and `delete` accept a [`ResourceRef`]: a path-style id or a `(group, name)` pair.
//! Both resolve to the same `(group, name)` remote call. An id of another category, of a
//! child resource or of a bare resource group is rejected before anything is sent.
//!
//! ## Cache
//!
//! The collection keeps the last confirmed snapshot of each resource, keyed by id:
//! - filled by `list`, `get`, and by refresh/commit on handles it issued
//! - consulted first by `get` with an id; a miss falls through to a remote fetch
//! - listing all clears it, listing a group drops that group's entries first
//! - a delete (or a not-found read) evicts the resource
//!
//! The map sits behind a mutex so the collection can be shared across tasks. Each handle
//! still owns its own snapshot copy, so two handles on the same resource never alias.

use crate::clients::GroupableApi;
use crate::framework::error::{Result, ShortcutsError};
use crate::framework::native::Groupable;
use crate::framework::resource::{Backend, Resource};
use crate::framework::resource_id::{ResourceId, ResourceRef};
use crate::framework::traits::Wrapper;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

struct GroupableBackend<N: Groupable> {
    api: Arc<dyn GroupableApi<Native = N>>,
    cache: Mutex<HashMap<String, N>>,
}

impl<N: Groupable> GroupableBackend<N> {
    fn cache(&self) -> MutexGuard<'_, HashMap<String, N>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remember(&self, record: &N) {
        if let Some(id) = record.id() {
            self.cache().insert(id.to_string(), record.clone());
        }
    }

    fn evict(&self, group: &str, name: &str) {
        let mut cache = self.cache();
        let before = cache.len();
        cache.retain(|id, _| !same_resource(id, group, name));
        if cache.len() < before {
            debug!(kind = N::KIND, %group, %name, "Evicted from cache");
        }
    }

    fn require_group<'a>(&self, group: Option<&'a str>, name: &str) -> Result<&'a str> {
        group.filter(|g| !g.trim().is_empty()).ok_or_else(|| {
            ShortcutsError::Validation(format!("{} '{}' needs a resource group", N::KIND, name))
        })
    }
}

fn same_resource(id: &str, group: &str, name: &str) -> bool {
    ResourceId::parse(id)
        .map(|parsed| {
            parsed.group().eq_ignore_ascii_case(group) && parsed.name().eq_ignore_ascii_case(name)
        })
        .unwrap_or(false)
}

/// The last segment of the record's id, for records the remote service returned nameless.
fn name_from_id<N: Groupable>(record: &N) -> String {
    record
        .id()
        .and_then(|id| ResourceId::parse(id).ok())
        .map(|id| id.name().to_string())
        .unwrap_or_default()
}

fn in_group(id: &str, group: &str) -> bool {
    ResourceId::parse(id)
        .map(|parsed| parsed.group().eq_ignore_ascii_case(group))
        .unwrap_or(false)
}

#[async_trait]
impl<N: Groupable> Backend<N> for GroupableBackend<N> {
    async fn fetch(&self, group: Option<&str>, name: &str) -> Result<N> {
        let group = self.require_group(group, name)?;
        match self.api.get(group, name).await {
            Ok(record) => {
                self.remember(&record);
                Ok(record)
            }
            Err(e) => {
                let e = ShortcutsError::from(e);
                if e.is_not_found() {
                    self.evict(group, name);
                }
                Err(e)
            }
        }
    }

    async fn put(&self, group: Option<&str>, name: &str, body: N) -> Result<N> {
        let group = self.require_group(group, name)?;
        let confirmed = self.api.create_or_update(group, name, body).await?;
        self.remember(&confirmed);
        Ok(confirmed)
    }

    async fn remove(&self, group: Option<&str>, name: &str) -> Result<()> {
        let group = self.require_group(group, name)?;
        let outcome = self.api.delete(group, name).await.map_err(ShortcutsError::from);
        if outcome.is_ok() || outcome.as_ref().is_err_and(ShortcutsError::is_not_found) {
            self.evict(group, name);
        }
        outcome
    }
}

/// Collection accessor for a category scoped by resource group.
pub struct GroupableResources<N: Groupable> {
    backend: Arc<GroupableBackend<N>>,
}

impl<N: Groupable> GroupableResources<N> {
    pub fn new<A>(api: A) -> Self
    where
        A: GroupableApi<Native = N> + 'static,
    {
        Self {
            backend: Arc::new(GroupableBackend {
                api: Arc::new(api),
                cache: Mutex::new(HashMap::new()),
            }),
        }
    }

    fn handle(&self, name: String, group: Option<String>, inner: N, initialized: bool) -> Resource<N> {
        Resource::new(name, group, inner, initialized, self.backend.clone())
    }

    /// Wraps a record returned by a listing or a lookup, recovering its group from the id
    /// when the caller did not supply one.
    fn wrap_fetched(&self, record: N, group: Option<&str>, fallback_name: &str) -> Resource<N> {
        let group = group
            .map(str::to_string)
            .or_else(|| record.id().and_then(|id| ResourceId::parse(id).ok()).map(|id| id.group().to_string()));
        let name = record.name().unwrap_or(fallback_name).to_string();
        self.handle(name, group, record, true)
    }

    /// Lists resources in `group`, or across all groups when `group` is `None`.
    ///
    /// Scoped listings are keyed by name, unscoped ones by id.
    pub async fn list(&self, group: Option<&str>) -> Result<HashMap<String, Resource<N>>> {
        debug!(kind = N::KIND, ?group, "List");
        let records = match group {
            Some(group) => self.backend.api.list_in_group(group).await,
            None => self.backend.api.list_all().await,
        }
        .map_err(ShortcutsError::from)
        .inspect_err(|e| warn!(kind = N::KIND, ?group, error = %e, "List failed"))?;

        {
            let mut cache = self.backend.cache();
            match group {
                Some(group) => cache.retain(|id, _| !in_group(id, group)),
                None => cache.clear(),
            }
            for record in &records {
                if let Some(id) = record.id() {
                    cache.insert(id.to_string(), record.clone());
                }
            }
        }

        let mut listed = HashMap::with_capacity(records.len());
        for record in records {
            let key = match group {
                Some(_) => record.name(),
                None => record.id().or(record.name()),
            }
            .map(str::to_string);

            match key {
                Some(key) => {
                    let fallback = name_from_id(&record);
                    let handle = self.wrap_fetched(record, group, &fallback);
                    listed.insert(key, handle);
                }
                None => warn!(kind = N::KIND, ?group, "Skipping record with neither name nor id"),
            }
        }
        info!(kind = N::KIND, ?group, size = listed.len(), "Listed");
        Ok(listed)
    }

    /// Looks up one resource by id or by `(group, name)`.
    ///
    /// A lookup by id is answered from the cache when possible. A lookup by pair always
    /// reads from the remote service.
    pub async fn get(&self, target: impl Into<ResourceRef>) -> Result<Resource<N>> {
        let target = target.into();
        debug!(kind = N::KIND, %target, "Get");
        let (group, name) = target.group_and_name(N::RESOURCE_TYPE)?;

        if let ResourceRef::Id(id) = &target {
            let cached = self.backend.cache().get(id).cloned();
            if let Some(record) = cached {
                debug!(kind = N::KIND, %id, "Cache hit");
                return Ok(self.wrap_fetched(record, Some(&group), &name));
            }
        }

        let record = self.backend.fetch(Some(&group), &name).await?;
        if let ResourceRef::Id(id) = &target {
            self.backend.cache().insert(id.clone(), record.clone());
        }
        Ok(self.handle(name, Some(group), record, true))
    }

    /// Deletes one resource by id or by `(group, name)`.
    pub async fn delete(&self, target: impl Into<ResourceRef>) -> Result<()> {
        let target = target.into();
        let (group, name) = target.group_and_name(N::RESOURCE_TYPE)?;
        debug!(kind = N::KIND, %group, %name, "Delete");
        self.backend.remove(Some(&group), &name).await?;
        info!(kind = N::KIND, %group, %name, "Deleted");
        Ok(())
    }

    /// Starts a new local definition. Set the group with `with_group` before committing.
    pub fn define(&self, name: &str) -> Resource<N> {
        self.handle(name.to_string(), None, N::blank(name), false)
    }

    /// Wraps an already-fetched native record. The group is taken from the record's id.
    pub fn wrap(&self, native: N) -> Result<Resource<N>> {
        if native.name().is_none() && native.id().is_none() {
            return Err(ShortcutsError::Validation(format!(
                "{} record has neither name nor id",
                N::KIND
            )));
        }
        let fallback = name_from_id(&native);
        Ok(self.wrap_fetched(native, None, &fallback))
    }

    pub fn unwrap(&self, handle: &Resource<N>) -> N {
        handle.unwrap()
    }

    /// Whether a snapshot for `id` is currently cached.
    pub fn is_cached(&self, id: &str) -> bool {
        self.backend.cache().contains_key(id)
    }
}
