//! # Top-level Collections
//!
//! [`Entities<N>`] exposes one category of remote resources addressed by name alone
//! (resource groups, legacy cloud services, legacy virtual machines).
//!
//! Every `list()` call is a fresh remote listing wrapped into fresh handles. Nothing is
//! cached between calls, so two listings never share mutable state.
//!
//! `delete` returns once the remote service accepted the request. The deletion may not be
//! visible in an immediately following `list()`.

use crate::clients::{EntitiesApi, LegacyRequestComposer};
use crate::framework::error::{Result, ShortcutsError};
use crate::framework::native::NativeResource;
use crate::framework::resource::{Backend, Resource};
use crate::framework::traits::Wrapper;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

struct EntitiesBackend<N: NativeResource> {
    api: Arc<dyn EntitiesApi<Native = N>>,
    composer: Option<Arc<dyn LegacyRequestComposer<N>>>,
}

#[async_trait]
impl<N: NativeResource> Backend<N> for EntitiesBackend<N> {
    async fn fetch(&self, _group: Option<&str>, name: &str) -> Result<N> {
        Ok(self.api.get(name).await?)
    }

    async fn put(&self, _group: Option<&str>, name: &str, body: N) -> Result<N> {
        let body = match &self.composer {
            Some(composer) => composer.compose(body)?,
            None => body,
        };
        Ok(self.api.create_or_update(name, body).await?)
    }

    async fn remove(&self, _group: Option<&str>, name: &str) -> Result<()> {
        Ok(self.api.delete(name).await?)
    }
}

/// Collection accessor for a category keyed by name.
pub struct Entities<N: NativeResource> {
    backend: Arc<EntitiesBackend<N>>,
}

impl<N: NativeResource> Entities<N> {
    pub fn new<A>(api: A) -> Self
    where
        A: EntitiesApi<Native = N> + 'static,
    {
        Self {
            backend: Arc::new(EntitiesBackend {
                api: Arc::new(api),
                composer: None,
            }),
        }
    }

    /// Routes every outgoing create-or-update body through `composer` first.
    pub fn with_composer<A, C>(api: A, composer: C) -> Self
    where
        A: EntitiesApi<Native = N> + 'static,
        C: LegacyRequestComposer<N> + 'static,
    {
        Self {
            backend: Arc::new(EntitiesBackend {
                api: Arc::new(api),
                composer: Some(Arc::new(composer)),
            }),
        }
    }

    fn handle(&self, name: String, inner: N, initialized: bool) -> Resource<N> {
        Resource::new(name, None, inner, initialized, self.backend.clone())
    }

    /// Lists every resource of the category, keyed by name.
    pub async fn list(&self) -> Result<HashMap<String, Resource<N>>> {
        debug!(kind = N::KIND, "List");
        let records = self
            .backend
            .api
            .list()
            .await
            .inspect_err(|e| warn!(kind = N::KIND, error = %e, "List failed"))?;

        let mut listed = HashMap::with_capacity(records.len());
        for record in records {
            match record.name().map(str::to_string) {
                Some(name) => {
                    listed.insert(name.clone(), self.handle(name, record, true));
                }
                None => warn!(kind = N::KIND, id = ?record.id(), "Skipping unnamed record"),
            }
        }
        info!(kind = N::KIND, size = listed.len(), "Listed");
        Ok(listed)
    }

    pub async fn get(&self, name: &str) -> Result<Resource<N>> {
        debug!(kind = N::KIND, %name, "Get");
        let record = self.backend.fetch(None, name).await?;
        Ok(self.handle(name.to_string(), record, true))
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        debug!(kind = N::KIND, %name, "Delete");
        self.backend.remove(None, name).await?;
        info!(kind = N::KIND, %name, "Deleted");
        Ok(())
    }

    /// Starts a new local definition. No remote call is made.
    pub fn define(&self, name: &str) -> Resource<N> {
        self.handle(name.to_string(), N::blank(name), false)
    }

    /// Starts a local update of an existing resource. Only the fields set on the returned
    /// handle are sent by `apply()`, plus a region read from the remote resource where the
    /// category needs one.
    pub fn update(&self, name: &str) -> Resource<N> {
        self.handle(name.to_string(), N::blank(name), false)
    }

    /// Wraps an already-fetched native record.
    pub fn wrap(&self, native: N) -> Result<Resource<N>> {
        let name = native
            .name()
            .map(str::to_string)
            .ok_or_else(|| ShortcutsError::Validation(format!("{} record has no name", N::KIND)))?;
        Ok(self.handle(name, native, true))
    }

    pub fn unwrap(&self, handle: &Resource<N>) -> N {
        handle.unwrap()
    }
}
