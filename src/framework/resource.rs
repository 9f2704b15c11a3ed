//! # The Resource Handle
//!
//! [`Resource<N>`] is the one concrete handle type behind every category. It owns a
//! value-type snapshot of the native record and moves through the staged definition:
//!
//! ```text
//! define(name) ──► setters (local only) ──► provision() / apply() ──► refresh / setters / apply
//!    blank            provisionable               committed              updatable
//! ```
//!
//! ## State
//!
//! - `name` is fixed at construction. Nothing changes it afterwards, not even a refresh.
//! - `initialized` is `false` for a local definition and `true` once the snapshot came from a
//!   confirmed remote read or commit.
//! - The snapshot is replaced wholesale by a refresh or a commit. Setters are the only other
//!   way it changes.
//!
//! ## Committing
//!
//! `provision()` and `apply()` share one commit routine, parameterized by [`CommitMode`].
//! For categories whose [`RegionRule`] is `Required`:
//!
//! - `provision()` fails with a validation error when no region was set locally.
//! - `apply()` reads the existing resource first and reuses its region. If that read finds
//!   nothing, the commit fails with [`ShortcutsError::UnresolvedForUpdate`] and no
//!   create-or-update request is sent.
//!
//! The handle talks to the remote service through a collection-provided backend, so a
//! groupable handle keeps its collection's cache honest on refresh, commit and delete.

use crate::framework::error::{Result, ShortcutsError};
use crate::framework::native::{CommitMode, Groupable, NativeResource, RegionRule, Regional, Tagged};
use crate::framework::traits::{Committable, Identified, Refreshable, TaggedMutable, Wrapper};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The remote operations a handle needs, bound to one collection.
#[async_trait]
pub(crate) trait Backend<N: NativeResource>: Send + Sync {
    async fn fetch(&self, group: Option<&str>, name: &str) -> Result<N>;

    async fn put(&self, group: Option<&str>, name: &str, body: N) -> Result<N>;

    async fn remove(&self, group: Option<&str>, name: &str) -> Result<()>;
}

/// A local handle on one remote resource.
pub struct Resource<N: NativeResource> {
    name: String,
    group: Option<String>,
    initialized: bool,
    inner: N,
    backend: Arc<dyn Backend<N>>,
}

impl<N: NativeResource> Resource<N> {
    pub(crate) fn new(
        name: String,
        group: Option<String>,
        inner: N,
        initialized: bool,
        backend: Arc<dyn Backend<N>>,
    ) -> Self {
        Self {
            name,
            group,
            initialized,
            inner,
            backend,
        }
    }

    /// The resource group this handle is scoped by, if any.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub(crate) fn inner_mut(&mut self) -> &mut N {
        &mut self.inner
    }

    async fn commit(&mut self, mode: CommitMode) -> Result<&mut Self> {
        self.require_writable()?;
        if self.name.trim().is_empty() {
            return Err(ShortcutsError::Validation(format!("{} name is required", N::KIND)));
        }
        self.inner.validate(mode).map_err(ShortcutsError::Validation)?;

        let mut body = self.inner.clone();
        if N::REGION_RULE == RegionRule::Required && body.region().is_none() {
            match mode {
                CommitMode::Provision => {
                    return Err(ShortcutsError::Validation(format!(
                        "{} '{}' needs a region",
                        N::KIND,
                        self.name
                    )));
                }
                CommitMode::Apply => {
                    let region = self.resolve_region().await?;
                    debug!(kind = N::KIND, name = %self.name, %region, "Reusing region of existing resource");
                    body.set_region(region);
                }
            }
        }

        debug!(kind = N::KIND, name = %self.name, group = ?self.group, ?mode, "Commit");
        let confirmed = self
            .backend
            .put(self.group.as_deref(), &self.name, body)
            .await
            .inspect_err(|e| warn!(kind = N::KIND, name = %self.name, error = %e, "Commit failed"))?;

        self.inner = confirmed;
        self.initialized = true;
        info!(kind = N::KIND, name = %self.name, ?mode, "Committed");
        Ok(self)
    }

    fn require_writable(&self) -> Result<()> {
        if N::READ_ONLY {
            return Err(ShortcutsError::Validation(format!("{} '{}' is read-only", N::KIND, self.name)));
        }
        Ok(())
    }

    async fn resolve_region(&self) -> Result<String> {
        let unresolved = |source: Option<Box<ShortcutsError>>| ShortcutsError::UnresolvedForUpdate {
            kind: N::KIND,
            name: self.name.clone(),
            source,
        };

        match self.backend.fetch(self.group.as_deref(), &self.name).await {
            Ok(current) => current
                .region()
                .map(str::to_string)
                .ok_or_else(|| unresolved(None)),
            Err(e) if e.is_not_found() => {
                warn!(kind = N::KIND, name = %self.name, "Existing resource not found for update");
                Err(unresolved(Some(Box::new(e))))
            }
            Err(e) => Err(e),
        }
    }
}

impl<N: NativeResource> fmt::Debug for Resource<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &N::KIND)
            .field("name", &self.name)
            .field("group", &self.group)
            .field("initialized", &self.initialized)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<N: NativeResource> Wrapper for Resource<N> {
    type Inner = N;

    fn inner(&self) -> &N {
        &self.inner
    }
}

impl<N: NativeResource> Identified for Resource<N> {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Option<&str> {
        self.inner.id()
    }
}

#[async_trait]
impl<N: NativeResource> Refreshable for Resource<N> {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    async fn refresh(&mut self) -> Result<&mut Self> {
        debug!(kind = N::KIND, name = %self.name, "Refresh");
        let fresh = self
            .backend
            .fetch(self.group.as_deref(), &self.name)
            .await
            .inspect_err(|e| warn!(kind = N::KIND, name = %self.name, error = %e, "Refresh failed"))?;
        self.inner = fresh;
        self.initialized = true;
        Ok(self)
    }
}

#[async_trait]
impl<N: NativeResource> Committable for Resource<N> {
    async fn provision(&mut self) -> Result<&mut Self> {
        self.commit(CommitMode::Provision).await
    }

    async fn apply(&mut self) -> Result<&mut Self> {
        self.commit(CommitMode::Apply).await
    }

    async fn delete(self) -> Result<()> {
        self.require_writable()?;
        debug!(kind = N::KIND, name = %self.name, group = ?self.group, "Delete");
        self.backend
            .remove(self.group.as_deref(), &self.name)
            .await
            .inspect_err(|e| warn!(kind = N::KIND, name = %self.name, error = %e, "Delete failed"))?;
        info!(kind = N::KIND, name = %self.name, "Deleted");
        Ok(())
    }
}

impl<N: Regional> Resource<N> {
    pub fn region(&self) -> Option<&str> {
        self.inner.region()
    }

    pub fn with_region(&mut self, region: impl Into<String>) -> &mut Self {
        self.inner.set_region(region.into());
        self
    }
}

impl<N: Groupable> Resource<N> {
    pub fn with_group(&mut self, group: impl Into<String>) -> &mut Self {
        self.group = Some(group.into());
        self
    }
}

impl<N: Tagged> TaggedMutable for Resource<N> {
    fn tags(&self) -> &BTreeMap<String, String> {
        self.inner.tags()
    }

    fn with_tags<I, K, V>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        *self.inner.tags_mut() = tags.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    fn with_tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.inner.tags_mut().insert(key.into(), value.into());
        self
    }

    fn without_tag(&mut self, key: &str) -> &mut Self {
        self.inner.tags_mut().remove(key);
        self
    }
}
