//! # Capability Traits
//!
//! A handle is one concrete type composed from a few narrow capabilities rather than a
//! single do-everything interface:
//!
//! - [`Wrapper`] - exposes the native snapshot it wraps
//! - [`Identified`] - name and id
//! - [`Refreshable`] - re-fetches the snapshot from the remote service
//! - [`Committable`] - `provision`, `apply`, `delete`
//! - [`TaggedMutable`] - fluent tag editing
//!
//! Import them all at once with `use azure_shortcuts::prelude::*;`.

use crate::framework::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Exposes the native representation behind a handle.
pub trait Wrapper {
    type Inner: Clone;

    /// Read-only view of the cached snapshot.
    fn inner(&self) -> &Self::Inner;

    /// A copy of the cached snapshot. Mutating the copy has no effect on the handle.
    fn unwrap(&self) -> Self::Inner {
        self.inner().clone()
    }
}

/// Identity accessors.
pub trait Identified {
    /// Set once at construction and never changed.
    fn name(&self) -> &str;

    /// Server-assigned id, absent until the resource has been read from or committed to the
    /// remote service.
    fn id(&self) -> Option<&str>;
}

/// A named object holding a cached snapshot of remote state.
#[async_trait]
pub trait Refreshable: Identified {
    /// `false` for a local definition, `true` once backed by a confirmed remote read or commit.
    fn is_initialized(&self) -> bool;

    /// Replaces the snapshot with a fresh remote read. No retry: a failure surfaces as-is.
    async fn refresh(&mut self) -> Result<&mut Self>;
}

/// Terminal verbs of the staged definition.
#[async_trait]
pub trait Committable: Sized + Send {
    /// Creates the resource from the accumulated local snapshot.
    async fn provision(&mut self) -> Result<&mut Self>;

    /// Creates or updates the resource from the accumulated local snapshot.
    async fn apply(&mut self) -> Result<&mut Self>;

    /// Deletes the remote resource. The handle is consumed.
    async fn delete(self) -> Result<()>;
}

/// Fluent tag editing. Pure local mutation.
pub trait TaggedMutable {
    fn tags(&self) -> &BTreeMap<String, String>;

    /// Replaces the whole tag map.
    fn with_tags<I, K, V>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>;

    fn with_tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self;

    fn without_tag(&mut self, key: &str) -> &mut Self;
}
