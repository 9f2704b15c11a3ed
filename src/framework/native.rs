//! # Native Resource Contract
//!
//! The lifecycle core never looks inside a remote record beyond what [`NativeResource`]
//! exposes: a name, an id, and (for regional categories) a region. Concrete categories add
//! their own getters and setters on top of [`Resource<N>`](crate::framework::Resource).
//!
//! The marker traits gate which fluent setters a handle offers:
//! - [`Regional`] - `with_region` and `region`
//! - [`Tagged`] - the [`TaggedMutable`](crate::framework::TaggedMutable) capability
//! - [`Groupable`] - the record lives inside a resource group (`with_group`)

use std::collections::BTreeMap;
use std::fmt::Debug;

/// How the region participates in a create-or-update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRule {
    /// The category has no region of its own.
    NotApplicable,
    /// The remote API wants the region on every create-or-update, even though it
    /// cannot change once set.
    Required,
}

/// The terminal verb a commit was invoked through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Create: required fields must already be set locally.
    Provision,
    /// Create-or-update: a missing region is read from the existing remote resource.
    Apply,
}

/// A record shape returned by and sent to the remote management API.
pub trait NativeResource: Clone + Debug + Send + Sync + 'static {
    /// Human-readable category name used in logs and errors.
    const KIND: &'static str;

    const REGION_RULE: RegionRule = RegionRule::NotApplicable;

    /// Catalog categories the caller can list and read but never commit or delete.
    const READ_ONLY: bool = false;

    /// A minimal record carrying only the name, used by `define` and `update`.
    fn blank(name: &str) -> Self;

    fn name(&self) -> Option<&str>;

    fn id(&self) -> Option<&str>;

    fn region(&self) -> Option<&str> {
        None
    }

    fn set_region(&mut self, _region: String) {}

    /// Category-specific required-field checks, run before any remote call.
    fn validate(&self, _mode: CommitMode) -> Result<(), String> {
        Ok(())
    }
}

/// Categories with a settable region.
pub trait Regional: NativeResource {}

/// Categories carrying a free-form tag map.
pub trait Tagged: NativeResource {
    fn tags(&self) -> &BTreeMap<String, String>;
    fn tags_mut(&mut self) -> &mut BTreeMap<String, String>;
}

/// Categories scoped by a parent resource group.
pub trait Groupable: NativeResource {
    /// The type segment of this category's ids, e.g. `virtualNetworks`.
    const RESOURCE_TYPE: &'static str;
}
