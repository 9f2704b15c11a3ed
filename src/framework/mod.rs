//! Generic resource-lifecycle framework.
//!
//! This module provides the building blocks every category is instantiated from: a
//! handle that wraps a native snapshot and moves through a staged definition, and two
//! collection accessors that list, look up and delete remote resources.
//!
//! # Main Components
//!
//! - [`NativeResource`] - Trait that native records implement to be managed by handles
//! - [`Resource`] - The generic handle (define, setters, provision/apply, refresh, delete)
//! - [`Entities`] - Collection for categories addressed by name
//! - [`GroupableResources`] - Collection for categories scoped by resource group, with a cache
//! - [`ResourceId`] / [`ResourceRef`] - Path-style ids and the two addressing modes
//! - [`ShortcutsError`] - Errors surfaced by terminal verbs
//!
//! # Testing
//!
//! See [`mock`] module for an expectation-driven stand-in for the external clients.

pub mod entities;
pub mod error;
pub mod groupable;
pub mod mock;
pub mod native;
pub mod resource;
pub mod resource_id;
pub mod traits;

pub use entities::Entities;
pub use error::{Result, ShortcutsError};
pub use groupable::GroupableResources;
pub use native::{CommitMode, Groupable, NativeResource, RegionRule, Regional, Tagged};
pub use resource::Resource;
pub use resource_id::{ResourceId, ResourceRef};
pub use traits::{Committable, Identified, Refreshable, TaggedMutable, Wrapper};
