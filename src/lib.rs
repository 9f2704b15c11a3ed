#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Azure Shortcuts
//!
//! > **A small, uniform set of verbs in front of the cloud management API.**
//!
//! This crate wraps the native request and response records of the management API behind
//! local handles. Every category (resource groups, virtual networks, load balancers, cloud
//! services, virtual machines) is driven the same way: `define`, `get` or `list` a handle,
//! chain setters on it, then `provision`, `apply`, `refresh` or `delete`. Regions are a
//! read-only catalog next to them.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One handle, many capabilities
//!
//! There is exactly one handle type, [`Resource<N>`](framework::Resource), generic over the
//! native record `N`. What a handle can do comes from narrow capability traits:
//! - [`Wrapper`](framework::Wrapper) - the snapshot it holds
//! - [`Refreshable`](framework::Refreshable) - re-read it from the remote service
//! - [`Committable`](framework::Committable) - `provision`, `apply`, `delete`
//! - [`TaggedMutable`](framework::TaggedMutable) - tag editing, for categories with tags
//!
//! Category-specific setters (subnets, endpoints, rules) are plain inherent methods on the
//! concrete instantiation, so they chain with the generic ones without any downcasting.
//!
//! ### Snapshots are values
//!
//! A handle owns its copy of the native record. Two handles on the same remote resource
//! never alias: they may diverge locally until one of them commits or refreshes.
//!
//! ## 🚀 Core Concepts
//!
//! ### The staged definition
//!
//! ```ignore
//! use azure_shortcuts::prelude::*;
//!
//! let mut group = subscription.groups().define("rg1");
//! group.with_region("westus").with_tag("env", "test");  // local only, never fails
//! group.provision().await?;                              // one remote round trip
//! assert!(group.is_initialized());
//! ```
//!
//! Setters never touch the network and never fail. Errors belong to the terminal verbs.
//!
//! ### Updates and the region
//!
//! The management API wants the region on every create-or-update, even though it cannot
//! change. `update(name)` gives a blank handle. If no region is set on it, `apply()` reads
//! the existing resource and reuses its region. If that read finds nothing, `apply()` fails
//! with [`UnresolvedForUpdate`](framework::ShortcutsError::UnresolvedForUpdate) and sends
//! nothing.
//!
//! ### Mocking: Testing without a cloud
//! Every remote call goes through the [`EntitiesApi`](clients::EntitiesApi) or
//! [`GroupableApi`](clients::GroupableApi) traits, so a test can hand in a
//! [`MockApi`](framework::mock::MockApi) with queued expectations.
//! See the [`framework::mock`] module for a complete guide.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Every terminal verb returns [`ShortcutsError`](framework::ShortcutsError). External clients
//! report [`ApiError`](clients::ApiError), mapped with `From` so `?` propagates it unchanged.
//! Nothing is retried.
//!
//! ### 2. Concurrency Model
//! Each remote operation is one awaited round trip. Nothing is spawned in the background.
//! Setters and verbs take `&mut self`, so one handle has one mutator at a time.
//!
//! ### 3. Observability
//! We use `tracing` everywhere with structured fields (`kind`, `name`, `group`).
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic lifecycle: handles, collections, resource ids, errors and the mock.
//! - **Key items**: [`Resource`](framework::Resource), [`Entities`](framework::Entities),
//!   [`GroupableResources`](framework::GroupableResources).
//!
//! ### 2. The Boundary ([`clients`])
//! The traits the external, already-authenticated management clients implement.
//!
//! ### 3. The Records ([`model`])
//! Native snapshot records in the wire shape of the remote API.
//!
//! ### 4. The Categories ([`groups`], [`networks`], [`load_balancers`], [`cloud_services`], [`virtual_machines`], [`regions`])
//! Thin instantiations of the engine with their own getters and setters.
//!
//! ### 5. The Session ([`lifecycle`])
//! Configuration, wiring of clients into a [`Subscription`](lifecycle::Subscription), and
//! tracing setup.
//!
//! ## 🚀 Quick Start
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod clients;
pub mod cloud_services;
pub mod framework;
pub mod groups;
pub mod lifecycle;
pub mod load_balancers;
pub mod model;
pub mod networks;
pub mod regions;
pub mod virtual_machines;

/// Capability traits needed to chain setters and call the terminal verbs.
pub mod prelude {
    pub use crate::framework::{
        Committable, Identified, Refreshable, ResourceRef, TaggedMutable, Wrapper,
    };
}
