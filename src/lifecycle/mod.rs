//! # Session Lifecycle
//!
//! This module wires the collections to the external clients and sets up the ambient
//! services around them.
//!
//! - [`SubscriptionConfig`] - which subscription the clients act on, read from a JSON profile
//! - [`Subscription`] - the session context, built with [`Subscription::builder`]
//! - [`setup_tracing`] - structured logging filtered by `RUST_LOG`
//!
//! The lifecycle never constructs credentials. Each client handed to the builder arrives
//! already authenticated.

pub mod config;
pub mod subscription;
pub mod tracing;

pub use config::SubscriptionConfig;
pub use subscription::{Subscription, SubscriptionBuilder};
pub use self::tracing::setup_tracing;
