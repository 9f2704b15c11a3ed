//! # Management API Boundary
//!
//! The lifecycle core does not speak to the network itself. It consumes an external,
//! already-authenticated client per resource category through one of two traits:
//!
//! - [`EntitiesApi`] - top-level categories addressed by name (resource groups, legacy
//!   cloud services and virtual machines)
//! - [`GroupableApi`] - categories living inside a resource group (networks, load balancers)
//!
//! Implementations report failures as [`ApiError`]; the core maps them to
//! [`ShortcutsError`](crate::framework::ShortcutsError) without retrying.
//!
//! Categories still on the XML-based legacy surface may also take a
//! [`LegacyRequestComposer`] that rewrites outgoing request bodies.

use crate::framework::NativeResource;
use async_trait::async_trait;

/// Failure reported by an external management client.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport failure: {0}")]
    Transport(String),

    /// The server rejected the request. `message` is the server's diagnostic, verbatim.
    #[error("request rejected ({code}): {message}")]
    Rejected { code: String, message: String },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Native operations for a top-level category keyed by name.
#[async_trait]
pub trait EntitiesApi: Send + Sync {
    type Native: NativeResource;

    async fn list(&self) -> ApiResult<Vec<Self::Native>>;

    async fn get(&self, name: &str) -> ApiResult<Self::Native>;

    /// Accepts a partially populated record, returns the server-confirmed one.
    async fn create_or_update(&self, name: &str, body: Self::Native) -> ApiResult<Self::Native>;

    /// May return before the deletion is visible in listings.
    async fn delete(&self, name: &str) -> ApiResult<()>;
}

/// Native operations for a category scoped by resource group.
///
/// `list_all` and `list_in_group` are distinct remote endpoints and are not assumed to
/// return equally complete records.
#[async_trait]
pub trait GroupableApi: Send + Sync {
    type Native: NativeResource;

    async fn list_all(&self) -> ApiResult<Vec<Self::Native>>;

    async fn list_in_group(&self, group: &str) -> ApiResult<Vec<Self::Native>>;

    async fn get(&self, group: &str, name: &str) -> ApiResult<Self::Native>;

    async fn create_or_update(
        &self,
        group: &str,
        name: &str,
        body: Self::Native,
    ) -> ApiResult<Self::Native>;

    async fn delete(&self, group: &str, name: &str) -> ApiResult<()>;
}

/// Rewrites request bodies bound for the legacy management surface.
///
/// Injected into a collection so that the lifecycle core never depends on the legacy
/// document helpers directly. Runs locally before the remote call, so a body it cannot
/// compose is reported as a validation failure.
pub trait LegacyRequestComposer<N>: Send + Sync {
    fn compose(&self, request: N) -> crate::framework::Result<N>;
}
