use crate::framework::{Result, ShortcutsError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com/";
pub const DEFAULT_LEGACY_MANAGEMENT_ENDPOINT: &str = "https://management.core.windows.net/";

/// Identifies the subscription the externally authenticated clients act on.
///
/// Read from a JSON profile such as:
///
/// ```json
/// {
///   "subscriptionId": "9657ab5d-4a4a-4fd2-ae7a-4cd9fbd030ef",
///   "tenantId": "72f988bf-86f1-41af-91ab-2d7cd011db47"
/// }
/// ```
///
/// Credentials are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionConfig {
    pub subscription_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default = "default_management_endpoint")]
    pub management_endpoint: String,
    #[serde(default = "default_legacy_management_endpoint")]
    pub legacy_management_endpoint: String,
}

fn default_management_endpoint() -> String {
    DEFAULT_MANAGEMENT_ENDPOINT.to_string()
}

fn default_legacy_management_endpoint() -> String {
    DEFAULT_LEGACY_MANAGEMENT_ENDPOINT.to_string()
}

impl SubscriptionConfig {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            tenant_id: None,
            management_endpoint: default_management_endpoint(),
            legacy_management_endpoint: default_legacy_management_endpoint(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ShortcutsError::Config(format!("invalid subscription profile: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading subscription profile");
        let json = std::fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Cannot read subscription profile");
            ShortcutsError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.subscription_id.trim().is_empty() {
            return Err(ShortcutsError::Config("subscriptionId must not be empty".to_string()));
        }
        for endpoint in [&self.management_endpoint, &self.legacy_management_endpoint] {
            if !endpoint.starts_with("https://") {
                return Err(ShortcutsError::Config(format!(
                    "endpoint '{}' must use https",
                    endpoint
                )));
            }
        }
        Ok(())
    }
}
