//! # Regions
//!
//! The read-only catalog of datacenter locations on the legacy management surface. Regions
//! can be listed and looked up by name. Handles refuse `provision`, `apply` and `delete`
//! with a validation error before anything is sent.
//!
//! ```ignore
//! let vm_regions = subscription.regions().list_supporting("PersistentVMRole").await?;
//! ```

use crate::clients::EntitiesApi;
use crate::framework::{Entities, NativeResource, Resource, Result, Wrapper};
use crate::model::RegionData;
use std::collections::HashMap;
use tracing::debug;

pub type Region = Resource<RegionData>;

impl NativeResource for RegionData {
    const KIND: &'static str = "region";
    const READ_ONLY: bool = true;

    fn blank(name: &str) -> Self {
        RegionData::new(name)
    }

    fn name(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|n| !n.is_empty())
    }

    fn id(&self) -> Option<&str> {
        None
    }
}

impl Region {
    pub fn display_name(&self) -> Option<&str> {
        self.inner().display_name.as_deref()
    }

    pub fn available_services(&self) -> &[String] {
        &self.inner().available_services
    }

    pub fn virtual_machine_role_sizes(&self) -> &[String] {
        &self.inner().virtual_machine_role_sizes
    }

    pub fn supports(&self, service_type: &str) -> bool {
        self.inner().supports(service_type)
    }
}

/// Collection accessor for regions. Offers no `define`, `update` or `delete`.
pub struct Regions {
    entities: Entities<RegionData>,
}

impl Regions {
    pub fn new<A>(api: A) -> Self
    where
        A: EntitiesApi<Native = RegionData> + 'static,
    {
        Self {
            entities: Entities::new(api),
        }
    }

    /// Lists every region, keyed by name.
    pub async fn list(&self) -> Result<HashMap<String, Region>> {
        self.entities.list().await
    }

    pub async fn get(&self, name: &str) -> Result<Region> {
        self.entities.get(name).await
    }

    /// Lists the regions whose available services include `service_type`, compared without
    /// regard to case.
    pub async fn list_supporting(&self, service_type: &str) -> Result<HashMap<String, Region>> {
        let mut regions = self.list().await?;
        regions.retain(|_, region| region.supports(service_type));
        debug!(%service_type, size = regions.len(), "Filtered regions by service");
        Ok(regions)
    }

    pub fn wrap(&self, native: RegionData) -> Result<Region> {
        self.entities.wrap(native)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ApiError;
    use crate::framework::mock::{Call, MockApi};
    use crate::framework::{Committable, Refreshable, ShortcutsError};

    fn region(name: &str, services: &[&str]) -> RegionData {
        RegionData {
            display_name: Some(name.to_string()),
            available_services: services.iter().map(|s| s.to_string()).collect(),
            ..RegionData::new(name)
        }
    }

    fn catalog() -> Vec<RegionData> {
        vec![
            region("West US", &["Compute", "Storage", "PersistentVMRole"]),
            region("East Asia", &["Storage"]),
            region("North Europe", &["Compute", "persistentvmrole", "HighMemory"]),
        ]
    }

    #[tokio::test]
    async fn test_list_supporting_keeps_only_matching_regions() {
        let mock = MockApi::<RegionData>::new();
        mock.expect_list().return_ok(catalog());
        let regions = Regions::new(mock.clone());

        let vm_regions = regions.list_supporting("PersistentVMRole").await.unwrap();

        let mut names: Vec<&str> = vm_regions.keys().map(String::as_str).collect();
        names.sort();
        assert_eq!(names, ["North Europe", "West US"]);
        assert_eq!(vm_regions["West US"].display_name(), Some("West US"));
        assert!(vm_regions.values().all(|r| r.is_initialized()));
        assert_eq!(mock.calls(), vec![Call::List]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_supporting_unknown_service_is_empty() {
        let mock = MockApi::<RegionData>::new();
        mock.expect_list().return_ok(catalog());
        let regions = Regions::new(mock.clone());

        let none = regions.list_supporting("Quantum").await.unwrap();

        assert!(none.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_supporting_propagates_listing_failure() {
        let mock = MockApi::<RegionData>::new();
        mock.expect_list().return_err(ApiError::Transport("timed out".to_string()));
        let regions = Regions::new(mock.clone());

        let err = regions.list_supporting("Compute").await.unwrap_err();

        assert_eq!(err, ShortcutsError::Transport("timed out".to_string()));
    }

    #[tokio::test]
    async fn test_region_handles_refuse_commit_and_delete() {
        let mock = MockApi::<RegionData>::new();
        mock.expect_get("West US").return_ok(region("West US", &["Compute"]));
        let regions = Regions::new(mock.clone());

        let mut west = regions.get("West US").await.unwrap();
        assert_eq!(west.available_services(), ["Compute".to_string()]);

        let err = west.apply().await.unwrap_err();
        assert!(matches!(err, ShortcutsError::Validation(ref m) if m.contains("read-only")));
        let err = west.delete().await.unwrap_err();
        assert!(matches!(err, ShortcutsError::Validation(ref m) if m.contains("read-only")));

        assert_eq!(
            mock.calls(),
            vec![Call::Get { group: None, name: "West US".to_string() }]
        );
        mock.verify();
    }
}
