use serde::{Deserialize, Serialize};

/// A datacenter location as listed by the legacy management surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Service types offered in the region, e.g. `Compute` or `PersistentVMRole`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_services: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_machine_role_sizes: Vec<String>,
}

impl RegionData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether `service_type` is among the available services, ignoring case.
    pub fn supports(&self, service_type: &str) -> bool {
        self.available_services
            .iter()
            .any(|s| s.eq_ignore_ascii_case(service_type))
    }
}
