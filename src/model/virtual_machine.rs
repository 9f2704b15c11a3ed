use serde::{Deserialize, Serialize};

/// A virtual machine role on the legacy management surface, together with the deployment
/// and cloud service it is provisioned into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineData {
    pub role_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_service: Option<String>,
    /// Create the cloud service as part of provisioning.
    #[serde(default)]
    pub create_cloud_service: bool,
    /// Region for a cloud service created alongside the machine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(default = "default_guest_agent")]
    pub provision_guest_agent: bool,
    #[serde(default)]
    pub endpoints: Vec<InputEndpointData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

fn default_guest_agent() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEndpointData {
    pub name: String,
    pub protocol: String,
    pub port: u16,
    pub local_port: u16,
}

impl VirtualMachineData {
    pub fn new(role_name: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
            provision_guest_agent: true,
            ..Default::default()
        }
    }
}
