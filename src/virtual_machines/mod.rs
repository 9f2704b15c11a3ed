//! # Virtual Machines
//!
//! Virtual machine roles on the legacy management surface, addressed by role name. A machine
//! is provisioned into a cloud service, either an existing one or one created alongside it.
//!
//! Bodies bound for the legacy surface can be reshaped before they are sent by a
//! [`LegacyRequestComposer`]. [`DeploymentDefaults`] is the stock one: it names the deployment
//! after the cloud service when the caller did not.

use crate::clients::LegacyRequestComposer;
use crate::framework::{
    CommitMode, Entities, NativeResource, Regional, Resource, Result, ShortcutsError, Wrapper,
};
use crate::model::{InputEndpointData, VirtualMachineData};

pub type VirtualMachine = Resource<VirtualMachineData>;
pub type VirtualMachines = Entities<VirtualMachineData>;

impl NativeResource for VirtualMachineData {
    const KIND: &'static str = "virtual machine";

    fn blank(name: &str) -> Self {
        VirtualMachineData::new(name)
    }

    fn name(&self) -> Option<&str> {
        Some(self.role_name.as_str()).filter(|n| !n.is_empty())
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn region(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn set_region(&mut self, region: String) {
        self.location = Some(region);
    }

    fn validate(&self, mode: CommitMode) -> std::result::Result<(), String> {
        if mode != CommitMode::Provision {
            return Ok(());
        }
        let missing: Vec<&str> = [
            ("cloud service", self.cloud_service.is_none()),
            ("size", self.role_size.is_none()),
            ("image", self.image.is_none()),
            ("admin username", self.admin_username.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        if !missing.is_empty() {
            return Err(format!(
                "virtual machine '{}' is missing: {}",
                self.role_name,
                missing.join(", ")
            ));
        }
        if self.create_cloud_service && self.location.is_none() {
            return Err(format!(
                "virtual machine '{}' creates a cloud service and needs a region",
                self.role_name
            ));
        }
        Ok(())
    }
}

impl Regional for VirtualMachineData {}

impl VirtualMachine {
    pub fn cloud_service(&self) -> Option<&str> {
        self.inner().cloud_service.as_deref()
    }

    pub fn deployment(&self) -> Option<&str> {
        self.inner().deployment.as_deref()
    }

    pub fn size(&self) -> Option<&str> {
        self.inner().role_size.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.inner().image.as_deref()
    }

    pub fn admin_username(&self) -> Option<&str> {
        self.inner().admin_username.as_deref()
    }

    pub fn storage_account(&self) -> Option<&str> {
        self.inner().storage_account.as_deref()
    }

    pub fn subnet(&self) -> Option<&str> {
        self.inner().subnet.as_deref()
    }

    pub fn endpoints(&self) -> &[InputEndpointData] {
        &self.inner().endpoints
    }

    pub fn status(&self) -> Option<&str> {
        self.inner().status.as_deref()
    }

    pub fn has_guest_agent(&self) -> bool {
        self.inner().provision_guest_agent
    }

    /// Opens TCP `public_port` and forwards it to the same port on the machine.
    pub fn with_tcp_endpoint(&mut self, public_port: u16) -> &mut Self {
        self.with_tcp_endpoint_to(public_port, public_port)
    }

    pub fn with_tcp_endpoint_to(&mut self, public_port: u16, private_port: u16) -> &mut Self {
        self.with_named_tcp_endpoint(format!("tcp-{}", public_port), public_port, private_port)
    }

    /// Replaces any endpoint already listening on `public_port`.
    pub fn with_named_tcp_endpoint(
        &mut self,
        name: impl Into<String>,
        public_port: u16,
        private_port: u16,
    ) -> &mut Self {
        let endpoints = &mut self.inner_mut().endpoints;
        endpoints.retain(|e| e.port != public_port);
        endpoints.push(InputEndpointData {
            name: name.into(),
            protocol: "tcp".to_string(),
            port: public_port,
            local_port: private_port,
        });
        self
    }

    pub fn with_guest_agent(&mut self, enabled: bool) -> &mut Self {
        self.inner_mut().provision_guest_agent = enabled;
        self
    }

    pub fn with_deployment(&mut self, name: impl Into<String>) -> &mut Self {
        self.inner_mut().deployment = Some(name.into());
        self
    }

    pub fn with_deployment_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.inner_mut().deployment_label = Some(label.into());
        self
    }

    pub fn with_storage_account(&mut self, name: impl Into<String>) -> &mut Self {
        self.inner_mut().storage_account = Some(name.into());
        self
    }

    /// Provisions into a cloud service created in the same request. Needs a region.
    pub fn with_new_cloud_service(&mut self, name: impl Into<String>) -> &mut Self {
        let inner = self.inner_mut();
        inner.cloud_service = Some(name.into());
        inner.create_cloud_service = true;
        self
    }

    pub fn with_existing_cloud_service(&mut self, name: impl Into<String>) -> &mut Self {
        let inner = self.inner_mut();
        inner.cloud_service = Some(name.into());
        inner.create_cloud_service = false;
        self
    }

    pub fn with_subnet(&mut self, subnet: impl Into<String>) -> &mut Self {
        self.inner_mut().subnet = Some(subnet.into());
        self
    }

    pub fn with_size(&mut self, size: impl Into<String>) -> &mut Self {
        self.inner_mut().role_size = Some(size.into());
        self
    }

    pub fn with_image(&mut self, image: impl Into<String>) -> &mut Self {
        self.inner_mut().image = Some(image.into());
        self
    }

    pub fn with_admin_username(&mut self, username: impl Into<String>) -> &mut Self {
        self.inner_mut().admin_username = Some(username.into());
        self
    }

    pub fn with_admin_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.inner_mut().admin_password = Some(password.into());
        self
    }
}

/// Fills in the deployment name and label from the cloud service when they were not set.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeploymentDefaults;

impl LegacyRequestComposer<VirtualMachineData> for DeploymentDefaults {
    fn compose(&self, mut request: VirtualMachineData) -> Result<VirtualMachineData> {
        if request.deployment.is_none() {
            request.deployment = request.cloud_service.clone();
        }
        if request.deployment_label.is_none() {
            request.deployment_label = request.deployment.clone();
        }
        if request.deployment.is_none() {
            return Err(ShortcutsError::Validation(format!(
                "virtual machine '{}' has no deployment and no cloud service to name one after",
                request.role_name
            )));
        }
        Ok(request)
    }
}
