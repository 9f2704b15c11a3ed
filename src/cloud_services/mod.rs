//! # Cloud Services
//!
//! Hosted services on the legacy management surface, addressed by service name. A new
//! service is placed either in a region or in an affinity group.

use crate::framework::{CommitMode, Entities, NativeResource, Regional, Resource, Wrapper};
use crate::model::HostedServiceData;
use chrono::{DateTime, Utc};

pub type CloudService = Resource<HostedServiceData>;
pub type CloudServices = Entities<HostedServiceData>;

impl NativeResource for HostedServiceData {
    const KIND: &'static str = "cloud service";

    fn blank(name: &str) -> Self {
        HostedServiceData::new(name)
    }

    fn name(&self) -> Option<&str> {
        Some(self.service_name.as_str()).filter(|n| !n.is_empty())
    }

    fn id(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn region(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn set_region(&mut self, region: String) {
        self.location = Some(region);
    }

    fn validate(&self, mode: CommitMode) -> Result<(), String> {
        match (&self.location, &self.affinity_group) {
            (Some(_), Some(_)) => Err(format!(
                "cloud service '{}' takes a region or an affinity group, not both",
                self.service_name
            )),
            (None, None) if mode == CommitMode::Provision => Err(format!(
                "cloud service '{}' needs a region or an affinity group",
                self.service_name
            )),
            _ => Ok(()),
        }
    }
}

impl Regional for HostedServiceData {}

impl CloudService {
    pub fn description(&self) -> Option<&str> {
        self.inner().description.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.inner().label.as_deref()
    }

    pub fn reverse_dns_fqdn(&self) -> Option<&str> {
        self.inner().reverse_dns_fqdn.as_deref()
    }

    pub fn affinity_group(&self) -> Option<&str> {
        self.inner().affinity_group.as_deref()
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.inner().date_created
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.inner().date_last_modified
    }

    pub fn with_affinity_group(&mut self, affinity_group: impl Into<String>) -> &mut Self {
        self.inner_mut().affinity_group = Some(affinity_group.into());
        self
    }

    pub fn with_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.inner_mut().label = Some(label.into());
        self
    }

    pub fn with_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.inner_mut().description = Some(description.into());
        self
    }

    pub fn with_reverse_dns_fqdn(&mut self, fqdn: impl Into<String>) -> &mut Self {
        self.inner_mut().reverse_dns_fqdn = Some(fqdn.into());
        self
    }
}
