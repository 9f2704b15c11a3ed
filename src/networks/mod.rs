//! # Virtual Networks
//!
//! A groupable category: networks live inside a resource group and are looked up by id
//! or by `(group, name)`.
//!
//! ```ignore
//! let mut network = networks.define("vnet1");
//! network
//!     .with_group("rg1")
//!     .with_region("westus")
//!     .with_address_prefix("10.0.0.0/16")
//!     .with_subnet("frontend", "10.0.1.0/24");
//! network.provision().await?;
//! ```

use crate::framework::{
    CommitMode, Groupable, GroupableResources, NativeResource, RegionRule, Regional, Resource,
    Tagged, Wrapper,
};
use crate::model::{SubnetData, VirtualNetworkData};
use std::collections::BTreeMap;

pub type Network = Resource<VirtualNetworkData>;
pub type Networks = GroupableResources<VirtualNetworkData>;

impl NativeResource for VirtualNetworkData {
    const KIND: &'static str = "virtual network";
    const REGION_RULE: RegionRule = RegionRule::Required;

    fn blank(name: &str) -> Self {
        VirtualNetworkData::new(name)
    }

    fn name(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|n| !n.is_empty())
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

    fn validate(&self, mode: CommitMode) -> Result<(), String> {
        if mode == CommitMode::Provision && self.address_prefixes.is_empty() {
            return Err(format!("virtual network '{}' needs an address prefix", self.name));
        }
        if let Some(subnet) = self.subnets.iter().find(|s| s.address_prefix.is_empty()) {
            return Err(format!("subnet '{}' needs an address prefix", subnet.name));
        }
        Ok(())
    }
}

impl Regional for VirtualNetworkData {}

impl Groupable for VirtualNetworkData {
    const RESOURCE_TYPE: &'static str = "virtualNetworks";
}

impl Tagged for VirtualNetworkData {
    fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.tags
    }
}

impl Network {
    pub fn provisioning_state(&self) -> Option<&str> {
        self.inner().provisioning_state.as_deref()
    }

    pub fn address_prefixes(&self) -> &[String] {
        &self.inner().address_prefixes
    }

    pub fn dns_servers(&self) -> &[String] {
        &self.inner().dns_servers
    }

    /// Subnets keyed by name.
    pub fn subnets(&self) -> BTreeMap<&str, &SubnetData> {
        self.inner()
            .subnets
            .iter()
            .map(|subnet| (subnet.name.as_str(), subnet))
            .collect()
    }

    pub fn with_address_prefix(&mut self, cidr: impl Into<String>) -> &mut Self {
        let cidr = cidr.into();
        let prefixes = &mut self.inner_mut().address_prefixes;
        if !prefixes.contains(&cidr) {
            prefixes.push(cidr);
        }
        self
    }

    pub fn with_dns_server(&mut self, address: impl Into<String>) -> &mut Self {
        let address = address.into();
        let servers = &mut self.inner_mut().dns_servers;
        if !servers.contains(&address) {
            servers.push(address);
        }
        self
    }

    /// Adds a subnet, or replaces the prefix of an existing one with the same name.
    pub fn with_subnet(&mut self, name: impl Into<String>, cidr: impl Into<String>) -> &mut Self {
        let name = name.into();
        let cidr = cidr.into();
        let subnets = &mut self.inner_mut().subnets;
        match subnets.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.address_prefix = cidr,
            None => subnets.push(SubnetData::new(name, cidr)),
        }
        self
    }

    pub fn without_subnet(&mut self, name: &str) -> &mut Self {
        self.inner_mut().subnets.retain(|s| s.name != name);
        self
    }
}
