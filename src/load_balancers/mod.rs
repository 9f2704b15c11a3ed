//! # Load Balancers
//!
//! A groupable category. A load balancer is assembled from frontends, backend pools and
//! rules that tie one frontend port to one backend pool port.
//!
//! ```ignore
//! let mut lb = load_balancers.define("lb1");
//! lb.with_group("rg1")
//!     .with_region("westus")
//!     .with_public_frontend("web", public_ip_id)
//!     .with_backend_pool("servers")
//!     .with_tcp_rule("http", "web", 80, "servers", 8080);
//! lb.provision().await?;
//! ```

use crate::framework::{
    CommitMode, Groupable, GroupableResources, NativeResource, RegionRule, Regional, Resource,
    Tagged, Wrapper,
};
use crate::model::{
    BackendAddressPoolData, FrontendIpConfigurationData, LoadBalancerData, LoadBalancingRuleData,
    TransportProtocol,
};
use std::collections::BTreeMap;

pub type LoadBalancer = Resource<LoadBalancerData>;
pub type LoadBalancers = GroupableResources<LoadBalancerData>;

impl NativeResource for LoadBalancerData {
    const KIND: &'static str = "load balancer";
    const REGION_RULE: RegionRule = RegionRule::Required;

    fn blank(name: &str) -> Self {
        LoadBalancerData::new(name)
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

    fn validate(&self, _mode: CommitMode) -> Result<(), String> {
        for rule in &self.load_balancing_rules {
            if !self
                .frontend_ip_configurations
                .iter()
                .any(|f| f.name == rule.frontend_ip_configuration)
            {
                return Err(format!(
                    "rule '{}' refers to unknown frontend '{}'",
                    rule.name, rule.frontend_ip_configuration
                ));
            }
            if !self
                .backend_address_pools
                .iter()
                .any(|p| p.name == rule.backend_address_pool)
            {
                return Err(format!(
                    "rule '{}' refers to unknown backend pool '{}'",
                    rule.name, rule.backend_address_pool
                ));
            }
        }
        Ok(())
    }
}

impl Regional for LoadBalancerData {}

impl Groupable for LoadBalancerData {
    const RESOURCE_TYPE: &'static str = "loadBalancers";
}

impl Tagged for LoadBalancerData {
    fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.tags
    }
}

impl LoadBalancer {
    pub fn provisioning_state(&self) -> Option<&str> {
        self.inner().provisioning_state.as_deref()
    }

    pub fn frontends(&self) -> &[FrontendIpConfigurationData] {
        &self.inner().frontend_ip_configurations
    }

    pub fn backend_pools(&self) -> &[BackendAddressPoolData] {
        &self.inner().backend_address_pools
    }

    pub fn rules(&self) -> &[LoadBalancingRuleData] {
        &self.inner().load_balancing_rules
    }

    /// Adds a frontend bound to `subnet_id`, replacing any frontend with the same name.
    pub fn with_private_frontend(
        &mut self,
        name: impl Into<String>,
        subnet_id: impl Into<String>,
    ) -> &mut Self {
        self.put_frontend(FrontendIpConfigurationData {
            name: name.into(),
            subnet: Some(subnet_id.into()),
            ..Default::default()
        })
    }

    /// Adds a frontend bound to a public IP, replacing any frontend with the same name.
    pub fn with_public_frontend(
        &mut self,
        name: impl Into<String>,
        public_ip_id: impl Into<String>,
    ) -> &mut Self {
        self.put_frontend(FrontendIpConfigurationData {
            name: name.into(),
            public_ip_address: Some(public_ip_id.into()),
            ..Default::default()
        })
    }

    fn put_frontend(&mut self, frontend: FrontendIpConfigurationData) -> &mut Self {
        let frontends = &mut self.inner_mut().frontend_ip_configurations;
        frontends.retain(|f| f.name != frontend.name);
        frontends.push(frontend);
        self
    }

    pub fn with_backend_pool(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        let pools = &mut self.inner_mut().backend_address_pools;
        if !pools.iter().any(|p| p.name == name) {
            pools.push(BackendAddressPoolData { id: None, name });
        }
        self
    }

    /// Forwards TCP `frontend_port` on `frontend` to `backend_port` on `pool`.
    pub fn with_tcp_rule(
        &mut self,
        name: impl Into<String>,
        frontend: impl Into<String>,
        frontend_port: u16,
        pool: impl Into<String>,
        backend_port: u16,
    ) -> &mut Self {
        let rule = LoadBalancingRuleData {
            name: name.into(),
            protocol: TransportProtocol::Tcp,
            frontend_port,
            backend_port,
            frontend_ip_configuration: frontend.into(),
            backend_address_pool: pool.into(),
        };
        let rules = &mut self.inner_mut().load_balancing_rules;
        rules.retain(|r| r.name != rule.name);
        rules.push(rule);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockApi;
    use crate::framework::{Committable, ShortcutsError};

    #[tokio::test]
    async fn test_rule_must_reference_defined_parts() {
        let mock = MockApi::<LoadBalancerData>::new();
        let lbs = LoadBalancers::new(mock.clone());

        let mut lb = lbs.define("lb1");
        lb.with_group("rg1")
            .with_region("westus")
            .with_backend_pool("servers")
            .with_tcp_rule("http", "web", 80, "servers", 8080);

        let err = lb.provision().await.unwrap_err();
        assert!(matches!(err, ShortcutsError::Validation(ref m) if m.contains("unknown frontend 'web'")));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_provision_submits_assembled_body() {
        let mock = MockApi::<LoadBalancerData>::new();
        mock.expect_create_or_update_in_group("rg1", "lb1").return_echo();
        let lbs = LoadBalancers::new(mock.clone());

        let mut lb = lbs.define("lb1");
        lb.with_group("rg1")
            .with_region("westus")
            .with_public_frontend("web", "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Network/publicIPAddresses/ip1")
            .with_backend_pool("servers")
            .with_backend_pool("servers")
            .with_tcp_rule("http", "web", 80, "servers", 8080);
        lb.provision().await.unwrap();

        let submitted = mock.submitted();
        let body = &submitted[0];
        assert_eq!(body.frontend_ip_configurations.len(), 1);
        assert_eq!(body.backend_address_pools.len(), 1);
        assert_eq!(body.load_balancing_rules[0].backend_port, 8080);
        assert_eq!(lb.rules()[0].frontend_port, 80);
        mock.verify();
    }
}
