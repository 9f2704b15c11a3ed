use crate::clients::{EntitiesApi, GroupableApi, LegacyRequestComposer};
use crate::cloud_services::CloudServices;
use crate::framework::{ResourceRef, Result, ShortcutsError};
use crate::groups::{Group, Groups};
use crate::lifecycle::SubscriptionConfig;
use crate::load_balancers::{LoadBalancer, LoadBalancers};
use crate::model::{
    HostedServiceData, LoadBalancerData, RegionData, ResourceGroupData, VirtualMachineData,
    VirtualNetworkData,
};
use crate::networks::{Network, Networks};
use crate::regions::Regions;
use crate::virtual_machines::VirtualMachines;
use tracing::info;

/// The session context: one collection per category, all acting on one subscription.
///
/// The subscription owns its collections, so the groupable caches live as long as it does.
///
/// # Example
///
/// ```ignore
/// let subscription = Subscription::builder(SubscriptionConfig::load("my.azureauth")?)
///     .groups(groups_client)
///     .networks(networks_client)
///     .load_balancers(load_balancers_client)
///     .cloud_services(hosted_services_client)
///     .virtual_machines(virtual_machines_client)
///     .regions(locations_client)
///     .build()?;
///
/// let network = subscription.network(("rg1", "vnet1")).await?;
/// ```
pub struct Subscription {
    config: SubscriptionConfig,
    groups: Groups,
    networks: Networks,
    load_balancers: LoadBalancers,
    cloud_services: CloudServices,
    virtual_machines: VirtualMachines,
    regions: Regions,
}

impl Subscription {
    pub fn builder(config: SubscriptionConfig) -> SubscriptionBuilder {
        SubscriptionBuilder {
            config,
            groups: None,
            networks: None,
            load_balancers: None,
            cloud_services: None,
            virtual_machines: None,
            regions: None,
        }
    }

    pub fn config(&self) -> &SubscriptionConfig {
        &self.config
    }

    pub fn subscription_id(&self) -> &str {
        &self.config.subscription_id
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn networks(&self) -> &Networks {
        &self.networks
    }

    pub fn load_balancers(&self) -> &LoadBalancers {
        &self.load_balancers
    }

    pub fn cloud_services(&self) -> &CloudServices {
        &self.cloud_services
    }

    pub fn virtual_machines(&self) -> &VirtualMachines {
        &self.virtual_machines
    }

    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    /// Shortcut for `groups().get(name)`.
    pub async fn group(&self, name: &str) -> Result<Group> {
        self.groups.get(name).await
    }

    /// Shortcut for `networks().get(target)`.
    pub async fn network(&self, target: impl Into<ResourceRef>) -> Result<Network> {
        self.networks.get(target).await
    }

    /// Shortcut for `load_balancers().get(target)`.
    pub async fn load_balancer(&self, target: impl Into<ResourceRef>) -> Result<LoadBalancer> {
        self.load_balancers.get(target).await
    }
}

/// Collects one external client per category.
pub struct SubscriptionBuilder {
    config: SubscriptionConfig,
    groups: Option<Groups>,
    networks: Option<Networks>,
    load_balancers: Option<LoadBalancers>,
    cloud_services: Option<CloudServices>,
    virtual_machines: Option<VirtualMachines>,
    regions: Option<Regions>,
}

impl SubscriptionBuilder {
    pub fn groups<A>(mut self, api: A) -> Self
    where
        A: EntitiesApi<Native = ResourceGroupData> + 'static,
    {
        self.groups = Some(Groups::new(api));
        self
    }

    pub fn networks<A>(mut self, api: A) -> Self
    where
        A: GroupableApi<Native = VirtualNetworkData> + 'static,
    {
        self.networks = Some(Networks::new(api));
        self
    }

    pub fn load_balancers<A>(mut self, api: A) -> Self
    where
        A: GroupableApi<Native = LoadBalancerData> + 'static,
    {
        self.load_balancers = Some(LoadBalancers::new(api));
        self
    }

    pub fn cloud_services<A>(mut self, api: A) -> Self
    where
        A: EntitiesApi<Native = HostedServiceData> + 'static,
    {
        self.cloud_services = Some(CloudServices::new(api));
        self
    }

    pub fn virtual_machines<A>(mut self, api: A) -> Self
    where
        A: EntitiesApi<Native = VirtualMachineData> + 'static,
    {
        self.virtual_machines = Some(VirtualMachines::new(api));
        self
    }

    /// Like [`virtual_machines`](Self::virtual_machines), with every outgoing body passed
    /// through `composer` first.
    pub fn virtual_machines_with_composer<A, C>(mut self, api: A, composer: C) -> Self
    where
        A: EntitiesApi<Native = VirtualMachineData> + 'static,
        C: LegacyRequestComposer<VirtualMachineData> + 'static,
    {
        self.virtual_machines = Some(VirtualMachines::with_composer(api, composer));
        self
    }

    pub fn regions<A>(mut self, api: A) -> Self
    where
        A: EntitiesApi<Native = RegionData> + 'static,
    {
        self.regions = Some(Regions::new(api));
        self
    }

    /// Fails with a validation error naming every category that has no client.
    pub fn build(self) -> Result<Subscription> {
        let missing: Vec<&str> = [
            ("groups", self.groups.is_none()),
            ("networks", self.networks.is_none()),
            ("load balancers", self.load_balancers.is_none()),
            ("cloud services", self.cloud_services.is_none()),
            ("virtual machines", self.virtual_machines.is_none()),
            ("regions", self.regions.is_none()),
        ]
        .into_iter()
        .filter_map(|(family, absent)| absent.then_some(family))
        .collect();

        match (
            self.groups,
            self.networks,
            self.load_balancers,
            self.cloud_services,
            self.virtual_machines,
            self.regions,
        ) {
            (
                Some(groups),
                Some(networks),
                Some(load_balancers),
                Some(cloud_services),
                Some(virtual_machines),
                Some(regions),
            ) => {
                info!(subscription = %self.config.subscription_id, "Subscription ready");
                Ok(Subscription {
                    config: self.config,
                    groups,
                    networks,
                    load_balancers,
                    cloud_services,
                    virtual_machines,
                    regions,
                })
            }
            _ => Err(ShortcutsError::Validation(format!(
                "no client for: {}",
                missing.join(", ")
            ))),
        }
    }
}
