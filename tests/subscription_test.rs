use azure_shortcuts::framework::mock::MockApi;
use azure_shortcuts::framework::ShortcutsError;
use azure_shortcuts::lifecycle::{setup_tracing, Subscription, SubscriptionConfig};
use azure_shortcuts::model::{
    HostedServiceData, LoadBalancerData, RegionData, ResourceGroupData, VirtualMachineData,
    VirtualNetworkData,
};
use azure_shortcuts::prelude::*;
use azure_shortcuts::virtual_machines::DeploymentDefaults;

struct Clients {
    groups: MockApi<ResourceGroupData>,
    networks: MockApi<VirtualNetworkData>,
    load_balancers: MockApi<LoadBalancerData>,
    cloud_services: MockApi<HostedServiceData>,
    virtual_machines: MockApi<VirtualMachineData>,
    regions: MockApi<RegionData>,
}

impl Clients {
    fn new() -> Self {
        Self {
            groups: MockApi::new(),
            networks: MockApi::new(),
            load_balancers: MockApi::new(),
            cloud_services: MockApi::new(),
            virtual_machines: MockApi::new(),
            regions: MockApi::new(),
        }
    }

    fn subscription(&self) -> Subscription {
        Subscription::builder(SubscriptionConfig::new("9657ab5d"))
            .groups(self.groups.clone())
            .networks(self.networks.clone())
            .load_balancers(self.load_balancers.clone())
            .cloud_services(self.cloud_services.clone())
            .virtual_machines_with_composer(self.virtual_machines.clone(), DeploymentDefaults)
            .regions(self.regions.clone())
            .build()
            .unwrap()
    }
}

#[tokio::test]
async fn test_build_names_every_missing_family() {
    let err = Subscription::builder(SubscriptionConfig::new("s1"))
        .groups(MockApi::<ResourceGroupData>::new())
        .cloud_services(MockApi::<HostedServiceData>::new())
        .build()
        .err()
        .unwrap();

    assert_eq!(
        err,
        ShortcutsError::Validation(
            "no client for: networks, load balancers, virtual machines, regions".to_string()
        )
    );
}

#[tokio::test]
async fn test_shortcut_lookups_route_to_their_collections() {
    setup_tracing();
    let clients = Clients::new();
    let network_id =
        "/subscriptions/9657ab5d/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/vnet1";
    clients.groups.expect_get("rg1").return_ok(ResourceGroupData {
        location: Some("westus".to_string()),
        ..ResourceGroupData::new("rg1")
    });
    clients.networks.expect_get_in_group("rg1", "vnet1").return_ok(VirtualNetworkData {
        id: Some(network_id.to_string()),
        ..VirtualNetworkData::new("vnet1")
    });
    clients
        .load_balancers
        .expect_get_in_group("rg1", "lb1")
        .return_ok(LoadBalancerData::new("lb1"));
    let subscription = clients.subscription();

    let group = subscription.group("rg1").await.unwrap();
    let network = subscription.network(network_id).await.unwrap();
    let lb = subscription.load_balancer(("rg1", "lb1")).await.unwrap();

    assert_eq!(subscription.subscription_id(), "9657ab5d");
    assert_eq!(group.region(), Some("westus"));
    assert_eq!(network.group(), Some("rg1"));
    assert_eq!(lb.name(), "lb1");
    assert!(subscription.networks().is_cached(network_id));

    clients.groups.verify();
    clients.networks.verify();
    clients.load_balancers.verify();
}

#[tokio::test]
async fn test_define_through_subscription_makes_no_calls() {
    let clients = Clients::new();
    let subscription = clients.subscription();

    let mut vm = subscription.virtual_machines().define("vm1");
    vm.with_new_cloud_service("svc1").with_region("West US").with_tcp_endpoint(80);
    let mut service = subscription.cloud_services().define("svc2");
    service.with_affinity_group("ag1");

    assert!(!vm.is_initialized());
    assert!(!service.is_initialized());
    assert!(clients.virtual_machines.calls().is_empty());
    assert!(clients.cloud_services.calls().is_empty());
}

#[tokio::test]
async fn test_regions_supporting_a_service_come_from_the_regions_client() {
    let clients = Clients::new();
    clients.regions.expect_list().return_ok(vec![
        RegionData {
            available_services: vec!["Compute".to_string(), "PersistentVMRole".to_string()],
            ..RegionData::new("West US")
        },
        RegionData {
            available_services: vec!["Storage".to_string()],
            ..RegionData::new("East Asia")
        },
    ]);
    let subscription = clients.subscription();

    let regions = subscription.regions().list_supporting("PersistentVMRole").await.unwrap();

    assert_eq!(regions.keys().collect::<Vec<_>>(), ["West US"]);
    assert!(clients.groups.calls().is_empty());
    clients.regions.verify();
}
