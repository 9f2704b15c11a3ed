use azure_shortcuts::clients::ApiError;
use azure_shortcuts::framework::mock::{Call, MockApi};
use azure_shortcuts::framework::ShortcutsError;
use azure_shortcuts::lifecycle::setup_tracing;
use azure_shortcuts::model::VirtualNetworkData;
use azure_shortcuts::networks::Networks;
use azure_shortcuts::prelude::*;

fn vnet_id(group: &str, name: &str) -> String {
    format!(
        "/subscriptions/9657ab5d/resourceGroups/{}/providers/Microsoft.Network/virtualNetworks/{}",
        group, name
    )
}

fn vnet(group: &str, name: &str) -> VirtualNetworkData {
    VirtualNetworkData {
        id: Some(vnet_id(group, name)),
        location: Some("westus".to_string()),
        address_prefixes: vec!["10.0.0.0/16".to_string()],
        provisioning_state: Some("Succeeded".to_string()),
        ..VirtualNetworkData::new(name)
    }
}

#[tokio::test]
async fn test_list_in_group_keys_by_name_and_list_all_by_id() {
    setup_tracing();
    let mock = MockApi::<VirtualNetworkData>::new();
    let in_group = vec![vnet("rg1", "a"), vnet("rg1", "b"), vnet("rg1", "c")];
    let mut everywhere = in_group.clone();
    everywhere.push(vnet("rg2", "a"));
    everywhere.push(vnet("rg3", "d"));
    mock.expect_list_in_group("rg1").return_ok(in_group);
    mock.expect_list_all().return_ok(everywhere);
    let networks = Networks::new(mock.clone());

    let scoped = networks.list(Some("rg1")).await.unwrap();
    let mut names: Vec<&str> = scoped.keys().map(String::as_str).collect();
    names.sort();
    assert_eq!(names, ["a", "b", "c"]);
    assert!(scoped.values().all(|n| n.group() == Some("rg1") && n.is_initialized()));

    let all = networks.list(None).await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[&vnet_id("rg2", "a")].group(), Some("rg2"));

    assert_eq!(
        mock.calls(),
        vec![Call::ListInGroup { group: "rg1".to_string() }, Call::ListAll]
    );
    mock.verify();
}

#[tokio::test]
async fn test_both_addressing_modes_reach_the_same_resource() {
    let mock = MockApi::<VirtualNetworkData>::new();
    mock.expect_get_in_group("rg1", "vnet1").return_ok(vnet("rg1", "vnet1"));
    mock.expect_get_in_group("rg1", "vnet1").return_ok(vnet("rg1", "vnet1"));
    let networks = Networks::new(mock.clone());

    let by_id = networks.get(vnet_id("rg1", "vnet1")).await.unwrap();
    let by_pair = networks.get(("rg1", "vnet1")).await.unwrap();

    assert_eq!(by_id.unwrap(), by_pair.unwrap());
    assert_eq!(by_id.name(), "vnet1");
    assert_eq!(by_id.group(), Some("rg1"));
    mock.verify();
}

#[tokio::test]
async fn test_repeated_get_by_id_is_served_from_cache() {
    let mock = MockApi::<VirtualNetworkData>::new();
    mock.expect_get_in_group("rg1", "vnet1").return_ok(vnet("rg1", "vnet1"));
    let networks = Networks::new(mock.clone());
    let id = vnet_id("rg1", "vnet1");

    let first = networks.get(&id).await.unwrap();
    let second = networks.get(&id).await.unwrap();

    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(mock.calls().len(), 1);
    assert!(networks.is_cached(&id));
    mock.verify();
}

#[tokio::test]
async fn test_get_by_pair_always_reads_remote() {
    let mock = MockApi::<VirtualNetworkData>::new();
    mock.expect_get_in_group("rg1", "vnet1").return_ok(vnet("rg1", "vnet1"));
    let mut renamed_prefix = vnet("rg1", "vnet1");
    renamed_prefix.address_prefixes = vec!["10.1.0.0/16".to_string()];
    mock.expect_get_in_group("rg1", "vnet1").return_ok(renamed_prefix);
    let networks = Networks::new(mock.clone());

    networks.get(("rg1", "vnet1")).await.unwrap();
    let fresh = networks.get(("rg1", "vnet1")).await.unwrap();

    assert_eq!(fresh.address_prefixes(), ["10.1.0.0/16"]);
    mock.verify();
}

#[tokio::test]
async fn test_delete_then_get_surfaces_not_found() {
    let mock = MockApi::<VirtualNetworkData>::new();
    let id = vnet_id("rg1", "vnet1");
    mock.expect_get_in_group("rg1", "vnet1").return_ok(vnet("rg1", "vnet1"));
    mock.expect_delete_in_group("rg1", "vnet1").return_ok();
    mock.expect_get_in_group("rg1", "vnet1")
        .return_err(ApiError::NotFound("vnet1".to_string()));
    let networks = Networks::new(mock.clone());

    networks.get(&id).await.unwrap();
    networks.delete(&id).await.unwrap();
    assert!(!networks.is_cached(&id));

    let err = networks.get(&id).await.unwrap_err();
    assert!(err.is_not_found());
    mock.verify();
}

#[tokio::test]
async fn test_handle_delete_evicts_collection_cache() {
    let mock = MockApi::<VirtualNetworkData>::new();
    let id = vnet_id("rg1", "vnet1");
    mock.expect_get_in_group("rg1", "vnet1").return_ok(vnet("rg1", "vnet1"));
    mock.expect_delete_in_group("rg1", "vnet1").return_ok();
    let networks = Networks::new(mock.clone());

    let network = networks.get(&id).await.unwrap();
    assert!(networks.is_cached(&id));
    network.delete().await.unwrap();

    assert!(!networks.is_cached(&id));
    mock.verify();
}

#[tokio::test]
async fn test_relisting_a_group_drops_vanished_entries() {
    let mock = MockApi::<VirtualNetworkData>::new();
    mock.expect_list_in_group("rg1").return_ok(vec![vnet("rg1", "a"), vnet("rg1", "b")]);
    mock.expect_list_in_group("rg1").return_ok(vec![vnet("rg1", "a")]);
    let networks = Networks::new(mock.clone());

    networks.list(Some("rg1")).await.unwrap();
    assert!(networks.is_cached(&vnet_id("rg1", "b")));

    let relisted = networks.list(Some("rg1")).await.unwrap();
    assert_eq!(relisted.len(), 1);
    assert!(networks.is_cached(&vnet_id("rg1", "a")));
    assert!(!networks.is_cached(&vnet_id("rg1", "b")));
    mock.verify();
}

#[tokio::test]
async fn test_apply_twice_sends_two_identical_bodies() {
    let mock = MockApi::<VirtualNetworkData>::new();
    mock.expect_create_or_update_in_group("rg1", "vnet1").return_echo();
    mock.expect_create_or_update_in_group("rg1", "vnet1").return_echo();
    let networks = Networks::new(mock.clone());

    let mut network = networks.define("vnet1");
    network
        .with_group("rg1")
        .with_region("westus")
        .with_address_prefix("10.0.0.0/16")
        .with_tag("env", "test");
    network.apply().await.unwrap();
    network.apply().await.unwrap();

    let submitted = mock.submitted();
    assert_eq!(submitted.len(), 2);
    assert_eq!(submitted[0], submitted[1]);
    mock.verify();
}

#[tokio::test]
async fn test_apply_then_refresh_keeps_tags_and_region() {
    let mock = MockApi::<VirtualNetworkData>::new();
    mock.expect_create_or_update_in_group("rg1", "vnet1").return_echo();
    mock.expect_get_in_group("rg1", "vnet1").return_echo();
    let networks = Networks::new(mock.clone());

    let mut network = networks.define("vnet1");
    network
        .with_group("rg1")
        .with_region("eastus")
        .with_address_prefix("10.0.0.0/16")
        .with_tags([("env", "test"), ("owner", "ops")]);
    network.apply().await.unwrap().refresh().await.unwrap();

    assert!(network.is_initialized());
    assert_eq!(network.region(), Some("eastus"));
    assert_eq!(network.tags().get("owner").map(String::as_str), Some("ops"));
    mock.verify();
}

#[tokio::test]
async fn test_network_update_reads_region_from_its_group() {
    let mock = MockApi::<VirtualNetworkData>::new();
    mock.expect_get_in_group("rg1", "vnet1").return_ok(vnet("rg1", "vnet1"));
    mock.expect_create_or_update_in_group("rg1", "vnet1").return_echo();
    let networks = Networks::new(mock.clone());

    let mut network = networks.define("vnet1");
    network
        .with_group("rg1")
        .with_address_prefix("10.0.0.0/16")
        .with_dns_server("10.0.0.4");
    network.apply().await.unwrap();

    assert_eq!(mock.submitted()[0].location.as_deref(), Some("westus"));
    assert_eq!(network.dns_servers(), ["10.0.0.4"]);
    mock.verify();
}

#[tokio::test]
async fn test_rejected_commit_keeps_server_message_and_local_state() {
    let mock = MockApi::<VirtualNetworkData>::new();
    mock.expect_create_or_update_in_group("rg1", "vnet1").return_err(ApiError::Rejected {
        code: "InUseSubnetCannotBeDeleted".to_string(),
        message: "Subnet default is in use".to_string(),
    });
    let networks = Networks::new(mock.clone());

    let mut network = networks.define("vnet1");
    network
        .with_group("rg1")
        .with_region("westus")
        .with_address_prefix("10.0.0.0/16");
    let err = network.apply().await.unwrap_err();

    assert_eq!(
        err,
        ShortcutsError::RemoteApi {
            code: "InUseSubnetCannotBeDeleted".to_string(),
            message: "Subnet default is in use".to_string(),
        }
    );
    assert!(!network.is_initialized());
    assert_eq!(network.region(), Some("westus"));
    mock.verify();
}

#[tokio::test]
async fn test_wrap_takes_group_from_id() {
    let networks = Networks::new(MockApi::<VirtualNetworkData>::new());

    let record = vnet("rg7", "vnet9");
    let handle = networks.wrap(record.clone()).unwrap();

    assert_eq!(handle.name(), "vnet9");
    assert_eq!(handle.group(), Some("rg7"));
    assert!(handle.is_initialized());
    assert_eq!(networks.unwrap(&handle), record);
}

fn assert_rejected_without_remote_call(err: ShortcutsError, mock: &MockApi<VirtualNetworkData>) {
    assert!(matches!(err, ShortcutsError::Validation(ref m) if m.contains("virtualNetworks")));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_get_rejects_an_id_of_another_category() {
    let mock = MockApi::<VirtualNetworkData>::new();
    let networks = Networks::new(mock.clone());
    let lb_id = "/subscriptions/9657ab5d/resourceGroups/rg1/providers/Microsoft.Network/loadBalancers/vnet1";

    let err = networks.get(lb_id).await.unwrap_err();
    assert_rejected_without_remote_call(err, &mock);

    let err = networks.delete(lb_id).await.unwrap_err();
    assert_rejected_without_remote_call(err, &mock);
}

#[tokio::test]
async fn test_get_rejects_a_child_resource_id() {
    let mock = MockApi::<VirtualNetworkData>::new();
    let networks = Networks::new(mock.clone());
    let subnet_id = format!("{}/subnets/frontend", vnet_id("rg1", "vnet1"));

    let err = networks.get(&subnet_id).await.unwrap_err();
    assert_rejected_without_remote_call(err, &mock);

    let err = networks.delete(&subnet_id).await.unwrap_err();
    assert_rejected_without_remote_call(err, &mock);
}

#[tokio::test]
async fn test_get_rejects_a_bare_group_id() {
    let mock = MockApi::<VirtualNetworkData>::new();
    let networks = Networks::new(mock.clone());
    let group_id = "/subscriptions/9657ab5d/resourceGroups/rg1";

    let err = networks.get(group_id).await.unwrap_err();
    assert_rejected_without_remote_call(err, &mock);

    let err = networks.delete(group_id).await.unwrap_err();
    assert_rejected_without_remote_call(err, &mock);
}

#[tokio::test]
async fn test_cached_id_of_another_category_is_still_rejected() {
    let mock = MockApi::<VirtualNetworkData>::new();
    let mut stray = vnet("rg1", "vnet1");
    let subnet_id = format!("{}/subnets/frontend", vnet_id("rg1", "vnet1"));
    stray.id = Some(subnet_id.clone());
    mock.expect_list_all().return_ok(vec![stray]);
    let networks = Networks::new(mock.clone());

    networks.list(None).await.unwrap();
    assert!(networks.is_cached(&subnet_id));

    let err = networks.get(&subnet_id).await.unwrap_err();
    assert!(matches!(err, ShortcutsError::Validation(_)));
    assert_eq!(mock.calls(), vec![Call::ListAll]);
}

#[tokio::test]
async fn test_nameless_records_are_named_after_their_id() {
    let mock = MockApi::<VirtualNetworkData>::new();
    let nameless = VirtualNetworkData {
        name: String::new(),
        ..vnet("rg2", "vnet7")
    };
    mock.expect_list_all().return_ok(vec![nameless]);
    let networks = Networks::new(mock.clone());
    let id = vnet_id("rg2", "vnet7");

    let all = networks.list(None).await.unwrap();
    assert_eq!(all[&id].name(), "vnet7");
    assert_eq!(all[&id].group(), Some("rg2"));

    let cached = networks.get(&id).await.unwrap();
    assert_eq!(cached.name(), "vnet7");
    assert_eq!(cached.group(), Some("rg2"));
    assert_eq!(mock.calls(), vec![Call::ListAll]);
    mock.verify();
}
