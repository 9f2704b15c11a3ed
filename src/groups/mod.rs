//! # Resource Groups
//!
//! The scoping parent of every groupable category. Groups are addressed by name.
//!
//! The resource management API wants the region on every create-or-update even though a
//! group's region never changes. [`Group::apply`](crate::framework::Committable::apply) on a
//! handle from [`Groups::update`](crate::framework::Entities::update) therefore reads the
//! existing group first when no region was set locally:
//!
//! ```ignore
//! let mut group = groups.update("rg1");
//! group.with_tag("env", "prod");
//! group.apply().await?; // sends the remote group's region along with the tag
//! ```

use crate::framework::{Entities, NativeResource, RegionRule, Regional, Resource, Tagged, Wrapper};
use crate::model::ResourceGroupData;
use std::collections::BTreeMap;

pub type Group = Resource<ResourceGroupData>;
pub type Groups = Entities<ResourceGroupData>;

impl NativeResource for ResourceGroupData {
    const KIND: &'static str = "resource group";
    const REGION_RULE: RegionRule = RegionRule::Required;

    fn blank(name: &str) -> Self {
        ResourceGroupData::new(name)
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
}

impl Regional for ResourceGroupData {}

impl Tagged for ResourceGroupData {
    fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.tags
    }
}

impl Group {
    pub fn provisioning_state(&self) -> Option<&str> {
        self.inner().provisioning_state.as_deref()
    }
}
