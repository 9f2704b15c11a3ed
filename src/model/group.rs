use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A resource group as returned by the resource management API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

impl ResourceGroupData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_is_camel_case_and_sparse() {
        let mut group = ResourceGroupData::new("rg1");
        group.location = Some("westus".to_string());
        group.provisioning_state = Some("Succeeded".to_string());

        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "rg1", "location": "westus", "provisioningState": "Succeeded" })
        );

        let back: ResourceGroupData = serde_json::from_value(json).unwrap();
        assert_eq!(back, group);
    }
}
