//! Path-style resource ids and the two addressing modes of groupable lookups.

use crate::framework::error::{Result, ShortcutsError};
use std::fmt::{self, Display};
use std::str::FromStr;

/// A parsed `/subscriptions/{s}/resourceGroups/{g}[/providers/{ns}/{type}/{name}...]` id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    raw: String,
    subscription: String,
    group: String,
    provider: Option<String>,
    resource_type: Option<String>,
    name: String,
    child: bool,
}

impl ResourceId {
    pub fn parse(id: &str) -> Result<Self> {
        let invalid = || ShortcutsError::Validation(format!("'{}' is not a resource id", id));

        let segments: Vec<&str> = id.trim_matches('/').split('/').collect();
        if !id.starts_with('/') || segments.len() < 4 || segments.iter().any(|s| s.is_empty()) {
            return Err(invalid());
        }
        if !segments[0].eq_ignore_ascii_case("subscriptions")
            || !segments[2].eq_ignore_ascii_case("resourceGroups")
        {
            return Err(invalid());
        }

        let subscription = segments[1].to_string();
        let group = segments[3].to_string();
        let rest = &segments[4..];

        let child = rest.len() > 4;
        let (provider, resource_type, name) = match rest {
            [] => (None, None, group.clone()),
            [keyword, namespace, kind, name, ..] if keyword.eq_ignore_ascii_case("providers") => {
                // Child resources (e.g. .../virtualNetworks/vnet/subnets/sub1) are named by their
                // last segment.
                let name = rest.last().copied().unwrap_or(*name);
                (
                    Some(namespace.to_string()),
                    Some(kind.to_string()),
                    name.to_string(),
                )
            }
            _ => return Err(invalid()),
        };

        Ok(Self {
            raw: id.to_string(),
            subscription,
            group,
            provider,
            resource_type,
            name,
            child,
        })
    }

    pub fn subscription(&self) -> &str {
        &self.subscription
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Provider namespace, e.g. `Microsoft.Network`. `None` for a resource group id.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Top-level resource type, e.g. `virtualNetworks`.
    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the id points below a top-level resource, e.g. a subnet of a network.
    pub fn is_child(&self) -> bool {
        self.child
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for ResourceId {
    type Err = ShortcutsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// How a caller addresses one groupable resource.
///
/// ```
/// use azure_shortcuts::framework::ResourceRef;
///
/// let by_id = ResourceRef::from("/subscriptions/s1/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet1");
/// let by_name = ResourceRef::from(("rg", "vnet1"));
/// assert!(matches!(by_id, ResourceRef::Id(_)));
/// assert!(matches!(by_name, ResourceRef::InGroup { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// A single opaque path-style id.
    Id(String),
    /// A (group, name) pair.
    InGroup { group: String, name: String },
}

impl ResourceRef {
    /// Resolves to the (group, name) pair the native endpoints take.
    ///
    /// An id must name a top-level resource of `resource_type`: resource group ids, child
    /// resource ids and ids of another type are rejected.
    pub fn group_and_name(&self, resource_type: &str) -> Result<(String, String)> {
        match self {
            ResourceRef::Id(id) => {
                let parsed = ResourceId::parse(id)?;
                let matches = parsed
                    .resource_type()
                    .is_some_and(|t| t.eq_ignore_ascii_case(resource_type));
                if !matches || parsed.is_child() {
                    return Err(ShortcutsError::Validation(format!(
                        "'{}' is not a {} id",
                        id, resource_type
                    )));
                }
                Ok((parsed.group, parsed.name))
            }
            ResourceRef::InGroup { group, name } => Ok((group.clone(), name.clone())),
        }
    }
}

impl Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRef::Id(id) => f.write_str(id),
            ResourceRef::InGroup { group, name } => write!(f, "{}/{}", group, name),
        }
    }
}

impl From<&str> for ResourceRef {
    fn from(id: &str) -> Self {
        ResourceRef::Id(id.to_string())
    }
}

impl From<String> for ResourceRef {
    fn from(id: String) -> Self {
        ResourceRef::Id(id)
    }
}

impl From<&String> for ResourceRef {
    fn from(id: &String) -> Self {
        ResourceRef::Id(id.clone())
    }
}

impl From<(&str, &str)> for ResourceRef {
    fn from((group, name): (&str, &str)) -> Self {
        ResourceRef::InGroup {
            group: group.to_string(),
            name: name.to_string(),
        }
    }
}

impl From<(String, String)> for ResourceRef {
    fn from((group, name): (String, String)) -> Self {
        ResourceRef::InGroup { group, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VNET_ID: &str = "/subscriptions/9657ab5d/resourceGroups/javasampleresourcegroup1/providers/Microsoft.Network/virtualNetworks/vnet1";

    #[test]
    fn test_parse_network_id() {
        let id = ResourceId::parse(VNET_ID).unwrap();
        assert_eq!(id.subscription(), "9657ab5d");
        assert_eq!(id.group(), "javasampleresourcegroup1");
        assert_eq!(id.provider(), Some("Microsoft.Network"));
        assert_eq!(id.resource_type(), Some("virtualNetworks"));
        assert_eq!(id.name(), "vnet1");
        assert_eq!(id.to_string(), VNET_ID);
    }

    #[test]
    fn test_parse_group_id_and_case_insensitive_keywords() {
        let id: ResourceId = "/Subscriptions/s1/resourcegroups/rg1".parse().unwrap();
        assert_eq!(id.group(), "rg1");
        assert_eq!(id.name(), "rg1");
        assert_eq!(id.provider(), None);
    }

    #[test]
    fn test_parse_child_resource_uses_last_segment() {
        let id = ResourceId::parse(&format!("{}/subnets/frontend", VNET_ID)).unwrap();
        assert_eq!(id.resource_type(), Some("virtualNetworks"));
        assert_eq!(id.name(), "frontend");
        assert!(id.is_child());
        assert!(!ResourceId::parse(VNET_ID).unwrap().is_child());
    }

    #[test]
    fn test_parse_rejects_plain_names_and_truncated_ids() {
        for bad in ["vnet1", "", "/subscriptions/s1", "/subscriptions/s1/resourceGroups/rg/providers/Microsoft.Network", "/foo/s1/resourceGroups/rg"] {
            let err = ResourceId::parse(bad).unwrap_err();
            assert!(matches!(err, ShortcutsError::Validation(_)), "{bad} should not parse");
        }
    }

    #[test]
    fn test_resource_ref_resolves_both_modes_to_same_pair() {
        let by_id = ResourceRef::from(VNET_ID);
        let by_name = ResourceRef::from(("javasampleresourcegroup1", "vnet1"));
        assert_eq!(
            by_id.group_and_name("virtualNetworks").unwrap(),
            by_name.group_and_name("virtualNetworks").unwrap()
        );
        assert_eq!(
            ResourceRef::from(VNET_ID.replace("virtualNetworks", "VIRTUALNETWORKS"))
                .group_and_name("virtualNetworks")
                .unwrap(),
            ("javasampleresourcegroup1".to_string(), "vnet1".to_string())
        );
    }

    #[test]
    fn test_resource_ref_rejects_ids_of_another_shape() {
        let lb = VNET_ID.replace("virtualNetworks/vnet1", "loadBalancers/lb1");
        let subnet = format!("{}/subnets/frontend", VNET_ID);
        let group = "/subscriptions/9657ab5d/resourceGroups/javasampleresourcegroup1";
        for bad in [lb.as_str(), subnet.as_str(), group] {
            let err = ResourceRef::from(bad).group_and_name("virtualNetworks").unwrap_err();
            assert!(matches!(err, ShortcutsError::Validation(ref m) if m.contains("virtualNetworks")), "{bad}");
        }
    }
}
