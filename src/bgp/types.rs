//! BGP and prefix-list document types.

use serde::Serialize;
use std::collections::BTreeMap;

/// Prefix list matching the default route, applied to border and MUX sessions
pub const DEFAULT_ROUTE_LIST: &str = "DefaultRoute";

/// Update source of multihop sessions
pub const LOOPBACK_INTERFACE: &str = "Loopback0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpDocument {
    pub asn: u32,
    pub router_id: String,
    pub networks: Vec<String>,
    pub neighbors: Vec<BgpNeighbor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpNeighbor {
    /// Peer address, or a listen range for the MUX session
    pub ip: String,
    pub description: String,
    pub remote_as: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebgp_multihop: Option<u8>,
    pub af_ipv4_unicast: AddressFamilyPolicy,
}

/// Per-neighbor IPv4 unicast policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressFamilyPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_list_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_list_out: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixAction {
    Permit,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixListEntry {
    pub seq: u32,
    pub action: PrefixAction,
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_filter: Option<String>,
}

pub type PrefixLists = BTreeMap<String, Vec<PrefixListEntry>>;

/// `DefaultRoute`: permit the default route, deny everything longer
pub fn default_prefix_lists() -> PrefixLists {
    let entries = vec![
        PrefixListEntry {
            seq: 10,
            action: PrefixAction::Permit,
            prefix: "0.0.0.0/0".to_string(),
            prefix_filter: None,
        },
        PrefixListEntry {
            seq: 50,
            action: PrefixAction::Deny,
            prefix: "0.0.0.0/0".to_string(),
            prefix_filter: Some("le 32".to_string()),
        },
    ];

    let mut lists = PrefixLists::new();
    lists.insert(DEFAULT_ROUTE_LIST.to_string(), entries);
    lists
}
