//! Group classifier.
//!
//! Scans the topology's network groups once per switch-role pass and builds
//! the VLAN map, the address map and the per-group facts the VLAN section
//! is rendered from.

use super::maps::{AddressKey, AddressMap, VlanMap};
use super::role::{classify_group_name, classify_leaf_storage, RoleSymbol};
use crate::topology::{Supernet, SwitchRole};
use crate::utils::ip_utils::{last_host, with_prefix_len};
use log::debug;

/// Assignment name carrying the redundant (virtual) gateway address
pub const GATEWAY_ASSIGNMENT: &str = "GATEWAY";

/// Facts about one VLAN group as seen from the switch being generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedGroup {
    pub vlan_id: u16,
    pub name: String,
    pub role: Option<RoleSymbol>,
    pub leaf_storage: Option<RoleSymbol>,
    /// This switch's SVI address (assignment named after the role)
    pub svi_ip: Option<String>,
    /// Redundant gateway address (`GATEWAY` assignment)
    pub virtual_ip: Option<String>,
    pub cidr: Option<u8>,
    pub shutdown: bool,
}

/// Output of one classification pass
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub vlans: VlanMap,
    pub addresses: AddressMap,
    pub groups: Vec<ClassifiedGroup>,
}

/// Classify every network group for the given switch role.
///
/// Groups with a non-zero VLAN ID are classified by group-name prefix and by
/// display-name leaf suffix; a group may land in both a category role and a
/// leaf storage role. Groups with VLAN ID zero are point-to-point / loopback
/// groups and only feed the address map.
pub fn classify(supernets: &[Supernet], role: SwitchRole) -> Classification {
    let mut out = Classification::default();

    for net in supernets {
        let vlan_id = net.vlan_id();
        if vlan_id == 0 {
            collect_link_addresses(net, &mut out.addresses);
            continue;
        }

        let group_role = classify_group_name(&net.group_name);
        let leaf_storage = classify_leaf_storage(&net.ipv4.name);
        let subnet = group_subnet(net);

        for symbol in group_role.iter().chain(leaf_storage.iter()) {
            out.vlans.push(*symbol, vlan_id);
            if let Some(subnet) = &subnet {
                out.addresses.push(AddressKey::Role(*symbol), subnet.clone());
            }
        }

        let (mut svi_ip, virtual_ip) = switch_addresses(net, role);
        if svi_ip.is_none() && role == SwitchRole::Bmc && group_role == Some(RoleSymbol::Bmc) {
            svi_ip = bmc_svi(net, subnet.as_deref());
        }
        out.groups.push(ClassifiedGroup {
            vlan_id,
            name: net.ipv4.name.clone(),
            role: group_role,
            leaf_storage,
            svi_ip,
            virtual_ip,
            cidr: net.ipv4.cidr.or_else(|| subnet.as_deref().and_then(prefix_of)),
            shutdown: net.shutdown || group_role == Some(RoleSymbol::Unused),
        });
    }

    debug!("{} VLAN map: {:?}", role, out.vlans);
    debug!("{} address map: {} keys", role, out.addresses.len());
    out
}

/// Subnet of a group in CIDR notation, if the topology gives one
pub fn group_subnet(net: &Supernet) -> Option<String> {
    let ipv4 = &net.ipv4;
    let subnet = ipv4.subnet.trim();
    if subnet.contains('/') {
        return Some(subnet.to_string());
    }
    let base = if ipv4.network.trim().is_empty() { subnet } else { ipv4.network.trim() };
    match (base.is_empty(), ipv4.cidr) {
        (false, Some(cidr)) => Some(format!("{}/{}", base, cidr)),
        _ => None,
    }
}

fn prefix_of(subnet: &str) -> Option<u8> {
    subnet.split_once('/').and_then(|(_, len)| len.trim().parse().ok())
}

/// Pick the SVI address of `role` and the gateway VIP out of a group's
/// assignments. The group's `Gateway` field stands in for a missing
/// `GATEWAY` assignment.
fn switch_addresses(net: &Supernet, role: SwitchRole) -> (Option<String>, Option<String>) {
    let mut svi_ip = None;
    let mut virtual_ip = None;

    for assign in &net.ipv4.assignment {
        let name = assign.name.trim().to_uppercase();
        let ip = assign.ip.trim();
        if ip.is_empty() {
            continue;
        }
        if name == GATEWAY_ASSIGNMENT {
            virtual_ip = Some(ip.to_string());
        } else if name.starts_with(role.key()) {
            svi_ip = Some(ip.to_string());
        }
    }

    if virtual_ip.is_none() && !net.ipv4.gateway.trim().is_empty() {
        virtual_ip = Some(net.ipv4.gateway.trim().to_string());
    }

    (svi_ip, virtual_ip)
}

/// SVI of the BMC switch in a `SwitchSVI` group without a BMC assignment:
/// the last host of the subnet, or the gateway when the subnet is unusable.
fn bmc_svi(net: &Supernet, subnet: Option<&str>) -> Option<String> {
    let gateway = net.ipv4.gateway.trim();
    if !net.ipv4.switch_svi || gateway.is_empty() {
        return None;
    }
    subnet.and_then(last_host).or_else(|| Some(gateway.to_string()))
}

/// Record the per-switch addresses and the subnet of a P2P / loopback group.
///
/// Each assignment named after a switch role R is stored under the group
/// label with R's component removed and `_R` appended, so both ends of
/// `P2P_BORDER1_TOR1` land under swapped keys (`P2P_BORDER1_TOR1` for TOR1,
/// `P2P_TOR1_BORDER1` for Border1).
fn collect_link_addresses(net: &Supernet, addresses: &mut AddressMap) {
    let label = net.label().trim().to_uppercase();
    if label.is_empty() {
        return;
    }

    if let Some(subnet) = group_subnet(net) {
        addresses.push(AddressKey::subnet(&label), subnet);
    }
    if !net.ipv4.first_address.trim().is_empty() {
        addresses.push(AddressKey::first_address(&label), net.ipv4.first_address.trim());
    }
    if !net.ipv4.last_address.trim().is_empty() {
        addresses.push(AddressKey::last_address(&label), net.ipv4.last_address.trim());
    }

    for assign in &net.ipv4.assignment {
        let Ok(owner) = assign.name.parse::<SwitchRole>() else {
            continue;
        };
        if assign.ip.trim().is_empty() {
            continue;
        }
        let key = composite_key(&label, owner);
        addresses.push(key, with_prefix_len(&assign.ip, net.ipv4.cidr));
    }
}

/// `P2P_BORDER1_TOR1` seen from Border1 → `P2P_TOR1_BORDER1`
fn composite_key(label: &str, owner: SwitchRole) -> AddressKey {
    let base: Vec<&str> = label
        .split('_')
        .filter(|part| !part.is_empty() && *part != owner.key())
        .collect();
    AddressKey::interface(&base.join("_"), owner)
}
