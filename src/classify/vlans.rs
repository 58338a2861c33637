//! VLAN section of the switch document.

use super::classifier::ClassifiedGroup;
use super::role::RoleSymbol;
use crate::config::Settings;
use crate::registry::{SwitchEntry, CISCO};
use crate::topology::SwitchRole;
use serde::Serialize;

/// First-hop redundancy protocol of an SVI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RedundancyType {
    Hsrp,
    Vrrp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redundancy {
    #[serde(rename = "type")]
    pub kind: RedundancyType,
    pub group: u16,
    pub priority: u32,
    pub virtual_ip: String,
}

/// Layer-3 interface (SVI) of a VLAN
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SviInterface {
    pub ip: String,
    pub cidr: u8,
    pub mtu: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redundancy: Option<Redundancy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanEntry {
    pub vlan_id: u16,
    pub name: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub shutdown: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<SviInterface>,
}

/// BMC switches only carry these VLAN roles
const BMC_VLAN_ROLES: [RoleSymbol; 3] = [RoleSymbol::Bmc, RoleSymbol::Unused, RoleSymbol::Native];

/// Build the VLAN list of a switch, sorted by VLAN ID.
///
/// An SVI is attached when the group assigns this switch an address and
/// declares a CIDR. Leaf SVIs carry HSRP (Cisco) or VRRP redundancy with
/// the gateway as virtual IP; BMC SVIs carry none.
pub fn build_vlan_section(groups: &[ClassifiedGroup], switch: &SwitchEntry, settings: &Settings) -> Vec<VlanEntry> {
    let role = switch.switch_type;
    let mut vlans: Vec<VlanEntry> = groups
        .iter()
        .filter(|group| role != SwitchRole::Bmc || group.role.is_some_and(|r| BMC_VLAN_ROLES.contains(&r)))
        .map(|group| VlanEntry {
            vlan_id: group.vlan_id,
            name: group.name.clone(),
            shutdown: group.shutdown,
            interface: svi_for(group, switch, settings),
        })
        .collect();

    vlans.sort_by_key(|vlan| vlan.vlan_id);
    vlans
}

fn svi_for(group: &ClassifiedGroup, switch: &SwitchEntry, settings: &Settings) -> Option<SviInterface> {
    let ip = group.svi_ip.as_deref()?.trim();
    let cidr = group.cidr?;
    if ip.is_empty() {
        return None;
    }

    let role = switch.switch_type;
    let redundancy = role.is_leaf().then(|| Redundancy {
        kind: if switch.make == CISCO { RedundancyType::Hsrp } else { RedundancyType::Vrrp },
        group: group.vlan_id,
        priority: settings.priority_for(role),
        virtual_ip: group.virtual_ip.clone().unwrap_or_default(),
    });

    Some(SviInterface {
        ip: ip.to_string(),
        cidr,
        mtu: settings.jumbo_mtu,
        redundancy,
    })
}
