//! Per-switch configuration document.
//!
//! The document is the only artifact the generator emits: one JSON file per
//! switch role, consumed by the downstream config renderer.

use crate::bgp::{default_prefix_lists, BgpDocument, PrefixLists};
use crate::classify::{AddressMap, VlanEntry, VlanMap};
use crate::registry::SwitchEntry;
use crate::resolve::{ResolvedInterface, ResolvedPortChannel};
use serde::Serialize;

/// Classification maps embedded for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct DebugMaps {
    pub vlan_map: VlanMap,
    pub ip_map: AddressMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwitchDocument {
    pub switch: SwitchEntry,
    pub vlans: Vec<VlanEntry>,
    pub interfaces: Vec<ResolvedInterface>,
    pub port_channels: Vec<ResolvedPortChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgp: Option<BgpDocument>,
    pub prefix_lists: PrefixLists,
    pub qos: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugMaps>,
}

// Debug maps are diagnostics only and never part of equality.
impl PartialEq for SwitchDocument {
    fn eq(&self, other: &Self) -> bool {
        self.switch == other.switch
            && self.vlans == other.vlans
            && self.interfaces == other.interfaces
            && self.port_channels == other.port_channels
            && self.bgp == other.bgp
            && self.prefix_lists == other.prefix_lists
            && self.qos == other.qos
    }
}

impl SwitchDocument {
    /// Merge the generated sections into a document.
    ///
    /// Leaf switches get the default-route prefix list and QoS; the BMC
    /// switch gets neither.
    pub fn assemble(
        switch: SwitchEntry,
        vlans: Vec<VlanEntry>,
        interfaces: Vec<ResolvedInterface>,
        port_channels: Vec<ResolvedPortChannel>,
        bgp: Option<BgpDocument>,
        debug: Option<DebugMaps>,
    ) -> Self {
        let leaf = switch.switch_type.is_leaf();
        SwitchDocument {
            switch,
            vlans,
            interfaces,
            port_channels,
            bgp,
            prefix_lists: if leaf { default_prefix_lists() } else { PrefixLists::new() },
            qos: leaf,
            debug,
        }
    }

    /// Output file name, `{hostname}.json`
    pub fn file_name(&self) -> String {
        format!("{}.json", self.switch.file_stem())
    }
}
