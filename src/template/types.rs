//! Interface template catalog types.
//!
//! A catalog is one JSON/YAML file per (make, model):
//!
//! ```json
//! {
//!   "make": "cisco",
//!   "model": "93180yc-fx",
//!   "interface_templates": {
//!     "common": [ { "name": "Loopback0", "type": "L3", "ipv4": "" } ],
//!     "fully_converged_trunk": [ { "name": "HyperConverged", "type": "Trunk", "native_vlan": "M", "tagged_vlans": "M,C,S" } ]
//!   },
//!   "port_channels": [ { "id": 50, "description": "P2P_IBGP", "type": "L3", "ipv4": "" } ]
//! }
//! ```
//!
//! Only the symbolic fields are typed; every other vendor field is carried
//! through to the output untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Switching mode of an interface or port-channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterfaceKind {
    #[serde(alias = "access", alias = "ACCESS")]
    Access,
    #[serde(alias = "trunk", alias = "TRUNK")]
    Trunk,
    #[serde(alias = "l3", alias = "Routed")]
    L3,
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterfaceKind::Access => "Access",
            InterfaceKind::Trunk => "Trunk",
            InterfaceKind::L3 => "L3",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InterfaceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_vlan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_vlan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_vlans: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortChannelTemplate {
    pub id: u32,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: InterfaceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_vlan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_vlans: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Interface set name shared by every deployment pattern
pub const COMMON_SET: &str = "common";

/// Interface and port-channel templates of one switch model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateCatalog {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub interface_templates: BTreeMap<String, Vec<InterfaceTemplate>>,
    #[serde(default)]
    pub port_channels: Vec<PortChannelTemplate>,
}

impl TemplateCatalog {
    /// Interface set by name, matched ignoring case, `_` and `-`
    pub fn interface_set(&self, name: &str) -> Option<&[InterfaceTemplate]> {
        let wanted = normalize_set_name(name);
        self.interface_templates
            .iter()
            .find(|(key, _)| normalize_set_name(key) == wanted)
            .map(|(_, set)| set.as_slice())
    }

    /// Interfaces shared by every variant (empty if the catalog has none)
    pub fn common(&self) -> &[InterfaceTemplate] {
        self.interface_set(COMMON_SET).unwrap_or(&[])
    }
}

fn normalize_set_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .collect::<String>()
        .to_lowercase()
}
