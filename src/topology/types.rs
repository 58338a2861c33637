//! Topology input document types.
//!
//! These mirror the lab definition JSON produced by the external topology
//! tooling (`InputData.Switches`, `InputData.Supernets`, ...). They are
//! deserialized once and treated as read-only for every resolution pass.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Root of a topology document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyDocument {
    #[serde(rename = "InputData")]
    pub input_data: InputData,
}

/// Lab definition: switches, network groups and the deployment pattern
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputData {
    #[serde(default)]
    pub switches: Vec<SwitchDefinition>,
    #[serde(default)]
    pub supernets: Vec<Supernet>,
    #[serde(default)]
    pub deployment_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// A switch as declared in the topology
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SwitchDefinition {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(rename = "Type", default)]
    pub switch_type: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub firmware: String,
    #[serde(rename = "ASN", alias = "Asn", default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// A named network group ("supernet") with its IPv4 facts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Supernet {
    #[serde(default)]
    pub group_name: String,
    #[serde(rename = "IPv4", default)]
    pub ipv4: Ipv4Block,
    #[serde(default)]
    pub shutdown: bool,
}

impl Supernet {
    /// VLAN ID of the group; zero means "not a VLAN" (P2P / loopback groups)
    pub fn vlan_id(&self) -> u16 {
        self.ipv4.vlan_id.unwrap_or(0)
    }

    /// Label used for composite address keys: the group name, or the
    /// display name when the group name is blank.
    pub fn label(&self) -> &str {
        if self.group_name.trim().is_empty() {
            &self.ipv4.name
        } else {
            &self.group_name
        }
    }
}

/// IPv4 block of a network group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ipv4Block {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "VlanId", alias = "VLANID", alias = "VlanID", default)]
    pub vlan_id: Option<u16>,
    #[serde(default)]
    pub subnet: String,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub cidr: Option<u8>,
    #[serde(default)]
    pub first_address: String,
    #[serde(default)]
    pub last_address: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(rename = "SwitchSVI", default)]
    pub switch_svi: bool,
    #[serde(default)]
    pub assignment: Vec<Assignment>,
}

/// A named address inside a group (e.g. `Gateway`, `TOR1`, `Border1`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "IP", default)]
    pub ip: String,
}

/// Switch roles known to the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SwitchRole {
    Tor1,
    Tor2,
    Bmc,
    Border1,
    Border2,
    Mux,
}

impl SwitchRole {
    /// Roles a configuration document is generated for by default
    pub const TARGETS: [SwitchRole; 3] = [SwitchRole::Tor1, SwitchRole::Tor2, SwitchRole::Bmc];

    /// Display form as written in topology documents
    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchRole::Tor1 => "TOR1",
            SwitchRole::Tor2 => "TOR2",
            SwitchRole::Bmc => "BMC",
            SwitchRole::Border1 => "Border1",
            SwitchRole::Border2 => "Border2",
            SwitchRole::Mux => "MUX",
        }
    }

    /// Upper-case form used inside composite address keys
    pub fn key(&self) -> &'static str {
        match self {
            SwitchRole::Tor1 => "TOR1",
            SwitchRole::Tor2 => "TOR2",
            SwitchRole::Bmc => "BMC",
            SwitchRole::Border1 => "BORDER1",
            SwitchRole::Border2 => "BORDER2",
            SwitchRole::Mux => "MUX",
        }
    }

    /// True for the two leaf (top-of-rack) switches
    pub fn is_leaf(&self) -> bool {
        matches!(self, SwitchRole::Tor1 | SwitchRole::Tor2)
    }

    /// The other leaf of an iBGP pair
    pub fn peer(&self) -> Option<SwitchRole> {
        match self {
            SwitchRole::Tor1 => Some(SwitchRole::Tor2),
            SwitchRole::Tor2 => Some(SwitchRole::Tor1),
            _ => None,
        }
    }
}

impl fmt::Display for SwitchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TOR1" => Ok(SwitchRole::Tor1),
            "TOR2" => Ok(SwitchRole::Tor2),
            "BMC" => Ok(SwitchRole::Bmc),
            "BORDER1" => Ok(SwitchRole::Border1),
            "BORDER2" => Ok(SwitchRole::Border2),
            "MUX" => Ok(SwitchRole::Mux),
            other => Err(format!("Unknown switch role: {}", other)),
        }
    }
}

impl Serialize for SwitchRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Canonical deployment pattern families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentPattern {
    /// Storage and compute share the host NICs ("HyperConverged" in older documents)
    FullyConverged,
    /// Storage traffic runs through the leaf switches on dedicated ports
    Switched,
    /// Storage runs host-to-host, the leaves carry no storage VLANs
    Switchless,
}

impl FromStr for DeploymentPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "hyperconverged" | "fullyconverged" => Ok(DeploymentPattern::FullyConverged),
            "switched" => Ok(DeploymentPattern::Switched),
            "switchless" => Ok(DeploymentPattern::Switchless),
            _ => Err(format!("Unknown deployment pattern: {}", s)),
        }
    }
}

impl fmt::Display for DeploymentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeploymentPattern::FullyConverged => "FullyConverged",
            DeploymentPattern::Switched => "Switched",
            DeploymentPattern::Switchless => "Switchless",
        };
        f.write_str(name)
    }
}
