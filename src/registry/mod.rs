//! # Topology Registry
//!
//! Indexes the switches declared in a topology by role and captures the
//! autonomous-system numbers of every role that takes part in BGP peering.
//!
//! AS numbers are collected for all roles (Border1, Border2, TOR1, TOR2,
//! MUX) no matter which switch is being generated: the BGP section of a
//! leaf needs the AS numbers of its borders, its peer and the MUX.
//!
//! Firmware is derived from the vendor rather than copied:
//!
//! | make             | firmware |
//! |------------------|----------|
//! | `cisco`          | `nxos`   |
//! | `dellemc`/`dell` | `os10`   |
//! | anything else    | declared firmware, lower-cased |

use crate::topology::{InputData, SwitchDefinition, SwitchRole};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Canonical vendor make for Cisco switches
pub const CISCO: &str = "cisco";

/// Switch metadata emitted at the top of every document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchEntry {
    pub make: String,
    pub model: String,
    #[serde(rename = "type")]
    pub switch_type: SwitchRole,
    pub hostname: String,
    pub version: String,
    pub firmware: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<u32>,
}

impl SwitchEntry {
    fn from_definition(role: SwitchRole, sw: &SwitchDefinition, default_site: Option<&str>) -> Self {
        let make = sw.make.trim().to_lowercase();
        let firmware = canonical_firmware(&make, &sw.firmware);
        SwitchEntry {
            make,
            model: sw.model.trim().to_lowercase(),
            switch_type: role,
            hostname: sw.hostname.trim().to_lowercase(),
            version: sw.firmware.trim().to_lowercase(),
            firmware,
            site: sw.site.clone().or_else(|| default_site.map(str::to_string)),
            asn: sw.asn,
        }
    }

    /// File stem used for this switch's output document
    pub fn file_stem(&self) -> String {
        if self.hostname.is_empty() {
            self.switch_type.as_str().to_lowercase()
        } else {
            self.hostname.clone()
        }
    }
}

/// Map a vendor make to its network OS family
pub fn canonical_firmware(make: &str, declared: &str) -> String {
    match make.trim().to_lowercase().as_str() {
        CISCO => "nxos".to_string(),
        "dellemc" | "dell" => "os10".to_string(),
        _ => declared.trim().to_lowercase(),
    }
}

/// AS numbers keyed by switch role
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsnRegistry {
    asns: BTreeMap<SwitchRole, u32>,
}

impl AsnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the AS number of a role; the first declaration wins
    pub fn register(&mut self, role: SwitchRole, asn: u32) {
        self.asns.entry(role).or_insert(asn);
    }

    pub fn get(&self, role: SwitchRole) -> Option<u32> {
        self.asns.get(&role).copied()
    }

    /// AS number of the SDN MUX, if the topology declares one
    pub fn mux(&self) -> Option<u32> {
        self.get(SwitchRole::Mux)
    }
}

/// Switch entries and AS numbers extracted from a topology
#[derive(Debug, Clone, Default)]
pub struct TopologyRegistry {
    switches: BTreeMap<SwitchRole, SwitchEntry>,
    asns: AsnRegistry,
}

impl TopologyRegistry {
    /// Index every recognised switch of the topology.
    ///
    /// Switches with an unknown `Type` are ignored; duplicate roles keep the
    /// first declaration.
    pub fn build(input: &InputData) -> Self {
        let mut registry = TopologyRegistry::default();

        for sw in &input.switches {
            let role = match sw.switch_type.parse::<SwitchRole>() {
                Ok(role) => role,
                Err(_) => {
                    debug!("Ignoring switch '{}' with unsupported type '{}'", sw.hostname, sw.switch_type);
                    continue;
                }
            };

            if let Some(asn) = sw.asn {
                registry.asns.register(role, asn);
            }

            if registry.switches.contains_key(&role) {
                warn!("Duplicate {} switch '{}' ignored", role, sw.hostname);
                continue;
            }

            let entry = SwitchEntry::from_definition(role, sw, input.site.as_deref());
            registry.switches.insert(role, entry);
        }

        registry
    }

    /// Switch entry for a role; `None` means "no such switch, skip"
    pub fn switch(&self, role: SwitchRole) -> Option<&SwitchEntry> {
        self.switches.get(&role)
    }

    pub fn asns(&self) -> &AsnRegistry {
        &self.asns
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}
