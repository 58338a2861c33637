//! VLAN and address maps produced by the classifier.
//!
//! Both maps are ordered-append: values keep topology scan order and
//! duplicates are preserved. Consumers decide whether order or uniqueness
//! matters.

use super::role::RoleSymbol;
use crate::topology::SwitchRole;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// RoleSymbol → VLAN IDs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanMap {
    entries: BTreeMap<RoleSymbol, Vec<u16>>,
}

impl VlanMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: RoleSymbol, vlan_id: u16) {
        self.entries.entry(role).or_default().push(vlan_id);
    }

    /// VLAN IDs of a role in scan order (empty if none)
    pub fn get(&self, role: RoleSymbol) -> &[u16] {
        self.entries.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_populated(&self, role: RoleSymbol) -> bool {
        !self.get(role).is_empty()
    }

    /// True if the generic or either leaf storage list is populated
    pub fn any_storage(&self) -> bool {
        RoleSymbol::ALL
            .iter()
            .filter(|role| role.is_storage())
            .any(|role| self.is_populated(*role))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoleSymbol, &Vec<u16>)> {
        self.entries.iter()
    }
}

impl Serialize for VlanMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(role, ids)| (role.symbol(), ids)))
    }
}

/// Key of an [`AddressMap`] entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressKey {
    /// Subnets of every group classified into a role
    Role(RoleSymbol),
    /// Address of one switch's side of a P2P / loopback group (`P2P_BORDER1_TOR1`)
    Interface(String),
    /// Subnet of a P2P / loopback group, keyed by the group label
    Subnet(String),
    /// First usable address of a P2P / loopback group
    FirstAddress(String),
    /// Last usable address of a P2P / loopback group
    LastAddress(String),
}

impl AddressKey {
    /// Composite `{INTERFACE}_{ROLE}` key, upper-cased
    pub fn interface(name: &str, role: SwitchRole) -> Self {
        AddressKey::Interface(format!("{}_{}", name.trim().to_uppercase(), role.key()))
    }

    pub fn subnet(label: &str) -> Self {
        AddressKey::Subnet(label.trim().to_uppercase())
    }

    pub fn first_address(label: &str) -> Self {
        AddressKey::FirstAddress(label.trim().to_uppercase())
    }

    pub fn last_address(label: &str) -> Self {
        AddressKey::LastAddress(label.trim().to_uppercase())
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKey::Role(role) => write!(f, "{}", role),
            AddressKey::Interface(key) => f.write_str(key),
            AddressKey::Subnet(label) => write!(f, "{}_SUBNET", label),
            AddressKey::FirstAddress(label) => write!(f, "{}_FIRST", label),
            AddressKey::LastAddress(label) => write!(f, "{}_LAST", label),
        }
    }
}

/// AddressKey → address / subnet strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressMap {
    entries: BTreeMap<AddressKey, Vec<String>>,
}

impl AddressMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: AddressKey, value: impl Into<String>) {
        self.entries.entry(key).or_default().push(value.into());
    }

    pub fn get(&self, key: &AddressKey) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First non-blank value stored under a key
    pub fn first(&self, key: &AddressKey) -> Option<&str> {
        self.get(key)
            .iter()
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AddressMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, values)| (key.to_string(), values)))
    }
}
