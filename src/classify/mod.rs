//! Network group classification.
//!
//! Turns loosely named topology groups into semantic roles (`M`, `C`, `S`,
//! `S1`, `S2`, ...), the VLAN and address maps keyed by those roles, and the
//! VLAN section of the switch document.

pub mod role;
pub mod maps;
pub mod classifier;
pub mod vlans;

// Re-export commonly used types
pub use role::{classify_group_name, classify_leaf_storage, ClassificationRule, RoleSymbol, GROUP_RULES};
pub use maps::{AddressKey, AddressMap, VlanMap};
pub use classifier::{classify, Classification, ClassifiedGroup};
pub use vlans::{build_vlan_section, Redundancy, RedundancyType, SviInterface, VlanEntry};
