//! Semantic role symbols and the group classification rules.

use crate::topology::SwitchRole;
use std::fmt;

/// Semantic role of a network group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleSymbol {
    /// Management / infrastructure (`M`)
    Management,
    /// Compute / tenant traffic (`C`)
    Compute,
    /// Generic storage (`S`)
    Storage,
    /// Storage carried by the first leaf (`S1`)
    StorageLeaf1,
    /// Storage carried by the second leaf (`S2`)
    StorageLeaf2,
    Unused,
    Native,
    /// Provider address space of the SDN load balancer (`HNVPA`)
    Hnvpa,
    /// Out-of-band management network of the BMC switch
    Bmc,
}

impl RoleSymbol {
    pub const ALL: [RoleSymbol; 9] = [
        RoleSymbol::Management,
        RoleSymbol::Compute,
        RoleSymbol::Storage,
        RoleSymbol::StorageLeaf1,
        RoleSymbol::StorageLeaf2,
        RoleSymbol::Unused,
        RoleSymbol::Native,
        RoleSymbol::Hnvpa,
        RoleSymbol::Bmc,
    ];

    /// Token used for this role inside interface templates
    pub fn symbol(&self) -> &'static str {
        match self {
            RoleSymbol::Management => "M",
            RoleSymbol::Compute => "C",
            RoleSymbol::Storage => "S",
            RoleSymbol::StorageLeaf1 => "S1",
            RoleSymbol::StorageLeaf2 => "S2",
            RoleSymbol::Unused => "UNUSED",
            RoleSymbol::Native => "NATIVE",
            RoleSymbol::Hnvpa => "HNVPA",
            RoleSymbol::Bmc => "BMC",
        }
    }

    /// Parse a template token (case-insensitive)
    pub fn from_symbol(token: &str) -> Option<RoleSymbol> {
        let token = token.trim();
        RoleSymbol::ALL
            .into_iter()
            .find(|role| role.symbol().eq_ignore_ascii_case(token))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, RoleSymbol::Storage | RoleSymbol::StorageLeaf1 | RoleSymbol::StorageLeaf2)
    }

    /// Leaf-specific storage list for a switch role (`S1` on TOR1, `S2` on TOR2)
    pub fn leaf_storage_for(role: SwitchRole) -> Option<RoleSymbol> {
        match role {
            SwitchRole::Tor1 => Some(RoleSymbol::StorageLeaf1),
            SwitchRole::Tor2 => Some(RoleSymbol::StorageLeaf2),
            _ => None,
        }
    }

    /// Role whose VLANs must exist for a switch to be generated at all
    pub fn management_for(role: SwitchRole) -> RoleSymbol {
        if role == SwitchRole::Bmc {
            RoleSymbol::Bmc
        } else {
            RoleSymbol::Management
        }
    }
}

impl fmt::Display for RoleSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single prefix → role classification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub prefix: &'static str,
    pub role: RoleSymbol,
}

/// Group-name rules, evaluated top to bottom; the first match wins.
pub const GROUP_RULES: &[ClassificationRule] = &[
    ClassificationRule { prefix: "HNVPA", role: RoleSymbol::Hnvpa },
    ClassificationRule { prefix: "INFRA", role: RoleSymbol::Management },
    ClassificationRule { prefix: "TENANT", role: RoleSymbol::Compute },
    ClassificationRule { prefix: "L3FORWARD", role: RoleSymbol::Compute },
    ClassificationRule { prefix: "STORAGE", role: RoleSymbol::Storage },
    ClassificationRule { prefix: "UNUSED", role: RoleSymbol::Unused },
    ClassificationRule { prefix: "NATIVE", role: RoleSymbol::Native },
    ClassificationRule { prefix: "BMC", role: RoleSymbol::Bmc },
];

/// Classify a group by its category label
pub fn classify_group_name(group_name: &str) -> Option<RoleSymbol> {
    let upper = group_name.trim().to_uppercase();
    GROUP_RULES
        .iter()
        .find(|rule| upper.starts_with(rule.prefix))
        .map(|rule| rule.role)
}

/// Classify a group into a leaf storage role by the suffix of its display name
pub fn classify_leaf_storage(display_name: &str) -> Option<RoleSymbol> {
    let upper = display_name.trim().to_uppercase();
    if upper.ends_with("TOR1") {
        Some(RoleSymbol::StorageLeaf1)
    } else if upper.ends_with("TOR2") {
        Some(RoleSymbol::StorageLeaf2)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_prefix_rules() {
        assert_eq!(classify_group_name("Infrastructure_Mgmt"), Some(RoleSymbol::Management));
        assert_eq!(classify_group_name("infrastructure_south"), Some(RoleSymbol::Management));
        assert_eq!(classify_group_name("Tenant_02"), Some(RoleSymbol::Compute));
        assert_eq!(classify_group_name("L3forward_1"), Some(RoleSymbol::Compute));
        assert_eq!(classify_group_name("HNVPA_Pool"), Some(RoleSymbol::Hnvpa));
        assert_eq!(classify_group_name("Storage"), Some(RoleSymbol::Storage));
        assert_eq!(classify_group_name("UNUSED_VLAN"), Some(RoleSymbol::Unused));
        assert_eq!(classify_group_name("NATIVE_VLAN"), Some(RoleSymbol::Native));
        assert_eq!(classify_group_name("BMC"), Some(RoleSymbol::Bmc));
        assert_eq!(classify_group_name("P2P_BORDER1_TOR1"), None);
    }

    #[test]
    fn test_leaf_storage_suffix() {
        assert_eq!(classify_leaf_storage("Storage_711_TOR1"), Some(RoleSymbol::StorageLeaf1));
        assert_eq!(classify_leaf_storage("storage_712_tor2"), Some(RoleSymbol::StorageLeaf2));
        assert_eq!(classify_leaf_storage("Storage_711"), None);
    }

    #[test]
    fn test_symbol_round_trip() {
        for role in RoleSymbol::ALL {
            assert_eq!(RoleSymbol::from_symbol(role.symbol()), Some(role));
        }
        assert_eq!(RoleSymbol::from_symbol("m"), Some(RoleSymbol::Management));
        assert_eq!(RoleSymbol::from_symbol("X"), None);
    }
}
