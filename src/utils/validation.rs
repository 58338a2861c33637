//! Generation validation utilities.
//!
//! Role-presence checks run after classification; completeness checks run
//! on the resolved interfaces and port-channels before the document is
//! assembled. A failure aborts the affected switch role only.

use crate::classify::{RoleSymbol, VlanMap};
use crate::error::GenerateError;
use crate::resolve::{is_blank, ResolvedInterface, ResolvedPortChannel};
use crate::template::{InterfaceKind, TemplateVariant};
use crate::topology::SwitchRole;
use log::warn;

/// Check that the roles a switch depends on are present in the topology.
///
/// Every switch needs its management VLANs (`M` for leaves, `BMC` for the
/// BMC switch). Leaf switches also need compute VLANs, except for the
/// management-only access variant of a fully converged deployment. The BMC
/// switch has no variant and never depends on the deployment pattern.
///
/// # Examples
/// ```
/// use switchgen::classify::{RoleSymbol, VlanMap};
/// use switchgen::template::TemplateVariant;
/// use switchgen::topology::SwitchRole;
/// use switchgen::utils::validation::validate_role_vlans;
///
/// let mut vlans = VlanMap::new();
/// vlans.push(RoleSymbol::Management, 7);
///
/// let access = Some(TemplateVariant::FullyConvergedAccess);
/// assert!(validate_role_vlans(SwitchRole::Tor1, access, &vlans).is_ok());
/// assert!(validate_role_vlans(SwitchRole::Tor1, Some(TemplateVariant::Switched), &vlans).is_err());
/// ```
pub fn validate_role_vlans(
    role: SwitchRole,
    variant: Option<TemplateVariant>,
    vlans: &VlanMap,
) -> Result<(), GenerateError> {
    let management = RoleSymbol::management_for(role);
    if !vlans.is_populated(management) {
        return Err(GenerateError::MissingRoleVlans {
            role,
            symbol: management,
            reason: "management network is required",
        });
    }

    if !role.is_leaf() || vlans.is_populated(RoleSymbol::Compute) {
        return Ok(());
    }

    match variant {
        Some(TemplateVariant::FullyConvergedAccess) => Ok(()),
        Some(TemplateVariant::FullyConvergedTrunk) => Err(GenerateError::MissingRoleVlans {
            role,
            symbol: RoleSymbol::Compute,
            reason: "trunk host ports carry compute traffic",
        }),
        Some(TemplateVariant::Switched | TemplateVariant::Switchless) | None => Err(GenerateError::MissingRoleVlans {
            role,
            symbol: RoleSymbol::Compute,
            reason: "compute network is required",
        }),
    }
}

/// Every Access interface needs a VLAN; every Trunk needs native and tagged VLANs
pub fn validate_interfaces(role: SwitchRole, interfaces: &[ResolvedInterface]) -> Result<(), GenerateError> {
    for resolved in interfaces {
        let iface = &resolved.interface;
        let source = &resolved.source;

        let checks: Vec<(&'static str, &Option<String>, &Option<String>)> = match iface.kind {
            InterfaceKind::Access => vec![("access_vlan", &iface.access_vlan, &source.access_vlan)],
            InterfaceKind::Trunk => vec![
                ("native_vlan", &iface.native_vlan, &source.native_vlan),
                ("tagged_vlans", &iface.tagged_vlans, &source.tagged_vlans),
            ],
            InterfaceKind::L3 => Vec::new(),
        };

        for (field, value, symbols) in checks {
            if is_blank(value) {
                return Err(GenerateError::UnresolvedInterface {
                    role,
                    interface: iface.name.clone(),
                    kind: iface.kind,
                    field,
                    symbols: symbols.clone().unwrap_or_default(),
                });
            }
        }
    }

    Ok(())
}

/// Trunk port-channels need a native VLAN; an empty tagged list only warns
pub fn validate_port_channels(role: SwitchRole, port_channels: &[ResolvedPortChannel]) -> Result<(), GenerateError> {
    for resolved in port_channels {
        let pc = &resolved.port_channel;
        if pc.kind != InterfaceKind::Trunk {
            continue;
        }

        if is_blank(&pc.native_vlan) {
            return Err(GenerateError::UnresolvedPortChannel {
                role,
                id: pc.id,
                description: pc.description.clone(),
                field: "native_vlan",
                symbols: resolved.source.native_vlan.clone().unwrap_or_default(),
            });
        }

        if is_blank(&pc.tagged_vlans) {
            warn!(
                "{}: port-channel {} ('{}') has no tagged VLANs after resolving '{}'",
                role,
                pc.id,
                pc.description,
                resolved.source.tagged_vlans.as_deref().unwrap_or_default()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{InterfaceTemplate, PortChannelTemplate};
    use serde_json::Map;

    fn vlans(entries: &[(RoleSymbol, u16)]) -> VlanMap {
        let mut map = VlanMap::new();
        for (role, id) in entries {
            map.push(*role, *id);
        }
        map
    }

    fn trunk(name: &str, native: &str, tagged: &str, source_tagged: &str) -> ResolvedInterface {
        let base = InterfaceTemplate {
            name: name.to_string(),
            kind: InterfaceKind::Trunk,
            access_vlan: None,
            native_vlan: Some("M".to_string()),
            tagged_vlans: Some(source_tagged.to_string()),
            ipv4: None,
            extra: Map::new(),
        };
        let mut resolved = base.clone();
        resolved.native_vlan = Some(native.to_string());
        resolved.tagged_vlans = Some(tagged.to_string());
        ResolvedInterface { interface: resolved, source: base }
    }

    #[test]
    fn test_management_required_for_every_role() {
        let empty = VlanMap::new();
        let err = validate_role_vlans(SwitchRole::Tor1, Some(TemplateVariant::Switched), &empty).unwrap_err();
        assert!(matches!(err, GenerateError::MissingRoleVlans { symbol: RoleSymbol::Management, .. }));

        // BMC checks its own management symbol and nothing else
        let leaf_only = vlans(&[(RoleSymbol::Management, 7)]);
        let err = validate_role_vlans(SwitchRole::Bmc, None, &leaf_only).unwrap_err();
        assert!(matches!(err, GenerateError::MissingRoleVlans { symbol: RoleSymbol::Bmc, .. }));

        let bmc = vlans(&[(RoleSymbol::Bmc, 125)]);
        assert!(validate_role_vlans(SwitchRole::Bmc, None, &bmc).is_ok());
    }

    #[test]
    fn test_compute_rules_by_variant() {
        let mgmt_only = vlans(&[(RoleSymbol::Management, 7)]);
        let access = Some(TemplateVariant::FullyConvergedAccess);
        let trunk_variant = Some(TemplateVariant::FullyConvergedTrunk);

        assert!(validate_role_vlans(SwitchRole::Tor1, access, &mgmt_only).is_ok());
        assert!(validate_role_vlans(SwitchRole::Tor1, trunk_variant, &mgmt_only).is_err());
        assert!(validate_role_vlans(SwitchRole::Tor2, Some(TemplateVariant::Switchless), &mgmt_only).is_err());

        let full = vlans(&[(RoleSymbol::Management, 7), (RoleSymbol::Compute, 201)]);
        assert!(validate_role_vlans(SwitchRole::Tor2, Some(TemplateVariant::Switchless), &full).is_ok());
    }

    #[test]
    fn test_empty_tagged_vlans_names_interface() {
        let interfaces = vec![
            trunk("HyperConverged", "7", "7,201", "M,C"),
            trunk("Storage_Hosts", "7", "", "C,S"),
        ];

        let err = validate_interfaces(SwitchRole::Tor1, &interfaces).unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnresolvedInterface {
                role: SwitchRole::Tor1,
                interface: "Storage_Hosts".to_string(),
                kind: InterfaceKind::Trunk,
                field: "tagged_vlans",
                symbols: "C,S".to_string(),
            }
        );
        assert!(err.to_string().contains("Storage_Hosts"));
    }

    #[test]
    fn test_access_needs_vlan_and_l3_is_skipped() {
        let template = InterfaceTemplate {
            name: "Unused".to_string(),
            kind: InterfaceKind::Access,
            access_vlan: Some("UNUSED".to_string()),
            native_vlan: None,
            tagged_vlans: None,
            ipv4: None,
            extra: Map::new(),
        };
        let mut resolved = template.clone();
        resolved.access_vlan = Some(String::new());
        let access = ResolvedInterface { interface: resolved, source: template.clone() };
        assert!(validate_interfaces(SwitchRole::Tor1, &[access]).is_err());

        let mut l3 = template;
        l3.kind = InterfaceKind::L3;
        l3.access_vlan = None;
        let routed = ResolvedInterface { interface: l3.clone(), source: l3 };
        assert!(validate_interfaces(SwitchRole::Tor1, &[routed]).is_ok());
    }

    #[test]
    fn test_port_channel_trunk_needs_native_only() {
        let template = PortChannelTemplate {
            id: 101,
            description: "ToR_Peer_Link".to_string(),
            kind: InterfaceKind::Trunk,
            native_vlan: Some("NATIVE".to_string()),
            tagged_vlans: Some("S".to_string()),
            ipv4: None,
            extra: Map::new(),
        };

        let mut no_tagged = template.clone();
        no_tagged.native_vlan = Some("99".to_string());
        no_tagged.tagged_vlans = Some(String::new());
        let ok = ResolvedPortChannel { port_channel: no_tagged, source: template.clone() };
        assert!(validate_port_channels(SwitchRole::Tor1, &[ok]).is_ok());

        let mut no_native = template.clone();
        no_native.native_vlan = Some(String::new());
        let bad = ResolvedPortChannel { port_channel: no_native, source: template };
        let err = validate_port_channels(SwitchRole::Tor2, &[bad]).unwrap_err();
        assert!(matches!(err, GenerateError::UnresolvedPortChannel { id: 101, field: "native_vlan", .. }));
    }
}
