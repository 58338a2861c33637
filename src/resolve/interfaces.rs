//! Interface resolution.

use super::{awaits_address, resolve_field, ResolveContext};
use crate::classify::AddressKey;
use crate::template::{InterfaceKind, InterfaceTemplate};
use log::warn;
use serde::Serialize;

/// An interface template with its symbolic fields replaced.
///
/// Serializes as the resolved interface; the untouched template is kept for
/// error reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedInterface {
    pub interface: InterfaceTemplate,
    #[serde(skip)]
    pub source: InterfaceTemplate,
}

/// Resolve common templates first, then the variant's templates
pub fn resolve_interfaces(
    common: &[InterfaceTemplate],
    variant: &[InterfaceTemplate],
    ctx: &ResolveContext<'_>,
) -> Vec<ResolvedInterface> {
    common
        .iter()
        .chain(variant.iter())
        .map(|template| resolve_interface(template, ctx))
        .collect()
}

/// Resolve one interface on a fresh copy of its template
pub fn resolve_interface(template: &InterfaceTemplate, ctx: &ResolveContext<'_>) -> ResolvedInterface {
    let mut iface = template.clone();

    match iface.kind {
        InterfaceKind::Access => {
            iface.access_vlan = Some(resolve_field(&template.access_vlan, ctx));
        }
        InterfaceKind::Trunk => {
            iface.native_vlan = Some(resolve_field(&template.native_vlan, ctx));
            iface.tagged_vlans = Some(resolve_field(&template.tagged_vlans, ctx));
        }
        InterfaceKind::L3 => {
            if awaits_address(&template.ipv4) {
                let key = AddressKey::interface(&template.name, ctx.role);
                match ctx.addresses.first(&key) {
                    Some(addr) => iface.ipv4 = Some(addr.to_string()),
                    None => warn!("{}: no address for L3 interface '{}' (key {})", ctx.role, template.name, key),
                }
            }
        }
    }

    ResolvedInterface {
        interface: iface,
        source: template.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{AddressMap, RoleSymbol, VlanMap};
    use crate::topology::SwitchRole;
    use serde_json::Map;

    fn template(name: &str, kind: InterfaceKind) -> InterfaceTemplate {
        InterfaceTemplate {
            name: name.to_string(),
            kind,
            access_vlan: None,
            native_vlan: None,
            tagged_vlans: None,
            ipv4: None,
            extra: Map::new(),
        }
    }

    fn fixture() -> (VlanMap, AddressMap) {
        let mut vlans = VlanMap::new();
        vlans.push(RoleSymbol::Management, 7);
        vlans.push(RoleSymbol::Compute, 201);
        vlans.push(RoleSymbol::StorageLeaf1, 711);
        vlans.push(RoleSymbol::Unused, 2);

        let mut addresses = AddressMap::new();
        addresses.push(AddressKey::interface("P2P_Border1", SwitchRole::Tor1), "100.71.85.2/30");
        (vlans, addresses)
    }

    #[test]
    fn test_trunk_resolution() {
        let (vlans, addresses) = fixture();
        let ctx = ResolveContext { role: SwitchRole::Tor1, vlans: &vlans, addresses: &addresses };

        let mut trunk = template("HyperConverged", InterfaceKind::Trunk);
        trunk.native_vlan = Some("M".to_string());
        trunk.tagged_vlans = Some("M,C,S".to_string());

        let resolved = resolve_interface(&trunk, &ctx);
        assert_eq!(resolved.interface.native_vlan.as_deref(), Some("7"));
        assert_eq!(resolved.interface.tagged_vlans.as_deref(), Some("7,201,711"));
        // template left intact
        assert_eq!(trunk.tagged_vlans.as_deref(), Some("M,C,S"));
        assert_eq!(resolved.source, trunk);
    }

    #[test]
    fn test_access_resolution() {
        let (vlans, addresses) = fixture();
        let ctx = ResolveContext { role: SwitchRole::Tor1, vlans: &vlans, addresses: &addresses };

        let mut access = template("Unused", InterfaceKind::Access);
        access.access_vlan = Some("UNUSED".to_string());
        assert_eq!(resolve_interface(&access, &ctx).interface.access_vlan.as_deref(), Some("2"));

        let missing = template("NoVlan", InterfaceKind::Access);
        assert_eq!(resolve_interface(&missing, &ctx).interface.access_vlan.as_deref(), Some(""));
    }

    #[test]
    fn test_l3_lookup_by_name_and_role() {
        let (vlans, addresses) = fixture();
        let ctx = ResolveContext { role: SwitchRole::Tor1, vlans: &vlans, addresses: &addresses };

        let mut p2p = template("P2P_Border1", InterfaceKind::L3);
        p2p.ipv4 = Some(String::new());
        assert_eq!(resolve_interface(&p2p, &ctx).interface.ipv4.as_deref(), Some("100.71.85.2/30"));

        let mut fixed = template("P2P_Border1", InterfaceKind::L3);
        fixed.ipv4 = Some("192.0.2.1/30".to_string());
        assert_eq!(resolve_interface(&fixed, &ctx).interface.ipv4.as_deref(), Some("192.0.2.1/30"));

        let mut absent = template("P2P_Border2", InterfaceKind::L3);
        absent.ipv4 = Some(String::new());
        assert_eq!(resolve_interface(&absent, &ctx).interface.ipv4.as_deref(), Some(""));
    }

    #[test]
    fn test_l3_without_ipv4_key_is_not_filled() {
        let (vlans, addresses) = fixture();
        let ctx = ResolveContext { role: SwitchRole::Tor1, vlans: &vlans, addresses: &addresses };

        let undeclared = template("P2P_Border1", InterfaceKind::L3);
        let resolved = resolve_interface(&undeclared, &ctx);
        assert_eq!(resolved.interface.ipv4, None);

        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json, serde_json::json!({"name": "P2P_Border1", "type": "L3"}));
    }

    #[test]
    fn test_common_templates_come_first() {
        let (vlans, addresses) = fixture();
        let ctx = ResolveContext { role: SwitchRole::Tor1, vlans: &vlans, addresses: &addresses };

        let common = vec![template("Loopback0", InterfaceKind::L3)];
        let mut host = template("HyperConverged", InterfaceKind::Trunk);
        host.native_vlan = Some("M".to_string());
        host.tagged_vlans = Some("C".to_string());

        let resolved = resolve_interfaces(&common, &[host], &ctx);
        let names: Vec<&str> = resolved.iter().map(|r| r.interface.name.as_str()).collect();
        assert_eq!(names, vec!["Loopback0", "HyperConverged"]);
    }

    #[test]
    fn test_resolved_interface_serializes_as_interface() {
        let (vlans, addresses) = fixture();
        let ctx = ResolveContext { role: SwitchRole::Tor1, vlans: &vlans, addresses: &addresses };
        let mut access = template("Unused", InterfaceKind::Access);
        access.access_vlan = Some("UNUSED".to_string());

        let json = serde_json::to_value(resolve_interface(&access, &ctx)).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Unused", "type": "Access", "access_vlan": "2"}));
    }
}
