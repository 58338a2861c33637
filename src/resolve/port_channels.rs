//! Port-channel resolution.

use super::{awaits_address, resolve_field, ResolveContext};
use crate::classify::AddressKey;
use crate::template::{InterfaceKind, PortChannelTemplate};
use log::{debug, warn};
use serde::Serialize;

/// Description marking the port-channel that carries the iBGP peer link
pub const IBGP_MARKER: &str = "P2P_IBGP";

/// A port-channel template with its symbolic fields replaced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedPortChannel {
    pub port_channel: PortChannelTemplate,
    #[serde(skip)]
    pub source: PortChannelTemplate,
}

impl ResolvedPortChannel {
    pub fn is_ibgp(&self) -> bool {
        is_ibgp_link(&self.source)
    }
}

/// True if a port-channel template carries the iBGP peer link
pub fn is_ibgp_link(template: &PortChannelTemplate) -> bool {
    template.description.trim().to_uppercase().contains(IBGP_MARKER)
}

pub fn resolve_port_channels(templates: &[PortChannelTemplate], ctx: &ResolveContext<'_>) -> Vec<ResolvedPortChannel> {
    templates
        .iter()
        .map(|template| resolve_port_channel(template, ctx))
        .collect()
}

/// Resolve one port-channel on a fresh copy of its template.
///
/// Trunks get their VLAN symbols resolved. The iBGP L3 port-channel gets
/// this switch's side of the peer link when the template leaves it blank.
pub fn resolve_port_channel(template: &PortChannelTemplate, ctx: &ResolveContext<'_>) -> ResolvedPortChannel {
    let mut pc = template.clone();

    match pc.kind {
        InterfaceKind::Trunk => {
            pc.native_vlan = Some(resolve_field(&template.native_vlan, ctx));
            pc.tagged_vlans = Some(resolve_field(&template.tagged_vlans, ctx));
        }
        InterfaceKind::L3 if is_ibgp_link(template) => {
            if awaits_address(&template.ipv4) {
                let key = AddressKey::interface(IBGP_MARKER, ctx.role);
                match ctx.addresses.first(&key) {
                    Some(addr) => pc.ipv4 = Some(addr.to_string()),
                    None => warn!("{}: no iBGP address for port-channel {} (key {})", ctx.role, template.id, key),
                }
            }
        }
        InterfaceKind::L3 | InterfaceKind::Access => {
            debug!("{}: port-channel {} left as declared", ctx.role, template.id);
        }
    }

    ResolvedPortChannel {
        port_channel: pc,
        source: template.clone(),
    }
}
