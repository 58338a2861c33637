//! Template resolution.
//!
//! Replaces the symbolic VLAN references and blank L3 addresses of the
//! selected templates with concrete values from one switch's classification.

pub mod symbols;
pub mod interfaces;
pub mod port_channels;

pub use symbols::resolve_symbols;
pub use interfaces::{resolve_interface, resolve_interfaces, ResolvedInterface};
pub use port_channels::{is_ibgp_link, resolve_port_channel, resolve_port_channels, ResolvedPortChannel, IBGP_MARKER};

use crate::classify::{AddressMap, VlanMap};
use crate::topology::SwitchRole;

/// Read-only view of one switch's classification
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub role: SwitchRole,
    pub vlans: &'a VlanMap,
    pub addresses: &'a AddressMap,
}

/// Resolve a symbolic template field; an absent field resolves to ""
pub(crate) fn resolve_field(raw: &Option<String>, ctx: &ResolveContext<'_>) -> String {
    raw.as_deref()
        .map(|raw| resolve_symbols(raw, ctx.vlans, ctx.role))
        .unwrap_or_default()
}

/// True if a field is absent or holds only whitespace
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// True if an L3 template declares `ipv4` as the empty-string sentinel.
///
/// Only a declared, empty address is filled from the address map; a
/// template without an `ipv4` key keeps none.
pub(crate) fn awaits_address(ipv4: &Option<String>) -> bool {
    ipv4.as_deref().is_some_and(|ip| ip.trim().is_empty())
}
