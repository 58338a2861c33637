//! Symbol resolution for VLAN reference strings.
//!
//! A reference string is a `,`/`|`-separated list of role symbols and
//! literal VLAN IDs, e.g. `"M,C|S,99"`. Each token expands to VLAN IDs:
//!
//! - `S` takes the leaf storage list of the switch (`S1` on TOR1, `S2` on
//!   TOR2) and falls back to the generic storage list when that is empty
//! - `S1` / `S2` and every other role symbol take their own list
//! - purely numeric tokens are kept as-is
//! - anything else is dropped
//!
//! Expansions are concatenated in token order and de-duplicated keeping the
//! first occurrence.

use crate::classify::{RoleSymbol, VlanMap};
use crate::topology::SwitchRole;
use crate::utils::dedup::dedup_preserving_order;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,|]").expect("Invalid separator regex"));

/// Resolve a reference string to a comma-joined VLAN ID list.
///
/// An empty result means nothing in the string resolved.
///
/// # Examples
/// ```
/// use switchgen::classify::{RoleSymbol, VlanMap};
/// use switchgen::resolve::symbols::resolve_symbols;
/// use switchgen::topology::SwitchRole;
///
/// let mut vlans = VlanMap::new();
/// vlans.push(RoleSymbol::Management, 7);
/// vlans.push(RoleSymbol::Compute, 201);
///
/// assert_eq!(resolve_symbols("M|C,99,M", &vlans, SwitchRole::Tor1), "7,201,99");
/// assert_eq!(resolve_symbols("BOGUS", &vlans, SwitchRole::Tor1), "");
/// ```
pub fn resolve_symbols(raw: &str, vlans: &VlanMap, role: SwitchRole) -> String {
    let expanded = SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .flat_map(|token| expand_token(token, vlans, role));

    dedup_preserving_order(expanded).join(",")
}

/// Expand one token to the VLAN IDs it stands for
pub fn expand_token(token: &str, vlans: &VlanMap, role: SwitchRole) -> Vec<String> {
    if is_numeric(token) {
        return vec![token.to_string()];
    }

    let Some(symbol) = RoleSymbol::from_symbol(token) else {
        debug!("{}: dropping unknown VLAN symbol '{}'", role, token);
        return Vec::new();
    };

    let ids = if symbol == RoleSymbol::Storage {
        storage_for(vlans, role)
    } else {
        vlans.get(symbol)
    };

    ids.iter().map(u16::to_string).collect()
}

/// Storage VLANs for `S` on a given switch
fn storage_for(vlans: &VlanMap, role: SwitchRole) -> &[u16] {
    match RoleSymbol::leaf_storage_for(role) {
        Some(leaf) if vlans.is_populated(leaf) => vlans.get(leaf),
        _ => vlans.get(RoleSymbol::Storage),
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
