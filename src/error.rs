//! Errors raised while generating a switch document.
//!
//! Every variant is terminal for the switch role it names and never retried;
//! other roles keep generating.

use crate::classify::RoleSymbol;
use crate::template::InterfaceKind;
use crate::topology::SwitchRole;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    // Input errors
    #[error("{role}: unknown deployment pattern '{pattern}'")]
    UnknownPattern { role: SwitchRole, pattern: String },

    #[error("{role}: topology defines no {symbol} VLANs ({reason})")]
    MissingRoleVlans {
        role: SwitchRole,
        symbol: RoleSymbol,
        reason: &'static str,
    },

    #[error("{role}: switch declares no ASN")]
    MissingAsn { role: SwitchRole },

    #[error("{role}: topology has no address for '{key}'")]
    MissingAddress { role: SwitchRole, key: String },

    // Resolution errors
    #[error("{role}: interface '{interface}' ({kind}) has empty {field} after resolving '{symbols}'")]
    UnresolvedInterface {
        role: SwitchRole,
        interface: String,
        kind: InterfaceKind,
        field: &'static str,
        symbols: String,
    },

    #[error("{role}: port-channel {id} ('{description}') has empty {field} after resolving '{symbols}'")]
    UnresolvedPortChannel {
        role: SwitchRole,
        id: u32,
        description: String,
        field: &'static str,
        symbols: String,
    },

    // Template-catalog errors
    #[error("{role}: no interface template for {make}/{model}")]
    MissingTemplate {
        role: SwitchRole,
        make: String,
        model: String,
    },

    #[error("{role}: interface template {make}/{model} has no '{variant}' interface set")]
    MissingVariant {
        role: SwitchRole,
        make: String,
        model: String,
        variant: String,
    },

    #[error("{role}: interface template {make}/{model} could not be loaded: {reason}")]
    CatalogUnreadable {
        role: SwitchRole,
        make: String,
        model: String,
        reason: String,
    },
}

impl GenerateError {
    /// Switch role the failure belongs to
    pub fn role(&self) -> SwitchRole {
        match self {
            GenerateError::UnknownPattern { role, .. }
            | GenerateError::MissingRoleVlans { role, .. }
            | GenerateError::MissingAsn { role }
            | GenerateError::MissingAddress { role, .. }
            | GenerateError::UnresolvedInterface { role, .. }
            | GenerateError::UnresolvedPortChannel { role, .. }
            | GenerateError::MissingTemplate { role, .. }
            | GenerateError::MissingVariant { role, .. }
            | GenerateError::CatalogUnreadable { role, .. } => *role,
        }
    }
}
