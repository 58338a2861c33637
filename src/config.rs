use crate::topology::SwitchRole;
use serde::{Deserialize, Serialize};

/// Default MTU applied to SVIs
pub const JUMBO_MTU: u32 = 9216;
/// Redundancy priority of the first leaf
pub const REDUNDANCY_PRIORITY_ACTIVE: u32 = 150;
/// Redundancy priority of the second leaf
pub const REDUNDANCY_PRIORITY_STANDBY: u32 = 140;
/// Hop limit for the multihop session towards the SDN MUX
pub const DEFAULT_EBGP_MULTIHOP: u8 = 3;

/// Generator settings, loaded from an optional YAML file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Switch roles to generate documents for
    pub target_roles: Vec<String>,
    pub jumbo_mtu: u32,
    pub priority_active: u32,
    pub priority_standby: u32,
    pub ebgp_multihop: u8,
    /// Embed the VLAN / address maps in every document for diagnostics
    pub include_debug_maps: bool,
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.target_roles.is_empty() {
            return Err(ValidationError::InvalidRoles(
                "target_roles cannot be empty".to_string(),
            ));
        }

        for name in &self.target_roles {
            if let Err(e) = name.parse::<SwitchRole>() {
                return Err(ValidationError::InvalidRoles(e));
            }
        }

        if self.jumbo_mtu == 0 {
            return Err(ValidationError::InvalidInterface(
                "jumbo_mtu must be greater than zero".to_string(),
            ));
        }

        if self.priority_active <= self.priority_standby {
            return Err(ValidationError::InvalidRedundancy(format!(
                "priority_active ({}) must be greater than priority_standby ({})",
                self.priority_active, self.priority_standby
            )));
        }

        if self.ebgp_multihop == 0 {
            return Err(ValidationError::InvalidRouting(
                "ebgp_multihop must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Parsed target roles, in declaration order without repeats
    pub fn roles(&self) -> Result<Vec<SwitchRole>, ValidationError> {
        let mut roles = Vec::new();
        for name in &self.target_roles {
            let role = name.parse::<SwitchRole>().map_err(ValidationError::InvalidRoles)?;
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        Ok(roles)
    }

    /// Redundancy priority of a leaf switch
    pub fn priority_for(&self, role: SwitchRole) -> u32 {
        if role == SwitchRole::Tor1 {
            self.priority_active
        } else {
            self.priority_standby
        }
    }
}

/// Settings validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid role selection: {0}")]
    InvalidRoles(String),
    #[error("Invalid interface settings: {0}")]
    InvalidInterface(String),
    #[error("Invalid redundancy settings: {0}")]
    InvalidRedundancy(String),
    #[error("Invalid routing settings: {0}")]
    InvalidRouting(String),
}

/// Default implementations
impl Default for Settings {
    fn default() -> Self {
        Self {
            target_roles: SwitchRole::TARGETS.iter().map(|r| r.as_str().to_string()).collect(),
            jumbo_mtu: JUMBO_MTU,
            priority_active: REDUNDANCY_PRIORITY_ACTIVE,
            priority_standby: REDUNDANCY_PRIORITY_STANDBY,
            ebgp_multihop: DEFAULT_EBGP_MULTIHOP,
            include_debug_maps: false,
        }
    }
}
