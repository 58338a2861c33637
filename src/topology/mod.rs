//! Topology input module.
//!
//! Typed view of the lab definition document: switches, network groups
//! (supernets), switch roles and deployment patterns.

pub mod types;

// Re-export key types for easier access
pub use types::{
    Assignment, DeploymentPattern, InputData, Ipv4Block, Supernet, SwitchDefinition, SwitchRole,
    TopologyDocument,
};
