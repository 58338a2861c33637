//! Shared utilities: validation, IP helpers, order-preserving de-duplication.

pub mod dedup;
pub mod ip_utils;
pub mod validation;

pub use dedup::dedup_preserving_order;
pub use validation::{validate_interfaces, validate_port_channels, validate_role_vlans};
