//! # Switchgen - Switch configuration documents from lab topologies
//!
//! This library turns a lab topology (switches, loosely named network
//! groups, a deployment pattern) into one vendor-neutral JSON document per
//! switch role, ready for a downstream config renderer.
//!
//! ## Overview
//!
//! Topology tooling names its network groups freely (`Infrastructure_Mgmt`,
//! `Tenant_02`, `Storage_711_TOR1`). Vendor interface templates refer to
//! networks by role symbol (`M`, `C`, `S`, ...). Switchgen classifies every
//! group into a role, resolves the symbols of the selected templates into
//! concrete VLAN IDs and addresses, derives the BGP section and checks that
//! nothing was left unresolved before a document is written.
//!
//! ## Key Features
//!
//! - **Role classification**: ordered prefix rules, first match wins
//! - **Template variants**: fully converged (trunk / access), switched, switchless
//! - **Symbol resolution**: per-leaf storage lists with a generic fallback
//! - **BGP synthesis**: border, iBGP and SDN MUX neighbors with derived networks
//! - **Fail per role**: a broken role never blocks the others
//! - **Deterministic**: same topology and catalog, same documents
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `topology`: Typed view of the topology input document
//! - `registry`: Switch entries and AS numbers by role
//! - `classify`: Group classification, VLAN/address maps and the VLAN section
//! - `template`: Interface template catalog and variant selection
//! - `resolve`: Symbol, interface and port-channel resolution
//! - `bgp`: BGP networks, neighbors and prefix lists
//! - `document`: Per-switch document assembly
//! - `config`: Generator settings and their validation
//! - `config_loader`: Settings, topology and catalog loading
//! - `error`: Per-role generation errors
//! - `utils`: Validation, IP and de-duplication helpers
//! - `orchestrator`: High-level orchestration of document generation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use switchgen::config_loader::{self, DirectoryCatalog};
//! use switchgen::orchestrator::{generate_all, write_documents};
//!
//! let settings = config_loader::load_settings(None)?;
//! let input = config_loader::load_topology(Path::new("input/lab_input.json"))?;
//! let catalog = DirectoryCatalog::new("input/switch_interface_templates");
//!
//! let outcomes = generate_all(&input, &settings.roles()?, &catalog, &settings);
//! let report = write_documents(outcomes, Path::new("output"))?;
//!
//! // The output directory now contains one {hostname}.json per switch
//! println!("{} documents written", report.written.len());
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Document Format
//!
//! ```json
//! {
//!   "switch": { "make": "cisco", "model": "93180yc-fx", "type": "TOR1", "hostname": "...", "firmware": "nxos" },
//!   "vlans": [ { "vlan_id": 7, "name": "Infra_7", "interface": { "ip": "100.69.177.2", "cidr": 24, "mtu": 9216 } } ],
//!   "interfaces": [ { "name": "HyperConverged", "type": "Trunk", "native_vlan": "7", "tagged_vlans": "7,201,711" } ],
//!   "port_channels": [ { "id": 50, "description": "P2P_IBGP", "type": "L3", "ipv4": "100.71.85.17/30" } ],
//!   "bgp": { "asn": 65242, "router_id": "100.71.85.21", "networks": [], "neighbors": [] },
//!   "prefix_lists": { "DefaultRoute": [] },
//!   "qos": true
//! }
//! ```
//!
//! ## Error Handling
//!
//! Generation failures are typed (`error::GenerateError`) and scoped to one
//! switch role. Loading and writing use `color_eyre` for error reporting
//! with context.

pub mod config;
pub mod config_loader;
pub mod topology;
pub mod registry;
pub mod classify;
pub mod template;
pub mod resolve;
pub mod bgp;
pub mod document;
pub mod error;
pub mod utils;
pub mod orchestrator;
