//! BGP section synthesis.
//!
//! Derives the advertised networks and the neighbor list of a leaf switch
//! from its address map and the ASN registry. BMC switches carry no BGP.

pub mod types;
pub mod synthesizer;

pub use types::{
    default_prefix_lists, AddressFamilyPolicy, BgpDocument, BgpNeighbor, PrefixAction, PrefixListEntry, PrefixLists,
    DEFAULT_ROUTE_LIST, LOOPBACK_INTERFACE,
};
pub use synthesizer::{build_bgp, synthesize_neighbors, synthesize_networks};
