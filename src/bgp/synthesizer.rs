//! BGP network and neighbor synthesis for leaf switches.

use super::types::{AddressFamilyPolicy, BgpDocument, BgpNeighbor, DEFAULT_ROUTE_LIST, LOOPBACK_INTERFACE};
use crate::classify::{AddressKey, AddressMap, RoleSymbol, VlanEntry};
use crate::config::Settings;
use crate::error::GenerateError;
use crate::registry::AsnRegistry;
use crate::resolve::IBGP_MARKER;
use crate::topology::SwitchRole;
use crate::utils::dedup::dedup_preserving_order;
use crate::utils::ip_utils::{anchor_slash30, host_route, network_of, network_of_cidr, strip_prefix_len};
use log::{debug, warn};

/// Border switches a leaf peers with, in neighbor order
const BORDERS: [SwitchRole; 2] = [SwitchRole::Border1, SwitchRole::Border2];

/// Loopback interface name as it appears in the topology
const LOOPBACK_GROUP: &str = "LOOPBACK0";

/// Build the BGP section of a leaf switch.
///
/// Fails when the switch has no ASN or no loopback address; individual
/// neighbors without an address or ASN are skipped.
pub fn build_bgp(
    role: SwitchRole,
    addresses: &AddressMap,
    vlans: &[VlanEntry],
    asns: &AsnRegistry,
    settings: &Settings,
) -> Result<BgpDocument, GenerateError> {
    let asn = asns.get(role).ok_or(GenerateError::MissingAsn { role })?;

    let loopback_key = AddressKey::interface(LOOPBACK_GROUP, role);
    let loopback = addresses.first(&loopback_key).ok_or_else(|| GenerateError::MissingAddress {
        role,
        key: loopback_key.to_string(),
    })?;

    let bgp = BgpDocument {
        asn,
        router_id: strip_prefix_len(loopback).to_string(),
        networks: synthesize_networks(role, addresses, vlans),
        neighbors: synthesize_neighbors(role, asn, addresses, asns, settings),
    };
    debug!("{} BGP: {} networks, {} neighbors", role, bgp.networks.len(), bgp.neighbors.len());
    Ok(bgp)
}

/// Networks a leaf advertises, in order:
/// border P2P subnets, loopback host route, iBGP peer-link subnet,
/// SVI subnets, then compute subnets. Duplicates keep their first position.
pub fn synthesize_networks(role: SwitchRole, addresses: &AddressMap, vlans: &[VlanEntry]) -> Vec<String> {
    let mut networks: Vec<Option<String>> = Vec::new();

    for border in BORDERS {
        networks.push(border_subnet(role, border, addresses));
    }

    networks.push(
        addresses
            .first(&AddressKey::interface(LOOPBACK_GROUP, role))
            .and_then(host_route),
    );

    if let Some(peer) = role.peer() {
        networks.push(
            addresses
                .first(&AddressKey::interface(IBGP_MARKER, peer))
                .and_then(anchor_slash30),
        );
    }

    for vlan in vlans {
        if let Some(svi) = &vlan.interface {
            networks.push(network_of(&svi.ip, svi.cidr));
        }
    }

    networks.extend(
        addresses
            .get(&AddressKey::Role(RoleSymbol::Compute))
            .iter()
            .map(|subnet| network_of_cidr(subnet).or_else(|| Some(subnet.trim().to_string()))),
    );

    let present = networks
        .into_iter()
        .flatten()
        .filter(|network| !network.trim().is_empty());
    dedup_preserving_order(present)
}

/// Subnet of the link between a leaf and a border switch
fn border_subnet(role: SwitchRole, border: SwitchRole, addresses: &AddressMap) -> Option<String> {
    let label = format!("P2P_{}_{}", border.key(), role.key());
    if let Some(subnet) = addresses.first(&AddressKey::subnet(&label)) {
        return network_of_cidr(subnet).or_else(|| Some(subnet.to_string()));
    }

    let link = format!("P2P_{}", border.key());
    addresses
        .first(&AddressKey::interface(&link, role))
        .and_then(network_of_cidr)
}

/// Neighbors in order: Border1, Border2, iBGP peer, then the MUX when one
/// is registered
pub fn synthesize_neighbors(
    role: SwitchRole,
    asn: u32,
    addresses: &AddressMap,
    asns: &AsnRegistry,
    settings: &Settings,
) -> Vec<BgpNeighbor> {
    let mut neighbors = Vec::new();

    for border in BORDERS {
        // the border's side of the link is keyed from its own point of view
        let key = AddressKey::interface(&format!("P2P_{}", role.key()), border);
        let Some(ip) = addresses.first(&key) else {
            warn!("{}: skipping {} neighbor, no address under {}", role, border, key);
            continue;
        };
        let Some(remote_as) = asns.get(border) else {
            warn!("{}: skipping {} neighbor, {} declares no ASN", role, border, border);
            continue;
        };

        neighbors.push(BgpNeighbor {
            ip: strip_prefix_len(ip).to_string(),
            description: format!("TO_{}", border),
            remote_as,
            update_source: None,
            ebgp_multihop: None,
            af_ipv4_unicast: AddressFamilyPolicy {
                prefix_list_in: Some(DEFAULT_ROUTE_LIST.to_string()),
                prefix_list_out: None,
            },
        });
    }

    if let Some(peer) = role.peer() {
        let key = AddressKey::interface(IBGP_MARKER, peer);
        match addresses.first(&key) {
            Some(ip) => neighbors.push(BgpNeighbor {
                ip: strip_prefix_len(ip).to_string(),
                description: "iBGP_PEER".to_string(),
                remote_as: asn,
                update_source: None,
                ebgp_multihop: None,
                af_ipv4_unicast: AddressFamilyPolicy::default(),
            }),
            None => warn!("{}: skipping iBGP neighbor, no address under {}", role, key),
        }
    }

    if let Some(mux_asn) = asns.mux() {
        match addresses.first(&AddressKey::Role(RoleSymbol::Hnvpa)) {
            Some(subnet) => neighbors.push(BgpNeighbor {
                ip: subnet.to_string(),
                description: "TO_HNVPA".to_string(),
                remote_as: mux_asn,
                update_source: Some(LOOPBACK_INTERFACE.to_string()),
                ebgp_multihop: Some(settings.ebgp_multihop),
                af_ipv4_unicast: AddressFamilyPolicy {
                    prefix_list_in: None,
                    prefix_list_out: Some(DEFAULT_ROUTE_LIST.to_string()),
                },
            }),
            None => warn!("{}: MUX ASN {} registered but topology has no HNVPA subnet", role, mux_asn),
        }
    }

    neighbors
}
