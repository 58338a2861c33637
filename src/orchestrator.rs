//! Generation orchestrator.
//!
//! Runs the per-role pipeline (classify, select, validate, resolve,
//! synthesize, assemble) and writes one document per generated switch.
//! Roles share the read-only topology and catalog and are resolved in
//! parallel; results come back in requested-role order.

use crate::bgp::build_bgp;
use crate::classify::{build_vlan_section, classify};
use crate::config::Settings;
use crate::document::{DebugMaps, SwitchDocument};
use crate::error::GenerateError;
use crate::registry::TopologyRegistry;
use crate::resolve::{resolve_interfaces, resolve_port_channels, ResolveContext};
use crate::template::{select_variant, CatalogSource, InterfaceTemplate};
use crate::topology::{DeploymentPattern, InputData, SwitchRole};
use crate::utils::validation::{validate_interfaces, validate_port_channels, validate_role_vlans};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, error, info};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of generating one switch role.
///
/// `Ok(None)` means the topology declares no switch of that role.
#[derive(Debug)]
pub struct RoleOutcome {
    pub role: SwitchRole,
    pub result: std::result::Result<Option<SwitchDocument>, GenerateError>,
}

/// What a generation run produced
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SwitchRole>,
    pub failed: Vec<GenerateError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generate the document of one switch role
pub fn generate_switch_document<C>(
    input: &InputData,
    registry: &TopologyRegistry,
    role: SwitchRole,
    catalogs: &C,
    settings: &Settings,
) -> std::result::Result<Option<SwitchDocument>, GenerateError>
where
    C: CatalogSource + ?Sized,
{
    let Some(switch) = registry.switch(role) else {
        info!("No {} switch in topology, skipping", role);
        return Ok(None);
    };

    let classification = classify(&input.supernets, role);

    let catalog = catalogs
        .catalog(&switch.make, &switch.model)
        .map_err(|reason| GenerateError::CatalogUnreadable {
            role,
            make: switch.make.clone(),
            model: switch.model.clone(),
            reason,
        })?
        .ok_or_else(|| GenerateError::MissingTemplate {
            role,
            make: switch.make.clone(),
            model: switch.model.clone(),
        })?;

    // The BMC switch only takes the common interface set
    let variant = if role.is_leaf() {
        let pattern = leaf_pattern(input, role)?;
        let variant = select_variant(pattern, &classification.vlans);
        debug!("{}: {} pattern uses '{}' interfaces", role, pattern, variant);
        Some(variant)
    } else {
        None
    };
    validate_role_vlans(role, variant, &classification.vlans)?;

    let variant_set: &[InterfaceTemplate] = match variant {
        Some(variant) => {
            variant.find(&catalog).ok_or_else(|| GenerateError::MissingVariant {
                role,
                make: switch.make.clone(),
                model: switch.model.clone(),
                variant: variant.to_string(),
            })?
        }
        None => &[],
    };

    let ctx = ResolveContext {
        role,
        vlans: &classification.vlans,
        addresses: &classification.addresses,
    };
    let interfaces = resolve_interfaces(catalog.common(), variant_set, &ctx);
    let port_channels = resolve_port_channels(&catalog.port_channels, &ctx);

    validate_interfaces(role, &interfaces)?;
    validate_port_channels(role, &port_channels)?;

    let vlans = build_vlan_section(&classification.groups, switch, settings);
    let bgp = if role.is_leaf() {
        Some(build_bgp(role, &classification.addresses, &vlans, registry.asns(), settings)?)
    } else {
        None
    };

    let debug_maps = settings.include_debug_maps.then(|| DebugMaps {
        vlan_map: classification.vlans.clone(),
        ip_map: classification.addresses.clone(),
    });

    Ok(Some(SwitchDocument::assemble(
        switch.clone(),
        vlans,
        interfaces,
        port_channels,
        bgp,
        debug_maps,
    )))
}

fn leaf_pattern(input: &InputData, role: SwitchRole) -> std::result::Result<DeploymentPattern, GenerateError> {
    input
        .deployment_pattern
        .parse()
        .map_err(|_| GenerateError::UnknownPattern {
            role,
            pattern: input.deployment_pattern.clone(),
        })
}

/// Generate every requested role; a failing role never stops the others
pub fn generate_all<C>(input: &InputData, roles: &[SwitchRole], catalogs: &C, settings: &Settings) -> Vec<RoleOutcome>
where
    C: CatalogSource + Sync + ?Sized,
{
    let registry = TopologyRegistry::build(input);
    info!(
        "Topology: {} switches, {} network groups, pattern '{}'",
        registry.len(),
        input.supernets.len(),
        input.deployment_pattern
    );

    roles
        .par_iter()
        .map(|&role| RoleOutcome {
            role,
            result: generate_switch_document(input, &registry, role, catalogs, settings),
        })
        .collect()
}

/// Write every generated document as `{hostname}.json` under `output_dir`.
///
/// Failed roles are logged and reported but produce no file.
pub fn write_documents(outcomes: Vec<RoleOutcome>, output_dir: &Path) -> Result<GenerationReport> {
    fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", output_dir.display()))?;

    let mut report = GenerationReport::default();
    for outcome in outcomes {
        match outcome.result {
            Ok(Some(document)) => {
                let path = output_dir.join(document.file_name());
                let json = serde_json::to_string_pretty(&document)
                    .wrap_err_with(|| format!("Failed to serialize {} document", outcome.role))?;
                fs::write(&path, json).wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
                info!("Wrote {} document: {:?}", outcome.role, path);
                report.written.push(path);
            }
            Ok(None) => report.skipped.push(outcome.role),
            Err(e) => {
                error!("{}", e);
                report.failed.push(e);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{InMemoryCatalog, TemplateCatalog};
    use serde_json::json;

    fn topology(pattern: &str) -> InputData {
        serde_json::from_value(json!({
            "DeploymentPattern": pattern,
            "Switches": [
                {"Make": "Cisco", "Model": "93180YC-FX", "Type": "TOR1", "Hostname": "tor-1a", "Firmware": "10.3(2)", "ASN": 65242},
                {"Make": "Cisco", "Model": "93180YC-FX", "Type": "TOR2", "Hostname": "tor-1b", "Firmware": "10.3(2)", "ASN": 65242},
                {"Make": "Cisco", "Model": "9348GC-FXP", "Type": "BMC", "Hostname": "bmc-1", "Firmware": "10.3(2)"}
            ],
            "Supernets": [
                {"GroupName": "Infrastructure", "IPv4": {"Name": "Infra_7", "VlanId": 7, "Subnet": "100.69.177.0/24", "Cidr": 24,
                    "Assignment": [{"Name": "Gateway", "IP": "100.69.177.1"}, {"Name": "TOR1", "IP": "100.69.177.2"}, {"Name": "TOR2", "IP": "100.69.177.3"}]}},
                {"GroupName": "Tenant", "IPv4": {"Name": "Compute_201", "VlanId": 201, "Subnet": "100.69.176.0/24", "Cidr": 24}},
                {"GroupName": "BMC", "IPv4": {"Name": "BMC_Mgmt_125", "VlanId": 125, "Subnet": "100.71.85.64/26", "Cidr": 26,
                    "Assignment": [{"Name": "BMC", "IP": "100.71.85.126"}]}},
                {"GroupName": "Loopback0_TOR1", "IPv4": {"Name": "Loopback0_Tor1", "Subnet": "100.71.85.21/32", "Cidr": 32,
                    "Assignment": [{"Name": "TOR1", "IP": "100.71.85.21"}]}},
                {"GroupName": "Loopback0_TOR2", "IPv4": {"Name": "Loopback0_Tor2", "Subnet": "100.71.85.22/32", "Cidr": 32,
                    "Assignment": [{"Name": "TOR2", "IP": "100.71.85.22"}]}}
            ]
        }))
        .unwrap()
    }

    fn leaf_catalog() -> TemplateCatalog {
        serde_json::from_value(json!({
            "interface_templates": {
                "common": [{"name": "Loopback0", "type": "L3", "ipv4": ""}],
                "fully_converged_trunk": [{"name": "HyperConverged", "type": "Trunk", "native_vlan": "M", "tagged_vlans": "M,C"}]
            }
        }))
        .unwrap()
    }

    fn catalogs() -> InMemoryCatalog {
        let bmc: TemplateCatalog = serde_json::from_value(json!({
            "interface_templates": {
                "common": [{"name": "BMC_Hosts", "type": "Access", "access_vlan": "BMC"}]
            }
        }))
        .unwrap();

        let mut source = InMemoryCatalog::new();
        source.insert("cisco", "93180yc-fx", leaf_catalog());
        source.insert("cisco", "9348gc-fxp", bmc);
        source
    }

    #[test]
    fn test_generates_every_role_in_order() {
        let input = topology("HyperConverged");
        let outcomes = generate_all(&input, &SwitchRole::TARGETS, &catalogs(), &Settings::default());

        let roles: Vec<SwitchRole> = outcomes.iter().map(|o| o.role).collect();
        assert_eq!(roles, SwitchRole::TARGETS.to_vec());

        let tor1 = outcomes[0].result.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(tor1.interfaces[0].interface.ipv4.as_deref(), Some("100.71.85.21/32"));
        assert_eq!(tor1.interfaces[1].interface.tagged_vlans.as_deref(), Some("7,201"));
        assert_eq!(tor1.bgp.as_ref().unwrap().router_id, "100.71.85.21");

        let bmc = outcomes[2].result.as_ref().unwrap().as_ref().unwrap();
        assert!(bmc.bgp.is_none());
        assert_eq!(bmc.interfaces[0].interface.access_vlan.as_deref(), Some("125"));
        assert_eq!(bmc.vlans.len(), 1);
    }

    #[test]
    fn test_missing_switch_is_skipped() {
        let mut input = topology("HyperConverged");
        input.switches.retain(|sw| sw.switch_type != "BMC");
        let registry = TopologyRegistry::build(&input);

        let result = generate_switch_document(&input, &registry, SwitchRole::Bmc, &catalogs(), &Settings::default());
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_role_errors_are_isolated() {
        let input = topology("HyperConverged");
        // no catalog for the BMC model
        let mut source = InMemoryCatalog::new();
        source.insert("cisco", "93180yc-fx", leaf_catalog());

        let outcomes = generate_all(&input, &SwitchRole::TARGETS, &source, &Settings::default());
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_ok());
        assert!(matches!(
            outcomes[2].result,
            Err(GenerateError::MissingTemplate { role: SwitchRole::Bmc, .. })
        ));
    }

    #[test]
    fn test_unknown_pattern_and_missing_variant() {
        let input = topology("Stretched");
        let registry = TopologyRegistry::build(&input);
        let err = generate_switch_document(&input, &registry, SwitchRole::Tor1, &catalogs(), &Settings::default()).unwrap_err();
        assert!(matches!(err, GenerateError::UnknownPattern { .. }));

        let input = topology("Switched");
        let registry = TopologyRegistry::build(&input);
        let err = generate_switch_document(&input, &registry, SwitchRole::Tor1, &catalogs(), &Settings::default()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingVariant { ref variant, .. } if variant == "switched"));
    }

    #[test]
    fn test_bmc_ignores_deployment_pattern() {
        let mut value = serde_json::to_value(topology("HyperConverged")).unwrap();
        value.as_object_mut().unwrap().remove("DeploymentPattern");
        let mut input: InputData = serde_json::from_value(value).unwrap();
        input.switches.retain(|sw| sw.switch_type == "BMC");
        assert!(input.deployment_pattern.is_empty());

        let outcomes = generate_all(&input, &SwitchRole::TARGETS, &catalogs(), &Settings::default());
        assert_eq!(outcomes[0].result, Ok(None));
        assert_eq!(outcomes[1].result, Ok(None));

        let bmc = outcomes[2].result.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(bmc.interfaces[0].interface.access_vlan.as_deref(), Some("125"));
        assert!(bmc.bgp.is_none());
    }

    #[test]
    fn test_unknown_pattern_only_fails_leaves() {
        let input = topology("Stretched");
        let outcomes = generate_all(&input, &SwitchRole::TARGETS, &catalogs(), &Settings::default());

        assert!(matches!(outcomes[0].result, Err(GenerateError::UnknownPattern { role: SwitchRole::Tor1, .. })));
        assert!(matches!(outcomes[1].result, Err(GenerateError::UnknownPattern { role: SwitchRole::Tor2, .. })));
        assert!(outcomes[2].result.as_ref().is_ok_and(|doc| doc.is_some()));
    }

    #[test]
    fn test_debug_maps_follow_settings() {
        let input = topology("HyperConverged");
        let registry = TopologyRegistry::build(&input);
        let settings = Settings { include_debug_maps: true, ..Settings::default() };

        let doc = generate_switch_document(&input, &registry, SwitchRole::Tor2, &catalogs(), &settings)
            .unwrap()
            .unwrap();
        let debug = doc.debug.as_ref().unwrap();
        assert_eq!(debug.vlan_map.get(crate::classify::RoleSymbol::Compute), &[201]);
    }

    #[test]
    fn test_write_documents_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        let input = topology("HyperConverged");
        let outcomes = vec![
            RoleOutcome {
                role: SwitchRole::Tor1,
                result: generate_switch_document(
                    &input,
                    &TopologyRegistry::build(&input),
                    SwitchRole::Tor1,
                    &catalogs(),
                    &Settings::default(),
                ),
            },
            RoleOutcome { role: SwitchRole::Tor2, result: Err(GenerateError::MissingAsn { role: SwitchRole::Tor2 }) },
            RoleOutcome { role: SwitchRole::Bmc, result: Ok(None) },
        ];

        let report = write_documents(outcomes, dir.path()).unwrap();
        assert_eq!(report.written, vec![dir.path().join("tor-1a.json")]);
        assert_eq!(report.skipped, vec![SwitchRole::Bmc]);
        assert!(!report.is_success());
        assert!(!dir.path().join("tor-1b.json").exists());
    }
}
