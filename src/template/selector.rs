//! Interface template variant selection.

use super::types::{InterfaceTemplate, TemplateCatalog};
use crate::classify::{RoleSymbol, VlanMap};
use crate::topology::DeploymentPattern;
use std::fmt;

/// Concrete interface set picked for a leaf switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateVariant {
    /// Fully converged hosts with management, compute and/or storage on a trunk
    FullyConvergedTrunk,
    /// Fully converged hosts carrying only management, as an access port
    FullyConvergedAccess,
    Switched,
    Switchless,
}

impl TemplateVariant {
    /// Catalog interface-set names accepted for this variant, preferred first
    pub fn catalog_keys(&self) -> &'static [&'static str] {
        match self {
            TemplateVariant::FullyConvergedTrunk => &["fully_converged_trunk", "fully_converged"],
            TemplateVariant::FullyConvergedAccess => &["fully_converged_access"],
            TemplateVariant::Switched => &["switched"],
            TemplateVariant::Switchless => &["switchless"],
        }
    }

    pub fn is_access_only(&self) -> bool {
        matches!(self, TemplateVariant::FullyConvergedAccess)
    }

    /// Interface set of this variant in a catalog
    pub fn find<'a>(&self, catalog: &'a TemplateCatalog) -> Option<&'a [InterfaceTemplate]> {
        self.catalog_keys()
            .iter()
            .find_map(|key| catalog.interface_set(key))
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_keys()[0])
    }
}

/// Pick the interface variant for a deployment pattern.
///
/// Only the fully converged family looks at the classified roles: a
/// management-only host network is an access port, anything more needs a
/// trunk. Must run after classification is complete.
pub fn select_variant(pattern: DeploymentPattern, vlans: &VlanMap) -> TemplateVariant {
    match pattern {
        DeploymentPattern::FullyConverged => {
            let management = vlans.is_populated(RoleSymbol::Management);
            let compute = vlans.is_populated(RoleSymbol::Compute);
            let storage = vlans.any_storage();
            if management && !compute && !storage {
                TemplateVariant::FullyConvergedAccess
            } else {
                TemplateVariant::FullyConvergedTrunk
            }
        }
        DeploymentPattern::Switched => TemplateVariant::Switched,
        DeploymentPattern::Switchless => TemplateVariant::Switchless,
    }
}
