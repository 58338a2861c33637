use crate::config::Settings;
use crate::template::{CatalogSource, TemplateCatalog};
use crate::topology::{InputData, TopologyDocument};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Catalog file extensions, in lookup order
const CATALOG_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Load generator settings from a YAML file, or the defaults when no file is given
pub fn load_settings(settings_path: Option<&Path>) -> Result<Settings> {
    let settings = match settings_path {
        Some(path) => {
            info!("Loading settings from: {:?}", path);
            let file = File::open(path).wrap_err_with(|| format!("Failed to open settings file '{}'", path.display()))?;
            serde_yaml::from_reader(file).wrap_err_with(|| format!("Failed to parse settings file '{}'", path.display()))?
        }
        None => Settings::default(),
    };

    settings.validate()?;
    Ok(settings)
}

/// CLI arguments that override settings file values
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub roles: Vec<String>,
    pub include_debug_maps: bool,
}

/// Apply CLI overrides to loaded settings
pub fn apply_overrides(settings: &mut Settings, overrides: &SettingsOverrides) -> Result<()> {
    if !overrides.roles.is_empty() {
        info!("Generating roles from command line: {}", overrides.roles.join(", "));
        settings.target_roles = overrides.roles.clone();
    }

    if overrides.include_debug_maps {
        settings.include_debug_maps = true;
    }

    // Re-validate after applying overrides
    settings.validate()?;

    Ok(())
}

/// Load a topology JSON document.
///
/// Accepts the `{"InputData": {...}}` envelope or a bare input object.
pub fn load_topology(topology_path: &Path) -> Result<InputData> {
    info!("Loading topology from: {:?}", topology_path);

    let content = fs::read_to_string(topology_path)
        .wrap_err_with(|| format!("Failed to read topology file '{}'", topology_path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse topology file '{}'", topology_path.display()))?;

    let input = if value.get("InputData").is_some() {
        serde_json::from_value::<TopologyDocument>(value)?.input_data
    } else {
        serde_json::from_value::<InputData>(value)?
    };

    debug!(
        "Topology has {} switches and {} network groups",
        input.switches.len(),
        input.supernets.len()
    );
    Ok(input)
}

/// Load the template catalog of a switch model from `{dir}/{make}/{model}.json`.
///
/// Make and model are matched case-insensitively; `.yaml` / `.yml` files are
/// accepted when no JSON file exists. `Ok(None)` means no catalog file.
pub fn load_catalog(dir: &Path, make: &str, model: &str) -> std::result::Result<Option<TemplateCatalog>, String> {
    let Some(make_dir) = find_entry(dir, |path| path.is_dir() && name_matches(path, make, None)) else {
        return Ok(None);
    };

    for extension in CATALOG_EXTENSIONS {
        let Some(path) = find_entry(&make_dir, |path| path.is_file() && name_matches(path, model, Some(extension))) else {
            continue;
        };

        debug!("Loading interface template {:?}", path);
        let content = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
        let catalog = if extension == "json" {
            serde_json::from_str(&content).map_err(|e| format!("{}: {}", path.display(), e))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| format!("{}: {}", path.display(), e))?
        };
        return Ok(Some(catalog));
    }

    Ok(None)
}

/// Template catalog directory laid out as `{root}/{make}/{model}.json`
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CatalogSource for DirectoryCatalog {
    fn catalog(&self, make: &str, model: &str) -> std::result::Result<Option<TemplateCatalog>, String> {
        load_catalog(&self.root, make, model)
    }
}

/// First entry of a directory accepted by `accept`, in file-name order
fn find_entry(dir: &Path, accept: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| accept(path.as_path()))
        .collect();
    paths.sort();
    paths.into_iter().next()
}

/// Case-insensitive match of a file stem (and extension, when given)
fn name_matches(path: &Path, wanted: &str, extension: Option<&str>) -> bool {
    let (name, ext) = match extension {
        Some(_) => (path.file_stem(), path.extension()),
        None => (path.file_name(), None),
    };

    let name_ok = name
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(wanted.trim()));
    let ext_ok = match extension {
        Some(wanted_ext) => ext.and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case(wanted_ext)),
        None => true,
    };
    name_ok && ext_ok
}
