use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use switchgen::config_loader::{self, DirectoryCatalog, SettingsOverrides};
use switchgen::orchestrator::{generate_all, write_documents};

/// Generate per-switch configuration documents from a lab topology
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Directory holding interface templates as {make}/{model}.json
    #[arg(short = 't', long, default_value = "input/switch_interface_templates")]
    catalog: PathBuf,

    /// Output directory for the generated documents
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Optional generator settings YAML file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Only generate these switch roles (repeatable)
    #[arg(short, long = "role")]
    roles: Vec<String>,

    /// Embed the VLAN and address maps in every document
    #[arg(long)]
    debug_maps: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Topology file: {:?}", args.input);
    info!("Template catalog: {:?}", args.catalog);
    info!("Output directory: {:?}", args.output);

    let mut settings = config_loader::load_settings(args.settings.as_deref())?;
    let overrides = SettingsOverrides {
        roles: args.roles.clone(),
        include_debug_maps: args.debug_maps,
    };
    config_loader::apply_overrides(&mut settings, &overrides)?;
    let roles = settings.roles()?;

    let input = config_loader::load_topology(&args.input)?;

    let catalog = DirectoryCatalog::new(args.catalog.clone());
    if !catalog.root().is_dir() {
        warn!("Template catalog directory {:?} does not exist", catalog.root());
    }

    let outcomes = generate_all(&input, &roles, &catalog, &settings);
    let report = write_documents(outcomes, &args.output)
        .wrap_err_with(|| format!("Failed to write documents to '{}'", args.output.display()))?;

    for role in &report.skipped {
        info!("No {} switch in topology, nothing written", role);
    }
    info!("Generated {} switch document(s)", report.written.len());

    if !report.is_success() {
        return Err(eyre!("{} switch role(s) failed to generate", report.failed.len()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_with_defaults() {
        let args = Args::try_parse_from(["switchgen", "-i", "lab.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("lab.json"));
        assert_eq!(args.catalog, PathBuf::from("input/switch_interface_templates"));
        assert_eq!(args.output, PathBuf::from("output"));
        assert!(args.settings.is_none());
        assert!(args.roles.is_empty());
        assert!(!args.debug_maps);
    }

    #[test]
    fn test_args_parse_repeated_roles() {
        let args = Args::try_parse_from([
            "switchgen", "--input", "lab.json", "-t", "templates", "-r", "TOR1", "--role", "BMC", "--debug-maps",
        ])
        .unwrap();
        assert_eq!(args.roles, vec!["TOR1".to_string(), "BMC".to_string()]);
        assert_eq!(args.catalog, PathBuf::from("templates"));
        assert!(args.debug_maps);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["switchgen"]).is_err());
    }
}
