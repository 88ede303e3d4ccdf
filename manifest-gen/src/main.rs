// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use kubeadm::config::{load_master_configuration, to_yaml};
use kubeadm::defaults::{set_defaults_master_configuration, set_defaults_node_configuration};
use kubeadm::{MasterConfiguration, NodeConfiguration};
use log::{info, warn};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output directory to save rendered YAML
    #[arg(long, default_value = "manifests")]
    output_dir: PathBuf,

    /// MasterConfiguration file to start from instead of an empty configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address the API server advertises
    #[arg(long)]
    advertise_address: Option<String>,

    /// Secure port the API server binds to
    #[arg(long)]
    bind_port: Option<i32>,

    #[arg(long)]
    kubernetes_version: Option<String>,

    /// Bootstrap token shared by the master and joining nodes
    #[arg(long)]
    token: Option<String>,

    /// API server a joining node discovers the cluster through (repeatable).
    /// Defaults to the master's advertise address and bind port.
    #[arg(long = "discovery-token-api-server")]
    discovery_token_api_servers: Vec<String>,
}

fn write_yaml(path: &Path, yaml: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(yaml.as_bytes())?;
    Ok(())
}

fn build_master_configuration(args: &Args) -> Result<MasterConfiguration> {
    let mut master = match &args.config {
        Some(path) => load_master_configuration(path)?,
        None => MasterConfiguration::new(),
    };
    if let Some(address) = &args.advertise_address {
        master.api.advertise_address = address.clone();
    }
    if let Some(port) = args.bind_port {
        master.api.bind_port = port;
    }
    if let Some(version) = &args.kubernetes_version {
        master.kubernetes_version = version.clone();
    }
    if let Some(token) = &args.token {
        master.token = token.clone();
    }
    set_defaults_master_configuration(&mut master);
    Ok(master)
}

fn build_node_configuration(args: &Args, master: &MasterConfiguration) -> NodeConfiguration {
    let discovery_token_api_servers = if !args.discovery_token_api_servers.is_empty() {
        args.discovery_token_api_servers.clone()
    } else if master.api.advertise_address.is_empty() {
        warn!("No advertise address or discovery API server given, leaving discovery servers empty");
        vec![]
    } else {
        vec![format!(
            "{}:{}",
            master.api.advertise_address, master.api.bind_port
        )]
    };
    let mut node = NodeConfiguration {
        discovery_token_api_servers,
        token: master.token.clone(),
        ..NodeConfiguration::new()
    };
    set_defaults_node_configuration(&mut node);
    node
}

fn generate_configurations(args: &Args) -> Result<()> {
    let master = build_master_configuration(args)?;
    let output_path = args.output_dir.join("master_configuration.yaml");
    write_yaml(&output_path, &to_yaml(&master)?)?;
    info!(
        "Generated MasterConfiguration for {} at {}",
        master.master_endpoint(),
        output_path.display()
    );

    let node = build_node_configuration(args, &master);
    let output_path = args.output_dir.join("node_configuration.yaml");
    write_yaml(&output_path, &to_yaml(&node)?)?;
    info!("Generated NodeConfiguration at {}", output_path.display());

    Ok(())
}

pub fn generate_schemas(args: &Args) -> Result<()> {
    let master_schema = schemars::schema_for!(MasterConfiguration);
    let output_path = args.output_dir.join("master_configuration_schema.yaml");
    write_yaml(&output_path, &serde_yaml::to_string(&master_schema)?)?;
    info!("Generated MasterConfiguration schema at {}", output_path.display());

    let node_schema = schemars::schema_for!(NodeConfiguration);
    let output_path = args.output_dir.join("node_configuration_schema.yaml");
    write_yaml(&output_path, &serde_yaml::to_string(&node_schema)?)?;
    info!("Generated NodeConfiguration schema at {}", output_path.display());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    fs::create_dir_all(&args.output_dir)?;
    generate_configurations(&args)?;
    generate_schemas(&args)?;

    Ok(())
}
