// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

//! Defaulting for configurations read from user input. Only empty or zero
//! fields are filled in, so applying the defaults twice is the same as
//! applying them once.

use std::time::Duration;

use log::debug;

use crate::types::{
    API_VERSION, MASTER_CONFIGURATION_KIND, MasterConfiguration, NODE_CONFIGURATION_KIND,
    NodeConfiguration,
};

pub const DEFAULT_SERVICE_DNS_DOMAIN: &str = "cluster.local";
pub const DEFAULT_SERVICES_SUBNET: &str = "10.96.0.0/12";
pub const DEFAULT_KUBERNETES_VERSION_LABEL: &str = "stable-1.8";
pub const DEFAULT_API_BIND_PORT: i32 = 6443;
pub const DEFAULT_AUTHORIZATION_MODES: [&str; 2] = ["Node", "RBAC"];
pub const DEFAULT_CA_CERT_PATH: &str = "/etc/kubernetes/pki/ca.crt";
pub const DEFAULT_CERTIFICATES_DIR: &str = "/etc/kubernetes/pki";
pub const DEFAULT_ETCD_DATA_DIR: &str = "/var/lib/etcd";
pub const DEFAULT_IMAGE_REPOSITORY: &str = "gcr.io/google_containers";
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

fn default_string(field: &mut String, value: &str) {
    if field.is_empty() {
        *field = value.to_string();
    }
}

pub fn set_defaults_master_configuration(cfg: &mut MasterConfiguration) {
    default_string(&mut cfg.type_meta.api_version, API_VERSION);
    default_string(&mut cfg.type_meta.kind, MASTER_CONFIGURATION_KIND);
    default_string(&mut cfg.kubernetes_version, DEFAULT_KUBERNETES_VERSION_LABEL);

    if cfg.api.bind_port == 0 {
        cfg.api.bind_port = DEFAULT_API_BIND_PORT;
    }

    default_string(&mut cfg.networking.service_subnet, DEFAULT_SERVICES_SUBNET);
    default_string(&mut cfg.networking.dns_domain, DEFAULT_SERVICE_DNS_DOMAIN);

    if cfg.authorization_modes.is_empty() {
        cfg.authorization_modes = DEFAULT_AUTHORIZATION_MODES
            .iter()
            .map(|mode| mode.to_string())
            .collect();
    }

    default_string(&mut cfg.certificates_dir, DEFAULT_CERTIFICATES_DIR);

    if cfg.token_ttl.is_zero() {
        cfg.token_ttl = DEFAULT_TOKEN_DURATION;
    }

    default_string(&mut cfg.image_repository, DEFAULT_IMAGE_REPOSITORY);
    default_string(&mut cfg.etcd.data_dir, DEFAULT_ETCD_DATA_DIR);
    debug!("Defaulted MasterConfiguration for {}", cfg.master_endpoint());
}

pub fn set_defaults_node_configuration(cfg: &mut NodeConfiguration) {
    default_string(&mut cfg.type_meta.api_version, API_VERSION);
    default_string(&mut cfg.type_meta.kind, NODE_CONFIGURATION_KIND);
    default_string(&mut cfg.ca_cert_path, DEFAULT_CA_CERT_PATH);

    if cfg.tls_bootstrap_token.is_empty() {
        cfg.tls_bootstrap_token = cfg.token.clone();
    }
    if cfg.discovery_token.is_empty() && cfg.discovery_file.is_empty() {
        cfg.discovery_token = cfg.token.clone();
    }

    // file:// URLs become plain paths
    if let Some(path) = cfg.discovery_file.strip_prefix("file://") {
        cfg.discovery_file = path.to_string();
    }
    debug!(
        "Defaulted NodeConfiguration with discovery servers {:?}",
        cfg.discovery_token_api_servers
    );
}
