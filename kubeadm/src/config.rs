// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;

use apimachinery::Object;
use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Error;
use crate::defaults::{set_defaults_master_configuration, set_defaults_node_configuration};
use crate::types::{
    API_VERSION, MASTER_CONFIGURATION_KIND, MasterConfiguration, NODE_CONFIGURATION_KIND,
    NodeConfiguration,
};

fn from_yaml<T: DeserializeOwned + Object>(yaml: &str, kind: &'static str) -> Result<T, Error> {
    let cfg: T = serde_yaml::from_str(yaml)?;
    let type_meta = cfg.type_meta();
    if type_meta.api_version != API_VERSION {
        return Err(Error::UnexpectedApiVersion {
            expected: API_VERSION,
            found: type_meta.api_version.clone(),
        });
    }
    if type_meta.kind != kind {
        return Err(Error::UnexpectedKind {
            expected: kind,
            found: type_meta.kind.clone(),
        });
    }
    Ok(cfg)
}

fn read(path: &Path) -> Result<String, Error> {
    info!("Loading configuration from {}", path.display());
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a `MasterConfiguration` document and applies the defaults.
pub fn master_configuration_from_yaml(yaml: &str) -> Result<MasterConfiguration, Error> {
    let mut cfg: MasterConfiguration = from_yaml(yaml, MASTER_CONFIGURATION_KIND)?;
    set_defaults_master_configuration(&mut cfg);
    Ok(cfg)
}

/// Parses a `NodeConfiguration` document and applies the defaults.
pub fn node_configuration_from_yaml(yaml: &str) -> Result<NodeConfiguration, Error> {
    let mut cfg: NodeConfiguration = from_yaml(yaml, NODE_CONFIGURATION_KIND)?;
    set_defaults_node_configuration(&mut cfg);
    Ok(cfg)
}

pub fn load_master_configuration(path: impl AsRef<Path>) -> Result<MasterConfiguration, Error> {
    master_configuration_from_yaml(&read(path.as_ref())?)
}

pub fn load_node_configuration(path: impl AsRef<Path>) -> Result<NodeConfiguration, Error> {
    node_configuration_from_yaml(&read(path.as_ref())?)
}

pub fn to_yaml<T: Serialize>(cfg: &T) -> Result<String, Error> {
    serde_yaml::to_string(cfg).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    const MASTER_YAML: &str = r#"
apiVersion: kubeadm.k8s.io/v1alpha1
kind: MasterConfiguration
api:
  advertiseAddress: 10.0.0.5
etcd:
  endpoints:
  - https://10.0.0.6:2379
  extraArgs:
    election-timeout: "5000"
networking:
  podSubnet: 10.244.0.0/16
kubernetesVersion: v1.8.4
tokenTTL: 2h
apiServerCertSANs:
- k8s.example.com
featureFlags:
  SelfHosting: true
"#;

    const NODE_YAML: &str = r#"
apiVersion: kubeadm.k8s.io/v1alpha1
kind: NodeConfiguration
discoveryTokenAPIServers:
- 10.0.0.5:6443
token: abcdef.0123456789abcdef
"#;

    #[test]
    fn test_master_configuration_from_yaml() {
        let cfg = master_configuration_from_yaml(MASTER_YAML).unwrap();
        assert_eq!(cfg.master_endpoint(), "https://10.0.0.5:6443");
        assert_eq!(cfg.etcd.endpoints, vec!["https://10.0.0.6:2379"]);
        assert_eq!(cfg.etcd.extra_args["election-timeout"], "5000");
        assert_eq!(cfg.networking.pod_subnet, "10.244.0.0/16");
        assert_eq!(cfg.networking.service_subnet, "10.96.0.0/12");
        assert_eq!(cfg.kubernetes_version, "v1.8.4");
        assert_eq!(cfg.token_ttl, Duration::from_secs(2 * 3600));
        assert_eq!(cfg.api_server_cert_sans, vec!["k8s.example.com"]);
        assert_eq!(cfg.feature_flags.get("SelfHosting"), Some(&true));
    }

    #[test]
    fn test_node_configuration_from_yaml() {
        let cfg = node_configuration_from_yaml(NODE_YAML).unwrap();
        assert_eq!(cfg.discovery_token_api_servers, vec!["10.0.0.5:6443"]);
        assert_eq!(cfg.discovery_token, "abcdef.0123456789abcdef");
        assert_eq!(cfg.tls_bootstrap_token, "abcdef.0123456789abcdef");
        assert_eq!(cfg.ca_cert_path, "/etc/kubernetes/pki/ca.crt");
    }

    #[test]
    fn test_wrong_kind() {
        let result = master_configuration_from_yaml(NODE_YAML);
        assert!(matches!(
            result,
            Err(Error::UnexpectedKind { expected: MASTER_CONFIGURATION_KIND, ref found })
                if found == NODE_CONFIGURATION_KIND
        ));
    }

    #[test]
    fn test_wrong_api_version() {
        let yaml = NODE_YAML.replace("kubeadm.k8s.io/v1alpha1", "kubeadm.k8s.io/v1beta1");
        let result = node_configuration_from_yaml(&yaml);
        assert!(matches!(result, Err(Error::UnexpectedApiVersion { .. })));
    }

    #[test]
    fn test_missing_api_version() {
        let result = master_configuration_from_yaml("api:\n  advertiseAddress: 10.0.0.5\n");
        assert!(matches!(
            result,
            Err(Error::UnexpectedApiVersion { expected: API_VERSION, ref found }) if found.is_empty()
        ));
    }

    #[test]
    fn test_missing_kind() {
        let result = node_configuration_from_yaml("apiVersion: kubeadm.k8s.io/v1alpha1\n");
        assert!(matches!(
            result,
            Err(Error::UnexpectedKind { expected: NODE_CONFIGURATION_KIND, ref found }) if found.is_empty()
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = master_configuration_from_yaml("api: [not, a, map");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_load_master_configuration() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MASTER_YAML.as_bytes()).unwrap();
        let cfg = load_master_configuration(file.path()).unwrap();
        assert_eq!(cfg.master_endpoint(), "https://10.0.0.5:6443");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = load_node_configuration(&path).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_to_yaml_round_trip() {
        let cfg = master_configuration_from_yaml(MASTER_YAML).unwrap();
        let yaml = to_yaml(&cfg).unwrap();
        assert_eq!(master_configuration_from_yaml(&yaml).unwrap(), cfg);
    }
}
