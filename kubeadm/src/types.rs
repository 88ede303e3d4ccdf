// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::time::Duration;

use apimachinery::conversion::GeneratedDeepCopyFunc;
use apimachinery::runtime::TypeMeta;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const GROUP_NAME: &str = "kubeadm.k8s.io";
pub const API_VERSION: &str = "kubeadm.k8s.io/v1alpha1";
pub const MASTER_CONFIGURATION_KIND: &str = "MasterConfiguration";
pub const NODE_CONFIGURATION_KIND: &str = "NodeConfiguration";

#[derive(Default, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
#[allow(dead_code)]
struct TypeMetaSchema {
    api_version: String,
    kind: String,
}

fn type_meta(kind: &str) -> TypeMeta {
    TypeMeta {
        api_version: API_VERSION.to_string(),
        kind: kind.to_string(),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MasterConfiguration {
    #[serde(flatten, with = "apimachinery::runtime::optional_type_meta")]
    #[schemars(with = "TypeMetaSchema")]
    pub type_meta: TypeMeta,

    pub api: Api,
    pub etcd: Etcd,
    pub networking: Networking,
    pub kubernetes_version: String,
    pub cloud_provider: String,
    pub node_name: String,
    pub authorization_modes: Vec<String>,

    pub token: String,
    #[serde(rename = "tokenTTL", with = "humantime_serde")]
    #[schemars(with = "String")]
    pub token_ttl: Duration,

    pub api_server_extra_args: BTreeMap<String, String>,
    pub controller_manager_extra_args: BTreeMap<String, String>,
    pub scheduler_extra_args: BTreeMap<String, String>,

    /// Extra Subject Alternative Names for the API server signing cert.
    #[serde(rename = "apiServerCertSANs")]
    pub api_server_cert_sans: Vec<String>,
    /// Where to store or look for all required certificates.
    pub certificates_dir: String,

    /// Container registry to pull control plane images from.
    pub image_repository: String,
    /// When set, this image is used for all control plane components.
    pub unified_control_plane_image: String,

    /// Feature flags enabled by the user.
    pub feature_flags: BTreeMap<String, bool>,
}

impl MasterConfiguration {
    pub fn new() -> Self {
        Self {
            type_meta: type_meta(MASTER_CONFIGURATION_KIND),
            ..Default::default()
        }
    }

    /// URL clients use to reach the API server. The address and port are
    /// taken as they are, so an empty address still yields `https://:<port>`.
    pub fn master_endpoint(&self) -> String {
        format!(
            "https://{}:{}",
            self.api.advertise_address, self.api.bind_port
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Api {
    /// Address the API server advertises.
    pub advertise_address: String,
    /// Secure port the API server binds to.
    pub bind_port: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenDiscovery {
    pub id: String,
    pub secret: String,
    pub addresses: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Networking {
    pub service_subnet: String,
    pub pod_subnet: String,
    pub dns_domain: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Etcd {
    pub endpoints: Vec<String>,
    pub ca_file: String,
    pub cert_file: String,
    pub key_file: String,
    pub data_dir: String,
    pub extra_args: BTreeMap<String, String>,
    /// Container image for etcd. Left empty, it is derived from the image
    /// repository and the default etcd version.
    pub image: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeConfiguration {
    #[serde(flatten, with = "apimachinery::runtime::optional_type_meta")]
    #[schemars(with = "TypeMetaSchema")]
    pub type_meta: TypeMeta,

    pub ca_cert_path: String,
    pub discovery_file: String,
    pub discovery_token: String,
    // Only the first API server is used for now.
    #[serde(rename = "discoveryTokenAPIServers")]
    pub discovery_token_api_servers: Vec<String>,
    pub node_name: String,
    pub tls_bootstrap_token: String,
    pub token: String,
}

impl NodeConfiguration {
    pub fn new() -> Self {
        Self {
            type_meta: type_meta(NODE_CONFIGURATION_KIND),
            ..Default::default()
        }
    }
}

apimachinery::impl_object!(MasterConfiguration, NodeConfiguration);

pub fn generated_deep_copy_funcs() -> Vec<GeneratedDeepCopyFunc> {
    vec![
        GeneratedDeepCopyFunc::of::<Api>(),
        GeneratedDeepCopyFunc::of::<Etcd>(),
        GeneratedDeepCopyFunc::of::<MasterConfiguration>(),
        GeneratedDeepCopyFunc::of::<Networking>(),
        GeneratedDeepCopyFunc::of::<NodeConfiguration>(),
        GeneratedDeepCopyFunc::of::<TokenDiscovery>(),
    ]
}
