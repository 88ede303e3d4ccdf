// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported apiVersion {found:?}, expected {expected:?}")]
    UnexpectedApiVersion {
        expected: &'static str,
        found: String,
    },
    #[error("unexpected kind {found:?}, expected {expected:?}")]
    UnexpectedKind {
        expected: &'static str,
        found: String,
    },
}
