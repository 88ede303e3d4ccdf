// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: cannot deep copy from a nil {0}")]
    NilSource(&'static str),
    #[error("no deep copy function registered for {0}")]
    UnregisteredType(String),
    #[error("deep copy function for {expected} cannot handle {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
    #[error("deep copy function for {0} is already registered")]
    DuplicateRegistration(&'static str),
}
