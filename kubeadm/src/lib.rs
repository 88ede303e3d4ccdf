// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

pub mod config;
pub mod defaults;
mod error;
pub mod types;

pub use error::Error;
pub use types::*;
