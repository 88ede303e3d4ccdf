// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

//! Object plumbing shared by API types: the polymorphic [`Object`]
//! capability, deep-copy helpers, a registry of copy functions keyed by
//! type, and the generic list containers.

pub mod conversion;
mod error;
pub mod list;
pub mod runtime;

pub use error::Error;
pub use runtime::{DeepCopy, Object, deep_copy, deep_copy_object, try_deep_copy_into};
