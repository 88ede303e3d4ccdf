// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use serde::{Deserialize, Serialize};

use crate::conversion::GeneratedDeepCopyFunc;
use crate::runtime::{Object, RawExtension, TypeMeta};

/// List of heterogeneous objects.
///
/// `None` entries are absence markers and stay absent in copies; present
/// entries are copied through their own [`Object::deep_copy_object`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List {
    pub type_meta: TypeMeta,
    pub metadata: ListMeta,
    pub items: Vec<Option<Box<dyn Object>>>,
}

/// List of raw, not yet decoded objects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListV1 {
    #[serde(flatten, with = "crate::runtime::optional_type_meta")]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<RawExtension>,
}

crate::impl_object!(List, ListV1);

impl List {
    pub fn push(&mut self, item: impl Object) {
        self.items.push(Some(Box::new(item)));
    }
}

/// Copy functions for the list types, for registration with a
/// [`Cloner`](crate::conversion::Cloner).
pub fn generated_deep_copy_funcs() -> Vec<GeneratedDeepCopyFunc> {
    vec![
        GeneratedDeepCopyFunc::of::<List>(),
        GeneratedDeepCopyFunc::of::<ListV1>(),
    ]
}
