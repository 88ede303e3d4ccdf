// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

use std::any::{Any, type_name};
use std::fmt::Debug;

pub use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
pub use kube::core::TypeMeta;

use crate::Error;

/// Capability every API object implements so that containers can hold
/// heterogeneous payloads and still duplicate them.
///
/// Implement it with [`impl_object!`](crate::impl_object) rather than by hand.
pub trait Object: Any + Debug + Send + Sync {
    fn type_meta(&self) -> &TypeMeta;

    /// Independent copy of this object, behind the same capability.
    fn deep_copy_object(&self) -> Box<dyn Object>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Value equality; objects of different concrete types are never equal.
    fn eq_object(&self, other: &dyn Object) -> bool;
}

impl dyn Object {
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

impl Clone for Box<dyn Object> {
    fn clone(&self) -> Self {
        self.deep_copy_object()
    }
}

impl PartialEq for dyn Object {
    fn eq(&self, other: &Self) -> bool {
        self.eq_object(other)
    }
}

/// Implements [`Object`] for types carrying a `type_meta: TypeMeta` field.
///
/// The copy goes through [`DeepCopy`], so the type must be `Clone`, and
/// equality goes through `PartialEq`.
#[macro_export]
macro_rules! impl_object {
    ($($type:ty),+ $(,)?) => {
        $(
            impl $crate::runtime::Object for $type {
                fn type_meta(&self) -> &$crate::runtime::TypeMeta {
                    &self.type_meta
                }

                fn deep_copy_object(&self) -> ::std::boxed::Box<dyn $crate::runtime::Object> {
                    ::std::boxed::Box::new($crate::runtime::DeepCopy::deep_copy(self))
                }

                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                    self
                }

                fn eq_object(&self, other: &dyn $crate::runtime::Object) -> bool {
                    other
                        .as_any()
                        .downcast_ref::<Self>()
                        .is_some_and(|other| self == other)
                }
            }
        )+
    };
}

/// Serde adapter for a flattened [`TypeMeta`] whose fields may be absent.
/// Missing fields read as empty strings and empty fields are not written.
///
/// ```ignore
/// #[serde(flatten, with = "apimachinery::runtime::optional_type_meta")]
/// pub type_meta: TypeMeta,
/// ```
pub mod optional_type_meta {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::TypeMeta;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TypeMetaRef<'a> {
        #[serde(skip_serializing_if = "String::is_empty")]
        api_version: &'a String,
        #[serde(skip_serializing_if = "String::is_empty")]
        kind: &'a String,
    }

    #[derive(Default, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    struct OptionalTypeMeta {
        api_version: String,
        kind: String,
    }

    pub fn serialize<S: Serializer>(type_meta: &TypeMeta, s: S) -> Result<S::Ok, S::Error> {
        TypeMetaRef {
            api_version: &type_meta.api_version,
            kind: &type_meta.kind,
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<TypeMeta, D::Error> {
        let OptionalTypeMeta { api_version, kind } = OptionalTypeMeta::deserialize(d)?;
        Ok(TypeMeta { api_version, kind })
    }
}

/// Deep copy contract: the copy shares no mutable storage with the source.
///
/// Owned Rust data is deep-copied by `Clone`, so every `Clone` type gets
/// this for free. Containers of `Box<dyn Object>` clone their entries
/// through [`Object::deep_copy_object`].
pub trait DeepCopy: Sized {
    /// Overwrites `out` with a copy of `self`.
    fn deep_copy_into(&self, out: &mut Self);

    fn deep_copy(&self) -> Self;
}

impl<T: Clone> DeepCopy for T {
    fn deep_copy_into(&self, out: &mut Self) {
        out.clone_from(self);
    }

    fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// Copies an optional source; an absent source yields `None`.
pub fn deep_copy<T: DeepCopy>(src: Option<&T>) -> Option<T> {
    src.map(T::deep_copy)
}

/// Copies `src` into `out`. An absent source is an invalid argument and
/// leaves `out` untouched.
pub fn try_deep_copy_into<T: DeepCopy>(src: Option<&T>, out: &mut T) -> Result<(), Error> {
    let Some(src) = src else {
        log::warn!("Refusing to deep copy from a nil {}", type_name::<T>());
        return Err(Error::NilSource(type_name::<T>()));
    };
    src.deep_copy_into(out);
    Ok(())
}

pub fn deep_copy_object(src: Option<&dyn Object>) -> Option<Box<dyn Object>> {
    src.map(|obj| obj.deep_copy_object())
}
