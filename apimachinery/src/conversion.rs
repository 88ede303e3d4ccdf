// SPDX-FileCopyrightText: The kubeadm-rs authors
//
// SPDX-License-Identifier: MIT

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use log::debug;

use crate::{DeepCopy, Error};

pub type DeepCopyFn = fn(&dyn Any, &mut dyn Any) -> Result<(), Error>;

/// A type-erased copy function together with the type it copies.
#[derive(Clone, Copy)]
pub struct GeneratedDeepCopyFunc {
    pub in_type: TypeId,
    pub type_name: &'static str,
    pub func: DeepCopyFn,
}

impl GeneratedDeepCopyFunc {
    pub fn of<T: DeepCopy + 'static>() -> Self {
        Self {
            in_type: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            func: deep_copy_any::<T>,
        }
    }
}

impl fmt::Debug for GeneratedDeepCopyFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedDeepCopyFunc")
            .field("type_name", &self.type_name)
            .finish()
    }
}

// Called directly, the concrete type behind a mismatched argument is not
// known by name; `Cloner` checks types first and reports registered names.
fn deep_copy_any<T: DeepCopy + 'static>(src: &dyn Any, out: &mut dyn Any) -> Result<(), Error> {
    let mismatch = |found: TypeId| Error::TypeMismatch {
        expected: type_name::<T>(),
        found: format!("unnamed type {found:?}"),
    };
    let src = src
        .downcast_ref::<T>()
        .ok_or_else(|| mismatch((*src).type_id()))?;
    let out_type = (*out).type_id();
    let out = out.downcast_mut::<T>().ok_or_else(|| mismatch(out_type))?;
    src.deep_copy_into(out);
    Ok(())
}

/// Registry of copy functions, dispatching on the runtime type of the source.
#[derive(Debug, Default)]
pub struct Cloner {
    funcs: HashMap<TypeId, GeneratedDeepCopyFunc>,
}

impl Cloner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_generated_deep_copy_func(
        &mut self,
        func: GeneratedDeepCopyFunc,
    ) -> Result<(), Error> {
        match self.funcs.entry(func.in_type) {
            Entry::Occupied(_) => Err(Error::DuplicateRegistration(func.type_name)),
            Entry::Vacant(entry) => {
                debug!("Registered deep copy function for {}", func.type_name);
                entry.insert(func);
                Ok(())
            }
        }
    }

    pub fn register_generated_deep_copy_funcs(
        &mut self,
        funcs: impl IntoIterator<Item = GeneratedDeepCopyFunc>,
    ) -> Result<(), Error> {
        funcs
            .into_iter()
            .try_for_each(|func| self.register_generated_deep_copy_func(func))
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.funcs.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    // Registered types are reported by name, anything else by its TypeId.
    fn describe(&self, id: TypeId) -> String {
        match self.funcs.get(&id) {
            Some(func) => func.type_name.to_string(),
            None => format!("unregistered type {id:?}"),
        }
    }

    /// Copies `src` into `out`, which must have the same concrete type.
    pub fn deep_copy_into(&self, src: &dyn Any, out: &mut dyn Any) -> Result<(), Error> {
        let in_type = (*src).type_id();
        let func = self
            .funcs
            .get(&in_type)
            .ok_or_else(|| Error::UnregisteredType(self.describe(in_type)))?;
        let out_type = (*out).type_id();
        if out_type != in_type {
            return Err(Error::TypeMismatch {
                expected: func.type_name,
                found: self.describe(out_type),
            });
        }
        (func.func)(src, out)
    }

    pub fn deep_copy<T: Default + 'static>(&self, src: &T) -> Result<T, Error> {
        if !self.is_registered::<T>() {
            return Err(Error::UnregisteredType(type_name::<T>().to_string()));
        }
        let mut out = T::default();
        self.deep_copy_into(src, &mut out)?;
        Ok(out)
    }
}
