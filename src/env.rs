//! Type-keyed storage shared by every view of an application.

use alloc::{boxed::Box, collections::BTreeMap};
use core::any::{Any, TypeId, type_name};
use core::fmt;

/// Values made available to views while rendering.
///
/// Plugins populate the environment when they are installed; views look values
/// up by type.
#[derive(Default)]
pub struct Environment {
    map: BTreeMap<TypeId, (&'static str, Box<dyn Any>)>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.map.values().map(|(name, _)| name))
            .finish()
    }
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, returning `true` if a value of the same type was replaced.
    pub fn insert<T: 'static>(&mut self, value: T) -> bool {
        self.map
            .insert(TypeId::of::<T>(), (type_name::<T>(), Box::new(value)))
            .is_some()
    }

    /// Looks up a value by type.
    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|(_, value)| value.downcast_ref())
    }
}
