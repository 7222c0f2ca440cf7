//! Type-system provider capability.
//!
//! The type catalog is owned by an external repository service; this crate
//! only issues read-only lookups against it. [`TypeRegistry`] is the seam:
//! the hierarchy resolver and classifier are generic over any provider that
//! can look up a [`TypeDefinition`] by name. The catalog is mutable on the
//! provider's side (types can be added at runtime), so nothing here assumes
//! a lookup result is permanent.
//!
//! [`InMemoryTypeRegistry`] is a name-indexed implementation for embedders
//! that load the type catalog up front, and for tests.

use crate::instance::TypeDefinition;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Universal base type terminating every supertype chain.
pub const BASE_TYPE: &str = "Referenceable";

/// Read-only lookup capability over an external type catalog.
///
/// Implementations must be safe for concurrent reads; the resolver and
/// classifier call into the registry from any thread without locking of
/// their own.
pub trait TypeRegistry: Send + Sync {
    /// Looks up a type definition by name. `None` for unknown types; the
    /// caller treats absence as truncating, never as an error.
    fn lookup_by_name(&self, type_name: &str) -> Option<TypeDefinition>;

    /// Returns true if `type_name` equals `super_type_name` or declares it
    /// anywhere in its supertype chain. Walks by name lookup, so unknown
    /// intermediate types end the walk with a negative answer. Revisiting a
    /// name ends the walk too, so a cyclic catalog cannot hang the caller.
    fn is_subtype_of(&self, type_name: &str, super_type_name: &str) -> bool {
        let mut visited = std::collections::HashSet::new();
        let mut current = type_name.to_string();
        loop {
            if current == super_type_name {
                return true;
            }
            if !visited.insert(current.clone()) {
                return false;
            }
            match self.lookup_by_name(&current).and_then(|def| def.super_type_name) {
                Some(next) => current = next,
                None => return false,
            }
        }
    }
}

/// Name-indexed, in-memory type registry.
#[derive(Default)]
pub struct InMemoryTypeRegistry {
    types: RwLock<HashMap<String, TypeDefinition>>,
}

impl InMemoryTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type definition, replacing any previous definition of the
    /// same name.
    pub fn register(&self, definition: TypeDefinition) {
        self.types.write().insert(definition.name.clone(), definition);
    }

    /// Registers a batch of definitions.
    pub fn register_all(&self, definitions: impl IntoIterator<Item = TypeDefinition>) {
        let mut types = self.types.write();
        for definition in definitions {
            types.insert(definition.name.clone(), definition);
        }
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// True if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl TypeRegistry for InMemoryTypeRegistry {
    fn lookup_by_name(&self, type_name: &str) -> Option<TypeDefinition> {
        self.types.read().get(type_name).cloned()
    }
}
