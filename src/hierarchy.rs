//! Supertype chain resolution.
//!
//! Lineage relevance for entities is decided by "is-a" membership: a type
//! qualifies when anything in its ancestor chain is one of the top-level
//! lineage categories. [`TypeHierarchyResolver`] produces that chain from the
//! external type catalog.
//!
//! The walk is total. An unknown type, a missing intermediate definition, or
//! an absent supertype link truncates the chain without error, so the result
//! only ever shrinks when catalog data is missing. The catalog guarantees no
//! cycle protection, so the walk carries a visited-set guard; for an acyclic
//! catalog the guard never fires and the result is exactly the chain from the
//! type up to, but excluding, the universal base type.
//!
//! Type catalogs are read-mostly, so resolved chains are memoized behind a
//! sync lock. [`TypeHierarchyResolver::invalidate`] drops the memo when the
//! provider reloads its catalog.

use crate::registry::{TypeRegistry, BASE_TYPE};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves a type name to the set containing the type itself plus every
/// ancestor up to, but excluding, the base type.
pub struct TypeHierarchyResolver {
    registry: Arc<dyn TypeRegistry>,
    cache: RwLock<HashMap<String, Arc<HashSet<String>>>>,
}

impl TypeHierarchyResolver {
    /// Creates a resolver over the given type-system provider.
    pub fn new(registry: Arc<dyn TypeRegistry>) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves the supertype chain of `type_name`.
    ///
    /// Never fails: unknown types yield whatever was accumulated before the
    /// lookup miss, which for a wholly unknown type is the empty set.
    /// Resolving the base type itself also yields the empty set.
    pub fn resolve_supertypes(&self, type_name: &str) -> Arc<HashSet<String>> {
        if let Some(cached) = self.cache.read().get(type_name) {
            return Arc::clone(cached);
        }

        let resolved = Arc::new(self.walk(type_name));
        self.cache
            .write()
            .insert(type_name.to_string(), Arc::clone(&resolved));
        resolved
    }

    /// Drops all memoized chains. Call after the type catalog changes.
    pub fn invalidate(&self) {
        self.cache.write().clear();
    }

    fn walk(&self, type_name: &str) -> HashSet<String> {
        let mut chain = HashSet::new();
        let mut visited = HashSet::new();
        let mut current = type_name.to_string();

        loop {
            if current == BASE_TYPE {
                break;
            }
            if !visited.insert(current.clone()) {
                // The catalog declared a supertype cycle. The original walk
                // had no guard here and would not terminate; truncating at
                // the revisit keeps acyclic results identical.
                warn!(type_name, at = %current, "supertype cycle detected, truncating chain");
                break;
            }
            let Some(definition) = self.registry.lookup_by_name(&current) else {
                debug!(type_name, missing = %current, "unknown type truncates supertype chain");
                break;
            };
            chain.insert(definition.name);
            match definition.super_type_name {
                Some(next) => current = next,
                None => break,
            }
        }

        chain
    }
}
