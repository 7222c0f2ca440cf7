//! Filament - lineage relevance classification and instance normalization.
//!
//! Filament sits between a federated metadata repository's change stream and
//! a lineage-graph store. Given a dynamically typed metadata instance (an
//! entity, relationship, or classification), it decides whether the instance
//! participates in the data-lineage graph and, if so, converts it from its
//! generic property-bag representation into a stable, flattened lineage
//! record.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Filament                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  InstanceNormalizer: property-bag flattening, end-proxies   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  LineageRelevanceClassifier: qualifying sets, structure     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TypeHierarchyResolver: supertype chains, memoization       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TypeRegistry (external): lookup by name, subtype tests     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous, CPU-bound, and immutable after construction:
//! the classifier's qualifying sets are fixed once built, and the resolver
//! only memoizes behind a sync lock, so all components are safe to share
//! across threads without coordination. Malformed data degrades to
//! conservative defaults (empty chain, non-qualifying, `Unknown` status)
//! instead of failing, so one broken instance never stalls a batch.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use filament::config::ClassifierConfig;
//! use filament::classifier::LineageRelevanceClassifier;
//! use filament::hierarchy::TypeHierarchyResolver;
//! use filament::instance::{EntityDetail, PropertyValue, TypeDefinition};
//! use filament::normalizer::InstanceNormalizer;
//! use filament::registry::{InMemoryTypeRegistry, BASE_TYPE};
//!
//! let registry = InMemoryTypeRegistry::new();
//! registry.register_all([
//!     TypeDefinition::root(BASE_TYPE),
//!     TypeDefinition::subtype_of("Asset", BASE_TYPE),
//!     TypeDefinition::subtype_of("DataSet", "Asset"),
//! ]);
//!
//! let resolver = Arc::new(TypeHierarchyResolver::new(Arc::new(registry)));
//! let classifier = LineageRelevanceClassifier::new(resolver, &ClassifierConfig::default());
//! let normalizer = InstanceNormalizer::new();
//!
//! let entity = EntityDetail::new("e1", "DataSet")
//!     .with_property("name", PropertyValue::string("daily_orders"));
//!
//! if classifier.is_qualifying_entity_type("DataSet") {
//!     let record = normalizer.normalize_entity(&entity).unwrap();
//!     assert_eq!(record.display_name.as_deref(), Some("daily_orders"));
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod instance;
pub mod normalizer;
pub mod record;
pub mod registry;

// Re-exports
pub use classifier::LineageRelevanceClassifier;
pub use config::ClassifierConfig;
pub use error::{FilamentError, Result};
pub use hierarchy::TypeHierarchyResolver;
pub use instance::{
    EntityDetail, EntityProxy, InstanceClassification, InstanceStatus, PrimitiveValue,
    PropertyBag, PropertyValue, Relationship, TypeDefinition,
};
pub use normalizer::InstanceNormalizer;
pub use record::{LineageEndpoint, NormalizedLineageRecord, SearchPredicate};
pub use registry::{InMemoryTypeRegistry, TypeRegistry};
