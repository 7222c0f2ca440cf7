//! Lineage relevance classification.
//!
//! Decides whether a generic instance from the change stream participates in
//! the lineage graph. The decision surface is two-tier by design:
//!
//! - **Configurable tier**: the qualifying-classification and
//!   qualifying-relationship-type sets. Built-in defaults, with the
//!   classification set extendable through [`ClassifierConfig`]. Operators can
//!   mark custom classifications as lineage markers without touching code.
//! - **Fixed tier**: the top-level entity categories eligible for lineage at
//!   all. Not configurable; extending which entities may enter the graph is a
//!   backbone change, not an operator setting.
//!
//! All qualifying sets are immutable once the classifier is built and are
//! shared by reference, so the classifier is freely usable from any number of
//! threads.
//!
//! Malformed relationships (missing type, missing end-proxy type) are
//! rejected as non-qualifying rather than surfaced as errors: a broken
//! instance must never enter the lineage graph, and must never stop the rest
//! of a batch either.

use crate::config::ClassifierConfig;
use crate::hierarchy::TypeHierarchyResolver;
use crate::instance::{EntityDetail, InstanceClassification, Relationship};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub mod legacy;

/// Built-in qualifying classification type names.
pub const DEFAULT_LINEAGE_CLASSIFICATIONS: &[&str] = &[
    "Confidentiality",
    "AssetZoneMembership",
    "SubjectArea",
    "AssetOwnership",
    "AssetOrigin",
    "Incomplete",
];

/// Built-in qualifying relationship type names.
pub const DEFAULT_LINEAGE_RELATIONSHIP_TYPES: &[&str] = &[
    "SemanticAssignment",
    "TermCategorization",
    "DataFlow",
    "LineageMapping",
    "ProcessCall",
    "ProcessPort",
    "PortDelegation",
    "PortSchema",
    "NestedSchemaAttribute",
    "AttributeForSchema",
    "AssetSchemaType",
    "ConnectionToAsset",
    "ConnectionEndpoint",
    "DataContentForDataSet",
    "FolderHierarchy",
    "NestedFile",
];

/// Fixed top-level entity categories eligible for lineage. An entity type
/// qualifies when its supertype chain intersects this set. Deliberately not
/// configurable.
pub const LINEAGE_ENTITY_CATEGORIES: &[&str] = &[
    "Asset",
    "RelationalTable",
    "SchemaAttribute",
    "GlossaryTerm",
    "Port",
    "ComplexSchemaType",
    "Connection",
    "Endpoint",
    "FileFolder",
];

/// Decides lineage relevance of entities, relationships, and classifications.
pub struct LineageRelevanceClassifier {
    qualifying_classifications: Arc<HashSet<String>>,
    qualifying_relationship_types: Arc<HashSet<String>>,
    entity_categories: Arc<HashSet<String>>,
    resolver: Arc<TypeHierarchyResolver>,
}

impl LineageRelevanceClassifier {
    /// Builds a classifier from the built-in sets plus the configured extra
    /// classification names. The sets are fixed from here on.
    pub fn new(resolver: Arc<TypeHierarchyResolver>, config: &ClassifierConfig) -> Self {
        let mut classifications: HashSet<String> = DEFAULT_LINEAGE_CLASSIFICATIONS
            .iter()
            .map(|s| s.to_string())
            .collect();
        classifications.extend(config.extra_lineage_classifications.iter().cloned());

        let relationship_types: HashSet<String> = DEFAULT_LINEAGE_RELATIONSHIP_TYPES
            .iter()
            .map(|s| s.to_string())
            .collect();

        let entity_categories: HashSet<String> = LINEAGE_ENTITY_CATEGORIES
            .iter()
            .map(|s| s.to_string())
            .collect();

        Self {
            qualifying_classifications: Arc::new(classifications),
            qualifying_relationship_types: Arc::new(relationship_types),
            entity_categories: Arc::new(entity_categories),
            resolver,
        }
    }

    /// The effective qualifying-classification set (defaults plus extras).
    pub fn qualifying_classifications(&self) -> &HashSet<String> {
        &self.qualifying_classifications
    }

    /// The effective qualifying-relationship-type set.
    pub fn qualifying_relationship_types(&self) -> &HashSet<String> {
        &self.qualifying_relationship_types
    }

    /// True iff at least one classification attached to the entity has a
    /// qualifying type name. Entities with no classifications return false.
    pub fn has_qualifying_classification(&self, entity: &EntityDetail) -> bool {
        entity.classifications.iter().any(|classification| {
            classification
                .type_name()
                .is_some_and(|name| self.qualifying_classifications.contains(name))
        })
    }

    /// True iff the relationship is structurally sound and its type name is
    /// in the qualifying set.
    ///
    /// The structural check comes first: the relationship's own type and both
    /// end-proxy types must be present and resolved. A missing piece rejects
    /// the relationship outright regardless of its nominal type name.
    pub fn is_qualifying_relationship(&self, relationship: &Relationship) -> bool {
        let Some(type_name) = relationship.header.type_name() else {
            debug!(guid = %relationship.header.guid, "relationship has no type, rejecting");
            return false;
        };

        let end_one_type = relationship
            .entity_one_proxy
            .as_ref()
            .and_then(|proxy| proxy.header.type_name());
        let end_two_type = relationship
            .entity_two_proxy
            .as_ref()
            .and_then(|proxy| proxy.header.type_name());
        if end_one_type.is_none() || end_two_type.is_none() {
            debug!(
                guid = %relationship.header.guid,
                type_name,
                "relationship end-proxy type missing, rejecting"
            );
            return false;
        }

        self.qualifying_relationship_types.contains(type_name)
    }

    /// True iff the type's resolved ancestor chain intersects the fixed
    /// top-level lineage categories.
    pub fn is_qualifying_entity_type(&self, type_name: &str) -> bool {
        self.resolver
            .resolve_supertypes(type_name)
            .iter()
            .any(|ancestor| self.entity_categories.contains(ancestor))
    }

    /// Keeps the qualifying classifications of `classifications`, in input
    /// order. Total and idempotent: absent or empty input yields an empty
    /// sequence; entries with no type or a non-qualifying type name are
    /// dropped.
    pub fn filter_qualifying_classifications(
        &self,
        classifications: Option<&[InstanceClassification]>,
    ) -> Vec<InstanceClassification> {
        classifications
            .unwrap_or_default()
            .iter()
            .filter(|classification| {
                classification
                    .type_name()
                    .is_some_and(|name| self.qualifying_classifications.contains(name))
            })
            .cloned()
            .collect()
    }
}
