//! Superseded fixed-list relationship rule.
//!
//! An earlier generation of the ingestion pipeline decided relationship
//! relevance from a hard-coded type list with a special orientation case:
//! `SemanticAssignment` was accepted only when end-proxy **one** was a
//! column-or-table type. The configurable rule in
//! [`LineageRelevanceClassifier`] superseded this and is authoritative; this
//! module preserves the old behavior solely so migrations can compare
//! decisions against it.
//!
//! Known divergences from the authoritative rule, kept rather than
//! reconciled:
//!
//! - `SchemaType` and `SchemaAttributeType` qualify only here.
//! - `DataFlow`, `ProcessCall`, `TermCategorization` and the
//!   connection/file relationship types qualify only in the authoritative
//!   rule.
//! - A `SemanticAssignment` with a glossary term at end one is accepted by
//!   the authoritative rule but rejected here.
//!
//! [`LineageRelevanceClassifier`]: super::LineageRelevanceClassifier

use crate::instance::Relationship;

/// Relationship types the legacy rule accepted.
const LEGACY_RELATIONSHIP_TYPES: &[&str] = &[
    "SemanticAssignment",
    "ProcessPort",
    "PortDelegation",
    "PortSchema",
    "LineageMapping",
    "SchemaType",
    "AttributeForSchema",
    "SchemaAttributeType",
];

/// End-one types the legacy `SemanticAssignment` orientation case accepted.
const SEMANTIC_ASSIGNMENT_END_ONE_TYPES: &[&str] =
    &["RelationalColumn", "RelationalTable", "TabularColumn"];

/// The legacy fixed-list relationship relevance rule. Migration-compatibility
/// surface only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyRelationshipRule;

impl LegacyRelationshipRule {
    pub fn new() -> Self {
        Self
    }

    /// Decides relevance under the legacy rule. Structurally unsound
    /// relationships are rejected, as in the authoritative rule.
    pub fn is_qualifying_relationship(&self, relationship: &Relationship) -> bool {
        let Some(type_name) = relationship.header.type_name() else {
            return false;
        };
        let Some(end_one_type) = relationship
            .entity_one_proxy
            .as_ref()
            .and_then(|proxy| proxy.header.type_name())
        else {
            return false;
        };
        if relationship
            .entity_two_proxy
            .as_ref()
            .and_then(|proxy| proxy.header.type_name())
            .is_none()
        {
            return false;
        }

        if !LEGACY_RELATIONSHIP_TYPES.contains(&type_name) {
            return false;
        }

        // Orientation special case: a SemanticAssignment counts only when the
        // column-or-table side sits at end one.
        if type_name == "SemanticAssignment" {
            return SEMANTIC_ASSIGNMENT_END_ONE_TYPES.contains(&end_one_type);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::EntityProxy;

    fn semantic_assignment(end_one_type: &str, end_two_type: &str) -> Relationship {
        Relationship::new("r1", "SemanticAssignment")
            .with_end_one(EntityProxy::new("p1", end_one_type))
            .with_end_two(EntityProxy::new("p2", end_two_type))
    }

    #[test]
    fn test_semantic_assignment_column_at_end_one_accepted() {
        let rule = LegacyRelationshipRule::new();
        assert!(rule.is_qualifying_relationship(&semantic_assignment(
            "RelationalColumn",
            "GlossaryTerm"
        )));
        assert!(rule.is_qualifying_relationship(&semantic_assignment(
            "RelationalTable",
            "GlossaryTerm"
        )));
        assert!(rule.is_qualifying_relationship(&semantic_assignment(
            "TabularColumn",
            "GlossaryTerm"
        )));
    }

    #[test]
    fn test_semantic_assignment_reversed_orientation_rejected() {
        // Same endpoints, glossary term at end one: the legacy rule says no.
        let rule = LegacyRelationshipRule::new();
        assert!(!rule.is_qualifying_relationship(&semantic_assignment(
            "GlossaryTerm",
            "RelationalColumn"
        )));
    }

    #[test]
    fn test_fixed_list_membership() {
        let rule = LegacyRelationshipRule::new();
        let accepted = Relationship::new("r1", "SchemaType")
            .with_end_one(EntityProxy::new("p1", "DeployedDatabaseSchema"))
            .with_end_two(EntityProxy::new("p2", "RelationalDBSchemaType"));
        assert!(rule.is_qualifying_relationship(&accepted));

        let rejected = Relationship::new("r2", "DataFlow")
            .with_end_one(EntityProxy::new("p1", "Process"))
            .with_end_two(EntityProxy::new("p2", "Process"));
        assert!(!rule.is_qualifying_relationship(&rejected));
    }

    #[test]
    fn test_structural_rejection() {
        let rule = LegacyRelationshipRule::new();
        let rel = Relationship::new("r1", "LineageMapping")
            .with_end_one(EntityProxy::new("p1", "Process"));
        assert!(!rule.is_qualifying_relationship(&rel));
    }
}
