//! Flattened lineage records.
//!
//! Output shape of the normalizer: everything the lineage-graph store needs,
//! with the polymorphic property bag collapsed to a plain name-to-primitive
//! map and relationship endpoints reduced to three-field summaries. Records
//! are freshly allocated per normalization call and hold no reference back to
//! the source instance.

use crate::instance::{InstanceStatus, PrimitiveValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A generic instance flattened for the lineage graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLineageRecord {
    /// Instance identity.
    pub guid: String,
    /// Owning metadata collection.
    pub metadata_collection_id: String,
    /// Designated display name, if the source carried one.
    pub display_name: Option<String>,
    /// Resolved type name.
    pub type_name: String,
    /// Type description, if declared.
    pub type_description: Option<String>,
    /// Lifecycle status; unrecognized source statuses arrive as `Unknown`.
    pub status: InstanceStatus,
    /// Creating actor.
    pub created_by: Option<String>,
    /// Last updating actor.
    pub updated_by: Option<String>,
    /// Creation timestamp.
    pub create_time: Option<DateTime<Utc>>,
    /// Last-update timestamp.
    pub update_time: Option<DateTime<Utc>>,
    /// Version counter.
    pub version: i64,
    /// Flattened properties: primitives as-is, enums as description text,
    /// unrecognized kinds omitted.
    pub properties: BTreeMap<String, PrimitiveValue>,
    /// Normalized classifications attached to an entity.
    pub classifications: Vec<NormalizedLineageRecord>,
    /// Endpoint at end one, for relationships.
    pub from: Option<LineageEndpoint>,
    /// Endpoint at end two, for relationships.
    pub to: Option<LineageEndpoint>,
}

/// Summary of one relationship endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageEndpoint {
    /// Entity identity.
    pub guid: String,
    /// Entity type name.
    pub type_name: String,
    /// Unique name of the entity, if the proxy carried one.
    pub qualified_name: Option<String>,
}

/// Single string-equality match predicate for the external query layer.
///
/// Not a filter DSL; the query layer composes these itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPredicate {
    /// Property name to match on.
    pub property_name: String,
    /// Exact string value to match.
    pub value: String,
}

impl SearchPredicate {
    pub fn new(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            value: value.into(),
        }
    }

    /// Applies the predicate to a candidate property value.
    pub fn matches(&self, candidate: &str) -> bool {
        self.value == candidate
    }
}
