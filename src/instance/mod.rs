//! Generic-instance data model.
//!
//! The federated metadata repository delivers change events as dynamically
//! typed instances: entities, relationships, and the classifications attached
//! to entities. All of them share a common header (identity, type descriptor,
//! lifecycle status, provenance, version) and carry their attributes in a
//! polymorphic property bag.
//!
//! Structural integrity of arriving instances cannot be assumed: the type
//! descriptor, status, and relationship end-proxies are all optional here,
//! and the classifier treats their absence as "not lineage-relevant" rather
//! than as an error. Instances are immutable snapshots owned by the event
//! layer; nothing in this crate mutates one.
//!
//! # Key Types
//!
//! - [`EntityDetail`]: full entity with property bag and classifications
//! - [`Relationship`]: link between two [`EntityProxy`] endpoints, with fixed
//!   one/two orientation
//! - [`EntityProxy`]: lightweight endpoint projection (unique properties only)
//! - [`InstanceClassification`]: classification attached to an entity
//! - [`PropertyValue`] / [`PrimitiveValue`]: tagged polymorphic values
//! - [`InstanceStatus`]: ordered lifecycle enum with a total name table

pub mod properties;
pub mod status;

pub use properties::{PrimitiveValue, PropertyBag, PropertyValue};
pub use status::InstanceStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Property holding an instance's display name.
pub const NAME_PROPERTY: &str = "name";

/// Unique-name property carried by end-proxies.
pub const QUALIFIED_NAME_PROPERTY: &str = "qualifiedName";

/// Nested free-form map property resolved by the additional-properties
/// accessor.
pub const ADDITIONAL_PROPERTIES_PROPERTY: &str = "additionalProperties";

/// A type definition from the external type registry: a name and an optional
/// link to its supertype. Definitions form a forest terminating at the
/// universal base type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Type name, unique within the registry.
    pub name: String,
    /// Declared supertype, absent for roots.
    pub super_type_name: Option<String>,
}

impl TypeDefinition {
    /// Creates a root type definition.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_type_name: None,
        }
    }

    /// Creates a subtype definition.
    pub fn subtype_of(name: impl Into<String>, super_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_type_name: Some(super_type.into()),
        }
    }
}

/// Type descriptor stamped on an instance: the resolved type name plus an
/// optional description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceType {
    pub name: String,
    pub description: Option<String>,
}

impl InstanceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Header shared by every generic instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceHeader {
    /// Globally unique instance identifier.
    pub guid: String,
    /// Type descriptor. Absent on malformed instances.
    pub type_def: Option<InstanceType>,
    /// Lifecycle status name as delivered by the repository. Mapped through
    /// the total [`InstanceStatus`] table at normalization time. Absent on
    /// malformed instances.
    pub status: Option<String>,
    /// Identifier of the owning metadata collection.
    pub metadata_collection_id: String,
    /// Actor that created the instance.
    pub created_by: Option<String>,
    /// Actor that last updated the instance.
    pub updated_by: Option<String>,
    /// Creation timestamp.
    pub create_time: Option<DateTime<Utc>>,
    /// Last-update timestamp.
    pub update_time: Option<DateTime<Utc>>,
    /// Monotonic version counter.
    pub version: i64,
}

impl InstanceHeader {
    /// Name of this instance's type, if the descriptor is present.
    pub fn type_name(&self) -> Option<&str> {
        self.type_def.as_ref().map(|t| t.name.as_str())
    }
}

/// A classification attached to an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceClassification {
    /// Classification type name (e.g. "Confidentiality"). Absent entries are
    /// dropped by the relevance filter.
    pub type_def: Option<InstanceType>,
    /// Lifecycle status name of the classification itself.
    pub status: Option<String>,
    /// Classification-specific properties.
    pub properties: PropertyBag,
    /// Actor that attached the classification.
    pub created_by: Option<String>,
    /// Actor that last updated it.
    pub updated_by: Option<String>,
    /// Attachment timestamp.
    pub create_time: Option<DateTime<Utc>>,
    /// Last-update timestamp.
    pub update_time: Option<DateTime<Utc>>,
    /// Version counter.
    pub version: i64,
}

impl InstanceClassification {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_def: Some(InstanceType::new(type_name)),
            status: Some("Active".to_string()),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Type name of this classification, if present.
    pub fn type_name(&self) -> Option<&str> {
        self.type_def.as_ref().map(|t| t.name.as_str())
    }
}

/// A full entity instance: header, property bag, attached classifications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDetail {
    pub header: InstanceHeader,
    /// Declared properties of the entity.
    pub properties: PropertyBag,
    /// Classifications attached to the entity, possibly empty.
    pub classifications: Vec<InstanceClassification>,
}

impl EntityDetail {
    pub fn new(guid: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            header: InstanceHeader {
                guid: guid.into(),
                type_def: Some(InstanceType::new(type_name)),
                status: Some("Active".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_classification(mut self, classification: InstanceClassification) -> Self {
        self.classifications.push(classification);
        self
    }
}

/// Lightweight projection of a relationship endpoint: identity and type plus
/// the unique-name property only, never the full bag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityProxy {
    pub header: InstanceHeader,
    /// Restricted bag holding only the entity's unique properties.
    pub unique_properties: PropertyBag,
}

impl EntityProxy {
    pub fn new(guid: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            header: InstanceHeader {
                guid: guid.into(),
                type_def: Some(InstanceType::new(type_name)),
                status: Some("Active".to_string()),
                ..Default::default()
            },
            unique_properties: PropertyBag::new(),
        }
    }

    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.unique_properties
            .insert(QUALIFIED_NAME_PROPERTY.into(), PropertyValue::string(qualified_name));
        self
    }
}

/// A relationship instance connecting two entities through end-proxies with
/// fixed "one"/"two" orientation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
    pub header: InstanceHeader,
    /// Declared properties of the relationship.
    pub properties: PropertyBag,
    /// Endpoint at end one. Absent on malformed instances.
    pub entity_one_proxy: Option<EntityProxy>,
    /// Endpoint at end two. Absent on malformed instances.
    pub entity_two_proxy: Option<EntityProxy>,
}

impl Relationship {
    pub fn new(guid: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            header: InstanceHeader {
                guid: guid.into(),
                type_def: Some(InstanceType::new(type_name)),
                status: Some("Active".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_end_one(mut self, proxy: EntityProxy) -> Self {
        self.entity_one_proxy = Some(proxy);
        self
    }

    pub fn with_end_two(mut self, proxy: EntityProxy) -> Self {
        self.entity_two_proxy = Some(proxy);
        self
    }
}
