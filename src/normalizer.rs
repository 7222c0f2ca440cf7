//! Generic-instance normalization.
//!
//! Converts instances that already passed relevance checks into flattened
//! [`NormalizedLineageRecord`]s for the lineage-graph store. Every function
//! here is a pure, synchronous transformation: given a well-formed instance
//! it never fails, never blocks, and never mutates its input.
//!
//! The property accessors are total over any bag. For the flat map,
//! primitives pass through, enumerations resolve to their description text,
//! and unrecognized value kinds (nested maps included) are omitted entirely
//! rather than emitted as nulls. The additional-properties accessor has a
//! deliberately narrower contract: it resolves only primitive nested values
//! and renders everything else (enums included) as `None`.
//!
//! Entities and relationships reaching this layer are expected to carry a
//! type descriptor and status; the relevance classifier screens
//! relationships, and the event layer screens entities. An instance that
//! lacks them anyway is reported as [`FilamentError::MalformedInstance`] — a
//! caller bug to treat as fatal, not a condition this layer papers over.
//! End-proxies are the one exception: their restricted shape legitimately
//! carries less, so proxy normalization stays total.

use crate::error::{FilamentError, Result};
use crate::instance::{
    EntityDetail, EntityProxy, InstanceClassification, InstanceHeader, InstanceStatus,
    PrimitiveValue, PropertyBag, PropertyValue, Relationship, NAME_PROPERTY,
    QUALIFIED_NAME_PROPERTY,
};
use crate::record::{LineageEndpoint, NormalizedLineageRecord, SearchPredicate};
use std::collections::BTreeMap;

/// Stateless converter from generic instances to flattened lineage records.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstanceNormalizer;

impl InstanceNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes a full entity, including its attached classifications.
    ///
    /// Precondition: the entity carries a type descriptor and a status.
    pub fn normalize_entity(&self, entity: &EntityDetail) -> Result<NormalizedLineageRecord> {
        let mut record = self.normalize_header(&entity.header)?;
        record.display_name = display_name_of(&entity.properties);
        record.properties = self.extract_property_map(&entity.properties);
        record.classifications = entity
            .classifications
            .iter()
            .filter(|classification| classification.type_def.is_some())
            .map(|classification| self.normalize_classification(classification))
            .collect();
        Ok(record)
    }

    /// Normalizes a relationship, preserving the source's own end ordering:
    /// `from` is end one and `to` is end two, never recomputed.
    ///
    /// Precondition: the relationship carries a type descriptor, status, and
    /// both end-proxies (all guaranteed for relationships that passed the
    /// classifier's structural check).
    pub fn normalize_relationship(
        &self,
        relationship: &Relationship,
    ) -> Result<NormalizedLineageRecord> {
        let mut record = self.normalize_header(&relationship.header)?;
        record.properties = self.extract_property_map(&relationship.properties);

        let end_one = relationship.entity_one_proxy.as_ref().ok_or_else(|| {
            FilamentError::MissingEndProxy {
                guid: relationship.header.guid.clone(),
                end: "one",
            }
        })?;
        let end_two = relationship.entity_two_proxy.as_ref().ok_or_else(|| {
            FilamentError::MissingEndProxy {
                guid: relationship.header.guid.clone(),
                end: "two",
            }
        })?;
        record.from = Some(self.normalize_endpoint_proxy(end_one));
        record.to = Some(self.normalize_endpoint_proxy(end_two));
        Ok(record)
    }

    /// Normalizes an end-proxy into an endpoint summary, sourcing only the
    /// proxy's restricted unique-properties subset. Total: a proxy with no
    /// resolved type or no unique name still yields a summary.
    pub fn normalize_endpoint_proxy(&self, proxy: &EntityProxy) -> LineageEndpoint {
        LineageEndpoint {
            guid: proxy.header.guid.clone(),
            type_name: proxy.header.type_name().unwrap_or_default().to_string(),
            qualified_name: proxy
                .unique_properties
                .get(QUALIFIED_NAME_PROPERTY)
                .and_then(resolve_flat_value)
                .map(|value| value.as_display_string()),
        }
    }

    /// Normalizes one attached classification. Total: classifications carry
    /// whatever provenance they have; a missing status maps to `Unknown`.
    pub fn normalize_classification(
        &self,
        classification: &InstanceClassification,
    ) -> NormalizedLineageRecord {
        let (type_name, type_description) = match &classification.type_def {
            Some(type_def) => (type_def.name.clone(), type_def.description.clone()),
            None => (String::new(), None),
        };
        NormalizedLineageRecord {
            type_name,
            type_description,
            display_name: display_name_of(&classification.properties),
            status: classification
                .status
                .as_deref()
                .map(InstanceStatus::from_status_name)
                .unwrap_or_default(),
            created_by: classification.created_by.clone(),
            updated_by: classification.updated_by.clone(),
            create_time: classification.create_time,
            update_time: classification.update_time,
            version: classification.version,
            properties: self.extract_property_map(&classification.properties),
            ..Default::default()
        }
    }

    /// Flattens a property bag to an ordered name-to-primitive map.
    ///
    /// Primitive values pass through as-is, enumeration values resolve to
    /// their description text, and any unrecognized value kind is omitted
    /// from the output, never emitted as a null. Total over any bag, and
    /// idempotent: the same bag always yields the same map.
    pub fn extract_property_map(&self, bag: &PropertyBag) -> BTreeMap<String, PrimitiveValue> {
        bag.iter()
            .filter_map(|(name, value)| resolve_flat_value(value).map(|v| (name.clone(), v)))
            .collect()
    }

    /// Resolves the nested map-valued property `name` from the bag.
    ///
    /// Narrower contract than [`extract_property_map`]: only
    /// primitive-category nested values resolve; everything else (nested
    /// enums included) resolves to `None`. An absent or non-map property
    /// yields an empty result.
    ///
    /// [`extract_property_map`]: InstanceNormalizer::extract_property_map
    pub fn extract_additional_map_property(
        &self,
        bag: &PropertyBag,
        name: &str,
    ) -> BTreeMap<String, Option<PrimitiveValue>> {
        let Some(nested) = bag.get(name).and_then(PropertyValue::as_map) else {
            return BTreeMap::new();
        };
        nested
            .iter()
            .map(|(key, value)| (key.clone(), value.as_primitive().cloned()))
            .collect()
    }

    /// Builds a single string-equality match predicate for the external
    /// query layer.
    pub fn to_search_predicate(&self, name: &str, value: &str) -> SearchPredicate {
        SearchPredicate::new(name, value)
    }

    fn normalize_header(&self, header: &InstanceHeader) -> Result<NormalizedLineageRecord> {
        let type_def = header.type_def.as_ref().ok_or_else(|| {
            FilamentError::MalformedInstance {
                guid: header.guid.clone(),
                reason: "missing type descriptor".to_string(),
            }
        })?;
        let status_name = header.status.as_deref().ok_or_else(|| {
            FilamentError::MalformedInstance {
                guid: header.guid.clone(),
                reason: "missing status".to_string(),
            }
        })?;

        Ok(NormalizedLineageRecord {
            guid: header.guid.clone(),
            metadata_collection_id: header.metadata_collection_id.clone(),
            type_name: type_def.name.clone(),
            type_description: type_def.description.clone(),
            status: InstanceStatus::from_status_name(status_name),
            created_by: header.created_by.clone(),
            updated_by: header.updated_by.clone(),
            create_time: header.create_time,
            update_time: header.update_time,
            version: header.version,
            ..Default::default()
        })
    }
}

/// Resolves one property value for the flat map: primitives pass through,
/// enums become their description text, anything else is unrecognized.
fn resolve_flat_value(value: &PropertyValue) -> Option<PrimitiveValue> {
    match value {
        PropertyValue::Primitive(primitive) => Some(primitive.clone()),
        PropertyValue::Enum { description, .. } => {
            Some(PrimitiveValue::String(description.clone()))
        }
        PropertyValue::Map(_) | PropertyValue::Other => None,
    }
}

/// Designated display name of a bag, if present and resolvable.
fn display_name_of(bag: &PropertyBag) -> Option<String> {
    bag.get(NAME_PROPERTY)
        .and_then(resolve_flat_value)
        .map(|value| value.as_display_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::ADDITIONAL_PROPERTIES_PROPERTY;
    use chrono::TimeZone;
    use chrono::Utc;

    fn sample_bag() -> PropertyBag {
        let mut bag = PropertyBag::new();
        bag.insert(NAME_PROPERTY.into(), PropertyValue::string("col1"));
        bag.insert(
            "position".into(),
            PropertyValue::Primitive(PrimitiveValue::Int(4)),
        );
        bag.insert(
            "sortOrder".into(),
            PropertyValue::Enum {
                symbol: "ASC".into(),
                description: "Ascending".into(),
            },
        );
        bag.insert("unmodelled".into(), PropertyValue::Other);
        bag
    }

    #[test]
    fn test_extract_property_map_resolves_and_omits() {
        let normalizer = InstanceNormalizer::new();
        let map = normalizer.extract_property_map(&sample_bag());

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("name"), Some(&PrimitiveValue::String("col1".into())));
        assert_eq!(map.get("position"), Some(&PrimitiveValue::Int(4)));
        // Enum resolved to its description text.
        assert_eq!(
            map.get("sortOrder"),
            Some(&PrimitiveValue::String("Ascending".into()))
        );
        // Unrecognized kinds are omitted, not null-valued.
        assert!(!map.contains_key("unmodelled"));
    }

    #[test]
    fn test_extract_property_map_is_idempotent() {
        let normalizer = InstanceNormalizer::new();
        let bag = sample_bag();
        assert_eq!(
            normalizer.extract_property_map(&bag),
            normalizer.extract_property_map(&bag)
        );
    }

    #[test]
    fn test_extract_additional_map_property() {
        let normalizer = InstanceNormalizer::new();
        let mut nested = PropertyBag::new();
        nested.insert("encoding".into(), PropertyValue::string("utf-8"));
        nested.insert(
            "compression".into(),
            PropertyValue::Enum {
                symbol: "GZIP".into(),
                description: "gzip".into(),
            },
        );
        let mut bag = PropertyBag::new();
        bag.insert(
            ADDITIONAL_PROPERTIES_PROPERTY.into(),
            PropertyValue::Map(nested),
        );

        let map = normalizer.extract_additional_map_property(&bag, ADDITIONAL_PROPERTIES_PROPERTY);
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("encoding"),
            Some(&Some(PrimitiveValue::String("utf-8".into())))
        );
        // Nested enums resolve to None under the narrower contract.
        assert_eq!(map.get("compression"), Some(&None));
    }

    #[test]
    fn test_extract_additional_map_property_absent_is_empty() {
        let normalizer = InstanceNormalizer::new();
        let bag = sample_bag();
        assert!(normalizer
            .extract_additional_map_property(&bag, ADDITIONAL_PROPERTIES_PROPERTY)
            .is_empty());
        // A present but non-map property also yields an empty result.
        assert!(normalizer
            .extract_additional_map_property(&bag, NAME_PROPERTY)
            .is_empty());
    }

    #[test]
    fn test_normalize_entity() {
        let normalizer = InstanceNormalizer::new();
        let mut entity = EntityDetail::new("e1", "RelationalColumn")
            .with_property(NAME_PROPERTY, PropertyValue::string("col1"))
            .with_classification(InstanceClassification::new("Confidentiality"));
        entity.header.metadata_collection_id = "collection-1".into();
        entity.header.created_by = Some("etl".into());
        entity.header.create_time = Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        entity.header.version = 3;

        let record = normalizer.normalize_entity(&entity).unwrap();
        assert_eq!(record.guid, "e1");
        assert_eq!(record.metadata_collection_id, "collection-1");
        assert_eq!(record.display_name.as_deref(), Some("col1"));
        assert_eq!(record.type_name, "RelationalColumn");
        assert_eq!(record.status, InstanceStatus::Active);
        assert_eq!(record.created_by.as_deref(), Some("etl"));
        assert_eq!(record.version, 3);
        assert_eq!(record.classifications.len(), 1);
        assert_eq!(record.classifications[0].type_name, "Confidentiality");
        assert!(record.from.is_none() && record.to.is_none());
    }

    #[test]
    fn test_unrecognized_status_maps_to_unknown() {
        let normalizer = InstanceNormalizer::new();
        let mut entity = EntityDetail::new("e1", "RelationalColumn");
        entity.header.status = Some("Obsolete".into());
        let record = normalizer.normalize_entity(&entity).unwrap();
        assert_eq!(record.status, InstanceStatus::Unknown);
    }

    #[test]
    fn test_normalize_entity_without_type_is_caller_bug() {
        let normalizer = InstanceNormalizer::new();
        let mut entity = EntityDetail::new("e1", "RelationalColumn");
        entity.header.type_def = None;
        let err = normalizer.normalize_entity(&entity).unwrap_err();
        assert!(err.is_caller_bug());

        let mut entity = EntityDetail::new("e2", "RelationalColumn");
        entity.header.status = None;
        let err = normalizer.normalize_entity(&entity).unwrap_err();
        assert!(err.is_caller_bug());
    }

    #[test]
    fn test_normalize_relationship_preserves_end_order() {
        let normalizer = InstanceNormalizer::new();
        let rel = Relationship::new("r1", "SemanticAssignment")
            .with_end_one(EntityProxy::new("term-1", "GlossaryTerm").with_qualified_name("gt.q"))
            .with_end_two(EntityProxy::new("col-1", "RelationalColumn").with_qualified_name("col.q"));

        let record = normalizer.normalize_relationship(&rel).unwrap();
        assert_eq!(record.type_name, "SemanticAssignment");
        let from = record.from.unwrap();
        let to = record.to.unwrap();
        // Source orientation kept as-is, never recomputed.
        assert_eq!(from.guid, "term-1");
        assert_eq!(from.type_name, "GlossaryTerm");
        assert_eq!(from.qualified_name.as_deref(), Some("gt.q"));
        assert_eq!(to.guid, "col-1");
        assert_eq!(to.type_name, "RelationalColumn");
    }

    #[test]
    fn test_normalize_relationship_missing_proxy_is_error() {
        let normalizer = InstanceNormalizer::new();
        let rel = Relationship::new("r1", "SemanticAssignment")
            .with_end_one(EntityProxy::new("term-1", "GlossaryTerm"));
        let err = normalizer.normalize_relationship(&rel).unwrap_err();
        assert!(err.is_caller_bug());
        assert!(err.to_string().contains("two"));
    }

    #[test]
    fn test_normalize_endpoint_proxy_is_total() {
        let normalizer = InstanceNormalizer::new();
        // Restricted subset only, and the proxy may carry even less.
        let mut proxy = EntityProxy::default();
        proxy.header.guid = "p1".into();
        let endpoint = normalizer.normalize_endpoint_proxy(&proxy);
        assert_eq!(endpoint.guid, "p1");
        assert_eq!(endpoint.type_name, "");
        assert_eq!(endpoint.qualified_name, None);
    }

    #[test]
    fn test_to_search_predicate() {
        let normalizer = InstanceNormalizer::new();
        let predicate = normalizer.to_search_predicate("qualifiedName", "db.table.col1");
        assert_eq!(predicate.property_name, "qualifiedName");
        assert!(predicate.matches("db.table.col1"));
    }
}
