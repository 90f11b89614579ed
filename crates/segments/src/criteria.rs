//! Dynamic segment criteria — a sparse filter object evaluated server-side.
//!
//! Key absence means "no constraint". A stored `false` and an absent key
//! are different things: clearing a field removes the key entirely rather
//! than writing `null` or an empty marker, and the serialized object must
//! keep that shape on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field names recognized by the server-side segment evaluator. Unknown
/// names still pass through [`SegmentCriteria::set_field`] unchanged, so a
/// new server-side field needs no client change.
pub mod fields {
    pub const IS_ACTIVE: &str = "is_active";
    pub const DELETION_REQUESTED: &str = "deletion_requested";
    pub const NIN_VERIFIED: &str = "nin_verified";
    pub const BVN_VERIFIED: &str = "bvn_verified";
    pub const BUSINESS_INFO_VERIFIED: &str = "business_info_verified";
    pub const HAS_BUSINESS: &str = "has_business";
    pub const HAS_STOREFRONT: &str = "has_storefront";
    pub const TIER: &str = "tier";
    pub const KYC_TIER: &str = "kyc_tier";
    pub const CREATED_AFTER: &str = "created_after";
    pub const CREATED_BEFORE: &str = "created_before";
    pub const CREATED_BETWEEN: &str = "created_between";
}

/// One bound of the `created_between` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
}

impl RangeBound {
    fn key(self) -> &'static str {
        match self {
            RangeBound::Start => "start",
            RangeBound::End => "end",
        }
    }
}

/// The criteria object for a dynamic segment. Built incrementally during an
/// edit session and serialized once at submission time; every operation is
/// pure and returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentCriteria {
    fields: BTreeMap<String, Value>,
}

impl SegmentCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear a single field. `None`, JSON `null`, and the empty
    /// string all mean "unconstrained" and remove the key, whether or not
    /// it was present before.
    pub fn set_field(&self, field: &str, value: Option<Value>) -> Self {
        let mut next = self.clone();
        match value {
            Some(v) if !is_unset(&v) => {
                next.fields.insert(field.to_string(), v);
            }
            _ => {
                next.fields.remove(field);
            }
        }
        next
    }

    /// Set or clear one bound of `created_between`. Setting a bound creates
    /// the range object if absent; clearing the last remaining bound removes
    /// the range object from the criteria entirely.
    pub fn set_date_range_bound(&self, bound: RangeBound, value: Option<&str>) -> Self {
        let mut next = self.clone();
        let mut range = match next.fields.get(fields::CREATED_BETWEEN) {
            Some(Value::Object(map)) => map.clone(),
            _ => serde_json::Map::new(),
        };
        match value {
            Some(v) if !v.is_empty() => {
                range.insert(bound.key().to_string(), Value::String(v.to_string()));
            }
            _ => {
                range.remove(bound.key());
            }
        }
        if range.is_empty() {
            next.fields.remove(fields::CREATED_BETWEEN);
        } else {
            next.fields
                .insert(fields::CREATED_BETWEEN.to_string(), Value::Object(range));
        }
        next
    }

    /// The canonical JSON object, sent verbatim as the `criteria` field of
    /// segment create/update requests. Every key present carries a concrete
    /// value; booleans serialize as JSON booleans, never strings.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_field_stores_value() {
        let criteria = SegmentCriteria::new().set_field(fields::IS_ACTIVE, Some(json!(true)));
        assert_eq!(criteria.get(fields::IS_ACTIVE), Some(&json!(true)));
    }

    #[test]
    fn test_clearing_removes_key() {
        let criteria = SegmentCriteria::new().set_field(fields::IS_ACTIVE, Some(json!(false)));
        for cleared in [
            criteria.set_field(fields::IS_ACTIVE, None),
            criteria.set_field(fields::IS_ACTIVE, Some(json!(null))),
            criteria.set_field(fields::IS_ACTIVE, Some(json!(""))),
        ] {
            assert!(cleared.is_empty());
            assert_eq!(cleared.get(fields::IS_ACTIVE), None);
        }
    }

    #[test]
    fn test_clearing_absent_key_is_noop() {
        let criteria = SegmentCriteria::new().set_field(fields::TIER, None);
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_stored_false_is_not_absent() {
        let criteria =
            SegmentCriteria::new().set_field(fields::DELETION_REQUESTED, Some(json!(false)));
        assert_eq!(criteria.get(fields::DELETION_REQUESTED), Some(&json!(false)));
        assert_eq!(
            criteria.to_value(),
            json!({ "deletion_requested": false })
        );
    }

    #[test]
    fn test_operations_do_not_mutate_receiver() {
        let original = SegmentCriteria::new().set_field(fields::TIER, Some(json!("EARLY_USER")));
        let _ = original.set_field(fields::TIER, None);
        assert_eq!(original.get(fields::TIER), Some(&json!("EARLY_USER")));
    }

    #[test]
    fn test_unknown_field_passes_through() {
        let criteria = SegmentCriteria::new().set_field("referral_code_used", Some(json!(true)));
        assert_eq!(criteria.to_value(), json!({ "referral_code_used": true }));
    }

    #[test]
    fn test_date_range_start_set_then_cleared() {
        let with_start = SegmentCriteria::new()
            .set_date_range_bound(RangeBound::Start, Some("2024-01-01T00:00"));
        assert_eq!(
            with_start.to_value(),
            json!({ "created_between": { "start": "2024-01-01T00:00" } })
        );

        let cleared = with_start.set_date_range_bound(RangeBound::Start, Some(""));
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_date_range_both_bounds_independent() {
        let both = SegmentCriteria::new()
            .set_date_range_bound(RangeBound::Start, Some("2024-01-01T00:00"))
            .set_date_range_bound(RangeBound::End, Some("2024-06-30T23:59"));
        assert_eq!(
            both.to_value(),
            json!({ "created_between": {
                "start": "2024-01-01T00:00",
                "end": "2024-06-30T23:59",
            }})
        );

        let end_only = both.set_date_range_bound(RangeBound::Start, None);
        assert_eq!(
            end_only.to_value(),
            json!({ "created_between": { "end": "2024-06-30T23:59" } })
        );

        let start_only = both.set_date_range_bound(RangeBound::End, None);
        assert_eq!(
            start_only.to_value(),
            json!({ "created_between": { "start": "2024-01-01T00:00" } })
        );
    }

    #[test]
    fn test_range_and_open_bounds_coexist() {
        // created_after/created_before and created_between are independent
        // constraint shapes; the builder never reconciles them.
        let criteria = SegmentCriteria::new()
            .set_field(fields::CREATED_AFTER, Some(json!("2024-01-01T00:00")))
            .set_date_range_bound(RangeBound::Start, Some("2024-03-01T00:00"));
        assert_eq!(criteria.len(), 2);
        assert!(criteria.get(fields::CREATED_AFTER).is_some());
        assert!(criteria.get(fields::CREATED_BETWEEN).is_some());
    }

    #[test]
    fn test_round_trip_serialization() {
        let criteria = SegmentCriteria::new()
            .set_field(fields::IS_ACTIVE, Some(json!(true)))
            .set_field(fields::TIER, Some(json!("EARLY_USER")));
        assert_eq!(
            criteria.to_value(),
            json!({ "is_active": true, "tier": "EARLY_USER" })
        );

        let wire = serde_json::to_string(&criteria).unwrap();
        let back: SegmentCriteria = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, criteria);
    }
}
