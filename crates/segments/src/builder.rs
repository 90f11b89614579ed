//! Criteria builder — fluent API over the recognized filter fields.
//!
//! Thin typed layer on top of [`SegmentCriteria`]; passing `None` to any
//! setter clears the corresponding field.

use crate::criteria::{fields, RangeBound, SegmentCriteria};
use marketing_core::KycTier;
use serde_json::Value;

pub struct CriteriaBuilder {
    criteria: SegmentCriteria,
}

impl CriteriaBuilder {
    pub fn new() -> Self {
        Self {
            criteria: SegmentCriteria::new(),
        }
    }

    /// Continue editing an existing criteria object.
    pub fn from_criteria(criteria: SegmentCriteria) -> Self {
        Self { criteria }
    }

    pub fn is_active(self, value: Option<bool>) -> Self {
        self.flag(fields::IS_ACTIVE, value)
    }

    pub fn deletion_requested(self, value: Option<bool>) -> Self {
        self.flag(fields::DELETION_REQUESTED, value)
    }

    pub fn nin_verified(self, value: Option<bool>) -> Self {
        self.flag(fields::NIN_VERIFIED, value)
    }

    pub fn bvn_verified(self, value: Option<bool>) -> Self {
        self.flag(fields::BVN_VERIFIED, value)
    }

    pub fn business_info_verified(self, value: Option<bool>) -> Self {
        self.flag(fields::BUSINESS_INFO_VERIFIED, value)
    }

    pub fn has_business(self, value: Option<bool>) -> Self {
        self.flag(fields::HAS_BUSINESS, value)
    }

    pub fn has_storefront(self, value: Option<bool>) -> Self {
        self.flag(fields::HAS_STOREFRONT, value)
    }

    pub fn tier(self, value: Option<&str>) -> Self {
        self.string_field(fields::TIER, value)
    }

    pub fn kyc_tier(self, value: Option<KycTier>) -> Self {
        self.string_field(fields::KYC_TIER, value.map(|t| t.as_str()))
    }

    pub fn created_after(self, value: Option<&str>) -> Self {
        self.string_field(fields::CREATED_AFTER, value)
    }

    pub fn created_before(self, value: Option<&str>) -> Self {
        self.string_field(fields::CREATED_BEFORE, value)
    }

    pub fn created_between(self, start: Option<&str>, end: Option<&str>) -> Self {
        let criteria = self
            .criteria
            .set_date_range_bound(RangeBound::Start, start)
            .set_date_range_bound(RangeBound::End, end);
        Self { criteria }
    }

    /// Escape hatch for fields this builder has no typed setter for.
    pub fn field(self, field: &str, value: Option<Value>) -> Self {
        Self {
            criteria: self.criteria.set_field(field, value),
        }
    }

    pub fn build(self) -> SegmentCriteria {
        self.criteria
    }

    fn flag(self, field: &'static str, value: Option<bool>) -> Self {
        Self {
            criteria: self.criteria.set_field(field, value.map(Value::Bool)),
        }
    }

    fn string_field(self, field: &'static str, value: Option<&str>) -> Self {
        Self {
            criteria: self
                .criteria
                .set_field(field, value.map(|v| Value::String(v.to_string()))),
        }
    }
}

impl Default for CriteriaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
