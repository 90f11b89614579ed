//! Segment resources — named, durable user groupings, either manually
//! enumerated or dynamically defined by a criteria object.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use marketing_core::config::SegmentsConfig;
use marketing_core::{MarketingError, MarketingResult};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::criteria::SegmentCriteria;

/// How a segment's membership is defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SegmentKind {
    /// Explicitly enumerated member list.
    Manual { user_ids: Vec<Uuid> },
    /// Membership evaluated server-side from the criteria object.
    Dynamic { criteria: SegmentCriteria },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: SegmentKind,
    /// Membership refresh cadence; manual segments have none.
    pub refresh_interval_secs: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Segment {
    pub fn is_dynamic(&self) -> bool {
        matches!(self.kind, SegmentKind::Dynamic { .. })
    }
}

/// In-memory segment registry.
pub struct SegmentStore {
    segments: DashMap<Uuid, Segment>,
    refresh_interval_secs: u64,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::with_config(&SegmentsConfig::default())
    }

    pub fn with_config(config: &SegmentsConfig) -> Self {
        Self {
            segments: DashMap::new(),
            refresh_interval_secs: config.refresh_interval_secs,
        }
    }

    /// Create a manually enumerated segment.
    pub fn create_manual(
        &self,
        name: String,
        description: Option<String>,
        user_ids: Vec<Uuid>,
    ) -> Segment {
        self.insert(
            name,
            description,
            SegmentKind::Manual { user_ids },
            None,
        )
    }

    /// Create a dynamic segment from a criteria object.
    pub fn create_dynamic(
        &self,
        name: String,
        description: Option<String>,
        criteria: SegmentCriteria,
    ) -> Segment {
        self.insert(
            name,
            description,
            SegmentKind::Dynamic { criteria },
            Some(self.refresh_interval_secs),
        )
    }

    fn insert(
        &self,
        name: String,
        description: Option<String>,
        kind: SegmentKind,
        refresh_interval_secs: Option<u64>,
    ) -> Segment {
        let now = Utc::now();
        let segment = Segment {
            id: Uuid::new_v4(),
            name,
            description,
            kind,
            refresh_interval_secs,
            created_at: now,
            updated_at: now,
        };
        info!(segment_id = %segment.id, name = %segment.name, dynamic = segment.is_dynamic(), "Segment created");
        self.segments.insert(segment.id, segment.clone());
        segment
    }

    pub fn get(&self, id: Uuid) -> Option<Segment> {
        self.segments.get(&id).map(|e| e.value().clone())
    }

    /// List all segments, ordered by name.
    pub fn list(&self) -> Vec<Segment> {
        let mut segments: Vec<_> = self.segments.iter().map(|e| e.value().clone()).collect();
        segments.sort_by(|a, b| a.name.cmp(&b.name));
        segments
    }

    /// Replace the criteria of a dynamic segment.
    pub fn update_criteria(
        &self,
        id: Uuid,
        criteria: SegmentCriteria,
    ) -> MarketingResult<Segment> {
        let mut entry = self
            .segments
            .get_mut(&id)
            .ok_or_else(|| MarketingError::NotFound("Segment", id.to_string()))?;
        match entry.kind {
            SegmentKind::Dynamic { .. } => {
                entry.kind = SegmentKind::Dynamic { criteria };
                entry.updated_at = Utc::now();
                info!(segment_id = %id, "Segment criteria updated");
                Ok(entry.clone())
            }
            SegmentKind::Manual { .. } => Err(MarketingError::Validation(format!(
                "Segment {id} is manual and has no criteria"
            ))),
        }
    }

    /// Replace the member list of a manual segment.
    pub fn update_members(&self, id: Uuid, user_ids: Vec<Uuid>) -> MarketingResult<Segment> {
        let mut entry = self
            .segments
            .get_mut(&id)
            .ok_or_else(|| MarketingError::NotFound("Segment", id.to_string()))?;
        match entry.kind {
            SegmentKind::Manual { .. } => {
                entry.kind = SegmentKind::Manual { user_ids };
                entry.updated_at = Utc::now();
                info!(segment_id = %id, "Segment members updated");
                Ok(entry.clone())
            }
            SegmentKind::Dynamic { .. } => Err(MarketingError::Validation(format!(
                "Segment {id} is dynamic and has no explicit member list"
            ))),
        }
    }

    pub fn rename(&self, id: Uuid, name: String) -> MarketingResult<Segment> {
        let mut entry = self
            .segments
            .get_mut(&id)
            .ok_or_else(|| MarketingError::NotFound("Segment", id.to_string()))?;
        entry.name = name;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    pub fn delete(&self, id: Uuid) -> MarketingResult<Segment> {
        let (_, segment) = self
            .segments
            .remove(&id)
            .ok_or_else(|| MarketingError::NotFound("Segment", id.to_string()))?;
        info!(segment_id = %id, name = %segment.name, "Segment deleted");
        Ok(segment)
    }
}

impl Default for SegmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CriteriaBuilder;
    use serde_json::json;

    #[test]
    fn test_create_and_list() {
        let store = SegmentStore::new();
        store.create_manual("VIPs".to_string(), None, vec![Uuid::new_v4()]);
        store.create_dynamic(
            "Active storefronts".to_string(),
            Some("Merchants with a live storefront".to_string()),
            CriteriaBuilder::new().has_storefront(Some(true)).build(),
        );

        let segments = store.list();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].name, "Active storefronts");
        assert!(segments[0].is_dynamic());
        assert_eq!(segments[0].refresh_interval_secs, Some(300));
        assert_eq!(segments[1].refresh_interval_secs, None);
    }

    #[test]
    fn test_update_criteria_on_dynamic() {
        let store = SegmentStore::new();
        let segment = store.create_dynamic(
            "Early users".to_string(),
            None,
            CriteriaBuilder::new().tier(Some("EARLY_USER")).build(),
        );

        let updated = store
            .update_criteria(
                segment.id,
                CriteriaBuilder::new().is_active(Some(true)).build(),
            )
            .unwrap();
        match updated.kind {
            SegmentKind::Dynamic { criteria } => {
                assert_eq!(criteria.to_value(), json!({ "is_active": true }));
            }
            SegmentKind::Manual { .. } => panic!("segment should stay dynamic"),
        }
    }

    #[test]
    fn test_update_criteria_on_manual_fails() {
        let store = SegmentStore::new();
        let segment = store.create_manual("Hand-picked".to_string(), None, vec![]);
        let result = store.update_criteria(segment.id, CriteriaBuilder::new().build());
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_then_get() {
        let store = SegmentStore::new();
        let segment = store.create_manual("Temp".to_string(), None, vec![]);
        store.delete(segment.id).unwrap();
        assert!(store.get(segment.id).is_none());
        assert!(store.delete(segment.id).is_err());
    }

    #[test]
    fn test_wire_shape_of_dynamic_segment() {
        let store = SegmentStore::new();
        let segment = store.create_dynamic(
            "Verified".to_string(),
            None,
            CriteriaBuilder::new().bvn_verified(Some(true)).build(),
        );

        let wire = serde_json::to_value(&segment).unwrap();
        assert_eq!(wire["type"], json!("dynamic"));
        // criteria goes out verbatim as accumulated
        assert_eq!(wire["criteria"], json!({ "bvn_verified": true }));
    }
}
