//! Campaign store — lifecycle transitions and preview rendering.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use marketing_content::ContentRenderer;
use marketing_core::config::CampaignsConfig;
use marketing_core::{MarketingError, MarketingResult, MessageChannel};
use tracing::info;
use uuid::Uuid;

use crate::types::{Campaign, CampaignStatus};

/// In-memory campaign registry with guarded status transitions:
/// `Draft -> Scheduled -> Sending -> Sent`, `Cancelled` reachable from
/// `Draft` and `Scheduled`.
pub struct CampaignStore {
    campaigns: DashMap<Uuid, Campaign>,
    renderer: ContentRenderer,
    schedule_horizon: Duration,
}

impl CampaignStore {
    pub fn new() -> Self {
        Self::with_config(&CampaignsConfig::default())
    }

    pub fn with_config(config: &CampaignsConfig) -> Self {
        Self {
            campaigns: DashMap::new(),
            renderer: ContentRenderer::new(),
            schedule_horizon: Duration::days(config.schedule_horizon_days as i64),
        }
    }

    /// Create a draft campaign targeting one segment.
    pub fn create(
        &self,
        name: String,
        channel: MessageChannel,
        segment_id: Uuid,
        subject: Option<String>,
        content: String,
    ) -> Campaign {
        let now = Utc::now();
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name,
            channel,
            segment_id,
            subject,
            content,
            status: CampaignStatus::Draft,
            scheduled_at: None,
            sent_at: None,
            created_at: now,
            updated_at: now,
        };
        info!(campaign_id = %campaign.id, name = %campaign.name, "Campaign created");
        self.campaigns.insert(campaign.id, campaign.clone());
        campaign
    }

    pub fn get(&self, id: Uuid) -> Option<Campaign> {
        self.campaigns.get(&id).map(|e| e.value().clone())
    }

    /// List all campaigns, newest first.
    pub fn list(&self) -> Vec<Campaign> {
        let mut campaigns: Vec<_> = self.campaigns.iter().map(|e| e.value().clone()).collect();
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        campaigns
    }

    /// Schedule a draft campaign. The send time must be in the future and
    /// within the configured horizon.
    pub fn schedule(&self, id: Uuid, send_at: DateTime<Utc>) -> MarketingResult<Campaign> {
        let now = Utc::now();
        if send_at <= now {
            return Err(MarketingError::Validation(
                "Campaign send time must be in the future".to_string(),
            ));
        }
        if send_at > now + self.schedule_horizon {
            return Err(MarketingError::Validation(format!(
                "Campaign send time exceeds the {} day scheduling horizon",
                self.schedule_horizon.num_days()
            )));
        }
        self.transition(id, CampaignStatus::Scheduled, |campaign| {
            campaign.scheduled_at = Some(send_at);
        })
    }

    /// Hand the campaign to the sending service.
    pub fn mark_sending(&self, id: Uuid) -> MarketingResult<Campaign> {
        self.transition(id, CampaignStatus::Sending, |_| {})
    }

    /// Record completion of the send.
    pub fn mark_sent(&self, id: Uuid) -> MarketingResult<Campaign> {
        self.transition(id, CampaignStatus::Sent, |campaign| {
            campaign.sent_at = Some(Utc::now());
        })
    }

    pub fn cancel(&self, id: Uuid) -> MarketingResult<Campaign> {
        self.transition(id, CampaignStatus::Cancelled, |_| {})
    }

    /// Preview markup for the campaign body: line breaks normalized and CTA
    /// tags expanded, placeholders left for the sending service.
    pub fn preview(&self, id: Uuid) -> MarketingResult<String> {
        let campaign = self
            .campaigns
            .get(&id)
            .ok_or_else(|| MarketingError::NotFound("Campaign", id.to_string()))?;
        Ok(self.renderer.render(&campaign.content))
    }

    fn transition(
        &self,
        id: Uuid,
        to: CampaignStatus,
        apply: impl FnOnce(&mut Campaign),
    ) -> MarketingResult<Campaign> {
        let mut entry = self
            .campaigns
            .get_mut(&id)
            .ok_or_else(|| MarketingError::NotFound("Campaign", id.to_string()))?;
        let from = entry.status;
        let allowed = matches!(
            (from, to),
            (CampaignStatus::Draft, CampaignStatus::Scheduled)
                | (CampaignStatus::Draft, CampaignStatus::Sending)
                | (CampaignStatus::Scheduled, CampaignStatus::Sending)
                | (CampaignStatus::Sending, CampaignStatus::Sent)
                | (CampaignStatus::Draft, CampaignStatus::Cancelled)
                | (CampaignStatus::Scheduled, CampaignStatus::Cancelled)
        );
        if !allowed {
            return Err(MarketingError::InvalidTransition {
                resource: "Campaign",
                from: format!("{from:?}"),
                to: format!("{to:?}"),
            });
        }
        entry.status = to;
        apply(&mut entry);
        entry.updated_at = Utc::now();
        info!(campaign_id = %id, from = ?from, to = ?to, "Campaign transitioned");
        Ok(entry.clone())
    }
}

impl Default for CampaignStore {
    fn default() -> Self {
        Self::new()
    }
}
