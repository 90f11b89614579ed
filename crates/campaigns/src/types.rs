use chrono::{DateTime, Utc};
use marketing_core::MessageChannel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single scheduled or sent message targeting one segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub channel: MessageChannel,
    pub segment_id: Uuid,
    /// Subject line; SMS campaigns have none.
    pub subject: Option<String>,
    /// Raw template body (placeholders and CTA tags unexpanded).
    pub content: String,
    pub status: CampaignStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campaign lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sending,
    Sent,
    Cancelled,
}

/// A sequence of steps fired automatically on a named platform event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: Uuid,
    pub name: String,
    /// Platform event that starts a run, e.g. `user.signed_up`.
    pub trigger_event: String,
    pub steps: Vec<WorkflowStep>,
    pub status: WorkflowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Workflow lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Draft,
    Active,
    Paused,
    Archived,
}

/// One step of a workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WorkflowStep {
    Wait { duration_secs: u64 },
    SendEmail { subject: String, content: String },
    SendSms { content: String },
}

impl WorkflowStep {
    /// Raw template body carried by a message step, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            WorkflowStep::Wait { .. } => None,
            WorkflowStep::SendEmail { content, .. } => Some(content),
            WorkflowStep::SendSms { content } => Some(content),
        }
    }
}
