//! Campaigns and workflows — scheduled one-shot messages targeting a
//! segment, and event-triggered step sequences, with in-memory stores.

pub mod campaigns;
pub mod types;
pub mod workflows;

pub use campaigns::CampaignStore;
pub use types::{Campaign, CampaignStatus, Workflow, WorkflowStatus, WorkflowStep};
pub use workflows::WorkflowStore;
