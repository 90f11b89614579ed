//! Workflow store — event-triggered step sequences.

use chrono::Utc;
use dashmap::DashMap;
use marketing_content::ContentRenderer;
use marketing_core::{MarketingError, MarketingResult};
use tracing::info;
use uuid::Uuid;

use crate::types::{Workflow, WorkflowStatus, WorkflowStep};

/// In-memory workflow registry with guarded status transitions:
/// `Draft -> Active <-> Paused`, `Archived` terminal from any prior state.
pub struct WorkflowStore {
    workflows: DashMap<Uuid, Workflow>,
    renderer: ContentRenderer,
}

impl WorkflowStore {
    pub fn new() -> Self {
        Self {
            workflows: DashMap::new(),
            renderer: ContentRenderer::new(),
        }
    }

    /// Create a draft workflow fired on a named platform event.
    pub fn create(
        &self,
        name: String,
        trigger_event: String,
        steps: Vec<WorkflowStep>,
    ) -> Workflow {
        let now = Utc::now();
        let workflow = Workflow {
            id: Uuid::new_v4(),
            name,
            trigger_event,
            steps,
            status: WorkflowStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        info!(workflow_id = %workflow.id, name = %workflow.name, trigger = %workflow.trigger_event, "Workflow created");
        self.workflows.insert(workflow.id, workflow.clone());
        workflow
    }

    pub fn get(&self, id: Uuid) -> Option<Workflow> {
        self.workflows.get(&id).map(|e| e.value().clone())
    }

    /// List all workflows, ordered by name.
    pub fn list(&self) -> Vec<Workflow> {
        let mut workflows: Vec<_> = self.workflows.iter().map(|e| e.value().clone()).collect();
        workflows.sort_by(|a, b| a.name.cmp(&b.name));
        workflows
    }

    /// Append a step; only drafts are editable.
    pub fn add_step(&self, id: Uuid, step: WorkflowStep) -> MarketingResult<Workflow> {
        let mut entry = self
            .workflows
            .get_mut(&id)
            .ok_or_else(|| MarketingError::NotFound("Workflow", id.to_string()))?;
        if entry.status != WorkflowStatus::Draft {
            return Err(MarketingError::Validation(format!(
                "Workflow {id} is not a draft and cannot be edited"
            )));
        }
        entry.steps.push(step);
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    pub fn activate(&self, id: Uuid) -> MarketingResult<Workflow> {
        self.transition(id, WorkflowStatus::Active)
    }

    pub fn pause(&self, id: Uuid) -> MarketingResult<Workflow> {
        self.transition(id, WorkflowStatus::Paused)
    }

    pub fn archive(&self, id: Uuid) -> MarketingResult<Workflow> {
        self.transition(id, WorkflowStatus::Archived)
    }

    /// Active workflows fired by the given platform event.
    pub fn workflows_for_event(&self, event: &str) -> Vec<Workflow> {
        self.workflows
            .iter()
            .filter(|e| {
                e.value().status == WorkflowStatus::Active && e.value().trigger_event == event
            })
            .map(|e| e.value().clone())
            .collect()
    }

    /// Preview markup for a message step; `None` for steps that carry no
    /// content (e.g. waits).
    pub fn preview_step(&self, id: Uuid, step_index: usize) -> MarketingResult<Option<String>> {
        let workflow = self
            .workflows
            .get(&id)
            .ok_or_else(|| MarketingError::NotFound("Workflow", id.to_string()))?;
        let step = workflow.steps.get(step_index).ok_or_else(|| {
            MarketingError::Validation(format!(
                "Workflow {id} has no step {step_index}"
            ))
        })?;
        Ok(step.content().map(|raw| self.renderer.render(raw)))
    }

    fn transition(&self, id: Uuid, to: WorkflowStatus) -> MarketingResult<Workflow> {
        let mut entry = self
            .workflows
            .get_mut(&id)
            .ok_or_else(|| MarketingError::NotFound("Workflow", id.to_string()))?;
        let from = entry.status;
        let allowed = matches!(
            (from, to),
            (WorkflowStatus::Draft, WorkflowStatus::Active)
                | (WorkflowStatus::Active, WorkflowStatus::Paused)
                | (WorkflowStatus::Paused, WorkflowStatus::Active)
                | (WorkflowStatus::Draft, WorkflowStatus::Archived)
                | (WorkflowStatus::Active, WorkflowStatus::Archived)
                | (WorkflowStatus::Paused, WorkflowStatus::Archived)
        );
        if !allowed {
            return Err(MarketingError::InvalidTransition {
                resource: "Workflow",
                from: format!("{from:?}"),
                to: format!("{to:?}"),
            });
        }
        entry.status = to;
        entry.updated_at = Utc::now();
        info!(workflow_id = %id, from = ?from, to = ?to, "Workflow transitioned");
        Ok(entry.clone())
    }
}

impl Default for WorkflowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn onboarding(store: &WorkflowStore) -> Workflow {
        store.create(
            "Onboarding".to_string(),
            "user.signed_up".to_string(),
            vec![
                WorkflowStep::Wait { duration_secs: 3600 },
                WorkflowStep::SendEmail {
                    subject: "Welcome".to_string(),
                    content: "Hello!\n<cta text=\"Get started\" link=\"https://app.test\">"
                        .to_string(),
                },
            ],
        )
    }

    #[test]
    fn test_lifecycle() {
        let store = WorkflowStore::new();
        let workflow = onboarding(&store);
        assert_eq!(workflow.status, WorkflowStatus::Draft);

        store.activate(workflow.id).unwrap();
        store.pause(workflow.id).unwrap();
        store.activate(workflow.id).unwrap();
        let archived = store.archive(workflow.id).unwrap();
        assert_eq!(archived.status, WorkflowStatus::Archived);

        // archived is terminal
        assert!(store.activate(workflow.id).is_err());
    }

    #[test]
    fn test_only_drafts_editable() {
        let store = WorkflowStore::new();
        let workflow = onboarding(&store);
        store
            .add_step(
                workflow.id,
                WorkflowStep::SendSms {
                    content: "Reminder".to_string(),
                },
            )
            .unwrap();

        store.activate(workflow.id).unwrap();
        assert!(store
            .add_step(workflow.id, WorkflowStep::Wait { duration_secs: 60 })
            .is_err());
    }

    #[test]
    fn test_workflows_for_event_filters_active() {
        let store = WorkflowStore::new();
        let active = onboarding(&store);
        store.activate(active.id).unwrap();
        let dormant = onboarding(&store);

        let fired = store.workflows_for_event("user.signed_up");
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, active.id);
        assert!(fired.iter().all(|w| w.id != dormant.id));
        assert!(store.workflows_for_event("order.placed").is_empty());
    }

    #[test]
    fn test_preview_step() {
        let store = WorkflowStore::new();
        let workflow = onboarding(&store);

        // wait steps carry no content
        assert_eq!(store.preview_step(workflow.id, 0).unwrap(), None);

        let preview = store.preview_step(workflow.id, 1).unwrap().unwrap();
        assert!(preview.contains("Hello!<br/>"));
        assert!(preview.contains("<a href=\"https://app.test\""));

        assert!(store.preview_step(workflow.id, 9).is_err());
    }
}
