//! Worker - drives ordered resource sequences through their lifecycle.
//!
//! The drive loop is strictly sequential. The sort order is the only
//! dependency mechanism the engine has, so resources run one at a time, in
//! order, each call blocking until its backend answers. A failure is
//! isolated to its resource: the loop continues and the damage shows up in
//! the aggregate summary.

use crate::context::{ConfirmCallback, ProgressCallback};
use crate::group::ResourceGroup;
use crate::order::{Flattened, SortOrder, filter_and_flatten};
use crate::resource::Resource as _;
use crate::types::{OpKind, PlanEntry, ResourceFilter, WorkSummary, WorkerPhase};
use anyhow::Result;

/// Backend session handed to every resource call.
///
/// The worker constructs the client once and shares it read-only across
/// the whole run; `is_ready` is the cheap idempotent check behind the
/// worker's phase reporting.
pub trait ApiSession {
    /// Whether the session is usable.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Orchestrator for one backend: owns the API client and the declared
/// resource groups, and exposes the create/update/delete operations.
pub struct Worker<C> {
    client: C,
    groups: Vec<ResourceGroup<C>>,
}

impl<C: ApiSession> Worker<C> {
    /// Worker with no resources loaded yet.
    pub fn new(client: C) -> Self {
        Self {
            client,
            groups: Vec::new(),
        }
    }

    /// Worker over an already-loaded set of groups.
    pub fn with_groups(client: C, groups: Vec<ResourceGroup<C>>) -> Self {
        Self { client, groups }
    }

    /// Load one more group.
    pub fn add_group(&mut self, group: ResourceGroup<C>) {
        self.groups.push(group);
    }

    /// The shared API client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Current phase, recomputed from cheap checks on every call.
    pub fn phase(&self) -> WorkerPhase {
        if !self.client.is_ready() {
            return WorkerPhase::PreInit;
        }
        if self.groups.is_empty() {
            return WorkerPhase::WorkerReady;
        }
        WorkerPhase::ResourcesInit
    }

    /// Create resources in install order.
    pub fn create_resources(
        &mut self,
        filter: &ResourceFilter,
        progress: &mut dyn ProgressCallback,
        confirm: &mut dyn ConfirmCallback,
    ) -> Result<WorkSummary> {
        self.run(OpKind::Create, filter, progress, confirm)
    }

    /// Show the create plan without executing.
    pub fn create_resources_dry_run(
        &mut self,
        filter: &ResourceFilter,
        progress: &mut dyn ProgressCallback,
    ) {
        self.plan_only(OpKind::Create, filter, progress);
    }

    /// Update resources in install order.
    pub fn update_resources(
        &mut self,
        filter: &ResourceFilter,
        progress: &mut dyn ProgressCallback,
        confirm: &mut dyn ConfirmCallback,
    ) -> Result<WorkSummary> {
        self.run(OpKind::Update, filter, progress, confirm)
    }

    /// Show the update plan without executing.
    pub fn update_resources_dry_run(
        &mut self,
        filter: &ResourceFilter,
        progress: &mut dyn ProgressCallback,
    ) {
        self.plan_only(OpKind::Update, filter, progress);
    }

    /// Delete resources in reverse install order.
    pub fn delete_resources(
        &mut self,
        filter: &ResourceFilter,
        progress: &mut dyn ProgressCallback,
        confirm: &mut dyn ConfirmCallback,
    ) -> Result<WorkSummary> {
        self.run(OpKind::Delete, filter, progress, confirm)
    }

    /// Show the delete plan without executing.
    pub fn delete_resources_dry_run(
        &mut self,
        filter: &ResourceFilter,
        progress: &mut dyn ProgressCallback,
    ) {
        self.plan_only(OpKind::Delete, filter, progress);
    }

    fn run(
        &mut self,
        op: OpKind,
        filter: &ResourceFilter,
        progress: &mut dyn ProgressCallback,
        confirm: &mut dyn ConfirmCallback,
    ) -> Result<WorkSummary> {
        log::debug!("Worker phase: {:?}", self.phase());

        let mut entries = filter_and_flatten(&mut self.groups, filter, sort_order_of(op));
        if entries.is_empty() {
            log::info!("No resources to {op}");
            return Ok(WorkSummary::default());
        }

        progress.on_plan(op, &plan_of(&entries));
        if !confirm.confirm(&format!("Confirm {op}"))? {
            log::info!("Skipping {op}");
            return Ok(WorkSummary {
                planned: entries.len(),
                succeeded: 0,
            });
        }

        let mut summary = WorkSummary {
            planned: entries.len(),
            succeeded: 0,
        };
        for entry in &mut entries {
            let id = entry.resource.id();
            progress.on_resource_start(&id);
            let ok = match op {
                OpKind::Create => entry.resource.create(&self.client),
                OpKind::Update => entry.resource.update(&self.client),
                OpKind::Delete => entry.resource.delete(&self.client),
            };
            progress.on_resource_complete(&id, ok);
            if ok {
                summary.succeeded += 1;
            }
        }

        progress.on_complete(op, &summary);
        if !summary.is_success() {
            log::error!(
                "Resources {}: {}/{} - retry, or fix the failed resources manually",
                op.past_tense(),
                summary.succeeded,
                summary.planned
            );
        }
        Ok(summary)
    }

    fn plan_only(&mut self, op: OpKind, filter: &ResourceFilter, progress: &mut dyn ProgressCallback) {
        let entries = filter_and_flatten(&mut self.groups, filter, sort_order_of(op));
        if entries.is_empty() {
            log::info!("No resources to {op}");
            return;
        }
        progress.on_plan(op, &plan_of(&entries));
    }
}

fn sort_order_of(op: OpKind) -> SortOrder {
    match op {
        OpKind::Create | OpKind::Update => SortOrder::Create,
        OpKind::Delete => SortOrder::Delete,
    }
}

fn plan_of<C>(entries: &[Flattened<'_, C>]) -> Vec<PlanEntry> {
    entries
        .iter()
        .map(|e| PlanEntry {
            group: e.group.clone(),
            resource_type: e.resource.resource_type().to_string(),
            name: e.resource.name().map(str::to_string),
            weight: e.weight,
        })
        .collect()
}
