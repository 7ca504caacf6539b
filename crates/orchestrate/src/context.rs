//! Callback seams for worker runs.
//!
//! These traits let the engine be driven without hard dependencies on a
//! specific terminal UI or prompt library: the CLI wires interactive
//! implementations, automation and tests wire the no-op/auto variants.

use crate::types::{OpKind, PlanEntry, WorkSummary};
use anyhow::Result;

/// Progress callback for worker runs.
pub trait ProgressCallback {
    /// Called with the full ordered plan before anything executes.
    fn on_plan(&mut self, op: OpKind, plan: &[PlanEntry]);

    /// Called when a resource operation starts.
    fn on_resource_start(&mut self, id: &str);

    /// Called when a resource operation completes.
    fn on_resource_complete(&mut self, id: &str, ok: bool);

    /// Called after the drive loop with the aggregate summary.
    fn on_complete(&mut self, op: OpKind, summary: &WorkSummary);
}

/// Confirmation callback gating destructive runs.
pub trait ConfirmCallback {
    /// Ask for confirmation; `Ok(false)` aborts the run.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// No-op progress callback.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_plan(&mut self, _op: OpKind, _plan: &[PlanEntry]) {}
    fn on_resource_start(&mut self, _id: &str) {}
    fn on_resource_complete(&mut self, _id: &str, _ok: bool) {}
    fn on_complete(&mut self, _op: OpKind, _summary: &WorkSummary) {}
}

/// Confirmation callback that always proceeds.
pub struct AutoConfirm;

impl ConfirmCallback for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Confirmation callback that always declines.
pub struct AutoDecline;

impl ConfirmCallback for AutoDecline {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(false)
    }
}
