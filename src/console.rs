//! Terminal implementations of the engine callback seams.

use crate::ui;
use anyhow::Result;
use dialoguer::Confirm;
use orchestrate::{ConfirmCallback, OpKind, PlanEntry, ProgressCallback, WorkSummary};

/// Progress callback that renders the plan and per-resource progress.
pub struct ConsoleProgress {
    quiet: bool,
    total: usize,
    current: usize,
}

impl ConsoleProgress {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            total: 0,
            current: 0,
        }
    }
}

impl ProgressCallback for ConsoleProgress {
    fn on_plan(&mut self, op: OpKind, plan: &[PlanEntry]) {
        self.total = plan.len();
        self.current = 0;
        if self.quiet {
            return;
        }
        ui::header(&format!("Plan: {} {} resource(s)", op.verb(), plan.len()));
        let mut current_group: Option<&str> = None;
        for entry in plan {
            if current_group != Some(entry.group.as_str()) {
                ui::section(&entry.group);
                current_group = Some(entry.group.as_str());
            }
            ui::dim(&entry.to_string());
        }
        println!();
    }

    fn on_resource_start(&mut self, id: &str) {
        self.current += 1;
        if !self.quiet {
            ui::step(self.current, self.total, id);
        }
    }

    fn on_resource_complete(&mut self, id: &str, ok: bool) {
        if self.quiet {
            return;
        }
        if ok {
            ui::success(id);
        } else {
            ui::error(id);
        }
    }

    fn on_complete(&mut self, op: OpKind, summary: &WorkSummary) {
        if summary.is_success() {
            if !self.quiet {
                ui::success(&format!(
                    "Resources {}: {}/{}",
                    op.past_tense(),
                    summary.succeeded,
                    summary.planned
                ));
            }
        } else {
            ui::error(&format!(
                "Resources {}: {}/{} ({} failed)",
                op.past_tense(),
                summary.succeeded,
                summary.planned,
                summary.failed()
            ));
            ui::dim("Retry, or fix the failed resources manually");
        }
    }
}

/// Interactive yes/no prompt, defaulting to no.
pub struct ConsoleConfirm;

impl ConfirmCallback for ConsoleConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}
