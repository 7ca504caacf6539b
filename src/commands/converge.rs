//! The `up` / `down` / `patch` subcommands.

use crate::Context;
use crate::cli::OpArgs;
use crate::config;
use crate::console::{ConsoleConfirm, ConsoleProgress};
use anyhow::{Result, bail};
use orchestrate::{AutoConfirm, ConfirmCallback, OpKind, Worker};
use std::path::Path;

pub fn run(ctx: &Context, config_path: Option<&Path>, args: &OpArgs, op: OpKind) -> Result<()> {
    let workspace = config::load(config_path)?;
    // Build the client before the groups consume the config
    let client = workspace.api_client();
    let mut worker = Worker::with_groups(client, workspace.into_groups());

    let filter = args.filter();
    let mut progress = ConsoleProgress::new(ctx.quiet);

    if args.dry_run {
        match op {
            OpKind::Create => worker.create_resources_dry_run(&filter, &mut progress),
            OpKind::Update => worker.update_resources_dry_run(&filter, &mut progress),
            OpKind::Delete => worker.delete_resources_dry_run(&filter, &mut progress),
        }
        return Ok(());
    }

    let mut auto = AutoConfirm;
    let mut interactive = ConsoleConfirm;
    let confirm: &mut dyn ConfirmCallback = if args.yes { &mut auto } else { &mut interactive };

    let summary = match op {
        OpKind::Create => worker.create_resources(&filter, &mut progress, confirm),
        OpKind::Update => worker.update_resources(&filter, &mut progress, confirm),
        OpKind::Delete => worker.delete_resources(&filter, &mut progress, confirm),
    }?;

    if !summary.is_success() {
        bail!(
            "{} of {} resource(s) {}",
            summary.succeeded,
            summary.planned,
            op.past_tense()
        );
    }
    Ok(())
}
