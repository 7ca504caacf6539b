//! The `config` subcommands: inspect and validate the workspace file.

use crate::config;
use crate::ui;
use anyhow::{Result, bail};
use orchestrate::Resource as _;
use std::path::Path;

pub fn show(config_path: Option<&Path>) -> Result<()> {
    let workspace = config::load(config_path)?;

    ui::header("Workspace");
    ui::kv("endpoint", &workspace.api.endpoint);
    ui::kv(
        "token_env",
        workspace.api.token_env.as_deref().unwrap_or("(none)"),
    );

    for group in &workspace.groups {
        ui::section(&group.name);
        ui::kv("enabled", if group.enabled { "yes" } else { "no" });
        ui::kv("weight", &group.weight.to_string());
        ui::kv("resources", &group.resource_count().to_string());
        for role in &group.roles {
            ui::dim(&format!("role: {}", role.name));
        }
        for policy in &group.policies {
            ui::dim(&format!("policy: {}", policy.name));
        }
        for bucket in &group.buckets {
            ui::dim(&format!("bucket: {}", bucket.name));
        }
        for secret in &group.secrets {
            ui::dim(&format!("secret: {}", secret.name));
        }
        for cluster in &group.clusters {
            ui::dim(&format!("cluster: {}", cluster.name));
        }
        for node_group in &group.node_groups {
            ui::dim(&format!("node_group: {}", node_group.name));
        }
    }
    Ok(())
}

pub fn validate(config_path: Option<&Path>) -> Result<()> {
    let workspace = config::load(config_path)?;
    let groups = workspace.into_groups();

    let mut total = 0;
    let mut invalid = Vec::new();
    for group in &groups {
        for resource in &group.resources {
            total += 1;
            if !resource.is_valid() {
                invalid.push(resource.id());
            }
        }
    }

    if !invalid.is_empty() {
        for id in &invalid {
            ui::error(&format!("Invalid resource: {id}"));
        }
        bail!("{} of {} resource(s) failed validation", invalid.len(), total);
    }
    ui::success(&format!(
        "Config OK: {} group(s), {} resource(s)",
        groups.len(),
        total
    ));
    Ok(())
}
