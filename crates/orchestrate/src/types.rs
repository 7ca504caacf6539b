//! Core types for resource orchestration.

use serde::{Deserialize, Serialize};

/// The lifecycle operation a worker run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpKind {
    /// Create resources in install order
    Create,
    /// Update resources in install order
    Update,
    /// Delete resources in reverse install order
    Delete,
}

impl OpKind {
    /// Imperative verb for prompts and plan headings.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Past-tense verb for summary lines.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.verb())
    }
}

/// Worker lifecycle phase, advanced by cheap idempotent checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// API client not yet usable
    PreInit,
    /// Client ready, no resources loaded
    WorkerReady,
    /// Client ready and resources loaded
    ResourcesInit,
}

/// Filters narrowing a run to a subset of declared resources.
///
/// All filters are optional, case-insensitive substring matches, and may be
/// combined. An empty filter passes everything through.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    /// Keep resources whose name contains this substring
    pub name: Option<String>,
    /// Keep resources whose type contains this substring
    pub resource_type: Option<String>,
    /// Keep groups whose name contains this substring
    pub group: Option<String>,
}

impl ResourceFilter {
    /// Filter by resource name substring.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filter by resource type substring.
    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Filter by group name substring.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Check a group name against the group filter.
    pub fn matches_group(&self, group_name: &str) -> bool {
        match &self.group {
            Some(g) => group_name.to_lowercase().contains(&g.to_lowercase()),
            None => true,
        }
    }

    /// Check a resource name against the name filter.
    ///
    /// Resources without a resolvable name never match an active filter.
    pub fn matches_name(&self, name: Option<&str>) -> bool {
        match (&self.name, name) {
            (Some(f), Some(n)) => n.to_lowercase().contains(&f.to_lowercase()),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }

    /// Check a resource type string against the type filter.
    pub fn matches_type(&self, resource_type: &str) -> bool {
        match &self.resource_type {
            Some(f) => resource_type.to_lowercase().contains(&f.to_lowercase()),
            None => true,
        }
    }
}

/// One row of a planned run, as presented to progress callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Name of the group the resource was declared in
    pub group: String,
    /// Resource type string
    pub resource_type: String,
    /// Resource name, if it has one
    pub name: Option<String>,
    /// Effective sort weight (group weight x install weight)
    pub weight: u32,
}

impl std::fmt::Display for PlanEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.resource_type,
            self.name.as_deref().unwrap_or("unnamed")
        )
    }
}

/// Aggregate outcome of a worker run.
///
/// Per-resource failures surface only in the log stream; the summary
/// carries counts, not per-resource detail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkSummary {
    /// Number of resources in the confirmed plan
    pub planned: usize,
    /// Number of resources whose operation reported success
    pub succeeded: usize,
}

impl WorkSummary {
    /// A run succeeds only when every planned resource succeeded.
    ///
    /// An empty plan is trivially successful: nothing to do is not a
    /// failure.
    pub fn is_success(&self) -> bool {
        self.succeeded == self.planned
    }

    /// Number of resources that did not succeed.
    pub fn failed(&self) -> usize {
        self.planned - self.succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_name_case_insensitive() {
        let filter = ResourceFilter::default().with_name("PROD");
        assert!(filter.matches_name(Some("prod-bucket")));
        assert!(!filter.matches_name(Some("dev-bucket")));
    }

    #[test]
    fn test_filter_drops_unnamed_when_name_filter_set() {
        let filter = ResourceFilter::default().with_name("prod");
        assert!(!filter.matches_name(None));
        // Without a name filter, unnamed resources pass
        assert!(ResourceFilter::default().matches_name(None));
    }

    #[test]
    fn test_filter_matches_type_substring() {
        let filter = ResourceFilter::default().with_type("cluster");
        assert!(filter.matches_type("db_cluster"));
        assert!(filter.matches_type("cluster"));
        assert!(!filter.matches_type("bucket"));
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = ResourceFilter::default();
        assert!(filter.matches_group("anything"));
        assert!(filter.matches_name(Some("anything")));
        assert!(filter.matches_type("anything"));
    }

    #[test]
    fn test_summary_success_requires_exact_count() {
        assert!(WorkSummary::default().is_success());
        assert!(
            WorkSummary {
                planned: 3,
                succeeded: 3
            }
            .is_success()
        );
        let partial = WorkSummary {
            planned: 3,
            succeeded: 2,
        };
        assert!(!partial.is_success());
        assert_eq!(partial.failed(), 1);
    }
}
