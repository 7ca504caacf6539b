//! Canonical install order and the flatten + filter + sort step.
//!
//! The engine models no dependency graph between resources. Instead, every
//! resource type has a fixed position in a human-curated total order:
//! prerequisites (roles, policies) sort before the things that reference
//! them (clusters, node groups). Creation walks the order ascending,
//! deletion descending, so dependents are torn down before their
//! prerequisites.

use crate::group::{ResourceGroup, resources_from_group};
use crate::resource::{BoxedResource, Resource as _};
use crate::types::ResourceFilter;

/// Canonical creation order for known resource types.
///
/// The table is read-only after initialization; the install weight of a
/// type is its 1-based position here.
const INSTALL_ORDER: &[&str] = &[
    "role",
    "policy",
    "bucket",
    "secret",
    "certificate",
    "stack",
    "subnet_group",
    "db_cluster",
    "cluster",
    "node_group",
    "service",
    "function",
];

/// Weight assigned to resource types not present in the canonical order;
/// they sort after everything known.
pub const DEFAULT_INSTALL_WEIGHT: u32 = 5000;

/// Install weight for a resource type: its 1-based position in the
/// canonical order, or [`DEFAULT_INSTALL_WEIGHT`] for unknown types.
pub fn install_weight(resource_type: &str) -> u32 {
    INSTALL_ORDER
        .iter()
        .position(|t| *t == resource_type)
        .map_or(DEFAULT_INSTALL_WEIGHT, |pos| pos as u32 + 1)
}

/// Direction of the weighted sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending weight: prerequisites first
    Create,
    /// Descending weight: dependents destroyed before prerequisites
    Delete,
}

/// One flattened resource with its group attribution and effective weight.
pub struct Flattened<'a, C> {
    /// Name of the group the resource was declared in
    pub group: String,
    /// Effective sort weight: group weight x install weight
    pub weight: u32,
    /// The resource itself
    pub resource: &'a mut BoxedResource<C>,
}

/// Flatten the enabled groups into one filtered, weight-sorted sequence.
///
/// The sort is stable: resources with equal weight keep their relative
/// flatten order. Consecutive entries declaring the same (weight, type,
/// name) identity are deduplicated, keeping the first.
pub fn filter_and_flatten<'a, C>(
    groups: &'a mut [ResourceGroup<C>],
    filter: &ResourceFilter,
    order: SortOrder,
) -> Vec<Flattened<'a, C>> {
    log::debug!("Flattening {} resource group(s)", groups.len());

    let mut entries: Vec<Flattened<'a, C>> = Vec::new();
    for group in groups.iter_mut() {
        if !group.enabled {
            log::debug!("Skipping disabled group {}", group.name);
            continue;
        }
        if !filter.matches_group(&group.name) {
            log::debug!("Skipping group {}", group.name);
            continue;
        }
        let group_name = group.name.clone();
        let group_weight = group.weight;
        for resource in resources_from_group(group, filter) {
            let weight = group_weight * install_weight(resource.resource_type());
            entries.push(Flattened {
                group: group_name.clone(),
                weight,
                resource,
            });
        }
    }

    match order {
        SortOrder::Create => entries.sort_by(|a, b| a.weight.cmp(&b.weight)),
        SortOrder::Delete => entries.sort_by(|a, b| b.weight.cmp(&a.weight)),
    }

    entries.dedup_by(|a, b| {
        a.weight == b.weight
            && a.resource.resource_type() == b.resource.resource_type()
            && a.resource.name().is_some()
            && a.resource.name() == b.resource.name()
    });

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::tests::{MockClient, MockResource};

    fn group_of(name: &str, members: &[(&'static str, &str)]) -> ResourceGroup<MockClient> {
        let mut group = ResourceGroup::new(name);
        for (kind, rname) in members {
            group.add_resource(Box::new(MockResource::new(kind, rname)));
        }
        group
    }

    #[test]
    fn test_install_weight_is_one_based_position() {
        assert_eq!(install_weight("role"), 1);
        assert_eq!(install_weight("bucket"), 3);
        assert_eq!(install_weight("cluster"), 9);
        assert_eq!(install_weight("node_group"), 10);
    }

    #[test]
    fn test_unknown_types_sort_last() {
        assert_eq!(install_weight("quantum_tunnel"), DEFAULT_INSTALL_WEIGHT);
        assert!(install_weight("quantum_tunnel") > install_weight("function"));
    }

    #[test]
    fn test_create_order_sorts_prerequisites_first() {
        // Declared in reverse order on purpose
        let mut groups = vec![group_of(
            "app",
            &[("cluster", "prod"), ("bucket", "data"), ("role", "app")],
        )];
        let flat = filter_and_flatten(&mut groups, &ResourceFilter::default(), SortOrder::Create);
        let ids: Vec<String> = flat.iter().map(|e| e.resource.id()).collect();
        assert_eq!(ids, vec!["role:app", "bucket:data", "cluster:prod"]);
    }

    #[test]
    fn test_delete_order_is_reversed() {
        let mut groups = vec![group_of(
            "app",
            &[("cluster", "prod"), ("bucket", "data"), ("role", "app")],
        )];
        let flat = filter_and_flatten(&mut groups, &ResourceFilter::default(), SortOrder::Delete);
        let ids: Vec<String> = flat.iter().map(|e| e.resource.id()).collect();
        assert_eq!(ids, vec!["cluster:prod", "bucket:data", "role:app"]);
    }

    #[test]
    fn test_equal_weight_preserves_flatten_order() {
        let mut groups = vec![group_of(
            "app",
            &[("bucket", "first"), ("bucket", "second"), ("bucket", "third")],
        )];
        let created =
            filter_and_flatten(&mut groups, &ResourceFilter::default(), SortOrder::Create);
        let ids: Vec<String> = created.iter().map(|e| e.resource.id()).collect();
        assert_eq!(ids, vec!["bucket:first", "bucket:second", "bucket:third"]);

        // Delete reverses weights, but ties still keep flatten order
        let deleted =
            filter_and_flatten(&mut groups, &ResourceFilter::default(), SortOrder::Delete);
        let ids: Vec<String> = deleted.iter().map(|e| e.resource.id()).collect();
        assert_eq!(ids, vec!["bucket:first", "bucket:second", "bucket:third"]);
    }

    #[test]
    fn test_name_filter_keeps_weighted_order() {
        let mut groups = vec![group_of(
            "app",
            &[
                ("bucket", "prod-bucket"),
                ("bucket", "dev-bucket"),
                ("role", "prod-role"),
            ],
        )];
        let filter = ResourceFilter::default().with_name("prod");
        let flat = filter_and_flatten(&mut groups, &filter, SortOrder::Create);
        let ids: Vec<String> = flat.iter().map(|e| e.resource.id()).collect();
        assert_eq!(ids, vec!["role:prod-role", "bucket:prod-bucket"]);
    }

    #[test]
    fn test_disabled_groups_are_skipped() {
        let mut groups = vec![
            group_of("live", &[("role", "app")]),
            group_of("dark", &[("role", "shadow")]).with_enabled(false),
        ];
        let flat = filter_and_flatten(&mut groups, &ResourceFilter::default(), SortOrder::Create);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].resource.id(), "role:app");
    }

    #[test]
    fn test_group_filter_matches_group_name() {
        let mut groups = vec![
            group_of("app-core", &[("role", "app")]),
            group_of("data", &[("bucket", "lake")]),
        ];
        let filter = ResourceFilter::default().with_group("core");
        let flat = filter_and_flatten(&mut groups, &filter, SortOrder::Create);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].group, "app-core");
    }

    #[test]
    fn test_group_weight_scales_install_weight() {
        let mut groups = vec![
            group_of("late", &[("role", "late-role")]).with_weight(200),
            group_of("early", &[("cluster", "early-cluster")]).with_weight(10),
        ];
        // 200 * 1 (role) > 10 * 9 (cluster), so the low-weight group's
        // cluster comes first despite its heavier type
        let flat = filter_and_flatten(&mut groups, &ResourceFilter::default(), SortOrder::Create);
        let ids: Vec<String> = flat.iter().map(|e| e.resource.id()).collect();
        assert_eq!(ids, vec!["cluster:early-cluster", "role:late-role"]);
    }

    #[test]
    fn test_duplicate_declarations_are_deduped() {
        let mut groups = vec![group_of(
            "app",
            &[("bucket", "data"), ("bucket", "data"), ("role", "app")],
        )];
        let flat = filter_and_flatten(&mut groups, &ResourceFilter::default(), SortOrder::Create);
        let ids: Vec<String> = flat.iter().map(|e| e.resource.id()).collect();
        assert_eq!(ids, vec!["role:app", "bucket:data"]);
    }

    #[test]
    fn test_unnamed_duplicates_are_not_deduped() {
        let mut group = ResourceGroup::new("app");
        let mut a = MockResource::new("bucket", "x");
        a.name = None;
        let mut b = MockResource::new("bucket", "y");
        b.name = None;
        group.add_resource(Box::new(a));
        group.add_resource(Box::new(b));

        let mut groups = vec![group];
        let flat = filter_and_flatten(&mut groups, &ResourceFilter::default(), SortOrder::Create);
        assert_eq!(flat.len(), 2);
    }
}
