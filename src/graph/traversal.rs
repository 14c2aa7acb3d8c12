//! Breadth-first subgraph traversal over outgoing statements

use super::bundle::BundleConfiguration;
use super::statement::GeneralStatement;
use super::thing::Thing;
use super::types::{StatementId, ThingId};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Walk outgoing statements from `root_id` level by level
///
/// `outgoing` yields the statements whose subject is the given thing.
/// `expand` decides whether the walk continues past an object. Each
/// statement is visited once, on the shortest level it is reachable at, so
/// cycles and diamonds never produce duplicates. The result is in visiting
/// order.
pub fn find_subgraph<F, E>(
    root_id: &ThingId,
    config: &BundleConfiguration,
    mut outgoing: F,
    expand: E,
) -> Vec<GeneralStatement>
where
    F: FnMut(&ThingId) -> Vec<GeneralStatement>,
    E: Fn(&Thing) -> bool,
{
    let mut visited: FxHashSet<StatementId> = FxHashSet::default();
    let mut expanded: FxHashSet<ThingId> = FxHashSet::default();
    let mut queue: VecDeque<(ThingId, usize)> = VecDeque::new();
    let mut result = Vec::new();

    expanded.insert(root_id.clone());
    queue.push_back((root_id.clone(), 1));

    while let Some((thing_id, level)) = queue.pop_front() {
        if !config.within_max_level(level) {
            continue;
        }
        for statement in outgoing(&thing_id) {
            if !config.admits(&statement.object) {
                continue;
            }
            if !visited.insert(statement.id.clone()) {
                continue;
            }
            let object_id = statement.object.id();
            if expand(&statement.object) && !expanded.contains(object_id) {
                expanded.insert(object_id.clone());
                queue.push_back((object_id.clone(), level + 1));
            }
            if config.above_min_level(level) {
                result.push(statement);
            }
        }
    }

    result
}
